use clap::{Parser, ValueEnum};
use frankenpatch::io::loader::load_scene;
use frankenpatch::io::npy::write_npy;
use frankenpatch::io::{output_path, OUTPUT_SUBDIR};
use frankenpatch::{
    run_grid, FrankenConfig, FrankenError, GridPos, NeighborGrouping, RunSummary,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build frankenpatch tensors from a grid of multi-view images"
)]
struct Cli {
    /// Directory holding `<NAME>_<ROW>_<COL>.<ext>` images.
    input_dir: PathBuf,
    /// Number of grid rows to use.
    rows: usize,
    /// Number of grid columns to use.
    cols: usize,
    /// Tile edge length in pixels.
    tile_size: usize,
    /// Best neighbor matches kept per tile.
    neighbors: usize,
    /// Spacing between candidate offsets in pixels.
    stride: usize,
    /// Search window half-width, in strides.
    roi: usize,
    /// Output root; tensors go to `<DIR>/frankenpatches`. Defaults to the input directory.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// How neighbor views are chained during the search.
    #[arg(long, value_enum, default_value_t = GroupingArg::Directional)]
    grouping: GroupingArg,
    /// Worker threads (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,
    /// Process views one at a time.
    #[arg(long)]
    sequential: bool,
    /// Write a JSON run report to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GroupingArg {
    Directional,
    Axis,
}

impl From<GroupingArg> for NeighborGrouping {
    fn from(value: GroupingArg) -> Self {
        match value {
            GroupingArg::Directional => NeighborGrouping::Directional,
            GroupingArg::Axis => NeighborGrouping::Axis,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    views: usize,
    tiles: usize,
    elapsed_ms: u128,
    outputs: Vec<PathBuf>,
}

impl Report {
    fn new(summary: RunSummary, elapsed_ms: u128, mut outputs: Vec<PathBuf>) -> Self {
        outputs.sort();
        Self {
            views: summary.views,
            tiles: summary.tiles,
            elapsed_ms,
            outputs,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("frankenpatch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    let cfg = FrankenConfig {
        tile_size: cli.tile_size,
        neighbors: cli.neighbors,
        stride: cli.stride,
        roi: cli.roi,
        grouping: cli.grouping.into(),
        parallel: !cli.sequential,
        threads: cli.threads,
    };
    cfg.validate()?;

    let start = Instant::now();

    let scene = load_scene(&cli.input_dir, cli.rows, cli.cols)?;
    let output_dir = cli.output_dir.unwrap_or_else(|| cli.input_dir.clone());
    fs::create_dir_all(output_dir.join(OUTPUT_SUBDIR))?;

    let written = Mutex::new(Vec::new());
    let summary = run_grid(&scene.grid, &cfg, |pos: GridPos, tensor| {
        let name = scene.name(pos).ok_or(FrankenError::MissingView {
            row: pos.row,
            col: pos.col,
        })?;
        let path = output_path(&output_dir, name);
        write_npy(&path, &tensor)?;
        tracing::debug!(path = %path.display(), "wrote frankenpatch tensor");
        if let Ok(mut written) = written.lock() {
            written.push(path);
        }
        Ok(())
    })?;

    let elapsed_ms = start.elapsed().as_millis();
    println!("Time taken: {elapsed_ms} milliseconds");

    if let Some(report_path) = cli.report {
        let outputs = written.into_inner().unwrap_or_default();
        let report = Report::new(summary, elapsed_ms, outputs);
        fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    }

    Ok(())
}
