//! Batch runner over every view of a grid.
//!
//! Each view is an independent task: it reads the shared, immutable grid and
//! produces its own tensor, which is handed to a caller-supplied sink (for
//! example an `.npy` writer). With the `rayon` feature and `parallel` set,
//! tasks run on a worker pool; the first error aborts the batch.

use crate::assemble::{assemble_view, tile_count};
use crate::grid::{Grid, GridPos};
use crate::search::{NeighborGrouping, SearchParams};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrankenError, FrankenResult};
use crate::FrankenTensor;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Configuration for a frankenpatch batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrankenConfig {
    /// Edge length of the square tiles.
    pub tile_size: usize,
    /// Matches kept per tile (K); the output holds K + 1 channel blocks.
    pub neighbors: usize,
    /// Spacing between candidate offsets.
    pub stride: usize,
    /// Half-width of the search window, in strides.
    pub roi: usize,
    /// Neighbor chains to walk.
    pub grouping: NeighborGrouping,
    /// Run views in parallel (requires the `rayon` feature).
    pub parallel: bool,
    /// Fixed worker-pool width; `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for FrankenConfig {
    fn default() -> Self {
        let search = SearchParams::default();
        Self {
            tile_size: search.tile_size,
            neighbors: search.neighbors,
            stride: search.stride,
            roi: search.roi,
            grouping: search.grouping,
            parallel: true,
            threads: None,
        }
    }
}

impl FrankenConfig {
    /// Returns the per-tile search parameters.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            tile_size: self.tile_size,
            neighbors: self.neighbors,
            stride: self.stride,
            roi: self.roi,
            grouping: self.grouping,
        }
    }

    /// Rejects zero tile size, zero stride, and a zero-width pool.
    pub fn validate(&self) -> FrankenResult<()> {
        self.search_params().validate()?;
        if self.threads == Some(0) {
            return Err(FrankenError::InvalidConfig("threads must be at least 1"));
        }
        Ok(())
    }
}

/// Totals for a completed batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Views processed.
    pub views: usize,
    /// Tiles matched across all views.
    pub tiles: usize,
}

/// Assembles every view of `grid` and hands each tensor to `sink`.
pub fn run_grid<F>(grid: &Grid, cfg: &FrankenConfig, sink: F) -> FrankenResult<RunSummary>
where
    F: Fn(GridPos, FrankenTensor) -> FrankenResult<()> + Sync,
{
    cfg.validate()?;
    let params = cfg.search_params();
    let positions: Vec<GridPos> = grid.positions().collect();
    let _span = trace_span!("run_grid", views = positions.len()).entered();

    let task = |pos: &GridPos| -> FrankenResult<usize> {
        let tensor = assemble_view(grid, *pos, &params)?;
        let tiles = tile_count(tensor.height(), tensor.width(), params.tile_size);
        sink(*pos, tensor)?;
        Ok(tiles)
    };

    let per_view = run_tasks(&positions, cfg, task)?;
    let summary = RunSummary {
        views: per_view.len(),
        tiles: per_view.iter().sum(),
    };
    trace_event!("run_done", views = summary.views, tiles = summary.tiles);
    Ok(summary)
}

#[cfg(feature = "rayon")]
fn run_tasks<T>(positions: &[GridPos], cfg: &FrankenConfig, task: T) -> FrankenResult<Vec<usize>>
where
    T: Fn(&GridPos) -> FrankenResult<usize> + Sync,
{
    if !cfg.parallel {
        return positions.iter().map(task).collect();
    }
    match cfg.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| FrankenError::ThreadPool {
                    reason: err.to_string(),
                })?;
            pool.install(|| positions.par_iter().map(&task).collect())
        }
        None => positions.par_iter().map(&task).collect(),
    }
}

#[cfg(not(feature = "rayon"))]
fn run_tasks<T>(positions: &[GridPos], _cfg: &FrankenConfig, task: T) -> FrankenResult<Vec<usize>>
where
    T: Fn(&GridPos) -> FrankenResult<usize> + Sync,
{
    positions.iter().map(task).collect()
}
