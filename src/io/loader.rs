//! Grid loading from a directory of images via the `image` crate.
//!
//! File names encode their grid position in the last two `_`-separated parts
//! of the stem, row first: `SCENE_00_03.png` is row 0, column 3. Every image
//! is decoded to RGB and split into three channel planes.

use crate::grid::{Grid, GridPos, View};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrankenError, FrankenResult};
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Image file selected for the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridEntry {
    /// Position parsed from the file name.
    pub pos: GridPos,
    /// Full path to the image.
    pub path: PathBuf,
    /// File name without directories.
    pub file_name: String,
}

/// Loaded grid together with the source file name of every view.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Decoded views.
    pub grid: Grid,
    names: Vec<String>,
}

impl Scene {
    /// Returns the source file name of the view at `pos`.
    pub fn name(&self, pos: GridPos) -> Option<&str> {
        if pos.row >= self.grid.rows() || pos.col >= self.grid.cols() {
            return None;
        }
        self.names
            .get(pos.row * self.grid.cols() + pos.col)
            .map(String::as_str)
    }

    /// Returns the file names in row-major grid order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parses the `(row, col)` encoded at the end of a file name's stem.
pub fn parse_grid_position(file_name: &str) -> FrankenResult<GridPos> {
    let invalid = || FrankenError::InvalidFileName {
        name: file_name.to_string(),
    };
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;
    let mut parts = stem.rsplitn(3, '_');
    let col = parts.next().ok_or_else(invalid)?;
    let row = parts.next().ok_or_else(invalid)?;
    let row = parse_index(row).ok_or_else(invalid)?;
    let col = parse_index(col).ok_or_else(invalid)?;
    Ok(GridPos::new(row, col))
}

fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Lists image files whose position lies in `[0, max_rows) x [0, max_cols)`.
///
/// Non-image files and directories are skipped; entries are sorted by file
/// name. A malformed name on an image file is an error.
pub fn scan_entries<P: AsRef<Path>>(
    dir: P,
    max_rows: usize,
    max_cols: usize,
) -> FrankenResult<Vec<GridEntry>> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).map_err(|err| FrankenError::Io {
        reason: format!("{}: {err}", dir.display()),
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let path = entry?.path();
        if !path.is_file() || !is_image_file(&path) {
            continue;
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pos = parse_grid_position(&file_name)?;
        if pos.row >= max_rows || pos.col >= max_cols {
            continue;
        }
        entries.push(GridEntry {
            pos,
            path,
            file_name,
        });
    }
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// Decodes one image file into an RGB view.
pub fn load_view<P: AsRef<Path>>(path: P) -> FrankenResult<View> {
    let img = image::open(path.as_ref()).map_err(|err| FrankenError::ImageIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    view_from_dynamic_image(&img)
}

/// Converts a decoded image to a three-plane RGB view.
pub fn view_from_dynamic_image(img: &image::DynamicImage) -> FrankenResult<View> {
    let rgb = img.to_rgb8();
    View::from_interleaved(rgb.as_raw(), 3, rgb.width() as usize, rgb.height() as usize)
}

/// Loads the grid and the per-view file names from one directory scan.
pub fn load_scene<P: AsRef<Path>>(
    dir: P,
    max_rows: usize,
    max_cols: usize,
) -> FrankenResult<Scene> {
    let _span = trace_span!("load_grid").entered();
    let entries = scan_entries(dir, max_rows, max_cols)?;
    if entries.is_empty() {
        return Err(FrankenError::EmptyGrid);
    }

    let rows = entries.iter().map(|e| e.pos.row).max().unwrap_or(0) + 1;
    let cols = entries.iter().map(|e| e.pos.col).max().unwrap_or(0) + 1;
    let mut slots: Vec<Option<(View, String)>> = vec![None; rows * cols];
    for entry in entries {
        let slot = &mut slots[entry.pos.row * cols + entry.pos.col];
        if slot.is_some() {
            return Err(FrankenError::DuplicateView {
                row: entry.pos.row,
                col: entry.pos.col,
            });
        }
        *slot = Some((load_view(&entry.path)?, entry.file_name));
    }

    let mut views = Vec::with_capacity(slots.len());
    let mut names = Vec::with_capacity(slots.len());
    for (idx, slot) in slots.into_iter().enumerate() {
        let (view, name) = slot.ok_or(FrankenError::MissingView {
            row: idx / cols,
            col: idx % cols,
        })?;
        views.push(view);
        names.push(name);
    }

    let grid = Grid::new(rows, cols, views)?;
    trace_event!(
        "grid_loaded",
        rows = grid.rows(),
        cols = grid.cols(),
        channels = grid.channels()
    );
    Ok(Scene { grid, names })
}

/// Loads the capture grid found in `dir`.
pub fn load_grid<P: AsRef<Path>>(
    dir: P,
    max_rows: usize,
    max_cols: usize,
) -> FrankenResult<Grid> {
    load_scene(dir, max_rows, max_cols).map(|scene| scene.grid)
}

/// Lists the selected image file names, sorted lexicographically.
pub fn load_names<P: AsRef<Path>>(
    dir: P,
    max_rows: usize,
    max_cols: usize,
) -> FrankenResult<Vec<String>> {
    Ok(scan_entries(dir, max_rows, max_cols)?
        .into_iter()
        .map(|entry| entry.file_name)
        .collect())
}
