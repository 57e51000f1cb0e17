//! Tile assembly into per-view frankenpatch tensors.
//!
//! Each view is cut into `tile_size` tiles (clipped at the bottom and right
//! borders). For every tile the local search yields up to K matches; the
//! stack written to the output is `[original, match_1, ..., match_n,
//! original, ...]` with exactly `K + 1` slots, matches in ascending score.

use crate::candidate::match_set::MatchSet;
use crate::grid::{Grid, GridPos};
use crate::patch::{PatchRef, PatchView};
use crate::search::{search_tile, SearchParams};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrankenError, FrankenResult};

/// Row-major `(height, width, channels)` `u8` array, channel axis fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrankenTensor {
    data: Vec<u8>,
    height: usize,
    width: usize,
    channels: usize,
}

impl FrankenTensor {
    /// Allocates a zero-filled tensor.
    pub fn zeros(height: usize, width: usize, channels: usize) -> FrankenResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrankenError::InvalidDimensions { width, height });
        }
        let len = height
            .checked_mul(width)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(FrankenError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            height,
            width,
            channels,
        })
    }

    /// Returns the tensor height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the tensor width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the channel-axis length.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Returns the interleaved samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the tensor and returns its samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Returns the sample at `(y, x, c)`, if in bounds.
    pub fn get(&self, y: usize, x: usize, c: usize) -> Option<u8> {
        if y >= self.height || x >= self.width || c >= self.channels {
            return None;
        }
        self.data
            .get((y * self.width + x) * self.channels + c)
            .copied()
    }

    /// Copies `patch` into channel block `slot` with its top-left at `(row, col)`.
    fn write_patch(&mut self, slot: usize, patch: PatchView<'_>, row: usize, col: usize) {
        let block = patch.channels();
        assert!(row + patch.height() <= self.height && col + patch.width() <= self.width);
        assert!((slot + 1) * block <= self.channels);
        for (c, plane) in patch.planes().enumerate() {
            let channel = slot * block + c;
            for (y, src) in plane.rows().enumerate() {
                let base = ((row + y) * self.width + col) * self.channels + channel;
                for (x, &value) in src.iter().enumerate() {
                    self.data[base + x * self.channels] = value;
                }
            }
        }
    }
}

/// Tile origins along an axis of length `extent`: `0, tile, 2 * tile, ...`.
pub fn tile_origins(extent: usize, tile_size: usize) -> impl Iterator<Item = usize> {
    (0..extent).step_by(tile_size.max(1))
}

/// Number of tiles covering a `height x width` view.
pub fn tile_count(height: usize, width: usize, tile_size: usize) -> usize {
    let tile = tile_size.max(1);
    height.div_ceil(tile) * width.div_ceil(tile)
}

/// Orders the `K + 1` output slots for one tile.
///
/// Slot 0 is `target`; the matches follow best first; remaining slots repeat
/// `target`.
pub fn stack_slots(target: PatchRef, matches: MatchSet<PatchRef>) -> Vec<PatchRef> {
    let slots = matches.capacity() + 1;
    let mut stack = Vec::with_capacity(slots);
    stack.push(target);
    stack.extend(matches.into_sorted().into_iter().map(|entry| entry.item));
    stack.resize(slots, target);
    stack
}

/// Builds the frankenpatch tensor for the view at `pos`.
///
/// The result has shape `(H, W, channels * (K + 1))`.
pub fn assemble_view(
    grid: &Grid,
    pos: GridPos,
    params: &SearchParams,
) -> FrankenResult<FrankenTensor> {
    params.validate()?;
    let view = grid.require_view(pos)?;
    let _span = trace_span!("assemble_view", row = pos.row, col = pos.col).entered();

    let block = view.channels();
    let slots = params.neighbors + 1;
    let channels = block
        .checked_mul(slots)
        .ok_or(FrankenError::InvalidConfig("neighbors too large"))?;
    let mut out = FrankenTensor::zeros(view.height(), view.width(), channels)?;

    let mut tiles = 0usize;
    for tile_row in tile_origins(view.height(), params.tile_size) {
        for tile_col in tile_origins(view.width(), params.tile_size) {
            let search = search_tile(grid, pos, tile_row, tile_col, params)?;
            for (slot, patch) in stack_slots(search.target, search.matches)
                .into_iter()
                .enumerate()
            {
                out.write_patch(slot, patch.resolve(grid)?, tile_row, tile_col);
            }
            tiles += 1;
        }
    }

    trace_event!("view_done", row = pos.row, col = pos.col, tiles = tiles);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{stack_slots, tile_count, tile_origins, FrankenTensor};
    use crate::candidate::match_set::MatchSet;
    use crate::grid::GridPos;
    use crate::patch::PatchRef;

    fn patch(col: usize) -> PatchRef {
        PatchRef {
            pos: GridPos::new(0, col),
            row: 0,
            col: 0,
            height: 2,
            width: 2,
        }
    }

    #[test]
    fn tile_origins_cover_clipped_extent() {
        let origins: Vec<usize> = tile_origins(10, 4).collect();
        assert_eq!(origins, vec![0, 4, 8]);
        assert_eq!(tile_count(10, 8, 4), 6);
    }

    #[test]
    fn stack_pads_with_target_after_matches() {
        let mut matches = MatchSet::new(3);
        matches.insert(9, patch(2));
        matches.insert(4, patch(1));
        let stack = stack_slots(patch(0), matches);
        assert_eq!(stack, vec![patch(0), patch(1), patch(2), patch(0)]);
    }

    #[test]
    fn tensor_get_is_bounds_checked() {
        let tensor = FrankenTensor::zeros(2, 3, 4).unwrap();
        assert_eq!(tensor.shape(), (2, 3, 4));
        assert_eq!(tensor.get(1, 2, 3), Some(0));
        assert_eq!(tensor.get(2, 0, 0), None);
    }
}
