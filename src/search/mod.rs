//! Directional local search for cross-view tile matches.
//!
//! For one tile of a reference view, each neighbor chain (see
//! [`neighbor_groups`]) is walked nearest-first. Every neighbor is searched in
//! a small window of offsets around a running anchor, and the winning offset
//! becomes the anchor for the next neighbor in the chain. The search is a
//! greedy heuristic that assumes alignment varies smoothly across the grid;
//! it does not find globally optimal matches.

mod local;
mod neighbors;
mod window;

pub use local::{search_tile, TileSearch};
pub use neighbors::{neighbor_groups, NeighborAxis, NeighborGroup, NeighborGrouping};

use crate::util::{FrankenError, FrankenResult};

/// Parameters of the per-tile search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Edge length of the square tiles (clipped at view borders).
    pub tile_size: usize,
    /// Number of best neighbor matches kept per tile (K).
    pub neighbors: usize,
    /// Spacing, in samples, between candidate offsets.
    pub stride: usize,
    /// Half-width of the search window, in strides.
    pub roi: usize,
    /// Neighbor chains to walk.
    pub grouping: NeighborGrouping,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            tile_size: 32,
            neighbors: 4,
            stride: 1,
            roi: 4,
            grouping: NeighborGrouping::Directional,
        }
    }
}

impl SearchParams {
    /// Checks that tile size and stride are non-zero.
    pub fn validate(&self) -> FrankenResult<()> {
        if self.tile_size == 0 {
            return Err(FrankenError::InvalidConfig("tile_size must be at least 1"));
        }
        if self.stride == 0 {
            return Err(FrankenError::InvalidConfig("stride must be at least 1"));
        }
        Ok(())
    }
}
