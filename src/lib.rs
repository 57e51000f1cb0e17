//! Frankenpatch builds cross-view training tiles from a grid of multi-view
//! images.
//!
//! Every tile of a reference view is matched against the views in the same
//! grid row and column with a greedy, chained local search under a
//! sum-of-absolute-differences metric. The original tile and its K best
//! matches are stacked along the channel axis of a per-view output tensor.
//! Views run in parallel with the `rayon` feature; images are loaded with the
//! `image-io` feature.

pub mod assemble;
pub mod candidate;
pub mod grid;
pub mod image;
pub mod io;
pub mod metric;
pub mod patch;
pub mod runner;
pub mod search;
mod trace;
pub mod util;

pub use assemble::{assemble_view, stack_slots, tile_origins, FrankenTensor};
pub use candidate::match_set::{MatchSet, Scored};
pub use grid::{Grid, GridPos, View};
pub use crate::image::ImageView;
pub use metric::patch_sad;
pub use patch::{PatchRef, PatchView};
pub use runner::{run_grid, FrankenConfig, RunSummary};
pub use search::{search_tile, NeighborGrouping, SearchParams, TileSearch};
pub use util::{FrankenError, FrankenResult};
