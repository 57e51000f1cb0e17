use crate::candidate::match_set::MatchSet;
use crate::grid::{Grid, GridPos, View};
use crate::metric::{sad_with, DefaultSad};
use crate::patch::{PatchRef, PatchView};
use crate::search::neighbors::{neighbor_groups, NeighborAxis};
use crate::search::window::candidate_offsets;
use crate::search::SearchParams;
use crate::util::{FrankenError, FrankenResult};

/// Result of searching the neighbors of one tile.
#[derive(Clone, Debug)]
pub struct TileSearch {
    /// The reference tile itself (clipped at the view border).
    pub target: PatchRef,
    /// Best match per visited neighbor, bounded to `neighbors` entries.
    pub matches: MatchSet<PatchRef>,
}

/// Winning candidate of one neighbor's window.
#[derive(Clone, Copy, Debug)]
struct WindowBest {
    offset: usize,
    score: u64,
    patch: PatchRef,
}

/// Searches every neighbor chain for the tile at `(tile_row, tile_col)`.
pub fn search_tile(
    grid: &Grid,
    reference: GridPos,
    tile_row: usize,
    tile_col: usize,
    params: &SearchParams,
) -> FrankenResult<TileSearch> {
    params.validate()?;
    let view = grid.require_view(reference)?;
    if tile_row >= view.height() || tile_col >= view.width() {
        return Err(FrankenError::RoiOutOfBounds {
            x: tile_col,
            y: tile_row,
            width: params.tile_size,
            height: params.tile_size,
            img_width: view.width(),
            img_height: view.height(),
        });
    }

    let height = (view.height() - tile_row).min(params.tile_size);
    let width = (view.width() - tile_col).min(params.tile_size);
    let target = PatchRef {
        pos: reference,
        row: tile_row,
        col: tile_col,
        height,
        width,
    };
    let target_view = PatchView::new(view, tile_row, tile_col, height, width)?;

    let mut matches = MatchSet::new(params.neighbors);
    for group in neighbor_groups(grid.rows(), grid.cols(), reference, params.grouping) {
        let mut anchor = match group.axis {
            NeighborAxis::SameRow => tile_col,
            NeighborAxis::SameColumn => tile_row,
        };
        for pos in group.views {
            let neighbor = grid.require_view(pos)?;
            let Some(best) = best_in_window(
                target_view,
                &target,
                neighbor,
                pos,
                group.axis,
                anchor,
                params,
            ) else {
                continue;
            };
            // Chain step: the next neighbor in this group is searched around this winner.
            anchor = best.offset;
            matches.insert(best.score, best.patch);
        }
    }

    Ok(TileSearch { target, matches })
}

/// Scores every in-bounds window offset at `neighbor`; first minimum wins.
///
/// Returns `None` when no offset fits, so the neighbor is skipped.
fn best_in_window(
    target_view: PatchView<'_>,
    target: &PatchRef,
    neighbor: &View,
    pos: GridPos,
    axis: NeighborAxis,
    anchor: usize,
    params: &SearchParams,
) -> Option<WindowBest> {
    let (fixed, fixed_extent, fixed_limit, extent, limit) = match axis {
        NeighborAxis::SameRow => (
            target.row,
            target.height,
            neighbor.height(),
            target.width,
            neighbor.width(),
        ),
        NeighborAxis::SameColumn => (
            target.col,
            target.width,
            neighbor.width(),
            target.height,
            neighbor.height(),
        ),
    };
    if fixed + fixed_extent > fixed_limit {
        return None;
    }

    let mut best: Option<WindowBest> = None;
    for offset in candidate_offsets(anchor, params.stride, params.roi, extent, limit) {
        let (row, col) = match axis {
            NeighborAxis::SameRow => (fixed, offset),
            NeighborAxis::SameColumn => (offset, fixed),
        };
        let candidate = PatchView::new_unchecked(neighbor, row, col, target.height, target.width);
        let score = sad_with::<DefaultSad>(target_view, candidate);
        if best.map_or(true, |b| score < b.score) {
            best = Some(WindowBest {
                offset,
                score,
                patch: PatchRef {
                    pos,
                    row,
                    col,
                    height: target.height,
                    width: target.width,
                },
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::search_tile;
    use crate::grid::{Grid, GridPos, View};
    use crate::search::{NeighborGrouping, SearchParams};

    fn gradient_view(width: usize, height: usize, shift: usize) -> View {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((x + shift) * 10 + y) as u8))
            .collect();
        View::from_planes(vec![data], width, height).unwrap()
    }

    #[test]
    fn finds_shifted_tile_in_row_neighbor() {
        // Neighbor content is shifted left by 2 columns.
        let grid = Grid::new(
            1,
            2,
            vec![gradient_view(12, 4, 0), gradient_view(12, 4, 2)],
        )
        .unwrap();
        let params = SearchParams {
            tile_size: 4,
            neighbors: 1,
            stride: 1,
            roi: 3,
            grouping: NeighborGrouping::Directional,
        };
        let result = search_tile(&grid, GridPos::new(0, 0), 0, 4, &params).unwrap();
        let best = result.matches.into_sorted();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].score, 0);
        assert_eq!(best[0].item.col, 2);
        assert_eq!(best[0].item.pos, GridPos::new(0, 1));
    }

    #[test]
    fn anchor_propagates_along_the_chain() {
        // Each successive view is shifted 2 more columns; roi 2 only reaches
        // the third view's match if the anchor moved after the second.
        let grid = Grid::new(
            1,
            3,
            vec![
                gradient_view(16, 2, 0),
                gradient_view(16, 2, 2),
                gradient_view(16, 2, 4),
            ],
        )
        .unwrap();
        let params = SearchParams {
            tile_size: 4,
            neighbors: 2,
            stride: 1,
            roi: 2,
            grouping: NeighborGrouping::Directional,
        };
        let result = search_tile(&grid, GridPos::new(0, 0), 0, 8, &params).unwrap();
        let best = result.matches.into_sorted();
        assert_eq!(best.len(), 2);
        assert!(best.iter().all(|entry| entry.score == 0));
        let third = best
            .iter()
            .find(|entry| entry.item.pos == GridPos::new(0, 2))
            .unwrap();
        assert_eq!(third.item.col, 4);
    }

    #[test]
    fn clipped_edge_tile_has_reduced_shape() {
        let grid = Grid::new(1, 2, vec![gradient_view(5, 5, 0), gradient_view(5, 5, 0)]).unwrap();
        let params = SearchParams {
            tile_size: 4,
            neighbors: 1,
            stride: 1,
            roi: 1,
            grouping: NeighborGrouping::Directional,
        };
        let result = search_tile(&grid, GridPos::new(0, 0), 4, 4, &params).unwrap();
        assert_eq!(result.target.shape(), (1, 1));
        let best = result.matches.into_sorted();
        assert_eq!(best[0].item.shape(), (1, 1));
        assert_eq!(best[0].score, 0);
    }

    #[test]
    fn neighbor_too_small_is_skipped() {
        let grid = Grid::new(1, 2, vec![gradient_view(8, 8, 0), gradient_view(8, 2, 0)]).unwrap();
        let params = SearchParams {
            tile_size: 4,
            neighbors: 1,
            stride: 1,
            roi: 1,
            grouping: NeighborGrouping::Directional,
        };
        let result = search_tile(&grid, GridPos::new(0, 0), 4, 0, &params).unwrap();
        assert!(result.matches.is_empty());
    }

    fn chain_params(neighbors: usize, roi: usize) -> SearchParams {
        SearchParams {
            tile_size: 4,
            neighbors,
            stride: 1,
            roi,
            grouping: NeighborGrouping::Directional,
        }
    }

    fn match_cols(result: super::TileSearch) -> Vec<(GridPos, usize, u64)> {
        let mut found: Vec<_> = result
            .matches
            .into_sorted()
            .into_iter()
            .map(|entry| (entry.item.pos, entry.item.col, entry.score))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn short_view_mid_chain_keeps_previous_anchor() {
        // The second neighbor is one row tall, so the 2-row tile cannot sit on
        // it. The third neighbor's match at col 4 is only inside roi 2 if the
        // anchor from the first neighbor (col 6) survives the skip.
        let grid = Grid::new(
            1,
            4,
            vec![
                gradient_view(16, 2, 0),
                gradient_view(16, 2, 2),
                gradient_view(16, 1, 3),
                gradient_view(16, 2, 4),
            ],
        )
        .unwrap();
        let result = search_tile(&grid, GridPos::new(0, 0), 0, 8, &chain_params(3, 2)).unwrap();
        assert_eq!(
            match_cols(result),
            vec![(GridPos::new(0, 1), 6, 0), (GridPos::new(0, 3), 4, 0)]
        );
    }

    #[test]
    fn narrow_view_mid_chain_keeps_previous_anchor() {
        // Every offset of the second neighbor's window runs past its width.
        let grid = Grid::new(
            1,
            4,
            vec![
                gradient_view(16, 2, 0),
                gradient_view(16, 2, 2),
                gradient_view(8, 2, 3),
                gradient_view(16, 2, 4),
            ],
        )
        .unwrap();
        let result = search_tile(&grid, GridPos::new(0, 0), 0, 12, &chain_params(3, 2)).unwrap();
        assert_eq!(
            match_cols(result),
            vec![(GridPos::new(0, 1), 10, 0), (GridPos::new(0, 3), 8, 0)]
        );
    }

    #[test]
    fn unbounded_roi_scans_the_whole_row() {
        let grid = Grid::new(
            1,
            2,
            vec![gradient_view(12, 4, 0), gradient_view(12, 4, 5)],
        )
        .unwrap();
        let result =
            search_tile(&grid, GridPos::new(0, 0), 0, 8, &chain_params(1, usize::MAX)).unwrap();
        assert_eq!(match_cols(result), vec![(GridPos::new(0, 1), 3, 0)]);
    }
}
