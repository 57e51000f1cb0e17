//! Neighbor grouping and scan order.
//!
//! The greedy chain in the local search depends on the order neighbors are
//! visited, so the order is fixed here: within a group, nearest view first.

use crate::grid::GridPos;

/// Which grid views are searched, and how they are grouped into chains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborGrouping {
    /// Four chains: right, left, below, above the reference view.
    #[default]
    Directional,
    /// Two chains: the whole reference row, then the whole reference column.
    Axis,
}

/// Relation between a neighbor and the reference view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborAxis {
    /// Neighbor shares the grid row; candidates slide along columns.
    SameRow,
    /// Neighbor shares the grid column; candidates slide along rows.
    SameColumn,
}

/// One anchor chain: views visited in order with a shared running offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborGroup {
    /// Axis shared with the reference view.
    pub axis: NeighborAxis,
    /// Views in scan order (nearest to the reference first).
    pub views: Vec<GridPos>,
}

/// Builds the non-empty neighbor chains for `reference` in a `rows x cols` grid.
pub fn neighbor_groups(
    rows: usize,
    cols: usize,
    reference: GridPos,
    grouping: NeighborGrouping,
) -> Vec<NeighborGroup> {
    let GridPos { row, col } = reference;
    let in_row = |c: usize| GridPos::new(row, c);
    let in_col = |r: usize| GridPos::new(r, col);

    let groups = match grouping {
        NeighborGrouping::Directional => vec![
            NeighborGroup {
                axis: NeighborAxis::SameRow,
                views: (col + 1..cols).map(in_row).collect(),
            },
            NeighborGroup {
                axis: NeighborAxis::SameRow,
                views: (0..col.min(cols)).rev().map(in_row).collect(),
            },
            NeighborGroup {
                axis: NeighborAxis::SameColumn,
                views: (row + 1..rows).map(in_col).collect(),
            },
            NeighborGroup {
                axis: NeighborAxis::SameColumn,
                views: (0..row.min(rows)).rev().map(in_col).collect(),
            },
        ],
        NeighborGrouping::Axis => vec![
            NeighborGroup {
                axis: NeighborAxis::SameRow,
                views: by_distance(cols, col).map(in_row).collect(),
            },
            NeighborGroup {
                axis: NeighborAxis::SameColumn,
                views: by_distance(rows, row).map(in_col).collect(),
            },
        ],
    };

    groups
        .into_iter()
        .filter(|group| !group.views.is_empty())
        .collect()
}

/// Indices in `0..len` except `center`, nearest first, lower index on ties.
fn by_distance(len: usize, center: usize) -> impl Iterator<Item = usize> {
    let mut order: Vec<usize> = (0..len).filter(|&idx| idx != center).collect();
    order.sort_by_key(|&idx| (idx.abs_diff(center), idx));
    order.into_iter()
}
