#![cfg(feature = "rayon")]

use frankenpatch::{
    run_grid, FrankenConfig, FrankenTensor, Grid, GridPos, NeighborGrouping, View,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

fn make_view(width: usize, height: usize, seed: usize) -> View {
    let planes: Vec<Vec<u8>> = (0..3)
        .map(|c| {
            let mut data = Vec::with_capacity(width * height);
            for y in 0..height {
                for x in 0..width {
                    let value = ((x * 13 + seed) ^ (y * 7) ^ (x * y + c * 29)) & 0xFF;
                    data.push(value as u8);
                }
            }
            data
        })
        .collect();
    View::from_planes(planes, width, height).unwrap()
}

fn run_collect(grid: &Grid, cfg: &FrankenConfig) -> BTreeMap<GridPos, FrankenTensor> {
    let out = Mutex::new(BTreeMap::new());
    let summary = run_grid(grid, cfg, |pos, tensor| {
        out.lock().unwrap().insert(pos, tensor);
        Ok(())
    })
    .unwrap();
    assert_eq!(summary.views, grid.rows() * grid.cols());
    out.into_inner().unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let views = (0..12).map(|i| make_view(37, 29, i * 3)).collect();
    let grid = Grid::new(3, 4, views).unwrap();

    for grouping in [NeighborGrouping::Directional, NeighborGrouping::Axis] {
        let base = FrankenConfig {
            tile_size: 8,
            neighbors: 3,
            stride: 2,
            roi: 3,
            grouping,
            ..FrankenConfig::default()
        };
        let seq = run_collect(
            &grid,
            &FrankenConfig {
                parallel: false,
                ..base.clone()
            },
        );
        let par = run_collect(
            &grid,
            &FrankenConfig {
                parallel: true,
                threads: Some(3),
                ..base
            },
        );
        assert_eq!(seq, par);
    }
}
