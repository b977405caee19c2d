use serde::{Deserialize, Serialize};

pub const DEFAULT_STRIDES: [u32; 3] = [8, 16, 32];

/// One output cell of the network head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridAnchor {
    pub grid_x: u32,
    pub grid_y: u32,
    pub stride: u32,
}

/// Builds the anchor table for a fixed input size.
///
/// Blocks follow `strides` in the given order; inside a block cells are
/// row-major. The table only depends on its arguments, so it is computed once
/// and reused for every frame.
pub fn generate_grids_and_strides(target_w: u32, target_h: u32, strides: &[u32]) -> Vec<GridAnchor> {
    let total: usize = strides
        .iter()
        .filter(|&&s| s > 0)
        .map(|&s| ((target_w / s) * (target_h / s)) as usize)
        .sum();
    let mut grid_strides = Vec::with_capacity(total);

    for &stride in strides.iter().filter(|&&s| s > 0) {
        let num_grid_w = target_w / stride;
        let num_grid_h = target_h / stride;
        for grid_y in 0..num_grid_h {
            for grid_x in 0..num_grid_w {
                grid_strides.push(GridAnchor { grid_x, grid_y, stride });
            }
        }
    }

    grid_strides
}
