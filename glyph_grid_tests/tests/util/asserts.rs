// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various helper functions to assert truths during testing.

use glyph_grid::atlas::{HEADER_LEN, SLOTS_PER_TEXEL};
use glyph_grid::{GlyphGrid, PackedAtlas};

/// Assert that a finished grid satisfies the grid invariants.
pub(crate) fn assert_grid_invariants(grid: &GlyphGrid, case: &str) {
    assert_eq!(
        grid.cells().len(),
        grid.width() * grid.height(),
        "cell count mismatch with {case}"
    );
    for (i, cell) in grid.cells().iter().enumerate() {
        assert!(
            cell.intersections() <= grid.cell_capacity(),
            "cell {i} over capacity with {case}"
        );
        assert_eq!(
            cell.indices().len(),
            cell.intersections().min(grid.cell_capacity()),
            "cell {i} stored count with {case}"
        );
        for &index in cell.indices() {
            assert!(
                grid.curve(index).is_some(),
                "cell {i} refers to missing curve {index} with {case}"
            );
        }
        assert!(
            cell.indices().windows(2).all(|pair| pair[0] < pair[1]),
            "cell {i} indices out of order with {case}"
        );
    }
}

/// Assert that every placement lies inside the buffers and that shelves do
/// not overflow the atlas width.
pub(crate) fn assert_packing_invariants(atlas: &PackedAtlas, grids: &[GlyphGrid], case: &str) {
    let buffers = atlas.buffers();
    assert_eq!(
        atlas.placements().len(),
        grids.len(),
        "placement count mismatch with {case}"
    );
    assert_eq!(
        buffers.indices().len(),
        buffers.rows() * buffers.width() * SLOTS_PER_TEXEL,
        "index buffer is not whole rows with {case}"
    );

    let mut shelf_use: Vec<(usize, usize)> = Vec::new();
    for (i, (placement, grid)) in atlas.placements().iter().zip(grids).enumerate() {
        assert!(
            placement.column + placement.packed_width <= buffers.width(),
            "grid {i} overruns the atlas width with {case}"
        );
        assert!(
            placement.row + placement.grid_height <= buffers.rows(),
            "grid {i} overruns the reserved rows with {case}"
        );
        assert_eq!(
            (placement.grid_width, placement.grid_height),
            (grid.width(), grid.height()),
            "grid {i} dimensions with {case}"
        );

        let header = &buffers.curves()[placement.header_offset..][..HEADER_LEN];
        assert_eq!(
            header,
            &[
                placement.column as f32,
                placement.row as f32,
                grid.width() as f32,
                grid.height() as f32,
                0.0,
                0.0
            ],
            "grid {i} header with {case}"
        );

        match shelf_use.iter_mut().find(|(row, _)| *row == placement.row) {
            Some((_, used)) => *used += placement.packed_width,
            None => shelf_use.push((placement.row, placement.packed_width)),
        }
    }
    for (row, used) in shelf_use {
        assert!(
            used <= buffers.width(),
            "shelf at row {row} uses {used} texels with {case}"
        );
    }
}
