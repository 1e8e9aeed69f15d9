// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf packing of glyph grids into atlas buffers.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use super::buffers::AtlasBuffers;
use super::config::{AtlasConfig, HEADER_LEN, SLOTS_PER_TEXEL};
use super::shelf::{Allocation, ShelfAllocator};
use crate::error::Error;
use crate::grid::GlyphGrid;

/// Where one grid ended up in the atlas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Offset of the glyph's header in the curve buffer, in floats.
    pub header_offset: usize,
    /// Texel column of the grid's first cell.
    pub column: usize,
    /// Texel row of the grid's first cell.
    pub row: usize,
    /// Number of grid columns.
    pub grid_width: usize,
    /// Number of grid rows.
    pub grid_height: usize,
    /// Texels the grid occupies horizontally, counting every index block.
    pub packed_width: usize,
    /// Number of curves following the header.
    pub curve_count: usize,
}

impl GlyphPlacement {
    /// Offset of the glyph's first curve in the curve buffer, in floats.
    pub fn curves_offset(&self) -> usize {
        self.header_offset + HEADER_LEN
    }
}

/// The result of packing: the buffers and the placement of every input grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedAtlas {
    buffers: AtlasBuffers,
    placements: Vec<GlyphPlacement>,
}

impl PackedAtlas {
    /// The packed buffers.
    pub fn buffers(&self) -> &AtlasBuffers {
        &self.buffers
    }

    /// One placement per input grid, in input order.
    pub fn placements(&self) -> &[GlyphPlacement] {
        &self.placements
    }

    /// Consumes the atlas, returning its parts.
    pub fn into_parts(self) -> (AtlasBuffers, Vec<GlyphPlacement>) {
        (self.buffers, self.placements)
    }
}

/// Texels a grid needs horizontally: one texel per column for every block of
/// four index slots.
pub fn packed_width(grid: &GlyphGrid) -> usize {
    grid.width() * index_blocks(grid)
}

fn index_blocks(grid: &GlyphGrid) -> usize {
    grid.cell_capacity() / SLOTS_PER_TEXEL
}

/// Packs grids into a curve buffer and an index buffer.
///
/// Accepts anything that holds a grid, such as
/// [`ProcessedGlyph`](crate::ProcessedGlyph).
///
/// Every grid's cell capacity must be a multiple of 4.
///
/// Grids are placed tallest first on shelves spanning the atlas width; among
/// grids of equal height, later ones are placed first. Every grid is checked
/// against the atlas width before anything is written, so a grid that can
/// never fit fails with [`ErrorKind::AtlasTooNarrow`] and no partial output.
///
/// [`ErrorKind::AtlasTooNarrow`]: crate::ErrorKind::AtlasTooNarrow
pub fn pack_glyph_grids<G: AsRef<GlyphGrid>>(
    grids: &[G],
    config: &AtlasConfig,
) -> Result<PackedAtlas, Error> {
    config.validate()?;
    for (index, grid) in grids.iter().enumerate() {
        let grid = grid.as_ref();
        if grid.cell_capacity() % SLOTS_PER_TEXEL != 0 {
            return Err(Error::unpackable_capacity(index));
        }
        let width = packed_width(grid);
        if width > config.width {
            return Err(Error::atlas_too_narrow(index, width, config.width));
        }
    }

    let mut order: Vec<usize> = (0..grids.len()).collect();
    order.sort_by_key(|&index| grids[index].as_ref().height());

    let mut buffers = AtlasBuffers::new(config.width);
    let mut shelves = ShelfAllocator::new(config.width);
    let mut placements = vec![GlyphPlacement::default(); grids.len()];
    while let Some(index) = order.pop() {
        let grid = grids[index].as_ref();
        let width = packed_width(grid);
        let allocation = shelves.allocate(width, grid.height());
        buffers.reserve_rows(allocation.new_rows);

        let header_offset = buffers.curve_len();
        write_curves(&mut buffers, grid, allocation);
        write_cells(&mut buffers, grid, allocation);
        placements[index] = GlyphPlacement {
            header_offset,
            column: allocation.column,
            row: allocation.row,
            grid_width: grid.width(),
            grid_height: grid.height(),
            packed_width: width,
            curve_count: grid.curves().len(),
        };
    }

    debug!(
        "packed {} grids into {}x{} texels and {} curve floats",
        grids.len(),
        buffers.width(),
        buffers.rows(),
        buffers.curve_len()
    );
    Ok(PackedAtlas {
        buffers,
        placements,
    })
}

fn write_curves(buffers: &mut AtlasBuffers, grid: &GlyphGrid, allocation: Allocation) {
    let header: [f32; HEADER_LEN] = [
        allocation.column as f32,
        allocation.row as f32,
        grid.width() as f32,
        grid.height() as f32,
        0.0,
        0.0,
    ];
    buffers.push_curve_data(header);
    buffers.push_curve_data(
        grid.normalized_curves()
            .flat_map(|points| points.into_iter().flat_map(|p| [p.x, p.y])),
    );
}

/// Writes the index texels of every non-empty cell.
///
/// A cell holding at most four indices fills one texel with its indices in
/// reverse slot order. A cell holding more writes its indices in slot order,
/// four per texel, with block `b` placed `b * grid_width` texels to the right
/// of the cell's column.
fn write_cells(buffers: &mut AtlasBuffers, grid: &GlyphGrid, allocation: Allocation) {
    let blocks = index_blocks(grid);
    for column in 0..grid.width() {
        for row in 0..grid.height() {
            let cell = grid.cell(column, row);
            if cell.slot(0) == 0 {
                continue;
            }
            let texel_column = allocation.column + column;
            let texel_row = allocation.row + row;
            if cell.slot(SLOTS_PER_TEXEL) == 0 {
                let slots = core::array::from_fn(|i| cell.slot(SLOTS_PER_TEXEL - 1 - i));
                buffers.write_texel(texel_column, texel_row, slots);
            } else {
                for block in 0..blocks {
                    let base = block * SLOTS_PER_TEXEL;
                    let slots = core::array::from_fn(|i| cell.slot(base + i));
                    buffers.write_texel(texel_column + block * grid.width(), texel_row, slots);
                }
            }
        }
    }
}
