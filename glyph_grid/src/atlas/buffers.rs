// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The packed output buffers.

use alloc::vec::Vec;

use super::config::SLOTS_PER_TEXEL;

/// The two buffers produced by packing, ready for upload as textures.
///
/// `curves` holds, per glyph, a header of six floats (atlas column, atlas
/// row, grid width, grid height and two zeros) followed by six floats per
/// curve: the start, control and end points normalized to the glyph's
/// bounding box.
///
/// `indices` is a row-major texture `width` texels wide with four `u16` slots
/// per texel. Every slot holds a 1-based curve index into the owning glyph's
/// curve data, or `0` if unused.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AtlasBuffers {
    width: usize,
    curves: Vec<f32>,
    indices: Vec<u16>,
}

impl AtlasBuffers {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            curves: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Width of the index buffer in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of texel rows in the index buffer.
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.indices.len() / (self.width * SLOTS_PER_TEXEL)
        }
    }

    /// Headers and normalized curve points.
    pub fn curves(&self) -> &[f32] {
        &self.curves
    }

    /// Per-cell curve indices, four slots per texel.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// The curve buffer as raw bytes.
    pub fn curve_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.curves)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The four slots of the texel at the given column and row.
    pub fn texel(&self, column: usize, row: usize) -> Option<[u16; SLOTS_PER_TEXEL]> {
        if column >= self.width {
            return None;
        }
        let start = (row * self.width + column) * SLOTS_PER_TEXEL;
        let slots = self.indices.get(start..start + SLOTS_PER_TEXEL)?;
        let mut texel = [0; SLOTS_PER_TEXEL];
        texel.copy_from_slice(slots);
        Some(texel)
    }

    /// Consumes the buffers, returning the curve and index data.
    pub fn into_parts(self) -> (Vec<f32>, Vec<u16>) {
        (self.curves, self.indices)
    }

    pub(crate) fn push_curve_data(&mut self, data: impl IntoIterator<Item = f32>) {
        self.curves.extend(data);
    }

    pub(crate) fn curve_len(&self) -> usize {
        self.curves.len()
    }

    /// Grows the index buffer by `rows` zeroed texel rows.
    pub(crate) fn reserve_rows(&mut self, rows: usize) {
        let len = self.indices.len() + rows * self.width * SLOTS_PER_TEXEL;
        self.indices.resize(len, 0);
    }

    /// Writes one texel. The texel must lie within the reserved rows.
    pub(crate) fn write_texel(&mut self, column: usize, row: usize, slots: [u16; SLOTS_PER_TEXEL]) {
        debug_assert!(column < self.width, "texel column outside the atlas");
        let start = (row * self.width + column) * SLOTS_PER_TEXEL;
        self.indices[start..start + SLOTS_PER_TEXEL].copy_from_slice(&slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texels_address_reserved_rows() {
        let mut buffers = AtlasBuffers::new(3);
        buffers.reserve_rows(2);
        assert_eq!(buffers.rows(), 2, "two rows reserved");
        assert_eq!(buffers.indices().len(), 24, "3 texels x 2 rows x 4 slots");

        buffers.write_texel(2, 1, [1, 2, 3, 4]);
        assert_eq!(buffers.texel(2, 1), Some([1, 2, 3, 4]), "written texel");
        assert_eq!(buffers.texel(0, 0), Some([0; 4]), "untouched texel");
        assert_eq!(buffers.texel(3, 0), None, "column past the width");
        assert_eq!(buffers.texel(0, 2), None, "row past the reservation");
        assert_eq!(&buffers.indices()[20..], &[1, 2, 3, 4], "last texel is last in memory");
    }

    #[test]
    fn byte_views_cover_buffers() {
        let mut buffers = AtlasBuffers::new(1);
        buffers.reserve_rows(1);
        buffers.push_curve_data([0.0, 0.5, 1.0]);
        assert_eq!(buffers.curve_bytes().len(), 12, "three f32s");
        assert_eq!(buffers.index_bytes().len(), 8, "four u16s");
        assert_eq!(
            &buffers.curve_bytes()[4..8],
            &0.5_f32.to_ne_bytes(),
            "native byte order"
        );
    }
}
