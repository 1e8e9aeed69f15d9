// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::Error;

/// Default atlas width in texels.
pub const DEFAULT_ATLAS_WIDTH: usize = 128;

/// Number of `u16` index slots per texel of the index buffer.
pub const SLOTS_PER_TEXEL: usize = 4;

/// Number of floats in each glyph header of the curve buffer.
pub const HEADER_LEN: usize = 6;

/// Number of floats per curve in the curve buffer.
pub const CURVE_LEN: usize = 6;

/// Settings for atlas packing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Width of the index buffer in texels (packing units). Every grid must
    /// fit on one shelf, so this has to be at least the widest grid's
    /// packed width.
    pub width: usize,
}

impl AtlasConfig {
    /// Creates a configuration with the given width in texels.
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 {
            return Err(Error::invalid_config("atlas width must be non-zero"));
        }
        Ok(())
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ATLAS_WIDTH)
    }
}
