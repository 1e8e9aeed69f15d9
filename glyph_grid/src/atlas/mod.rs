// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing of glyph grids into shared GPU buffers.
//!
//! Packing produces two buffers:
//! - a float buffer with a header and the normalized curves of every glyph
//! - an index texture, four `u16` slots per texel, holding each grid's cells
//!
//! Grids are laid out on shelves spanning the texture width, tallest first.
//! See [`pack_glyph_grids`] for the cell encoding.

mod buffers;
mod config;
mod packer;
mod shelf;

pub use buffers::AtlasBuffers;
pub use config::{AtlasConfig, CURVE_LEN, DEFAULT_ATLAS_WIDTH, HEADER_LEN, SLOTS_PER_TEXEL};
pub use packer::{pack_glyph_grids, packed_width, GlyphPlacement, PackedAtlas};
