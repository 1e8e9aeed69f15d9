// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Grid turns glyph outlines into GPU-friendly curve grids.
//!
//! Each glyph outline is flattened into quadratic Bézier curves. The glyph's
//! bounding box is then divided into a grid fine enough that no cell is
//! touched by more than a fixed number of curves, so a shader only has to
//! test a pixel against the handful of curves listed in its cell. Finally,
//! the grids of many glyphs are packed into two shared buffers: normalized
//! curve data and a texture of per-cell curve indices.
//!
//! ```
//! use glyph_grid::{pack_glyph_grids, AtlasConfig, GlyphGrid, GridConfig, Outline, OutlinePoint};
//!
//! let square = Outline::from_contour(&[
//!     OutlinePoint::on(0.0, 0.0),
//!     OutlinePoint::on(100.0, 0.0),
//!     OutlinePoint::on(100.0, 100.0),
//!     OutlinePoint::on(0.0, 100.0),
//! ]);
//! let grid = GlyphGrid::from_outline(&square, GridConfig::default())?;
//! assert_eq!((grid.width(), grid.height()), (1, 1));
//!
//! let atlas = pack_glyph_grids(&[grid], &AtlasConfig::default())?;
//! assert_eq!(atlas.buffers().rows(), 1);
//! # Ok::<(), glyph_grid::Error>(())
//! ```
//!
//! Fonts are read through the [`OutlineSource`] trait. [`SkrifaOutlines`]
//! implements it for TrueType fonts, and [`build_atlas`] runs the whole
//! pipeline for the code points selected in a [`Config`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("glyph_grid requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod error;
mod math;

pub mod atlas;
pub mod config;
pub mod font;
pub mod geometry;
pub mod grid;
pub mod outline;
pub mod pipeline;

pub use atlas::{pack_glyph_grids, AtlasBuffers, AtlasConfig, GlyphPlacement, PackedAtlas};
pub use config::{CodepointRange, CodepointRanges, Config, UnsupportedGlyphPolicy};
pub use error::{Error, ErrorKind, GlyphRef, Stage};
pub use font::{OutlineSource, SkrifaOutlines};
pub use geometry::{Point, QuadCurve, Region, Segment};
pub use grid::{Cell, GlyphGrid, GridBuilder, GridConfig, Resolution};
pub use outline::{flatten, CurveList, Outline, OutlinePoint};
pub use pipeline::{build_atlas, process_glyphs, CurveAtlas, ProcessedGlyph};

pub use skrifa;
