// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `glyph_grid`.
//!
//! - The `util` module contains synthetic outlines, a tiny in-memory font builder and shared
//!   assertions that are needed by different test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests. The reason we chose this design is that it makes it
//!   easier to define shared utility functions needed by different tests.
//! - If you want to add new tests, put them into the module matching the pipeline stage they
//!   exercise (flatten, grid, pack, font, pipeline), or create a new one.
//! - For test naming, try to put the "topic" of the test at the start of the name instead of
//!   the end. For example, `grid_circle_converges` is better than `circle_grid_converges`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod pipeline;
#[macro_use]
mod util;
