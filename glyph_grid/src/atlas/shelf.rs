// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf allocation over a fixed-width texel grid.

use log::debug;

/// Where an item was placed, in texels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub(crate) column: usize,
    pub(crate) row: usize,
    /// Rows reserved by a shelf opened for this item, or `0` if the item
    /// joined the current shelf.
    pub(crate) new_rows: usize,
}

/// Places items left to right in horizontal shelves.
///
/// Items are expected in order of non-increasing height, so the first item on
/// a shelf sets the shelf's height.
#[derive(Debug)]
pub(crate) struct ShelfAllocator {
    width: usize,
    /// Texel position of the next item, counted row-major from the origin.
    cursor: usize,
    /// Free texels left on the current shelf.
    remaining: usize,
    /// Rows reserved by all shelves so far.
    rows: usize,
}

impl ShelfAllocator {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            cursor: 0,
            remaining: 0,
            rows: 0,
        }
    }

    /// Places an item of the given size. The width must not exceed the
    /// allocator's width.
    pub(crate) fn allocate(&mut self, width: usize, height: usize) -> Allocation {
        debug_assert!(width <= self.width, "item wider than the shelf");
        let mut new_rows = 0;
        if width > self.remaining {
            self.cursor = self.rows * self.width;
            self.remaining = self.width;
            new_rows = height;
            self.rows += height;
            debug!(
                "opened shelf at row {} with height {height}",
                self.cursor / self.width
            );
        }
        let allocation = Allocation {
            column: self.cursor % self.width,
            row: self.cursor / self.width,
            new_rows,
        };
        self.cursor += width;
        self.remaining -= width;
        allocation
    }
}
