// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-glyph curve grids.
//!
//! A [`GlyphGrid`] divides a glyph's bounding box into `width x height` cells
//! and records, for each cell, the curves that touch it. A renderer shading a
//! pixel only needs to evaluate the curves listed in the pixel's cell.
//!
//! The [`GridBuilder`] finds a resolution at which no cell is touched by more
//! than [`GridConfig::cell_capacity`] curves. It starts from a single cell and
//! repeatedly adds a column or a row (or both), choosing the axis whose
//! busiest strip of cells carries the most curve references.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, log_enabled, trace, Level};
use smallvec::SmallVec;

use crate::error::Error;
use crate::geometry::{
    curve_intersects_region, normalize_to_region, segment_intersects_region, Point, QuadCurve,
    Region,
};
use crate::outline::{flatten, CurveList, Outline};

/// Default maximum number of curves referenced by a single cell.
pub const DEFAULT_CELL_CAPACITY: usize = 8;

/// Default limit on the number of rows or columns of a grid.
pub const DEFAULT_MAX_DIMENSION: usize = 256;

/// Settings for grid construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Maximum number of curve indices stored per cell. Must be non-zero.
    ///
    /// Grids can only be packed into an atlas if this is a multiple of 4,
    /// since indices are packed four to a texel.
    pub cell_capacity: usize,
    /// Refinement gives up with [`ErrorKind::GridOverflow`] if either grid
    /// dimension would exceed this.
    ///
    /// [`ErrorKind::GridOverflow`]: crate::ErrorKind::GridOverflow
    pub max_dimension: usize,
}

impl GridConfig {
    /// Sets the cell capacity.
    pub fn with_cell_capacity(mut self, capacity: usize) -> Self {
        self.cell_capacity = capacity;
        self
    }

    /// Sets the maximum grid dimension.
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.cell_capacity == 0 {
            return Err(Error::invalid_config("cell capacity must be non-zero"));
        }
        if self.max_dimension == 0 {
            return Err(Error::invalid_config("maximum grid dimension must be non-zero"));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_capacity: DEFAULT_CELL_CAPACITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Number of columns and rows of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Resolution {
    /// Creates a new resolution.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// The curves touching one grid cell.
///
/// At most the grid's cell capacity of indices are stored, in ascending
/// curve order. The true number of touching curves is tracked separately, so a
/// cell that dropped references can be detected with [`Cell::is_lossy`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Cell {
    indices: SmallVec<[u16; DEFAULT_CELL_CAPACITY]>,
    intersections: usize,
}

impl Cell {
    /// Creates a cell holding exactly the given 1-based curve indices.
    pub fn from_indices(indices: &[u16]) -> Self {
        Self {
            indices: SmallVec::from_slice(indices),
            intersections: indices.len(),
        }
    }

    /// The stored 1-based curve indices.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// The number of curves touching the cell, including any that were not
    /// stored.
    pub fn intersections(&self) -> usize {
        self.intersections
    }

    /// Returns `true` if no curve touches the cell.
    pub fn is_empty(&self) -> bool {
        self.intersections == 0
    }

    /// Returns `true` if more curves touch the cell than were stored.
    pub fn is_lossy(&self) -> bool {
        self.intersections > self.indices.len()
    }

    /// The index in slot `slot`, or `0` for an empty slot.
    pub fn slot(&self, slot: usize) -> u16 {
        self.indices.get(slot).copied().unwrap_or(0)
    }

    fn record(&mut self, index: u16, capacity: usize) {
        if self.indices.len() < capacity {
            self.indices.push(index);
        }
        self.intersections += 1;
    }
}

/// A glyph's bounding box split into cells, each listing the curves that
/// touch it.
///
/// Cells are stored row-major, row 0 at the bottom of the bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphGrid {
    bounds: Region,
    resolution: Resolution,
    curves: Vec<QuadCurve>,
    cells: Vec<Cell>,
    cell_capacity: usize,
}

impl GlyphGrid {
    /// Builds the grid for an outline.
    pub fn from_outline(outline: &Outline, config: GridConfig) -> Result<Self, Error> {
        let curves = flatten(outline)?;
        GridBuilder::new(&curves, config).build()
    }

    /// Assembles a grid from its parts, checking that there is one cell per
    /// grid position, that no cell stores more than `cell_capacity` indices
    /// and that every stored index refers to one of `curves`.
    pub fn new(
        bounds: Region,
        resolution: Resolution,
        curves: Vec<QuadCurve>,
        cells: Vec<Cell>,
        cell_capacity: usize,
    ) -> Result<Self, Error> {
        GridConfig::default()
            .with_cell_capacity(cell_capacity)
            .validate()?;
        if resolution.width == 0 || resolution.height == 0 {
            return Err(Error::invalid_grid("grid dimensions must be non-zero"));
        }
        if cells.len() != resolution.cell_count() {
            return Err(Error::invalid_grid("cell count does not match resolution"));
        }
        if curves.len() > usize::from(u16::MAX) {
            return Err(Error::too_many_curves(curves.len(), usize::from(u16::MAX)));
        }
        for cell in &cells {
            if cell.indices().len() > cell_capacity {
                return Err(Error::invalid_grid("cell stores more indices than its capacity"));
            }
            if cell
                .indices()
                .iter()
                .any(|&index| index == 0 || usize::from(index) > curves.len())
            {
                return Err(Error::invalid_grid("cell refers to a missing curve"));
            }
        }
        Ok(Self {
            bounds,
            resolution,
            curves,
            cells,
            cell_capacity,
        })
    }

    /// The glyph's bounding box in font units.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.resolution.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// Number of columns and rows.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The glyph's curves in font units.
    pub fn curves(&self) -> &[QuadCurve] {
        &self.curves
    }

    /// The curve with the given 1-based cell index.
    pub fn curve(&self, index: u16) -> Option<&QuadCurve> {
        self.curves.get(usize::from(index).checked_sub(1)?)
    }

    /// The glyph's curves with every point mapped into the unit square of the
    /// bounding box.
    pub fn normalized_curves(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        let bounds = self.bounds;
        self.curves
            .iter()
            .map(move |curve| curve.points().map(|p| normalize_to_region(bounds, p)))
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at the given column and row.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn cell(&self, column: usize, row: usize) -> &Cell {
        assert!(
            column < self.width() && row < self.height(),
            "cell ({column}, {row}) outside {}x{} grid",
            self.width(),
            self.height()
        );
        &self.cells[row * self.width() + column]
    }

    /// The area covered by the cell at the given column and row.
    pub fn cell_region(&self, column: usize, row: usize) -> Region {
        cell_region(self.bounds, self.resolution, column, row)
    }

    /// Maximum number of indices stored per cell.
    pub fn cell_capacity(&self) -> usize {
        self.cell_capacity
    }

    /// The largest number of curves touching any one cell.
    pub fn max_intersections(&self) -> usize {
        self.cells.iter().map(Cell::intersections).max().unwrap_or(0)
    }
}

impl AsRef<Self> for GlyphGrid {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Cell occupancy of a curve list at one grid resolution.
#[derive(Clone, Debug)]
pub struct Occupancy {
    resolution: Resolution,
    cells: Vec<Cell>,
}

impl Occupancy {
    /// The resolution that was evaluated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The largest number of curves touching any one cell.
    pub fn max_intersections(&self) -> usize {
        self.cells.iter().map(Cell::intersections).max().unwrap_or(0)
    }

    /// Total curve references in each row, bottom to top.
    pub fn row_sums(&self) -> Vec<usize> {
        self.cells
            .chunks(self.resolution.width)
            .map(|row| row.iter().map(Cell::intersections).sum())
            .collect()
    }

    /// Total curve references in each column, left to right.
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0; self.resolution.width];
        for row in self.cells.chunks(self.resolution.width) {
            for (sum, cell) in sums.iter_mut().zip(row) {
                *sum += cell.intersections();
            }
        }
        sums
    }

    /// The next resolution to try, given the current cell size.
    ///
    /// Adds a column when the busiest column carries more references than the
    /// busiest row, and a row in the opposite case. On a tie the longer cell
    /// side is split; square cells split both ways.
    pub fn refine(&self, cell_width: f32, cell_height: f32) -> Resolution {
        let max_row = self.row_sums().into_iter().max().unwrap_or(0);
        let max_column = self.column_sums().into_iter().max().unwrap_or(0);
        let mut next = self.resolution;
        if max_column > max_row || (max_column == max_row && cell_width >= cell_height) {
            next.width += 1;
        }
        if max_row > max_column || (max_row == max_column && cell_height >= cell_width) {
            next.height += 1;
        }
        next
    }

    fn trace(&self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        trace!(
            "cell intersections at {}x{} (top row first):",
            self.resolution.width,
            self.resolution.height
        );
        for row in self.cells.chunks(self.resolution.width).rev() {
            let counts: Vec<usize> = row.iter().map(Cell::intersections).collect();
            trace!("  {counts:?}");
        }
    }
}

/// Finds a grid resolution at which every cell is touched by at most
/// [`GridConfig::cell_capacity`] curves.
///
/// Every resolution visited is kept in [`GridBuilder::history`]; the
/// sequence never shrinks in either dimension.
#[derive(Debug)]
pub struct GridBuilder<'a> {
    curves: &'a CurveList,
    lines: Vec<bool>,
    config: GridConfig,
    resolution: Resolution,
    history: Vec<Resolution>,
}

impl<'a> GridBuilder<'a> {
    /// Creates a builder for the given curves.
    pub fn new(curves: &'a CurveList, config: GridConfig) -> Self {
        Self {
            curves,
            lines: curves.curves().iter().map(QuadCurve::is_line).collect(),
            config,
            resolution: Resolution::new(1, 1),
            history: Vec::new(),
        }
    }

    /// The resolution that will be evaluated next.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The resolutions evaluated by the last call to [`GridBuilder::build`].
    pub fn history(&self) -> &[Resolution] {
        &self.history
    }

    /// Computes which curves touch each cell at the current resolution.
    pub fn evaluate(&self) -> Occupancy {
        let bounds = self.curves.bounds();
        let capacity = self.config.cell_capacity;
        let mut cells = vec![Cell::default(); self.resolution.cell_count()];
        for row in 0..self.resolution.height {
            for column in 0..self.resolution.width {
                let region = cell_region(bounds, self.resolution, column, row);
                let cell = &mut cells[row * self.resolution.width + column];
                for (i, (curve, &is_line)) in
                    self.curves.curves().iter().zip(&self.lines).enumerate()
                {
                    let touches = if is_line {
                        segment_intersects_region(region, curve.chord())
                    } else {
                        curve_intersects_region(region, *curve)
                    };
                    if touches {
                        cell.record(curve_index(i), capacity);
                    }
                }
            }
        }
        Occupancy {
            resolution: self.resolution,
            cells,
        }
    }

    /// Refines the grid until it fits the cell capacity.
    ///
    /// Restarts from a single cell, so calling this twice yields the same grid.
    pub fn build(&mut self) -> Result<GlyphGrid, Error> {
        self.config.validate()?;
        let max_curves = usize::from(u16::MAX);
        if self.curves.len() > max_curves {
            return Err(Error::too_many_curves(self.curves.len(), max_curves));
        }

        let bounds = self.curves.bounds();
        self.resolution = Resolution::new(1, 1);
        self.history.clear();
        loop {
            self.history.push(self.resolution);
            let occupancy = self.evaluate();
            occupancy.trace();

            if occupancy.max_intersections() <= self.config.cell_capacity {
                debug!(
                    "{} curves fit a {}x{} grid after {} iterations",
                    self.curves.len(),
                    self.resolution.width,
                    self.resolution.height,
                    self.history.len()
                );
                return Ok(GlyphGrid {
                    bounds,
                    resolution: self.resolution,
                    curves: self.curves.curves().to_vec(),
                    cells: occupancy.cells,
                    cell_capacity: self.config.cell_capacity,
                });
            }

            let cell_width = bounds.width / self.resolution.width as f32;
            let cell_height = bounds.height / self.resolution.height as f32;
            let next = occupancy.refine(cell_width, cell_height);
            let largest = next.width.max(next.height);
            if largest > self.config.max_dimension {
                return Err(Error::grid_overflow(largest, self.config.max_dimension));
            }
            self.resolution = next;
        }
    }
}

fn cell_region(bounds: Region, resolution: Resolution, column: usize, row: usize) -> Region {
    let width = bounds.width / resolution.width as f32;
    let height = bounds.height / resolution.height as f32;
    Region::new(
        bounds.x + width * column as f32,
        bounds.y + height * row as f32,
        width,
        height,
    )
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "curve counts are checked against u16::MAX before evaluation"
)]
fn curve_index(position: usize) -> u16 {
    (position + 1) as u16
}
