// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged glyph outlines and their conversion to quadratic curves.
//!
//! An [`Outline`] is the raw TrueType-style description of a glyph: a list of
//! points, each either on or off the curve, split into closed contours.
//! Between two on-curve points there is either nothing (a straight line) or a
//! single off-curve control point (a quadratic curve). Two consecutive
//! off-curve points imply an on-curve point halfway between them.
//!
//! [`flatten`] walks each contour once and produces the [`CurveList`]
//! consumed by the grid builder.

use alloc::vec::Vec;

use crate::error::Error;
use crate::geometry::{Point, QuadCurve, Region};

/// A point of a glyph outline, tagged as on or off the curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OutlinePoint {
    /// Horizontal coordinate in font units.
    pub x: f32,
    /// Vertical coordinate in font units.
    pub y: f32,
    /// True for points the rendered curve passes through.
    pub on_curve: bool,
}

impl OutlinePoint {
    /// Creates a point.
    pub const fn new(x: f32, y: f32, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Creates an on-curve point.
    pub const fn on(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            on_curve: true,
        }
    }

    /// Creates an off-curve (control) point.
    pub const fn off(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            on_curve: false,
        }
    }

    fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A glyph outline made of one or more closed contours.
///
/// Points are pushed in order; [`Outline::end_contour`] marks the last pushed
/// point as the end of the current contour.
#[derive(Clone, Default, Debug)]
pub struct Outline {
    points: Vec<OutlinePoint>,
    contour_ends: Vec<usize>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an outline from points and the index of the last point of each
    /// contour, as stored in a TrueType `glyf` table.
    pub fn from_parts(points: Vec<OutlinePoint>, contour_ends: Vec<usize>) -> Self {
        Self {
            points,
            contour_ends,
        }
    }

    /// Creates a single-contour outline.
    pub fn from_contour(points: &[OutlinePoint]) -> Self {
        let mut outline = Self::new();
        outline.extend_contour(points.iter().copied());
        outline
    }

    /// Appends a point to the current contour.
    pub fn push(&mut self, point: OutlinePoint) {
        self.points.push(point);
    }

    /// Closes the current contour at the last pushed point.
    ///
    /// Does nothing if no point was pushed since the previous contour ended.
    pub fn end_contour(&mut self) {
        let Some(last) = self.points.len().checked_sub(1) else {
            return;
        };
        if self.contour_ends.last() != Some(&last) {
            self.contour_ends.push(last);
        }
    }

    /// Appends a whole contour.
    pub fn extend_contour(&mut self, points: impl IntoIterator<Item = OutlinePoint>) {
        self.points.extend(points);
        self.end_contour();
    }

    /// Appends points along with the index of the last point of each contour
    /// they form. Indices are relative to the first appended point.
    pub fn extend_from_parts(
        &mut self,
        points: impl IntoIterator<Item = OutlinePoint>,
        contour_ends: impl IntoIterator<Item = usize>,
    ) {
        let base = self.points.len();
        self.points.extend(points);
        self.contour_ends
            .extend(contour_ends.into_iter().map(|end| base + end));
    }

    /// Removes all points and contours, keeping allocations.
    pub fn clear(&mut self) {
        self.points.clear();
        self.contour_ends.clear();
    }

    /// All points, across contours.
    pub fn points(&self) -> &[OutlinePoint] {
        &self.points
    }

    /// Index of the last point of each contour.
    pub fn contour_ends(&self) -> &[usize] {
        &self.contour_ends
    }

    /// Returns `true` if the outline has no contours.
    pub fn is_empty(&self) -> bool {
        self.contour_ends.is_empty()
    }

    /// Iterates over the contours as point slices, validating the contour
    /// end indices as it goes.
    pub fn contours(&self) -> impl Iterator<Item = Result<&[OutlinePoint], Error>> + '_ {
        let mut start = 0;
        self.contour_ends
            .iter()
            .enumerate()
            .map(move |(index, &end)| {
                if end < start || end >= self.points.len() {
                    return Err(Error::invalid_outline(
                        index,
                        "ends out of order or past the last point",
                    ));
                }
                let contour = &self.points[start..=end];
                start = end + 1;
                Ok(contour)
            })
    }
}

/// The quadratic curves of one glyph, with their bounding box.
///
/// Curve indices stored in grid cells are 1-based: index `i` refers to
/// `curves()[i - 1]`, and `0` marks an empty slot.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct CurveList {
    curves: Vec<QuadCurve>,
    bounds: Region,
}

impl CurveList {
    /// Creates a curve list, computing bounds over every curve point.
    pub fn new(curves: Vec<QuadCurve>) -> Self {
        let bounds = bounds_of(&curves);
        Self { curves, bounds }
    }

    /// The curves in outline order.
    pub fn curves(&self) -> &[QuadCurve] {
        &self.curves
    }

    /// The curve with the given 1-based cell index.
    pub fn get(&self, index: u16) -> Option<&QuadCurve> {
        self.curves.get(usize::from(index).checked_sub(1)?)
    }

    /// The box enclosing all endpoints and control points.
    ///
    /// Zero-sized at the origin for an empty list.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns `true` if there are no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Consumes the list, returning the curves.
    pub fn into_curves(self) -> Vec<QuadCurve> {
        self.curves
    }
}

fn bounds_of(curves: &[QuadCurve]) -> Region {
    let mut points = curves.iter().flat_map(QuadCurve::points);
    let Some(first) = points.next() else {
        return Region::default();
    };
    let (min, max) = points.fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Region::from_min_max(min, max)
}

/// Converts an outline into its list of quadratic curves.
///
/// Each contour is closed back to its starting point. Straight segments become
/// degenerate curves (see [`QuadCurve::line`]) and zero-length segments are
/// dropped.
pub fn flatten(outline: &Outline) -> Result<CurveList, Error> {
    let mut curves = Vec::with_capacity(outline.points().len());
    for (index, contour) in outline.contours().enumerate() {
        flatten_contour(index, contour?, &mut curves)?;
    }
    Ok(CurveList::new(curves))
}

/// Scan state while walking a contour.
#[derive(Copy, Clone, Debug)]
enum Scan {
    /// The pen rests on an on-curve point.
    OnCurve(Point),
    /// The pen rests on `start` with a pending control point.
    Control { start: Point, control: Point },
}

impl Scan {
    fn advance(self, point: OutlinePoint, curves: &mut Vec<QuadCurve>) -> Self {
        let p = point.point();
        match (self, point.on_curve) {
            (Self::OnCurve(start), true) => {
                if start != p {
                    curves.push(QuadCurve::line(start, p));
                }
                Self::OnCurve(p)
            }
            (Self::OnCurve(start), false) => Self::Control { start, control: p },
            (Self::Control { start, control }, true) => {
                curves.push(QuadCurve::new(start, control, p));
                Self::OnCurve(p)
            }
            (Self::Control { start, control }, false) => {
                let implied = control.midpoint(p);
                curves.push(QuadCurve::new(start, control, implied));
                Self::Control {
                    start: implied,
                    control: p,
                }
            }
        }
    }
}

fn flatten_contour(
    index: usize,
    contour: &[OutlinePoint],
    curves: &mut Vec<QuadCurve>,
) -> Result<(), Error> {
    let (Some(&first), Some(&last)) = (contour.first(), contour.last()) else {
        return Err(Error::invalid_outline(index, "is empty"));
    };
    if contour.len() < 2 {
        return Err(Error::invalid_outline(index, "has fewer than two points"));
    }

    // Pick an on-curve starting point. A contour that starts off-curve wraps
    // around: it starts at its last point if that is on-curve, otherwise at
    // the point implied between the last and first control points.
    let (start, rest) = if first.on_curve {
        (first.point(), &contour[1..])
    } else if last.on_curve {
        (last.point(), &contour[..contour.len() - 1])
    } else {
        (last.point().midpoint(first.point()), contour)
    };

    let scan = rest
        .iter()
        .fold(Scan::OnCurve(start), |scan, &point| scan.advance(point, curves));
    scan.advance(
        OutlinePoint {
            x: start.x,
            y: start.y,
            on_curve: true,
        },
        curves,
    );
    Ok(())
}
