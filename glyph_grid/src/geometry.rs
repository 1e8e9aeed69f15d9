// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, segments, quadratic curves and axis-aligned regions, along with the
//! containment and intersection tests used to bin curves into grid cells.
//!
//! All tests are conservative: when floating point error makes the answer
//! uncertain they report an intersection.

use core::ops::Neg;

use crate::math::{sqrt, FloatExt, RELATIVE_TOLERANCE};

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only needed when `std` is disabled")]
use core_maths::CoreFloat;

/// Slack applied to the bounding box check of a computed curve/line
/// intersection point, relative to the magnitude of the line's coordinates.
const BOX_TOLERANCE: f32 = 1.0e-4;

/// A point in font design units, or in normalized `[0, 1]` space after packing.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// A straight line segment between two points.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
}

impl Segment {
    /// Creates a new segment.
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Returns `true` if `point` lies within the segment's bounding box.
    ///
    /// This is the approximate "point on segment" test used for collinear
    /// configurations: callers only consult it once the point is known to be
    /// collinear with the segment, at which point the box check is exact up
    /// to rounding.
    #[inline]
    pub fn bbox_contains(self, point: Point) -> bool {
        self.bbox_contains_within(point, 0.0)
    }

    fn bbox_contains_within(self, point: Point, slack: f32) -> bool {
        let (x0, x1) = min_max(self.p0.x, self.p1.x);
        let (y0, y1) = min_max(self.p0.y, self.p1.y);
        point.x >= x0 - slack
            && point.x <= x1 + slack
            && point.y >= y0 - slack
            && point.y <= y1 + slack
    }
}

/// A quadratic Bézier curve.
///
/// Straight lines are represented as degenerate curves whose control point is
/// the midpoint of the endpoints.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct QuadCurve {
    /// Start point (on-curve).
    pub p0: Point,
    /// Control point (off-curve).
    pub control: Point,
    /// End point (on-curve).
    pub p2: Point,
}

impl QuadCurve {
    /// Creates a new curve.
    pub const fn new(p0: Point, control: Point, p2: Point) -> Self {
        Self { p0, control, p2 }
    }

    /// Creates a degenerate curve representing the straight line from `p0` to `p2`.
    pub fn line(p0: Point, p2: Point) -> Self {
        Self::new(p0, p0.midpoint(p2), p2)
    }

    /// Evaluates the curve at parameter `u`.
    #[inline]
    pub fn eval(&self, u: f32) -> Point {
        let mu = 1.0 - u;
        let w0 = mu * mu;
        let w1 = 2.0 * u * mu;
        let w2 = u * u;
        Point::new(
            w0 * self.p0.x + w1 * self.control.x + w2 * self.p2.x,
            w0 * self.p0.y + w1 * self.control.y + w2 * self.p2.y,
        )
    }

    /// Returns the three defining points in order.
    pub fn points(&self) -> [Point; 3] {
        [self.p0, self.control, self.p2]
    }

    /// Returns the chord from `p0` to `p2`.
    pub fn chord(&self) -> Segment {
        Segment::new(self.p0, self.p2)
    }

    /// Returns `true` if the curve traces the straight line between its
    /// endpoints, i.e. the control point is collinear with and between them.
    pub fn is_line(&self) -> bool {
        let dx = self.p2.x - self.p0.x;
        let dy = self.p2.y - self.p0.y;
        let cx = self.control.x - self.p0.x;
        let cy = self.control.y - self.p0.y;
        let cross = dx * cy - dy * cx;
        let scale = dx * dx + dy * dy + cx * cx + cy * cy;
        cross.is_nearly_zero_within_tolerance(RELATIVE_TOLERANCE * scale)
            && self.chord().bbox_contains(self.control)
    }
}

/// An axis-aligned rectangle.
///
/// Width and height are expected to be non-negative.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Region {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Region {
    /// Creates a new region.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the region spanning `min` to `max`.
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Bottom edge, running left to right.
    pub fn bottom_edge(&self) -> Segment {
        Segment::new(
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
        )
    }

    /// Right edge, running bottom to top.
    pub fn right_edge(&self) -> Segment {
        Segment::new(
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.top()),
        )
    }

    /// Top edge, running right to left.
    pub fn top_edge(&self) -> Segment {
        Segment::new(
            Point::new(self.right(), self.top()),
            Point::new(self.x, self.top()),
        )
    }

    /// Left edge, running top to bottom.
    pub fn left_edge(&self) -> Segment {
        Segment::new(
            Point::new(self.x, self.top()),
            Point::new(self.x, self.y),
        )
    }

    /// The four boundary segments: bottom, right, top, left.
    pub fn edges(&self) -> [Segment; 4] {
        [
            self.bottom_edge(),
            self.right_edge(),
            self.top_edge(),
            self.left_edge(),
        ]
    }
}

/// The turning direction of three points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The points turn clockwise.
    Clockwise,
    /// The points lie on one line.
    Collinear,
    /// The points turn counter-clockwise.
    CounterClockwise,
}

impl Orientation {
    /// Returns `-1`, `0` or `1`.
    pub fn signum(self) -> i32 {
        match self {
            Self::Clockwise => -1,
            Self::Collinear => 0,
            Self::CounterClockwise => 1,
        }
    }
}

impl Neg for Orientation {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::Collinear => Self::Collinear,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Returns `true` if `point` lies in the closed rectangle of `region`.
#[inline]
pub fn point_in_region(region: Region, point: Point) -> bool {
    point.x >= region.x
        && point.y >= region.y
        && point.x <= region.right()
        && point.y <= region.top()
}

/// Returns the orientation of the triangle `a`, `b`, `c`: the sign of the
/// cross product of `b - a` and `c - b`.
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if the two segments cross or touch.
///
/// Touching and collinear overlap are detected with [`Segment::bbox_contains`]
/// on endpoints that are exactly collinear with the other segment.
pub fn segments_intersect(s0: Segment, s1: Segment) -> bool {
    let o1 = orientation(s0.p0, s0.p1, s1.p0);
    let o2 = orientation(s0.p0, s0.p1, s1.p1);
    let o3 = orientation(s1.p0, s1.p1, s0.p0);
    let o4 = orientation(s1.p0, s1.p1, s0.p1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && s0.bbox_contains(s1.p0))
        || (o2 == Orientation::Collinear && s0.bbox_contains(s1.p1))
        || (o3 == Orientation::Collinear && s1.bbox_contains(s0.p0))
        || (o4 == Orientation::Collinear && s1.bbox_contains(s0.p1))
}

/// Returns `true` if the segment has an endpoint inside `region` or crosses
/// one of its edges.
pub fn segment_intersects_region(region: Region, segment: Segment) -> bool {
    point_in_region(region, segment.p0)
        || point_in_region(region, segment.p1)
        || region
            .edges()
            .into_iter()
            .any(|edge| segments_intersect(edge, segment))
}

/// Returns `true` if the curve crosses the segment.
///
/// Substitutes the curve's parametric form into the implicit equation of the
/// segment's supporting line and solves the resulting quadratic in `u`. Each
/// real root in `[0, 1]` is evaluated and accepted if it falls inside the
/// segment's bounding box. When the quadratic term vanishes (the curve's
/// second derivative is parallel to the line) the linear equation is solved
/// instead. Degenerate inputs never panic; they report no intersection.
pub fn curve_intersects_segment(segment: Segment, curve: QuadCurve) -> bool {
    let dx = segment.p1.x - segment.p0.x;
    let dy = segment.p1.y - segment.p0.y;

    let ax = curve.p0.x - 2.0 * curve.control.x + curve.p2.x;
    let ay = curve.p0.y - 2.0 * curve.control.y + curve.p2.y;
    let bx = 2.0 * (curve.control.x - curve.p0.x);
    let by = 2.0 * (curve.control.y - curve.p0.y);
    let cx = curve.p0.x - segment.p0.x;
    let cy = curve.p0.y - segment.p0.y;

    let a = dy * ax - dx * ay;
    let b = dy * bx - dx * by;
    let c = dy * cx - dx * cy;

    let scale = (dx.abs() + dy.abs()) * (ax.abs() + ay.abs() + bx.abs() + by.abs());
    if scale == 0.0 {
        return false;
    }
    let tolerance = RELATIVE_TOLERANCE * scale;

    let magnitude = [segment.p0.x, segment.p0.y, segment.p1.x, segment.p1.y]
        .into_iter()
        .fold(0.0_f32, |m, v| m.max(v.abs()));
    let slack = BOX_TOLERANCE * (1.0 + magnitude);
    let hits =
        |u: f32| (0.0..=1.0).contains(&u) && segment.bbox_contains_within(curve.eval(u), slack);

    if a.is_nearly_zero_within_tolerance(tolerance) {
        if b.is_nearly_zero_within_tolerance(tolerance) {
            return false;
        }
        return hits(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return false;
    }
    // `-b` and the root share a sign in `q`, so nearly straight curves with
    // `|b| >> |a|` do not lose their small root to cancellation.
    let root = sqrt(discriminant);
    let q = if b < 0.0 {
        -0.5 * (b - root)
    } else {
        -0.5 * (b + root)
    };
    if q.is_nearly_zero_within_tolerance(tolerance) {
        return hits(-b / (2.0 * a));
    }
    hits(q / a) || hits(c / q)
}

/// Returns `true` if the curve has an endpoint inside `region` or crosses one
/// of its edges.
pub fn curve_intersects_region(region: Region, curve: QuadCurve) -> bool {
    point_in_region(region, curve.p0)
        || point_in_region(region, curve.p2)
        || region
            .edges()
            .into_iter()
            .any(|edge| curve_intersects_segment(edge, curve))
}

/// Maps `point` into the unit square spanned by `region`.
///
/// An axis with zero extent maps to `0`.
pub fn normalize_to_region(region: Region, point: Point) -> Point {
    let normalize = |value: f32, origin: f32, extent: f32| {
        if extent == 0.0 {
            0.0
        } else {
            (value - origin) / extent
        }
    };
    Point::new(
        normalize(point.x, region.x, region.width),
        normalize(point.y, region.y, region.height),
    )
}

#[inline]
fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
