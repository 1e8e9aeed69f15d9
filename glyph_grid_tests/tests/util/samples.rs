// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic outlines.

use core::f32::consts::{FRAC_PI_4, FRAC_PI_8, TAU};

use glyph_grid::{Outline, OutlinePoint};

/// An axis-aligned square with corners at the origin and `(size, size)`.
pub(crate) fn square(size: f32) -> Outline {
    Outline::from_contour(&square_points(0.0, 0.0, size))
}

fn square_points(x: f32, y: f32, size: f32) -> [OutlinePoint; 4] {
    [
        OutlinePoint::on(x, y),
        OutlinePoint::on(x + size, y),
        OutlinePoint::on(x + size, y + size),
        OutlinePoint::on(x, y + size),
    ]
}

/// A circle of the given radius made of eight quadratic curves.
///
/// Every point is off-curve, so every on-curve point is implied, including
/// the contour's start.
pub(crate) fn circle(radius: f32) -> Outline {
    let control_radius = radius / FRAC_PI_8.cos();
    let points: Vec<_> = (0..8)
        .map(|i| {
            let angle = FRAC_PI_8 + FRAC_PI_4 * i as f32;
            OutlinePoint::off(control_radius * angle.cos(), control_radius * angle.sin())
        })
        .collect();
    Outline::from_contour(&points)
}

/// A regular polygon with `sides` straight edges.
pub(crate) fn polygon(sides: usize, radius: f32) -> Outline {
    let points: Vec<_> = (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32;
            OutlinePoint::on(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Outline::from_contour(&points)
}

/// A square frame: an outer contour and an inner hole.
pub(crate) fn frame() -> Outline {
    let mut outline = square(100.0);
    let mut hole = square_points(25.0, 25.0, 50.0);
    hole.reverse();
    outline.extend_contour(hole);
    outline
}

/// A star whose points are joined by curves bulging outwards, starting on an
/// off-curve point.
pub(crate) fn star(points: usize, radius: f32) -> Outline {
    let contour: Vec<_> = (0..points * 2)
        .map(|i| {
            let angle = TAU * i as f32 / (points * 2) as f32;
            let (r, on) = if i % 2 == 0 {
                (radius * 0.6, false)
            } else {
                (radius, true)
            };
            OutlinePoint {
                x: r * angle.cos(),
                y: r * angle.sin(),
                on_curve: on,
            }
        })
        .collect();
    Outline::from_contour(&contour)
}
