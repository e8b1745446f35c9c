//! Mapping between hex space and pixel space.
//!
//! A `Layout` pairs one of the two fixed `Orientation`s with a cell size and a
//! pixel origin. Everything the renderer draws goes through `center_point` and
//! `polygon_corners`; `pixel_to_hex` is the inverse for hit testing.

use crate::hex::{FractionalHex, Hex};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point (or offset) in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Forward and inverse hex/pixel matrices plus the angle of corner 0.
///
/// The start angle is measured in sixths of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub f0: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
    pub start_angle: f64,
}

impl Orientation {
    /// Flat-top hexes: columns line up, rows zig-zag
    pub const FLAT: Orientation = Orientation {
        f0: 3.0 / 2.0,
        f1: 0.0,
        f2: SQRT_3 / 2.0,
        f3: SQRT_3,
        b0: 2.0 / 3.0,
        b1: 0.0,
        b2: -1.0 / 3.0,
        b3: SQRT_3 / 3.0,
        start_angle: 0.0,
    };

    /// Pointy-top hexes: rows line up, columns zig-zag
    pub const POINTY: Orientation = Orientation {
        f0: SQRT_3,
        f1: SQRT_3 / 2.0,
        f2: 0.0,
        f3: 3.0 / 2.0,
        b0: SQRT_3 / 3.0,
        b1: -1.0 / 3.0,
        b2: 0.0,
        b3: 2.0 / 3.0,
        start_angle: 0.5,
    };
}

/// Orientation, cell size and origin for one board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub orientation: Orientation,
    pub size: Point,
    pub origin: Point,
}

impl Layout {
    pub const fn new(orientation: Orientation, size: Point, origin: Point) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    pub const fn flat(size: Point, origin: Point) -> Self {
        Self::new(Orientation::FLAT, size, origin)
    }

    pub const fn pointy(size: Point, origin: Point) -> Self {
        Self::new(Orientation::POINTY, size, origin)
    }

    /// Pixel position of the center of `hex`
    pub fn center_point(&self, hex: Hex) -> Point {
        let m = &self.orientation;
        let (q, r) = (f64::from(hex.q()), f64::from(hex.r()));

        let x = (m.f0 * q + m.f1 * r) * self.size.x;
        let y = (m.f2 * q + m.f3 * r) * self.size.y;

        Point::new(x + self.origin.x, y + self.origin.y)
    }

    /// Fractional hex under a pixel; round it to get the containing cell
    pub fn pixel_to_hex(&self, point: Point) -> FractionalHex {
        let m = &self.orientation;
        let x = (point.x - self.origin.x) / self.size.x;
        let y = (point.y - self.origin.y) / self.size.y;

        let q = m.b0 * x + m.b1 * y;
        let r = m.b2 * x + m.b3 * y;

        FractionalHex::new(q, r, -q - r)
    }

    /// The cell containing a pixel
    pub fn hex_at(&self, point: Point) -> Hex {
        self.pixel_to_hex(point).round()
    }

    /// Offset of corner `corner` (0..6) from a hex center
    pub fn corner_offset(&self, corner: usize) -> Point {
        let angle = 2.0 * PI * (self.orientation.start_angle - corner as f64) / 6.0;
        Point::new(self.size.x * angle.cos(), self.size.y * angle.sin())
    }

    /// The six corners of `hex`, in corner order 0..6
    pub fn polygon_corners(&self, hex: Hex) -> [Point; 6] {
        let center = self.center_point(hex);
        std::array::from_fn(|corner| {
            let offset = self.corner_offset(corner);
            Point::new(center.x + offset.x, center.y + offset.y)
        })
    }
}
