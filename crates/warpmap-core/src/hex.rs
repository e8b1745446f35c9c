//! Cube coordinate system for hex grids.
//!
//! This module provides the integer and fractional cube coordinates every other
//! part of the map is built on:
//! - `Hex`: an integer cell position `(q, r, s)` with `q + r + s = 0`
//! - `FractionalHex`: a real-valued position, only ever an intermediate that is
//!   rounded back to a `Hex`
//!
//! Cube coordinates keep distance, rotation and line drawing down to a few
//! additions. See <https://www.redblobgames.com/grids/hexagons/> for background.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Errors from the fallible hex constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("cube coordinates ({q}, {r}, {s}) do not sum to zero")]
    NotOnPlane { q: i32, r: i32, s: i32 },
}

/// The six neighbor offsets, counter-clockwise starting from east (flat-top view).
pub const DIRECTIONS: [Hex; 6] = [
    Hex::raw(1, 0, -1),
    Hex::raw(1, -1, 0),
    Hex::raw(0, -1, 1),
    Hex::raw(-1, 0, 1),
    Hex::raw(-1, 1, 0),
    Hex::raw(0, 1, -1),
];

/// The six diagonal offsets, each lying between two adjacent directions.
pub const DIAGONALS: [Hex; 6] = [
    Hex::raw(2, -1, -1),
    Hex::raw(1, -2, 1),
    Hex::raw(-1, -1, 2),
    Hex::raw(-2, 1, 1),
    Hex::raw(-1, 2, -1),
    Hex::raw(1, 1, -2),
];

/// Wraps any direction index (negative included) into `0..6`.
fn wrap_direction(direction: i32) -> usize {
    ((6 + direction % 6) % 6) as usize
}

/// Integer cube coordinate.
///
/// The three components always satisfy `q + r + s = 0`. The fields are private so
/// the only way to get a `Hex` is through a constructor that checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[i32; 3]", into = "[i32; 3]")]
pub struct Hex {
    q: i32,
    r: i32,
    s: i32,
}

impl Hex {
    /// The origin hex `(0, 0, 0)`
    pub const ORIGIN: Hex = Hex::raw(0, 0, 0);

    /// Used for the constant tables, which are correct by inspection.
    const fn raw(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Widened so huge components cannot wrap into a false zero
    fn on_plane(q: i32, r: i32, s: i32) -> bool {
        i64::from(q) + i64::from(r) + i64::from(s) == 0
    }

    /// Create a new cube coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `q + r + s != 0`. Use [`Hex::try_new`] for untrusted input.
    pub fn new(q: i32, r: i32, s: i32) -> Self {
        assert!(Self::on_plane(q, r, s), "assert(q + r + s == 0) failed for ({q}, {r}, {s})");
        Self { q, r, s }
    }

    /// Create a new cube coordinate, reporting a broken invariant as an error
    pub fn try_new(q: i32, r: i32, s: i32) -> Result<Self, HexError> {
        if !Self::on_plane(q, r, s) {
            return Err(HexError::NotOnPlane { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Create from axial `(q, r)`; `s` is derived
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Multiply every component by `k`
    pub fn scale(self, k: i32) -> Self {
        Self::new(self.q * k, self.r * k, self.s * k)
    }

    /// Rotate 60° counter-clockwise about the origin
    pub fn rotate_left(self) -> Self {
        Self::new(-self.s, -self.q, -self.r)
    }

    /// Rotate 60° clockwise about the origin
    pub fn rotate_right(self) -> Self {
        Self::new(-self.r, -self.s, -self.q)
    }

    /// Number of steps from the origin
    pub fn length(self) -> u32 {
        (self.q.unsigned_abs() + self.r.unsigned_abs() + self.s.unsigned_abs()) / 2
    }

    /// Number of steps between two hexes
    pub fn distance(self, other: Hex) -> u32 {
        (self - other).length()
    }

    /// The unit vector for `direction`; any integer is accepted and wrapped.
    pub fn direction(direction: i32) -> Hex {
        DIRECTIONS[wrap_direction(direction)]
    }

    /// The adjacent hex in `direction`
    pub fn neighbor(self, direction: i32) -> Hex {
        self + Hex::direction(direction)
    }

    /// The hex two steps away across the corner in `direction`
    pub fn diagonal_neighbor(self, direction: i32) -> Hex {
        self + DIAGONALS[wrap_direction(direction)]
    }

    /// All six neighbors in direction order
    pub fn neighbors(self) -> [Hex; 6] {
        DIRECTIONS.map(|d| self + d)
    }

    /// Linear interpolation towards `other`, without rounding
    pub fn lerp(self, other: Hex, t: f64) -> FractionalHex {
        FractionalHex::from(self).lerp(FractionalHex::from(other), t)
    }

    /// The hexes on a straight line from `self` to `other`, both included.
    ///
    /// The endpoints are nudged off the grid lines so that a line running exactly
    /// along an edge always rounds to the same side.
    pub fn line_draw(self, other: Hex) -> Vec<Hex> {
        const NUDGE: (f64, f64, f64) = (1e-6, 1e-6, -2e-6);

        let n = self.distance(other);
        let a = FractionalHex::from(self).offset(NUDGE);
        let b = FractionalHex::from(other).offset(NUDGE);
        let step = 1.0 / f64::from(n.max(1));

        (0..=n)
            .map(|i| a.lerp(b, step * f64::from(i)).round())
            .collect()
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r, self.s + other.s)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r, self.s - other.s)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r, -self.s)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

impl TryFrom<[i32; 3]> for Hex {
    type Error = HexError;

    fn try_from([q, r, s]: [i32; 3]) -> Result<Self, Self::Error> {
        Hex::try_new(q, r, s)
    }
}

impl From<Hex> for [i32; 3] {
    fn from(hex: Hex) -> Self {
        [hex.q, hex.r, hex.s]
    }
}

/// Real-valued cube coordinate.
///
/// Only produced by interpolation and pixel inversion; call [`FractionalHex::round`]
/// to get back to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FractionalHex {
    q: f64,
    r: f64,
    s: f64,
}

impl FractionalHex {
    /// Create a fractional hex.
    ///
    /// # Panics
    ///
    /// Panics if `q + r + s` does not round to zero.
    pub fn new(q: f64, r: f64, s: f64) -> Self {
        assert!(
            (q + r + s).round() == 0.0,
            "assert(q + r + s == 0) failed for ({q}, {r}, {s})"
        );
        Self { q, r, s }
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    /// Componentwise `self * (1 - t) + other * t`
    pub fn lerp(self, other: FractionalHex, t: f64) -> Self {
        Self::new(
            self.q * (1.0 - t) + other.q * t,
            self.r * (1.0 - t) + other.r * t,
            self.s * (1.0 - t) + other.s * t,
        )
    }

    fn offset(self, (dq, dr, ds): (f64, f64, f64)) -> Self {
        Self::new(self.q + dq, self.r + dr, self.s + ds)
    }

    /// Round to the hex containing this point.
    ///
    /// Each component is rounded on its own, then the one that moved the most is
    /// recomputed from the other two. Ties go to `s`, then `r`.
    pub fn round(self) -> Hex {
        let mut q = self.q.round();
        let mut r = self.r.round();
        let mut s = self.s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - s;
        } else if r_diff > s_diff {
            r = -q - s;
        } else {
            s = -q - r;
        }

        Hex::new(q as i32, r as i32, s as i32)
    }
}

impl From<Hex> for FractionalHex {
    fn from(hex: Hex) -> Self {
        Self {
            q: f64::from(hex.q),
            r: f64::from(hex.r),
            s: f64::from(hex.s),
        }
    }
}
