//! Rectangular addressing schemes and their conversions to cube coordinates.
//!
//! - `OffsetCoord`: every other column (q-offset) or row (r-offset) is shoved
//!   by half a cell; `Parity` says whether the even or the odd ones move
//! - `DoubledCoord`: one axis counts in steps of two so neighbors stay integral
//!
//! Every conversion here is an exact bijection with `Hex`, negative values
//! included. Rust's `/` truncates toward zero and `& 1` reads the two's
//! complement low bit, which is exactly what the offset formulas need.

use crate::hex::Hex;
use serde::{Deserialize, Serialize};

/// Which of the shoved columns/rows are pushed out by half a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Both parities
    pub const ALL: [Parity; 2] = [Parity::Even, Parity::Odd];

    /// `+1` for even, `-1` for odd
    pub const fn sign(self) -> i32 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }
}

/// Which cube axis the rectangular layout is built along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Columns follow `q` (flat-top maps)
    Q,
    /// Rows follow `r` (pointy-top maps)
    R,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Q, Axis::R];
}

/// Offset coordinate `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct OffsetCoord {
    pub col: i32,
    pub row: i32,
}

impl OffsetCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Convert a cube coordinate using the given axis and parity
    pub fn from_cube(axis: Axis, parity: Parity, hex: Hex) -> Self {
        match axis {
            Axis::Q => Self::q_from_cube(parity, hex),
            Axis::R => Self::r_from_cube(parity, hex),
        }
    }

    /// Convert back to a cube coordinate using the given axis and parity
    pub fn to_cube(self, axis: Axis, parity: Parity) -> Hex {
        match axis {
            Axis::Q => self.q_to_cube(parity),
            Axis::R => self.r_to_cube(parity),
        }
    }

    pub fn q_from_cube(parity: Parity, hex: Hex) -> Self {
        let col = hex.q();
        let row = hex.r() + (hex.q() + parity.sign() * (hex.q() & 1)) / 2;
        Self::new(col, row)
    }

    pub fn q_to_cube(self, parity: Parity) -> Hex {
        let q = self.col;
        let r = self.row - (self.col + parity.sign() * (self.col & 1)) / 2;
        Hex::axial(q, r)
    }

    pub fn r_from_cube(parity: Parity, hex: Hex) -> Self {
        let col = hex.q() + (hex.r() + parity.sign() * (hex.r() & 1)) / 2;
        let row = hex.r();
        Self::new(col, row)
    }

    pub fn r_to_cube(self, parity: Parity) -> Hex {
        let q = self.col - (self.row + parity.sign() * (self.row & 1)) / 2;
        let r = self.row;
        Hex::axial(q, r)
    }
}

/// Doubled coordinate `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct DoubledCoord {
    pub col: i32,
    pub row: i32,
}

impl DoubledCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn from_cube(axis: Axis, hex: Hex) -> Self {
        match axis {
            Axis::Q => Self::q_from_cube(hex),
            Axis::R => Self::r_from_cube(hex),
        }
    }

    pub fn to_cube(self, axis: Axis) -> Hex {
        match axis {
            Axis::Q => self.q_to_cube(),
            Axis::R => self.r_to_cube(),
        }
    }

    pub fn q_from_cube(hex: Hex) -> Self {
        Self::new(hex.q(), 2 * hex.r() + hex.q())
    }

    pub fn q_to_cube(self) -> Hex {
        Hex::axial(self.col, (self.row - self.col) / 2)
    }

    pub fn r_from_cube(hex: Hex) -> Self {
        Self::new(2 * hex.q() + hex.r(), hex.r())
    }

    pub fn r_to_cube(self) -> Hex {
        Hex::axial((self.col - self.row) / 2, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_range(radius: i32) -> impl Iterator<Item = Hex> {
        (-radius..=radius).flat_map(move |q| (-radius..=radius).map(move |r| Hex::axial(q, r)))
    }

    #[test]
    fn test_offset_from_cube() {
        let hex = Hex::new(1, 2, -3);
        assert_eq!(OffsetCoord::q_from_cube(Parity::Even, hex), OffsetCoord::new(1, 3));
        assert_eq!(OffsetCoord::q_from_cube(Parity::Odd, hex), OffsetCoord::new(1, 2));
    }

    #[test]
    fn test_offset_to_cube() {
        assert_eq!(OffsetCoord::new(1, 3).q_to_cube(Parity::Even), Hex::new(1, 2, -3));
        assert_eq!(OffsetCoord::new(1, 2).q_to_cube(Parity::Odd), Hex::new(1, 2, -3));
    }

    #[test]
    fn test_offset_round_trip_from_cube() {
        for hex in cube_range(12) {
            for axis in Axis::ALL {
                for parity in Parity::ALL {
                    let offset = OffsetCoord::from_cube(axis, parity, hex);
                    assert_eq!(
                        offset.to_cube(axis, parity),
                        hex,
                        "{axis:?}/{parity:?} via {offset:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_offset_round_trip_to_cube() {
        for col in -12..=12 {
            for row in -12..=12 {
                let offset = OffsetCoord::new(col, row);
                for axis in Axis::ALL {
                    for parity in Parity::ALL {
                        let hex = offset.to_cube(axis, parity);
                        assert_eq!(OffsetCoord::from_cube(axis, parity, hex), offset);
                    }
                }
            }
        }
    }

    #[test]
    fn test_offset_negative_odd_column() {
        // -1 & 1 == 1 and the halving truncates toward zero
        let hex = Hex::new(-1, 0, 1);
        assert_eq!(OffsetCoord::q_from_cube(Parity::Even, hex), OffsetCoord::new(-1, 0));
        assert_eq!(OffsetCoord::q_from_cube(Parity::Odd, hex), OffsetCoord::new(-1, -1));
    }

    #[test]
    fn test_doubled_from_cube() {
        let hex = Hex::new(1, 2, -3);
        assert_eq!(DoubledCoord::q_from_cube(hex), DoubledCoord::new(1, 5));
        assert_eq!(DoubledCoord::r_from_cube(hex), DoubledCoord::new(4, 2));
    }

    #[test]
    fn test_doubled_to_cube() {
        assert_eq!(DoubledCoord::new(1, 5).q_to_cube(), Hex::new(1, 2, -3));
        assert_eq!(DoubledCoord::new(4, 2).r_to_cube(), Hex::new(1, 2, -3));
    }

    #[test]
    fn test_doubled_round_trip() {
        for hex in cube_range(12) {
            for axis in Axis::ALL {
                let doubled = DoubledCoord::from_cube(axis, hex);
                assert_eq!(doubled.to_cube(axis), hex);
                assert_eq!(DoubledCoord::from_cube(axis, doubled.to_cube(axis)), doubled);
            }
        }
        let b = DoubledCoord::new(1, -3);
        assert_eq!(DoubledCoord::q_from_cube(b.q_to_cube()), b);
        assert_eq!(DoubledCoord::r_from_cube(b.r_to_cube()), b);
    }
}
