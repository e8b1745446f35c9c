//! Warpmap - hexagonal star maps with wormholes, rendered to SVG
//!
//! This crate provides everything needed to turn a list of stars into a map:
//! - Cube coordinate algebra for hex grids
//! - Offset and doubled coordinate conversions
//! - Hex/pixel layout for flat-top and pointy-top grids
//! - The board: a grid of cells, named stars and the wormhole graph between them
//! - An SVG renderer for boards
//!
//! # Architecture
//!
//! The core is synchronous and keeps no global state. A board is built from a
//! [`MapRequest`], rendered once and dropped. It can be compiled to:
//! - Native Rust for the CLI and HTTP server
//! - WebAssembly for rendering maps in the browser
//!
//! # Modules
//!
//! - [`hex`]: Cube coordinates, rounding and line drawing
//! - [`coords`]: Offset and doubled coordinates
//! - [`layout`]: Orientations and hex/pixel projection
//! - [`board`]: Cells, stars and wormholes
//! - [`svg`]: Rendering boards as SVG or HTML
//! - [`map`]: Map descriptions, input limits and the standard map
//! - [`generate`]: Random maps

pub mod board;
pub mod coords;
pub mod generate;
pub mod hex;
pub mod layout;
pub mod map;
pub mod svg;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardError, Cell, CellId, Star};
pub use coords::{Axis, DoubledCoord, OffsetCoord, Parity};
pub use generate::random_map;
pub use hex::{FractionalHex, Hex, HexError};
pub use layout::{Layout, Orientation, Point};
pub use map::{MapError, MapNode, MapRequest, MAX_COORD, MAX_NODES};
pub use svg::{Palette, Renderer, Svg};
