//! Star map board: a rectangular grid of hex cells, some of which hold stars,
//! plus the undirected wormhole graph between those stars.
//!
//! Cells live in one row-major arena. A `CellId` is an index into it, and
//! wormhole exits are stored as `CellId`s so two stars can point at each other
//! without shared ownership.

use crate::coords::{OffsetCoord, Parity};
use crate::hex::Hex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while placing stars or wormholes
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("star not found: {0:?}")]
    StarNotFound(String),

    #[error("cell (row {row}, col {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
}

/// Index of a cell in the board's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(usize);

impl CellId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Star attributes of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    pub name: String,
    /// Economic value shown under the name
    pub econ_value: u32,
    /// Cells at the far end of this star's wormholes, in insertion order
    exits: Vec<CellId>,
}

impl Star {
    pub fn exits(&self) -> &[CellId] {
        &self.exits
    }
}

/// A single hex on the board; a plain background hex unless it has a star
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub star: Option<Star>,
}

impl Cell {
    fn background(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            star: None,
        }
    }

    /// Cube coordinate of this cell.
    ///
    /// Boards are always addressed as flat-top, even-q offset grids.
    pub fn hex(&self) -> Hex {
        OffsetCoord::new(self.col as i32, self.row as i32).q_to_cube(Parity::Even)
    }

    pub fn is_star(&self) -> bool {
        self.star.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.star.as_ref().map(|s| s.name.as_str())
    }
}

/// The grid of cells and the name lookup for its stars
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    stars: HashMap<String, CellId>,
}

impl Board {
    /// Create an empty board able to hold stars up to `max_row` / `max_col`.
    ///
    /// The grid gets an extra row and column past the maxima, so a star placed at
    /// the maximum still has a ring of background hexes around it.
    pub fn new(max_row: usize, max_col: usize) -> Self {
        let rows = max_row + 2;
        let cols = max_col + 2;
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::background(row, col)))
            .collect();

        Self {
            rows,
            cols,
            cells,
            stars: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn id_of(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.rows && col < self.cols).then(|| CellId(row * self.cols + col))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.id_of(row, col).map(|id| &self.cells[id.0])
    }

    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, cell)| (CellId(i), cell))
    }

    /// Star cells in grid order, each paired with its star
    pub fn stars(&self) -> impl Iterator<Item = (CellId, &Cell, &Star)> {
        self.cells()
            .filter_map(|(id, cell)| cell.star.as_ref().map(|star| (id, cell, star)))
    }

    /// Number of distinct star cells
    pub fn star_count(&self) -> usize {
        self.stars().count()
    }

    /// Look up a star cell by name
    pub fn star(&self, name: &str) -> Option<&Cell> {
        self.stars.get(name).and_then(|id| self.cells.get(id.0))
    }

    /// The cells reachable through `name`'s wormholes
    pub fn exits(&self, name: &str) -> Option<Vec<&Cell>> {
        let star = self.star(name)?.star.as_ref()?;
        Some(star.exits.iter().filter_map(|id| self.cells.get(id.0)).collect())
    }

    /// Place a star, replacing whatever was at `(row, col)`.
    ///
    /// The name is registered in the lookup, replacing any earlier cell with the
    /// same name. Placing onto an existing star keeps that cell's wormholes, and
    /// the earlier name keeps resolving to the cell.
    pub fn add_star(
        &mut self,
        name: impl Into<String>,
        row: usize,
        col: usize,
        econ_value: u32,
    ) -> Result<CellId, BoardError> {
        let id = self
            .id_of(row, col)
            .ok_or(BoardError::OutOfBounds { row, col })?;
        let name = name.into();

        let cell = &mut self.cells[id.0];
        let exits = cell.star.take().map(|s| s.exits).unwrap_or_default();
        cell.star = Some(Star {
            name: name.clone(),
            econ_value,
            exits,
        });
        self.stars.insert(name, id);

        Ok(id)
    }

    /// Connect two stars with a wormhole.
    ///
    /// Returns `Ok(true)` if a new edge was recorded and `Ok(false)` if the edge
    /// already existed (in either direction) or both names resolve to one cell.
    /// Fails without touching the graph if either name is unknown.
    pub fn add_wormhole(&mut self, source: &str, target: &str) -> Result<bool, BoardError> {
        let from = *self
            .stars
            .get(source)
            .ok_or_else(|| BoardError::StarNotFound(source.to_string()))?;
        let to = *self
            .stars
            .get(target)
            .ok_or_else(|| BoardError::StarNotFound(target.to_string()))?;

        if from == to {
            return Ok(false);
        }

        let added_forward = self.link(from, to);
        let added_back = self.link(to, from);
        Ok(added_forward || added_back)
    }

    /// Append `to` to `from`'s exits unless it is already there
    fn link(&mut self, from: CellId, to: CellId) -> bool {
        match self.cells[from.0].star.as_mut() {
            Some(star) if !star.exits.contains(&to) => {
                star.exits.push(to);
                true
            }
            _ => false,
        }
    }

    /// Every distinct wormhole once, smaller cell id first, in ascending order
    pub fn wormholes(&self) -> Vec<(CellId, CellId)> {
        let mut edges: Vec<(CellId, CellId)> = self
            .stars()
            .flat_map(|(id, _, star)| {
                star.exits
                    .iter()
                    .filter(move |&&exit| exit > id)
                    .map(move |&exit| (id, exit))
            })
            .collect();
        edges.sort();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_names<'a>(board: &'a Board, name: &str) -> Vec<&'a str> {
        board
            .exits(name)
            .unwrap()
            .into_iter()
            .filter_map(Cell::name)
            .collect()
    }

    #[test]
    fn test_board_has_margin() {
        let board = Board::new(3, 5);
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.cells().count(), 35);
        assert!(board.cell(4, 6).is_some());
        assert!(board.cell(5, 0).is_none());
        assert_eq!(board.star_count(), 0);
    }

    #[test]
    fn test_cells_know_their_position() {
        let board = Board::new(2, 2);
        for (id, cell) in board.cells() {
            assert_eq!(id.index(), cell.row * board.cols() + cell.col);
        }
    }

    #[test]
    fn test_add_star() {
        let mut board = Board::new(4, 4);
        let id = board.add_star("Ur", 2, 3, 4).unwrap();

        let cell = board.star("Ur").unwrap();
        assert_eq!((cell.row, cell.col), (2, 3));
        assert_eq!(cell.star.as_ref().unwrap().econ_value, 4);
        assert_eq!(board.cell_by_id(id), Some(cell));
        assert_eq!(board.star_count(), 1);
    }

    #[test]
    fn test_add_star_out_of_bounds() {
        let mut board = Board::new(2, 2);
        assert_eq!(
            board.add_star("Far", 9, 1, 0),
            Err(BoardError::OutOfBounds { row: 9, col: 1 })
        );
        assert!(board.star("Far").is_none());
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut board = Board::new(4, 4);
        board.add_star("Kish", 1, 1, 0).unwrap();
        board.add_star("Kish", 3, 3, 2).unwrap();

        let cell = board.star("Kish").unwrap();
        assert_eq!((cell.row, cell.col), (3, 3));
        assert_eq!(board.star_count(), 2);
    }

    #[test]
    fn test_wormhole_is_symmetric() {
        let mut board = Board::new(3, 3);
        board.add_star("A", 1, 1, 1).unwrap();
        board.add_star("B", 1, 2, 2).unwrap();

        assert_eq!(board.add_wormhole("B", "A"), Ok(true));
        assert_eq!(exit_names(&board, "A"), vec!["B"]);
        assert_eq!(exit_names(&board, "B"), vec!["A"]);
    }

    #[test]
    fn test_wormhole_is_idempotent() {
        let mut board = Board::new(3, 3);
        board.add_star("A", 1, 1, 1).unwrap();
        board.add_star("B", 1, 2, 2).unwrap();

        assert_eq!(board.add_wormhole("A", "B"), Ok(true));
        assert_eq!(board.add_wormhole("A", "B"), Ok(false));
        assert_eq!(board.add_wormhole("B", "A"), Ok(false));

        assert_eq!(exit_names(&board, "A"), vec!["B"]);
        assert_eq!(exit_names(&board, "B"), vec!["A"]);
        assert_eq!(board.wormholes().len(), 1);
    }

    #[test]
    fn test_wormhole_unknown_star_leaves_graph_unchanged() {
        let mut board = Board::new(3, 3);
        board.add_star("A", 1, 1, 1).unwrap();
        board.add_star("B", 1, 2, 2).unwrap();
        board.add_wormhole("A", "B").unwrap();
        let before = board.wormholes();

        assert_eq!(
            board.add_wormhole("A", "Nowhere"),
            Err(BoardError::StarNotFound("Nowhere".to_string()))
        );
        assert_eq!(
            board.add_wormhole("Nowhere", "B"),
            Err(BoardError::StarNotFound("Nowhere".to_string()))
        );
        assert_eq!(board.wormholes(), before);
        assert_eq!(exit_names(&board, "A"), vec!["B"]);
    }

    #[test]
    fn test_wormhole_to_self_is_not_recorded() {
        let mut board = Board::new(3, 3);
        board.add_star("A", 1, 1, 1).unwrap();
        assert_eq!(board.add_wormhole("A", "A"), Ok(false));
        assert!(board.exits("A").unwrap().is_empty());
    }

    #[test]
    fn test_wormholes_listed_once() {
        let mut board = Board::new(4, 4);
        board.add_star("A", 1, 1, 0).unwrap();
        board.add_star("B", 2, 2, 0).unwrap();
        board.add_star("C", 3, 3, 0).unwrap();
        board.add_wormhole("C", "A").unwrap();
        board.add_wormhole("A", "B").unwrap();
        board.add_wormhole("B", "C").unwrap();

        let edges = board.wormholes();
        assert_eq!(edges.len(), 3);
        for (a, b) in &edges {
            assert!(a < b);
        }
    }

    #[test]
    fn test_overwriting_a_star_keeps_its_wormholes() {
        let mut board = Board::new(4, 4);
        board.add_star("Akkad", 2, 2, 3).unwrap();
        board.add_star("Kish", 1, 1, 0).unwrap();
        board.add_wormhole("Akkad", "Kish").unwrap();

        board.add_star("Sumer", 2, 2, 0).unwrap();

        assert_eq!(exit_names(&board, "Kish"), vec!["Sumer"]);
        assert_eq!(exit_names(&board, "Sumer"), vec!["Kish"]);
        assert_eq!(board.star("Akkad"), board.star("Sumer"));
    }

    #[test]
    fn test_cell_hex_uses_even_q_offset() {
        let board = Board::new(3, 3);
        let cell = board.cell(3, 1).unwrap();
        assert_eq!(cell.hex(), Hex::new(1, 2, -3));
    }

    #[test]
    fn test_every_exit_is_a_mirrored_board_cell() {
        let mut board = Board::new(5, 5);
        for (i, name) in ["A", "B", "C", "D"].into_iter().enumerate() {
            board.add_star(name, i + 1, i + 2, 0).unwrap();
        }
        board.add_star("E", 2, 3, 1).unwrap();
        board.add_star("A", 4, 1, 2).unwrap();
        for (a, b) in [("A", "B"), ("B", "E"), ("C", "D"), ("D", "A"), ("E", "C")] {
            board.add_wormhole(a, b).unwrap();
        }

        for (id, _, star) in board.stars() {
            for exit in star.exits() {
                let other = board.cell_by_id(*exit).and_then(|c| c.star.as_ref()).unwrap();
                assert!(other.exits().contains(&id), "{} is not mirrored", star.name);
            }
        }
        for (a, b) in board.wormholes() {
            assert!(board.cell_by_id(a).is_some());
            assert!(board.cell_by_id(b).is_some());
        }
    }
}
