//! Map descriptions: the list of stars and warps a board is built from.
//!
//! A `MapRequest` arrives as JSON, as CSV lines, or is the built-in standard
//! map. [`MapRequest::validate`] enforces the input limits before any board is
//! allocated, and [`MapRequest::build_board`] places every star and then every
//! wormhole.

use crate::board::{Board, BoardError};
use crate::svg::{Palette, Renderer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Most stars a single map may contain
pub const MAX_NODES: usize = 40;

/// Largest row or column a star may be placed at
pub const MAX_COORD: u32 = 40;

/// Reasons a map description is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MapError {
    #[error("missing map data")]
    MissingMapData,

    #[error("maximum number of nodes is {max}, got {count}")]
    TooManyNodes { count: usize, max: usize },

    #[error("col and row must be between 1 and {max}: {name:?} is at col {col}, row {row}")]
    OutOfRange {
        name: String,
        col: u32,
        row: u32,
        max: u32,
    },

    #[error("node {index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate star name: {0:?}")]
    DuplicateName(String),

    #[error("line {line}: {reason}")]
    Csv { line: usize, reason: String },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One star in a map description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapNode {
    pub name: String,
    pub col: u32,
    pub row: u32,
    #[serde(rename = "econ-value", default)]
    pub econ_value: u32,
    /// Names of the stars this one has wormholes to
    #[serde(default)]
    pub warps: Vec<String>,
}

impl MapNode {
    pub fn new(name: impl Into<String>, col: u32, row: u32, econ_value: u32, warps: &[&str]) -> Self {
        Self {
            name: name.into(),
            col,
            row,
            econ_value,
            warps: warps.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// A complete map description plus the palette choice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapRequest {
    #[serde(default)]
    pub mono: bool,
    #[serde(default)]
    pub nodes: Vec<MapNode>,
}

impl MapRequest {
    pub fn new(nodes: Vec<MapNode>, mono: bool) -> Self {
        Self { mono, nodes }
    }

    /// Parse a JSON map description
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse CSV records of the form `name,col,row,econValue,warp1,warp2,...`.
    ///
    /// Fields may be quoted and are trimmed. Blank lines and empty warp fields
    /// are skipped.
    pub fn from_csv(text: &str, mono: bool) -> Result<Self, MapError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let mut nodes = Vec::new();

        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| MapError::Csv {
                line: e.position().map_or(i + 1, |p| p.line() as usize),
                reason: e.to_string(),
            })?;
            let line_no = record.position().map_or(i + 1, |p| p.line() as usize);

            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() < 4 {
                return Err(MapError::Csv {
                    line: line_no,
                    reason: format!("expected at least 4 fields, got {}", record.len()),
                });
            }

            let number = |field: &str, what: &str| {
                field.parse::<u32>().map_err(|_| MapError::Csv {
                    line: line_no,
                    reason: format!("{what} must be a non-negative integer, got {field:?}"),
                })
            };

            nodes.push(MapNode {
                name: record[0].to_string(),
                col: number(&record[1], "col")?,
                row: number(&record[2], "row")?,
                econ_value: number(&record[3], "econ value")?,
                warps: record
                    .iter()
                    .skip(4)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            });
        }

        Ok(Self { mono, nodes })
    }

    /// Check the input limits without building anything
    pub fn validate(&self) -> Result<(), MapError> {
        if self.nodes.is_empty() {
            return Err(MapError::MissingMapData);
        }
        if self.nodes.len() > MAX_NODES {
            return Err(MapError::TooManyNodes {
                count: self.nodes.len(),
                max: MAX_NODES,
            });
        }

        let mut seen = HashSet::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.name.trim().is_empty() {
                return Err(MapError::EmptyName { index });
            }
            if !(1..=MAX_COORD).contains(&node.col) || !(1..=MAX_COORD).contains(&node.row) {
                return Err(MapError::OutOfRange {
                    name: node.name.clone(),
                    col: node.col,
                    row: node.row,
                    max: MAX_COORD,
                });
            }
            if !seen.insert(node.name.as_str()) {
                return Err(MapError::DuplicateName(node.name.clone()));
            }
        }

        Ok(())
    }

    /// Validate, then place every star and every wormhole.
    ///
    /// All stars go in before any wormhole, so warps may name stars listed later.
    pub fn build_board(&self) -> Result<Board, MapError> {
        self.validate()?;

        let max_row = self.nodes.iter().map(|n| n.row).max().unwrap_or(0);
        let max_col = self.nodes.iter().map(|n| n.col).max().unwrap_or(0);
        let mut board = Board::new(max_row as usize, max_col as usize);

        for node in &self.nodes {
            board.add_star(node.name.clone(), node.row as usize, node.col as usize, node.econ_value)?;
        }

        let mut added = 0;
        for node in &self.nodes {
            for target in &node.warps {
                if board.add_wormhole(&node.name, target)? {
                    added += 1;
                }
            }
        }

        debug!(
            stars = self.nodes.len(),
            wormholes = added,
            rows = board.rows(),
            cols = board.cols(),
            "built board"
        );
        Ok(board)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_mono(self.mono)
    }

    /// Build the board and render it as an SVG document
    pub fn render_svg(&self) -> Result<String, MapError> {
        let board = self.build_board()?;
        Ok(Renderer::new(self.palette()).render_svg(&board))
    }

    /// Build the board and render it inside an HTML page
    pub fn render_html(&self) -> Result<String, MapError> {
        let board = self.build_board()?;
        Ok(Renderer::new(self.palette()).render_html(&board))
    }

    /// The built-in map used when no star list is supplied.
    ///
    /// Akkad and Sumer share a cell; Sumer is placed last and takes it over.
    pub fn standard() -> Self {
        let nodes = vec![
            MapNode::new("Adab", 10, 11, 0, &["Erech", "Khafa", "Byblos"]),
            MapNode::new("Akkad", 19, 20, 3, &["Kish"]),
            MapNode::new("Assur", 17, 11, 2, &["Nippur", "Lagash"]),
            MapNode::new("Babylon", 22, 23, 4, &["Sumer"]),
            MapNode::new("Byblos", 8, 13, 3, &["Adab"]),
            MapNode::new("Calah", 9, 8, 1, &["Nippur"]),
            MapNode::new("Elam", 16, 16, 5, &["Lagash"]),
            MapNode::new("Erech", 7, 10, 3, &["Ur", "Adab"]),
            MapNode::new("Eridu", 23, 17, 1, &["Kish", "Ugarit"]),
            MapNode::new("Girsu", 18, 16, 1, &["Umma"]),
            MapNode::new("Jarmo", 18, 14, 3, &["Kish"]),
            MapNode::new("Isin", 16, 22, 1, &["Nineveh"]),
            MapNode::new("Khafa", 13, 12, 2, &["Adab"]),
            MapNode::new("Kish", 20, 18, 0, &["Jarmo", "Eridu"]),
            MapNode::new("Lagash", 15, 14, 1, &["Assur"]),
            MapNode::new("Larsu", 8, 4, 2, &["Susa"]),
            MapNode::new("Mari", 14, 14, 1, &["Ubaid", "Umma"]),
            MapNode::new("Mosul", 3, 7, 2, &["Sippur"]),
            MapNode::new("Nineveh", 21, 25, 2, &["Isin"]),
            MapNode::new("Nippur", 13, 10, 1, &["Calah", "Susa", "Assur", "Lagash"]),
            MapNode::new("Sippur", 6, 1, 1, &["Mosul"]),
            MapNode::new("Sumarra", 13, 19, 2, &["Ubaid", "Umma"]),
            MapNode::new("Sumer", 19, 20, 0, &["Umma", "Babylon"]),
            MapNode::new("Susa", 12, 7, 0, &["Larsu", "Nippur"]),
            MapNode::new("Ubaid", 10, 14, 5, &["Mari", "Sumarra"]),
            MapNode::new("Ugarit", 26, 22, 2, &["Eridu"]),
            MapNode::new("Umma", 16, 19, 2, &["Sumarra", "Mari", "Girsu", "Sumer"]),
            MapNode::new("Ur", 6, 6, 4, &["Erech"]),
        ];
        Self { mono: false, nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> MapRequest {
        MapRequest::new(
            vec![
                MapNode::new("A", 1, 1, 2, &["B"]),
                MapNode::new("B", 2, 1, 0, &["A"]),
            ],
            false,
        )
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "mono": true,
            "nodes": [
                { "name": "A", "col": 1, "row": 1, "econ-value": 2, "warps": ["B"] },
                { "name": "B", "col": 2, "row": 1, "econ-value": 0 }
            ]
        }"#;
        let request = MapRequest::from_json(json).unwrap();

        assert!(request.mono);
        assert_eq!(request.nodes[0], MapNode::new("A", 1, 1, 2, &["B"]));
        assert_eq!(request.nodes[1].warps, Vec::<String>::new());
    }

    #[test]
    fn test_from_json_rejects_unknown_fields_and_negatives() {
        assert!(MapRequest::from_json(r#"{"nodes": [], "extra": 1}"#).is_err());
        assert!(MapRequest::from_json(
            r#"{"nodes": [{"name": "A", "col": -1, "row": 1, "econ-value": 0}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_from_csv() {
        let csv = "A, 1, 1, 2, B, \n\n B,2,1,0,A,,\nC,3,3,1\n";
        let request = MapRequest::from_csv(csv, true).unwrap();

        assert_eq!(
            request,
            MapRequest::new(
                vec![
                    MapNode::new("A", 1, 1, 2, &["B"]),
                    MapNode::new("B", 2, 1, 0, &["A"]),
                    MapNode::new("C", 3, 3, 1, &[]),
                ],
                true,
            )
        );
    }

    #[test]
    fn test_from_csv_quoted_fields() {
        let csv = "\"Te Brak\",1,1,0,Ur,\"Tell, North\"\nUr,3,1,2,\"Te Brak\"\n\"Tell, North\",5,5,1,\"Te Brak\"\n";
        let request = MapRequest::from_csv(csv, false).unwrap();

        assert_eq!(
            request.nodes,
            vec![
                MapNode::new("Te Brak", 1, 1, 0, &["Ur", "Tell, North"]),
                MapNode::new("Ur", 3, 1, 2, &["Te Brak"]),
                MapNode::new("Tell, North", 5, 5, 1, &["Te Brak"]),
            ]
        );
        assert!(request.build_board().is_ok());
    }

    #[test]
    fn test_from_csv_reports_line() {
        let err = MapRequest::from_csv("A,1,1,0\nB,x,1,0\n", false).unwrap_err();
        assert!(matches!(err, MapError::Csv { line: 2, .. }), "{err:?}");

        let err = MapRequest::from_csv("A,1\n", false).unwrap_err();
        assert!(matches!(err, MapError::Csv { line: 1, .. }), "{err:?}");
    }

    #[test]
    fn test_validate_limits() {
        assert_eq!(MapRequest::default().validate(), Err(MapError::MissingMapData));

        let many = MapRequest::new(
            (0..41)
                .map(|i| MapNode::new(format!("S{i}"), 1 + i % 40, 1, 0, &[]))
                .collect(),
            false,
        );
        assert_eq!(
            many.validate(),
            Err(MapError::TooManyNodes { count: 41, max: 40 })
        );

        for (col, row) in [(0, 1), (1, 0), (41, 1), (1, 41)] {
            let request = MapRequest::new(vec![MapNode::new("A", col, row, 0, &[])], false);
            assert!(matches!(request.validate(), Err(MapError::OutOfRange { .. })));
        }

        let edge = MapRequest::new(vec![MapNode::new("A", 40, 40, 0, &[])], false);
        assert_eq!(edge.validate(), Ok(()));
    }

    #[test]
    fn test_validate_names() {
        let blank = MapRequest::new(vec![MapNode::new("  ", 1, 1, 0, &[])], false);
        assert_eq!(blank.validate(), Err(MapError::EmptyName { index: 0 }));

        let twice = MapRequest::new(
            vec![MapNode::new("A", 1, 1, 0, &[]), MapNode::new("A", 2, 2, 0, &[])],
            false,
        );
        assert_eq!(twice.validate(), Err(MapError::DuplicateName("A".to_string())));
    }

    #[test]
    fn test_build_board() {
        let board = pair().build_board().unwrap();
        assert_eq!((board.rows(), board.cols()), (3, 4));
        assert_eq!(board.star_count(), 2);
        assert_eq!(board.wormholes().len(), 1);
    }

    #[test]
    fn test_build_board_unknown_warp() {
        let request = MapRequest::new(vec![MapNode::new("A", 1, 1, 0, &["Ghost"])], false);
        assert_eq!(
            request.build_board().unwrap_err(),
            MapError::Board(BoardError::StarNotFound("Ghost".to_string()))
        );
    }

    #[test]
    fn test_standard_map_builds() {
        let standard = MapRequest::standard();
        assert_eq!(standard.nodes.len(), 28);

        let board = standard.build_board().unwrap();
        assert_eq!((board.rows(), board.cols()), (27, 28));
        // Akkad is covered by Sumer
        assert_eq!(board.star_count(), 27);
        assert_eq!(board.star("Akkad").and_then(|c| c.name()), Some("Sumer"));
    }

    #[test]
    fn test_render_uses_palette() {
        let mut request = pair();
        request.mono = true;
        let svg = request.render_svg().unwrap();
        assert!(svg.contains("fill: White"));
        assert!(!svg.contains("hsl(197, 78%, 85%)"));
    }
}
