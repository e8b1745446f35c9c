//! Random star map generation.
//!
//! Stars are scattered over a fixed 20 × 20 area so that no two stars touch,
//! then each star tries to open wormholes to its nearest neighbors.

use crate::map::{MapNode, MapRequest, MAX_NODES};
use rand::seq::SliceRandom;
use rand::Rng;

/// Width and height of the area random stars are placed in
pub const RANDOM_MAP_SIZE: u32 = 20;

/// Most wormholes a generated star gets
const MAX_WARPS: usize = 4;

/// How many of the nearest stars are considered for wormholes
const NEAREST: usize = 4;

const STAR_NAMES: &[&str] = &[
    "Afak", "Agrab", "Akkad", "Al-Diniye", "Al-Esotam", "Al-Hafriyat", "Annah", "Arbela", "Arbīl",
    "Arrapkha", "Ashur", "Assur", "Athína", "Awan", "Babil", "Babylon", "Baghdad", "Borsippa",
    "Corinth", "Kurigalzu", "El-Ana", "El-Is", "En-Aasar", "En-Amitat", "En-Shubat", "Erech",
    "Erétria", "Eshnunna", "Gubba", "Hafriyat", "Haradum", "Hillah", "Kassite", "Khirbit",
    "Khūzestān", "Kirkūk", "Kutha", "Kórinthos", "Lagash", "Mari", "Mashkan", "Nagar", "Neribtum",
    "Nimrud", "Nineveh", "Nippur", "Nuffar", "Nuzi", "Opis", "Ramad", "Rapiqum", "Riblah", "Ródos",
    "Shaduppum", "Shapir", "Shushan", "Shūsh", "Sippar", "Siracusa", "Sirpurla", "Sparta", "Spárti",
    "Susa", "Tayma", "Te Ashyia", "Te Brak", "Te Ishchali", "Te Leilan", "Thebes", "Thíva",
    "Tuttul", "Tutub", "Umm", "Uqair", "Ur", "Urhai", "Urkesh", "Uruk", "Árgos", "Égina",
    "Şanlıurfa",
];

/// Economic value between 0 and 5, higher values being rarer
fn random_econ_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    match rng.gen_range(0..23) {
        0 => 5,
        1..=2 => 4,
        3..=6 => 3,
        7..=12 => 2,
        13..=20 => 1,
        _ => 0,
    }
}

/// Generate a random monochrome map that always passes validation
pub fn random_map<R: Rng + ?Sized>(rng: &mut R) -> MapRequest {
    let mut names: Vec<&str> = STAR_NAMES.to_vec();
    names.shuffle(rng);
    let mut names = names.into_iter();

    let size = RANDOM_MAP_SIZE as usize;
    // one spare cell on every side so the neighbor check never underflows
    let mut occupied = vec![vec![false; size + 2]; size + 2];
    let mut nodes: Vec<MapNode> = Vec::new();

    'placing: for col in 1..=size {
        for row in 1..=size {
            if nodes.len() == MAX_NODES {
                break 'placing;
            }
            // one in twelve cells holds a star
            if rng.gen_range(0..12) != 1 {
                continue;
            }
            let crowded = (col - 1..=col + 1)
                .any(|c| (row - 1..=row + 1).any(|r| occupied[c][r]));
            if crowded {
                continue;
            }

            occupied[col][row] = true;
            let name = match names.next() {
                Some(name) => name.to_string(),
                None => format!("N{col:02}{row:02}"),
            };
            nodes.push(MapNode {
                name,
                col: col as u32,
                row: row as u32,
                econ_value: random_econ_value(rng),
                warps: Vec::new(),
            });
        }
    }

    if nodes.is_empty() {
        let center = RANDOM_MAP_SIZE / 2;
        nodes.push(MapNode::new("Nippur", center, center, random_econ_value(rng), &[]));
    }

    let links = random_links(&nodes, rng);
    let star_names: Vec<String> = nodes.iter().map(|n| n.name.clone()).collect();
    for (node, targets) in nodes.iter_mut().zip(&links) {
        node.warps = targets.iter().map(|&t| star_names[t].clone()).collect();
    }

    MapRequest::new(nodes, true)
}

/// Pick wormholes between `nodes`, returned as symmetric adjacency lists of indices.
///
/// Each star gets a one in four chance of a wormhole to each of its nearest
/// stars, as long as neither end is full. A star left without any wormhole is
/// forced onto the nearest star that still has room.
fn random_links<R: Rng + ?Sized>(nodes: &[MapNode], rng: &mut R) -> Vec<Vec<usize>> {
    let mut links: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

    for n in 0..nodes.len() {
        let mut nearest: Vec<usize> = (0..nodes.len()).filter(|&x| x != n).collect();
        nearest.sort_by_key(|&x| squared_distance(&nodes[n], &nodes[x]));

        for &x in nearest.iter().take(NEAREST) {
            if links[n].len() >= MAX_WARPS {
                break;
            }
            if links[x].len() < MAX_WARPS && !links[n].contains(&x) && rng.gen_range(0..4) == 1 {
                links[n].push(x);
                links[x].push(n);
            }
        }

        if links[n].is_empty() {
            if let Some(&x) = nearest.iter().find(|&&x| links[x].len() < MAX_WARPS) {
                links[n].push(x);
                links[x].push(n);
            }
        }
    }

    links
}

fn squared_distance(a: &MapNode, b: &MapNode) -> i64 {
    let dc = i64::from(a.col) - i64::from(b.col);
    let dr = i64::from(a.row) - i64::from(b.row);
    dc * dc + dr * dr
}
