#![allow(dead_code)]
//! Constructs the node/edge graph for a board. Hexes are identified by
//! axial coordinate; a vertex or edge shared between neighboring hexes
//! needs a canonical identity that doesn't depend on which hex you
//! discovered it from, so this module derives node and edge ids from the
//! board's coordinate geometry directly, rather than keying them off a
//! single hex's local (direction, tile) pair.
//!
//! Canonicalization trick: for a hex at axial (q, r) -- cube (x, y, z) with
//! x=q, z=r, y=-x-z -- the vertex between direction i and direction i+1 is
//! always the set of (up to) three mutually-adjacent hex cube-coordinates
//! `{h, h+dir[i], h+dir[(i+1)%6]}`. That triple is identical no matter
//! which of the (up to 3) real hexes touching the vertex you compute it
//! from, so sorting the triple gives a canonical, float-free vertex key —
//! including for boundary vertices, where the "virtual" neighbor
//! coordinates just never appear as a real hex.

use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::geometry::{Axial, Board, BoardMode, Edge, EdgeId, Hex, HexId, Node, NodeId, Terrain, AXIAL_DIRECTIONS};
use super::harbors::{Harbor, HarborId, HarborKind};
use crate::rules_engine::domain::bank::Resource;

type CubeKey = (i32, i32, i32);

fn cube(q: i32, r: i32) -> CubeKey {
    (q, -q - r, r)
}

fn standard_cells() -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for q in -2i32..=2 {
        for r in -2i32..=2 {
            let s = -q - r;
            if q.abs() <= 2 && r.abs() <= 2 && s.abs() <= 2 {
                cells.push((q, r));
            }
        }
    }
    cells
}

/// 30-hex board: the standard 19-hex hexagon plus a contiguous arc of 11
/// cells from the radius-3 ring, giving the 5-6 player variant more room
/// without needing the full 37-cell radius-3 hexagon.
fn extended_cells() -> Vec<(i32, i32)> {
    let mut cells = standard_cells();
    let radius = 3;
    // Walk the radius-3 ring starting from dir[4] * radius, matching the
    // standard "hex ring" traversal.
    let (mut q, mut r) = (AXIAL_DIRECTIONS[4].0 * radius, AXIAL_DIRECTIONS[4].1 * radius);
    let mut ring = Vec::new();
    for dir in AXIAL_DIRECTIONS.iter() {
        for _ in 0..radius {
            ring.push((q, r));
            q += dir.0;
            r += dir.1;
        }
    }
    cells.extend(ring.into_iter().take(11));
    cells
}

fn beginner_terrain_order(count: usize) -> Vec<Terrain> {
    // Fixed spiral order matching the standard rulebook beginner layout for
    // 19 hexes; extended beyond that by simply repeating the standard
    // distribution's ratios for the 30-hex board.
    const BASE: [Terrain; 19] = [
        Terrain::Desert,
        Terrain::Forest,
        Terrain::Forest,
        Terrain::Forest,
        Terrain::Forest,
        Terrain::Pasture,
        Terrain::Pasture,
        Terrain::Pasture,
        Terrain::Pasture,
        Terrain::Fields,
        Terrain::Fields,
        Terrain::Fields,
        Terrain::Fields,
        Terrain::Hills,
        Terrain::Hills,
        Terrain::Hills,
        Terrain::Mountains,
        Terrain::Mountains,
        Terrain::Mountains,
    ];
    let mut terrains: Vec<Terrain> = BASE.to_vec();
    let mut i = 1usize; // skip re-adding desert
    while terrains.len() < count {
        terrains.push(BASE[1 + (i % (BASE.len() - 1))]);
        i += 1;
    }
    terrains.truncate(count.max(terrains.len()));
    terrains
}

fn standard_number_pool() -> Vec<u8> {
    vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12]
}

fn beginner_number_order(non_desert_count: usize) -> Vec<u8> {
    const BASE: [u8; 18] = [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];
    let mut nums = BASE.to_vec();
    let mut i = 0usize;
    while nums.len() < non_desert_count {
        nums.push(BASE[i % BASE.len()]);
        i += 1;
    }
    nums.truncate(non_desert_count);
    nums
}

fn terrain_multiset(hex_count: usize) -> Vec<Terrain> {
    // Ratios matching the standard 19-hex board (4 forest / 4 pasture /
    // 4 fields / 3 hills / 3 mountains / 1 desert), scaled up for larger
    // boards while always keeping exactly one desert per 19 hexes.
    let deserts = (hex_count / 19).max(1);
    let remaining = hex_count - deserts;
    let mut terrains = Vec::with_capacity(hex_count);
    let cycle = [
        Terrain::Forest,
        Terrain::Pasture,
        Terrain::Fields,
        Terrain::Hills,
        Terrain::Mountains,
    ];
    for i in 0..remaining {
        terrains.push(cycle[i % cycle.len()]);
    }
    for _ in 0..deserts {
        terrains.push(Terrain::Desert);
    }
    terrains
}

pub fn build_board(mode: BoardMode, use_beginner_layout: bool, seed: u64) -> Board {
    let cells = match mode {
        BoardMode::Standard => standard_cells(),
        BoardMode::Extended => extended_cells(),
    };
    let mut rng = StdRng::seed_from_u64(seed);

    let (terrains, numbers): (Vec<Terrain>, Vec<Option<u8>>) = if use_beginner_layout && mode == BoardMode::Standard {
        let terrains = beginner_terrain_order(cells.len());
        let mut number_iter = beginner_number_order(cells.len() - 1).into_iter();
        let numbers = terrains
            .iter()
            .map(|t| if *t == Terrain::Desert { None } else { number_iter.next() })
            .collect();
        (terrains, numbers)
    } else {
        let mut terrains = terrain_multiset(cells.len());
        shuffle(&mut rng, &mut terrains);
        let non_desert = terrains.iter().filter(|t| **t != Terrain::Desert).count();
        let mut pool = standard_number_pool();
        while pool.len() < non_desert {
            pool.extend(standard_number_pool());
        }
        pool.truncate(non_desert);
        shuffle(&mut rng, &mut pool);
        let mut pool_iter = pool.into_iter();
        let numbers = terrains
            .iter()
            .map(|t| if *t == Terrain::Desert { None } else { pool_iter.next() })
            .collect();
        (terrains, numbers)
    };

    let hexes: Vec<Hex> = cells
        .iter()
        .enumerate()
        .map(|(i, &(q, r))| Hex {
            id: HexId(i as u16),
            terrain: terrains[i],
            number: numbers[i],
            coord: Axial { q, r },
        })
        .collect();

    let coord_to_id: HashMap<(i32, i32), HexId> = hexes.iter().map(|h| ((h.coord.q, h.coord.r), h.id)).collect();

    let (nodes, node_hex_candidates) = build_nodes(&hexes);
    let edges = build_edges(&hexes, &nodes, &node_hex_candidates, &coord_to_id);
    let nodes = finalize_node_adjacency(nodes, &edges);
    let harbors = place_harbors(&nodes, &edges, &hexes, &coord_to_id, mode);

    Board::from_parts(hexes, nodes, edges, harbors)
}

fn shuffle<T>(rng: &mut StdRng, items: &mut [T]) {
    let len = items.len();
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds the deduplicated node list plus, for each node, the (up to 3)
/// candidate hex cube-coordinates that touch it (real or virtual — virtual
/// ones simply won't resolve to a `HexId` later).
fn build_nodes(hexes: &[Hex]) -> (Vec<Node>, Vec<[CubeKey; 3]>) {
    let mut key_to_index: HashMap<[CubeKey; 3], usize> = HashMap::new();
    let mut candidates: Vec<[CubeKey; 3]> = Vec::new();

    for hex in hexes {
        let h = cube(hex.coord.q, hex.coord.r);
        for i in 0..6 {
            let a = AXIAL_DIRECTIONS[i];
            let b = AXIAL_DIRECTIONS[(i + 1) % 6];
            let n1 = cube(hex.coord.q + a.0, hex.coord.r + a.1);
            let n2 = cube(hex.coord.q + b.0, hex.coord.r + b.1);
            let mut triangle = [h, n1, n2];
            triangle.sort();
            key_to_index.entry(triangle).or_insert_with(|| {
                candidates.push(triangle);
                candidates.len() - 1
            });
        }
    }

    let nodes = (0..candidates.len())
        .map(|i| Node {
            id: NodeId(i as u16),
            adjacent_hexes: Vec::new(),
            adjacent_edges: Vec::new(),
            adjacent_nodes: Vec::new(),
        })
        .collect();

    (nodes, candidates)
}

fn node_id_for_triangle(
    triangle_to_id: &HashMap<[CubeKey; 3], NodeId>,
    hex: &Hex,
    i: usize,
) -> NodeId {
    let h = cube(hex.coord.q, hex.coord.r);
    let a = AXIAL_DIRECTIONS[i];
    let b = AXIAL_DIRECTIONS[(i + 1) % 6];
    let n1 = cube(hex.coord.q + a.0, hex.coord.r + a.1);
    let n2 = cube(hex.coord.q + b.0, hex.coord.r + b.1);
    let mut triangle = [h, n1, n2];
    triangle.sort();
    *triangle_to_id.get(&triangle).expect("triangle must have been registered in build_nodes")
}

fn build_edges(
    hexes: &[Hex],
    nodes: &[Node],
    node_candidates: &[[CubeKey; 3]],
    coord_to_id: &HashMap<(i32, i32), HexId>,
) -> Vec<Edge> {
    let triangle_to_id: HashMap<[CubeKey; 3], NodeId> = node_candidates
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, NodeId(i as u16)))
        .collect();
    let _ = nodes;

    let mut edge_key_to_id: HashMap<(NodeId, NodeId), usize> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    for hex in hexes {
        let hex_id = coord_to_id[&(hex.coord.q, hex.coord.r)];
        let corner_ids: Vec<NodeId> = (0..6).map(|i| node_id_for_triangle(&triangle_to_id, hex, i)).collect();
        for i in 0..6 {
            let v0 = corner_ids[i];
            let v1 = corner_ids[(i + 1) % 6];
            let key = if v0.0 <= v1.0 { (v0, v1) } else { (v1, v0) };

            let other_dir = AXIAL_DIRECTIONS[(i + 1) % 6];
            let other_coord = (hex.coord.q + other_dir.0, hex.coord.r + other_dir.1);
            let other_hex = coord_to_id.get(&other_coord).copied();

            match edge_key_to_id.get(&key) {
                Some(&idx) => {
                    if let Some(other) = other_hex {
                        if !edges[idx].adjacent_hexes.contains(&other) {
                            edges[idx].adjacent_hexes.push(other);
                        }
                    }
                }
                None => {
                    let mut adjacent_hexes = vec![hex_id];
                    if let Some(other) = other_hex {
                        adjacent_hexes.push(other);
                    }
                    let id = EdgeId(edges.len() as u16);
                    edge_key_to_id.insert(key, edges.len());
                    edges.push(Edge {
                        id,
                        endpoints: (v0, v1),
                        adjacent_hexes,
                    });
                }
            }
        }
    }

    edges
}

fn finalize_node_adjacency(mut nodes: Vec<Node>, edges: &[Edge]) -> Vec<Node> {
    for edge in edges {
        let (a, b) = edge.endpoints;
        for &hex in &edge.adjacent_hexes {
            let node_a = &mut nodes[a.0 as usize];
            if !node_a.adjacent_hexes.contains(&hex) {
                node_a.adjacent_hexes.push(hex);
            }
            let node_b = &mut nodes[b.0 as usize];
            if !node_b.adjacent_hexes.contains(&hex) {
                node_b.adjacent_hexes.push(hex);
            }
        }
        nodes[a.0 as usize].adjacent_edges.push(edge.id);
        nodes[b.0 as usize].adjacent_edges.push(edge.id);
        nodes[a.0 as usize].adjacent_nodes.push(b);
        nodes[b.0 as usize].adjacent_nodes.push(a);
    }
    nodes
}

/// Coastal nodes are those touching fewer than 3 hexes (an interior vertex
/// always touches exactly 3). Harbors sit on a deterministic, evenly-spaced
/// subset of coastal edges rather than an arbitrary fixed pair of nodes.
fn place_harbors(
    nodes: &[Node],
    edges: &[Edge],
    hexes: &[Hex],
    coord_to_id: &HashMap<(i32, i32), HexId>,
    mode: BoardMode,
) -> Vec<Harbor> {
    let _ = hexes;
    let _ = coord_to_id;
    let coastal_edges: Vec<&Edge> = edges.iter().filter(|e| e.adjacent_hexes.len() == 1).collect();
    let harbor_count = match mode {
        BoardMode::Standard => 9,
        BoardMode::Extended => 11,
    };
    let stride = (coastal_edges.len() / harbor_count).max(1);

    let kinds = [
        HarborKind::Generic3to1,
        HarborKind::Specific2to1(Resource::Brick),
        HarborKind::Generic3to1,
        HarborKind::Specific2to1(Resource::Lumber),
        HarborKind::Generic3to1,
        HarborKind::Specific2to1(Resource::Ore),
        HarborKind::Generic3to1,
        HarborKind::Specific2to1(Resource::Grain),
        HarborKind::Specific2to1(Resource::Wool),
        HarborKind::Generic3to1,
        HarborKind::Generic3to1,
    ];

    let mut harbors = Vec::new();
    let mut idx = 0usize;
    for i in 0..harbor_count {
        if idx >= coastal_edges.len() {
            break;
        }
        let edge = coastal_edges[idx];
        let (a, b) = edge.endpoints;
        harbors.push(Harbor {
            id: HarborId(i as u16),
            kind: kinds[i % kinds.len()],
            nodes: vec![a, b],
        });
        idx += stride;
    }
    let _ = nodes;
    harbors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_board_has_30_hexes() {
        let board = build_board(BoardMode::Extended, false, 5);
        assert_eq!(board.hexes().len(), 30);
    }

    #[test]
    fn beginner_layout_is_deterministic() {
        let a = build_board(BoardMode::Standard, true, 1);
        let b = build_board(BoardMode::Standard, true, 2);
        let terrains_a: Vec<_> = a.hexes().iter().map(|h| h.terrain).collect();
        let terrains_b: Vec<_> = b.hexes().iter().map(|h| h.terrain).collect();
        assert_eq!(terrains_a, terrains_b, "beginner layout must not depend on seed");
    }

    #[test]
    fn random_layout_is_seed_deterministic() {
        let a = build_board(BoardMode::Standard, false, 123);
        let b = build_board(BoardMode::Standard, false, 123);
        let terrains_a: Vec<_> = a.hexes().iter().map(|h| h.terrain).collect();
        let terrains_b: Vec<_> = b.hexes().iter().map(|h| h.terrain).collect();
        assert_eq!(terrains_a, terrains_b);
    }

    #[test]
    fn harbors_placed_on_coastal_nodes() {
        let board = build_board(BoardMode::Standard, true, 1);
        for harbor in board.harbors() {
            for &node in &harbor.nodes {
                assert!(board.node(node).adjacent_hexes.len() < 3, "harbor node must be coastal");
            }
        }
    }
}
