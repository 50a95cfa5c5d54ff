#![allow(dead_code)]
//! Hex/node/edge identity and adjacency for a Catan board.
//!
//! Identifies hexes by axial coordinate and builds an explicit node/edge
//! graph at construction time, so the validator, reducer, and longest-road
//! solver never have to re-derive adjacency from coordinates at lookup
//! time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::harbors::{Harbor, HarborId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct HexId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u16);

/// Axial coordinate; cube distance = (|dx|+|dy|+|dx+dy|)/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Hills,
    Forest,
    Mountains,
    Fields,
    Pasture,
    Desert,
}

impl Terrain {
    pub fn produces(self) -> Option<super::super::domain::bank::Resource> {
        use super::super::domain::bank::Resource::*;
        match self {
            Terrain::Hills => Some(Brick),
            Terrain::Forest => Some(Lumber),
            Terrain::Mountains => Some(Ore),
            Terrain::Fields => Some(Grain),
            Terrain::Pasture => Some(Wool),
            Terrain::Desert => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hex {
    pub id: HexId,
    pub terrain: Terrain,
    pub number: Option<u8>,
    pub coord: Axial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub adjacent_hexes: Vec<HexId>,
    pub adjacent_edges: Vec<EdgeId>,
    pub adjacent_nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub endpoints: (NodeId, NodeId),
    pub adjacent_hexes: Vec<HexId>,
}

/// Immutable per-game board. Cheaply clonable (an `Arc<Board>` is typically
/// what's actually threaded through `GameState`); the geometry never
/// changes once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    hexes: Vec<Hex>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    harbors: Vec<Harbor>,
    coord_index: HashMap<(i32, i32), HexId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardMode {
    Standard,
    Extended,
}

impl Board {
    pub(super) fn from_parts(
        hexes: Vec<Hex>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        harbors: Vec<Harbor>,
    ) -> Self {
        let coord_index = hexes.iter().map(|h| ((h.coord.q, h.coord.r), h.id)).collect();
        Board {
            hexes,
            nodes,
            edges,
            harbors,
            coord_index,
        }
    }

    pub fn hex(&self, id: HexId) -> &Hex {
        &self.hexes[id.0 as usize]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0 as usize]
    }

    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn harbors(&self) -> &[Harbor] {
        &self.harbors
    }

    pub fn harbor_for_node(&self, node: NodeId) -> Option<&Harbor> {
        self.harbors.iter().find(|h| h.nodes.contains(&node))
    }

    pub fn hex_by_coord(&self, q: i32, r: i32) -> Option<&Hex> {
        self.coord_index.get(&(q, r)).map(|id| self.hex(*id))
    }

    pub fn hexes_for_token(&self, number: u8) -> impl Iterator<Item = &Hex> {
        self.hexes.iter().filter(move |h| h.number == Some(number))
    }

    /// The other endpoint of `edge` given one endpoint.
    pub fn other_endpoint(&self, edge: EdgeId, from: NodeId) -> NodeId {
        let e = self.edge(edge);
        if e.endpoints.0 == from {
            e.endpoints.1
        } else {
            e.endpoints.0
        }
    }

    pub fn edges_of_node(&self, node: NodeId) -> &[EdgeId] {
        &self.node(node).adjacent_edges
    }

    pub fn nodes_of_hex(&self, hex: HexId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.adjacent_hexes.contains(&hex))
            .map(|n| n.id)
            .collect()
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.node(a)
            .adjacent_edges
            .iter()
            .copied()
            .find(|&e| self.other_endpoint(e, a) == b)
    }

    pub fn neighbors_of_hex(&self, hex: HexId) -> Vec<HexId> {
        let coord = self.hex(hex).coord;
        AXIAL_DIRECTIONS
            .iter()
            .filter_map(|(dq, dr)| self.hex_by_coord(coord.q + dq, coord.r + dr))
            .map(|h| h.id)
            .collect()
    }
}

/// The six axial neighbor deltas, shared with `layout.rs`'s construction
/// code so hex adjacency and vertex/edge canonicalization agree.
pub const AXIAL_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

#[cfg(test)]
mod tests {
    use super::super::layout::build_board;
    use super::*;

    #[test]
    fn standard_board_has_54_nodes_and_72_edges() {
        let board = build_board(BoardMode::Standard, true, 1);
        assert_eq!(board.hexes().len(), 19);
        assert_eq!(board.nodes().len(), 54);
        assert_eq!(board.edges().len(), 72);
    }

    #[test]
    fn every_edge_has_exactly_two_endpoints() {
        let board = build_board(BoardMode::Standard, true, 1);
        for edge in board.edges() {
            assert_ne!(edge.endpoints.0, edge.endpoints.1);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = build_board(BoardMode::Standard, true, 1);
        for node in board.nodes() {
            for &neighbor in &node.adjacent_nodes {
                let back = &board.node(neighbor).adjacent_nodes;
                assert!(back.contains(&node.id), "adjacency not symmetric for {:?}", node.id);
            }
        }
    }

    #[test]
    fn number_token_absent_iff_desert() {
        let board = build_board(BoardMode::Standard, true, 1);
        for hex in board.hexes() {
            assert_eq!(hex.terrain == Terrain::Desert, hex.number.is_none());
        }
    }
}
