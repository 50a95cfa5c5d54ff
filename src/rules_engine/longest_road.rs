#![allow(dead_code)]
//! DFS-based longest simple path over a player's road graph, with opponent
//! buildings removed as blockers at the shared endpoint.

use std::collections::HashMap;

use super::board::{Board, EdgeId, NodeId};
use super::domain::buildings::Buildings;
use super::domain::player::PlayerId;

/// Length of `player`'s longest contiguous road chain, honoring opponent
/// settlements/cities as chain breaks.
pub fn longest_road_length(board: &Board, buildings: &Buildings, player: &PlayerId, roads: &[EdgeId]) -> u32 {
    if roads.is_empty() {
        return 0;
    }

    // Build adjacency between the player's own edges: two edges are
    // adjacent iff they share an endpoint not occupied by an opponent.
    let mut node_to_edges: HashMap<NodeId, Vec<EdgeId>> = HashMap::new();
    for &edge in roads {
        let (a, b) = board.edge(edge).endpoints;
        if !blocks(buildings, player, a) {
            node_to_edges.entry(a).or_default().push(edge);
        }
        if !blocks(buildings, player, b) {
            node_to_edges.entry(b).or_default().push(edge);
        }
    }

    let mut best = 0u32;
    for &start in roads {
        let mut seen = std::collections::HashSet::new();
        seen.insert(start);
        best = best.max(dfs(board, &node_to_edges, start, seen, 1));
    }
    best
}

fn blocks(buildings: &Buildings, player: &PlayerId, node: NodeId) -> bool {
    match buildings.node_owner(node) {
        Some(owner) => owner != player,
        None => false,
    }
}

fn dfs(
    board: &Board,
    node_to_edges: &HashMap<NodeId, Vec<EdgeId>>,
    current: EdgeId,
    visited: std::collections::HashSet<EdgeId>,
    depth: u32,
) -> u32 {
    let (a, b) = board.edge(current).endpoints;
    let mut best = depth;
    for &endpoint in &[a, b] {
        if let Some(candidates) = node_to_edges.get(&endpoint) {
            for &next in candidates {
                if visited.contains(&next) {
                    continue;
                }
                let mut next_visited = visited.clone();
                next_visited.insert(next);
                best = best.max(dfs(board, node_to_edges, next, next_visited, depth + 1));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules_engine::board::{build_board, BoardMode};

    #[test]
    fn empty_roads_have_zero_length() {
        let board = build_board(BoardMode::Standard, true, 1);
        let buildings = Buildings::new();
        let len = longest_road_length(&board, &buildings, &"p1".to_string(), &[]);
        assert_eq!(len, 0);
    }

    /// Grows a connected chain of `len` edges by repeatedly stepping to an
    /// unvisited edge touching the current tail node, using the board's own
    /// adjacency data rather than assuming any particular corner ordering.
    fn grow_chain(board: &Board, len: usize) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let mut visited_nodes = std::collections::HashSet::new();
        let first_edge = board.edges()[0].id;
        let (mut tail, start) = board.edge(first_edge).endpoints;
        visited_nodes.insert(tail);
        visited_nodes.insert(start);
        tail = start;
        edges.push(first_edge);
        while edges.len() < len {
            let next = board
                .edges_of_node(tail)
                .iter()
                .copied()
                .find(|&e| !edges.contains(&e))
                .expect("board is large enough to grow the requested chain length");
            let other = board.other_endpoint(next, tail);
            edges.push(next);
            visited_nodes.insert(other);
            tail = other;
        }
        edges
    }

    #[test]
    fn a_chain_of_connected_roads_counts_every_edge() {
        let board = build_board(BoardMode::Standard, true, 1);
        let buildings = Buildings::new();
        let edges = grow_chain(&board, 4);
        let len = longest_road_length(&board, &buildings, &"p1".to_string(), &edges);
        assert_eq!(len as usize, edges.len());
    }

    #[test]
    fn opponent_settlement_breaks_the_chain() {
        let board = build_board(BoardMode::Standard, true, 1);
        let mut buildings = Buildings::new();
        let edges = grow_chain(&board, 4);
        // Block the shared node between the 2nd and 3rd edge with an
        // opponent settlement.
        let shared = {
            let (a2, b2) = board.edge(edges[1]).endpoints;
            let (a3, b3) = board.edge(edges[2]).endpoints;
            [a2, b2].into_iter().find(|n| *n == a3 || *n == b3).unwrap()
        };
        buildings.place_settlement(shared, "opponent".to_string());
        let len = longest_road_length(&board, &buildings, &"p1".to_string(), &edges);
        assert!(len < edges.len() as u32);
    }
}
