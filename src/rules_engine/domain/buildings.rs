#![allow(dead_code)]
//! O(1) lookup tables for who owns which node/edge, kept in sync by the
//! reducer and event applier rather than scanning every player's
//! settlement/city/road sets on each query.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::player::PlayerId;
use crate::rules_engine::board::geometry::{EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Settlement,
    City,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Buildings {
    pub nodes: HashMap<NodeId, (BuildingKind, PlayerId)>,
    pub edges: HashMap<EdgeId, PlayerId>,
}

impl Buildings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_owner(&self, node: NodeId) -> Option<&PlayerId> {
        self.nodes.get(&node).map(|(_, owner)| owner)
    }

    pub fn edge_owner(&self, edge: EdgeId) -> Option<&PlayerId> {
        self.edges.get(&edge)
    }

    pub fn place_settlement(&mut self, node: NodeId, player: PlayerId) {
        self.nodes.insert(node, (BuildingKind::Settlement, player));
    }

    pub fn upgrade_to_city(&mut self, node: NodeId) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.0 = BuildingKind::City;
        }
    }

    pub fn place_road(&mut self, edge: EdgeId, player: PlayerId) {
        self.edges.insert(edge, player);
    }
}
