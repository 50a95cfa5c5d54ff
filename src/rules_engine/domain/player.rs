#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::bank::{DevCardType, ResourceBundle};
use crate::rules_engine::board::geometry::{EdgeId, NodeId};

pub type PlayerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevCardInstance {
    pub id: u32,
    pub kind: DevCardType,
    pub played: bool,
    pub bought_this_turn: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub color: String,
    pub turn_order: u8,
    pub resources: ResourceBundle,
    pub dev_cards: Vec<DevCardInstance>,
    pub settlements: HashSet<NodeId>,
    pub cities: HashSet<NodeId>,
    pub roads: HashSet<EdgeId>,
    pub knights_played: u32,
    pub bought_dev_this_turn: bool,
    pub played_dev_this_turn: bool,
    pub longest_road_length: u32,
}

pub const MAX_SETTLEMENTS: usize = 5;
pub const MAX_CITIES: usize = 4;
pub const MAX_ROADS: usize = 15;

impl Player {
    pub fn new(id: PlayerId, display_name: String, color: String, turn_order: u8) -> Self {
        Player {
            id,
            display_name,
            color,
            turn_order,
            resources: ResourceBundle::new(),
            dev_cards: Vec::new(),
            settlements: HashSet::new(),
            cities: HashSet::new(),
            roads: HashSet::new(),
            knights_played: 0,
            bought_dev_this_turn: false,
            played_dev_this_turn: false,
            longest_road_length: 0,
        }
    }

    pub fn settlements_remaining(&self) -> usize {
        MAX_SETTLEMENTS - self.settlements.len()
    }

    pub fn cities_remaining(&self) -> usize {
        MAX_CITIES - self.cities.len()
    }

    pub fn roads_remaining(&self) -> usize {
        MAX_ROADS - self.roads.len()
    }

    pub fn victory_points(&self, include_hidden: bool) -> u32 {
        let buildings = self.settlements.len() as u32 + self.cities.len() as u32 * 2;
        let dev_vp = self
            .dev_cards
            .iter()
            .filter(|c| matches!(c.kind, DevCardType::VictoryPoint))
            .filter(|c| include_hidden || c.played)
            .count() as u32;
        buildings + dev_vp
    }

    pub fn unplayed_dev_card(&self, kind: DevCardType) -> Option<&DevCardInstance> {
        self.dev_cards
            .iter()
            .find(|c| c.kind == kind && !c.played && !c.bought_this_turn)
    }

    pub fn reset_turn_flags(&mut self) {
        self.bought_dev_this_turn = false;
        self.played_dev_this_turn = false;
        for card in &mut self.dev_cards {
            card.bought_this_turn = false;
        }
    }
}
