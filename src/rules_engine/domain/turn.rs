#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::bank::ResourceBundle;
use super::player::PlayerId;
use crate::rules_engine::board::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    PreRoll,
    Discarding,
    MovingRobber,
    Stealing,
    Main,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupState {
    pub round: u8, // 1 or 2
    pub order_index: usize,
    pub direction: SetupDirection,
    pub awaiting_road: bool,
    pub last_settlement_node: Option<NodeId>,
}

impl SetupState {
    pub fn new() -> Self {
        SetupState {
            round: 1,
            order_index: 0,
            direction: SetupDirection::Forward,
            awaiting_road: false,
            last_settlement_node: None,
        }
    }
}

/// 5-6 player variant: a turn belongs to two players, with a marker
/// deciding which one may currently act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedTurnState {
    pub player_one: PlayerId,
    pub player_two: PlayerId,
    pub marker_holder: PlayerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeProposal {
    pub id: u32,
    pub proposer: PlayerId,
    pub offered: ResourceBundle,
    pub requested: ResourceBundle,
    pub target_players: Option<HashSet<PlayerId>>,
    pub accepters: HashSet<PlayerId>,
    pub rejecters: HashSet<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub phase: Phase,
    pub active_player: PlayerId,
    pub turn_number: u32,
    pub last_roll: Option<(u8, u8)>,
    pub players_owing_discard: HashSet<PlayerId>,
    pub steal_candidates: Vec<PlayerId>,
    pub open_trades: Vec<TradeProposal>,
    pub road_building_roads_remaining: u8,
    pub setup: Option<SetupState>,
    pub paired: Option<PairedTurnState>,
    pub next_trade_id: u32,
}

impl Turn {
    pub fn new_setup(first_player: PlayerId) -> Self {
        Turn {
            phase: Phase::Setup,
            active_player: first_player,
            turn_number: 0,
            last_roll: None,
            players_owing_discard: HashSet::new(),
            steal_candidates: Vec::new(),
            open_trades: Vec::new(),
            road_building_roads_remaining: 0,
            setup: Some(SetupState::new()),
            paired: None,
            next_trade_id: 1,
        }
    }

    pub fn allocate_trade_id(&mut self) -> u32 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }
}
