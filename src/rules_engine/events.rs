#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::board::{EdgeId, HexId, NodeId};
use super::domain::bank::{DevCardType, Resource, ResourceBundle};
use super::domain::player::PlayerId;

/// One resource credit from one hex to one player, used inside
/// `ResourcesProduced` so clients can render "2 grain from hex 4".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionItem {
    pub player: PlayerId,
    pub hex: HexId,
    pub resource: Resource,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoProductionReason {
    RolledSeven,
    NoMatchingBuildings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonopolyTransfer {
    pub victim: PlayerId,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictoryBreakdown {
    pub settlements: u32,
    pub cities: u32,
    pub dev_card_points: u32,
    pub longest_road_bonus: u32,
    pub largest_army_bonus: u32,
}

/// Every observable state change the reducer can emit. Carries every datum
/// the event applier needs, so replaying a log never needs to consult RNG
/// or re-derive a value the reducer already computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SetupSettlementPlaced { player: PlayerId, node: NodeId },
    SetupRoadPlaced { player: PlayerId, edge: EdgeId },
    SetupResourcesGiven { player: PlayerId, items: Vec<(HexId, Resource)> },
    SetupTurnAdvanced { next_player: PlayerId },
    SetupPhaseEnded,

    DiceRolled { player: PlayerId, d1: u8, d2: u8, total: u8 },
    NoResourcesProduced { reason: NoProductionReason, dice_total: u8 },
    ResourcesProduced { dice_total: u8, items: Vec<ProductionItem> },
    DiscardRequired { players: Vec<(PlayerId, u32)> },
    ResourcesDiscarded { player: PlayerId, discarded: ResourceBundle },

    RobberMoved { player: PlayerId, hex: HexId, eligible_victims: Vec<PlayerId> },
    ResourceStolen { thief: PlayerId, victim: PlayerId, resource: Resource },
    NoStealPossible { player: PlayerId, hex: HexId },

    RoadBuilt { player: PlayerId, edge: EdgeId },
    SettlementBuilt { player: PlayerId, node: NodeId },
    CityBuilt { player: PlayerId, node: NodeId },
    LongestRoadAwarded {
        new_holder: PlayerId,
        previous_holder: Option<PlayerId>,
        road_length: u32,
    },
    LargestArmyAwarded {
        new_holder: PlayerId,
        previous_holder: Option<PlayerId>,
        knight_count: u32,
    },

    DevelopmentCardBought { player: PlayerId, card_type: DevCardType },
    KnightPlayed { player: PlayerId },
    RoadBuildingPlayed { player: PlayerId, free_roads: u8 },
    RoadBuildingRoadPlaced { player: PlayerId, edge: EdgeId, remaining: u8 },
    YearOfPlentyPlayed { player: PlayerId, first: Resource, second: Resource },
    MonopolyPlayed {
        player: PlayerId,
        resource: Resource,
        transfers: Vec<MonopolyTransfer>,
        total_collected: u32,
    },

    TradeProposed {
        trade_id: u32,
        proposer: PlayerId,
        offered: HashMap<Resource, u32>,
        requested: HashMap<Resource, u32>,
        target_players: Option<Vec<PlayerId>>,
    },
    TradeAccepted { trade_id: u32, player: PlayerId },
    TradeRejected { trade_id: u32, player: PlayerId },
    TradeCancelled { trade_id: u32, reason: TradeCancelReason },
    TradeExecuted { trade_id: u32, proposer: PlayerId, accepter: PlayerId },
    MaritimeTraded { player: PlayerId, gave: Resource, gave_amount: u32, received: Resource },

    TurnEnded { player: PlayerId },
    TurnStarted { player: PlayerId, turn_number: u32 },
    PairedMarkerPassed { new_marker_holder: PlayerId },

    VictoryPointRevealed { player: PlayerId, card_id: u32 },
    PlayerWon { player: PlayerId, breakdown: VictoryBreakdown },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeCancelReason {
    ByProposer,
    TurnEnded,
}

/// A single entry in a game's durable event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_index: u64,
    pub event: Event,
}
