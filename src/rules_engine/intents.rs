#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use super::board::{EdgeId, HexId, NodeId};
use super::domain::bank::{Resource, ResourceBundle};
use super::domain::player::PlayerId;

/// Every action a player can request. The gateway maps inbound client
/// messages one-to-one onto these (minus lobby/auth/session messages,
/// which never reach the rules engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    PlaceSetupSettlement { player: PlayerId, node: NodeId },
    PlaceSetupRoad { player: PlayerId, edge: EdgeId },
    RollDice { player: PlayerId },
    DiscardResources { player: PlayerId, discard: ResourceBundle },
    MoveRobber { player: PlayerId, hex: HexId },
    StealResource { player: PlayerId, victim: Option<PlayerId> },
    BuildRoad { player: PlayerId, edge: EdgeId },
    BuildSettlement { player: PlayerId, node: NodeId },
    BuildCity { player: PlayerId, node: NodeId },
    BuyDevelopmentCard { player: PlayerId },
    PlayKnight { player: PlayerId, move_to_hex: HexId, victim: Option<PlayerId> },
    PlayRoadBuilding { player: PlayerId },
    PlaceRoadBuildingRoad { player: PlayerId, edge: EdgeId },
    PlayYearOfPlenty { player: PlayerId, first: Resource, second: Resource },
    PlayMonopoly { player: PlayerId, resource: Resource },
    ProposeTrade {
        player: PlayerId,
        offered: ResourceBundle,
        requested: ResourceBundle,
        target_players: Option<Vec<PlayerId>>,
    },
    AcceptTrade { player: PlayerId, trade_id: u32 },
    RejectTrade { player: PlayerId, trade_id: u32 },
    CancelTrade { player: PlayerId, trade_id: u32 },
    ExecuteTrade { player: PlayerId, trade_id: u32, accepter: PlayerId },
    MaritimeTrade { player: PlayerId, give: Resource, receive: Resource },
    EndTurn { player: PlayerId },
    PairedPassMarker { player: PlayerId },
}

impl Intent {
    /// The player who must be the caller for ownership checks. Trade
    /// responses (accept/reject) and the paired-turn marker holder are the
    /// exceptions handled directly in the validator.
    pub fn actor(&self) -> Option<&PlayerId> {
        use Intent::*;
        match self {
            PlaceSetupSettlement { player, .. }
            | PlaceSetupRoad { player, .. }
            | RollDice { player }
            | DiscardResources { player, .. }
            | MoveRobber { player, .. }
            | StealResource { player, .. }
            | BuildRoad { player, .. }
            | BuildSettlement { player, .. }
            | BuildCity { player, .. }
            | BuyDevelopmentCard { player }
            | PlayKnight { player, .. }
            | PlayRoadBuilding { player }
            | PlaceRoadBuildingRoad { player, .. }
            | PlayYearOfPlenty { player, .. }
            | PlayMonopoly { player, .. }
            | ProposeTrade { player, .. }
            | AcceptTrade { player, .. }
            | RejectTrade { player, .. }
            | CancelTrade { player, .. }
            | ExecuteTrade { player, .. }
            | MaritimeTrade { player, .. }
            | EndTurn { player }
            | PairedPassMarker { player } => Some(player),
        }
    }
}
