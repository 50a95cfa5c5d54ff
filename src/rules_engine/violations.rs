#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// Every way an intent can be rejected. Kept as a closed enum (rather than
/// a free-form string) so clients can switch on `kind` without parsing
/// `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    NotYourTurn,
    MustRollFirst,
    AlreadyRolled,
    MustMoveRobber,
    MustDiscardFirst,
    MustStealFirst,
    InsufficientResources,
    NoSupplyRemaining,
    InvalidLocation,
    ViolatesDistanceRule,
    NoAdjacentRoad,
    NoSettlementToUpgrade,
    LocationOccupied,
    CannotTradeWithSelf,
    InactivePlayerCannotTrade,
    InvalidTradeRatio,
    NoSuchTradeProposal,
    TradeAlreadyAccepted,
    NotTargetOfTrade,
    NoDevCardToPlay,
    CannotPlayCardBoughtThisTurn,
    AlreadyPlayedDevCard,
    InvalidDevCardType,
    MustMoveRobberToNewHex,
    NoEligibleVictim,
    VictimHasNoResources,
    GameNotStarted,
    GameAlreadyEnded,
    InvalidAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Violation {
            kind,
            message: message.into(),
        }
    }
}

macro_rules! violation_ctor {
    ($name:ident, $kind:ident, $msg:expr) => {
        pub fn $name() -> Violation {
            Violation::new(ViolationKind::$kind, $msg)
        }
    };
}

violation_ctor!(not_your_turn, NotYourTurn, "it is not your turn");
violation_ctor!(must_roll_first, MustRollFirst, "you must roll the dice before taking this action");
violation_ctor!(already_rolled, AlreadyRolled, "dice have already been rolled this turn");
violation_ctor!(must_move_robber, MustMoveRobber, "the robber must be moved before taking this action");
violation_ctor!(must_discard_first, MustDiscardFirst, "one or more players must discard before taking this action");
violation_ctor!(must_steal_first, MustStealFirst, "a steal must be resolved before taking this action");
violation_ctor!(insufficient_resources, InsufficientResources, "insufficient resources for this action");
violation_ctor!(no_supply_remaining, NoSupplyRemaining, "no supply remaining for this piece");
violation_ctor!(invalid_location, InvalidLocation, "the given location is not valid for this action");
violation_ctor!(violates_distance_rule, ViolatesDistanceRule, "placement violates the distance rule");
violation_ctor!(no_adjacent_road, NoAdjacentRoad, "no adjacent road or building of yours touches this edge");
violation_ctor!(no_settlement_to_upgrade, NoSettlementToUpgrade, "no settlement of yours exists at this node");
violation_ctor!(location_occupied, LocationOccupied, "this location is already occupied");
violation_ctor!(cannot_trade_with_self, CannotTradeWithSelf, "cannot trade with yourself");
violation_ctor!(inactive_player_cannot_trade, InactivePlayerCannotTrade, "only the active player may propose a domestic trade");
violation_ctor!(invalid_trade_ratio, InvalidTradeRatio, "trade ratio does not match any harbor you qualify for");
violation_ctor!(no_such_trade_proposal, NoSuchTradeProposal, "no such trade proposal is open");
violation_ctor!(trade_already_accepted, TradeAlreadyAccepted, "this trade proposal has already been accepted");
violation_ctor!(not_target_of_trade, NotTargetOfTrade, "you are not a target of this trade proposal");
violation_ctor!(no_dev_card_to_play, NoDevCardToPlay, "you do not hold an unplayed card of this type");
violation_ctor!(
    cannot_play_card_bought_this_turn,
    CannotPlayCardBoughtThisTurn,
    "a development card cannot be played the same turn it was bought"
);
violation_ctor!(already_played_dev_card, AlreadyPlayedDevCard, "you have already played a development card this turn");
violation_ctor!(invalid_dev_card_type, InvalidDevCardType, "card type does not match the intent");
violation_ctor!(must_move_robber_to_new_hex, MustMoveRobberToNewHex, "the robber must move to a different hex");
violation_ctor!(no_eligible_victim, NoEligibleVictim, "the chosen player is not an eligible steal victim");
violation_ctor!(victim_has_no_resources, VictimHasNoResources, "the chosen victim has no resources to steal");
violation_ctor!(game_not_started, GameNotStarted, "the game has not started");
violation_ctor!(game_already_ended, GameAlreadyEnded, "the game has already ended");
violation_ctor!(invalid_action, InvalidAction, "this action is not valid in the current phase");
