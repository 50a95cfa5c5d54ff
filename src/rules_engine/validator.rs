#![allow(dead_code)]
//! Pure validation: every accepted intent must pass through here first.
//! Never mutates state; returns an empty list when the intent is legal.

use super::domain::bank::{cost_bundle, CITY_COST, DEV_CARD_COST, ROAD_COST, SETTLEMENT_COST};
use super::domain::bank::DevCardType;
use super::domain::harbor_ratio::best_ratio_for;
use super::domain::player::{MAX_CITIES, MAX_ROADS, MAX_SETTLEMENTS};
use super::domain::state::GameState;
use super::domain::turn::Phase;
use super::intents::Intent;
use super::violations::*;

pub fn validate(intent: &Intent, state: &GameState) -> Vec<Violation> {
    let mut violations = Vec::new();

    if state.turn.phase == Phase::Ended {
        violations.push(game_already_ended());
        return violations;
    }

    if let Some(actor) = intent.actor() {
        if !is_acting_player(state, actor, intent) {
            violations.push(not_your_turn());
            return violations;
        }
    }

    match intent {
        Intent::PlaceSetupSettlement { player, node } => {
            require_phase(state, Phase::Setup, &mut violations);
            let setup = state.turn.setup.as_ref();
            if setup.map(|s| s.awaiting_road).unwrap_or(true) {
                violations.push(invalid_action());
            }
            check_settlement_location(state, *node, &mut violations);
            let _ = player;
        }
        Intent::PlaceSetupRoad { edge, .. } => {
            require_phase(state, Phase::Setup, &mut violations);
            let setup = state.turn.setup.as_ref();
            if !setup.map(|s| s.awaiting_road).unwrap_or(false) {
                violations.push(invalid_action());
            }
            if state.buildings.edge_owner(*edge).is_some() {
                violations.push(location_occupied());
            }
            let touches_last_settlement = setup
                .and_then(|s| s.last_settlement_node)
                .map(|node| state.board.edges_of_node(node).contains(edge))
                .unwrap_or(false);
            if !touches_last_settlement {
                violations.push(no_adjacent_road());
            }
        }
        Intent::RollDice { .. } => {
            require_phase(state, Phase::PreRoll, &mut violations);
        }
        Intent::DiscardResources { player, discard } => {
            if !state.turn.players_owing_discard.contains(player) {
                violations.push(invalid_action());
            } else if let Some(p) = state.player(player) {
                let required = p.resources.total() / 2;
                if discard.total() != required {
                    violations.push(invalid_action());
                } else if !p.resources.contains(discard) {
                    violations.push(insufficient_resources());
                }
            }
        }
        Intent::MoveRobber { hex, .. } => {
            require_phase(state, Phase::MovingRobber, &mut violations);
            if *hex == state.robber_hex {
                violations.push(must_move_robber_to_new_hex());
            }
        }
        Intent::StealResource { player, victim } => {
            require_phase(state, Phase::Stealing, &mut violations);
            if let Some(v) = victim {
                if !state.turn.steal_candidates.contains(v) {
                    violations.push(no_eligible_victim());
                } else if state.player(v).map(|p| p.resources.is_empty()).unwrap_or(true) {
                    violations.push(victim_has_no_resources());
                }
            }
            let _ = player;
        }
        Intent::BuildRoad { player, edge } => {
            require_phase(state, Phase::Main, &mut violations);
            check_road_affordable_and_supplied(state, player, &mut violations);
            check_road_placement(state, player, *edge, &mut violations);
        }
        Intent::BuildSettlement { player, node } => {
            require_phase(state, Phase::Main, &mut violations);
            check_settlement_affordable_and_supplied(state, player, &mut violations);
            check_settlement_location(state, *node, &mut violations);
            check_settlement_touches_own_road(state, player, *node, &mut violations);
        }
        Intent::BuildCity { player, node } => {
            require_phase(state, Phase::Main, &mut violations);
            if let Some(p) = state.player(player) {
                if p.cities.len() >= MAX_CITIES {
                    violations.push(no_supply_remaining());
                }
                if !p.resources.contains(&cost_bundle(&CITY_COST)) {
                    violations.push(insufficient_resources());
                }
                if !p.settlements.contains(node) {
                    violations.push(no_settlement_to_upgrade());
                }
            }
        }
        Intent::BuyDevelopmentCard { player } => {
            require_phase(state, Phase::Main, &mut violations);
            if state.bank.dev_deck.is_empty() {
                violations.push(no_supply_remaining());
            }
            if let Some(p) = state.player(player) {
                if !p.resources.contains(&cost_bundle(&DEV_CARD_COST)) {
                    violations.push(insufficient_resources());
                }
            }
        }
        Intent::PlayKnight { player, .. } => check_play_dev_card(state, player, DevCardType::Knight, &mut violations),
        Intent::PlayRoadBuilding { player } => {
            check_play_dev_card(state, player, DevCardType::RoadBuilding, &mut violations)
        }
        Intent::PlayYearOfPlenty { player, .. } => {
            check_play_dev_card(state, player, DevCardType::YearOfPlenty, &mut violations)
        }
        Intent::PlayMonopoly { player, .. } => {
            check_play_dev_card(state, player, DevCardType::Monopoly, &mut violations)
        }
        Intent::PlaceRoadBuildingRoad { player, edge } => {
            require_phase(state, Phase::Main, &mut violations);
            if state.turn.road_building_roads_remaining == 0 {
                violations.push(invalid_action());
            }
            check_road_placement(state, player, *edge, &mut violations);
        }
        Intent::ProposeTrade { player, offered, .. } => {
            require_phase(state, Phase::Main, &mut violations);
            if let Some(p) = state.player(player) {
                if !p.resources.contains(offered) {
                    violations.push(insufficient_resources());
                }
            }
        }
        Intent::AcceptTrade { player, trade_id } | Intent::RejectTrade { player, trade_id } => {
            let trade = state.turn.open_trades.iter().find(|t| t.id == *trade_id);
            match trade {
                None => violations.push(no_such_trade_proposal()),
                Some(t) => {
                    if &t.proposer == player {
                        violations.push(cannot_trade_with_self());
                    }
                    if let Some(targets) = &t.target_players {
                        if !targets.contains(player) {
                            violations.push(not_target_of_trade());
                        }
                    }
                }
            }
        }
        Intent::CancelTrade { player, trade_id } => {
            let trade = state.turn.open_trades.iter().find(|t| t.id == *trade_id);
            match trade {
                None => violations.push(no_such_trade_proposal()),
                Some(t) if &t.proposer != player => violations.push(inactive_player_cannot_trade()),
                _ => {}
            }
        }
        Intent::ExecuteTrade { trade_id, accepter, .. } => {
            let trade = state.turn.open_trades.iter().find(|t| t.id == *trade_id);
            match trade {
                None => violations.push(no_such_trade_proposal()),
                Some(t) => {
                    if !t.accepters.contains(accepter) {
                        violations.push(trade_already_accepted());
                    }
                    if let Some(accepter_player) = state.player(accepter) {
                        if !accepter_player.resources.contains(&t.requested) {
                            violations.push(insufficient_resources());
                        }
                    }
                }
            }
        }
        Intent::MaritimeTrade { player, give, receive } => {
            require_phase(state, Phase::Main, &mut violations);
            if let Some(p) = state.player(player) {
                let ratio = best_ratio_for(state, player, *give);
                if p.resources.count(*give) < ratio {
                    violations.push(insufficient_resources());
                }
                let _ = receive;
            }
        }
        Intent::EndTurn { .. } => {
            require_phase(state, Phase::Main, &mut violations);
        }
        Intent::PairedPassMarker { .. } => {}
    }

    violations
}

fn is_acting_player(state: &GameState, actor: &str, intent: &Intent) -> bool {
    match intent {
        Intent::AcceptTrade { .. } | Intent::RejectTrade { .. } => true,
        Intent::PairedPassMarker { .. } => {
            state.turn.paired.as_ref().map(|p| p.player_two == actor).unwrap_or(false)
        }
        _ => {
            if actor == state.turn.active_player {
                return true;
            }
            state
                .turn
                .paired
                .as_ref()
                .map(|p| p.marker_holder == actor)
                .unwrap_or(false)
        }
    }
}

fn require_phase(state: &GameState, expected: Phase, out: &mut Vec<Violation>) {
    if state.turn.phase == expected {
        return;
    }
    out.push(match state.turn.phase {
        Phase::PreRoll => must_roll_first(),
        Phase::Discarding => must_discard_first(),
        Phase::MovingRobber => must_move_robber(),
        Phase::Stealing => must_steal_first(),
        Phase::Main if expected == Phase::PreRoll => already_rolled(),
        _ => invalid_action(),
    });
}

fn check_settlement_location(state: &GameState, node: super::board::NodeId, out: &mut Vec<Violation>) {
    if state.buildings.node_owner(node).is_some() {
        out.push(location_occupied());
        return;
    }
    let board = &state.board;
    for &neighbor in &board.node(node).adjacent_nodes {
        if state.buildings.node_owner(neighbor).is_some() {
            out.push(violates_distance_rule());
            return;
        }
    }
}

fn check_settlement_touches_own_road(state: &GameState, player: &str, node: super::board::NodeId, out: &mut Vec<Violation>) {
    let board = &state.board;
    let touches = board
        .edges_of_node(node)
        .iter()
        .any(|&e| state.buildings.edge_owner(e).map(|o| o == player).unwrap_or(false));
    if !touches {
        out.push(no_adjacent_road());
    }
}

fn check_road_placement(state: &GameState, player: &str, edge: super::board::EdgeId, out: &mut Vec<Violation>) {
    if state.buildings.edge_owner(edge).is_some() {
        out.push(location_occupied());
        return;
    }
    let board = &state.board;
    let (a, b) = board.edge(edge).endpoints;
    let touches_endpoint = |node: super::board::NodeId| -> bool {
        if state.buildings.node_owner(node).map(|o| o == player).unwrap_or(false) {
            return true;
        }
        if state.buildings.node_owner(node).is_some() {
            return false; // opponent building blocks the chain here
        }
        board
            .edges_of_node(node)
            .iter()
            .any(|&e| state.buildings.edge_owner(e).map(|o| o == player).unwrap_or(false))
    };
    if !touches_endpoint(a) && !touches_endpoint(b) {
        out.push(no_adjacent_road());
    }
}

fn check_road_affordable_and_supplied(state: &GameState, player: &str, out: &mut Vec<Violation>) {
    if let Some(p) = state.player(player) {
        if p.roads.len() >= MAX_ROADS {
            out.push(no_supply_remaining());
        }
        if !p.resources.contains(&cost_bundle(&ROAD_COST)) {
            out.push(insufficient_resources());
        }
    }
}

fn check_settlement_affordable_and_supplied(state: &GameState, player: &str, out: &mut Vec<Violation>) {
    if let Some(p) = state.player(player) {
        if p.settlements.len() >= MAX_SETTLEMENTS {
            out.push(no_supply_remaining());
        }
        if !p.resources.contains(&cost_bundle(&SETTLEMENT_COST)) {
            out.push(insufficient_resources());
        }
    }
}

fn check_play_dev_card(state: &GameState, player: &str, kind: DevCardType, out: &mut Vec<Violation>) {
    let Some(p) = state.player(player) else {
        return;
    };
    if p.played_dev_this_turn {
        out.push(already_played_dev_card());
        return;
    }
    match p.unplayed_dev_card(kind) {
        Some(_) => {}
        None => {
            if p.dev_cards.iter().any(|c| c.kind == kind && c.bought_this_turn) {
                out.push(cannot_play_card_bought_this_turn());
            } else {
                out.push(no_dev_card_to_play());
            }
        }
    }
}

/// Players owning a building adjacent to `hex`, excluding `thief`, limited
/// to those currently holding at least one resource.
pub fn eligible_victims(state: &GameState, hex: super::board::HexId, thief: &str) -> Vec<String> {
    let board = &state.board;
    let nodes = board.nodes_of_hex(hex);
    let mut owners: Vec<String> = nodes
        .into_iter()
        .filter_map(|n| state.buildings.node_owner(n).cloned())
        .filter(|owner| owner != thief)
        .collect();
    owners.sort();
    owners.dedup();
    owners
        .into_iter()
        .filter(|owner| state.player(owner).map(|p| !p.resources.is_empty()).unwrap_or(false))
        .collect()
}
