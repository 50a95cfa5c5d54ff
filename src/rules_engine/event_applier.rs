#![allow(dead_code)]
//! Replays a previously-produced event against a state, deterministically
//! and without touching RNG — every value needed is already on the event.
//! This is the source of truth for reconnection catch-up and snapshot
//! recovery: applying the full event log from the initial state must yield
//! the same state the live runtime holds.

use std::collections::HashSet;

use super::domain::bank::DevCardType;
use super::domain::state::GameState;
use super::domain::turn::{Phase, SetupDirection, TradeProposal};
use super::events::Event;

pub fn apply(event: &Event, mut state: GameState) -> GameState {
    match event {
        Event::SetupSettlementPlaced { player, node } => {
            state.buildings.place_settlement(*node, player.clone());
            state.player_mut(player).unwrap().settlements.insert(*node);
            if let Some(setup) = &mut state.turn.setup {
                setup.awaiting_road = true;
                setup.last_settlement_node = Some(*node);
            }
        }
        Event::SetupRoadPlaced { player, edge } => {
            state.buildings.place_road(*edge, player.clone());
            state.player_mut(player).unwrap().roads.insert(*edge);
            if let Some(setup) = &mut state.turn.setup {
                setup.awaiting_road = false;
            }
        }
        Event::SetupResourcesGiven { player, items } => {
            for &(_, resource) in items {
                state.player_mut(player).unwrap().resources.add(resource, 1);
                state.bank.resources.try_remove(resource, 1);
            }
        }
        Event::SetupTurnAdvanced { next_player } => {
            state.turn.active_player = next_player.clone();
            if let Some(setup) = &mut state.turn.setup {
                let players_len = state.players.len();
                if setup.round == 1 {
                    if setup.order_index + 1 >= players_len {
                        setup.round = 2;
                        setup.direction = SetupDirection::Backward;
                    } else {
                        setup.order_index += 1;
                    }
                } else if setup.order_index > 0 {
                    setup.order_index -= 1;
                }
            }
        }
        Event::SetupPhaseEnded => {
            state.turn.setup = None;
            state.turn.phase = Phase::PreRoll;
            for p in &mut state.players {
                p.reset_turn_flags();
            }
        }

        Event::DiceRolled { d1, d2, .. } => {
            state.turn.last_roll = Some((*d1, *d2));
        }
        Event::NoResourcesProduced { .. } => {}
        Event::ResourcesProduced { items, .. } => {
            for item in items {
                state.player_mut(&item.player).unwrap().resources.add(item.resource, item.amount);
                state.bank.resources.try_remove(item.resource, item.amount);
            }
            state.turn.phase = Phase::Main;
        }
        Event::DiscardRequired { players } => {
            state.turn.players_owing_discard = players.iter().map(|(id, _)| id.clone()).collect();
            state.turn.phase = Phase::Discarding;
        }
        Event::ResourcesDiscarded { player, discarded } => {
            state.player_mut(player).unwrap().resources -= discarded;
            state.bank.resources += discarded;
            state.turn.players_owing_discard.remove(player);
            if state.turn.players_owing_discard.is_empty() {
                state.turn.phase = Phase::MovingRobber;
            }
        }

        Event::RobberMoved { hex, eligible_victims, .. } => {
            state.robber_hex = *hex;
            if eligible_victims.is_empty() {
                state.turn.phase = Phase::Main;
            } else {
                state.turn.steal_candidates = eligible_victims.clone();
                state.turn.phase = Phase::Stealing;
            }
        }
        Event::ResourceStolen { thief, victim, resource } => {
            state.player_mut(victim).unwrap().resources.try_remove(*resource, 1);
            state.player_mut(thief).unwrap().resources.add(*resource, 1);
            state.turn.steal_candidates.clear();
            state.turn.phase = Phase::Main;
        }
        Event::NoStealPossible { .. } => {
            state.turn.steal_candidates.clear();
            if state.turn.phase == Phase::Stealing {
                state.turn.phase = Phase::Main;
            }
        }

        Event::RoadBuilt { player, edge } => {
            state.buildings.place_road(*edge, player.clone());
            state.player_mut(player).unwrap().roads.insert(*edge);
        }
        Event::SettlementBuilt { player, node } => {
            state.buildings.place_settlement(*node, player.clone());
            state.player_mut(player).unwrap().settlements.insert(*node);
        }
        Event::CityBuilt { player, node } => {
            state.buildings.upgrade_to_city(*node);
            let p = state.player_mut(player).unwrap();
            p.settlements.remove(node);
            p.cities.insert(*node);
        }
        Event::LongestRoadAwarded { new_holder, road_length, .. } => {
            state.awards.longest_road = Some((new_holder.clone(), *road_length));
        }
        Event::LargestArmyAwarded { new_holder, knight_count, .. } => {
            state.awards.largest_army = Some((new_holder.clone(), *knight_count));
        }

        Event::DevelopmentCardBought { player, card_type } => {
            let id = state.allocate_dev_card_id();
            state.player_mut(player).unwrap().dev_cards.push(super::domain::player::DevCardInstance {
                id,
                kind: *card_type,
                played: false,
                bought_this_turn: true,
            });
            state.player_mut(player).unwrap().bought_dev_this_turn = true;
        }
        Event::KnightPlayed { player } => {
            mark_played(&mut state, player, DevCardType::Knight);
            state.player_mut(player).unwrap().knights_played += 1;
        }
        Event::RoadBuildingPlayed { player, free_roads } => {
            mark_played(&mut state, player, DevCardType::RoadBuilding);
            state.turn.road_building_roads_remaining = *free_roads;
        }
        Event::RoadBuildingRoadPlaced { player, edge, remaining } => {
            state.buildings.place_road(*edge, player.clone());
            state.player_mut(player).unwrap().roads.insert(*edge);
            state.turn.road_building_roads_remaining = *remaining;
        }
        Event::YearOfPlentyPlayed { player, first, second } => {
            mark_played(&mut state, player, DevCardType::YearOfPlenty);
            let p = state.player_mut(player).unwrap();
            p.resources.add(*first, 1);
            p.resources.add(*second, 1);
            state.bank.resources.try_remove(*first, 1);
            state.bank.resources.try_remove(*second, 1);
        }
        Event::MonopolyPlayed { player, resource, transfers, .. } => {
            mark_played(&mut state, player, DevCardType::Monopoly);
            let mut total = 0u32;
            for t in transfers {
                state.player_mut(&t.victim).unwrap().resources.set(*resource, 0);
                total += t.amount;
            }
            state.player_mut(player).unwrap().resources.add(*resource, total);
        }

        Event::TradeProposed { trade_id, proposer, offered, requested, target_players } => {
            let mut offered_bundle = super::domain::bank::ResourceBundle::new();
            for (&res, &count) in offered {
                offered_bundle.set(res, count);
            }
            let mut requested_bundle = super::domain::bank::ResourceBundle::new();
            for (&res, &count) in requested {
                requested_bundle.set(res, count);
            }
            state.turn.open_trades.push(TradeProposal {
                id: *trade_id,
                proposer: proposer.clone(),
                offered: offered_bundle,
                requested: requested_bundle,
                target_players: target_players.clone().map(|v| v.into_iter().collect::<HashSet<_>>()),
                accepters: HashSet::new(),
                rejecters: HashSet::new(),
            });
        }
        Event::TradeAccepted { trade_id, player } => {
            if let Some(t) = state.turn.open_trades.iter_mut().find(|t| t.id == *trade_id) {
                t.accepters.insert(player.clone());
            }
        }
        Event::TradeRejected { trade_id, player } => {
            if let Some(t) = state.turn.open_trades.iter_mut().find(|t| t.id == *trade_id) {
                t.rejecters.insert(player.clone());
            }
        }
        Event::TradeCancelled { trade_id, reason } => {
            let _ = reason;
            state.turn.open_trades.retain(|t| t.id != *trade_id);
        }
        Event::TradeExecuted { trade_id, proposer, accepter } => {
            if let Some(idx) = state.turn.open_trades.iter().position(|t| t.id == *trade_id) {
                let trade = state.turn.open_trades.remove(idx);
                if let Some(p) = state.player_mut(proposer) {
                    p.resources -= &trade.offered;
                    p.resources += &trade.requested;
                }
                if let Some(p) = state.player_mut(accepter) {
                    p.resources -= &trade.requested;
                    p.resources += &trade.offered;
                }
            }
        }
        Event::MaritimeTraded { player, gave, gave_amount, received } => {
            let p = state.player_mut(player).unwrap();
            p.resources.try_remove(*gave, *gave_amount);
            p.resources.add(*received, 1);
            state.bank.resources.add(*gave, *gave_amount);
            state.bank.resources.try_remove(*received, 1);
        }

        Event::TurnEnded { .. } => {
            state.turn.open_trades.clear();
        }
        Event::TurnStarted { player, turn_number } => {
            state.turn.active_player = player.clone();
            state.turn.turn_number = *turn_number;
            state.turn.phase = Phase::PreRoll;
            state.turn.last_roll = None;
            if let Some(p) = state.player_mut(player) {
                p.reset_turn_flags();
            }
        }
        Event::PairedMarkerPassed { new_marker_holder } => {
            if let Some(paired) = &mut state.turn.paired {
                paired.marker_holder = new_marker_holder.clone();
            }
        }

        Event::VictoryPointRevealed { .. } => {}
        Event::PlayerWon { .. } => {
            state.turn.phase = Phase::Ended;
        }
    }
    state
}

fn mark_played(state: &mut GameState, player: &str, kind: DevCardType) {
    let p = state.player_mut(player).unwrap();
    if let Some(card) = p.dev_cards.iter_mut().find(|c| c.kind == kind && !c.played && !c.bought_this_turn) {
        card.played = true;
    }
    p.played_dev_this_turn = true;
}

/// Replays an entire ordered event sequence from `initial`. The normative
/// reconstruction path for reconnection and crash recovery.
pub fn apply_all<'a>(initial: GameState, events: impl IntoIterator<Item = &'a Event>) -> GameState {
    events.into_iter().fold(initial, |state, event| apply(event, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules_engine::domain::state::{GameConfig, PlayerMode, RosterEntry};
    use crate::rules_engine::intents::Intent;
    use crate::rules_engine::reducer::reduce;

    fn three_player_state() -> GameState {
        let roster = vec![
            RosterEntry { id: "a".into(), display_name: "A".into(), color: "red".into() },
            RosterEntry { id: "b".into(), display_name: "B".into(), color: "blue".into() },
            RosterEntry { id: "c".into(), display_name: "C".into(), color: "orange".into() },
        ];
        let config = GameConfig { player_mode: PlayerMode::ThreeOrFour, use_beginner_layout: true, board_seed: 7 };
        GameState::new("game-1".into(), config, roster).0
    }

    #[test]
    fn replaying_setup_settlement_matches_reducer_output() {
        let state = three_player_state();
        let node = state.board.nodes()[0].id;
        let player = state.turn.active_player.clone();
        let mut rng = crate::rules_engine::rng::CatanRng::from_seed(1);
        let (reduced, events) = reduce(Intent::PlaceSetupSettlement { player: player.clone(), node }, state.clone(), &mut rng);
        let replayed = apply_all(state, events.iter());
        assert_eq!(reduced.buildings.node_owner(node), replayed.buildings.node_owner(node));
        assert_eq!(
            reduced.player(&player).unwrap().settlements,
            replayed.player(&player).unwrap().settlements
        );
    }
}
