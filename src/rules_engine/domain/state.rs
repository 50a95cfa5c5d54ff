#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::awards::Awards;
use super::bank::{initial_dev_deck_composition, Bank};
use super::buildings::Buildings;
use super::player::{Player, PlayerId};
use super::turn::Turn;
use crate::rules_engine::board::geometry::{Board, BoardMode, HexId};
use crate::rules_engine::board::layout::build_board;
use crate::rules_engine::rng::CatanRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    ThreeOrFour,
    FiveOrSix,
}

impl PlayerMode {
    pub fn min_players(self) -> usize {
        match self {
            PlayerMode::ThreeOrFour => 3,
            PlayerMode::FiveOrSix => 5,
        }
    }

    pub fn max_players(self) -> usize {
        match self {
            PlayerMode::ThreeOrFour => 4,
            PlayerMode::FiveOrSix => 6,
        }
    }

    pub fn board_mode(self) -> BoardMode {
        match self {
            PlayerMode::ThreeOrFour => BoardMode::Standard,
            PlayerMode::FiveOrSix => BoardMode::Extended,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_mode: PlayerMode,
    pub use_beginner_layout: bool,
    pub board_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub display_name: String,
    pub color: String,
}

/// The full, logically-immutable game state. The reducer returns a new
/// value of this type on every accepted intent; the event applier mutates
/// a fresh clone the same way. The runtime serializes access to a given
/// game so in-place mutation would be safe there, but the pure core always
/// treats this as a value type so tests can diff two independently-derived
/// copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub config: GameConfig,
    pub board: Arc<Board>,
    pub players: Vec<Player>,
    pub bank: Bank,
    pub buildings: Buildings,
    pub awards: Awards,
    pub turn: Turn,
    pub robber_hex: HexId,
    pub event_count: u64,
    pub next_dev_card_id: u32,
}

impl GameState {
    /// Builds the initial state from a config and player roster: board
    /// generated from `config.board_seed`, dev deck shuffled, phase set to
    /// Setup with the first player in roster order active. Returns the RNG
    /// alongside the state rather than embedding it — gameplay draws
    /// (dice, robber steals) continue from the stream the dev-deck shuffle
    /// already advanced, so callers must thread it into every `reduce`.
    pub fn new(game_id: String, config: GameConfig, roster: Vec<RosterEntry>) -> (Self, CatanRng) {
        assert!(roster.len() >= config.player_mode.min_players());
        assert!(roster.len() <= config.player_mode.max_players());

        let mut rng = CatanRng::from_seed(config.board_seed);
        let board = build_board(config.player_mode.board_mode(), config.use_beginner_layout, config.board_seed);
        let desert = board
            .hexes()
            .iter()
            .find(|h| h.terrain == crate::rules_engine::board::geometry::Terrain::Desert)
            .map(|h| h.id)
            .unwrap_or(HexId(0));

        let mut dev_deck = initial_dev_deck_composition();
        rng.shuffle(&mut dev_deck);

        let players: Vec<Player> = roster
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Player::new(entry.id, entry.display_name, entry.color, i as u8))
            .collect();

        let first_player = players[0].id.clone();

        let state = GameState {
            game_id,
            config,
            board: Arc::new(board),
            players,
            bank: Bank::new_standard(dev_deck),
            buildings: Buildings::new(),
            awards: Awards::new(),
            turn: Turn::new_setup(first_player),
            robber_hex: desert,
            event_count: 0,
            next_dev_card_id: 0,
        };
        (state, rng)
    }

    pub fn allocate_dev_card_id(&mut self) -> u32 {
        let id = self.next_dev_card_id;
        self.next_dev_card_id += 1;
        id
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn next_player_id(&self, id: &str) -> PlayerId {
        let idx = self.player_index(id).expect("active player must exist");
        let next = (idx + 1) % self.players.len();
        self.players[next].id.clone()
    }

    pub fn total_victory_points(&self, player_id: &str, include_hidden: bool) -> u32 {
        let mut vp = self.player(player_id).map(|p| p.victory_points(include_hidden)).unwrap_or(0);
        if let Some((holder, _)) = &self.awards.longest_road {
            if holder == player_id {
                vp += 2;
            }
        }
        if let Some((holder, _)) = &self.awards.largest_army {
            if holder == player_id {
                vp += 2;
            }
        }
        vp
    }
}
