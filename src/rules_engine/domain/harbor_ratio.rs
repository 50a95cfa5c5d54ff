#![allow(dead_code)]
//! Maritime trade ratio lookup: 4:1 by default, 3:1 at a generic harbor,
//! 2:1 at a harbor specific to the resource being given up.

use super::bank::Resource;
use super::state::GameState;
use crate::rules_engine::board::harbors::HarborKind;

pub fn best_ratio_for(state: &GameState, player: &str, give: Resource) -> u32 {
    let Some(p) = state.player(player) else {
        return 4;
    };
    let board = &state.board;
    let mut best = 4u32;
    for &node in p.settlements.iter().chain(p.cities.iter()) {
        if let Some(harbor) = board.harbor_for_node(node) {
            let ratio = match harbor.kind {
                HarborKind::Generic3to1 => 3,
                HarborKind::Specific2to1(res) if res == give => 2,
                HarborKind::Specific2to1(_) => 4,
            };
            best = best.min(ratio);
        }
    }
    best
}
