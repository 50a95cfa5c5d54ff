#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

pub const MIN_LONGEST_ROAD: u32 = 5;
pub const MIN_LARGEST_ARMY: u32 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Awards {
    pub longest_road: Option<(PlayerId, u32)>,
    pub largest_army: Option<(PlayerId, u32)>,
}

impl Awards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the new longest-road holder given every player's current
    /// length. Ties at or above the threshold leave the award unclaimed
    /// unless the existing holder is part of the tie, in which case they
    /// keep it.
    pub fn resolve_longest_road(
        current: &Option<(PlayerId, u32)>,
        lengths: &[(PlayerId, u32)],
    ) -> Option<(PlayerId, u32)> {
        resolve_award(current, lengths, MIN_LONGEST_ROAD)
    }

    pub fn resolve_largest_army(
        current: &Option<(PlayerId, u32)>,
        counts: &[(PlayerId, u32)],
    ) -> Option<(PlayerId, u32)> {
        resolve_award(current, counts, MIN_LARGEST_ARMY)
    }
}

fn resolve_award(
    current: &Option<(PlayerId, u32)>,
    values: &[(PlayerId, u32)],
    min_threshold: u32,
) -> Option<(PlayerId, u32)> {
    let max_value = values.iter().map(|(_, v)| *v).max().unwrap_or(0);
    if max_value < min_threshold {
        return None;
    }
    let leaders: Vec<&(PlayerId, u32)> = values.iter().filter(|(_, v)| *v == max_value).collect();
    if leaders.len() == 1 {
        return Some(leaders[0].clone());
    }
    // Tied for the lead: keep the current holder if they're one of the
    // tied leaders, otherwise the award stays unclaimed.
    if let Some((holder, _)) = current {
        if leaders.iter().any(|(p, _)| p == holder) {
            return current.clone();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_requires_minimum_and_strict_lead() {
        let lengths = vec![("a".to_string(), 4), ("b".to_string(), 3)];
        assert_eq!(Awards::resolve_longest_road(&None, &lengths), None);
    }

    #[test]
    fn tie_at_threshold_with_no_current_holder_stays_unclaimed() {
        let lengths = vec![("a".to_string(), 6), ("b".to_string(), 6)];
        assert_eq!(Awards::resolve_longest_road(&None, &lengths), None);
    }

    #[test]
    fn tie_including_current_holder_keeps_it() {
        let current = Some(("a".to_string(), 6));
        let lengths = vec![("a".to_string(), 6), ("b".to_string(), 6)];
        assert_eq!(Awards::resolve_longest_road(&current, &lengths), current);
    }

    #[test]
    fn strict_improvement_transfers_award() {
        let current = Some(("a".to_string(), 6));
        let lengths = vec![("a".to_string(), 6), ("b".to_string(), 7)];
        assert_eq!(
            Awards::resolve_longest_road(&current, &lengths),
            Some(("b".to_string(), 7))
        );
    }

    #[test]
    fn holders_own_chain_dropping_below_threshold_revokes_with_no_other_claimant() {
        let current = Some(("a".to_string(), 6));
        let lengths = vec![("a".to_string(), 3), ("b".to_string(), 2)];
        assert_eq!(Awards::resolve_longest_road(&current, &lengths), None);
    }
}
