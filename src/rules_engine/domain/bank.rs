#![allow(dead_code)]
//! Resource multisets and the bank. A single multiset type backs both
//! player hands and the bank's pool so resource conservation across a
//! trade or a dice production round is checkable in one place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Brick,
    Lumber,
    Ore,
    Grain,
    Wool,
}

pub const ALL_RESOURCES: [Resource; 5] = [
    Resource::Brick,
    Resource::Lumber,
    Resource::Ore,
    Resource::Grain,
    Resource::Wool,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevCardType {
    Knight,
    VictoryPoint,
    RoadBuilding,
    YearOfPlenty,
    Monopoly,
}

/// Non-negative resource multiset, serialized as an object keyed by
/// snake_case resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle(HashMap<Resource, u32>);

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(resource: Resource, count: u32) -> Self {
        let mut b = Self::new();
        b.set(resource, count);
        b
    }

    pub fn count(&self, resource: Resource) -> u32 {
        *self.0.get(&resource).unwrap_or(&0)
    }

    pub fn set(&mut self, resource: Resource, count: u32) {
        if count == 0 {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, count);
        }
    }

    pub fn add(&mut self, resource: Resource, count: u32) {
        let c = self.count(resource) + count;
        self.set(resource, c);
    }

    /// Removes `count` of `resource`, returning false (and leaving the
    /// bundle unchanged) if there isn't enough.
    pub fn try_remove(&mut self, resource: Resource, count: u32) -> bool {
        let have = self.count(resource);
        if have < count {
            return false;
        }
        self.set(resource, have - count);
        true
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True iff `self` contains at least as much of every resource as `other`.
    pub fn contains(&self, other: &ResourceBundle) -> bool {
        other.0.iter().all(|(res, &count)| self.count(*res) >= count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        ALL_RESOURCES.iter().map(|&r| (r, self.count(r))).filter(|(_, c)| *c > 0)
    }
}

impl AddAssign<&ResourceBundle> for ResourceBundle {
    fn add_assign(&mut self, rhs: &ResourceBundle) {
        for (res, count) in rhs.iter() {
            self.add(res, count);
        }
    }
}

impl Add<&ResourceBundle> for ResourceBundle {
    type Output = ResourceBundle;
    fn add(mut self, rhs: &ResourceBundle) -> ResourceBundle {
        self += rhs;
        self
    }
}

impl SubAssign<&ResourceBundle> for ResourceBundle {
    fn sub_assign(&mut self, rhs: &ResourceBundle) {
        for (res, count) in rhs.iter() {
            let have = self.count(res);
            self.set(res, have.saturating_sub(count));
        }
    }
}

impl Sub<&ResourceBundle> for ResourceBundle {
    type Output = ResourceBundle;
    fn sub(mut self, rhs: &ResourceBundle) -> ResourceBundle {
        self -= rhs;
        self
    }
}

pub const ROAD_COST: [(Resource, u32); 2] = [(Resource::Brick, 1), (Resource::Lumber, 1)];
pub const SETTLEMENT_COST: [(Resource, u32); 4] = [
    (Resource::Brick, 1),
    (Resource::Lumber, 1),
    (Resource::Grain, 1),
    (Resource::Wool, 1),
];
pub const CITY_COST: [(Resource, u32); 2] = [(Resource::Grain, 2), (Resource::Ore, 3)];
pub const DEV_CARD_COST: [(Resource, u32); 3] =
    [(Resource::Ore, 1), (Resource::Grain, 1), (Resource::Wool, 1)];

pub fn cost_bundle(costs: &[(Resource, u32)]) -> ResourceBundle {
    let mut b = ResourceBundle::new();
    for &(res, count) in costs {
        b.set(res, count);
    }
    b
}

/// The dev-card deck's fixed starting composition: 14 knight, 5 victory
/// point, 2 road-building, 2 year-of-plenty, 2 monopoly.
pub fn initial_dev_deck_composition() -> Vec<DevCardType> {
    let mut deck = Vec::with_capacity(25);
    deck.extend(std::iter::repeat(DevCardType::Knight).take(14));
    deck.extend(std::iter::repeat(DevCardType::VictoryPoint).take(5));
    deck.extend(std::iter::repeat(DevCardType::RoadBuilding).take(2));
    deck.extend(std::iter::repeat(DevCardType::YearOfPlenty).take(2));
    deck.extend(std::iter::repeat(DevCardType::Monopoly).take(2));
    deck
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub resources: ResourceBundle,
    /// top of the deck = index 0.
    pub dev_deck: Vec<DevCardType>,
}

impl Bank {
    pub fn new_standard(dev_deck: Vec<DevCardType>) -> Self {
        let mut resources = ResourceBundle::new();
        for res in ALL_RESOURCES {
            resources.set(res, 19);
        }
        Bank { resources, dev_deck }
    }

    pub fn draw_dev_card(&mut self) -> Option<DevCardType> {
        if self.dev_deck.is_empty() {
            None
        } else {
            Some(self.dev_deck.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_add_sub_roundtrip() {
        let mut b = ResourceBundle::new();
        b.add(Resource::Brick, 3);
        b.add(Resource::Ore, 1);
        assert_eq!(b.total(), 4);
        let cost = cost_bundle(&ROAD_COST);
        assert!(b.contains(&cost));
        b -= &cost;
        assert_eq!(b.count(Resource::Brick), 2);
        assert_eq!(b.count(Resource::Lumber), 0);
    }

    #[test]
    fn initial_deck_has_25_cards_with_fixed_composition() {
        let deck = initial_dev_deck_composition();
        assert_eq!(deck.len(), 25);
        assert_eq!(deck.iter().filter(|c| matches!(c, DevCardType::Knight)).count(), 14);
        assert_eq!(deck.iter().filter(|c| matches!(c, DevCardType::VictoryPoint)).count(), 5);
        assert_eq!(deck.iter().filter(|c| matches!(c, DevCardType::RoadBuilding)).count(), 2);
        assert_eq!(deck.iter().filter(|c| matches!(c, DevCardType::YearOfPlenty)).count(), 2);
        assert_eq!(deck.iter().filter(|c| matches!(c, DevCardType::Monopoly)).count(), 2);
    }
}
