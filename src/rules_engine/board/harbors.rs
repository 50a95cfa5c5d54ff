#![allow(dead_code)]
use serde::{Deserialize, Serialize};

use super::geometry::NodeId;
use crate::rules_engine::domain::bank::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HarborId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarborKind {
    Generic3to1,
    Specific2to1(Resource),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harbor {
    pub id: HarborId,
    pub kind: HarborKind,
    pub nodes: Vec<NodeId>,
}
