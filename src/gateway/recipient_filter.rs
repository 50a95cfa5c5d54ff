#![allow(dead_code)]
//! §4.10's recipient filtering: the runtime publishes full-information
//! events; this is where a specific viewer's copy gets redacted before it
//! ever reaches `serde_json::to_string`.

use serde_json::Value;

use crate::rules_engine::domain::player::PlayerId;
use crate::rules_engine::events::Event;

/// Returns the event a given viewer is entitled to see. `resourceStolen`
/// keeps its resource type only for the thief and the victim;
/// `developmentCardBought` keeps its card type only for the buyer.
/// Implemented by round-tripping through JSON and removing the field
/// rather than inventing an "unknown" domain variant for it.
pub fn redact_for_viewer(event: &Event, viewer: &PlayerId) -> Value {
    let mut value = serde_json::to_value(event).expect("events always serialize");
    let field_to_strip = match event {
        Event::ResourceStolen { thief, victim, .. } if viewer != thief && viewer != victim => Some("resource"),
        Event::DevelopmentCardBought { player, .. } if viewer != player => Some("card_type"),
        _ => None,
    };
    if let Some(field) = field_to_strip {
        if let Some(map) = value.as_object_mut() {
            map.remove(field);
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules_engine::domain::bank::Resource;

    #[test]
    fn bystander_does_not_see_stolen_resource_type() {
        let event = Event::ResourceStolen { thief: "a".into(), victim: "b".into(), resource: Resource::Ore };
        let redacted = redact_for_viewer(&event, &"c".to_string());
        assert!(redacted.get("resource").is_none());
    }

    #[test]
    fn thief_sees_stolen_resource_type() {
        let event = Event::ResourceStolen { thief: "a".into(), victim: "b".into(), resource: Resource::Ore };
        let redacted = redact_for_viewer(&event, &"a".to_string());
        assert!(redacted.get("resource").is_some());
    }
}
