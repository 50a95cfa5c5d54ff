pub mod board;
pub mod domain;
pub mod event_applier;
pub mod events;
pub mod intents;
pub mod longest_road;
pub mod reducer;
pub mod rng;
pub mod validator;
pub mod violations;

pub use events::Event;
pub use intents::Intent;
pub use violations::{Violation, ViolationKind};
