pub mod game_runtime;
pub mod registry;

pub use game_runtime::{GameRuntime, SubmitOutcome};
pub use registry::GameRegistry;
