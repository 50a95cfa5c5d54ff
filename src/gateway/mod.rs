pub mod dispatch;
pub mod recipient_filter;
pub mod state;
pub mod ws;

pub use state::AppState;
