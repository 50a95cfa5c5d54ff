pub mod handlers;
pub mod session;
pub mod users;

pub use session::{issue_token, verify_token};
pub use users::PersistUser;
