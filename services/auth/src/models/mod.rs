//! Authentication models

pub mod role;
pub mod user;

// Re-export for convenience
pub use role::{FINANCE_PREFIX, Role, is_finance_role};
pub use user::User;
