//! Authentication for the academic ERP console
//!
//! This crate holds the client side of sign-in: the user and role models,
//! the application session, the access gate deciding which views a session
//! may see, and the OAuth start and completion steps.

pub mod gate;
pub mod models;
pub mod oauth;
pub mod repositories;
pub mod session;

pub use gate::AccessDecision;
pub use models::{Role, User, is_finance_role};
pub use repositories::UserRepository;
pub use session::{Session, SessionState};
