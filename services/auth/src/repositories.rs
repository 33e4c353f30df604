//! Repositories over the backend REST API

pub mod user;

pub use user::UserRepository;
