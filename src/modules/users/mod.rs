//! Operations a user performs on their own account.

pub mod service;

pub use service::UserService;
