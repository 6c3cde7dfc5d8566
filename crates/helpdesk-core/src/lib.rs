//! # Helpdesk Core
//!
//! Core types, errors, and utilities shared by the help desk crates.
//!
//! - [`errors`]: Application error type with a coarse error kind
//! - [`pagination`]: Pagination parameters and metadata for listings
//! - [`codes`]: Random invitation codes and one-time passwords
//!
//! # Example
//!
//! ```ignore
//! use helpdesk_core::errors::AppError;
//! use helpdesk_core::codes::generate_invitation_code;
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let code = generate_invitation_code();
//! ```

pub mod codes;
pub mod errors;
pub mod pagination;

// Re-export commonly used types at crate root
pub use codes::{generate_invitation_code, generate_one_time_password};
pub use errors::{AppError, AppResult, ErrorKind};
pub use pagination::{PaginationMeta, PaginationParams};
