//! # Helpdesk Config
//!
//! Configuration types for the help desk account model, loaded from
//! environment variables:
//!
//! - [`account`]: one-time password and invitation lifetimes
//!
//! # Example
//!
//! ```ignore
//! use helpdesk_config::AccountConfig;
//!
//! helpdesk_config::load_dotenv();
//! let account_config = AccountConfig::from_env();
//! ```

pub mod account;

// Re-export commonly used types at crate root
pub use account::AccountConfig;

/// Load variables from a `.env` file, if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}
