//! # Helpdesk
//!
//! User and role management for a help desk application.
//!
//! ## Overview
//!
//! - **Users**: a base user entity with profile, roles, one-time password
//!   state, and topic expertise, plus role views (`Admin`, `Student`,
//!   `Instructor`)
//! - **Administration**: invitations, account resets with one-time
//!   passwords, confirmed account deletion, role management, and account
//!   listings
//! - **Self service**: redeeming invitations, finishing account setup,
//!   selecting a role, and logging out
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── confirm.rs        # "Are you sure?" confirmation for deletions
//! ├── store.rs          # In-memory account store
//! └── modules/
//!     ├── admin/        # Administrator operations
//!     └── users/        # Operations on one's own account
//! ```
//!
//! Domain types live in `helpdesk-models`, errors, pagination and code
//! generation in `helpdesk-core`, configuration in `helpdesk-config`, and
//! logging setup in `helpdesk-observability`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use helpdesk::{AccountStore, AdminService, UserService, FixedConfirmation};
//!
//! helpdesk::init();
//! let store = AccountStore::from_env();
//! let admin = UserService::create_first_admin(&store, dto)?;
//! let invitation = AdminService::invite_user(&store, &admin, invite)?;
//! ```
//!
//! ### Environment Variables
//!
//! ```bash
//! OTP_EXPIRY_HOURS=24
//! OTP_LENGTH=10
//! INVITATION_EXPIRY_HOURS=72
//! LOG_LEVEL=info
//! LOG_FORMAT=json
//! ```

pub mod confirm;
pub mod modules;
pub mod store;

pub use confirm::{ConfirmDeletion, FixedConfirmation, PromptConfirmation};
pub use modules::{AdminService, UserService};
pub use store::AccountStore;

// Re-export workspace crates for convenience
pub use helpdesk_config;
pub use helpdesk_core;
pub use helpdesk_models;

/// Load `.env` and install console logging.
pub fn init() {
    helpdesk_config::load_dotenv();
    if let Err(e) = helpdesk_observability::try_init_console_logging() {
        eprintln!("Logging already initialized: {}", e);
    }
}
