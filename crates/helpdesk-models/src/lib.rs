//! # Helpdesk Models
//!
//! Domain models and DTOs for the help desk account model.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed identifiers
//! - [`invitations`]: Pending account invitations
//! - [`roles`]: The role labels a user can hold
//! - [`users`]: The user entity, role views, and account summaries
//! - [`value_types`]: Validated primitives such as email addresses
//!
//! # Example
//!
//! ```ignore
//! use helpdesk_models::{CreateUserDto, Role, User, UserSummary};
//!
//! let user = User::new(dto);
//! assert_eq!(user.display_name(), "Izzy");
//! let summary = UserSummary::from(&user);
//! ```

pub mod ids;
pub mod invitations;
pub mod roles;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use ids::InvitationId;
pub use invitations::{AcceptInvitationDto, Invitation, InvitationStatus, InviteUserDto};
pub use roles::{ParseRoleError, Role};
pub use users::{
    AccountSetupDto, Admin, CreateUserDto, ExpertiseLevel, HomePage, Instructor, OneTimePassword,
    PaginatedUserSummaries, Student, User, UserSummary,
};
pub use value_types::{Email, ValueTypeError};
