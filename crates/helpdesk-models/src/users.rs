//! User domain models and DTOs.
//!
//! This module contains the user entity, the role views layered on top of it
//! ([`Admin`], [`Student`], [`Instructor`]), and the [`UserSummary`]
//! projection used by account listings.

use crate::roles::Role;
use crate::value_types::Email;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use helpdesk_core::{AppError, AppResult, PaginationMeta};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Deref;
use tracing::info;
use validator::Validate;

/// How well a user knows a help topic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// DTO for constructing a [`User`].
///
/// Every field is copied verbatim into the user. Call `validate()` first when
/// the values come from an untrusted source.
#[derive(Deserialize, Clone, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub email: Email,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub one_time_password: bool,
    #[serde(default)]
    pub one_time_password_expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topic_expertise: BTreeMap<String, ExpertiseLevel>,
}

impl fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// DTO for completing account setup after an invitation or reset.
///
/// `None` name fields are left unchanged. An empty middle or preferred name
/// clears it.
#[derive(Deserialize, Clone, Default, Validate)]
pub struct AccountSetupDto {
    /// The one-time password issued by an account reset, if any.
    pub one_time_password: Option<String>,
    #[validate(length(min = 8))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub preferred_name: Option<String>,
}

impl fmt::Debug for AccountSetupDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSetupDto")
            .field("first_name", &self.first_name)
            .field("middle_name", &self.middle_name)
            .field("last_name", &self.last_name)
            .field("preferred_name", &self.preferred_name)
            .finish_non_exhaustive()
    }
}

/// A user of the help desk.
///
/// The model enforces no invariants at construction. The password is kept as
/// supplied and is never exposed through a getter, `Debug`, or serialization.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    username: String,
    #[serde(skip_serializing)]
    password: String,
    email: Email,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    preferred_name: Option<String>,
    roles: BTreeSet<Role>,
    one_time_password: bool,
    one_time_password_expiration: Option<DateTime<Utc>>,
    topic_expertise: BTreeMap<String, ExpertiseLevel>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("middle_name", &self.middle_name)
            .field("last_name", &self.last_name)
            .field("preferred_name", &self.preferred_name)
            .field("roles", &self.roles)
            .field("one_time_password", &self.one_time_password)
            .field(
                "one_time_password_expiration",
                &self.one_time_password_expiration,
            )
            .field("topic_expertise", &self.topic_expertise)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl User {
    pub fn new(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
            email: dto.email,
            first_name: dto.first_name,
            middle_name: dto.middle_name,
            last_name: dto.last_name,
            preferred_name: dto.preferred_name,
            roles: dto.roles,
            one_time_password: dto.one_time_password,
            one_time_password_expiration: dto.one_time_password_expiration,
            topic_expertise: dto.topic_expertise,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn preferred_name(&self) -> Option<&str> {
        self.preferred_name.as_deref()
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn is_one_time_password(&self) -> bool {
        self.one_time_password
    }

    pub fn one_time_password_expiration(&self) -> Option<DateTime<Utc>> {
        self.one_time_password_expiration
    }

    pub fn topic_expertise(&self) -> &BTreeMap<String, ExpertiseLevel> {
        &self.topic_expertise
    }

    /// First, middle (when present and non-empty), and last name joined by single spaces.
    pub fn full_name(&self) -> String {
        match non_empty(&self.middle_name) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// The preferred name when set and non-empty, otherwise the first name.
    pub fn display_name(&self) -> &str {
        non_empty(&self.preferred_name).unwrap_or(self.first_name.as_str())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// True when a one-time password is pending and its expiration is missing or has passed.
    pub fn is_one_time_password_expired(&self, now: DateTime<Utc>) -> bool {
        self.one_time_password
            && self
                .one_time_password_expiration
                .is_none_or(|expires_at| expires_at <= now)
    }

    pub fn logout(&self) {
        info!(username = %self.username, "User logged out");
    }

    /// Picks one of the user's roles to act under.
    pub fn select_role(&self, role: Role) -> AppResult<Role> {
        if !self.has_role(role) {
            return Err(AppError::forbidden(anyhow!(
                "User {} does not have the {} role",
                self.username,
                role
            )));
        }

        info!(username = %self.username, role = %role, "Role selected");
        Ok(role)
    }

    /// Replaces the password and any supplied name fields, then clears the
    /// pending one-time password.
    pub fn finish_account_setup(
        &mut self,
        dto: AccountSetupDto,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        dto.validate().map_err(AppError::bad_request)?;

        if self.is_one_time_password_expired(now) {
            return Err(AppError::unauthorized(anyhow!(
                "One-time password for {} has expired",
                self.username
            )));
        }

        self.password = dto.new_password;
        if let Some(first_name) = dto.first_name {
            self.first_name = first_name;
        }
        if let Some(middle_name) = dto.middle_name {
            self.middle_name = Some(middle_name).filter(|s| !s.is_empty());
        }
        if let Some(last_name) = dto.last_name {
            self.last_name = last_name;
        }
        if let Some(preferred_name) = dto.preferred_name {
            self.preferred_name = Some(preferred_name).filter(|s| !s.is_empty());
        }
        self.clear_one_time_password();

        info!(username = %self.username, "Account setup finished");
        Ok(())
    }

    pub fn set_one_time_password(&mut self, expiration: DateTime<Utc>) {
        self.one_time_password = true;
        self.one_time_password_expiration = Some(expiration);
    }

    pub fn clear_one_time_password(&mut self) {
        self.one_time_password = false;
        self.one_time_password_expiration = None;
    }

    /// Returns `false` when the role was already held.
    pub fn add_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Returns `false` when the role was not held.
    pub fn remove_role(&mut self, role: Role) -> bool {
        self.roles.remove(&role)
    }

    pub fn set_topic_expertise(&mut self, topic: impl Into<String>, level: ExpertiseLevel) {
        self.topic_expertise.insert(topic.into(), level);
    }
}

/// A landing page description for a role view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub role: Role,
    pub username: String,
    pub greeting: String,
}

macro_rules! role_view {
    (
        $(#[$meta:meta])*
        $name:ident => $role:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(User);

        impl $name {
            pub const ROLE: Role = $role;

            pub fn as_user(&self) -> &User {
                &self.0
            }

            pub fn into_user(self) -> User {
                self.0
            }

            pub fn access_home_page(&self) -> HomePage {
                HomePage {
                    role: Self::ROLE,
                    username: self.0.username().to_string(),
                    greeting: format!("Welcome, {}!", self.0.display_name()),
                }
            }
        }

        impl TryFrom<User> for $name {
            type Error = AppError;

            fn try_from(user: User) -> Result<Self, Self::Error> {
                if user.has_role(Self::ROLE) {
                    Ok(Self(user))
                } else {
                    Err(AppError::forbidden(anyhow!(
                        "User {} does not have the {} role",
                        user.username(),
                        Self::ROLE
                    )))
                }
            }
        }

        impl Deref for $name {
            type Target = User;

            fn deref(&self) -> &User {
                &self.0
            }
        }
    };
}

role_view!(
    /// A user holding the Admin role. Account management lives in the admin service.
    Admin => Role::Admin
);

role_view!(
    /// A user holding the Student role.
    Student => Role::Student
);

role_view!(
    /// A user holding the Instructor role.
    Instructor => Role::Instructor
);

/// Summary of an account for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    username: String,
    full_name: String,
    role_codes: Vec<String>,
}

impl UserSummary {
    pub fn new(username: String, full_name: String, role_codes: Vec<String>) -> Self {
        Self {
            username,
            full_name,
            role_codes,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn role_codes(&self) -> &[String] {
        &self.role_codes
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            full_name: user.full_name(),
            role_codes: user.roles().iter().map(|r| r.slug().to_string()).collect(),
        }
    }
}

/// Paginated listing of account summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedUserSummaries {
    pub data: Vec<UserSummary>,
    pub meta: PaginationMeta,
}

/// A one-time password issued by an account reset.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct OneTimePassword {
    pub username: String,
    pub password: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for OneTimePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneTimePassword")
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
