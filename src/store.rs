//! In-memory account storage.
//!
//! [`AccountStore`] is a cheaply cloneable handle, the way a connection pool
//! would be, over the users, pending invitations, and outstanding one-time
//! passwords of a help desk. Nothing is persisted.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use helpdesk_config::AccountConfig;
use helpdesk_core::{AppError, AppResult};
use helpdesk_models::{AccountSetupDto, Invitation, Role, User};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Accounts {
    users: BTreeMap<String, User>,
    invitations: HashMap<String, Invitation>,
    one_time_passwords: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<Accounts>>,
    config: AccountConfig,
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn user_not_found(username: &str) -> AppError {
    AppError::not_found(anyhow!("User {} not found", username))
}

impl AccountStore {
    pub fn new(config: AccountConfig) -> Self {
        Self {
            inner: Arc::default(),
            config,
        }
    }

    /// An empty store configured from the environment.
    pub fn from_env() -> Self {
        Self::new(AccountConfig::from_env())
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Accounts>> {
        self.inner
            .read()
            .map_err(|_| AppError::internal(anyhow!("Account store lock poisoned")))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Accounts>> {
        self.inner
            .write()
            .map_err(|_| AppError::internal(anyhow!("Account store lock poisoned")))
    }

    /// Adds a user. Usernames are unique.
    pub fn insert_user(&self, user: User) -> AppResult<()> {
        let mut accounts = self.write()?;
        if accounts.users.contains_key(user.username()) {
            return Err(AppError::conflict(anyhow!(
                "Username {} is already taken",
                user.username()
            )));
        }
        accounts.users.insert(user.username().to_string(), user);
        Ok(())
    }

    pub fn get_user(&self, username: &str) -> AppResult<User> {
        self.read()?
            .users
            .get(username)
            .cloned()
            .ok_or_else(|| user_not_found(username))
    }

    pub fn contains_user(&self, username: &str) -> AppResult<bool> {
        Ok(self.read()?.users.contains_key(username))
    }

    /// Applies `f` to the stored user while holding the write lock.
    pub fn update_user<T, F>(&self, username: &str, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut User) -> AppResult<T>,
    {
        let mut accounts = self.write()?;
        let user = accounts
            .users
            .get_mut(username)
            .ok_or_else(|| user_not_found(username))?;
        f(user)
    }

    /// Removes a user together with any outstanding one-time password.
    pub fn remove_user(&self, username: &str) -> AppResult<User> {
        let mut accounts = self.write()?;
        accounts.one_time_passwords.remove(username);
        accounts
            .users
            .remove(username)
            .ok_or_else(|| user_not_found(username))
    }

    /// Adds the first account of an empty store.
    pub fn insert_first_user(&self, user: User) -> AppResult<()> {
        let mut accounts = self.write()?;
        if !accounts.users.is_empty() {
            return Err(AppError::conflict(anyhow!(
                "The store already has accounts"
            )));
        }
        accounts.users.insert(user.username().to_string(), user);
        Ok(())
    }

    /// Removes `role` from a user.
    ///
    /// Returns `false` when the role was not held. A user keeps at least one
    /// role, and the last administrator keeps the Admin role.
    pub fn remove_user_role(&self, username: &str, role: Role) -> AppResult<bool> {
        let mut accounts = self.write()?;
        let admins = accounts
            .users
            .values()
            .filter(|user| user.has_role(Role::Admin))
            .count();
        let user = accounts
            .users
            .get_mut(username)
            .ok_or_else(|| user_not_found(username))?;

        if !user.has_role(role) {
            return Ok(false);
        }
        if user.roles().len() == 1 {
            return Err(AppError::bad_request(anyhow!(
                "Cannot remove the only role of {}",
                username
            )));
        }
        if role == Role::Admin && admins == 1 {
            return Err(AppError::bad_request(anyhow!(
                "Cannot remove the Admin role from the last administrator"
            )));
        }

        Ok(user.remove_role(role))
    }

    /// All users, ordered by username.
    pub fn users(&self) -> AppResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    pub fn user_count(&self) -> AppResult<usize> {
        Ok(self.read()?.users.len())
    }

    pub fn count_with_role(&self, role: Role) -> AppResult<usize> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|user| user.has_role(role))
            .count())
    }

    /// Stores an invitation under its code. Codes are unique.
    pub fn insert_invitation(&self, invitation: Invitation) -> AppResult<()> {
        let mut accounts = self.write()?;
        if accounts.invitations.contains_key(&invitation.code) {
            return Err(AppError::conflict(anyhow!("Invitation code already issued")));
        }
        accounts
            .invitations
            .insert(invitation.code.clone(), invitation);
        Ok(())
    }

    pub fn contains_invitation(&self, code: &str) -> AppResult<bool> {
        Ok(self.read()?.invitations.contains_key(code))
    }

    pub fn get_invitation(&self, code: &str) -> AppResult<Invitation> {
        self.read()?
            .invitations
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("Invitation not found")))
    }

    /// Applies `f` to the stored invitation while holding the write lock.
    pub fn update_invitation<T, F>(&self, code: &str, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Invitation) -> AppResult<T>,
    {
        let mut accounts = self.write()?;
        let invitation = accounts
            .invitations
            .get_mut(code)
            .ok_or_else(|| AppError::not_found(anyhow!("Invitation not found")))?;
        f(invitation)
    }

    /// Drops invitations that were redeemed, marked expired, or have run out.
    ///
    /// Returns the number removed.
    pub fn purge_invitations(&self, now: DateTime<Utc>) -> AppResult<usize> {
        let mut accounts = self.write()?;
        let before = accounts.invitations.len();
        accounts
            .invitations
            .retain(|_, invitation| invitation.is_pending() && !invitation.is_expired(now));
        Ok(before - accounts.invitations.len())
    }

    /// Flags `username` for account setup and records the one-time password,
    /// replacing any earlier one.
    pub fn issue_one_time_password(
        &self,
        username: &str,
        password: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut guard = self.write()?;
        let accounts = &mut *guard;
        let user = accounts
            .users
            .get_mut(username)
            .ok_or_else(|| user_not_found(username))?;

        user.set_one_time_password(expires_at);
        accounts
            .one_time_passwords
            .insert(username.to_string(), password);
        Ok(())
    }

    pub fn one_time_password_for(&self, username: &str) -> AppResult<Option<String>> {
        Ok(self.read()?.one_time_passwords.get(username).cloned())
    }

    /// Finishes account setup for a user flagged by an account reset.
    ///
    /// `dto` must carry the outstanding one-time password, which is consumed
    /// on success. Accounts that are not in setup are rejected.
    pub fn complete_setup(
        &self,
        username: &str,
        dto: AccountSetupDto,
        now: DateTime<Utc>,
    ) -> AppResult<User> {
        let mut guard = self.write()?;
        let accounts = &mut *guard;
        let user = accounts
            .users
            .get_mut(username)
            .ok_or_else(|| user_not_found(username))?;

        let matches = match (
            accounts.one_time_passwords.get(username),
            dto.one_time_password.as_deref(),
        ) {
            (Some(expected), Some(presented)) => expected == presented,
            _ => false,
        };
        if !user.is_one_time_password() || !matches {
            return Err(AppError::unauthorized(anyhow!(
                "Invalid one-time password for {}",
                username
            )));
        }

        user.finish_account_setup(dto, now)?;
        accounts.one_time_passwords.remove(username);
        Ok(user.clone())
    }
}
