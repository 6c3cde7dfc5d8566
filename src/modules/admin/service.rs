use anyhow::anyhow;
use chrono::Utc;
use helpdesk_core::{AppError, AppResult, PaginationMeta, PaginationParams, codes};
use helpdesk_models::{
    Admin, Email, Invitation, InvitationId, InvitationStatus, InviteUserDto, OneTimePassword,
    PaginatedUserSummaries, Role, UserSummary,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::confirm::ConfirmDeletion;
use crate::store::AccountStore;

/// Attempts at drawing an invitation code that is not already in use.
const MAX_CODE_ATTEMPTS: usize = 8;

pub struct AdminService;

impl AdminService {
    /// Create an invitation for `dto.email` carrying `dto.roles`.
    ///
    /// The returned invitation holds the code the invitee redeems. Delivery
    /// is left to the caller.
    #[instrument(skip(store, admin), fields(admin = %admin.username()))]
    pub fn invite_user(
        store: &AccountStore,
        admin: &Admin,
        dto: InviteUserDto,
    ) -> AppResult<Invitation> {
        Self::ensure_active(store, admin)?;
        dto.validate().map_err(AppError::bad_request)?;

        if dto.roles.is_empty() {
            return Err(AppError::bad_request(anyhow!(
                "An invitation needs at least one role"
            )));
        }
        let email = Email::new(dto.email).map_err(AppError::bad_request)?;

        let now = Utc::now();
        let expires_at = store
            .config()
            .invitation_expires_at(now)
            .ok_or_else(|| AppError::internal(anyhow!("Invitation lifetime out of range")))?;

        let purged = store.purge_invitations(now)?;
        if purged > 0 {
            debug!(purged, "Purged stale invitations");
        }

        let code = Self::generate_invitation_code(store)?;
        let invitation = Invitation {
            id: InvitationId::new(),
            code,
            email,
            roles: dto.roles,
            invited_by: admin.username().to_string(),
            created_at: now,
            expires_at,
            status: InvitationStatus::Pending,
        };
        store.insert_invitation(invitation.clone())?;

        info!(
            invitation_id = %invitation.id,
            email = %invitation.email,
            expires_at = %invitation.expires_at,
            "Invitation created"
        );
        Ok(invitation)
    }

    /// Issue a one-time password for `username` and flag the account for setup.
    #[instrument(skip(store, admin), fields(admin = %admin.username()))]
    pub fn reset_user_account(
        store: &AccountStore,
        admin: &Admin,
        username: &str,
    ) -> AppResult<OneTimePassword> {
        Self::ensure_active(store, admin)?;

        let password = Self::generate_one_time_password(store);
        let expires_at = store
            .config()
            .otp_expires_at(Utc::now())
            .ok_or_else(|| {
                AppError::internal(anyhow!("One-time password lifetime out of range"))
            })?;

        store.issue_one_time_password(username, password.clone(), expires_at)?;

        info!(%username, %expires_at, "Account reset with one-time password");
        Ok(OneTimePassword {
            username: username.to_string(),
            password,
            expires_at,
        })
    }

    /// Delete `username` once `confirm` agrees.
    ///
    /// Returns `false` without changes when the confirmation is declined.
    #[instrument(skip(store, admin, confirm), fields(admin = %admin.username()))]
    pub fn delete_user_account<C>(
        store: &AccountStore,
        admin: &Admin,
        username: &str,
        confirm: &C,
    ) -> AppResult<bool>
    where
        C: ConfirmDeletion + ?Sized,
    {
        Self::ensure_active(store, admin)?;

        if !store.contains_user(username)? {
            return Err(AppError::not_found(anyhow!("User {} not found", username)));
        }
        if username == admin.username() {
            return Err(AppError::bad_request(anyhow!(
                "Administrators cannot delete their own account"
            )));
        }

        if !Self::confirm_deletion(confirm, username)? {
            info!(%username, "Account deletion cancelled");
            return Ok(false);
        }

        store.remove_user(username)?;
        info!(%username, "Account deleted");
        Ok(true)
    }

    /// Summaries of every account, ordered by username.
    #[instrument(skip(store))]
    pub fn list_user_accounts(store: &AccountStore) -> AppResult<Vec<UserSummary>> {
        let users = store.users()?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    #[instrument(skip(store))]
    pub fn list_user_accounts_paginated(
        store: &AccountStore,
        params: &PaginationParams,
    ) -> AppResult<PaginatedUserSummaries> {
        let summaries = Self::list_user_accounts(store)?;
        let meta = PaginationMeta::for_params(params, summaries.len());

        Ok(PaginatedUserSummaries {
            data: params.window(&summaries).to_vec(),
            meta,
        })
    }

    /// Grant `role` to `username`. Returns `false` when the role was already held.
    #[instrument(skip(store, admin), fields(admin = %admin.username()))]
    pub fn add_user_role(
        store: &AccountStore,
        admin: &Admin,
        username: &str,
        role: Role,
    ) -> AppResult<bool> {
        Self::ensure_active(store, admin)?;

        let added = store.update_user(username, |user| Ok(user.add_role(role)))?;
        if added {
            info!(%username, %role, "Role added");
        }
        Ok(added)
    }

    /// Revoke `role` from `username`. Returns `false` when the role was not held.
    #[instrument(skip(store, admin), fields(admin = %admin.username()))]
    pub fn remove_user_role(
        store: &AccountStore,
        admin: &Admin,
        username: &str,
        role: Role,
    ) -> AppResult<bool> {
        Self::ensure_active(store, admin)?;

        let removed = store.remove_user_role(username, role)?;
        if removed {
            info!(%username, %role, "Role removed");
        }
        Ok(removed)
    }

    // Private helper methods

    /// The acting admin must still exist and still hold the Admin role.
    fn ensure_active(store: &AccountStore, admin: &Admin) -> AppResult<()> {
        let current = store.get_user(admin.username()).map_err(|_| {
            AppError::forbidden(anyhow!(
                "Administrator {} no longer exists",
                admin.username()
            ))
        })?;

        if !current.has_role(Role::Admin) {
            warn!(admin = %admin.username(), "Stale administrator rejected");
            return Err(AppError::forbidden(anyhow!(
                "User {} is no longer an administrator",
                admin.username()
            )));
        }
        Ok(())
    }

    fn generate_invitation_code(store: &AccountStore) -> AppResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = codes::generate_invitation_code();
            if !store.contains_invitation(&code)? {
                return Ok(code);
            }
        }
        Err(AppError::internal(anyhow!(
            "Could not generate a unique invitation code"
        )))
    }

    fn generate_one_time_password(store: &AccountStore) -> String {
        codes::generate_one_time_password(store.config().otp_length)
    }

    fn confirm_deletion<C>(confirm: &C, username: &str) -> AppResult<bool>
    where
        C: ConfirmDeletion + ?Sized,
    {
        confirm.confirm(username)
    }
}
