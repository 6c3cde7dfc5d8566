use anyhow::anyhow;
use chrono::Utc;
use helpdesk_core::{AppError, AppResult, ErrorKind};
use helpdesk_models::{
    AcceptInvitationDto, AccountSetupDto, Admin, CreateUserDto, HomePage, Instructor,
    InvitationStatus, Role, Student, User,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::store::AccountStore;

pub struct UserService;

impl UserService {
    /// Create the administrator of an empty store.
    #[instrument(skip(store))]
    pub fn create_first_admin(store: &AccountStore, mut dto: CreateUserDto) -> AppResult<Admin> {
        dto.validate().map_err(AppError::bad_request)?;

        dto.roles.insert(Role::Admin);
        dto.one_time_password = false;
        dto.one_time_password_expiration = None;

        let user = User::new(dto);
        store
            .insert_first_user(user.clone())
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => {
                    AppError::forbidden(anyhow!("An administrator already exists"))
                }
                _ => e,
            })?;

        info!(username = %user.username(), "First administrator created");
        Admin::try_from(user)
    }

    /// Create an account from an invitation code.
    ///
    /// The invitation is claimed before the account is inserted, so a code
    /// can only be redeemed once.
    #[instrument(skip(store, code))]
    pub fn accept_invitation(
        store: &AccountStore,
        code: &str,
        dto: AcceptInvitationDto,
    ) -> AppResult<User> {
        dto.validate().map_err(AppError::bad_request)?;
        let now = Utc::now();

        let invitation = store.update_invitation(code, |invitation| {
            if !invitation.is_pending() {
                return Err(AppError::bad_request(anyhow!(
                    "Invitation is {}",
                    invitation.status
                )));
            }
            if invitation.is_expired(now) {
                invitation.status = InvitationStatus::Expired;
                return Err(AppError::bad_request(anyhow!("Invitation has expired")));
            }
            invitation.status = InvitationStatus::Accepted;
            Ok(invitation.clone())
        })?;

        let user = User::new(CreateUserDto {
            username: dto.username,
            password: dto.password,
            email: invitation.email.clone(),
            first_name: dto.first_name,
            middle_name: dto.middle_name,
            last_name: dto.last_name,
            preferred_name: dto.preferred_name,
            roles: invitation.roles.clone(),
            one_time_password: false,
            one_time_password_expiration: None,
            topic_expertise: Default::default(),
        });

        if let Err(e) = store.insert_user(user.clone()) {
            warn!(invitation_id = %invitation.id, "Account creation failed, releasing invitation");
            store.update_invitation(code, |invitation| {
                invitation.status = InvitationStatus::Pending;
                Ok(())
            })?;
            return Err(e);
        }

        info!(
            username = %user.username(),
            invitation_id = %invitation.id,
            "Invitation accepted"
        );
        Ok(user)
    }

    /// Complete setup of a reset account, consuming its one-time password.
    ///
    /// Only accounts flagged by an account reset accept this, and only with
    /// the one-time password that reset issued.
    #[instrument(skip(store, dto))]
    pub fn finish_account_setup(
        store: &AccountStore,
        username: &str,
        dto: AccountSetupDto,
    ) -> AppResult<User> {
        store
            .complete_setup(username, dto, Utc::now())
            .inspect_err(|e| {
                if e.kind == ErrorKind::Unauthorized {
                    warn!(%username, error = %e, "Account setup rejected");
                }
            })
    }

    #[instrument(skip(store))]
    pub fn select_role(store: &AccountStore, username: &str, role: Role) -> AppResult<Role> {
        store.get_user(username)?.select_role(role)
    }

    #[instrument(skip(store))]
    pub fn logout(store: &AccountStore, username: &str) -> AppResult<()> {
        store.get_user(username)?.logout();
        Ok(())
    }

    /// The home page `username` sees when acting as `role`.
    #[instrument(skip(store))]
    pub fn home_page(store: &AccountStore, username: &str, role: Role) -> AppResult<HomePage> {
        let user = store.get_user(username)?;
        let page = match role {
            Role::Admin => Admin::try_from(user)?.access_home_page(),
            Role::Student => Student::try_from(user)?.access_home_page(),
            Role::Instructor => Instructor::try_from(user)?.access_home_page(),
        };
        Ok(page)
    }
}
