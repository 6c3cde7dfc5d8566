mod common;

use common::{create_test_user, generate_unique_email, roles, setup_with_admin};
use helpdesk::helpdesk_config::AccountConfig;
use helpdesk::helpdesk_core::{ErrorKind, PaginationParams};
use helpdesk::helpdesk_models::{Admin, InvitationStatus, InviteUserDto, Role};
use helpdesk::{AdminService, FixedConfirmation};
use std::cell::RefCell;

#[test]
fn test_invite_user_creates_pending_invitation() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    let email = generate_unique_email();

    let invitation = AdminService::invite_user(
        &store,
        &admin,
        InviteUserDto {
            email: email.clone(),
            roles: roles(&[Role::Student, Role::Instructor]),
        },
    )
    .unwrap();

    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(invitation.email.as_str(), email);
    assert_eq!(invitation.invited_by, "root");
    assert_eq!(invitation.code.len(), 16);
    assert_eq!(
        invitation.expires_at - invitation.created_at,
        chrono::Duration::hours(72)
    );
    assert_eq!(store.get_invitation(&invitation.code).unwrap(), invitation);
}

#[test]
fn test_invite_user_codes_are_unique() {
    let (store, admin) = setup_with_admin(AccountConfig::default());

    let first = AdminService::invite_user(
        &store,
        &admin,
        InviteUserDto {
            email: generate_unique_email(),
            roles: roles(&[Role::Student]),
        },
    )
    .unwrap();
    let second = AdminService::invite_user(
        &store,
        &admin,
        InviteUserDto {
            email: generate_unique_email(),
            roles: roles(&[Role::Student]),
        },
    )
    .unwrap();

    assert_ne!(first.code, second.code);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_invite_user_rejects_invalid_email() {
    let (store, admin) = setup_with_admin(AccountConfig::default());

    let err = AdminService::invite_user(
        &store,
        &admin,
        InviteUserDto {
            email: "not-an-email".to_string(),
            roles: roles(&[Role::Student]),
        },
    )
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::BadRequest);
}

#[test]
fn test_reset_user_account_uses_configured_length() {
    let config = AccountConfig {
        otp_length: 6,
        ..AccountConfig::default()
    };
    let (store, admin) = setup_with_admin(config);
    create_test_user(&store, "student1", &[Role::Student]);

    let otp = AdminService::reset_user_account(&store, &admin, "student1").unwrap();

    assert_eq!(otp.username, "student1");
    assert_eq!(otp.password.len(), 6);
    assert!(
        otp.password
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    );

    let user = store.get_user("student1").unwrap();
    assert!(user.is_one_time_password());
    assert!(!user.is_one_time_password_expired(chrono::Utc::now()));
}

#[test]
fn test_reset_unknown_user_is_not_found() {
    let (store, admin) = setup_with_admin(AccountConfig::default());

    let err = AdminService::reset_user_account(&store, &admin, "ghost").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.one_time_password_for("ghost").unwrap(), None);
}

#[test]
fn test_delete_user_account_confirmed() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "student1", &[Role::Student]);
    AdminService::reset_user_account(&store, &admin, "student1").unwrap();

    let deleted =
        AdminService::delete_user_account(&store, &admin, "student1", &FixedConfirmation(true))
            .unwrap();

    assert!(deleted);
    assert!(!store.contains_user("student1").unwrap());
    assert_eq!(store.one_time_password_for("student1").unwrap(), None);
}

#[test]
fn test_delete_user_account_declined() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "student1", &[Role::Student]);

    let deleted =
        AdminService::delete_user_account(&store, &admin, "student1", &FixedConfirmation(false))
            .unwrap();

    assert!(!deleted);
    assert!(store.contains_user("student1").unwrap());
}

#[test]
fn test_delete_user_account_asks_about_the_right_user() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "student1", &[Role::Student]);
    let asked = RefCell::new(Vec::new());
    let confirm = |username: &str| {
        asked.borrow_mut().push(username.to_string());
        true
    };

    assert!(AdminService::delete_user_account(&store, &admin, "student1", &confirm).unwrap());
    assert_eq!(asked.into_inner(), vec!["student1".to_string()]);
}

#[test]
fn test_delete_unknown_user_skips_confirmation() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    let confirm = |_: &str| -> bool { panic!("confirmation should not be requested") };

    let err = AdminService::delete_user_account(&store, &admin, "ghost", &confirm).unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_list_user_accounts_sorted_by_username() {
    let (store, _admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "zed", &[Role::Instructor, Role::Student]);
    create_test_user(&store, "amy", &[Role::Student]);

    let summaries = AdminService::list_user_accounts(&store).unwrap();
    let usernames: Vec<&str> = summaries.iter().map(|s| s.username()).collect();

    assert_eq!(usernames, vec!["amy", "root", "zed"]);
    assert_eq!(summaries[2].role_codes(), &["student", "instructor"]);
    assert_eq!(
        summaries[0].full_name(),
        store.get_user("amy").unwrap().full_name()
    );
}

#[test]
fn test_list_user_accounts_paginated() {
    let (store, _admin) = setup_with_admin(AccountConfig::default());
    for i in 0..4 {
        create_test_user(&store, &format!("user{}", i), &[Role::Student]);
    }

    let params = PaginationParams {
        limit: Some(2),
        offset: None,
        page: Some(2),
    };
    let page = AdminService::list_user_accounts_paginated(&store, &params).unwrap();

    let usernames: Vec<&str> = page.data.iter().map(|s| s.username()).collect();
    assert_eq!(usernames, vec!["user1", "user2"]);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.page, Some(2));
    assert_eq!(page.meta.offset, None);
    assert!(page.meta.has_more);

    let last = PaginationParams {
        limit: Some(2),
        offset: Some(4),
        page: None,
    };
    let page = AdminService::list_user_accounts_paginated(&store, &last).unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.offset, Some(4));
    assert!(!page.meta.has_more);
}

#[test]
fn test_add_and_remove_user_role() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "student1", &[Role::Student]);

    assert!(AdminService::add_user_role(&store, &admin, "student1", Role::Instructor).unwrap());
    assert!(!AdminService::add_user_role(&store, &admin, "student1", Role::Instructor).unwrap());
    assert!(
        AdminService::remove_user_role(&store, &admin, "student1", Role::Student).unwrap()
    );
    assert!(
        !AdminService::remove_user_role(&store, &admin, "student1", Role::Student).unwrap()
    );

    let user = store.get_user("student1").unwrap();
    assert_eq!(user.roles(), &roles(&[Role::Instructor]));
}

#[test]
fn test_remove_only_role_is_rejected() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    create_test_user(&store, "student1", &[Role::Student]);

    let err =
        AdminService::remove_user_role(&store, &admin, "student1", Role::Student).unwrap_err();

    assert_eq!(err.kind, ErrorKind::BadRequest);
    assert!(store.get_user("student1").unwrap().has_role(Role::Student));
}

#[test]
fn test_last_admin_keeps_admin_role() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    AdminService::add_user_role(&store, &admin, "root", Role::Instructor).unwrap();

    let err = AdminService::remove_user_role(&store, &admin, "root", Role::Admin).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadRequest);

    create_test_user(&store, "second", &[Role::Admin]);
    assert!(AdminService::remove_user_role(&store, &admin, "root", Role::Admin).unwrap());
    assert_eq!(store.count_with_role(Role::Admin).unwrap(), 1);
}

#[test]
fn test_deleted_admin_cannot_act() {
    let (store, admin) = setup_with_admin(AccountConfig::default());
    let other = Admin::try_from(create_test_user(&store, "other", &[Role::Admin])).unwrap();

    AdminService::delete_user_account(&store, &other, "root", &FixedConfirmation(true)).unwrap();

    let err = AdminService::reset_user_account(&store, &admin, "other").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}
