use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use helpdesk::AccountStore;
use helpdesk::helpdesk_config::AccountConfig;
use helpdesk::helpdesk_models::{AcceptInvitationDto, Admin, CreateUserDto, Email, Role, User};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

/// Create a user holding `roles` and insert it into the store.
pub fn create_test_user(store: &AccountStore, username: &str, roles: &[Role]) -> User {
    let user = User::new(CreateUserDto {
        username: username.to_string(),
        password: TEST_PASSWORD.to_string(),
        email: Email::new_unchecked(format!("{}@asu.edu", username)),
        first_name: FirstName().fake(),
        middle_name: None,
        last_name: LastName().fake(),
        preferred_name: None,
        roles: roles.iter().copied().collect(),
        one_time_password: false,
        one_time_password_expiration: None,
        topic_expertise: Default::default(),
    });
    store.insert_user(user.clone()).unwrap();
    user
}

/// A store seeded with a single administrator.
pub fn setup_with_admin(config: AccountConfig) -> (AccountStore, Admin) {
    let store = AccountStore::new(config);
    let admin = Admin::try_from(create_test_user(&store, "root", &[Role::Admin])).unwrap();
    (store, admin)
}

#[allow(dead_code)]
pub fn roles(roles: &[Role]) -> BTreeSet<Role> {
    roles.iter().copied().collect()
}

#[allow(dead_code)]
pub fn accept_dto(username: &str) -> AcceptInvitationDto {
    AcceptInvitationDto {
        username: username.to_string(),
        password: TEST_PASSWORD.to_string(),
        first_name: FirstName().fake(),
        middle_name: None,
        last_name: LastName().fake(),
        preferred_name: None,
    }
}

#[allow(dead_code)]
pub fn generate_unique_username() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@asu.edu", Uuid::new_v4())
}
