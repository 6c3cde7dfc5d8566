pub mod admin;
pub mod users;

pub use self::admin::AdminService;
pub use self::users::UserService;
