pub use super::inactive_log::Entity as InactiveLog;
pub use super::users::Entity as Users;
