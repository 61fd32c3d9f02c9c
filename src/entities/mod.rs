pub mod prelude;

pub mod inactive_log;
pub mod users;
