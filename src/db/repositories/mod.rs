pub mod inactive_log;
pub mod user;
