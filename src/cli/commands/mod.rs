mod analyze;
mod log;
mod seed;
mod user;

pub use analyze::cmd_analyze;
pub use log::cmd_log;
pub use seed::cmd_seed;
pub use user::cmd_user;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::domain::{ClassifiedUser, Timestamp};
use crate::parser::TimestampParser;

/// Parses a `--reference` argument; absent means "now".
fn parse_reference(reference: Option<&str>) -> anyhow::Result<Option<DateTime<Utc>>> {
    reference
        .map(|s| {
            TimestampParser::parse(s)
                .map(|ts| ts.to_utc())
                .with_context(|| format!("Invalid --reference value: {s}"))
        })
        .transpose()
}

/// Login as recorded, without shifting it to UTC.
fn format_login(ts: &Timestamp) -> String {
    const FMT: &str = "%Y-%m-%d %H:%M:%S";
    match ts {
        Timestamp::Zoned(dt) => dt.format(FMT).to_string(),
        Timestamp::Naive(naive) => naive.format(FMT).to_string(),
    }
}

fn format_user_line(user: &ClassifiedUser) -> String {
    let login = user
        .last_login
        .as_ref()
        .map_or_else(|| "Never".to_string(), format_login);
    let days = user
        .days_since_login
        .map_or_else(|| "N/A".to_string(), |d| format!("{d} days ago"));

    format!(
        "User {:>3}: {:<10} | Last Login: {:<20} | {}",
        user.user_id,
        user.category.as_str(),
        login,
        days
    )
}
