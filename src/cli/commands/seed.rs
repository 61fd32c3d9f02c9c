//! Sample data generator for trying the analyzer on a fresh database.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::Config;
use crate::constants::timestamps::FALLBACK_FORMAT;
use crate::db::Store;
use crate::domain::Timestamp;

/// Fixed population covering every tier and both sides of each boundary.
const SAMPLE_USERS: &[(&str, Option<i64>)] = &[
    ("alice", Some(1)),
    ("bob", Some(5)),
    ("charlie", Some(7)),
    ("diana", Some(10)),
    ("eve", Some(20)),
    ("frank", Some(30)),
    ("grace", Some(45)),
    ("henry", Some(90)),
    ("iris", Some(180)),
    ("john", None),
];

/// `(username, last_login)` rows for `count` users relative to `now`.
///
/// The first ten are the fixed samples; the rest get random ages, some in
/// the fallback text format and roughly one in ten never logged in.
fn sample_rows(count: usize, now: DateTime<Utc>) -> Vec<(String, Option<String>)> {
    let mut rng = rand::rng();
    let mut rows: Vec<(String, Option<String>)> = SAMPLE_USERS
        .iter()
        .take(count)
        .map(|(name, days)| {
            let login = days.map(|d| Timestamp::from(now - Duration::days(d)).to_iso_string());
            ((*name).to_string(), login)
        })
        .collect();

    for n in rows.len()..count {
        let login = if rng.random_bool(0.1) {
            None
        } else {
            let at = now - Duration::hours(rng.random_range(0..=24 * 365));
            Some(if n % 2 == 0 {
                Timestamp::from(at).to_iso_string()
            } else {
                at.format(FALLBACK_FORMAT).to_string()
            })
        };
        rows.push((format!("user{}", n + 1), login));
    }

    rows
}

pub async fn cmd_seed(config: &Config, count: Option<usize>) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;

    let existing = store.user_count().await?;
    if existing > 0 {
        println!("Users table already holds {existing} users, not seeding.");
        return Ok(());
    }

    let count = count.unwrap_or(config.seed.user_count);
    let rows = sample_rows(count, Utc::now());

    for (index, (username, last_login)) in rows.into_iter().enumerate() {
        let user_id = i64::try_from(index + 1)?;
        store.add_user(user_id, &username, last_login).await?;
    }

    println!("✓ Created sample database with {count} users");
    Ok(())
}
