use anyhow::Context;
use std::sync::Arc;

use super::{format_user_line, parse_reference};
use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmActivityStore, UserActivityAnalyzer};

pub async fn cmd_analyze(
    config: &Config,
    reference: Option<&str>,
    details: bool,
    json: bool,
) -> anyhow::Result<()> {
    let reference = parse_reference(reference)?;
    let store = Store::from_config(config).await?;
    let activity_store = Arc::new(SeaOrmActivityStore::new(store.clone()));

    let mut analyzer = UserActivityAnalyzer::new(activity_store, reference);
    analyzer
        .analyze()
        .await
        .context("User activity analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analyzer.report())?);
        return Ok(());
    }

    println!("{}", analyzer.formatted_summary());
    println!();

    if details {
        println!("Detailed User Classifications:");
        println!("{:-<60}", "");
        for user in analyzer.classified_users() {
            println!("{}", format_user_line(user));
        }
        println!();
    }

    let total_logged = store.inactive_log_count().await?;
    println!(
        "✓ Logged {} inactive users ({} entries in log)",
        analyzer.inactive_logged(),
        total_logged
    );

    Ok(())
}
