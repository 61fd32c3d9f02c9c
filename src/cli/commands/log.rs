use crate::config::Config;
use crate::db::Store;

pub async fn cmd_log(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;
    let entries = store.recent_inactive_log(limit).await?;

    if entries.is_empty() {
        println!("Inactive log is empty.");
        println!();
        println!("Run an analysis with: activity-analyzer analyze");
        return Ok(());
    }

    println!("Inactive Log (last {}):", entries.len());
    println!("{:-<70}", "");

    for entry in entries {
        let login = entry.last_login.as_deref().unwrap_or("Never");
        let days = entry
            .days_since_login
            .map_or_else(|| "N/A".to_string(), |d| format!("{d} days"));
        println!("• #{} User {} - {}", entry.log_id, entry.user_id, days);
        println!("  Last Login: {} | Logged: {}", login, entry.logged_at);
    }

    Ok(())
}
