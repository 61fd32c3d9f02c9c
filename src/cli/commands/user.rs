use std::sync::Arc;

use super::{format_user_line, parse_reference};
use crate::config::Config;
use crate::db::Store;
use crate::services::{AnalyzerError, SeaOrmActivityStore, UserActivityAnalyzer};

pub async fn cmd_user(config: &Config, id: i64, reference: Option<&str>) -> anyhow::Result<()> {
    let reference = parse_reference(reference)?;
    let store = Store::from_config(config).await?;
    let analyzer = UserActivityAnalyzer::new(Arc::new(SeaOrmActivityStore::new(store)), reference);

    match analyzer.classify_user(id).await {
        Ok(user) => {
            println!("{}", format_user_line(&user));
            Ok(())
        }
        Err(AnalyzerError::UserNotFound(_)) => {
            println!("User with ID {id} not found.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
