//! Orchestrates one analysis run: load, classify, log inactive users, summarize.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::{ActivityCategory, ClassifiedUser};
use crate::services::classifier::UserClassifier;
use crate::services::error::AnalyzerError;
use crate::services::loader::ActivityLoader;
use crate::services::log_writer::InactiveLogWriter;
use crate::services::store::ActivityStore;
use crate::services::summary::ActivitySummary;

/// Everything a run produced, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    pub reference: DateTime<Utc>,
    pub summary: ActivitySummary,
    pub inactive_logged: usize,
    pub users: &'a [ClassifiedUser],
}

/// Runs the activity pipeline against one store.
///
/// The reference instant is fixed at construction and shared by every user
/// in every run. Each call to [`UserActivityAnalyzer::analyze`] reloads from
/// storage and appends a fresh batch to the inactive log.
pub struct UserActivityAnalyzer {
    loader: ActivityLoader,
    classifier: UserClassifier,
    writer: InactiveLogWriter,
    classified: Vec<ClassifiedUser>,
    inactive_logged: usize,
}

impl UserActivityAnalyzer {
    /// Creates an analyzer; `reference` defaults to now.
    #[must_use]
    pub fn new(store: Arc<dyn ActivityStore>, reference: Option<DateTime<Utc>>) -> Self {
        let reference = reference.unwrap_or_else(Utc::now);

        Self {
            loader: ActivityLoader::new(Arc::clone(&store)),
            classifier: UserClassifier::new(reference),
            writer: InactiveLogWriter::new(store),
            classified: Vec::new(),
            inactive_logged: 0,
        }
    }

    #[must_use]
    pub const fn reference(&self) -> DateTime<Utc> {
        self.classifier.reference()
    }

    /// Runs the full pipeline and returns the summary.
    ///
    /// Results of the previous run are only replaced once this run has
    /// completed, including its log write.
    ///
    /// # Errors
    ///
    /// Load, parse and validation failures abort before anything is written.
    /// A write failure is returned after the log batch has been rolled back.
    #[instrument(skip(self), fields(reference = %self.reference()))]
    pub async fn analyze(&mut self) -> Result<ActivitySummary, AnalyzerError> {
        info!("Starting user activity analysis");

        let records = self.loader.load_all().await?;
        let classified = self.classifier.classify_many(&records)?;
        let inactive_logged = self.writer.log_inactive(&classified).await?;
        let summary = ActivitySummary::from_classified(&classified);

        record_metrics(&summary, inactive_logged);

        self.classified = classified;
        self.inactive_logged = inactive_logged;

        info!(
            total = summary.total_users,
            active = summary.active_count,
            dormant = summary.dormant_count,
            inactive = summary.inactive_count,
            logged = inactive_logged,
            "User activity analysis complete"
        );

        Ok(summary)
    }

    /// Loads and classifies a single user without touching the log.
    pub async fn classify_user(&self, user_id: i64) -> Result<ClassifiedUser, AnalyzerError> {
        let last_login = self.loader.load_last_login(user_id).await?;
        self.classifier.classify(user_id, last_login)
    }

    /// Classified users of the last completed run, ordered by id.
    #[must_use]
    pub fn classified_users(&self) -> &[ClassifiedUser] {
        &self.classified
    }

    /// Rows written to the inactive log by the last completed run.
    #[must_use]
    pub const fn inactive_logged(&self) -> usize {
        self.inactive_logged
    }

    #[must_use]
    pub fn summary(&self) -> ActivitySummary {
        ActivitySummary::from_classified(&self.classified)
    }

    #[must_use]
    pub fn formatted_summary(&self) -> String {
        self.summary().to_string()
    }

    #[must_use]
    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport {
            reference: self.reference(),
            summary: self.summary(),
            inactive_logged: self.inactive_logged,
            users: &self.classified,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn record_metrics(summary: &ActivitySummary, inactive_logged: usize) {
    metrics::counter!("activity_analysis_runs_total").increment(1);
    for category in ActivityCategory::ALL {
        metrics::counter!("activity_users_classified_total", "category" => category.as_str())
            .increment(summary.count(category) as u64);
    }
    metrics::counter!("activity_inactive_logged_total").increment(inactive_logged as u64);
    metrics::gauge!("activity_last_run_total_users").set(summary.total_users as f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoginValue, Timestamp};
    use crate::services::memory::MemoryActivityStore;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()
    }

    fn ago(days: i64) -> Option<LoginValue> {
        Some(LoginValue::Instant(Timestamp::from(
            reference() - Duration::days(days),
        )))
    }

    fn scenario_store() -> MemoryActivityStore {
        let store = MemoryActivityStore::new();
        store.add_user(1, ago(1));
        store.add_user(2, ago(8));
        store.add_user(3, ago(31));
        store.add_user(4, None);
        store
    }

    #[tokio::test]
    async fn four_user_scenario() {
        let store = scenario_store();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        let summary = analyzer.analyze().await.unwrap();

        assert_eq!(summary.total_users, 4);
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.dormant_count, 1);
        assert_eq!(summary.inactive_count, 2);
        assert_eq!(
            summary.oldest_last_login.map(|t| t.to_utc()),
            Some(reference() - Duration::days(31))
        );

        let categories: Vec<ActivityCategory> = analyzer
            .classified_users()
            .iter()
            .map(|u| u.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                ActivityCategory::Active,
                ActivityCategory::Dormant,
                ActivityCategory::Inactive,
                ActivityCategory::Inactive,
            ]
        );

        let logged: Vec<i64> = store.logged().iter().map(|e| e.user_id).collect();
        assert_eq!(logged, vec![3, 4]);
        assert_eq!(analyzer.inactive_logged(), summary.inactive_count);
    }

    #[tokio::test]
    async fn empty_store_yields_zero_summary_and_no_writes() {
        let store = MemoryActivityStore::new();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        let summary = analyzer.analyze().await.unwrap();

        assert_eq!(summary, ActivitySummary::default());
        assert!(store.logged().is_empty());
        assert_eq!(store.transactions_opened(), 0);
        assert!(analyzer.formatted_summary().ends_with("Oldest Last Login: N/A"));
    }

    #[tokio::test]
    async fn rerun_appends_a_second_batch() {
        let store = scenario_store();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        analyzer.analyze().await.unwrap();
        analyzer.analyze().await.unwrap();

        let logged: Vec<i64> = store.logged().iter().map(|e| e.user_id).collect();
        assert_eq!(logged, vec![3, 4, 3, 4]);
    }

    #[tokio::test]
    async fn rerun_sees_new_users() {
        let store = scenario_store();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));
        analyzer.analyze().await.unwrap();

        store.add_user(5, ago(100));
        let summary = analyzer.analyze().await.unwrap();

        assert_eq!(summary.total_users, 5);
        assert_eq!(summary.inactive_count, 3);
    }

    #[tokio::test]
    async fn load_failure_prevents_writes() {
        let store = scenario_store();
        store.fail_loads();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        assert!(matches!(analyzer.analyze().await, Err(AnalyzerError::Load { .. })));
        assert_eq!(store.transactions_opened(), 0);
        assert!(analyzer.classified_users().is_empty());
    }

    #[tokio::test]
    async fn bad_timestamp_aborts_run() {
        let store = scenario_store();
        store.add_user(9, Some(LoginValue::from("not a date")));
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        assert!(matches!(
            analyzer.analyze().await,
            Err(AnalyzerError::InvalidTimestamp(_))
        ));
        assert!(store.logged().is_empty());
    }

    #[tokio::test]
    async fn invalid_id_aborts_run() {
        let store = scenario_store();
        store.add_user(0, ago(3));
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        assert!(matches!(
            analyzer.analyze().await,
            Err(AnalyzerError::InvalidUserId(0))
        ));
        assert_eq!(store.transactions_opened(), 0);
    }

    #[tokio::test]
    async fn write_failure_rolls_back_and_keeps_previous_results() {
        let store = scenario_store();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));
        analyzer.analyze().await.unwrap();

        store.fail_insert_after(1);
        store.add_user(5, ago(60));
        assert!(matches!(analyzer.analyze().await, Err(AnalyzerError::Write { .. })));

        assert_eq!(store.logged().len(), 2);
        assert_eq!(analyzer.classified_users().len(), 4);
    }

    #[tokio::test]
    async fn single_user_lookup() {
        let store = scenario_store();
        let analyzer = UserActivityAnalyzer::new(Arc::new(store.clone()), Some(reference()));

        let user = analyzer.classify_user(2).await.unwrap();
        assert_eq!(user.category, ActivityCategory::Dormant);
        assert_eq!(user.days_since_login, Some(8));

        let never = analyzer.classify_user(4).await.unwrap();
        assert_eq!(never.category, ActivityCategory::Inactive);

        assert!(matches!(
            analyzer.classify_user(99).await,
            Err(AnalyzerError::UserNotFound(99))
        ));
        assert!(store.logged().is_empty());
    }

    #[tokio::test]
    async fn report_serializes_summary_and_users() {
        let store = scenario_store();
        let mut analyzer = UserActivityAnalyzer::new(Arc::new(store), Some(reference()));
        analyzer.analyze().await.unwrap();

        let json = serde_json::to_value(analyzer.report()).unwrap();

        assert_eq!(json["summary"]["total_users"], 4);
        assert_eq!(json["inactive_logged"], 2);
        assert_eq!(json["users"][3]["category"], "INACTIVE");
        assert_eq!(json["users"][3]["days_since_login"], serde_json::Value::Null);
        assert_eq!(json["users"][0]["user_id"], 1);
    }

    #[test]
    fn reference_defaults_to_now() {
        let before = Utc::now();
        let analyzer = UserActivityAnalyzer::new(Arc::new(MemoryActivityStore::new()), None);
        assert!(analyzer.reference() >= before);
        assert!(analyzer.reference() <= Utc::now());
    }
}
