use serde::Serialize;
use std::fmt;

use crate::domain::{ActivityCategory, ClassifiedUser, Timestamp};

/// `count / total * 100`, rounded to one decimal place. Zero when `total` is zero.
///
/// Rounding is the same as `{:.1}` formatting, so 1/16 (6.25%) is 6.2.
#[must_use]
pub fn percentage(count: usize, total: usize) -> f64 {
    let raw = raw_percentage(count, total);
    format!("{raw:.1}").parse().unwrap_or(raw)
}

#[allow(clippy::cast_precision_loss)]
fn raw_percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Aggregate counts over one set of classified users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub total_users: usize,
    pub active_count: usize,
    pub dormant_count: usize,
    pub inactive_count: usize,
    pub oldest_last_login: Option<Timestamp>,
}

impl ActivitySummary {
    #[must_use]
    pub fn from_classified(users: &[ClassifiedUser]) -> Self {
        let mut summary = Self {
            total_users: users.len(),
            ..Self::default()
        };

        for user in users {
            match user.category {
                ActivityCategory::Active => summary.active_count += 1,
                ActivityCategory::Dormant => summary.dormant_count += 1,
                ActivityCategory::Inactive => summary.inactive_count += 1,
            }
        }

        summary.oldest_last_login = users
            .iter()
            .filter_map(|user| user.last_login)
            .min_by_key(Timestamp::to_utc);

        summary
    }

    #[must_use]
    pub const fn count(&self, category: ActivityCategory) -> usize {
        match category {
            ActivityCategory::Active => self.active_count,
            ActivityCategory::Dormant => self.dormant_count,
            ActivityCategory::Inactive => self.inactive_count,
        }
    }

    #[must_use]
    pub fn percentage(&self, category: ActivityCategory) -> f64 {
        percentage(self.count(category), self.total_users)
    }

    fn line(&self, label: &str, category: ActivityCategory) -> String {
        let count = self.count(category);
        format!(
            "{label} Users: {count} ({:.1}%)",
            percentage(count, self.total_users)
        )
    }
}

impl fmt::Display for ActivitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Activity Summary")?;
        writeln!(f, "{:=<50}", "")?;
        writeln!(f, "Total Users: {}", self.total_users)?;
        writeln!(f, "{}", self.line("Active", ActivityCategory::Active))?;
        writeln!(f, "{}", self.line("Dormant", ActivityCategory::Dormant))?;
        writeln!(f, "{}", self.line("Inactive", ActivityCategory::Inactive))?;
        match &self.oldest_last_login {
            Some(ts) => write!(f, "Oldest Last Login: {ts}"),
            None => write!(f, "Oldest Last Login: N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn user(id: i64, category: ActivityCategory, login: Option<Timestamp>) -> ClassifiedUser {
        ClassifiedUser {
            user_id: UserId::try_from(id).unwrap(),
            last_login: login,
            days_since_login: login.map(|_| 0),
            category,
        }
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let summary = ActivitySummary::from_classified(&[]);
        assert_eq!(summary, ActivitySummary::default());
        assert_eq!(summary.oldest_last_login, None);
        assert_eq!(summary.percentage(ActivityCategory::Active), 0.0);
    }

    #[test]
    fn counts_add_up_to_total() {
        let users = vec![
            user(1, ActivityCategory::Active, None),
            user(2, ActivityCategory::Dormant, None),
            user(3, ActivityCategory::Inactive, None),
            user(4, ActivityCategory::Inactive, None),
            user(5, ActivityCategory::Active, None),
        ];

        let summary = ActivitySummary::from_classified(&users);

        assert_eq!(summary.total_users, 5);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.dormant_count, 1);
        assert_eq!(summary.inactive_count, 2);
        assert_eq!(
            summary.active_count + summary.dormant_count + summary.inactive_count,
            summary.total_users
        );
    }

    #[test]
    fn oldest_login_compares_true_instants() {
        // 10:00+05:00 is 05:00 UTC, earlier than the naive 06:00.
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let zoned = Timestamp::Zoned(offset.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        let naive = Timestamp::Naive(
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap().naive_utc(),
        );
        let users = vec![
            user(1, ActivityCategory::Active, Some(naive)),
            user(2, ActivityCategory::Inactive, None),
            user(3, ActivityCategory::Active, Some(zoned)),
        ];

        let summary = ActivitySummary::from_classified(&users);
        assert_eq!(summary.oldest_last_login, Some(zoned));
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(5, 5), 100.0);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_agrees_with_rendered_line() {
        assert_eq!(percentage(1, 16), 6.2);

        let mut users = vec![user(1, ActivityCategory::Active, None)];
        users.extend((2..=16).map(|id| user(id, ActivityCategory::Inactive, None)));
        let summary = ActivitySummary::from_classified(&users);

        assert!(summary.to_string().contains("Active Users: 1 (6.2%)"));

        for total in 1..400 {
            for count in 0..=total {
                let shown = format!("{:.1}", raw_percentage(count, total));
                assert_eq!(format!("{:.1}", percentage(count, total)), shown);
            }
        }
    }

    #[test]
    fn render_follows_template() {
        let login = Timestamp::from(Utc.with_ymd_and_hms(2023, 12, 1, 9, 30, 0).unwrap());
        let users = vec![
            user(1, ActivityCategory::Active, None),
            user(2, ActivityCategory::Dormant, None),
            user(3, ActivityCategory::Inactive, Some(login)),
        ];

        let text = ActivitySummary::from_classified(&users).to_string();

        let expected = format!(
            "User Activity Summary\n{}\nTotal Users: 3\nActive Users: 1 (33.3%)\n\
             Dormant Users: 1 (33.3%)\nInactive Users: 1 (33.3%)\n\
             Oldest Last Login: 2023-12-01T09:30:00+00:00",
            "=".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn render_without_logins_shows_na() {
        let text = ActivitySummary::default().to_string();
        assert!(text.contains("Total Users: 0"));
        assert!(text.contains("Active Users: 0 (0.0%)"));
        assert!(text.ends_with("Oldest Last Login: N/A"));
    }
}
