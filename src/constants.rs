pub mod thresholds {

    /// Logins at most this many days old are ACTIVE.
    pub const ACTIVE_DAYS: i64 = 7;

    /// Logins at most this many days old (and older than `ACTIVE_DAYS`) are DORMANT.
    pub const DORMANT_DAYS: i64 = 30;
}

pub mod error_codes {

    pub const DATABASE: &str = "DB_001";

    pub const VALIDATION: &str = "VAL_001";

    pub const INVALID_DATE: &str = "DATE_001";

    pub const USER_NOT_FOUND: &str = "USER_001";
}

pub mod timestamps {

    /// Fallback pattern tried after every ISO-8601 form has failed.
    pub const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub const SECONDS_PER_DAY: i64 = 86_400;
}

pub mod limits {

    pub const DEFAULT_LOG_LIMIT: u64 = 20;

    pub const SAMPLE_USER_COUNT: usize = 10;
}
