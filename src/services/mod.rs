pub mod analyzer;
pub use analyzer::{AnalysisReport, UserActivityAnalyzer};

pub mod classifier;
pub use classifier::{UserClassifier, categorize, classify_user, days_since};

pub mod error;
pub use error::{AnalyzerError, StoreError};

pub mod loader;
pub use loader::ActivityLoader;

pub mod log_writer;
pub use log_writer::InactiveLogWriter;

pub mod memory;
pub use memory::MemoryActivityStore;

pub mod sea_orm_store;
pub use sea_orm_store::SeaOrmActivityStore;

pub mod store;
pub use store::{ActivityStore, LogTransaction};

pub mod summary;
pub use summary::{ActivitySummary, percentage};
