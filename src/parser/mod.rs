pub mod timestamp;

pub use timestamp::TimestampParser;
