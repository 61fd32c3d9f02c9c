//! CLI module - Command-line interface for the activity analyzer
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::constants::limits::DEFAULT_LOG_LIMIT;

/// Activity Analyzer - classify users as ACTIVE, DORMANT or INACTIVE
/// from the age of their last login
#[derive(Parser)]
#[command(name = "activity-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to the standard search locations)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every user, log inactive users and print the summary
    #[command(alias = "a")]
    Analyze {
        /// Reference instant (ISO-8601 or "YYYY-MM-DD HH:MM:SS"), defaults to now
        #[arg(long)]
        reference: Option<String>,
        /// Print one line per user
        #[arg(long)]
        details: bool,
        /// Print the summary and classified users as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a single user without writing to the inactive log
    #[command(alias = "u")]
    User {
        /// User ID
        id: i64,
        /// Reference instant, defaults to now
        #[arg(long)]
        reference: Option<String>,
    },

    /// Show the most recent inactive log entries
    #[command(alias = "history")]
    Log {
        /// Number of entries to show
        #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: u64,
    },

    /// Fill an empty users table with sample data
    Seed {
        /// Number of users to create, defaults to `seed.user_count`
        #[arg(long)]
        count: Option<usize>,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
