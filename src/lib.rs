pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod parser;
pub mod services;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    init_tracing(&config);

    match cli.command {
        Some(Commands::Analyze {
            reference,
            details,
            json,
        }) => cli::cmd_analyze(&config, reference.as_deref(), details, json).await,

        Some(Commands::User { id, reference }) => {
            cli::cmd_user(&config, id, reference.as_deref()).await
        }

        Some(Commands::Log { limit }) => cli::cmd_log(&config, limit).await,

        Some(Commands::Seed { count }) => cli::cmd_seed(&config, count).await,

        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Created default config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }

        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so `analyze --json` output stays parseable.
    if config.observability.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
