mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use phim_admin::ApiClientAdapter;
use phim_config::{Config, ConfigLoader, ConfigOverrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, ConfigAction, GlobalArgs, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&cli.global)?;

    match cli.command {
        Command::Categories { action } => {
            commands::references::categories(&client(&config)?, action).await
        }
        Command::Countries { action } => {
            commands::references::countries(&client(&config)?, action).await
        }
        Command::Movies { action } => {
            commands::movies::run(&client(&config)?, action).await
        }
        Command::Episodes { action } => {
            commands::episodes::run(&client(&config)?, action).await
        }
        Command::Config {
            action: ConfigAction::Show,
        } => {
            cli::output::print_config(&config);
            Ok(())
        }
    }
}

fn client(config: &Config) -> Result<ApiClientAdapter> {
    ApiClientAdapter::from_config(config)
        .context("failed to set up the catalog API client")
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut loader = ConfigLoader::new().with_overrides(ConfigOverrides {
        base_url: global.base_url.clone(),
        request_timeout: global.timeout.clone(),
    });
    if let Some(path) = &global.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &global.env_file {
        loader = loader.with_env_file(path);
    }
    let load = loader.load().context("failed to load configuration")?;
    Ok(load.config)
}
