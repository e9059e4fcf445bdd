mod cli;
mod config;
mod dispatcher;
mod logging;
mod modal;
mod output;
mod session;
mod tools;
mod types;
mod ui;
mod validate;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use config::AppConfig;
use dispatcher::Dispatcher;
use output::OutputPanel;
use session::Session;
use ui::ratatui_ui::RatatuiUi;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => {
            // Auto-generate config file on first run
            let path = AppConfig::config_path()?;
            if !path.exists() {
                AppConfig::save_default_to(&path)?;
                eprintln!("[Config] Created default config: {}", path.display());
            }
            path
        }
    };
    let mut config = AppConfig::load_from(&config_path)?;
    config.apply_env()?;

    let log = logging::init(&config.log)?;
    info!(
        config = %config_path.display(),
        log = %log.path.display(),
        "minitools starting"
    );

    let succeeded = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let session = Session::new(&config.session);
            let dispatcher = Dispatcher::new(session, OutputPanel::new());
            let tick = Duration::from_millis(config.ui.tick_ms);
            RatatuiUi::new(dispatcher, config.ui.theme, tick).run()?;
            true
        }
        Commands::List { json } => {
            cli::run_list(json)?;
            true
        }
        Commands::Run(args) => cli::run_tool(&args, &config.session)?,
    };

    // flush the log before a failing exit
    drop(log);
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
