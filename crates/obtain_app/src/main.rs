mod cli;
mod commands;
mod config;
mod platform;
mod wire;

use anyhow::Result;
use clap::Parser;
use obtain_core::View;

use crate::cli::{Cli, Command, ThemeCommand};
use crate::commands::Commands;
use crate::config::ClientConfig;
use crate::platform::logging::{self, LogDestination};
use crate::platform::persistence::PreferenceStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.server);
    let level = config.level_filter()?;

    let command = cli.command.unwrap_or(Command::Ui {
        view: cli::StartView::Home,
    });

    let destination = match command {
        Command::Ui { .. } => LogDestination::File(config.state_dir()),
        _ => LogDestination::Terminal,
    };
    logging::initialize(destination, level);

    match command {
        Command::Ui { view } => platform::run_app(&config, View::from(view)),
        Command::List => Commands::new(&config)?.list(),
        Command::Submit { url, convert } => {
            Commands::new(&config)?.submit(url, convert.map(Into::into))
        }
        Command::Retry { job_id } => Commands::new(&config)?.retry(&job_id),
        Command::Delete { filename, yes } => Commands::new(&config)?.delete(&filename, yes),
        Command::Save { filename, output } => Commands::new(&config)?.save(&filename, output),
        Command::Theme { action } => commands::theme(
            &PreferenceStore::new(config.state_dir()),
            action.unwrap_or(ThemeCommand::Show),
        ),
    }
}
