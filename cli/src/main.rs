mod cli;
mod commands;
mod config;
mod logging;
mod store;
mod studio;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use swatch_storage::FileStore;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;
use store::SystemClock;
use studio::{Studio, StudioSettings};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let log_mode = if cli.log_file {
        LogMode::File
    } else {
        LogMode::Stderr
    };
    let _guard = logging::init(config.log_level, log_mode, log_level_override);

    match cli.command {
        Some(Commands::Config { path, reset }) => commands::config::run(path, reset),
        Some(Commands::Convert {
            color,
            format,
            legacy,
        }) => commands::convert::run(&color, format, legacy, config.hsl_syntax),
        Some(Commands::Theme { command }) => {
            let mut studio = open_studio(&config)?;
            commands::theme::run(&mut studio, command)
        }
        Some(Commands::Profile { command }) => {
            let mut studio = open_studio(&config)?;
            commands::profile::run(&mut studio, command)
        }
        Some(Commands::Mode { command }) => {
            let mut studio = open_studio(&config)?;
            commands::mode::run(&mut studio, command)
        }
        Some(Commands::Css { output }) => {
            let studio = open_studio(&config)?;
            commands::css::run(&studio, output.as_deref())
        }
        Some(Commands::Editor) | None => {
            let mut studio = open_studio(&config)?;
            commands::editor::run(&mut studio)
        }
    }
}

fn open_studio(config: &UserConfig) -> Result<Studio> {
    let data_dir = config.effective_data_dir();
    let storage = FileStore::open(&data_dir)
        .wrap_err_with(|| format!("Failed to open data directory {}", data_dir.display()))?;
    tracing::debug!(dir = %data_dir.display(), "Opened store");

    Ok(Studio::open(
        Arc::new(storage),
        Arc::new(SystemClock),
        StudioSettings {
            appearance: config.appearance,
            default_preset: config.default_preset.clone(),
        },
    ))
}
