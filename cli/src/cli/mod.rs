mod profile;
mod theme;

pub use profile::ProfileCommands;
pub use theme::ThemeCommands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use swatch_theme::ColorFormat;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse, create and apply standalone themes
    #[command(alias = "themes")]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Manage brand profiles
    #[command(aliases = ["profiles", "brand"])]
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },

    /// Show or switch the appearance mode
    Mode {
        #[command(subcommand)]
        command: Option<ModeCommands>,
    },

    /// Convert a CSS color to another notation
    Convert {
        color: String,

        /// Target format (hsl, rgb, oklch, hex)
        #[arg(short, long, default_value = "hsl")]
        format: ColorFormat,

        /// Bare `H S% L%` output instead of `hsl(...)`; defaults to the config
        #[arg(long)]
        legacy: bool,
    },

    /// Print the generated CSS for the current theme
    Css {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive editing session with undo/redo
    #[command(alias = "edit")]
    Editor,

    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ModeCommands {
    Light,
    Dark,
    #[command(alias = "t")]
    Toggle,
}

#[derive(Debug, Parser)]
#[command(name = "swatch", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to the rolling log file instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use swatch_theme::{Mode, StyleKey};

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_theme_set() {
        let cli = Cli::parse_from([
            "swatch", "theme", "set", "theme-1-abc", "primary", "#ff0000", "--mode", "dark",
        ]);
        match cli.command {
            Some(Commands::Theme {
                command: Some(ThemeCommands::Set { id, key, value, mode }),
            }) => {
                assert_eq!(id, "theme-1-abc");
                assert_eq!(key, StyleKey::Primary);
                assert_eq!(value, "#ff0000");
                assert_eq!(mode, Mode::Dark);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_and_global_flags() {
        let cli = Cli::parse_from(["swatch", "convert", "#00ff00", "-f", "oklch", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.command,
            Some(Commands::Convert { format: ColorFormat::Oklch, legacy: false, .. })
        ));
    }
}
