use std::path::PathBuf;

use clap::Subcommand;
use swatch_theme::{Mode, StyleKey};

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// List profiles, most recently updated first (default)
    #[command(alias = "ls")]
    List,

    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    #[command(alias = "new")]
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        /// Preset the profile's theme reference points at
        #[arg(short, long)]
        preset: Option<String>,

        /// Existing profile to copy the theme and tokens from
        #[arg(short, long)]
        copy_from: Option<String>,
    },

    #[command(alias = "cp")]
    Duplicate { id: String },

    #[command(alias = "rm")]
    Delete { id: String },

    /// Make a profile active; without an id, clear the active profile
    Apply { id: Option<String> },

    /// Point a profile at a theme
    Use { id: String, theme_id: String },

    /// Override one value of the referenced theme for one mode
    Override {
        id: String,

        key: StyleKey,

        value: String,

        #[arg(short, long, default_value = "light")]
        mode: Mode,
    },

    /// Move an embedded legacy theme into a brand theme
    Migrate { id: String },

    /// Print the flat CSS variable map of a profile
    Vars {
        id: String,

        #[arg(short, long, default_value = "light")]
        mode: Mode,
    },

    /// Export one profile, or every profile when no id is given
    Export {
        id: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a profile or an array of profiles
    #[command(alias = "i")]
    Import { file: PathBuf },

    /// Delete every profile
    Clear {
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
