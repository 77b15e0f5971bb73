use std::path::PathBuf;

use clap::Subcommand;
use swatch_theme::{Mode, StyleKey};

#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// List presets and custom themes (default)
    #[command(alias = "ls")]
    List {
        /// Only user-created and brand themes
        #[arg(long)]
        custom: bool,

        #[arg(long)]
        pinned: bool,

        /// Case-insensitive match on name, description and tags
        #[arg(short, long)]
        search: Option<String>,
    },

    Show {
        id: String,

        /// Print the full theme as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(alias = "new")]
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Preset key to start from
        #[arg(short, long)]
        base: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    #[command(alias = "cp")]
    Duplicate { id: String },

    #[command(alias = "rm")]
    Delete { id: String },

    /// Toggle whether a theme is pinned
    Pin { id: String },

    /// Make a theme active; without an id, clear the active theme
    Apply {
        id: Option<String>,

        /// Treat the argument as a preset key
        #[arg(short, long)]
        preset: bool,
    },

    /// Change one style value of a custom theme
    Set {
        id: String,

        key: StyleKey,

        value: String,

        #[arg(short, long, default_value = "light")]
        mode: Mode,
    },

    Export {
        id: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    #[command(alias = "i")]
    Import { file: PathBuf },
}
