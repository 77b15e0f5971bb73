use color_eyre::eyre::Result;
use swatch_theme::Mode;

use crate::cli::ModeCommands;
use crate::studio::Studio;

pub fn run(studio: &mut Studio, command: Option<ModeCommands>) -> Result<()> {
    match command {
        Some(ModeCommands::Light) => studio.set_mode(Mode::Light),
        Some(ModeCommands::Dark) => studio.set_mode(Mode::Dark),
        Some(ModeCommands::Toggle) => studio.toggle_mode(),
        None => {}
    }
    println!("{}", studio.current_mode());
    Ok(())
}
