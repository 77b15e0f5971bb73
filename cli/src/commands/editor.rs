use std::io::{self, BufRead, Write};
use std::str::FromStr;

use color_eyre::eyre::Result;
use swatch_theme::{parse_color, HslAdjustments, Mode, ModeOverrides, StyleKey};

use crate::store::{CreateThemeOptions, ProfilePatch};
use crate::studio::Studio;

const HELP: &str = "\
Commands:
  set <key> <value> [light|dark]   change one style value (current mode by default)
  mode [light|dark|toggle]         show or switch the mode
  preset <key>                     load a preset
  hsl <hue> <saturation> <light>   shift hue, scale saturation and lightness
  undo | redo                      step through history
  checkpoint | restore             save or return to a checkpoint
  reset                            drop all edits and return to the preset
  status                           show the editor state
  css                              print the generated CSS
  save <name>                      store the current styles as a custom theme
  edit <profile-id> | done         start or stop editing a brand profile
  help | quit";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditorError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Set {
        key: StyleKey,
        value: String,
        mode: Option<Mode>,
    },
    Mode(Option<ModeChange>),
    Preset(String),
    Hsl(HslAdjustments),
    Undo,
    Redo,
    Checkpoint,
    Restore,
    Reset,
    Status,
    Css,
    Save(String),
    Edit(String),
    Done,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeChange {
    Set(Mode),
    Toggle,
}

fn number(value: &str) -> Result<f64, EditorError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| EditorError::InvalidArgument(format!("'{}' is not a number", value)))
}

impl FromStr for EditorCommand {
    type Err = EditorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Err(EditorError::Usage("<command> [args...]"));
        };

        let parsed = match (command, args) {
            ("set", [key, rest @ ..]) if !rest.is_empty() => {
                let key = StyleKey::from_str(key).map_err(EditorError::InvalidArgument)?;
                let (value, mode) = match rest.split_last() {
                    Some((last, head)) if !head.is_empty() => match Mode::from_str(last) {
                        Ok(mode) => (head.join(" "), Some(mode)),
                        Err(_) => (rest.join(" "), None),
                    },
                    _ => (rest.join(" "), None),
                };
                if key.is_color() {
                    parse_color(&value).map_err(|e| {
                        EditorError::InvalidArgument(format!("invalid color '{}': {}", value, e))
                    })?;
                }
                EditorCommand::Set { key, value, mode }
            }
            ("set", _) => return Err(EditorError::Usage("set <key> <value> [light|dark]")),
            ("mode", []) => EditorCommand::Mode(None),
            ("mode", ["toggle"]) => EditorCommand::Mode(Some(ModeChange::Toggle)),
            ("mode", [mode]) => EditorCommand::Mode(Some(ModeChange::Set(
                Mode::from_str(mode).map_err(EditorError::InvalidArgument)?,
            ))),
            ("mode", _) => return Err(EditorError::Usage("mode [light|dark|toggle]")),
            ("preset", [key]) => EditorCommand::Preset(key.to_string()),
            ("preset", _) => return Err(EditorError::Usage("preset <key>")),
            ("hsl", [hue, saturation, lightness]) => EditorCommand::Hsl(HslAdjustments {
                hue_shift: number(hue)?,
                saturation_scale: number(saturation)?,
                lightness_scale: number(lightness)?,
            }),
            ("hsl", _) => return Err(EditorError::Usage("hsl <hue> <saturation> <lightness>")),
            ("save", name) if !name.is_empty() => EditorCommand::Save(name.join(" ")),
            ("save", _) => return Err(EditorError::Usage("save <name>")),
            ("edit", [id]) => EditorCommand::Edit(id.to_string()),
            ("edit", _) => return Err(EditorError::Usage("edit <profile-id>")),
            ("done", []) => EditorCommand::Done,
            ("undo", []) => EditorCommand::Undo,
            ("redo", []) => EditorCommand::Redo,
            ("checkpoint", []) => EditorCommand::Checkpoint,
            ("restore", []) => EditorCommand::Restore,
            ("reset", []) => EditorCommand::Reset,
            ("status", []) => EditorCommand::Status,
            ("css", []) => EditorCommand::Css,
            ("help" | "?", []) => EditorCommand::Help,
            ("quit" | "exit" | "q", []) => EditorCommand::Quit,
            (other, _) => return Err(EditorError::UnknownCommand(other.to_string())),
        };
        Ok(parsed)
    }
}

pub fn run(studio: &mut Studio) -> Result<()> {
    println!("swatch editor. Type 'help' for commands, 'quit' to leave.");
    print_status(studio);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("swatch> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<EditorCommand>() {
            Ok(EditorCommand::Quit) => break,
            Ok(command) => execute(studio, command),
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

pub fn execute(studio: &mut Studio, command: EditorCommand) {
    match command {
        EditorCommand::Set { key, value, mode } => {
            let mode = mode.unwrap_or(studio.current_mode());
            studio.update_editor(|editor| editor.set_style(mode, key, value));
        }
        EditorCommand::Mode(Some(ModeChange::Set(mode))) => studio.set_mode(mode),
        EditorCommand::Mode(Some(ModeChange::Toggle)) => studio.toggle_mode(),
        EditorCommand::Mode(None) => println!("{}", studio.current_mode()),
        EditorCommand::Preset(key) => {
            if swatch_theme::find_preset(&key).is_none() {
                eprintln!("Preset '{}' not found", key);
                return;
            }
            studio.update_editor(|editor| editor.apply_preset(&key));
        }
        EditorCommand::Hsl(adjustments) => {
            studio.update_editor(|editor| editor.set_hsl_adjustments(adjustments))
        }
        EditorCommand::Undo => {
            if !studio.editor().can_undo() {
                println!("Nothing to undo");
            }
            studio.update_editor(|editor| editor.undo());
        }
        EditorCommand::Redo => {
            if !studio.editor().can_redo() {
                println!("Nothing to redo");
            }
            studio.update_editor(|editor| editor.redo());
        }
        EditorCommand::Checkpoint => {
            studio.update_editor(|editor| editor.save_checkpoint());
            println!("Checkpoint saved");
        }
        EditorCommand::Restore => {
            if studio.editor().checkpoint().is_none() {
                println!("No checkpoint to restore");
            }
            studio.update_editor(|editor| editor.restore_checkpoint());
        }
        EditorCommand::Reset => studio.update_editor(|editor| editor.reset_to_current_preset()),
        EditorCommand::Status => print_status(studio),
        EditorCommand::Css => print!("{}", studio.export_css()),
        EditorCommand::Save(name) => {
            let styles = studio.editor().current_styles().clone();
            let theme = studio.update_catalog(|catalog| {
                catalog.create_theme(CreateThemeOptions {
                    styles: Some(styles),
                    ..CreateThemeOptions::named(name)
                })
            });
            println!("Saved as '{}' ({})", theme.name, theme.id);

            // while editing a profile, the saved theme becomes its reference
            match studio.profiles().editing_profile().map(|p| p.id.clone()) {
                Some(profile_id) => {
                    studio.update_profile(
                        &profile_id,
                        ProfilePatch {
                            theme_id: Some(theme.id),
                            theme_overrides: Some(ModeOverrides::default()),
                            ..ProfilePatch::default()
                        },
                    );
                    studio.apply_brand_profile(Some(&profile_id));
                    println!("Profile {} now uses it", profile_id);
                }
                None => studio.apply_theme(Some(&theme.id)),
            }
        }
        EditorCommand::Edit(id) => {
            let Some(name) = studio.profiles().get_profile(&id).map(|p| p.name.clone()) else {
                eprintln!("Profile '{}' not found", id);
                return;
            };
            studio.update_profiles(|profiles| profiles.start_editing(&id));
            studio.apply_brand_profile(Some(&id));
            println!("Editing profile '{}'", name);
        }
        EditorCommand::Done => match studio.profiles().editing_profile().map(|p| p.name.clone()) {
            Some(name) => {
                studio.update_profiles(|profiles| profiles.stop_editing());
                println!("Stopped editing '{}'", name);
            }
            None => println!("Not editing a profile"),
        },
        EditorCommand::Help => println!("{}", HELP),
        EditorCommand::Quit => {}
    }
}

fn print_status(studio: &Studio) {
    let editor = studio.editor();
    let state = editor.state();
    println!(
        "preset: {}  mode: {}  history: {}/{}{}",
        state.preset.as_deref().unwrap_or("-"),
        state.current_mode,
        editor.history_len(),
        editor.future_len(),
        if editor.has_unsaved_changes() {
            "  (modified)"
        } else {
            ""
        }
    );
    if let Some(profile) = studio.profiles().editing_profile() {
        println!("editing: {} ({})", profile.name, profile.id);
    }
    if let Some(adjustments) = state.hsl_adjustments.filter(|a| !a.is_identity()) {
        println!(
            "hsl: hue {:+} saturation x{} lightness x{}",
            adjustments.hue_shift, adjustments.saturation_scale, adjustments.lightness_scale
        );
    }
    let styles = state.current_styles();
    for key in [
        StyleKey::Background,
        StyleKey::Foreground,
        StyleKey::Primary,
        StyleKey::Accent,
        StyleKey::Radius,
    ] {
        println!("  {:<12} {}", key, styles.get(key).unwrap_or("-"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::ManualClock;
    use crate::studio::StudioSettings;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use swatch_storage::MemoryStore;

    fn studio() -> Studio {
        Studio::open(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(Utc::now())),
            StudioSettings::default(),
        )
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            "set primary #ff0000 dark".parse::<EditorCommand>(),
            Ok(EditorCommand::Set {
                key: StyleKey::Primary,
                value: "#ff0000".into(),
                mode: Some(Mode::Dark),
            })
        );
        assert_eq!(
            "set font-sans Inter, sans-serif".parse::<EditorCommand>(),
            Ok(EditorCommand::Set {
                key: StyleKey::FontSans,
                value: "Inter, sans-serif".into(),
                mode: None,
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "set primary notacolor".parse::<EditorCommand>(),
            Err(EditorError::InvalidArgument(_))
        ));
        assert!(matches!(
            "set bogus-key 1".parse::<EditorCommand>(),
            Err(EditorError::InvalidArgument(_))
        ));
        assert_eq!(
            "hsl 10 x 1".parse::<EditorCommand>(),
            Err(EditorError::InvalidArgument("'x' is not a number".into()))
        );
        assert_eq!(
            "frobnicate".parse::<EditorCommand>(),
            Err(EditorError::UnknownCommand("frobnicate".into()))
        );
        assert_eq!(
            "mode".parse::<EditorCommand>(),
            Ok(EditorCommand::Mode(None))
        );
    }

    #[test]
    fn test_session_edit_undo_redo() {
        let mut studio = studio();
        let original = studio.editor().current_styles().clone();

        for line in ["set primary #123456", "undo"] {
            execute(&mut studio, line.parse().unwrap());
        }
        assert_eq!(studio.editor().current_styles(), &original);

        execute(&mut studio, EditorCommand::Redo);
        assert_eq!(
            studio.editor().current_styles().light.get(StyleKey::Primary),
            Some("#123456")
        );
    }

    #[test]
    fn test_session_save_while_editing_profile() {
        let mut studio = studio();
        let profile = studio.update_profiles(|p| {
            p.create_profile("Acme", crate::store::CreateProfileOptions::default())
        });
        execute(&mut studio, format!("edit {}", profile.id).parse().unwrap());
        assert!(studio.profiles().is_editing());
        assert_eq!(studio.profiles().active_profile_id(), Some(profile.id.as_str()));

        execute(&mut studio, "set primary #00ff00".parse().unwrap());
        execute(&mut studio, "save Acme Green".parse().unwrap());

        let saved = studio.profiles().get_profile(&profile.id).unwrap();
        let theme = studio.catalog().get_theme_by_id(saved.theme_id.as_deref().unwrap()).unwrap();
        assert_eq!(theme.name, "Acme Green");
        assert_eq!(
            studio.editor().current_styles().light.get(StyleKey::Primary),
            Some("#00ff00")
        );

        execute(&mut studio, EditorCommand::Done);
        assert!(!studio.profiles().is_editing());
        assert_eq!(
            "edit".parse::<EditorCommand>(),
            Err(EditorError::Usage("edit <profile-id>"))
        );
    }

    #[test]
    fn test_session_save_creates_active_theme() {
        let mut studio = studio();
        execute(&mut studio, "set accent #00ff00".parse().unwrap());
        execute(&mut studio, "save My Theme".parse().unwrap());

        let active = studio.catalog().active_theme().unwrap();
        assert_eq!(active.name, "My Theme");
        assert_eq!(active.styles.light.get(StyleKey::Accent), Some("#00ff00"));
    }
}
