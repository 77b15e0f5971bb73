use color_eyre::eyre::{eyre, Result};
use swatch_theme::{parse_color, Mode, Theme};

use super::{read_input, truncate_str, write_output};
use crate::cli::ThemeCommands;
use crate::store::{CreateThemeOptions, ThemePatch};
use crate::studio::Studio;

pub fn run(studio: &mut Studio, command: Option<ThemeCommands>) -> Result<()> {
    let cmd = command.unwrap_or(ThemeCommands::List {
        custom: false,
        pinned: false,
        search: None,
    });

    match cmd {
        ThemeCommands::List {
            custom,
            pinned,
            search,
        } => {
            let catalog = studio.catalog();
            let (presets, customs): (Vec<Theme>, Vec<Theme>) = match search {
                Some(ref query) => catalog
                    .search_themes(query)
                    .into_iter()
                    .partition(Theme::is_read_only),
                None => {
                    let by_source = catalog.themes_by_source();
                    (by_source.presets, by_source.custom)
                }
            };

            let mut sections = vec![("Presets", presets), ("Custom", customs)];
            if custom {
                sections.remove(0);
            }
            for (_, themes) in &mut sections {
                if pinned {
                    themes.retain(|t| t.is_pinned == Some(true));
                }
            }
            sections.retain(|(_, themes)| !themes.is_empty());

            if sections.is_empty() {
                println!("No themes found.");
                return Ok(());
            }

            let active = catalog.active_theme_id();
            for (title, themes) in &sections {
                println!("{}", title);
                println!("  {:<34} {:<24} Colors", "ID", "Name");
                println!("{}", "-".repeat(72));
                for theme in themes {
                    let marker = match (active == Some(theme.id.as_str()), theme.is_pinned) {
                        (true, _) => '*',
                        (false, Some(true)) => '+',
                        _ => ' ',
                    };
                    println!(
                        "{} {:<34} {:<24} {}",
                        marker,
                        truncate_str(&theme.id, 34),
                        truncate_str(&theme.name, 24),
                        theme.swatches(studio.current_mode()).join(" ")
                    );
                }
                println!();
            }
            println!("* active  + pinned");
        }
        ThemeCommands::Show { id, json } => {
            let theme = find(studio, &id)?;
            if json {
                println!("{}", swatch_theme::to_pretty_json(&theme));
            } else {
                print_theme(&theme);
            }
        }
        ThemeCommands::Create {
            name,
            description,
            base,
            author,
            tags,
        } => {
            if let Some(ref key) = base {
                if swatch_theme::find_preset(key).is_none() {
                    return Err(eyre!("Preset '{}' not found", key));
                }
            }
            let theme = studio.update_catalog(|catalog| {
                catalog.create_theme(CreateThemeOptions {
                    name,
                    description,
                    styles: None,
                    base_preset_key: base,
                    author,
                    tags,
                })
            });
            println!("Created theme '{}' ({})", theme.name, theme.id);
        }
        ThemeCommands::Duplicate { id } => {
            find(studio, &id)?;
            if let Some(copy) = studio.update_catalog(|catalog| catalog.duplicate_theme(&id)) {
                println!("Created '{}' ({})", copy.name, copy.id);
            }
        }
        ThemeCommands::Delete { id } => {
            find_custom(studio, &id)?;
            studio.delete_theme(&id);
            println!("Deleted theme {}", id);
        }
        ThemeCommands::Pin { id } => {
            find(studio, &id)?;
            studio.update_catalog(|catalog| catalog.toggle_pinned(&id));
            let state = if studio.catalog().is_pinned(&id) {
                "Pinned"
            } else {
                "Unpinned"
            };
            println!("{} {}", state, id);
        }
        ThemeCommands::Apply { id, preset } => match id {
            Some(key) if preset => {
                if swatch_theme::find_preset(&key).is_none() {
                    return Err(eyre!("Preset '{}' not found", key));
                }
                studio.apply_preset(&key);
                println!("Applied preset {}", key);
            }
            Some(id) => {
                find(studio, &id)?;
                studio.apply_theme(Some(&id));
                println!("Applied theme {}", id);
            }
            None => {
                studio.apply_theme(None);
                println!("Cleared active theme; using preset {}", studio.default_preset());
            }
        },
        ThemeCommands::Set {
            id,
            key,
            value,
            mode,
        } => {
            let theme = find_custom(studio, &id)?;
            if key.is_color() {
                parse_color(&value).map_err(|e| eyre!("Invalid color '{}': {}", value, e))?;
            }

            let mut styles = theme.styles;
            styles.get_mut(mode).set(key, value.clone());
            studio.update_catalog(|catalog| {
                catalog.update_theme(
                    &id,
                    ThemePatch {
                        styles: Some(styles),
                        ..ThemePatch::default()
                    },
                )
            });
            println!("Set {} {} = {}", mode, key, value);
        }
        ThemeCommands::Export { id, output } => {
            let json = studio
                .catalog()
                .export_theme(&id)
                .ok_or_else(|| eyre!("Theme '{}' not found", id))?;
            write_output(output.as_deref(), &json)?;
        }
        ThemeCommands::Import { file } => {
            let content = read_input(&file)?;
            let theme = studio
                .update_catalog(|catalog| catalog.import_theme(&content))
                .ok_or_else(|| eyre!("{} is not a valid theme export", file.display()))?;
            println!("Imported '{}' ({})", theme.name, theme.id);
        }
    }

    Ok(())
}

fn find(studio: &Studio, id: &str) -> Result<Theme> {
    studio
        .catalog()
        .get_theme_by_id(id)
        .ok_or_else(|| eyre!("Theme '{}' not found", id))
}

fn find_custom(studio: &Studio, id: &str) -> Result<Theme> {
    let theme = find(studio, id)?;
    if theme.is_read_only() {
        return Err(eyre!(
            "'{}' is a built-in preset; duplicate it to make changes",
            id
        ));
    }
    Ok(theme)
}

fn print_theme(theme: &Theme) {
    println!("{} ({})", theme.name, theme.id);
    println!("{}", "=".repeat(50));
    if let Some(ref description) = theme.description {
        println!("{}", description);
    }
    println!("Source:   {}", theme.source.label());
    if let Some(ref author) = theme.author {
        println!("Author:   {}", author);
    }
    if !theme.tags.is_empty() {
        println!("Tags:     {}", theme.tags.join(", "));
    }
    println!("Updated:  {}", theme.updated_at.format("%Y-%m-%d %H:%M"));

    for mode in [Mode::Light, Mode::Dark] {
        println!();
        println!("[{}]", mode);
        for (key, value) in theme.styles.get(mode).iter() {
            println!("  {:<28} {}", key, value);
        }
    }
}
