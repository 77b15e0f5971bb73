use std::io::{self, BufRead, Write};

use color_eyre::eyre::{eyre, Result};
use swatch_theme::{parse_color, BrandProfile, Mode};

use super::{read_input, truncate_str, write_output};
use crate::cli::ProfileCommands;
use crate::store::{CreateProfileOptions, ProfilePatch};
use crate::studio::Studio;

pub fn run(studio: &mut Studio, command: Option<ProfileCommands>) -> Result<()> {
    match command.unwrap_or(ProfileCommands::List) {
        ProfileCommands::List => {
            let profiles = studio.profiles().sorted_profiles();
            if profiles.is_empty() {
                println!("No brand profiles yet. Create one with:");
                println!("  swatch profile create <name>");
                return Ok(());
            }

            let active = studio.profiles().active_profile_id();
            println!("  {:<34} {:<24} {:<28} Updated", "ID", "Name", "Theme");
            println!("{}", "-".repeat(100));
            for profile in &profiles {
                let marker = if active == Some(profile.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let theme = match (profile.theme_id.as_deref(), profile.theme.is_some()) {
                    (Some(id), _) => id.to_string(),
                    (None, true) => "(embedded)".to_string(),
                    (None, false) => "-".to_string(),
                };
                println!(
                    "{} {:<34} {:<24} {:<28} {}",
                    marker,
                    truncate_str(&profile.id, 34),
                    truncate_str(&profile.name, 24),
                    truncate_str(&theme, 28),
                    profile.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        ProfileCommands::Show { id, json } => {
            let profile = find(studio, &id)?;
            if json {
                println!("{}", swatch_theme::to_pretty_json(&profile));
            } else {
                print_profile(studio, &profile);
            }
        }
        ProfileCommands::Create {
            name,
            description,
            author,
            preset,
            copy_from,
        } => {
            if let Some(ref key) = preset {
                if swatch_theme::find_preset(key).is_none() {
                    return Err(eyre!("Preset '{}' not found", key));
                }
            }
            if let Some(ref source) = copy_from {
                find(studio, source)?;
            }

            let profile = studio.update_profiles(|profiles| {
                profiles.create_profile(
                    &name,
                    CreateProfileOptions {
                        description,
                        author,
                        copy_from,
                        preset_key: preset,
                    },
                )
            });
            println!("Created profile '{}' ({})", profile.name, profile.id);
        }
        ProfileCommands::Duplicate { id } => {
            find(studio, &id)?;
            if let Some(copy) = studio.update_profiles(|profiles| profiles.duplicate_profile(&id)) {
                println!("Created '{}' ({})", copy.name, copy.id);
            }
        }
        ProfileCommands::Delete { id } => {
            find(studio, &id)?;
            studio.delete_profile(&id);
            println!("Deleted profile {}", id);
        }
        ProfileCommands::Apply { id } => match id {
            Some(id) => {
                find(studio, &id)?;
                studio.apply_brand_profile(Some(&id));
                println!("Applied profile {}", id);
            }
            None => {
                studio.apply_brand_profile(None);
                println!("Cleared active profile");
            }
        },
        ProfileCommands::Use { id, theme_id } => {
            find(studio, &id)?;
            if studio.catalog().get_theme_by_id(&theme_id).is_none() {
                return Err(eyre!("Theme '{}' not found", theme_id));
            }
            studio.update_profile(
                &id,
                ProfilePatch {
                    theme_id: Some(theme_id.clone()),
                    ..ProfilePatch::default()
                },
            );
            println!("Profile {} now uses {}", id, theme_id);
        }
        ProfileCommands::Override {
            id,
            key,
            value,
            mode,
        } => {
            let profile = find(studio, &id)?;
            if key.is_color() {
                parse_color(&value).map_err(|e| eyre!("Invalid color '{}': {}", value, e))?;
            }

            let mut overrides = profile.theme_overrides.unwrap_or_default();
            overrides.set(mode, key, value.clone());
            studio.update_profile(
                &id,
                ProfilePatch {
                    theme_overrides: Some(overrides),
                    ..ProfilePatch::default()
                },
            );
            println!("Override {} {} = {}", mode, key, value);
        }
        ProfileCommands::Migrate { id } => {
            let profile = find(studio, &id)?;
            if profile.theme.is_none() {
                return Err(eyre!("Profile '{}' has no embedded theme", id));
            }
            if let Some(theme) = studio.migrate_profile_theme(&id) {
                println!("Profile {} now references {} ({})", id, theme.id, theme.name);
            }
        }
        ProfileCommands::Vars { id, mode } => {
            let vars = studio
                .css_variables(&id, mode)
                .ok_or_else(|| eyre!("Profile '{}' not found", id))?;
            for (name, value) in vars {
                println!("{}: {};", name, value);
            }
        }
        ProfileCommands::Export { id, output } => {
            let json = match id {
                Some(id) => studio
                    .profiles()
                    .export_profile(&id)
                    .ok_or_else(|| eyre!("Profile '{}' not found", id))?,
                None => studio.profiles().export_all_profiles(),
            };
            write_output(output.as_deref(), &json)?;
        }
        ProfileCommands::Import { file } => {
            let content = read_input(&file)?;
            if content.trim_start().starts_with('[') {
                let count = studio.update_profiles(|profiles| profiles.import_profiles(&content));
                println!("Imported {} profile(s)", count);
            } else {
                let profile = studio
                    .update_profiles(|profiles| profiles.import_profile(&content))
                    .ok_or_else(|| {
                        eyre!(
                            "{} is not a valid profile export (name and theme are required)",
                            file.display()
                        )
                    })?;
                println!("Imported '{}' ({})", profile.name, profile.id);
            }
        }
        ProfileCommands::Clear { yes } => {
            let count = studio.profiles().profiles().len();
            if count == 0 {
                println!("No profiles to delete.");
                return Ok(());
            }
            if !yes && !confirm(&format!("Delete all {} profile(s)?", count))? {
                println!("Aborted.");
                return Ok(());
            }
            studio.update_profiles(|profiles| profiles.clear_all_profiles());
            println!("Deleted {} profile(s)", count);
        }
    }

    Ok(())
}

fn find(studio: &Studio, id: &str) -> Result<BrandProfile> {
    studio
        .profiles()
        .get_profile(id)
        .cloned()
        .ok_or_else(|| eyre!("Profile '{}' not found", id))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_profile(studio: &Studio, profile: &BrandProfile) {
    println!("{} ({})", profile.name, profile.id);
    println!("{}", "=".repeat(50));
    if let Some(ref description) = profile.description {
        println!("{}", description);
    }
    if let Some(ref author) = profile.author {
        println!("Author:      {}", author);
    }
    println!("Version:     {}", profile.version);
    match profile.theme_id.as_deref() {
        Some(theme_id) => {
            let name = studio
                .catalog()
                .get_theme_by_id(theme_id)
                .map(|t| t.name)
                .unwrap_or_else(|| "missing".to_string());
            println!("Theme:       {} ({})", theme_id, name);
        }
        None if profile.uses_legacy_theme() => println!("Theme:       embedded (legacy)"),
        None => println!("Theme:       none"),
    }
    if !profile.tags().is_empty() {
        println!("Tags:        {}", profile.tags().join(", "));
    }
    println!("Updated:     {}", profile.updated_at.format("%Y-%m-%d %H:%M"));

    if let Some(ref overrides) = profile.theme_overrides {
        for mode in [Mode::Light, Mode::Dark] {
            let Some(props) = overrides.get(mode) else {
                continue;
            };
            println!();
            println!("Overrides [{}]", mode);
            for (key, value) in props.iter() {
                println!("  {:<28} {}", key, value);
            }
        }
    }

    let family = &profile.typography.font_family;
    println!();
    println!("Fonts:       {} / {} / {}", family.sans, family.serif, family.mono);
    if let Some(logo) = profile.logos.primary.as_ref().and_then(|l| l.light.as_deref()) {
        println!("Logo:        {}", logo);
    }
}
