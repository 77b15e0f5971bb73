//! Standalone themes: the built-in presets plus user-created ones.
//!
//! Presets are derived from the built-in table on every read and are never
//! stored. Custom and brand themes are persisted under `custom-themes`; the
//! active selection and pins are stored alongside.

use std::sync::Arc;

use swatch_storage::{keys, load_json, save_json, KeyValueStore};
use swatch_theme::{
    default_theme_styles, get_builtin_themes, parse_theme_json, preset_styles, to_pretty_json,
    Mode, Theme, ThemeId, ThemeSource, ThemeStyleProps, ThemeStyles,
};

use super::clock::Clock;
use super::events::{ChangeQueue, StoreEvent};
use super::ids::generate_id;

#[derive(Debug, Clone, Default)]
pub struct CreateThemeOptions {
    pub name: String,
    pub description: Option<String>,
    /// Wins over `base_preset_key` when both are given.
    pub styles: Option<ThemeStyles>,
    pub base_preset_key: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl CreateThemeOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fields to change on a custom theme; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ThemePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub styles: Option<ThemeStyles>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ThemesBySource {
    pub presets: Vec<Theme>,
    pub custom: Vec<Theme>,
}

pub struct ThemeCatalog {
    custom: Vec<Theme>,
    active_theme_id: Option<String>,
    pinned: Vec<String>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    events: ChangeQueue,
}

impl ThemeCatalog {
    pub fn load(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let custom: Vec<Theme> = match load_json(storage.as_ref(), keys::CUSTOM_THEMES) {
            Ok(themes) => themes.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load custom themes");
                Vec::new()
            }
        };
        let custom: Vec<Theme> = custom
            .into_iter()
            .filter(|t| {
                if t.is_read_only() {
                    tracing::warn!(id = %t.id, "Dropping stored preset theme");
                }
                !t.is_read_only()
            })
            .map(|mut t| {
                t.is_pinned = None;
                t
            })
            .collect();

        let pinned: Vec<String> = match load_json(storage.as_ref(), keys::PINNED_THEME_IDS) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load pinned themes");
                Vec::new()
            }
        };

        let mut catalog = Self {
            custom,
            active_theme_id: None,
            pinned,
            storage,
            clock,
            events: ChangeQueue::default(),
        };

        match load_json::<String>(catalog.storage.as_ref(), keys::ACTIVE_THEME_ID) {
            Ok(Some(id)) if catalog.find(&id).is_some() => catalog.active_theme_id = Some(id),
            Ok(Some(id)) => tracing::warn!(id = %id, "Stored active theme no longer exists"),
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "Failed to load active theme"),
        }

        tracing::debug!(
            custom = catalog.custom.len(),
            pinned = catalog.pinned.len(),
            "Loaded theme catalog"
        );
        catalog
    }

    fn find(&self, id: &str) -> Option<Theme> {
        if let Some(theme) = self.custom.iter().find(|t| t.id == id) {
            return Some(theme.clone());
        }
        swatch_theme::get_builtin_theme(id)
    }

    fn annotate(&self, mut theme: Theme) -> Theme {
        theme.is_pinned = Some(self.pinned.contains(&theme.id));
        theme
    }

    pub fn preset_themes(&self) -> Vec<Theme> {
        get_builtin_themes()
    }

    /// User-created and brand-extracted themes, in creation order.
    pub fn custom_themes(&self) -> &[Theme] {
        &self.custom
    }

    /// Presets followed by custom themes, annotated with their pin state.
    pub fn all_themes(&self) -> Vec<Theme> {
        self.preset_themes()
            .into_iter()
            .chain(self.custom.iter().cloned())
            .map(|t| self.annotate(t))
            .collect()
    }

    pub fn themes_by_source(&self) -> ThemesBySource {
        ThemesBySource {
            presets: self
                .preset_themes()
                .into_iter()
                .map(|t| self.annotate(t))
                .collect(),
            custom: self.custom.iter().cloned().map(|t| self.annotate(t)).collect(),
        }
    }

    pub fn active_theme_id(&self) -> Option<&str> {
        self.active_theme_id.as_deref()
    }

    pub fn active_theme(&self) -> Option<Theme> {
        let id = self.active_theme_id.as_deref()?;
        self.get_theme_by_id(id)
    }

    pub fn pinned_themes(&self) -> Vec<Theme> {
        self.all_themes()
            .into_iter()
            .filter(|t| t.is_pinned == Some(true))
            .collect()
    }

    /// Active theme's styles for `mode`.
    pub fn current_theme_styles(&self, mode: Mode) -> Option<ThemeStyleProps> {
        self.active_theme().map(|t| t.styles.get(mode).clone())
    }

    pub fn get_theme_by_id(&self, id: &str) -> Option<Theme> {
        self.find(id).map(|t| self.annotate(t))
    }

    pub fn get_theme_by_preset_key(&self, key: &str) -> Option<Theme> {
        self.preset_themes()
            .into_iter()
            .find(|t| t.preset_key.as_deref() == Some(key))
    }

    /// Case-insensitive match on name, description and tags.
    pub fn search_themes(&self, query: &str) -> Vec<Theme> {
        self.all_themes()
            .into_iter()
            .filter(|t| t.matches(query))
            .collect()
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|p| p == id)
    }

    pub fn set_active_theme(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if self.find(id).is_none() {
                tracing::warn!(id, "Theme not found");
                return;
            }
        }

        self.active_theme_id = id.map(str::to_string);
        self.events
            .push(StoreEvent::ActiveThemeChanged(self.active_theme_id.clone()));
        self.persist();
    }

    pub fn create_theme(&mut self, options: CreateThemeOptions) -> Theme {
        let now = self.clock.now();

        let styles = match (options.styles, options.base_preset_key.as_deref()) {
            (Some(styles), _) => styles,
            (None, Some(key)) => preset_styles(key).unwrap_or_else(|| {
                tracing::warn!(preset = key, "Unknown base preset, using defaults");
                default_theme_styles()
            }),
            (None, None) => default_theme_styles(),
        };

        let theme = Theme {
            id: generate_id("theme", now),
            name: options.name,
            description: options.description,
            source: ThemeSource::Custom,
            preset_key: None,
            styles,
            created_at: now,
            updated_at: now,
            author: options.author,
            tags: options.tags,
            is_pinned: None,
        };

        tracing::debug!(id = %theme.id, name = %theme.name, "Created theme");
        self.custom.push(theme.clone());
        self.persist();
        theme
    }

    pub fn update_theme(&mut self, id: &str, patch: ThemePatch) {
        let now = self.clock.now();
        let Some(theme) = self.custom.iter_mut().find(|t| t.id == id) else {
            tracing::warn!(id, "Theme not found or is a preset (cannot update presets)");
            return;
        };

        if let Some(name) = patch.name {
            theme.name = name;
        }
        if let Some(description) = patch.description {
            theme.description = Some(description);
        }
        if let Some(styles) = patch.styles {
            theme.styles = styles;
        }
        if let Some(author) = patch.author {
            theme.author = Some(author);
        }
        if let Some(tags) = patch.tags {
            theme.tags = tags;
        }
        theme.updated_at = now;

        self.events.push(StoreEvent::ThemeUpdated(id.to_string()));
        self.persist();
    }

    /// Deletes a custom theme, unpinning it and clearing it if active.
    pub fn delete_theme(&mut self, id: &str) {
        let Some(index) = self.custom.iter().position(|t| t.id == id) else {
            tracing::warn!(id, "Theme not found or is a preset (cannot delete presets)");
            return;
        };

        self.custom.remove(index);
        self.pinned.retain(|p| p != id);
        if self.active_theme_id.as_deref() == Some(id) {
            self.active_theme_id = None;
            self.events.push(StoreEvent::ActiveThemeChanged(None));
        }

        self.events.push(StoreEvent::ThemeDeleted(id.to_string()));
        self.persist();
    }

    /// Copies any theme, presets included, into a new custom theme.
    pub fn duplicate_theme(&mut self, id: &str) -> Option<Theme> {
        let Some(theme) = self.find(id) else {
            tracing::warn!(id, "Theme not found");
            return None;
        };

        Some(self.create_theme(CreateThemeOptions {
            name: format!("{} (Copy)", theme.name),
            description: theme.description,
            styles: Some(theme.styles),
            base_preset_key: None,
            author: theme.author,
            tags: theme.tags,
        }))
    }

    pub fn toggle_pinned(&mut self, id: &str) {
        match self.pinned.iter().position(|p| p == id) {
            Some(index) => {
                self.pinned.remove(index);
            }
            None => self.pinned.push(id.to_string()),
        }
        self.persist();
    }

    pub fn export_theme(&self, id: &str) -> Option<String> {
        self.get_theme_by_id(id).map(|t| to_pretty_json(&t))
    }

    /// Imports an exported theme as a new custom theme with a fresh id.
    pub fn import_theme(&mut self, json: &str) -> Option<Theme> {
        match parse_theme_json(json) {
            Ok(import) => Some(self.create_theme(CreateThemeOptions {
                name: import.name,
                description: import.description,
                styles: Some(import.styles),
                base_preset_key: None,
                author: import.author,
                tags: import.tags,
            })),
            Err(e) => {
                tracing::error!(error = %e, "Failed to import theme");
                None
            }
        }
    }

    /// Extracts a brand profile's embedded theme. Calling it again for the
    /// same profile returns the existing theme.
    pub fn create_theme_from_brand_profile(
        &mut self,
        name: &str,
        styles: ThemeStyles,
        profile_id: &str,
    ) -> Theme {
        let id = ThemeId::brand(profile_id);
        if let Some(existing) = self.custom.iter().find(|t| t.id == id) {
            return existing.clone();
        }

        let now = self.clock.now();
        let theme = Theme {
            id,
            name: format!("{} Theme", name),
            description: Some(format!("Theme extracted from brand profile: {}", name)),
            source: ThemeSource::Brand,
            preset_key: None,
            styles,
            created_at: now,
            updated_at: now,
            author: None,
            tags: vec!["migrated".to_string(), "brand".to_string()],
            is_pinned: None,
        };

        self.custom.push(theme.clone());
        self.persist();
        theme
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    fn persist(&self) {
        let storage = self.storage.as_ref();
        if let Err(e) = save_json(storage, keys::CUSTOM_THEMES, &self.custom) {
            tracing::error!(error = %e, "Failed to persist custom themes");
        }

        let active = match self.active_theme_id {
            Some(ref id) => save_json(storage, keys::ACTIVE_THEME_ID, id),
            None => storage.remove(keys::ACTIVE_THEME_ID),
        };
        if let Err(e) = active {
            tracing::error!(error = %e, "Failed to persist active theme");
        }

        if let Err(e) = save_json(storage, keys::PINNED_THEME_IDS, &self.pinned) {
            tracing::error!(error = %e, "Failed to persist pinned themes");
        }
    }
}
