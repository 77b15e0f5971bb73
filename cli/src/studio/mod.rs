//! Ties the stores to the document.
//!
//! The studio owns the editor, the theme catalog, the profile store and the
//! style engine. Every mutating operation runs against a store, then the
//! studio drains all change queues once and reacts to the batch: it resolves
//! the active brand profile or theme into editor state and projects it. Events
//! raised while reacting are dropped, so a reaction never triggers another.

use std::collections::BTreeMap;
use std::sync::Arc;

use swatch_storage::KeyValueStore;
use swatch_theme::{
    default_theme_styles, find_preset, resolve_preset_styles, BrandProfile, Document,
    HslAdjustments, Mode, StyleEngine, Theme, ThemeEditorState, ThemeStyles,
    DEFAULT_PRESET,
};

use crate::store::{Clock, EditorStore, ProfilePatch, ProfileStore, StoreEvent, ThemeCatalog};

/// Startup choices that come from the user's config.
#[derive(Debug, Clone)]
pub struct StudioSettings {
    /// Mode used when no editor state has been persisted.
    pub appearance: Mode,
    pub default_preset: String,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            appearance: Mode::Light,
            default_preset: DEFAULT_PRESET.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Reaction {
    reapply_profile: bool,
    reapply_theme: bool,
    revert_profile: bool,
    revert_theme: bool,
    project: bool,
}

pub struct Studio {
    editor: EditorStore,
    catalog: ThemeCatalog,
    profiles: ProfileStore,
    engine: StyleEngine,
    default_preset: String,
}

impl Studio {
    /// Loads every store from `storage` and projects the restored state onto
    /// a fresh document.
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: StudioSettings,
    ) -> Self {
        let default_preset = if find_preset(&settings.default_preset).is_some() {
            settings.default_preset
        } else {
            tracing::warn!(
                preset = %settings.default_preset,
                "Unknown default preset, using {}",
                DEFAULT_PRESET
            );
            DEFAULT_PRESET.to_string()
        };

        let fallback = ThemeEditorState {
            preset: Some(default_preset.clone()),
            styles: resolve_preset_styles(Some(&default_preset)),
            current_mode: settings.appearance,
            hsl_adjustments: Some(HslAdjustments::IDENTITY),
        };

        let mut studio = Self {
            editor: EditorStore::load(storage.clone(), clock.clone(), fallback),
            catalog: ThemeCatalog::load(storage.clone(), clock.clone()),
            profiles: ProfileStore::load(storage, clock),
            engine: StyleEngine::new(Document::new()),
            default_preset,
        };
        studio.project();
        studio.discard_events();
        studio
    }

    pub fn editor(&self) -> &EditorStore {
        &self.editor
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn document(&self) -> &Document {
        self.engine.document()
    }

    pub fn default_preset(&self) -> &str {
        &self.default_preset
    }

    pub fn current_mode(&self) -> Mode {
        self.editor.current_mode()
    }

    /// Runs `f` against the editor, then settles the resulting changes.
    pub fn update_editor<R>(&mut self, f: impl FnOnce(&mut EditorStore) -> R) -> R {
        let result = f(&mut self.editor);
        self.settle();
        result
    }

    pub fn update_catalog<R>(&mut self, f: impl FnOnce(&mut ThemeCatalog) -> R) -> R {
        let result = f(&mut self.catalog);
        self.settle();
        result
    }

    pub fn update_profiles<R>(&mut self, f: impl FnOnce(&mut ProfileStore) -> R) -> R {
        let result = f(&mut self.profiles);
        self.settle();
        result
    }

    /// Activates a brand profile, or with `None` clears it and returns the
    /// editor to the default preset. Activating a profile clears any active
    /// standalone theme.
    pub fn apply_brand_profile(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if self.profiles.get_profile(id).is_none() {
                tracing::warn!(id, "Brand profile not found");
                return;
            }
            if self.catalog.active_theme_id().is_some() {
                self.catalog.set_active_theme(None);
            }
        }
        self.profiles.set_active_profile(id);
        self.settle();
    }

    /// Activates a standalone theme, or with `None` clears it and loads the
    /// default preset. Activating a theme clears any active brand profile.
    pub fn apply_theme(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if self.catalog.get_theme_by_id(id).is_none() {
                tracing::warn!(id, "Theme not found");
                return;
            }
            if self.profiles.active_profile_id().is_some() {
                self.profiles.set_active_profile(None);
            }
        }
        self.catalog.set_active_theme(id);
        self.settle();
    }

    pub fn apply_preset(&mut self, key: &str) {
        let Some(theme) = self.catalog.get_theme_by_preset_key(key) else {
            tracing::warn!(preset = key, "Preset not found");
            return;
        };
        self.apply_theme(Some(&theme.id));
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.editor.set_mode(mode);
        self.settle();
    }

    pub fn toggle_mode(&mut self) {
        self.editor.toggle_mode();
        self.settle();
    }

    pub fn update_profile(&mut self, id: &str, patch: ProfilePatch) {
        self.update_profiles(|profiles| profiles.update_profile(id, patch));
    }

    pub fn delete_profile(&mut self, id: &str) {
        self.update_profiles(|profiles| profiles.delete_profile(id));
    }

    pub fn delete_theme(&mut self, id: &str) {
        self.update_catalog(|catalog| catalog.delete_theme(id));
    }

    /// Moves a profile's embedded legacy colors into a brand theme and points
    /// the profile at it. Returns the brand theme.
    pub fn migrate_profile_theme(&mut self, id: &str) -> Option<Theme> {
        let Some(profile) = self.profiles.get_profile(id).cloned() else {
            tracing::warn!(id, "Brand profile not found");
            return None;
        };
        let Some(styles) = profile.theme.clone() else {
            tracing::warn!(id, "Profile has no embedded theme to migrate");
            return None;
        };

        let theme = self
            .catalog
            .create_theme_from_brand_profile(&profile.name, styles, &profile.id);
        self.profiles.update_profile(
            id,
            ProfilePatch {
                theme_id: Some(theme.id.clone()),
                ..ProfilePatch::default()
            },
        );
        self.settle();
        tracing::debug!(profile = id, theme = %theme.id, "Migrated profile theme");
        Some(theme)
    }

    /// Styles a profile resolves to: referenced theme plus overrides, else
    /// the embedded legacy theme, else the editor's styles; then filled from
    /// the defaults.
    pub fn resolve_profile_styles(&self, profile: &BrandProfile) -> ThemeStyles {
        let styles = match profile.theme_id.as_deref() {
            Some(theme_id) => match self.catalog.get_theme_by_id(theme_id) {
                Some(theme) => match profile.theme_overrides {
                    Some(ref overrides) => theme.styles.with_overrides(overrides),
                    None => theme.styles,
                },
                None => {
                    tracing::warn!(
                        profile = %profile.id,
                        theme = theme_id,
                        "Referenced theme not found, keeping current styles"
                    );
                    self.editor.current_styles().clone()
                }
            },
            None => match profile.theme {
                Some(ref theme) => theme.clone(),
                None => self.editor.current_styles().clone(),
            },
        };
        styles.filled_from(&default_theme_styles())
    }

    /// Flat variable map of a profile in one mode.
    pub fn css_variables(&self, profile_id: &str, mode: Mode) -> Option<BTreeMap<String, String>> {
        let Some(profile) = self.profiles.get_profile(profile_id) else {
            tracing::warn!(id = profile_id, "Brand profile not found");
            return None;
        };
        let styles = self.resolve_profile_styles(profile);
        Some(profile.css_variables(styles.get(mode)))
    }

    pub fn export_css(&self) -> String {
        self.engine.document().export_css()
    }

    fn settle(&mut self) {
        let mut events = self.profiles.take_events();
        events.extend(self.catalog.take_events());
        events.extend(self.editor.take_events());
        if events.is_empty() {
            return;
        }

        tracing::trace!(count = events.len(), "Settling store events");
        self.react(&events);
        self.discard_events();
    }

    fn discard_events(&mut self) {
        self.profiles.take_events();
        self.catalog.take_events();
        self.editor.take_events();
    }

    fn react(&mut self, events: &[StoreEvent]) {
        let active_profile = self.profiles.active_profile().cloned();
        let active_theme = self.catalog.active_theme_id().map(str::to_string);
        let profile_id = active_profile.as_ref().map(|p| p.id.as_str());
        let profile_theme = active_profile.as_ref().and_then(|p| p.theme_id.as_deref());

        let mut reaction = Reaction::default();
        for event in events {
            match event {
                StoreEvent::ActiveProfileChanged(Some(_)) => reaction.reapply_profile = true,
                StoreEvent::ActiveProfileChanged(None) => reaction.revert_profile = true,
                StoreEvent::ProfileUpdated(id) if profile_id == Some(id.as_str()) => {
                    reaction.reapply_profile = true
                }
                StoreEvent::ThemeUpdated(id) => {
                    if profile_theme == Some(id.as_str()) {
                        reaction.reapply_profile = true;
                    }
                    if active_theme.as_deref() == Some(id.as_str()) {
                        reaction.reapply_theme = true;
                    }
                }
                StoreEvent::ActiveThemeChanged(Some(_)) => reaction.reapply_theme = true,
                StoreEvent::ActiveThemeChanged(None) => reaction.revert_theme = true,
                StoreEvent::ModeChanged if active_profile.is_some() => {
                    reaction.reapply_profile = true
                }
                StoreEvent::ModeChanged | StoreEvent::EditorChanged => reaction.project = true,
                _ => {}
            }
        }

        if let (true, Some(profile)) = (reaction.reapply_profile, active_profile) {
            self.load_profile(&profile);
        } else if let (true, Some(id)) = (reaction.reapply_theme, active_theme) {
            self.load_theme(&id);
        } else if reaction.revert_theme {
            self.editor.apply_preset(&self.default_preset);
        } else if reaction.revert_profile {
            self.revert_to_default();
        } else if !reaction.project {
            return;
        }
        self.project();
    }

    fn load_profile(&mut self, profile: &BrandProfile) {
        let styles = self.resolve_profile_styles(profile);
        self.editor.set_theme_state(ThemeEditorState {
            preset: Some(format!("brand-{}", profile.id)),
            styles,
            current_mode: self.editor.current_mode(),
            hsl_adjustments: Some(HslAdjustments::IDENTITY),
        });
        tracing::debug!(id = %profile.id, "Applied brand profile");
    }

    fn load_theme(&mut self, id: &str) {
        let Some(theme) = self.catalog.get_theme_by_id(id) else {
            return;
        };

        match theme.preset_key {
            Some(ref key) => self.editor.apply_preset(key),
            None => {
                self.editor.set_theme_state(ThemeEditorState {
                    preset: Some(theme.id.clone()),
                    styles: theme.styles.filled_from(&default_theme_styles()),
                    current_mode: self.editor.current_mode(),
                    hsl_adjustments: Some(HslAdjustments::IDENTITY),
                });
                self.editor.save_checkpoint();
            }
        }
        tracing::debug!(id, "Applied theme");
    }

    fn revert_to_default(&mut self) {
        let mut next = self.editor.state().clone();
        next.preset = Some(self.default_preset.clone());
        next.styles = resolve_preset_styles(Some(&self.default_preset));
        next.hsl_adjustments = Some(HslAdjustments::IDENTITY);
        self.editor.set_theme_state(next);
    }

    /// Projects the editor state, plus the active profile's tokens.
    fn project(&mut self) {
        self.engine.apply(self.editor.state());

        if let Some(profile) = self.profiles.active_profile() {
            self.engine.apply_typography(&profile.typography);
            self.engine.apply_animations(&profile.animations);
            if let Some(ref spacing) = profile.spacing {
                self.engine.apply_spacing(spacing);
            }
        }
    }
}
