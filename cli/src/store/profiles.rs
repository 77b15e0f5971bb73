//! Brand profiles and the active/editing selections.

use std::sync::Arc;

use swatch_storage::{keys, load_json, save_json, KeyValueStore};
use swatch_theme::tokens::default_spacing;
use swatch_theme::{
    default_theme_styles, find_preset, parse_profile_array, parse_profile_json, preset_styles,
    profile_from_value, to_pretty_json, AnimationTokens, BrandProfile, LogoAssets,
    ModeOverrides, ProfileMetadata, SpacingScale, ThemeId, ThemeStyles, TypographyConfig,
    DEFAULT_PRESET, PROFILE_VERSION,
};

use super::clock::Clock;
use super::events::{ChangeQueue, StoreEvent};
use super::ids::generate_id;

#[derive(Debug, Clone, Default)]
pub struct CreateProfileOptions {
    pub description: Option<String>,
    pub author: Option<String>,
    /// Profile whose theme reference and tokens are deep-copied.
    pub copy_from: Option<String>,
    /// Ignored when `copy_from` resolves.
    pub preset_key: Option<String>,
}

/// Fields to change on a profile; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub theme_id: Option<String>,
    pub theme_overrides: Option<ModeOverrides>,
    pub theme: Option<ThemeStyles>,
    pub typography: Option<TypographyConfig>,
    pub logos: Option<LogoAssets>,
    pub animations: Option<AnimationTokens>,
    pub spacing: Option<SpacingScale>,
    pub metadata: Option<ProfileMetadata>,
}

pub struct ProfileStore {
    profiles: Vec<BrandProfile>,
    active_profile_id: Option<String>,
    editing_profile_id: Option<String>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    events: ChangeQueue,
}

impl ProfileStore {
    pub fn load(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let profiles: Vec<BrandProfile> = match load_json(storage.as_ref(), keys::BRAND_PROFILES)
        {
            Ok(profiles) => profiles.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load brand profiles");
                Vec::new()
            }
        };

        let active_profile_id =
            match load_json::<String>(storage.as_ref(), keys::ACTIVE_BRAND_PROFILE) {
                Ok(Some(id)) if profiles.iter().any(|p| p.id == id) => Some(id),
                Ok(Some(id)) => {
                    tracing::warn!(id = %id, "Stored active profile no longer exists");
                    None
                }
                Ok(None) => None,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load active profile");
                    None
                }
            };

        tracing::debug!(profiles = profiles.len(), "Loaded brand profiles");
        Self {
            profiles,
            active_profile_id,
            editing_profile_id: None,
            storage,
            clock,
            events: ChangeQueue::default(),
        }
    }

    pub fn profiles(&self) -> &[BrandProfile] {
        &self.profiles
    }

    /// Most recently updated first.
    pub fn sorted_profiles(&self) -> Vec<BrandProfile> {
        let mut sorted = self.profiles.clone();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sorted
    }

    pub fn get_profile(&self, id: &str) -> Option<&BrandProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn active_profile_id(&self) -> Option<&str> {
        self.active_profile_id.as_deref()
    }

    pub fn active_profile(&self) -> Option<&BrandProfile> {
        self.get_profile(self.active_profile_id.as_deref()?)
    }

    pub fn editing_profile(&self) -> Option<&BrandProfile> {
        self.get_profile(self.editing_profile_id.as_deref()?)
    }

    pub fn is_editing(&self) -> bool {
        self.editing_profile_id.is_some()
    }

    pub fn create_profile(&mut self, name: &str, options: CreateProfileOptions) -> BrandProfile {
        let now = self.clock.now();
        let source = options
            .copy_from
            .as_deref()
            .and_then(|id| self.get_profile(id))
            .cloned();
        if source.is_none() {
            if let Some(ref id) = options.copy_from {
                tracing::warn!(id = %id, "Profile to copy from not found");
            }
        }

        let profile = match source {
            Some(source) => BrandProfile {
                id: generate_id("profile", now),
                name: name.to_string(),
                description: options.description,
                created_at: now,
                updated_at: now,
                author: options.author,
                version: PROFILE_VERSION.to_string(),
                theme_id: source.theme_id,
                theme_overrides: source.theme_overrides,
                theme: source.theme,
                typography: source.typography,
                logos: source.logos,
                animations: source.animations,
                spacing: source.spacing,
                metadata: source.metadata,
            },
            None => {
                let preset = options
                    .preset_key
                    .as_deref()
                    .and_then(|key| {
                        let found = find_preset(key);
                        if found.is_none() {
                            tracing::warn!(preset = key, "Unknown preset, using default");
                        }
                        found
                    })
                    .or_else(|| find_preset(DEFAULT_PRESET));
                let theme_id = ThemeId::preset(preset.map_or(DEFAULT_PRESET, |p| p.key));
                let theme = preset
                    .and_then(|p| preset_styles(p.key))
                    .unwrap_or_else(default_theme_styles);

                BrandProfile {
                    id: generate_id("profile", now),
                    name: name.to_string(),
                    description: options.description,
                    created_at: now,
                    updated_at: now,
                    author: options.author,
                    version: PROFILE_VERSION.to_string(),
                    theme_id: Some(theme_id),
                    theme_overrides: None,
                    theme: Some(theme),
                    typography: TypographyConfig::default(),
                    logos: LogoAssets::default(),
                    animations: AnimationTokens::default(),
                    spacing: Some(default_spacing()),
                    metadata: Some(ProfileMetadata {
                        tags: preset.map(|p| vec![p.label.to_string()]).unwrap_or_default(),
                        ..ProfileMetadata::default()
                    }),
                }
            }
        };

        tracing::debug!(id = %profile.id, name = %profile.name, "Created brand profile");
        self.profiles.push(profile.clone());
        self.persist();
        profile
    }

    pub fn update_profile(&mut self, id: &str, patch: ProfilePatch) {
        let now = self.clock.now();
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            tracing::warn!(id, "Profile not found");
            return;
        };

        if let Some(name) = patch.name {
            profile.name = name;
        }
        if let Some(description) = patch.description {
            profile.description = Some(description);
        }
        if let Some(author) = patch.author {
            profile.author = Some(author);
        }
        if let Some(theme_id) = patch.theme_id {
            profile.theme_id = Some(theme_id);
        }
        if let Some(overrides) = patch.theme_overrides {
            profile.theme_overrides = Some(overrides);
        }
        if let Some(theme) = patch.theme {
            profile.theme = Some(theme);
        }
        if let Some(typography) = patch.typography {
            profile.typography = typography;
        }
        if let Some(logos) = patch.logos {
            profile.logos = logos;
        }
        if let Some(animations) = patch.animations {
            profile.animations = animations;
        }
        if let Some(spacing) = patch.spacing {
            profile.spacing = Some(spacing);
        }
        if let Some(metadata) = patch.metadata {
            profile.metadata = Some(metadata);
        }
        profile.updated_at = now;

        self.events.push(StoreEvent::ProfileUpdated(id.to_string()));
        self.persist();
    }

    pub fn delete_profile(&mut self, id: &str) {
        let Some(index) = self.profiles.iter().position(|p| p.id == id) else {
            tracing::warn!(id, "Profile not found");
            return;
        };

        self.profiles.remove(index);
        if self.active_profile_id.as_deref() == Some(id) {
            self.active_profile_id = None;
            self.events.push(StoreEvent::ActiveProfileChanged(None));
        }
        if self.editing_profile_id.as_deref() == Some(id) {
            self.editing_profile_id = None;
        }

        self.events.push(StoreEvent::ProfileDeleted(id.to_string()));
        self.persist();
    }

    pub fn duplicate_profile(&mut self, id: &str) -> Option<BrandProfile> {
        let Some(source) = self.get_profile(id) else {
            tracing::warn!(id, "Profile not found");
            return None;
        };

        let name = format!("{} (Copy)", source.name);
        let options = CreateProfileOptions {
            description: source.description.clone(),
            author: source.author.clone(),
            copy_from: Some(id.to_string()),
            preset_key: None,
        };
        Some(self.create_profile(&name, options))
    }

    pub fn set_active_profile(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if self.get_profile(id).is_none() {
                tracing::warn!(id, "Profile not found");
                return;
            }
        }

        self.active_profile_id = id.map(str::to_string);
        self.events
            .push(StoreEvent::ActiveProfileChanged(self.active_profile_id.clone()));
        self.persist();
    }

    pub fn start_editing(&mut self, id: &str) {
        if self.get_profile(id).is_none() {
            tracing::warn!(id, "Profile not found");
            return;
        }
        self.editing_profile_id = Some(id.to_string());
    }

    pub fn stop_editing(&mut self) {
        self.editing_profile_id = None;
    }

    pub fn export_profile(&self, id: &str) -> Option<String> {
        self.get_profile(id).map(to_pretty_json)
    }

    pub fn export_all_profiles(&self) -> String {
        to_pretty_json(&self.profiles)
    }

    /// Imports one exported profile under a fresh id and timestamps.
    pub fn import_profile(&mut self, json: &str) -> Option<BrandProfile> {
        let now = self.clock.now();
        match parse_profile_json(json, generate_id("profile", now), now) {
            Ok(profile) => {
                self.profiles.push(profile.clone());
                self.persist();
                Some(profile)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to import profile");
                None
            }
        }
    }

    /// Imports every valid entry of an exported array, skipping the rest.
    /// Returns the number imported.
    pub fn import_profiles(&mut self, json: &str) -> usize {
        let items = match parse_profile_array(json) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "Failed to import profiles");
                return 0;
            }
        };

        let now = self.clock.now();
        let mut imported = 0;
        for (index, item) in items.into_iter().enumerate() {
            match profile_from_value(item, generate_id("profile", now), now) {
                Ok(profile) => {
                    self.profiles.push(profile);
                    imported += 1;
                }
                Err(e) => tracing::warn!(index, error = %e, "Skipping invalid profile"),
            }
        }

        if imported > 0 {
            self.persist();
        }
        imported
    }

    pub fn clear_all_profiles(&mut self) {
        self.profiles.clear();
        self.editing_profile_id = None;
        if self.active_profile_id.take().is_some() {
            self.events.push(StoreEvent::ActiveProfileChanged(None));
        }
        self.persist();
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    fn persist(&self) {
        let storage = self.storage.as_ref();
        if let Err(e) = save_json(storage, keys::BRAND_PROFILES, &self.profiles) {
            tracing::error!(error = %e, "Failed to persist brand profiles");
        }

        let active = match self.active_profile_id {
            Some(ref id) => save_json(storage, keys::ACTIVE_BRAND_PROFILE, id),
            None => storage.remove(keys::ACTIVE_BRAND_PROFILE),
        };
        if let Err(e) = active {
            tracing::error!(error = %e, "Failed to persist active profile");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::ManualClock;
    use crate::store::testing::FailingStore;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use swatch_storage::MemoryStore;
    use swatch_theme::{Mode, StyleKey};

    fn setup() -> (ProfileStore, Arc<MemoryStore>, ManualClock) {
        let storage = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(Utc::now());
        let store = ProfileStore::load(storage.clone(), Arc::new(clock.clone()));
        (store, storage, clock)
    }

    #[test]
    fn test_create_defaults_to_violet_bloom() {
        let (mut store, _, _) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());

        assert!(profile.id.starts_with("profile-"));
        assert_eq!(profile.theme_id.as_deref(), Some("preset-violet-bloom"));
        assert_eq!(profile.theme, preset_styles("violet-bloom"));
        assert_eq!(profile.version, "1.0.0");
        assert_eq!(profile.tags(), ["Violet Bloom".to_string()]);
        assert_eq!(profile.spacing, Some(default_spacing()));
    }

    #[test]
    fn test_create_from_preset_key() {
        let (mut store, _, _) = setup();
        let profile = store.create_profile(
            "Tooling",
            CreateProfileOptions {
                preset_key: Some("toolkit".into()),
                ..CreateProfileOptions::default()
            },
        );
        assert_eq!(profile.theme_id.as_deref(), Some("preset-toolkit"));
        assert_eq!(profile.theme, preset_styles("toolkit"));
    }

    #[test]
    fn test_copy_from_wins_over_preset() {
        let (mut store, _, _) = setup();
        let base = store.create_profile("Base", CreateProfileOptions::default());
        let mut overrides = ModeOverrides::default();
        overrides.set(Mode::Dark, StyleKey::Primary, "#123456");
        store.update_profile(
            &base.id,
            ProfilePatch {
                theme_id: Some("preset-ocean-breeze".into()),
                theme_overrides: Some(overrides.clone()),
                ..ProfilePatch::default()
            },
        );

        let copy = store.create_profile(
            "Copy",
            CreateProfileOptions {
                copy_from: Some(base.id.clone()),
                preset_key: Some("toolkit".into()),
                ..CreateProfileOptions::default()
            },
        );
        assert_eq!(copy.theme_id.as_deref(), Some("preset-ocean-breeze"));
        assert_eq!(copy.theme_overrides, Some(overrides));
        assert_ne!(copy.id, base.id);
    }

    #[test]
    fn test_update_emits_and_bumps_timestamp() {
        let (mut store, _, clock) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        clock.advance(Duration::seconds(1));

        store.update_profile(
            &profile.id,
            ProfilePatch {
                name: Some("Acme Corp".into()),
                ..ProfilePatch::default()
            },
        );
        let updated = store.get_profile(&profile.id).unwrap();
        assert_eq!(updated.name, "Acme Corp");
        assert!(updated.updated_at > profile.updated_at);
        assert_eq!(
            store.take_events(),
            vec![StoreEvent::ProfileUpdated(profile.id.clone())]
        );

        store.update_profile("profile-missing", ProfilePatch::default());
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_sorted_by_most_recent_update() {
        let (mut store, _, clock) = setup();
        let first = store.create_profile("First", CreateProfileOptions::default());
        clock.advance(Duration::seconds(1));
        let second = store.create_profile("Second", CreateProfileOptions::default());
        clock.advance(Duration::seconds(1));
        store.update_profile(&first.id, ProfilePatch::default());

        let names: Vec<String> = store.sorted_profiles().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["First".to_string(), second.name]);
    }

    #[test]
    fn test_delete_clears_active_and_editing() {
        let (mut store, _, _) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        store.set_active_profile(Some(&profile.id));
        store.start_editing(&profile.id);
        store.take_events();

        store.delete_profile(&profile.id);
        assert!(store.active_profile().is_none());
        assert!(!store.is_editing());
        assert_eq!(
            store.take_events(),
            vec![
                StoreEvent::ActiveProfileChanged(None),
                StoreEvent::ProfileDeleted(profile.id.clone()),
            ]
        );
    }

    #[test]
    fn test_set_active_validates() {
        let (mut store, _, _) = setup();
        store.set_active_profile(Some("profile-nope"));
        assert_eq!(store.active_profile_id(), None);
        assert!(store.take_events().is_empty());

        store.start_editing("profile-nope");
        assert!(!store.is_editing());
    }

    #[test]
    fn test_duplicate_profile() {
        let (mut store, _, _) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        let copy = store.duplicate_profile(&profile.id).unwrap();
        assert_eq!(copy.name, "Acme (Copy)");
        assert_eq!(copy.theme, profile.theme);
        assert_eq!(copy.typography, profile.typography);
        assert!(store.duplicate_profile("profile-nope").is_none());
    }

    #[test]
    fn test_import_mints_new_ids() {
        let (mut store, _, _) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        let exported = store.export_profile(&profile.id).unwrap();

        let first = store.import_profile(&exported).unwrap();
        let second = store.import_profile(&exported).unwrap();
        assert_ne!(first.id, profile.id);
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Acme");
        assert_eq!(store.profiles().len(), 3);
    }

    #[test]
    fn test_import_requires_legacy_theme() {
        let (mut store, _, _) = setup();
        let json = r#"{"name": "Ref only", "themeId": "preset-toolkit"}"#;
        assert!(store.import_profile(json).is_none());
        assert!(store.import_profile("not json").is_none());
        assert!(store.profiles().is_empty());
    }

    #[test]
    fn test_import_profiles_counts_valid_entries() {
        let (mut store, storage, _) = setup();
        store.create_profile("One", CreateProfileOptions::default());
        store.create_profile("Two", CreateProfileOptions::default());
        let exported = store.export_all_profiles();

        let (mut other, _, _) = setup();
        assert_eq!(other.import_profiles(&exported), 2);
        assert_eq!(other.import_profiles(r#"[{"name": "x"}, 3]"#), 0);
        assert_eq!(other.import_profiles("{}"), 0);
        assert_eq!(other.profiles().len(), 2);

        let reloaded = ProfileStore::load(storage, Arc::new(ManualClock::new(Utc::now())));
        assert_eq!(reloaded.profiles().len(), 2);
    }

    #[test]
    fn test_clear_all_and_reload() {
        let (mut store, storage, _) = setup();
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        store.set_active_profile(Some(&profile.id));

        let reloaded = ProfileStore::load(storage.clone(), Arc::new(ManualClock::new(Utc::now())));
        assert_eq!(reloaded.active_profile_id(), Some(profile.id.as_str()));

        store.clear_all_profiles();
        assert!(store.profiles().is_empty());
        let reloaded = ProfileStore::load(storage, Arc::new(ManualClock::new(Utc::now())));
        assert!(reloaded.profiles().is_empty());
        assert_eq!(reloaded.active_profile_id(), None);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut store =
            ProfileStore::load(Arc::new(FailingStore), Arc::new(ManualClock::new(Utc::now())));
        let profile = store.create_profile("Acme", CreateProfileOptions::default());
        assert!(store.get_profile(&profile.id).is_some());
    }
}
