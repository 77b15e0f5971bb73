//! Storage keys. Each key is written by exactly one store.

pub const BRAND_PROFILES: &str = "brand-profiles";
pub const ACTIVE_BRAND_PROFILE: &str = "active-brand-profile";
pub const CUSTOM_THEMES: &str = "custom-themes";
pub const ACTIVE_THEME_ID: &str = "active-theme-id";
pub const PINNED_THEME_IDS: &str = "pinned-theme-ids";
pub const EDITOR_STATE: &str = "ui-theme-editor-state";

pub const ALL: [&str; 6] = [
    BRAND_PROFILES,
    ACTIVE_BRAND_PROFILE,
    CUSTOM_THEMES,
    ACTIVE_THEME_ID,
    PINNED_THEME_IDS,
    EDITOR_STATE,
];
