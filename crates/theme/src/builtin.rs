//! Hard defaults and the built-in preset table.
//!
//! Presets only list the values they change; every read merges them over the
//! defaults so a preset theme is always complete.

use chrono::{DateTime, Utc};

use crate::types::{
    HslAdjustments, Mode, StyleKey as K, Theme, ThemeEditorState, ThemeId, ThemeSource,
    ThemeStyleProps, ThemeStyles,
};

/// Preset used when nothing else is selected.
pub const DEFAULT_PRESET: &str = "violet-bloom";

const FONT_SANS: &str = "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\"";
const FONT_SERIF: &str = "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif";
const FONT_MONO: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace";

const DEFAULT_LIGHT: &[(K, &str)] = &[
    (K::Background, "#ffffff"),
    (K::Foreground, "#0a0a0a"),
    (K::Card, "#ffffff"),
    (K::CardForeground, "#0a0a0a"),
    (K::Popover, "#ffffff"),
    (K::PopoverForeground, "#0a0a0a"),
    (K::Primary, "#171717"),
    (K::PrimaryForeground, "#fafafa"),
    (K::Secondary, "#f5f5f5"),
    (K::SecondaryForeground, "#171717"),
    (K::Muted, "#f5f5f5"),
    (K::MutedForeground, "#737373"),
    (K::Accent, "#f5f5f5"),
    (K::AccentForeground, "#171717"),
    (K::Destructive, "#e7000b"),
    (K::DestructiveForeground, "#ffffff"),
    (K::Border, "#e5e5e5"),
    (K::Input, "#e5e5e5"),
    (K::Ring, "#a1a1a1"),
    (K::Chart1, "#91c5ff"),
    (K::Chart2, "#3a81f6"),
    (K::Chart3, "#2563ef"),
    (K::Chart4, "#1a4eda"),
    (K::Chart5, "#1f3fad"),
    (K::Sidebar, "#fafafa"),
    (K::SidebarForeground, "#0a0a0a"),
    (K::SidebarPrimary, "#171717"),
    (K::SidebarPrimaryForeground, "#fafafa"),
    (K::SidebarAccent, "#f5f5f5"),
    (K::SidebarAccentForeground, "#171717"),
    (K::SidebarBorder, "#e5e5e5"),
    (K::SidebarRing, "#a1a1a1"),
    (K::FontSans, FONT_SANS),
    (K::FontSerif, FONT_SERIF),
    (K::FontMono, FONT_MONO),
    (K::Radius, "0.625rem"),
    (K::ShadowColor, "oklch(0 0 0)"),
    (K::ShadowOpacity, "0.1"),
    (K::ShadowBlur, "3px"),
    (K::ShadowSpread, "0px"),
    (K::ShadowOffsetX, "0"),
    (K::ShadowOffsetY, "1px"),
    (K::LetterSpacing, "0em"),
    (K::Spacing, "0.25rem"),
];

const DEFAULT_DARK: &[(K, &str)] = &[
    (K::Background, "#0a0a0a"),
    (K::Foreground, "#fafafa"),
    (K::Card, "#171717"),
    (K::CardForeground, "#fafafa"),
    (K::Popover, "#262626"),
    (K::PopoverForeground, "#fafafa"),
    (K::Primary, "#e5e5e5"),
    (K::PrimaryForeground, "#171717"),
    (K::Secondary, "#262626"),
    (K::SecondaryForeground, "#fafafa"),
    (K::Muted, "#262626"),
    (K::MutedForeground, "#a1a1a1"),
    (K::Accent, "#404040"),
    (K::AccentForeground, "#fafafa"),
    (K::Destructive, "#ff6467"),
    (K::DestructiveForeground, "#fafafa"),
    (K::Border, "#282828"),
    (K::Input, "#343434"),
    (K::Ring, "#737373"),
    (K::Chart1, "#91c5ff"),
    (K::Chart2, "#3a81f6"),
    (K::Chart3, "#2563ef"),
    (K::Chart4, "#1a4eda"),
    (K::Chart5, "#1f3fad"),
    (K::Sidebar, "#171717"),
    (K::SidebarForeground, "#fafafa"),
    (K::SidebarPrimary, "#1447e6"),
    (K::SidebarPrimaryForeground, "#fafafa"),
    (K::SidebarAccent, "#262626"),
    (K::SidebarAccentForeground, "#fafafa"),
    (K::SidebarBorder, "#282828"),
    (K::SidebarRing, "#525252"),
    (K::FontSans, FONT_SANS),
    (K::FontSerif, FONT_SERIF),
    (K::FontMono, FONT_MONO),
    (K::Radius, "0.625rem"),
    (K::ShadowColor, "oklch(0 0 0)"),
    (K::ShadowOpacity, "0.1"),
    (K::ShadowBlur, "3px"),
    (K::ShadowSpread, "0px"),
    (K::ShadowOffsetX, "0"),
    (K::ShadowOffsetY, "1px"),
    (K::LetterSpacing, "0em"),
    (K::Spacing, "0.25rem"),
];

/// A built-in preset: a label plus the values it changes in each mode.
pub struct PresetDefinition {
    pub key: &'static str,
    pub label: &'static str,
    created_at: &'static str,
    light: &'static [(K, &'static str)],
    dark: &'static [(K, &'static str)],
}

impl PresetDefinition {
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(self.created_at)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// The preset merged over the hard defaults.
    pub fn styles(&self) -> ThemeStyles {
        let defaults = default_theme_styles();
        ThemeStyles {
            light: defaults
                .light
                .merged(&ThemeStyleProps::from_pairs(self.light.iter().copied())),
            dark: defaults
                .dark
                .merged(&ThemeStyleProps::from_pairs(self.dark.iter().copied())),
        }
    }

    pub fn to_theme(&self) -> Theme {
        let created = self.created_at();
        Theme {
            id: ThemeId::preset(self.key),
            name: self.label.to_string(),
            description: Some(format!("Built-in {} theme", self.label)),
            source: ThemeSource::Preset,
            preset_key: Some(self.key.to_string()),
            styles: self.styles(),
            created_at: created,
            updated_at: created,
            author: None,
            tags: vec![self.label.to_string()],
            is_pinned: None,
        }
    }
}

const PRESETS: &[PresetDefinition] = &[
    PresetDefinition {
        key: "violet-bloom",
        label: "Violet Bloom",
        created_at: "2025-01-15T00:00:00Z",
        light: &[
            (K::Background, "#fdfdfd"),
            (K::Foreground, "#000000"),
            (K::Primary, "#7033ff"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Secondary, "#edf0f4"),
            (K::SecondaryForeground, "#080808"),
            (K::Muted, "#f5f5f5"),
            (K::MutedForeground, "#525252"),
            (K::Accent, "#e2ebff"),
            (K::AccentForeground, "#1e69dc"),
            (K::Ring, "#000000"),
            (K::Chart1, "#4ac885"),
            (K::Chart2, "#7033ff"),
            (K::Chart3, "#fd822b"),
            (K::Chart4, "#3276e4"),
            (K::Chart5, "#747474"),
            (K::SidebarPrimary, "#000000"),
            (K::Radius, "1.4rem"),
            (K::FontSans, "Plus Jakarta Sans, sans-serif"),
            (K::FontSerif, "Lora, serif"),
            (K::FontMono, "IBM Plex Mono, monospace"),
            (K::ShadowColor, "hsl(0 0% 0%)"),
            (K::ShadowOpacity, "0.16"),
            (K::ShadowBlur, "3px"),
            (K::ShadowOffsetY, "2px"),
            (K::LetterSpacing, "-0.025em"),
        ],
        dark: &[
            (K::Background, "#1a1b1e"),
            (K::Foreground, "#f0f0f0"),
            (K::Card, "#222327"),
            (K::Popover, "#222327"),
            (K::Primary, "#8c5cff"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Secondary, "#2a2c33"),
            (K::SecondaryForeground, "#f0f0f0"),
            (K::Muted, "#2a2c33"),
            (K::MutedForeground, "#a0a0a0"),
            (K::Accent, "#1e293b"),
            (K::AccentForeground, "#79c0ff"),
            (K::Border, "#33353a"),
            (K::Input, "#33353a"),
            (K::Ring, "#8c5cff"),
            (K::Chart1, "#4ade80"),
            (K::Chart2, "#8c5cff"),
            (K::Chart3, "#fca5a5"),
            (K::Chart4, "#5993f4"),
            (K::Chart5, "#a0a0a0"),
            (K::SidebarPrimary, "#8c5cff"),
            (K::Radius, "1.4rem"),
            (K::FontSans, "Plus Jakarta Sans, sans-serif"),
            (K::FontSerif, "Lora, serif"),
            (K::FontMono, "IBM Plex Mono, monospace"),
            (K::ShadowColor, "hsl(0 0% 0%)"),
            (K::ShadowOpacity, "0.16"),
            (K::ShadowBlur, "3px"),
            (K::ShadowOffsetY, "2px"),
            (K::LetterSpacing, "-0.025em"),
        ],
    },
    PresetDefinition {
        key: "toolkit",
        label: "Toolkit",
        created_at: "2025-01-10T00:00:00Z",
        light: &[
            (K::Primary, "#2563eb"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Ring, "#2563eb"),
            (K::SidebarPrimary, "#2563eb"),
            (K::Radius, "0.5rem"),
        ],
        dark: &[
            (K::Primary, "#3b82f6"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Ring, "#3b82f6"),
            (K::SidebarPrimary, "#3b82f6"),
            (K::Radius, "0.5rem"),
        ],
    },
    PresetDefinition {
        key: "ocean-breeze",
        label: "Ocean Breeze",
        created_at: "2025-02-01T00:00:00Z",
        light: &[
            (K::Background, "#f0f8ff"),
            (K::Foreground, "#374151"),
            (K::Primary, "#22c55e"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Secondary, "#e0f2fe"),
            (K::SecondaryForeground, "#4b5563"),
            (K::Accent, "#d1fae5"),
            (K::AccentForeground, "#374151"),
            (K::Border, "#e5e7eb"),
            (K::Input, "#e5e7eb"),
            (K::Ring, "#22c55e"),
            (K::FontSans, "DM Sans, sans-serif"),
            (K::Radius, "0.5rem"),
        ],
        dark: &[
            (K::Background, "#0f172a"),
            (K::Foreground, "#d1d5db"),
            (K::Card, "#1e293b"),
            (K::Popover, "#1e293b"),
            (K::Primary, "#34d399"),
            (K::PrimaryForeground, "#0f172a"),
            (K::Secondary, "#2d3748"),
            (K::SecondaryForeground, "#a1a1aa"),
            (K::Accent, "#374151"),
            (K::AccentForeground, "#a1a1aa"),
            (K::Border, "#4b5563"),
            (K::Input, "#4b5563"),
            (K::Ring, "#34d399"),
            (K::FontSans, "DM Sans, sans-serif"),
            (K::Radius, "0.5rem"),
        ],
    },
    PresetDefinition {
        key: "amber-minimal",
        label: "Amber Minimal",
        created_at: "2025-02-12T00:00:00Z",
        light: &[
            (K::Primary, "#f59e0b"),
            (K::PrimaryForeground, "#000000"),
            (K::Accent, "#fffbeb"),
            (K::AccentForeground, "#92400e"),
            (K::Ring, "#f59e0b"),
            (K::FontSans, "Inter, sans-serif"),
            (K::Radius, "0.375rem"),
        ],
        dark: &[
            (K::Background, "#171717"),
            (K::Card, "#262626"),
            (K::Popover, "#262626"),
            (K::Primary, "#f59e0b"),
            (K::PrimaryForeground, "#000000"),
            (K::Accent, "#92400e"),
            (K::AccentForeground, "#fde68a"),
            (K::Ring, "#f59e0b"),
            (K::FontSans, "Inter, sans-serif"),
            (K::Radius, "0.375rem"),
        ],
    },
    PresetDefinition {
        key: "forest-grove",
        label: "Forest Grove",
        created_at: "2025-03-03T00:00:00Z",
        light: &[
            (K::Background, "#f8f5f0"),
            (K::Foreground, "#2e3a23"),
            (K::Primary, "oklch(0.5234 0.1347 144.1672)"),
            (K::PrimaryForeground, "#ffffff"),
            (K::Secondary, "#e8f0e0"),
            (K::Muted, "#f0e8e0"),
            (K::Accent, "#c8e6c9"),
            (K::Border, "#e0d6c9"),
            (K::Ring, "oklch(0.5234 0.1347 144.1672)"),
            (K::FontSans, "Montserrat, sans-serif"),
            (K::FontSerif, "Merriweather, serif"),
        ],
        dark: &[
            (K::Background, "#1c2a1f"),
            (K::Foreground, "#f0ebe5"),
            (K::Card, "#2d3a2e"),
            (K::Popover, "#2d3a2e"),
            (K::Primary, "oklch(0.6731 0.1624 144.2083)"),
            (K::PrimaryForeground, "#0c1f0d"),
            (K::Secondary, "#3e4a3d"),
            (K::Muted, "#2d3a2e"),
            (K::Accent, "#388e3c"),
            (K::Border, "#3e4a3d"),
            (K::Ring, "oklch(0.6731 0.1624 144.2083)"),
            (K::FontSans, "Montserrat, sans-serif"),
            (K::FontSerif, "Merriweather, serif"),
        ],
    },
];

pub fn presets() -> &'static [PresetDefinition] {
    PRESETS
}

pub fn find_preset(key: &str) -> Option<&'static PresetDefinition> {
    PRESETS.iter().find(|p| p.key == key)
}

pub fn default_light_styles() -> ThemeStyleProps {
    ThemeStyleProps::from_pairs(DEFAULT_LIGHT.iter().copied())
}

pub fn default_dark_styles() -> ThemeStyleProps {
    ThemeStyleProps::from_pairs(DEFAULT_DARK.iter().copied())
}

pub fn default_theme_styles() -> ThemeStyles {
    ThemeStyles {
        light: default_light_styles(),
        dark: default_dark_styles(),
    }
}

/// Styles of a known preset merged over the defaults.
pub fn preset_styles(key: &str) -> Option<ThemeStyles> {
    find_preset(key).map(PresetDefinition::styles)
}

/// Like [`preset_styles`], but `None`, `"default"` and unknown keys resolve
/// to the hard defaults.
pub fn resolve_preset_styles(key: Option<&str>) -> ThemeStyles {
    match key {
        None | Some("default") => default_theme_styles(),
        Some(key) => preset_styles(key).unwrap_or_else(default_theme_styles),
    }
}

/// Every preset as a read-only [`Theme`].
pub fn get_builtin_themes() -> Vec<Theme> {
    PRESETS.iter().map(PresetDefinition::to_theme).collect()
}

/// Editor state before anything has been loaded or chosen.
pub fn default_editor_state() -> ThemeEditorState {
    ThemeEditorState {
        preset: None,
        styles: default_theme_styles(),
        current_mode: Mode::Light,
        hsl_adjustments: Some(HslAdjustments::IDENTITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        assert!(default_theme_styles().is_complete());
    }

    #[test]
    fn test_every_preset_is_complete() {
        for preset in presets() {
            assert!(
                preset.styles().is_complete(),
                "preset {} is incomplete",
                preset.key
            );
        }
    }

    #[test]
    fn test_preset_overrides_defaults() {
        let styles = preset_styles("violet-bloom").unwrap();
        assert_eq!(styles.light.get(K::Primary), Some("#7033ff"));
        // untouched by the preset
        assert_eq!(styles.light.get(K::DestructiveForeground), Some("#ffffff"));
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_defaults() {
        assert_eq!(resolve_preset_styles(Some("nope")), default_theme_styles());
        assert_eq!(resolve_preset_styles(Some("default")), default_theme_styles());
        assert_eq!(resolve_preset_styles(None), default_theme_styles());
    }

    #[test]
    fn test_preset_theme_is_deterministic() {
        let a = find_preset("toolkit").unwrap().to_theme();
        let b = find_preset("toolkit").unwrap().to_theme();
        assert_eq!(a, b);
        assert_eq!(a.id, "preset-toolkit");
        assert!(a.is_read_only());
    }

    #[test]
    fn test_default_preset_exists() {
        assert!(find_preset(DEFAULT_PRESET).is_some());
    }
}
