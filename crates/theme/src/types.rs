//! Core theme types.
//!
//! This module defines the fundamental types for the theme system:
//! - `StyleKey` - The fixed set of CSS custom-property names a theme defines
//! - `ThemeStyleProps` - Values for one appearance mode (complete or partial)
//! - `ThemeStyles` - Light and dark style sets
//! - `ThemeEditorState` - The live, in-memory edit buffer
//! - `Theme` - A named, persistable theme with metadata

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Prefix shared by every preset-derived theme id.
pub const PRESET_ID_PREFIX: &str = "preset-";

/// Appearance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Mode::Dark)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(format!("unknown mode '{}' (expected light or dark)", other)),
        }
    }
}

/// A CSS custom property a theme assigns, without the leading `--`.
///
/// The split between color keys and common keys is fixed: common keys are
/// written verbatim and are the same in both modes, color keys are converted
/// to `hsl()` and emitted per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,
    Border,
    Input,
    Ring,
    Chart1,
    Chart2,
    Chart3,
    Chart4,
    Chart5,
    Sidebar,
    SidebarForeground,
    SidebarPrimary,
    SidebarPrimaryForeground,
    SidebarAccent,
    SidebarAccentForeground,
    SidebarBorder,
    SidebarRing,
    FontSans,
    FontSerif,
    FontMono,
    Radius,
    ShadowColor,
    ShadowOpacity,
    ShadowBlur,
    ShadowSpread,
    ShadowOffsetX,
    ShadowOffsetY,
    LetterSpacing,
    Spacing,
}

impl StyleKey {
    pub const ALL: [StyleKey; 44] = [
        StyleKey::Background,
        StyleKey::Foreground,
        StyleKey::Card,
        StyleKey::CardForeground,
        StyleKey::Popover,
        StyleKey::PopoverForeground,
        StyleKey::Primary,
        StyleKey::PrimaryForeground,
        StyleKey::Secondary,
        StyleKey::SecondaryForeground,
        StyleKey::Muted,
        StyleKey::MutedForeground,
        StyleKey::Accent,
        StyleKey::AccentForeground,
        StyleKey::Destructive,
        StyleKey::DestructiveForeground,
        StyleKey::Border,
        StyleKey::Input,
        StyleKey::Ring,
        StyleKey::Chart1,
        StyleKey::Chart2,
        StyleKey::Chart3,
        StyleKey::Chart4,
        StyleKey::Chart5,
        StyleKey::Sidebar,
        StyleKey::SidebarForeground,
        StyleKey::SidebarPrimary,
        StyleKey::SidebarPrimaryForeground,
        StyleKey::SidebarAccent,
        StyleKey::SidebarAccentForeground,
        StyleKey::SidebarBorder,
        StyleKey::SidebarRing,
        StyleKey::FontSans,
        StyleKey::FontSerif,
        StyleKey::FontMono,
        StyleKey::Radius,
        StyleKey::ShadowColor,
        StyleKey::ShadowOpacity,
        StyleKey::ShadowBlur,
        StyleKey::ShadowSpread,
        StyleKey::ShadowOffsetX,
        StyleKey::ShadowOffsetY,
        StyleKey::LetterSpacing,
        StyleKey::Spacing,
    ];

    /// Keys whose values are not colors. Applied inline, never converted.
    pub const COMMON: [StyleKey; 11] = [
        StyleKey::FontSans,
        StyleKey::FontSerif,
        StyleKey::FontMono,
        StyleKey::Radius,
        StyleKey::ShadowOpacity,
        StyleKey::ShadowBlur,
        StyleKey::ShadowSpread,
        StyleKey::ShadowOffsetX,
        StyleKey::ShadowOffsetY,
        StyleKey::LetterSpacing,
        StyleKey::Spacing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKey::Background => "background",
            StyleKey::Foreground => "foreground",
            StyleKey::Card => "card",
            StyleKey::CardForeground => "card-foreground",
            StyleKey::Popover => "popover",
            StyleKey::PopoverForeground => "popover-foreground",
            StyleKey::Primary => "primary",
            StyleKey::PrimaryForeground => "primary-foreground",
            StyleKey::Secondary => "secondary",
            StyleKey::SecondaryForeground => "secondary-foreground",
            StyleKey::Muted => "muted",
            StyleKey::MutedForeground => "muted-foreground",
            StyleKey::Accent => "accent",
            StyleKey::AccentForeground => "accent-foreground",
            StyleKey::Destructive => "destructive",
            StyleKey::DestructiveForeground => "destructive-foreground",
            StyleKey::Border => "border",
            StyleKey::Input => "input",
            StyleKey::Ring => "ring",
            StyleKey::Chart1 => "chart-1",
            StyleKey::Chart2 => "chart-2",
            StyleKey::Chart3 => "chart-3",
            StyleKey::Chart4 => "chart-4",
            StyleKey::Chart5 => "chart-5",
            StyleKey::Sidebar => "sidebar",
            StyleKey::SidebarForeground => "sidebar-foreground",
            StyleKey::SidebarPrimary => "sidebar-primary",
            StyleKey::SidebarPrimaryForeground => "sidebar-primary-foreground",
            StyleKey::SidebarAccent => "sidebar-accent",
            StyleKey::SidebarAccentForeground => "sidebar-accent-foreground",
            StyleKey::SidebarBorder => "sidebar-border",
            StyleKey::SidebarRing => "sidebar-ring",
            StyleKey::FontSans => "font-sans",
            StyleKey::FontSerif => "font-serif",
            StyleKey::FontMono => "font-mono",
            StyleKey::Radius => "radius",
            StyleKey::ShadowColor => "shadow-color",
            StyleKey::ShadowOpacity => "shadow-opacity",
            StyleKey::ShadowBlur => "shadow-blur",
            StyleKey::ShadowSpread => "shadow-spread",
            StyleKey::ShadowOffsetX => "shadow-offset-x",
            StyleKey::ShadowOffsetY => "shadow-offset-y",
            StyleKey::LetterSpacing => "letter-spacing",
            StyleKey::Spacing => "spacing",
        }
    }

    pub fn is_color(&self) -> bool {
        !Self::COMMON.contains(self)
    }

    /// `spacing` is the only key a complete style set may omit.
    pub fn is_required(&self) -> bool {
        !matches!(self, StyleKey::Spacing)
    }

    pub fn colors() -> impl Iterator<Item = StyleKey> {
        Self::ALL.into_iter().filter(|k| k.is_color())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches("--");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| format!("unknown style key '{}'", s))
    }
}

/// Style values for a single mode.
///
/// Keys are kept in a `BTreeMap`, so iteration and serialization follow the
/// declaration order of [`StyleKey`]. The same type carries partial override
/// sets; use [`ThemeStyleProps::is_complete`] before relying on a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct ThemeStyleProps {
    values: BTreeMap<StyleKey, String>,
}

impl ThemeStyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (StyleKey, V)>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: StyleKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn remove(&mut self, key: StyleKey) -> Option<String> {
        self.values.remove(&key)
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn colors(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.iter().filter(|(k, _)| k.is_color())
    }

    pub fn common(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.iter().filter(|(k, _)| !k.is_color())
    }

    pub fn is_complete(&self) -> bool {
        StyleKey::ALL
            .iter()
            .filter(|k| k.is_required())
            .all(|k| self.values.contains_key(k))
    }

    pub fn missing_keys(&self) -> Vec<StyleKey> {
        StyleKey::ALL
            .into_iter()
            .filter(|k| k.is_required() && !self.values.contains_key(k))
            .collect()
    }

    /// Returns `self` with `overrides` written on top, key by key.
    pub fn merged(&self, overrides: &ThemeStyleProps) -> Self {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.set(key, value);
        }
        merged
    }

    /// Returns `self` with any key missing here taken from `defaults`.
    pub fn filled_from(&self, defaults: &ThemeStyleProps) -> Self {
        defaults.merged(self)
    }
}

impl From<BTreeMap<String, String>> for ThemeStyleProps {
    fn from(raw: BTreeMap<String, String>) -> Self {
        let mut values = BTreeMap::new();
        for (name, value) in raw {
            match name.parse::<StyleKey>() {
                Ok(key) => {
                    values.insert(key, value);
                }
                Err(_) => tracing::debug!(key = %name, "Dropping unknown style key"),
            }
        }
        Self { values }
    }
}

impl Serialize for ThemeStyleProps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// Light and dark style sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeStyles {
    pub light: ThemeStyleProps,
    pub dark: ThemeStyleProps,
}

impl ThemeStyles {
    pub fn get(&self, mode: Mode) -> &ThemeStyleProps {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut ThemeStyleProps {
        match mode {
            Mode::Light => &mut self.light,
            Mode::Dark => &mut self.dark,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.light.is_complete() && self.dark.is_complete()
    }

    /// Fills both modes from `defaults` so the result can be applied.
    pub fn filled_from(&self, defaults: &ThemeStyles) -> Self {
        Self {
            light: self.light.filled_from(&defaults.light),
            dark: self.dark.filled_from(&defaults.dark),
        }
    }

    /// Shallow, key-by-key merge of per-mode overrides.
    pub fn with_overrides(&self, overrides: &ModeOverrides) -> Self {
        let mut resolved = self.clone();
        if let Some(ref light) = overrides.light {
            resolved.light = resolved.light.merged(light);
        }
        if let Some(ref dark) = overrides.dark {
            resolved.dark = resolved.dark.merged(dark);
        }
        resolved
    }
}

/// Optional per-mode overrides layered on top of a referenced theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<ThemeStyleProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<ThemeStyleProps>,
}

impl ModeOverrides {
    pub fn get(&self, mode: Mode) -> Option<&ThemeStyleProps> {
        match mode {
            Mode::Light => self.light.as_ref(),
            Mode::Dark => self.dark.as_ref(),
        }
    }

    pub fn set(&mut self, mode: Mode, key: StyleKey, value: impl Into<String>) {
        let slot = match mode {
            Mode::Light => &mut self.light,
            Mode::Dark => &mut self.dark,
        };
        slot.get_or_insert_with(ThemeStyleProps::new).set(key, value);
    }
}

/// Hue/saturation/lightness adjustments applied by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HslAdjustments {
    pub hue_shift: f64,
    pub saturation_scale: f64,
    pub lightness_scale: f64,
}

impl HslAdjustments {
    pub const IDENTITY: HslAdjustments = HslAdjustments {
        hue_shift: 0.0,
        saturation_scale: 1.0,
        lightness_scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for HslAdjustments {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The live edit buffer. Distinct from any persisted [`Theme`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEditorState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub styles: ThemeStyles,
    pub current_mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl_adjustments: Option<HslAdjustments>,
}

impl ThemeEditorState {
    /// Active style set for the current mode.
    pub fn current_styles(&self) -> &ThemeStyleProps {
        self.styles.get(self.current_mode)
    }

    /// Whether `other` differs from `self` only in `current_mode`.
    pub fn differs_only_in_mode(&self, other: &ThemeEditorState) -> bool {
        self.current_mode != other.current_mode && self.same_content(other)
    }

    /// Equality ignoring `current_mode`.
    pub fn same_content(&self, other: &ThemeEditorState) -> bool {
        self.preset == other.preset
            && self.styles == other.styles
            && self.hsl_adjustments == other.hsl_adjustments
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.current_mode = mode;
        self
    }
}

/// Serializes `value` to its canonical JSON form.
///
/// Every map in the model is ordered, so two values are structurally equal
/// iff their canonical forms are byte-identical.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Where a theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Preset,
    Custom,
    Brand,
}

impl ThemeSource {
    pub fn label(&self) -> &'static str {
        match self {
            ThemeSource::Preset => "preset",
            ThemeSource::Custom => "custom",
            ThemeSource::Brand => "brand",
        }
    }
}

/// Builds and reads theme ids.
pub struct ThemeId;

impl ThemeId {
    /// Reference id of a preset-derived theme.
    pub fn preset(key: &str) -> String {
        format!("{}{}", PRESET_ID_PREFIX, key)
    }

    /// Preset key of a preset reference id.
    pub fn preset_key(id: &str) -> Option<&str> {
        id.strip_prefix(PRESET_ID_PREFIX)
    }

    /// Id of a theme extracted from a brand profile's embedded theme.
    pub fn brand(profile_id: &str) -> String {
        format!("theme-brand-{}", profile_id)
    }
}

/// A standalone theme with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: ThemeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_key: Option<String>,
    pub styles: ThemeStyles,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Annotated at read time from the pinned list, never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl Theme {
    /// Preset themes are derived from the built-in table and cannot change.
    pub fn is_read_only(&self) -> bool {
        self.source == ThemeSource::Preset
    }

    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }

    /// Preview swatches: primary, secondary, accent and background.
    pub fn swatches(&self, mode: Mode) -> Vec<&str> {
        let styles = self.styles.get(mode);
        [
            StyleKey::Primary,
            StyleKey::Secondary,
            StyleKey::Accent,
            StyleKey::Background,
        ]
        .into_iter()
        .filter_map(|k| styles.get(k))
        .collect()
    }

    pub fn primary_color(&self, mode: Mode) -> Option<&str> {
        self.styles.get(mode).get(StyleKey::Primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_key_partition() {
        assert!(StyleKey::Primary.is_color());
        assert!(StyleKey::ShadowColor.is_color());
        assert!(!StyleKey::Radius.is_color());
        assert!(!StyleKey::ShadowBlur.is_color());
        assert_eq!(StyleKey::colors().count(), 33);
    }

    #[test]
    fn test_style_key_parse() {
        assert_eq!("chart-3".parse::<StyleKey>(), Ok(StyleKey::Chart3));
        assert_eq!("--radius".parse::<StyleKey>(), Ok(StyleKey::Radius));
        assert!("not-a-key".parse::<StyleKey>().is_err());
    }

    #[test]
    fn test_props_deserialize_drops_unknown_keys() {
        let props: ThemeStyleProps =
            serde_json::from_str(r##"{"primary": "#ff0000", "glow": "1px"}"##).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get(StyleKey::Primary), Some("#ff0000"));
    }

    #[test]
    fn test_props_serialize_uses_css_names() {
        let props = ThemeStyleProps::from_pairs([
            (StyleKey::Radius, "0.5rem"),
            (StyleKey::CardForeground, "#111111"),
        ]);
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r##"{"card-foreground":"#111111","radius":"0.5rem"}"##);
    }

    #[test]
    fn test_merge_is_key_by_key() {
        let base = ThemeStyleProps::from_pairs([
            (StyleKey::Primary, "red"),
            (StyleKey::Secondary, "blue"),
        ]);
        let overrides = ThemeStyleProps::from_pairs([(StyleKey::Primary, "green")]);
        let merged = base.merged(&overrides);
        assert_eq!(merged.get(StyleKey::Primary), Some("green"));
        assert_eq!(merged.get(StyleKey::Secondary), Some("blue"));
    }

    #[test]
    fn test_filled_from_keeps_own_values() {
        let partial = ThemeStyleProps::from_pairs([(StyleKey::Primary, "green")]);
        let defaults = ThemeStyleProps::from_pairs([
            (StyleKey::Primary, "red"),
            (StyleKey::Radius, "1rem"),
        ]);
        let filled = partial.filled_from(&defaults);
        assert_eq!(filled.get(StyleKey::Primary), Some("green"));
        assert_eq!(filled.get(StyleKey::Radius), Some("1rem"));
    }

    #[test]
    fn test_completeness_ignores_spacing() {
        let mut props = ThemeStyleProps::from_pairs(
            StyleKey::ALL
                .into_iter()
                .filter(|k| k.is_required())
                .map(|k| (k, "x")),
        );
        assert!(props.is_complete());
        props.remove(StyleKey::Ring);
        assert!(!props.is_complete());
        assert_eq!(props.missing_keys(), vec![StyleKey::Ring]);
    }

    #[test]
    fn test_editor_state_mode_only_difference() {
        let a = ThemeEditorState {
            preset: Some("violet-bloom".into()),
            styles: ThemeStyles::default(),
            current_mode: Mode::Light,
            hsl_adjustments: None,
        };
        let b = a.clone().with_mode(Mode::Dark);
        assert!(a.differs_only_in_mode(&b));
        assert!(!a.differs_only_in_mode(&a));
    }

    #[test]
    fn test_canonical_json_is_order_independent() {
        let mut a = ThemeStyleProps::new();
        a.set(StyleKey::Ring, "1");
        a.set(StyleKey::Border, "2");
        let mut b = ThemeStyleProps::new();
        b.set(StyleKey::Border, "2");
        b.set(StyleKey::Ring, "1");
        assert_eq!(canonical_json(&a), canonical_json(&b));
    }

    #[test]
    fn test_theme_id_helpers() {
        assert_eq!(ThemeId::preset("violet-bloom"), "preset-violet-bloom");
        assert_eq!(ThemeId::preset_key("preset-ocean"), Some("ocean"));
        assert_eq!(ThemeId::preset_key("theme-1-abc"), None);
        assert_eq!(ThemeId::brand("profile-1"), "theme-brand-profile-1");
    }
}
