//! Brand profiles: a theme reference plus the rest of a design system.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tokens::{spacing_properties, AnimationTokens, LogoAssets, SpacingScale, TypographyConfig};
use crate::types::{ModeOverrides, ThemeStyleProps, ThemeStyles};

pub const PROFILE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_guide_url: Option<String>,
}

/// A complete brand design system.
///
/// Colors come from the referenced theme (`theme_id`) with optional per-mode
/// overrides. Older profiles embed their colors in `theme` instead; that field
/// is still read and written so those profiles keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_overrides: Option<ModeOverrides>,
    /// Legacy embedded theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeStyles>,
    #[serde(default)]
    pub typography: TypographyConfig,
    #[serde(default)]
    pub logos: LogoAssets,
    #[serde(default)]
    pub animations: AnimationTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProfileMetadata>,
}

fn default_version() -> String {
    PROFILE_VERSION.to_string()
}

impl BrandProfile {
    /// Whether colors still live in the embedded legacy theme.
    pub fn uses_legacy_theme(&self) -> bool {
        self.theme_id.is_none() && self.theme.is_some()
    }

    pub fn tags(&self) -> &[String] {
        self.metadata.as_ref().map(|m| m.tags.as_slice()).unwrap_or(&[])
    }

    /// Flat `--name -> value` map for one mode's resolved colors plus the
    /// profile's font families, durations, easings and spacing.
    ///
    /// Typography wins over the theme's own `font-*` values.
    pub fn css_variables(&self, colors: &ThemeStyleProps) -> BTreeMap<String, String> {
        let mut vars: BTreeMap<String, String> = colors
            .iter()
            .map(|(k, v)| (format!("--{}", k), v.to_string()))
            .collect();

        vars.extend(self.typography.font_family_properties());
        vars.extend(self.animations.duration_properties());
        vars.extend(self.animations.easing_properties());
        if let Some(ref spacing) = self.spacing {
            vars.extend(spacing_properties(spacing));
        }
        vars
    }
}
