//! Brand design tokens: typography, logos, animation and spacing.
//!
//! Each token set renders itself as `(--name, value)` custom-property pairs in
//! declaration order, which is what the projection engine writes inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const FONT_SANS: &str = "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\"";
const FONT_SERIF: &str = "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif";
const FONT_MONO: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub sans: String,
    pub serif: String,
    pub mono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSize {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xl2: String,
    #[serde(rename = "3xl")]
    pub xl3: String,
    #[serde(rename = "4xl")]
    pub xl4: String,
    #[serde(rename = "5xl")]
    pub xl5: String,
    #[serde(rename = "6xl")]
    pub xl6: String,
}

impl FontSize {
    fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("xs", &self.xs),
            ("sm", &self.sm),
            ("base", &self.base),
            ("lg", &self.lg),
            ("xl", &self.xl),
            ("2xl", &self.xl2),
            ("3xl", &self.xl3),
            ("4xl", &self.xl4),
            ("5xl", &self.xl5),
            ("6xl", &self.xl6),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeight {
    pub thin: u16,
    pub light: u16,
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
    pub extrabold: u16,
}

impl FontWeight {
    fn entries(&self) -> [(&'static str, u16); 7] {
        [
            ("thin", self.thin),
            ("light", self.light),
            ("normal", self.normal),
            ("medium", self.medium),
            ("semibold", self.semibold),
            ("bold", self.bold),
            ("extrabold", self.extrabold),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHeight {
    pub tight: f64,
    pub normal: f64,
    pub relaxed: f64,
    pub loose: f64,
}

impl LineHeight {
    fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("tight", self.tight),
            ("normal", self.normal),
            ("relaxed", self.relaxed),
            ("loose", self.loose),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub tight: String,
    pub normal: String,
    pub wide: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyConfig {
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
}

impl TypographyConfig {
    /// Font family variables only.
    pub fn font_family_properties(&self) -> Vec<(String, String)> {
        let family = &self.font_family;
        let mut props = vec![
            ("--font-sans".to_string(), family.sans.clone()),
            ("--font-serif".to_string(), family.serif.clone()),
            ("--font-mono".to_string(), family.mono.clone()),
        ];
        if let Some(ref display) = family.display {
            props.push(("--font-display".to_string(), display.clone()));
        }
        props
    }

    pub fn custom_properties(&self) -> Vec<(String, String)> {
        let mut props = self.font_family_properties();
        for (key, value) in self.font_size.entries() {
            props.push((format!("--font-size-{}", key), value.to_string()));
        }
        for (key, value) in self.font_weight.entries() {
            props.push((format!("--font-weight-{}", key), value.to_string()));
        }
        for (key, value) in self.line_height.entries() {
            props.push((format!("--line-height-{}", key), value.to_string()));
        }
        let spacing = &self.letter_spacing;
        for (key, value) in [
            ("tight", &spacing.tight),
            ("normal", &spacing.normal),
            ("wide", &spacing.wide),
        ] {
            props.push((format!("--letter-spacing-{}", key), value.clone()));
        }
        props
    }
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            font_family: FontFamily {
                sans: FONT_SANS.to_string(),
                serif: FONT_SERIF.to_string(),
                mono: FONT_MONO.to_string(),
                display: None,
            },
            font_size: FontSize {
                xs: "0.75rem".to_string(),
                sm: "0.875rem".to_string(),
                base: "1rem".to_string(),
                lg: "1.125rem".to_string(),
                xl: "1.25rem".to_string(),
                xl2: "1.5rem".to_string(),
                xl3: "1.875rem".to_string(),
                xl4: "2.25rem".to_string(),
                xl5: "3rem".to_string(),
                xl6: "3.75rem".to_string(),
            },
            font_weight: FontWeight {
                thin: 100,
                light: 300,
                normal: 400,
                medium: 500,
                semibold: 600,
                bold: 700,
                extrabold: 800,
            },
            line_height: LineHeight {
                tight: 1.25,
                normal: 1.5,
                relaxed: 1.75,
                loose: 2.0,
            },
            letter_spacing: LetterSpacing {
                tight: "-0.025em".to_string(),
                normal: "0em".to_string(),
                wide: "0.025em".to_string(),
            },
        }
    }
}

/// A logo in light and dark variants, each a URL or data URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<LogoVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<LogoVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordmark: Option<LogoVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl Default for LogoAssets {
    fn default() -> Self {
        Self {
            primary: Some(LogoVariant::default()),
            icon: Some(LogoVariant::default()),
            wordmark: Some(LogoVariant::default()),
            favicon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub instant: String,
    pub fast: String,
    pub normal: String,
    pub slow: String,
    pub slower: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Easings {
    pub linear: String,
    pub ease_in: String,
    pub ease_out: String,
    pub ease_in_out: String,
    pub spring: String,
    pub bounce: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationPresets {
    pub fade_in: String,
    pub fade_out: String,
    pub slide_in: String,
    pub slide_out: String,
    pub scale_in: String,
    pub scale_out: String,
    pub spin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTokens {
    pub duration: Durations,
    pub easing: Easings,
    pub presets: AnimationPresets,
}

impl AnimationTokens {
    pub fn duration_properties(&self) -> Vec<(String, String)> {
        let d = &self.duration;
        prefixed(
            "duration",
            [
                ("instant", &d.instant),
                ("fast", &d.fast),
                ("normal", &d.normal),
                ("slow", &d.slow),
                ("slower", &d.slower),
            ],
        )
    }

    pub fn easing_properties(&self) -> Vec<(String, String)> {
        let e = &self.easing;
        prefixed(
            "easing",
            [
                ("linear", &e.linear),
                ("easeIn", &e.ease_in),
                ("easeOut", &e.ease_out),
                ("easeInOut", &e.ease_in_out),
                ("spring", &e.spring),
                ("bounce", &e.bounce),
            ],
        )
    }

    pub fn preset_properties(&self) -> Vec<(String, String)> {
        let p = &self.presets;
        prefixed(
            "animation",
            [
                ("fadeIn", &p.fade_in),
                ("fadeOut", &p.fade_out),
                ("slideIn", &p.slide_in),
                ("slideOut", &p.slide_out),
                ("scaleIn", &p.scale_in),
                ("scaleOut", &p.scale_out),
                ("spin", &p.spin),
            ],
        )
    }

    pub fn custom_properties(&self) -> Vec<(String, String)> {
        let mut props = self.duration_properties();
        props.extend(self.easing_properties());
        props.extend(self.preset_properties());
        props
    }
}

impl Default for AnimationTokens {
    fn default() -> Self {
        Self {
            duration: Durations {
                instant: "0ms".to_string(),
                fast: "150ms".to_string(),
                normal: "300ms".to_string(),
                slow: "500ms".to_string(),
                slower: "700ms".to_string(),
            },
            easing: Easings {
                linear: "linear".to_string(),
                ease_in: "cubic-bezier(0.4, 0, 1, 1)".to_string(),
                ease_out: "cubic-bezier(0, 0, 0.2, 1)".to_string(),
                ease_in_out: "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
                spring: "cubic-bezier(0.175, 0.885, 0.32, 1.275)".to_string(),
                bounce: "cubic-bezier(0.68, -0.55, 0.265, 1.55)".to_string(),
            },
            presets: AnimationPresets {
                fade_in: "opacity 300ms cubic-bezier(0, 0, 0.2, 1)".to_string(),
                fade_out: "opacity 300ms cubic-bezier(0.4, 0, 1, 1)".to_string(),
                slide_in: "transform 300ms cubic-bezier(0, 0, 0.2, 1)".to_string(),
                slide_out: "transform 300ms cubic-bezier(0.4, 0, 1, 1)".to_string(),
                scale_in: "transform 300ms cubic-bezier(0.175, 0.885, 0.32, 1.275)".to_string(),
                scale_out: "transform 300ms cubic-bezier(0.4, 0, 1, 1)".to_string(),
                spin: "transform 1000ms linear infinite".to_string(),
            },
        }
    }
}

fn prefixed<'a, const N: usize>(
    prefix: &str,
    entries: [(&str, &'a String); N],
) -> Vec<(String, String)> {
    entries
        .into_iter()
        .map(|(key, value)| (format!("--{}-{}", prefix, key), value.clone()))
        .collect()
}

/// Spacing scale step to CSS length. Profiles may carry a partial scale.
pub type SpacingScale = BTreeMap<String, String>;

const SPACING_STEPS: &[(&str, &str)] = &[
    ("0", "0px"),
    ("px", "1px"),
    ("0.5", "0.125rem"),
    ("1", "0.25rem"),
    ("1.5", "0.375rem"),
    ("2", "0.5rem"),
    ("2.5", "0.625rem"),
    ("3", "0.75rem"),
    ("3.5", "0.875rem"),
    ("4", "1rem"),
    ("5", "1.25rem"),
    ("6", "1.5rem"),
    ("7", "1.75rem"),
    ("8", "2rem"),
    ("9", "2.25rem"),
    ("10", "2.5rem"),
    ("11", "2.75rem"),
    ("12", "3rem"),
    ("14", "3.5rem"),
    ("16", "4rem"),
    ("20", "5rem"),
    ("24", "6rem"),
    ("28", "7rem"),
    ("32", "8rem"),
    ("36", "9rem"),
    ("40", "10rem"),
    ("44", "11rem"),
    ("48", "12rem"),
    ("52", "13rem"),
    ("56", "14rem"),
    ("60", "15rem"),
    ("64", "16rem"),
    ("72", "18rem"),
    ("80", "20rem"),
    ("96", "24rem"),
];

pub fn default_spacing() -> SpacingScale {
    SPACING_STEPS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// `--spacing-<step>` pairs, skipping empty values.
pub fn spacing_properties(spacing: &SpacingScale) -> Vec<(String, String)> {
    spacing
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (format!("--spacing-{}", k), v.clone()))
        .collect()
}
