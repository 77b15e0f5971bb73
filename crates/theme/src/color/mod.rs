//! CSS color conversion.
//!
//! [`convert`] turns any parseable CSS color into `hsl`, `rgb`, `oklch` or
//! `hex` notation. It never fails: unparseable input is returned unchanged
//! and a warning is logged, so a bad value in a theme degrades to the raw
//! string instead of breaking the whole stylesheet.

mod named;
mod parse;
mod space;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{HslAdjustments, StyleKey, ThemeStyleProps, ThemeStyles};

pub use parse::parse_color;

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color '#{0}'")]
    InvalidHex(String),

    #[error("unknown color function '{0}()'")]
    UnknownFunction(String),

    #[error("{function}() expects 3 components, found {found}")]
    ArgumentCount { function: String, found: usize },

    #[error("invalid color component '{0}'")]
    InvalidComponent(String),

    #[error("unrecognized color '{0}'")]
    Unrecognized(String),
}

/// A parsed color: gamma-encoded sRGB channels and alpha, all nominally 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    fn from_packed(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as f64 / 255.0,
            ((rgb >> 8) & 0xff) as f64 / 255.0,
            (rgb & 0xff) as f64 / 255.0,
            1.0,
        )
    }

    fn channel_u8(c: f64) -> u8 {
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b)
        )
    }

    pub fn to_rgb_string(&self) -> String {
        let (r, g, b) = (
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b),
        );
        if self.a < 1.0 {
            let alpha = (self.a.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0;
            format!("rgba({}, {}, {}, {})", r, g, b, alpha)
        } else {
            format!("rgb({}, {}, {})", r, g, b)
        }
    }

    /// `(hue, saturation, lightness)` with saturation and lightness in 0-1.
    pub fn to_hsl(&self) -> (Option<f64>, f64, f64) {
        space::rgb_to_hsl(self.r, self.g, self.b)
    }

    /// `(lightness, chroma, hue)` in OKLCH.
    pub fn to_oklch(&self) -> (f64, f64, Option<f64>) {
        space::lab_to_lch(space::rgb_to_oklab(self.r, self.g, self.b))
    }
}

/// Target notation for [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hsl,
    Rgb,
    Oklch,
    Hex,
}

impl FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hsl" => Ok(ColorFormat::Hsl),
            "rgb" => Ok(ColorFormat::Rgb),
            "oklch" => Ok(ColorFormat::Oklch),
            "hex" => Ok(ColorFormat::Hex),
            other => Err(format!(
                "unknown color format '{}' (expected hsl, rgb, oklch or hex)",
                other
            )),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorFormat::Hsl => "hsl",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Oklch => "oklch",
            ColorFormat::Hex => "hex",
        })
    }
}

/// How `hsl` output is written.
///
/// `Legacy` is the bare `H S% L%` tuple consumed by Tailwind v3 style
/// `hsl(var(--x))` stylesheets; `Functional` is the complete `hsl(H S% L%)`
/// value used by v4 style sheets and by the projection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslSyntax {
    Legacy,
    #[default]
    Functional,
}

/// Formats a component: integers without decimals, anything else with
/// exactly four. Missing, zero and NaN values print as `0`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(n) = value else {
        return "0".to_string();
    };
    if n.is_nan() || n == 0.0 {
        return "0".to_string();
    }
    let rounded = n.round();
    if (n - rounded).abs() < 1e-9 {
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{}", rounded as i64);
    }
    format!("{:.4}", n)
}

fn format_hsl_tuple(color: &Rgba) -> String {
    let (h, s, l) = color.to_hsl();
    format!(
        "{} {}% {}%",
        format_number(h),
        format_number(Some(s * 100.0)),
        format_number(Some(l * 100.0))
    )
}

/// Converts `value` to `format`. Unparseable input is returned unchanged.
pub fn convert(value: &str, format: ColorFormat, syntax: HslSyntax) -> String {
    let color = match parse_color(value) {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!(value, error = %e, "Failed to convert color");
            return value.to_string();
        }
    };

    match format {
        ColorFormat::Hsl => match syntax {
            HslSyntax::Legacy => format_hsl_tuple(&color),
            HslSyntax::Functional => format!("hsl({})", format_hsl_tuple(&color)),
        },
        ColorFormat::Rgb => color.to_rgb_string(),
        ColorFormat::Oklch => {
            let (l, c, h) = color.to_oklch();
            format!(
                "oklch({} {} {})",
                format_number(Some(l)),
                format_number(Some(c)),
                format_number(h)
            )
        }
        ColorFormat::Hex => color.to_hex(),
    }
}

/// Bare `H S% L%` tuple.
pub fn to_hsl(value: &str) -> String {
    convert(value, ColorFormat::Hsl, HslSyntax::Legacy)
}

/// Complete `hsl(H S% L%)` value, as written into generated stylesheets.
pub fn to_css_hsl(value: &str) -> String {
    convert(value, ColorFormat::Hsl, HslSyntax::Functional)
}

/// Shifts hue and scales saturation/lightness of a color.
///
/// Returns functional `hsl()`; unparseable input is returned unchanged.
pub fn adjust_color(value: &str, adjustments: &HslAdjustments) -> String {
    if adjustments.is_identity() {
        return value.to_string();
    }
    let color = match parse_color(value) {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!(value, error = %e, "Failed to adjust color");
            return value.to_string();
        }
    };

    let (h, s, l) = color.to_hsl();
    let hue = space::normalize_hue(h.unwrap_or(0.0) + adjustments.hue_shift);
    let sat = (s * adjustments.saturation_scale).clamp(0.0, 1.0);
    let light = (l * adjustments.lightness_scale).clamp(0.0, 1.0);
    format!(
        "hsl({} {}% {}%)",
        format_number(Some(hue)),
        format_number(Some(sat * 100.0)),
        format_number(Some(light * 100.0))
    )
}

/// Applies [`adjust_color`] to every color key of both modes.
pub fn adjust_styles(styles: &ThemeStyles, adjustments: &HslAdjustments) -> ThemeStyles {
    let adjust = |props: &ThemeStyleProps| -> ThemeStyleProps {
        ThemeStyleProps::from_pairs(props.iter().map(|(key, value): (StyleKey, &str)| {
            if key.is_color() {
                (key, adjust_color(value, adjustments))
            } else {
                (key, value.to_string())
            }
        }))
    };
    ThemeStyles {
        light: adjust(&styles.light),
        dark: adjust(&styles.dark),
    }
}

impl HslAdjustments {
    /// Applies these adjustments to every color key of `styles`.
    pub fn apply(&self, styles: &ThemeStyles) -> ThemeStyles {
        adjust_styles(styles, self)
    }
}
