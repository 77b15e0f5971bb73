mod builtin;
pub mod color;
mod loader;
mod profile;
pub mod projection;
pub mod tokens;
mod types;

pub use builtin::{
    default_dark_styles, default_editor_state, default_light_styles, default_theme_styles,
    find_preset, get_builtin_themes, preset_styles, presets, resolve_preset_styles,
    PresetDefinition, DEFAULT_PRESET,
};
pub use color::{convert, parse_color, ColorError, ColorFormat, HslSyntax};
pub use loader::{
    parse_profile_array, parse_profile_json, parse_theme_json, profile_from_value,
    to_pretty_json, ImportError, ThemeImport,
};
pub use profile::{BrandProfile, ProfileMetadata, PROFILE_VERSION};
pub use projection::{Document, StyleEngine};
pub use tokens::{AnimationTokens, LogoAssets, SpacingScale, TypographyConfig};
pub use types::{
    canonical_json, HslAdjustments, Mode, ModeOverrides, StyleKey, Theme, ThemeEditorState,
    ThemeId, ThemeSource, ThemeStyleProps, ThemeStyles, PRESET_ID_PREFIX,
};

/// Looks up a built-in preset theme by id.
pub fn get_builtin_theme(id: &str) -> Option<Theme> {
    ThemeId::preset_key(id)
        .and_then(find_preset)
        .map(PresetDefinition::to_theme)
}
