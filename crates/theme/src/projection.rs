//! Projects resolved themes onto an in-memory document.
//!
//! The document mirrors the two things a page theme touches: the root
//! element (its class list and inline `style` attribute) and one generated
//! stylesheet. Color keys go into the stylesheet as `:root` and `.dark`
//! blocks so the cascade switches them with the `dark` class; everything else
//! is written inline on the root.

use std::collections::BTreeSet;

use regex::Regex;

use crate::color::to_css_hsl;
use crate::tokens::{spacing_properties, AnimationTokens, SpacingScale, TypographyConfig};
use crate::types::{StyleKey, ThemeEditorState, ThemeStyleProps, ThemeStyles};

/// Id of the stylesheet owned by [`StyleEngine`].
pub const STYLESHEET_ID: &str = "swatch-theme-variables";

const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootElement {
    classes: BTreeSet<String>,
    style: String,
}

impl RootElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Raw inline `style` attribute.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Inline declarations in attribute order.
    pub fn declarations(&self) -> Vec<(&str, &str)> {
        self.style
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                Some((name.trim(), value.trim()))
            })
            .filter(|(name, _)| !name.is_empty())
            .collect()
    }

    /// Value of an inline custom property, `name` given without `--`.
    pub fn property(&self, name: &str) -> Option<&str> {
        let wanted = format!("--{}", name);
        self.declarations()
            .into_iter()
            .rev()
            .find(|(n, _)| *n == wanted)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: Option<RootElement>,
    stylesheets: Vec<Stylesheet>,
}

impl Document {
    /// A document with an empty root element.
    pub fn new() -> Self {
        Self {
            root: Some(RootElement::default()),
            stylesheets: Vec::new(),
        }
    }

    /// A document without a root element; every projection is skipped.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&RootElement> {
        self.root.as_ref()
    }

    pub fn stylesheet(&self, id: &str) -> Option<&Stylesheet> {
        self.stylesheets.iter().find(|s| s.id == id)
    }

    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.stylesheets
    }

    /// Stylesheet text followed by the inline declarations as a `:root`
    /// block, ready to be written to a `.css` file.
    pub fn export_css(&self) -> String {
        let mut css = String::new();
        if let Some(sheet) = self.stylesheet(STYLESHEET_ID) {
            css.push_str(sheet.text.trim_start());
        }

        if let Some(root) = self.root.as_ref() {
            let decls = root.declarations();
            if !decls.is_empty() {
                if !css.is_empty() {
                    css.push('\n');
                }
                css.push_str(":root {\n");
                for (name, value) in decls {
                    css.push_str(&format!("  {}: {};\n", name, value));
                }
                css.push_str("}\n");
            }
        }
        css
    }
}

/// Sole writer of a [`Document`].
#[derive(Debug, Default)]
pub struct StyleEngine {
    document: Document,
}

impl StyleEngine {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Projects an editor state: mode class, color stylesheet, common values
    /// from the light set, and the composed shadow of the current mode.
    pub fn apply(&mut self, state: &ThemeEditorState) {
        let Some(root) = self.document.root.as_mut() else {
            tracing::debug!("No root element, skipping theme projection");
            return;
        };

        if state.current_mode.is_dark() {
            root.classes.insert(DARK_CLASS.to_string());
        } else {
            root.classes.remove(DARK_CLASS);
        }

        clear_color_properties(root, &state.styles);

        for (key, value) in state.styles.light.common() {
            set_inline(root, key.as_str(), value);
        }

        if let Some(shadow) = compose_shadow(state.current_styles()) {
            set_inline(root, "shadow", &shadow);
        }

        let text = render_color_sheet(&state.styles);
        self.write_stylesheet(text);

        tracing::debug!(mode = %state.current_mode, "Projected theme");
    }

    /// Replaces any inline `--name` declaration with `--name: value;`.
    pub fn set_property(&mut self, name: &str, value: &str) {
        if let Some(root) = self.document.root.as_mut() {
            set_inline(root, name, value);
        }
    }

    pub fn apply_typography(&mut self, typography: &TypographyConfig) {
        self.set_properties(typography.custom_properties());
    }

    pub fn apply_animations(&mut self, animations: &AnimationTokens) {
        self.set_properties(animations.custom_properties());
    }

    pub fn apply_spacing(&mut self, spacing: &SpacingScale) {
        self.set_properties(spacing_properties(spacing));
    }

    fn set_properties(&mut self, props: Vec<(String, String)>) {
        let Some(root) = self.document.root.as_mut() else {
            return;
        };
        for (name, value) in props {
            set_inline(root, name.trim_start_matches("--"), &value);
        }
    }

    fn write_stylesheet(&mut self, text: String) {
        match self
            .document
            .stylesheets
            .iter_mut()
            .find(|s| s.id == STYLESHEET_ID)
        {
            Some(sheet) => sheet.text = text,
            None => self.document.stylesheets.push(Stylesheet {
                id: STYLESHEET_ID.to_string(),
                text,
            }),
        }
    }
}

fn declaration_pattern(name: &str) -> Option<Regex> {
    match Regex::new(&format!(r"--{}:\s*[^;]+;?", regex::escape(name))) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(name, error = %e, "Invalid custom property name");
            None
        }
    }
}

fn strip_declaration(style: &str, name: &str) -> String {
    match declaration_pattern(name) {
        Some(re) => re.replace_all(style, "").into_owned(),
        None => style.to_string(),
    }
}

fn set_inline(root: &mut RootElement, name: &str, value: &str) {
    let cleaned = strip_declaration(&root.style, name);
    root.style = format!("{}--{}: {};", cleaned.trim(), name, value);
}

fn clear_color_properties(root: &mut RootElement, styles: &ThemeStyles) {
    let keys: BTreeSet<StyleKey> = styles
        .light
        .colors()
        .chain(styles.dark.colors())
        .map(|(k, _)| k)
        .collect();

    let mut style = root.style.clone();
    for key in keys {
        style = strip_declaration(&style, key.as_str());
    }
    root.style = style.trim().to_string();
}

fn compose_shadow(props: &ThemeStyleProps) -> Option<String> {
    let color = props.get(StyleKey::ShadowColor).filter(|v| !v.is_empty())?;
    props.get(StyleKey::ShadowOpacity).filter(|v| !v.is_empty())?;
    let blur = props.get(StyleKey::ShadowBlur).filter(|v| !v.is_empty())?;
    let spread = props.get(StyleKey::ShadowSpread).filter(|v| !v.is_empty())?;
    let x = props.get(StyleKey::ShadowOffsetX).filter(|v| !v.is_empty())?;
    let y = props.get(StyleKey::ShadowOffsetY).filter(|v| !v.is_empty())?;
    Some(format!("{} {} {} {} {}", x, y, blur, spread, color))
}

fn color_block(props: &ThemeStyleProps) -> String {
    props
        .colors()
        .map(|(key, value)| format!("  --{}: {};", key, to_css_hsl(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_color_sheet(styles: &ThemeStyles) -> String {
    format!(
        "\n:root {{\n{}\n}}\n\n.dark {{\n{}\n}}\n",
        color_block(&styles.light),
        color_block(&styles.dark)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::default_editor_state;
    use crate::types::Mode;
    use pretty_assertions::assert_eq;

    fn engine() -> StyleEngine {
        StyleEngine::new(Document::new())
    }

    fn root(engine: &StyleEngine) -> &RootElement {
        engine.document().root().unwrap()
    }

    #[test]
    fn test_set_property_replaces_existing() {
        let mut engine = engine();
        engine.set_property("radius", "1rem");
        engine.set_property("spacing", "2px");
        engine.set_property("radius", "0.5rem");
        assert_eq!(root(&engine).style(), "--spacing: 2px;--radius: 0.5rem;");
    }

    #[test]
    fn test_set_property_does_not_touch_suffixed_names() {
        let mut engine = engine();
        engine.set_property("letter-spacing", "0em");
        engine.set_property("spacing", "4px");
        engine.set_property("spacing", "8px");
        assert_eq!(root(&engine).property("letter-spacing"), Some("0em"));
        assert_eq!(root(&engine).property("spacing"), Some("8px"));
    }

    #[test]
    fn test_apply_toggles_dark_class() {
        let mut engine = engine();
        let state = default_editor_state().with_mode(Mode::Dark);
        engine.apply(&state);
        assert!(root(&engine).has_class("dark"));
        engine.apply(&state.with_mode(Mode::Light));
        assert!(!root(&engine).has_class("dark"));
    }

    #[test]
    fn test_apply_writes_one_stylesheet() {
        let mut engine = engine();
        let state = default_editor_state();
        engine.apply(&state);
        engine.apply(&state);
        assert_eq!(engine.document().stylesheets().len(), 1);

        let sheet = engine.document().stylesheet(STYLESHEET_ID).unwrap();
        assert!(sheet.text.starts_with("\n:root {\n  --background: hsl(0 0% 100%);\n"));
        assert!(sheet.text.contains("\n}\n\n.dark {\n  --background: hsl(0 0% 3.9216%);"));
        assert!(sheet.text.ends_with("}\n"));
        assert!(!sheet.text.contains("--radius"));
    }

    #[test]
    fn test_apply_moves_colors_out_of_inline_style() {
        let mut engine = engine();
        engine.set_property("primary", "red");
        engine.apply(&default_editor_state());
        let root = root(&engine);
        assert_eq!(root.property("primary"), None);
        assert_eq!(root.property("radius"), Some("0.625rem"));
        assert_eq!(root.property("shadow"), Some("0 1px 3px 0px oklch(0 0 0)"));
    }

    #[test]
    fn test_shadow_skipped_when_incomplete() {
        let mut engine = engine();
        let mut state = default_editor_state();
        state.styles.light.remove(StyleKey::ShadowSpread);
        engine.apply(&state);
        assert_eq!(root(&engine).property("shadow"), None);
    }

    #[test]
    fn test_shadow_uses_current_mode() {
        let mut engine = engine();
        let mut state = default_editor_state().with_mode(Mode::Dark);
        state.styles.dark.set(StyleKey::ShadowOffsetY, "4px");
        engine.apply(&state);
        assert_eq!(root(&engine).property("shadow"), Some("0 4px 3px 0px oklch(0 0 0)"));
    }

    #[test]
    fn test_missing_root_is_noop() {
        let mut engine = StyleEngine::new(Document::detached());
        engine.apply(&default_editor_state());
        engine.set_property("radius", "1rem");
        engine.apply_spacing(&crate::tokens::default_spacing());
        assert_eq!(engine.document(), &Document::detached());
    }

    #[test]
    fn test_token_sets_are_inline() {
        let mut engine = engine();
        engine.apply_typography(&TypographyConfig::default());
        engine.apply_animations(&AnimationTokens::default());
        engine.apply_spacing(&crate::tokens::default_spacing());
        let root = root(&engine);
        assert_eq!(root.property("font-size-xs"), Some("0.75rem"));
        assert_eq!(root.property("duration-normal"), Some("300ms"));
        assert_eq!(root.property("spacing-0.5"), Some("0.125rem"));
        assert_eq!(root.property("spacing-px"), Some("1px"));
    }

    #[test]
    fn test_export_css_includes_inline_block() {
        let mut engine = engine();
        engine.apply(&default_editor_state());
        let css = engine.document().export_css();
        assert!(css.starts_with(":root {\n  --background:"));
        assert!(css.contains(".dark {"));
        assert!(css.contains("  --radius: 0.625rem;\n"));
        assert!(css.ends_with("}\n"));
    }
}
