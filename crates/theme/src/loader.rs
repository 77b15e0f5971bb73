//! JSON import and export of themes and brand profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::profile::BrandProfile;
use crate::types::ThemeStyles;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("expected a JSON array")]
    NotAnArray,

    #[error("missing required field 'name'")]
    MissingName,

    #[error("missing required field 'styles'")]
    MissingStyles,

    #[error("missing required field 'theme'")]
    MissingLegacyTheme,
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    styles: Option<ThemeStyles>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// The fields of an exported theme that survive an import. Ids, sources and
/// timestamps are always minted fresh by the importing catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeImport {
    pub name: String,
    pub description: Option<String>,
    pub styles: ThemeStyles,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

pub fn parse_theme_json(content: &str) -> Result<ThemeImport> {
    let file: ThemeFile = serde_json::from_str(content)?;

    let name = file
        .name
        .filter(|n| !n.is_empty())
        .ok_or(ImportError::MissingName)?;
    let styles = file.styles.ok_or(ImportError::MissingStyles)?;

    Ok(ThemeImport {
        name,
        description: file.description,
        styles,
        author: file.author,
        tags: file.tags.unwrap_or_default(),
    })
}

/// Parses one exported profile, replacing its id and timestamps.
///
/// Profiles must still carry the embedded `theme` field to be accepted, even
/// when they reference a theme by id.
pub fn parse_profile_json(content: &str, id: String, now: DateTime<Utc>) -> Result<BrandProfile> {
    let value: Value = serde_json::from_str(content)?;
    profile_from_value(value, id, now)
}

/// Parses an exported profile array without validating its entries.
pub fn parse_profile_array(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str(content)? {
        Value::Array(items) => Ok(items),
        _ => Err(ImportError::NotAnArray),
    }
}

pub fn profile_from_value(value: Value, id: String, now: DateTime<Utc>) -> Result<BrandProfile> {
    let Value::Object(mut map) = value else {
        return Err(ImportError::NotAnObject);
    };

    let has_name = map
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.is_empty());
    if !has_name {
        return Err(ImportError::MissingName);
    }

    if map.get("theme").map_or(true, Value::is_null) {
        return Err(ImportError::MissingLegacyTheme);
    }

    let stamp = Value::String(now.to_rfc3339());
    map.insert("id".to_string(), Value::String(id));
    map.insert("createdAt".to_string(), stamp.clone());
    map.insert("updatedAt".to_string(), stamp);

    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Pretty JSON, as written by every export.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize export");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::default_theme_styles;
    use pretty_assertions::assert_eq;

    fn styles_json() -> String {
        serde_json::to_string(&default_theme_styles()).unwrap()
    }

    #[test]
    fn test_parse_theme_requires_name_and_styles() {
        let ok = format!(r#"{{"name": "Mine", "styles": {}, "tags": ["a"]}}"#, styles_json());
        let theme = parse_theme_json(&ok).unwrap();
        assert_eq!(theme.name, "Mine");
        assert_eq!(theme.tags, vec!["a".to_string()]);
        assert_eq!(theme.styles, default_theme_styles());

        let no_name = format!(r#"{{"name": "", "styles": {}}}"#, styles_json());
        assert!(matches!(parse_theme_json(&no_name), Err(ImportError::MissingName)));

        assert!(matches!(
            parse_theme_json(r#"{"name": "Mine"}"#),
            Err(ImportError::MissingStyles)
        ));
        assert!(matches!(
            parse_theme_json("not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_theme_ignores_foreign_ids() {
        let json = format!(
            r#"{{"id": "preset-toolkit", "source": "preset", "name": "T", "styles": {}}}"#,
            styles_json()
        );
        assert!(parse_theme_json(&json).is_ok());
    }

    #[test]
    fn test_profile_import_requires_legacy_theme() {
        let now = Utc::now();
        let reference_only = r#"{"name": "Acme", "themeId": "preset-toolkit"}"#;
        assert!(matches!(
            parse_profile_json(reference_only, "profile-x".into(), now),
            Err(ImportError::MissingLegacyTheme)
        ));

        let legacy = format!(r#"{{"id": "old", "name": "Acme", "theme": {}}}"#, styles_json());
        let profile = parse_profile_json(&legacy, "profile-new".into(), now).unwrap();
        assert_eq!(profile.id, "profile-new");
        assert_eq!(profile.created_at, profile.updated_at);
        assert!(profile.theme.is_some());
    }

    #[test]
    fn test_profile_import_rejects_non_objects() {
        let now = Utc::now();
        assert!(matches!(
            profile_from_value(Value::from(3), "p".into(), now),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            parse_profile_array(r#"{"name": "x"}"#),
            Err(ImportError::NotAnArray)
        ));
        assert_eq!(parse_profile_array("[1, 2]").unwrap().len(), 2);
    }
}
