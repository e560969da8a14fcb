use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ConfigError;
use crate::glyphs::{GlyphKind, GlyphTable};

/// Engine configuration: family toggles plus glyph overrides.
///
/// Constructed once, before any run is processed; the engine built from
/// it is immutable for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartPunctConfig {
    /// Educate straight quotes into curly quote glyphs.
    pub smart_quotes: bool,
    /// Educate `<<` and `>>` into guillemet glyphs.
    pub smart_angled_quotes: bool,
    /// Educate `--` and `---` into dash glyphs.
    pub smart_dashes: bool,
    /// Educate `...` into the ellipsis glyph.
    pub smart_ellipses: bool,
    /// Glyph overrides, merged over the default table.
    pub substitutions: HashMap<String, String>,
}

impl Default for SmartPunctConfig {
    fn default() -> Self {
        SmartPunctConfig {
            smart_quotes: true,
            smart_angled_quotes: false,
            smart_dashes: true,
            smart_ellipses: true,
            substitutions: HashMap::new(),
        }
    }
}

impl SmartPunctConfig {
    /// Parses a configuration from a JSON object.
    ///
    /// Unlike a plain serde deserialize, this path reports the precise
    /// configuration error the engine contract demands: an unknown
    /// option, an unknown substitution key, or a substitution value
    /// that is not a string all reject the whole configuration.
    ///
    /// ```
    /// use smartpunct_core::SmartPunctConfig;
    ///
    /// let config = SmartPunctConfig::from_json(&serde_json::json!({
    ///     "smart_dashes": false,
    ///     "substitutions": { "ellipsis": "\u{2026}" },
    /// }))
    /// .unwrap();
    /// assert!(!config.smart_dashes);
    /// ```
    pub fn from_json(value: &JsonValue) -> Result<SmartPunctConfig, ConfigError> {
        let Some(options) = value.as_object() else {
            return Err(ConfigError::InvalidConfig(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            )));
        };

        let mut config = SmartPunctConfig::default();
        for (option, value) in options {
            match option.as_str() {
                "smart_quotes" => config.smart_quotes = expect_bool(option, value)?,
                "smart_angled_quotes" => config.smart_angled_quotes = expect_bool(option, value)?,
                "smart_dashes" => config.smart_dashes = expect_bool(option, value)?,
                "smart_ellipses" => config.smart_ellipses = expect_bool(option, value)?,
                "substitutions" => config.substitutions = parse_substitutions(value)?,
                other => {
                    return Err(ConfigError::InvalidConfig(format!(
                        "unrecognized option `{other}`"
                    )));
                }
            }
        }
        Ok(config)
    }

    /// Builds the glyph table for this configuration, validating the
    /// substitution overrides.
    pub fn glyph_table(&self) -> Result<GlyphTable, ConfigError> {
        GlyphTable::from_overrides(&self.substitutions)
    }

    /// Whether any rule family is enabled at all.
    pub fn any_family_enabled(&self) -> bool {
        self.smart_quotes || self.smart_angled_quotes || self.smart_dashes || self.smart_ellipses
    }
}

fn parse_substitutions(value: &JsonValue) -> Result<HashMap<String, String>, ConfigError> {
    let Some(entries) = value.as_object() else {
        return Err(ConfigError::InvalidConfig(format!(
            "`substitutions` must be an object, got {}",
            json_type_name(value)
        )));
    };

    let mut substitutions = HashMap::with_capacity(entries.len());
    for (key, glyph) in entries {
        if GlyphKind::from_key(key).is_none() {
            return Err(ConfigError::UnknownSubstitution(key.clone()));
        }
        let Some(glyph) = glyph.as_str() else {
            return Err(ConfigError::NonStringSubstitution {
                key: key.clone(),
                found: json_type_name(glyph),
            });
        };
        substitutions.insert(key.clone(), glyph.to_string());
    }
    Ok(substitutions)
}

fn expect_bool(option: &str, value: &JsonValue) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| {
        ConfigError::InvalidConfig(format!(
            "option `{option}` must be a boolean, got {}",
            json_type_name(value)
        ))
    })
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
