use std::collections::HashMap;

use crate::error::ConfigError;

/// The nine substitution kinds the rule set can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    /// Em dash, educated from `---`.
    Mdash,
    /// En dash, educated from `--`.
    Ndash,
    /// Horizontal ellipsis, educated from `...`.
    Ellipsis,
    /// Left guillemet, educated from `<<`.
    LeftAngleQuote,
    /// Right guillemet, educated from `>>`.
    RightAngleQuote,
    /// Opening curly single quote.
    LeftSingleQuote,
    /// Closing curly single quote (also the apostrophe).
    RightSingleQuote,
    /// Opening curly double quote.
    LeftDoubleQuote,
    /// Closing curly double quote.
    RightDoubleQuote,
}

impl GlyphKind {
    /// Every kind, in table order.
    pub const ALL: [GlyphKind; 9] = [
        GlyphKind::Mdash,
        GlyphKind::Ndash,
        GlyphKind::Ellipsis,
        GlyphKind::LeftAngleQuote,
        GlyphKind::RightAngleQuote,
        GlyphKind::LeftSingleQuote,
        GlyphKind::RightSingleQuote,
        GlyphKind::LeftDoubleQuote,
        GlyphKind::RightDoubleQuote,
    ];

    /// The configuration key naming this kind in a substitutions map.
    pub fn key(self) -> &'static str {
        match self {
            GlyphKind::Mdash => "mdash",
            GlyphKind::Ndash => "ndash",
            GlyphKind::Ellipsis => "ellipsis",
            GlyphKind::LeftAngleQuote => "left-angle-quote",
            GlyphKind::RightAngleQuote => "right-angle-quote",
            GlyphKind::LeftSingleQuote => "left-single-quote",
            GlyphKind::RightSingleQuote => "right-single-quote",
            GlyphKind::LeftDoubleQuote => "left-double-quote",
            GlyphKind::RightDoubleQuote => "right-double-quote",
        }
    }

    /// Looks up a kind by its configuration key.
    pub fn from_key(key: &str) -> Option<GlyphKind> {
        GlyphKind::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Default HTML entity emitted for this kind.
    pub fn default_glyph(self) -> &'static str {
        match self {
            GlyphKind::Mdash => "&mdash;",
            GlyphKind::Ndash => "&ndash;",
            GlyphKind::Ellipsis => "&hellip;",
            GlyphKind::LeftAngleQuote => "&laquo;",
            GlyphKind::RightAngleQuote => "&raquo;",
            GlyphKind::LeftSingleQuote => "&lsquo;",
            GlyphKind::RightSingleQuote => "&rsquo;",
            GlyphKind::LeftDoubleQuote => "&ldquo;",
            GlyphKind::RightDoubleQuote => "&rdquo;",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Immutable mapping from glyph kind to output string.
///
/// Defaults cover all nine kinds; caller overrides are merged on top at
/// construction and the table is never mutated afterwards, so it can be
/// shared read-only across runs and threads.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: [String; 9],
}

impl GlyphTable {
    /// Builds the table of default HTML entities.
    pub fn with_defaults() -> GlyphTable {
        GlyphTable {
            glyphs: GlyphKind::ALL.map(|kind| kind.default_glyph().to_string()),
        }
    }

    /// Builds the default table with caller overrides merged on top.
    ///
    /// Rejects any override key outside the nine known glyph names, so a
    /// malformed substitutions map fails at configuration time rather
    /// than silently educating with defaults.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Result<GlyphTable, ConfigError> {
        let mut table = GlyphTable::with_defaults();
        for (key, glyph) in overrides {
            let Some(kind) = GlyphKind::from_key(key) else {
                return Err(ConfigError::UnknownSubstitution(key.clone()));
            };
            table.glyphs[kind.index()] = glyph.clone();
        }
        Ok(table)
    }

    /// Output glyph for `kind`. Infallible after construction.
    pub fn resolve(&self, kind: GlyphKind) -> &str {
        &self.glyphs[kind.index()]
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        GlyphTable::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_nine_kinds() {
        let table = GlyphTable::with_defaults();
        for kind in GlyphKind::ALL {
            assert!(!table.resolve(kind).is_empty(), "{:?}", kind);
        }
        assert_eq!(table.resolve(GlyphKind::Mdash), "&mdash;");
        assert_eq!(table.resolve(GlyphKind::LeftDoubleQuote), "&ldquo;");
    }

    #[test]
    fn key_round_trips() {
        for kind in GlyphKind::ALL {
            assert_eq!(GlyphKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(GlyphKind::from_key("curly-brace"), None);
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("ndash".to_string(), "\u{2013}".to_string());
        let table = GlyphTable::from_overrides(&overrides).unwrap();
        assert_eq!(table.resolve(GlyphKind::Ndash), "\u{2013}");
        assert_eq!(table.resolve(GlyphKind::Mdash), "&mdash;");
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("emdash".to_string(), "—".to_string());
        let err = GlyphTable::from_overrides(&overrides).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSubstitution(key) if key == "emdash"));
    }
}
