#![deny(missing_docs)]
//! Smartpunct core: educates ASCII punctuation approximations (dashes,
//! quotes, ellipses) into their typographic glyphs.
//!
//! The engine is a pattern-substitution pass, not a document renderer:
//! a host pipeline hands it plain-text runs with opaque regions already
//! marked, and gets back the same text with the configured glyphs
//! substituted. Everything is configured once up front; education is a
//! pure function of the input afterwards.

/// Engine configuration: family toggles and glyph overrides.
pub mod config;
/// Configuration error types.
pub mod error;
/// Glyph kinds, default entities, and the override table.
pub mod glyphs;
/// Protected-region guard and span sources.
pub mod protect;
/// Substitution rule families and the flat priority list.
pub mod rules;
/// The match scheduler and the configured engine.
pub mod scheduler;

pub use config::SmartPunctConfig;
pub use error::ConfigError;
pub use glyphs::{GlyphKind, GlyphTable};
pub use protect::{ProtectedRegionSource, ProtectedSpans};
pub use rules::{Family, Rule, build_rules};
pub use scheduler::Educator;
