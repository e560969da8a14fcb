#![deny(missing_docs)]
//! Markdown-facing facade for smartpunct: registers the engine as the
//! final inline substitution pass of a text pipeline, protects raw HTML
//! tags and backslash escapes, and offers parallel batch education.

/// Parallel batch education over many documents.
pub mod batch;
/// Backslash-escape protection.
pub mod escape;
/// The extension facade and its configuration entry points.
pub mod extension;
/// The minimal inline-pass pipeline contract.
pub mod pipeline;
/// Raw HTML tag detection for the protected-region guard.
pub mod raw_tag;

pub use batch::{BatchInput, BatchOptions, BatchOutcome, BatchResult, BatchStats, educate_batch};
pub use extension::SmartPunctuation;
pub use pipeline::{InlinePipeline, InlineTransform};
pub use smartpunct_core::{ConfigError, Educator, GlyphKind, SmartPunctConfig};
