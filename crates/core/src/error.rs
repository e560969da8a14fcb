use thiserror::Error;

/// Errors rejected at engine configuration time.
///
/// Education itself cannot fail once a configuration has been accepted:
/// every problem this engine can report is caught before the first run
/// is processed, and a bad configuration is never partially applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A substitution override names a key outside the nine known glyphs.
    #[error("unknown substitution key `{0}`")]
    UnknownSubstitution(String),
    /// A substitution override carries a non-string value.
    #[error("substitution `{key}` must be a string, got {found}")]
    NonStringSubstitution {
        /// The offending substitution key.
        key: String,
        /// JSON type name of the rejected value.
        found: &'static str,
    },
    /// A JSON configuration document had an unexpected shape.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
