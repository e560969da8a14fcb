//! The extension facade: owns a configured educator and registers it
//! as the final inline substitution pass of the host pipeline.

use std::borrow::Cow;

use serde_json::Value as JsonValue;
use smartpunct_core::{ConfigError, Educator, SmartPunctConfig};

use crate::pipeline::{InlinePipeline, InlineTransform};
use crate::{escape, raw_tag};

/// Smart punctuation as a host-pipeline extension.
///
/// Construction validates the whole configuration; afterwards the
/// extension is immutable and can be shared freely across threads.
#[derive(Debug)]
pub struct SmartPunctuation {
    educator: Educator,
    strict_tags: bool,
}

impl SmartPunctuation {
    /// Builds the extension from a configuration.
    pub fn new(config: &SmartPunctConfig) -> Result<SmartPunctuation, ConfigError> {
        Ok(SmartPunctuation {
            // Angled quotes narrow tag detection so a tag-like sequence
            // ending in `>>` is not swallowed as a tag.
            strict_tags: config.smart_angled_quotes,
            educator: Educator::new(config)?,
        })
    }

    /// Builds the extension with the default configuration.
    pub fn with_defaults() -> SmartPunctuation {
        SmartPunctuation {
            strict_tags: false,
            educator: Educator::with_defaults(),
        }
    }

    /// Builds the extension from a JSON configuration object.
    pub fn from_json(value: &JsonValue) -> Result<SmartPunctuation, ConfigError> {
        SmartPunctuation::new(&SmartPunctConfig::from_json(value)?)
    }

    /// The underlying engine.
    pub fn educator(&self) -> &Educator {
        &self.educator
    }

    /// Educates one document, protecting raw tags, comments, and
    /// backslash escape pairs.
    pub fn educate_document(&self, input: &str) -> String {
        let mut spans = raw_tag::tag_spans(input, self.strict_tags);
        spans.extend(escape::escaped_spans(input));
        log::debug!(
            "educating {} bytes with {} protected spans",
            input.len(),
            spans.len()
        );
        self.educator.educate_run(input, &spans)
    }

    /// Registers this extension as the final pass of `pipeline`.
    pub fn register(self, pipeline: &mut InlinePipeline) {
        pipeline.add_pass(self);
    }
}

impl InlineTransform for SmartPunctuation {
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let output = self.educate_document(input);
        if output == input {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn educates_plain_document_text() {
        let extension = SmartPunctuation::with_defaults();
        assert_eq!(
            extension.educate_document("\"Hello\" -- world..."),
            "&ldquo;Hello&rdquo; &ndash; world&hellip;"
        );
    }

    #[test]
    fn tag_attribute_quotes_are_untouched() {
        let extension = SmartPunctuation::with_defaults();
        assert_eq!(
            extension.educate_document("<a title=\"don't\">'quote'</a>"),
            "<a title=\"don't\">&lsquo;quote&rsquo;</a>"
        );
    }

    #[test]
    fn raw_tag_with_attribute_is_byte_identical() {
        let extension = SmartPunctuation::with_defaults();
        let input = "<img alt=\"it's -- fine...\" src=\"x\"/>";
        assert_eq!(extension.educate_document(input), input);
    }

    #[test]
    fn escaped_quotes_stay_literal() {
        let extension = SmartPunctuation::with_defaults();
        let input = r#"keep \"these\" straight"#;
        assert_eq!(extension.educate_document(input), input);
    }

    #[test]
    fn angled_quotes_use_strict_tag_detection() {
        let angled = SmartPunctuation::from_json(&json!({ "smart_angled_quotes": true })).unwrap();
        assert_eq!(angled.educate_document("A <<b>> B"), "A &laquo;b&raquo; B");

        // Without angled quotes the inner tag is protected and nothing
        // else matches.
        let plain = SmartPunctuation::with_defaults();
        assert_eq!(plain.educate_document("A <<b>> B"), "A <<b>> B");
    }

    #[test]
    fn bad_json_configuration_is_rejected() {
        let err = SmartPunctuation::from_json(&json!({
            "substitutions": { "mdash": 1 },
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonStringSubstitution { .. }));
    }
}
