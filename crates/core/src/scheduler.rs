//! Match scheduling: each rule in the flat priority list makes one
//! left-to-right pass over the run, substituting every accepted match
//! and advancing past the replacement so its own output is never
//! re-matched. Glyphs substituted by earlier rules are protected, so a
//! later rule cannot re-educate them either; captured delimiters are
//! re-emitted as plain text and stay available to later rules.

use std::ops::Range;

use crate::config::SmartPunctConfig;
use crate::error::ConfigError;
use crate::glyphs::GlyphTable;
use crate::protect::{ProtectedRegionSource, RenderedPiece, Run};
use crate::rules::{Piece, Rule, RuleMatch, build_rules};

/// The configured engine: an immutable rule list plus glyph table.
///
/// Construction validates the whole configuration; education itself is
/// a pure function of the input run and cannot fail. The educator holds
/// no per-run state, so one instance can serve any number of runs,
/// including concurrently.
#[derive(Debug)]
pub struct Educator {
    rules: Vec<Rule>,
    glyphs: GlyphTable,
}

impl Educator {
    /// Builds an educator from a configuration.
    pub fn new(config: &SmartPunctConfig) -> Result<Educator, ConfigError> {
        let glyphs = config.glyph_table()?;
        let rules = build_rules(config);
        log::debug!("educator configured with {} rules", rules.len());
        Ok(Educator { rules, glyphs })
    }

    /// Builds an educator with the default configuration. The default
    /// table covers every glyph, so this cannot fail.
    pub fn with_defaults() -> Educator {
        Educator {
            rules: build_rules(&SmartPunctConfig::default()),
            glyphs: GlyphTable::with_defaults(),
        }
    }

    /// Educates one run with no protected regions.
    ///
    /// ```
    /// use smartpunct_core::Educator;
    ///
    /// let educator = Educator::with_defaults();
    /// assert_eq!(educator.educate("\"Hello\""), "&ldquo;Hello&rdquo;");
    /// assert_eq!(educator.educate("'80s"), "&rsquo;80s");
    /// ```
    pub fn educate(&self, input: &str) -> String {
        self.educate_run(input, &[])
    }

    /// Educates one run, leaving the given byte spans untouched.
    pub fn educate_run(&self, input: &str, protected: &[Range<usize>]) -> String {
        if self.rules.is_empty() || !input.contains(['"', '\'', '-', '.', '<', '>']) {
            return input.to_string();
        }

        let mut run = Run::new(input, protected);
        for rule in &self.rules {
            self.apply(rule, &mut run);
        }
        run.into_text()
    }

    /// Educates one run, querying `source` for the protected spans.
    pub fn educate_with(&self, input: &str, source: &dyn ProtectedRegionSource) -> String {
        let spans = source.protected_spans(input);
        self.educate_run(input, &spans)
    }

    /// The active rules, in scheduling order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The resolved glyph table.
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// One pass of `rule` over the run: find, substitute, continue
    /// after the replacement.
    fn apply(&self, rule: &Rule, run: &mut Run) {
        let mut cursor = 0;
        while cursor < run.len() {
            let Some(found) = find_from(rule, run, cursor) else {
                break;
            };
            let pieces = self.render(rule, run, &found);
            cursor = run.splice(found.start..found.end, &pieces);
        }
    }

    fn render(&self, rule: &Rule, run: &Run, found: &RuleMatch) -> Vec<RenderedPiece> {
        rule.replacement()
            .iter()
            .map(|piece| match piece {
                Piece::Glyph(kind) => RenderedPiece {
                    text: self.glyphs.resolve(*kind).to_string(),
                    protected: true,
                },
                Piece::Backref => {
                    let capture = found
                        .capture
                        .clone()
                        .unwrap_or(found.start..found.start);
                    RenderedPiece {
                        text: run.text()[capture].to_string(),
                        protected: false,
                    }
                }
            })
            .collect()
    }
}

/// Earliest accepted match of `rule` at or after `cursor`. Protected
/// intervals are skipped atomically and never contain a match start.
fn find_from(rule: &Rule, run: &Run, cursor: usize) -> Option<RuleMatch> {
    let mut pos = run.resolve_start(cursor);
    while pos < run.len() {
        if rule.is_start_anchored() && pos != 0 {
            return None;
        }
        if let Some(found) = rule.match_at(run, pos) {
            return Some(found);
        }
        pos = run.resolve_start(run.next_pos(pos));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn educate(input: &str) -> String {
        Educator::with_defaults().educate(input)
    }

    #[test]
    fn punctuation_free_input_is_identity() {
        assert_eq!(educate("plain words, no education"), "plain words, no education");
    }

    #[test]
    fn all_families_disabled_is_identity() {
        let config = SmartPunctConfig::from_json(&json!({
            "smart_quotes": false,
            "smart_angled_quotes": false,
            "smart_dashes": false,
            "smart_ellipses": false,
        }))
        .unwrap();
        let educator = Educator::new(&config).unwrap();
        let input = "\"Quotes\" -- dashes --- and... ellipses '80s";
        assert_eq!(educator.educate(input), input);
    }

    #[test]
    fn dashes_educate_at_exact_run_lengths() {
        assert_eq!(educate("a--b"), "a&ndash;b");
        assert_eq!(educate("a---b"), "a&mdash;b");
        // Four hyphens satisfy neither dash rule.
        assert_eq!(educate("a----b"), "a----b");
    }

    #[test]
    fn ellipses_educate_only_exact_triples() {
        assert_eq!(educate("wait..."), "wait&hellip;");
        assert_eq!(educate("wait...."), "wait....");
    }

    #[test]
    fn double_quotes_educate_in_pairs() {
        assert_eq!(educate("\"Hello\""), "&ldquo;Hello&rdquo;");
        assert_eq!(educate("He said, \"yes\" twice"), "He said, &ldquo;yes&rdquo; twice");
    }

    #[test]
    fn single_quotes_educate_in_pairs() {
        assert_eq!(educate("'Hello'"), "&lsquo;Hello&rsquo;");
        assert_eq!(educate("it's"), "it&rsquo;s");
    }

    #[test]
    fn decade_abbreviation_closes_the_quote() {
        assert_eq!(educate("'80s"), "&rsquo;80s");
        assert_eq!(educate("the '80s were loud"), "the &rsquo;80s were loud");
    }

    #[test]
    fn nested_quote_sets_open_together() {
        assert_eq!(
            educate("He said, \"'Quoted' words.\""),
            "He said, &ldquo;&lsquo;Quoted&rsquo; words.&rdquo;"
        );
    }

    #[test]
    fn possessives_and_trailing_quotes_close() {
        assert_eq!(educate("James's book"), "James&rsquo;s book");
        assert_eq!(educate("the dogs' bowls"), "the dogs&rsquo; bowls");
    }

    #[test]
    fn dash_delimiter_before_quote_stays_educable() {
        // The opening-quote rule consumes the dashes as its delimiter
        // and re-emits them; the later dash family then educates them.
        assert_eq!(educate("a--'x"), "a&ndash;&lsquo;x");
        assert_eq!(educate("wait--\"go\""), "wait&ndash;&ldquo;go&rdquo;");
    }

    #[test]
    fn entity_dash_delimiter_opens_a_quote() {
        assert_eq!(educate("pause&ndash;'word"), "pause&ndash;&lsquo;word");
    }

    #[test]
    fn run_initial_quote_before_punctuation_closes() {
        assert_eq!(educate("'. . .' she said"), "&rsquo;. . .&rsquo; she said");
    }

    #[test]
    fn angled_quotes_are_off_by_default() {
        assert_eq!(educate("<<hi>>"), "<<hi>>");
    }

    #[test]
    fn angled_quotes_educate_when_enabled() {
        let config = SmartPunctConfig::from_json(&json!({ "smart_angled_quotes": true })).unwrap();
        let educator = Educator::new(&config).unwrap();
        assert_eq!(educator.educate("<<hi>>"), "&laquo;hi&raquo;");
    }

    #[test]
    fn families_compose_in_one_run() {
        assert_eq!(
            educate("Ellipses... and -- dashes"),
            "Ellipses&hellip; and &ndash; dashes"
        );
    }

    #[test]
    fn output_is_never_re_educated() {
        let inputs = [
            "\"Hello\"",
            "'80s",
            "a--'x",
            "wait... --- 'quote'",
            "He said, \"'Quoted' words.\"",
        ];
        let educator = Educator::with_defaults();
        for input in inputs {
            let once = educator.educate(input);
            assert_eq!(educator.educate(&once), once, "{input}");
        }
    }

    #[test]
    fn protected_spans_pass_through_untouched() {
        let educator = Educator::with_defaults();
        let input = "<a title=\"don't\">x</a>";
        let out = educator.educate_run(input, &[0..17, 18..22]);
        assert_eq!(out, input);
    }

    #[test]
    fn education_resumes_after_a_protected_span() {
        let educator = Educator::with_defaults();
        // The tag is opaque; the quotes around the following word are not.
        let input = "<b>bold</b> and 'quoted'";
        let out = educator.educate_run(input, &[0..3, 7..11]);
        assert_eq!(out, "<b>bold</b> and &lsquo;quoted&rsquo;");
    }

    #[test]
    fn match_overlapping_protected_span_is_vetoed() {
        let educator = Educator::with_defaults();
        // Second hyphen is protected, so neither dash rule may fire.
        let out = educator.educate_run("a--b", &[2..3]);
        assert_eq!(out, "a--b");
    }

    #[test]
    fn substitution_overrides_change_the_output_glyphs() {
        let config = SmartPunctConfig::from_json(&json!({
            "substitutions": {
                "ndash": "\u{2013}",
                "mdash": "\u{2014}",
                "ellipsis": "\u{2026}",
                "left-double-quote": "\u{201c}",
                "right-double-quote": "\u{201d}",
            },
        }))
        .unwrap();
        let educator = Educator::new(&config).unwrap();
        assert_eq!(
            educator.educate("\"A--B---C\"..."),
            "\u{201c}A\u{2013}B\u{2014}C\u{201d}\u{2026}"
        );
    }

    #[test]
    fn educate_with_queries_the_source() {
        let educator = Educator::with_defaults();
        let tags = |text: &str| -> Vec<std::ops::Range<usize>> {
            text.find("<x>").map(|s| s..s + 3).into_iter().collect()
        };
        let out = educator.educate_with("--<x>--", &tags);
        assert_eq!(out, "&ndash;<x>&ndash;");
    }

    #[test]
    fn educator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Educator>();
    }
}
