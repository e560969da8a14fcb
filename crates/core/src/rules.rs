//! Substitution rules: four independently toggleable families, ordered
//! into a single flat priority list at configuration time.
//!
//! Quote direction is context dependent, so the quote family carries a
//! strict internal precedence: special cases first (sentence-initial
//! closers, nested quote openings, decade abbreviations), then the
//! directional rules, then catch-all fallbacks that guarantee every
//! quote character is substituted exactly once.

use crate::config::SmartPunctConfig;
use crate::glyphs::GlyphKind;
use crate::protect::{Neighbor, Run};

/// Rule family, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `...` into the ellipsis glyph.
    Ellipses,
    /// Straight quotes into curly quote glyphs.
    Quotes,
    /// `<<` and `>>` into guillemet glyphs.
    AngledQuotes,
    /// `--` and `---` into dash glyphs.
    Dashes,
}

/// One piece of a replacement template.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Piece {
    /// Glyph from the table; protected after substitution so no later
    /// rule can re-educate it.
    Glyph(GlyphKind),
    /// The captured delimiter, re-emitted verbatim and still educable
    /// by later rules.
    Backref,
}

/// Constraint on the char just before a match.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LeftCtx {
    Any,
    /// Not preceded by `.` (caps an ellipsis run at three dots).
    NotDot,
    /// Not preceded by `-` (caps a dash run).
    NotHyphen,
    /// Not preceded by a word character.
    NotWord,
    /// Preceded by a close-adjacent character: anything except space,
    /// tab, CR, LF, `[`, `{`, `(`, `-`, or a protected boundary.
    CloseClass,
}

/// Lookahead constraint just after a match; asserted, never consumed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RightCtx {
    Any,
    /// Not followed by `.`.
    NotDot,
    /// Not followed by `-`.
    NotHyphen,
    /// Followed by a word character.
    Word,
    /// Followed by whitespace.
    Whitespace,
    /// Followed by punctuation at a non-word break (a run-initial quote
    /// before punctuation is a closer, not an opener).
    PunctNonBoundary,
    /// Followed by two digits and `s` (decade abbreviations like `'80s`).
    Decade,
    /// Followed by none of: whitespace, `s` at a word boundary, a digit.
    NotCloseFollow,
}

/// What a rule consumes.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Body {
    /// Literal text.
    Lit(&'static str),
    /// An opening delimiter (whitespace, `&nbsp;`, or any dash form)
    /// followed by the quote char; the delimiter is captured.
    DelimQuote(char),
    /// The quote char followed by a captured trail: one whitespace
    /// char, or `s` at a word boundary.
    QuoteTrail(char),
}

/// An ordered substitution rule: context predicates around a consumed
/// body, plus a replacement template.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    name: &'static str,
    family: Family,
    priority: u8,
    /// Matches only at the absolute start of the run.
    start_anchored: bool,
    left: LeftCtx,
    body: Body,
    right: RightCtx,
    replacement: &'static [Piece],
}

/// A successful rule application: the consumed span and the captured
/// delimiter, if the rule has one.
#[derive(Debug, Clone)]
pub(crate) struct RuleMatch {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) capture: Option<std::ops::Range<usize>>,
}

impl Rule {
    /// Rule name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The family this rule belongs to.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Numeric rank; higher wins. Pairwise distinct within a family,
    /// and families occupy disjoint bands.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub(crate) fn replacement(&self) -> &'static [Piece] {
        self.replacement
    }

    pub(crate) fn is_start_anchored(&self) -> bool {
        self.start_anchored
    }

    /// Attempts this rule at byte position `pos` of the run.
    pub(crate) fn match_at(&self, run: &Run, pos: usize) -> Option<RuleMatch> {
        if self.start_anchored && pos != 0 {
            return None;
        }
        if !left_ok(self.left, run.before(pos)) {
            return None;
        }
        let (end, capture) = match self.body {
            Body::Lit(lit) => {
                if !run.lit_at(pos, lit) {
                    return None;
                }
                (pos + lit.len(), None)
            }
            Body::DelimQuote(quote) => {
                let (end, capture) = match_delim_quote(run, pos, quote)?;
                (end, Some(capture))
            }
            Body::QuoteTrail(quote) => {
                let (end, capture) = match_quote_trail(run, pos, quote)?;
                (end, Some(capture))
            }
        };
        if !right_ok(self.right, run, end) {
            return None;
        }
        Some(RuleMatch {
            start: pos,
            end,
            capture,
        })
    }
}

/// Word characters, matching the quote rules' notion of a word break.
fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// ASCII punctuation minus `&`, so entity text never reads as
/// punctuation context.
fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation() && c != '&'
}

/// The close-adjacent class: everything except the listed openers and
/// whitespace. Deliberately only ASCII whitespace; a non-breaking space
/// counts as close-adjacent.
fn in_close_class(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '\r' | '\n' | '[' | '{' | '(' | '-')
}

fn is_word_neighbor(neighbor: Neighbor) -> bool {
    matches!(neighbor, Neighbor::Ch(c) if is_word_char(c))
}

fn left_ok(left: LeftCtx, neighbor: Neighbor) -> bool {
    match left {
        LeftCtx::Any => true,
        LeftCtx::NotDot => !matches!(neighbor, Neighbor::Ch('.')),
        LeftCtx::NotHyphen => !matches!(neighbor, Neighbor::Ch('-')),
        LeftCtx::NotWord => !is_word_neighbor(neighbor),
        LeftCtx::CloseClass => matches!(neighbor, Neighbor::Ch(c) if in_close_class(c)),
    }
}

fn right_ok(right: RightCtx, run: &Run, end: usize) -> bool {
    match right {
        RightCtx::Any => true,
        RightCtx::NotDot => !matches!(run.at(end), Neighbor::Ch('.')),
        RightCtx::NotHyphen => !matches!(run.at(end), Neighbor::Ch('-')),
        RightCtx::Word => is_word_neighbor(run.at(end)),
        RightCtx::Whitespace => matches!(run.at(end), Neighbor::Ch(c) if c.is_whitespace()),
        RightCtx::PunctNonBoundary => match run.at(end) {
            Neighbor::Ch(c) if is_punct_char(c) => {
                !is_word_neighbor(run.at(end + c.len_utf8()))
            }
            _ => false,
        },
        RightCtx::Decade => {
            matches!(run.at(end), Neighbor::Ch(c) if c.is_ascii_digit())
                && matches!(run.at(end + 1), Neighbor::Ch(c) if c.is_ascii_digit())
                && matches!(run.at(end + 2), Neighbor::Ch('s'))
        }
        RightCtx::NotCloseFollow => match run.at(end) {
            Neighbor::Ch(c) if c.is_whitespace() => false,
            Neighbor::Ch(c) if c.is_ascii_digit() => false,
            Neighbor::Ch('s') if !is_word_neighbor(run.at(end + 1)) => false,
            _ => true,
        },
    }
}

/// Opening-delimiter alternatives for the opening-quote rules, tried in
/// order after the single-whitespace-char case: a non-breaking-space
/// entity, ASCII dashes, the Unicode dashes, and the dash entities in
/// named and decimal form.
const OPENING_DELIMS: &[&str] = &[
    "&nbsp;", "--", "\u{2013}", "\u{2014}", "&mdash;", "&ndash;", "&#8211;", "&#8212;",
];

fn match_delim_quote(
    run: &Run,
    pos: usize,
    quote: char,
) -> Option<(usize, std::ops::Range<usize>)> {
    if let Neighbor::Ch(c) = run.at(pos)
        && c.is_whitespace()
    {
        let delim_end = pos + c.len_utf8();
        if let Some(end) = quote_at(run, delim_end, quote) {
            return Some((end, pos..delim_end));
        }
    }
    for delim in OPENING_DELIMS {
        if run.lit_at(pos, delim) {
            let delim_end = pos + delim.len();
            if let Some(end) = quote_at(run, delim_end, quote) {
                return Some((end, pos..delim_end));
            }
        }
    }
    None
}

fn match_quote_trail(
    run: &Run,
    pos: usize,
    quote: char,
) -> Option<(usize, std::ops::Range<usize>)> {
    let end = quote_at(run, pos, quote)?;
    match run.at(end) {
        Neighbor::Ch(c) if c.is_whitespace() => Some((end + c.len_utf8(), end..end + c.len_utf8())),
        Neighbor::Ch('s') if !is_word_neighbor(run.at(end + 1)) => Some((end + 1, end..end + 1)),
        _ => None,
    }
}

fn quote_at(run: &Run, pos: usize, quote: char) -> Option<usize> {
    match run.at(pos) {
        Neighbor::Ch(c) if c == quote => Some(pos + c.len_utf8()),
        _ => None,
    }
}

const ELLIPSES: &[Rule] = &[Rule {
    name: "ellipses",
    family: Family::Ellipses,
    priority: 80,
    start_anchored: false,
    left: LeftCtx::NotDot,
    body: Body::Lit("..."),
    right: RightCtx::NotDot,
    replacement: &[Piece::Glyph(GlyphKind::Ellipsis)],
}];

const QUOTES: &[Rule] = &[
    // A run-initial quote directly before punctuation closes by brute
    // force: `'Quoted,' she said` starts mid-sentence after splitting.
    Rule {
        name: "single-quote-start",
        family: Family::Quotes,
        priority: 70,
        start_anchored: true,
        left: LeftCtx::Any,
        body: Body::Lit("'"),
        right: RightCtx::PunctNonBoundary,
        replacement: &[Piece::Glyph(GlyphKind::RightSingleQuote)],
    },
    Rule {
        name: "double-quote-start",
        family: Family::Quotes,
        priority: 69,
        start_anchored: true,
        left: LeftCtx::Any,
        body: Body::Lit("\""),
        right: RightCtx::PunctNonBoundary,
        replacement: &[Piece::Glyph(GlyphKind::RightDoubleQuote)],
    },
    // Nested openings: `"'Quoted' words in a larger quote."`.
    Rule {
        name: "double-quote-sets",
        family: Family::Quotes,
        priority: 68,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("\"'"),
        right: RightCtx::Word,
        replacement: &[
            Piece::Glyph(GlyphKind::LeftDoubleQuote),
            Piece::Glyph(GlyphKind::LeftSingleQuote),
        ],
    },
    Rule {
        name: "single-quote-sets",
        family: Family::Quotes,
        priority: 67,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("'\""),
        right: RightCtx::Word,
        replacement: &[
            Piece::Glyph(GlyphKind::LeftSingleQuote),
            Piece::Glyph(GlyphKind::LeftDoubleQuote),
        ],
    },
    // Decade abbreviations: the `'80s`.
    Rule {
        name: "decade-abbr",
        family: Family::Quotes,
        priority: 66,
        start_anchored: false,
        left: LeftCtx::NotWord,
        body: Body::Lit("'"),
        right: RightCtx::Decade,
        replacement: &[Piece::Glyph(GlyphKind::RightSingleQuote)],
    },
    Rule {
        name: "opening-single-quotes",
        family: Family::Quotes,
        priority: 65,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::DelimQuote('\''),
        right: RightCtx::Word,
        replacement: &[Piece::Backref, Piece::Glyph(GlyphKind::LeftSingleQuote)],
    },
    Rule {
        name: "closing-single-quotes",
        family: Family::Quotes,
        priority: 64,
        start_anchored: false,
        left: LeftCtx::CloseClass,
        body: Body::Lit("'"),
        right: RightCtx::NotCloseFollow,
        replacement: &[Piece::Glyph(GlyphKind::RightSingleQuote)],
    },
    Rule {
        name: "closing-single-quotes-trail",
        family: Family::Quotes,
        priority: 63,
        start_anchored: false,
        left: LeftCtx::CloseClass,
        body: Body::QuoteTrail('\''),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::RightSingleQuote), Piece::Backref],
    },
    // Fallback: all remaining single quotes open.
    Rule {
        name: "remaining-single-quotes",
        family: Family::Quotes,
        priority: 62,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("'"),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::LeftSingleQuote)],
    },
    Rule {
        name: "opening-double-quotes",
        family: Family::Quotes,
        priority: 61,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::DelimQuote('"'),
        right: RightCtx::Word,
        replacement: &[Piece::Backref, Piece::Glyph(GlyphKind::LeftDoubleQuote)],
    },
    Rule {
        name: "closing-double-quotes",
        family: Family::Quotes,
        priority: 60,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("\""),
        right: RightCtx::Whitespace,
        replacement: &[Piece::Glyph(GlyphKind::RightDoubleQuote)],
    },
    Rule {
        name: "closing-double-quotes-adjacent",
        family: Family::Quotes,
        priority: 59,
        start_anchored: false,
        left: LeftCtx::CloseClass,
        body: Body::Lit("\""),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::RightDoubleQuote)],
    },
    // Fallback: all remaining double quotes open.
    Rule {
        name: "remaining-double-quotes",
        family: Family::Quotes,
        priority: 58,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("\""),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::LeftDoubleQuote)],
    },
];

const ANGLED_QUOTES: &[Rule] = &[
    Rule {
        name: "left-angle-quotes",
        family: Family::AngledQuotes,
        priority: 50,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit("<<"),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::LeftAngleQuote)],
    },
    Rule {
        name: "right-angle-quotes",
        family: Family::AngledQuotes,
        priority: 45,
        start_anchored: false,
        left: LeftCtx::Any,
        body: Body::Lit(">>"),
        right: RightCtx::Any,
        replacement: &[Piece::Glyph(GlyphKind::RightAngleQuote)],
    },
];

const DASHES: &[Rule] = &[
    // Three hyphens must be tried before two so `---` is never split
    // into dash plus dash.
    Rule {
        name: "em-dashes",
        family: Family::Dashes,
        priority: 40,
        start_anchored: false,
        left: LeftCtx::NotHyphen,
        body: Body::Lit("---"),
        right: RightCtx::NotHyphen,
        replacement: &[Piece::Glyph(GlyphKind::Mdash)],
    },
    Rule {
        name: "en-dashes",
        family: Family::Dashes,
        priority: 35,
        start_anchored: false,
        left: LeftCtx::NotHyphen,
        body: Body::Lit("--"),
        right: RightCtx::NotHyphen,
        replacement: &[Piece::Glyph(GlyphKind::Ndash)],
    },
];

/// Builds the flat rule list for a configuration: enabled families are
/// registered in a fixed sequence (ellipses, quotes, angled quotes,
/// dashes), then stably ordered by descending priority. Family bands
/// are disjoint, so registration order is the tie-break and the list is
/// computed once for the lifetime of the engine.
pub fn build_rules(config: &SmartPunctConfig) -> Vec<Rule> {
    let mut rules = Vec::new();
    if config.smart_ellipses {
        rules.extend_from_slice(ELLIPSES);
    }
    if config.smart_quotes {
        rules.extend_from_slice(QUOTES);
    }
    if config.smart_angled_quotes {
        rules.extend_from_slice(ANGLED_QUOTES);
    }
    if config.smart_dashes {
        rules.extend_from_slice(DASHES);
    }
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    rules
}
