//! Backslash-escape protection.
//!
//! Escapes are resolved by the host after all inline passes, so the
//! engine must leave each backslash pair untouched. The quote chars are
//! registered as escapable on top of the Markdown defaults, giving
//! users a way to force literal straight quotes.

use std::ops::Range;

/// Characters escapable by the host Markdown pipeline.
pub const MARKDOWN_ESCAPED_CHARS: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '>', '#', '+', '-', '.', '!',
];

/// Quote characters this extension additionally registers as escapable.
pub const QUOTE_ESCAPED_CHARS: &[char] = &['"', '\''];

/// Byte spans of backslash escape pairs to pass through untouched.
pub fn escaped_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c == '\\'
            && let Some(&(_, next)) = chars.peek()
            && is_escapable(next)
        {
            spans.push(start..start + 1 + next.len_utf8());
            chars.next();
        }
    }
    spans
}

fn is_escapable(c: char) -> bool {
    MARKDOWN_ESCAPED_CHARS.contains(&c) || QUOTE_ESCAPED_CHARS.contains(&c)
}
