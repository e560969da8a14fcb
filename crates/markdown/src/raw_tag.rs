//! Raw HTML tag detection for the protected-region guard.
//!
//! The host pipeline stashes raw tags before inline substitution runs;
//! this scanner reproduces that contract so quote and dash characters
//! inside a tag (attribute values in particular) are never educated.

use std::ops::Range;

/// Byte spans of raw tags and comments in `text`.
///
/// A tag is `<`, an optional `/`, an ASCII letter, then anything except
/// angle brackets up to `>`. With `strict` set, a tag immediately
/// followed by another `>` is rejected, so a guillemet close like
/// `<<b>>` educates instead of being swallowed as the tag `<b>`.
pub fn tag_spans(text: &str, strict: bool) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if let Some(end) = match_comment(text, i).or_else(|| match_tag(text, i, strict)) {
            spans.push(i..end);
            i = end;
        } else {
            i += 1;
        }
    }
    spans
}

fn match_comment(text: &str, start: usize) -> Option<usize> {
    let body = text[start..].strip_prefix("<!--")?;
    let close = body.find("-->")?;
    // A nested opener means this is not a well-formed comment.
    if body[..close].contains("<!--") {
        return None;
    }
    Some(start + 4 + close + 3)
}

fn match_tag(text: &str, start: usize, strict: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    if bytes.get(i) == Some(&b'/') {
        i += 1;
    }
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    i += 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'>' => {
                if strict && bytes.get(i + 1) == Some(&b'>') {
                    return None;
                }
                return Some(i + 1);
            }
            b'<' => return None,
            _ => i += 1,
        }
    }
    None
}
