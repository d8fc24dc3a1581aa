use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use crate::tokenize::word_spans;

pub const HIGHLIGHT_OPEN: &str = "<mark class=\"keyword\">";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Escapes `text` and wraps every whole-word, case-insensitive occurrence of
/// a keyword. `keywords` must be lowercase.
///
/// Matching works on the tokenizer's word boundaries, so a keyword that is a
/// substring of a longer word is never marked and no word is marked twice.
/// The matched text keeps its original casing.
pub fn highlight_keywords<S>(text: &str, keywords: &HashSet<S>) -> String
where
    S: Borrow<str> + Hash + Eq,
{
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut cursor = 0;
    for (start, end) in word_spans(text) {
        push_escaped(&mut out, &text[cursor..start]);
        let word = &text[start..end];
        if keywords.contains(word.to_lowercase().as_str()) {
            out.push_str(HIGHLIGHT_OPEN);
            push_escaped(&mut out, word);
            out.push_str(HIGHLIGHT_CLOSE);
        } else {
            push_escaped(&mut out, word);
        }
        cursor = end;
    }
    push_escaped(&mut out, &text[cursor..]);
    out
}

/// Text inside each highlight mark, in order.
pub fn marked_spans(html: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut rest = html;
    while let Some(open) = rest.find(HIGHLIGHT_OPEN) {
        let after = &rest[open + HIGHLIGHT_OPEN.len()..];
        match after.find(HIGHLIGHT_CLOSE) {
            Some(close) => {
                spans.push(&after[..close]);
                rest = &after[close + HIGHLIGHT_CLOSE.len()..];
            }
            None => break,
        }
    }
    spans
}
