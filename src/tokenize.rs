use unicode_normalization::UnicodeNormalization;

/// Shortest token kept by the general tokenizer. One-character remnants of
/// punctuation ("s" from "it's", stray initials) are noise.
pub const MIN_TOKEN_LEN: usize = 2;

/// Splits text on non-alphanumeric boundaries into lowercase word tokens.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    min_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self { min_len: MIN_TOKEN_LEN }
    }
}

impl Tokenizer {
    pub fn new(min_len: usize) -> Self {
        Self { min_len: min_len.max(1) }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Same input, same ordered output. Empty text yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfc().collect();
        normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= self.min_len)
            .map(|t| t.to_lowercase())
            .collect()
    }

    /// Absent text is treated as empty.
    pub fn tokenize_opt(&self, text: Option<&str>) -> Vec<String> {
        self.tokenize(text.unwrap_or_default())
    }
}

/// Tokenize with the default minimum length.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

/// Byte ranges of every alphanumeric run in `text`, in order. These are the
/// same boundaries `Tokenizer` splits on, before length filtering.
pub(crate) fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (c.is_alphanumeric(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lowercases_and_drops_short_tokens() {
        let toks = tokenize("Hello, World! It's a U.S.-based start-up (2024).");
        assert_eq!(
            toks,
            vec!["hello", "world", "it", "based", "start", "up", "2024"]
        );
    }

    #[test]
    fn empty_and_absent_text_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ... !!! ").is_empty());
        assert!(Tokenizer::default().tokenize_opt(None).is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "Markets rally as markets digest the rally.";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn custom_minimum() {
        let t = Tokenizer::new(4);
        assert_eq!(t.tokenize("the big brown fox jumped"), vec!["brown", "jumped"]);
    }

    #[test]
    fn word_spans_cover_alphanumeric_runs() {
        let text = "Café--au lait!";
        let words: Vec<&str> = word_spans(text).iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["Café", "au", "lait"]);
    }
}
