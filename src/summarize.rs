use std::collections::HashSet;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::fetch::ArticleFetcher;
use crate::highlight::highlight_keywords;
use crate::keywords::KeywordExtractor;
use crate::models::{ArticleSummary, FrequencyMap};
use crate::tokenize::{word_spans, Tokenizer};

pub const DEFAULT_KEY_POINTS: usize = 5;
pub const DEFAULT_SUMMARY_KEYWORDS: usize = 15;

/// Title used when the caller supplies none.
pub const DEFAULT_TITLE: &str = "Article Summary";
/// Summary text for articles with no usable body.
pub const EMPTY_SUMMARY: &str = "No article content was available to summarize.";

/// Extractive single-article summarizer.
#[derive(Debug, Clone)]
pub struct ArticleSummarizer {
    tokenizer: Tokenizer,
    keywords: KeywordExtractor,
    key_points: usize,
    top_keywords: usize,
}

impl Default for ArticleSummarizer {
    fn default() -> Self {
        Self::new(
            Tokenizer::default(),
            KeywordExtractor::default(),
            DEFAULT_KEY_POINTS,
            DEFAULT_SUMMARY_KEYWORDS,
        )
    }
}

impl ArticleSummarizer {
    pub fn new(
        tokenizer: Tokenizer,
        keywords: KeywordExtractor,
        key_points: usize,
        top_keywords: usize,
    ) -> Self {
        Self { tokenizer, keywords, key_points, top_keywords }
    }

    /// Fetches through `fetcher`, then summarizes. A failed fetch is
    /// summarized as an empty body; it is logged, not returned.
    pub async fn summarize_from_url<F>(&self, fetcher: &F, url: &str) -> ArticleSummary
    where
        F: ArticleFetcher + ?Sized,
    {
        info!("Fetching article for summary - url={}", url);
        match fetcher.fetch_and_extract(url).await {
            Ok(fetched) => self.summarize(&fetched.title, &fetched.body, Some(url)),
            Err(e) => {
                warn!("Article fetch failed, using empty body - url={}, error={:#}", url, e);
                self.summarize("", "", Some(url))
            }
        }
    }

    pub fn summarize_from_text(&self, title: &str, body: &str) -> ArticleSummary {
        self.summarize(title, body, None)
    }

    fn summarize(&self, title: &str, body: &str, url: Option<&str>) -> ArticleSummary {
        let raw_title = title.trim();
        let display_title = if raw_title.is_empty() { DEFAULT_TITLE } else { raw_title };
        let body: String = body.nfc().collect();
        let body = body.trim();

        let word_count = self.tokenizer.tokenize(body).len();
        if word_count == 0 {
            debug!("Empty article body - title={}", display_title);
            return ArticleSummary {
                title: display_title.to_string(),
                word_count: 0,
                key_points: Vec::new(),
                keywords: FrequencyMap::new(),
                summary: EMPTY_SUMMARY.to_string(),
                url: url.map(str::to_string),
            };
        }

        let freq = self.keywords.frequencies(body);
        let sentences = split_sentences(body);
        let key_points = self.select_key_points(&sentences, &freq);

        let summary_text = if key_points.is_empty() {
            body.to_string()
        } else {
            key_points.join(" ")
        };

        // Only keywords that can be marked in the summary are reported.
        let in_summary: HashSet<String> = word_spans(&summary_text)
            .into_iter()
            .map(|(s, e)| summary_text[s..e].to_lowercase())
            .collect();
        let combined: String = format!("{} {}", raw_title, body).nfc().collect();
        let keywords: FrequencyMap = self
            .keywords
            .extract_from_text(&combined, self.top_keywords)
            .into_iter()
            .filter(|(k, _)| in_summary.contains(k))
            .collect();

        let marked: HashSet<&str> = keywords.keys().map(String::as_str).collect();
        let summary = highlight_keywords(&summary_text, &marked);

        debug!(
            "Summary completed - words={}, sentences={}, key_points={}, keywords={}",
            word_count,
            sentences.len(),
            key_points.len(),
            keywords.len()
        );

        ArticleSummary {
            title: display_title.to_string(),
            word_count,
            key_points,
            keywords,
            summary,
            url: url.map(str::to_string),
        }
    }

    /// Top sentences by summed keyword frequency, returned in text order.
    /// Sentences with no keyword weight never qualify.
    fn select_key_points(&self, sentences: &[String], freq: &FrequencyMap) -> Vec<String> {
        let mut scored: Vec<(usize, u32)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, self.sentence_score(s, freq)))
            .filter(|&(_, score)| score > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(self.key_points);
        scored.sort_by_key(|&(i, _)| i);
        scored.into_iter().map(|(i, _)| sentences[i].clone()).collect()
    }

    fn sentence_score(&self, sentence: &str, freq: &FrequencyMap) -> u32 {
        self.tokenizer
            .tokenize(sentence)
            .iter()
            .filter(|t| !self.keywords.stopwords().is_stopword(t))
            .filter_map(|t| freq.get(t.as_str()))
            .sum()
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// Titles and short forms whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "gen", "gov", "sen", "rep", "rev",
    "lt", "col", "capt", "sgt", "inc", "ltd", "co", "corp", "vs", "no", "jan", "feb", "apr",
    "aug", "sept", "oct", "nov", "dec",
];

/// True when the period at `dot` closes an abbreviation or a single-letter
/// initial ("Dr.", "J.").
fn ends_abbreviation(chars: &[(usize, char)], dot: usize) -> bool {
    let mut start = dot;
    while start > 0 && chars[start - 1].1.is_alphabetic() {
        start -= 1;
    }
    if start == dot || (start > 0 && chars[start - 1].1.is_alphanumeric()) {
        return false;
    }
    let word: String = chars[start..dot].iter().map(|&(_, c)| c).collect();
    if word.chars().count() == 1 {
        return word.chars().all(char::is_uppercase);
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// Splits on terminal punctuation (plus any closing quotes) followed by
/// whitespace, unless the next word starts lowercase ("e.g. this") or the
/// period closes a known abbreviation ("Dr. Smith").
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(b, _)| b);

    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && (is_terminal(chars[j].1) || is_closing(chars[j].1)) {
            j += 1;
        }
        if chars[i].1 == '.' && j == i + 1 && ends_abbreviation(&chars, i) {
            i = j;
            continue;
        }
        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }
        let at_end = k == chars.len();
        let next_starts_sentence = chars.get(k).is_some_and(|&(_, n)| !n.is_lowercase());
        if at_end || (k > j && next_starts_sentence) {
            push_sentence(&mut out, &text[start..byte_at(j)]);
            start = byte_at(k);
            i = k;
        } else {
            i = j;
        }
    }
    push_sentence(&mut out, &text[start..]);
    out
}

fn push_sentence(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}
