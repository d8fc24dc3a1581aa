use indexmap::IndexMap;
use itertools::Itertools;
use std::sync::Arc;
use tracing::debug;

use crate::models::{Article, FrequencyMap};
use crate::stopwords::StopwordSet;
use crate::tokenize::Tokenizer;

/// Shortest token considered a keyword. Stricter than the tokenizer minimum.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Counts keyword frequencies and ranks them.
///
/// Ranking is count descending; equal counts keep first-seen order in the
/// input text (title, description, content, article by article). The result
/// is therefore reproducible for the same input.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    tokenizer: Tokenizer,
    stopwords: Arc<StopwordSet>,
    min_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(Tokenizer::default(), StopwordSet::english(), MIN_KEYWORD_LEN)
    }
}

impl KeywordExtractor {
    pub fn new(tokenizer: Tokenizer, stopwords: Arc<StopwordSet>, min_len: usize) -> Self {
        Self { tokenizer, stopwords, min_len }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn is_keyword(&self, token: &str) -> bool {
        token.chars().count() >= self.min_len
            && !self.stopwords.is_stopword(token)
            && !token.chars().all(|c| c.is_numeric())
    }

    /// Unranked counts in first-seen order.
    pub fn frequencies(&self, text: &str) -> FrequencyMap {
        let mut freq: FrequencyMap = IndexMap::new();
        self.accumulate(&mut freq, text);
        freq
    }

    fn accumulate(&self, freq: &mut FrequencyMap, text: &str) {
        for tok in self.tokenizer.tokenize(text) {
            if self.is_keyword(&tok) {
                *freq.entry(tok).or_insert(0) += 1;
            }
        }
    }

    /// Top `top_k` keywords across all articles' combined text. `top_k == 0`
    /// yields an empty map; a `top_k` above the distinct count returns all.
    pub fn extract_keywords(&self, articles: &[Article], top_k: usize) -> FrequencyMap {
        let mut freq: FrequencyMap = IndexMap::new();
        for a in articles {
            self.accumulate(&mut freq, &a.combined_text());
        }
        debug!(
            "Keyword counting completed - articles={}, distinct={}, top_k={}",
            articles.len(),
            freq.len(),
            top_k
        );
        rank(freq, top_k)
    }

    pub fn extract_from_text(&self, text: &str, top_k: usize) -> FrequencyMap {
        rank(self.frequencies(text), top_k)
    }
}

/// Stable sort by count descending, then truncate.
pub fn rank(freq: FrequencyMap, top_k: usize) -> FrequencyMap {
    if top_k == 0 {
        return IndexMap::new();
    }
    freq.into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(top_k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn tech_articles() -> Vec<Article> {
        let src = Source::named("Test Source");
        vec![
            Article::new(
                "http://test.com/1",
                "Technology news about artificial intelligence",
                "AI technology is advancing rapidly in machine learning",
                "Artificial intelligence and machine learning technology news",
                src.clone(),
            ),
            Article::new(
                "http://test.com/2",
                "More technology news about AI development",
                "Technology companies developing artificial intelligence solutions",
                "AI technology development in various companies",
                src,
            ),
        ]
    }

    #[test]
    fn corpus_keywords() {
        let kw = KeywordExtractor::default().extract_keywords(&tech_articles(), 5);
        assert_eq!(kw.len(), 5);
        assert!(kw["technology"] >= 2);
        assert!(kw.contains_key("artificial"));
        assert_eq!(kw.get_index(0).map(|(k, _)| k.as_str()), Some("technology"));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let kw = KeywordExtractor::default().extract_from_text("zebra apple mango apple zebra mango kiwi", 10);
        let keys: Vec<&str> = kw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango", "kiwi"]);
    }

    #[test]
    fn filters_stopwords_short_and_numeric_tokens() {
        let kw = KeywordExtractor::default().extract_from_text("The AI of 2024 is the new era", 10);
        let keys: Vec<&str> = kw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["new", "era"]);
    }

    #[test]
    fn top_k_edges() {
        let ex = KeywordExtractor::default();
        assert!(ex.extract_keywords(&tech_articles(), 0).is_empty());
        let all = ex.extract_keywords(&tech_articles(), 1000);
        let distinct = ex.frequencies(
            &tech_articles().iter().map(|a| a.combined_text()).collect::<Vec<_>>().join(" "),
        );
        assert_eq!(all.len(), distinct.len());
        assert!(ex.extract_keywords(&[], 5).is_empty());
    }

    #[test]
    fn reproducible() {
        let ex = KeywordExtractor::default();
        let a = ex.extract_keywords(&tech_articles(), 8);
        let b = ex.extract_keywords(&tech_articles(), 8);
        assert!(a.iter().eq(b.iter()));
    }
}
