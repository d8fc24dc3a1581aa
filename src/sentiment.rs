use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::lexicon::SentimentLexicon;
use crate::models::Article;
use crate::tokenize::Tokenizer;

/// Scores strictly above this are "Positive".
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are "Negative".
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Every bucket, in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lexicon-based scorer. The score is the polarity sum divided by the token
/// count, so long and short articles land on the same scale.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Arc<SentimentLexicon>,
    tokenizer: Tokenizer,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(SentimentLexicon::builtin(), Tokenizer::default())
    }
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<SentimentLexicon>, tokenizer: Tokenizer) -> Self {
        Self { lexicon, tokenizer }
    }

    pub fn score_text(&self, text: &str) -> f64 {
        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let sum: f64 = tokens
            .iter()
            .filter_map(|t| self.lexicon.polarity(t))
            .map(|p| p.weight())
            .sum();
        sum / tokens.len() as f64
    }

    pub fn score_article(&self, article: &Article) -> f64 {
        self.score_text(&article.combined_text())
    }

    /// Writes each article's score exactly once. Articles are scored in
    /// parallel; `&mut` guarantees no other writer.
    pub fn analyze_sentiment(&self, articles: &mut [Article]) {
        articles.par_iter_mut().for_each(|a| {
            a.sentiment = self.score_article(a);
        });
        debug!("Sentiment scoring completed - articles={}", articles.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn article(url: &str, title: &str, desc: &str, content: &str) -> Article {
        Article::new(url, title, desc, content, Source::named("Test Source"))
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(Sentiment::from_score(0.15), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(-0.2), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(-0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }

    #[test]
    fn polar_articles() {
        let scorer = SentimentScorer::default();
        let good = article(
            "http://test.com/1",
            "Great success in technology breakthrough",
            "Amazing progress made in new technology development",
            "This is wonderful news about excellent progress",
        );
        let bad = article(
            "http://test.com/2",
            "Terrible disaster strikes city",
            "Bad news about awful tragedy and crisis",
            "This is horrible news about terrible problems",
        );
        let good_score = scorer.score_article(&good);
        let bad_score = scorer.score_article(&bad);
        assert!(good_score > POSITIVE_THRESHOLD, "{good_score}");
        assert!(bad_score < NEGATIVE_THRESHOLD, "{bad_score}");
    }

    #[test]
    fn headline_framing_words_move_buckets() {
        let scorer = SentimentScorer::default();
        let concern = scorer.score_text("Officials raise concern over the issue");
        assert!((concern - (-2.0 / 6.0)).abs() < 1e-12, "{concern}");
        assert_eq!(Sentiment::from_score(concern), Sentiment::Negative);

        let rally = scorer.score_text("Stocks hit record high, top performers first");
        assert!((rally - 4.0 / 7.0).abs() < 1e-12, "{rally}");
    }

    #[test]
    fn no_matches_is_exactly_zero() {
        let scorer = SentimentScorer::default();
        let a = article("u", "Normal regular standard", "", "");
        assert_eq!(scorer.score_article(&a), 0.0);
        assert_eq!(scorer.score_article(&Article::default()), 0.0);
    }

    #[test]
    fn score_is_normalized_by_length() {
        let scorer = SentimentScorer::default();
        // 1 positive among 4 tokens
        assert!((scorer.score_text("good weather today outside") - 0.25).abs() < 1e-12);
        // only positive tokens saturate at 1.0
        assert!((scorer.score_text("great excellent amazing") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn analyze_writes_and_is_idempotent() {
        let scorer = SentimentScorer::default();
        let mut articles = vec![
            article("a", "Great excellent amazing", "", ""),
            article("b", "Terrible horrible awful", "", ""),
            article("c", "Normal regular standard", "", ""),
        ];
        scorer.analyze_sentiment(&mut articles);
        let first: Vec<f64> = articles.iter().map(|a| a.sentiment).collect();
        scorer.analyze_sentiment(&mut articles);
        let second: Vec<f64> = articles.iter().map(|a| a.sentiment).collect();
        assert_eq!(first, second);
        assert_eq!(articles[0].sentiment_label(), Sentiment::Positive);
        assert_eq!(articles[1].sentiment_label(), Sentiment::Negative);
        assert_eq!(articles[2].sentiment_label(), Sentiment::Neutral);
    }
}
