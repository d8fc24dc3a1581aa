use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::keywords::{KeywordExtractor, MIN_KEYWORD_LEN};
use crate::lexicon::SentimentLexicon;
use crate::sentiment::SentimentScorer;
use crate::stopwords::StopwordSet;
use crate::summarize::{ArticleSummarizer, DEFAULT_KEY_POINTS, DEFAULT_SUMMARY_KEYWORDS};
use crate::tokenize::{Tokenizer, MIN_TOKEN_LEN};

pub const CONFIG_ENV: &str = "NEWS_ANALYTICS_CONFIG";
const KEY_POINTS_ENV: &str = "NEWS_ANALYTICS_KEY_POINTS";
const SUMMARY_KEYWORDS_ENV: &str = "NEWS_ANALYTICS_SUMMARY_KEYWORDS";
const CORPUS_KEYWORDS_ENV: &str = "NEWS_ANALYTICS_CORPUS_KEYWORDS";

/// Window sizes and minimums for the analysis pipeline. Sentiment thresholds
/// are fixed constants in `sentiment` and deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sentences kept per article summary.
    pub key_points: usize,
    /// Keywords reported per article summary.
    pub summary_keywords: usize,
    /// Keywords reported for the whole batch.
    pub corpus_keywords: usize,
    pub min_token_len: usize,
    pub min_keyword_len: usize,
    pub fetch_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            key_points: DEFAULT_KEY_POINTS,
            summary_keywords: DEFAULT_SUMMARY_KEYWORDS,
            corpus_keywords: 20,
            min_token_len: MIN_TOKEN_LEN,
            min_keyword_len: MIN_KEYWORD_LEN,
            fetch_timeout_secs: 20,
        }
    }
}

impl AnalysisConfig {
    /// Explicit path, else `NEWS_ANALYTICS_CONFIG`, else defaults; then
    /// per-field env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut cfg = match path {
            Some(p) => {
                debug!("Loading analysis config - path={}", p.display());
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("Reading config {}", p.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Parsing config {}", p.display()))?
            }
            None => AnalysisConfig::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) -> Result<()> {
        for (var, slot) in [
            (KEY_POINTS_ENV, &mut self.key_points),
            (SUMMARY_KEYWORDS_ENV, &mut self.summary_keywords),
            (CORPUS_KEYWORDS_ENV, &mut self.corpus_keywords),
        ] {
            if let Ok(v) = std::env::var(var) {
                *slot = v
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a non-negative integer, got '{}'", var, v))?;
                debug!("Config override from env - {}={}", var, slot);
            }
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.min_token_len)
    }

    pub fn scorer(&self) -> SentimentScorer {
        SentimentScorer::new(SentimentLexicon::builtin(), self.tokenizer())
    }

    pub fn keyword_extractor(&self) -> KeywordExtractor {
        KeywordExtractor::new(self.tokenizer(), StopwordSet::english(), self.min_keyword_len)
    }

    pub fn summarizer(&self) -> ArticleSummarizer {
        ArticleSummarizer::new(
            self.tokenizer(),
            self.keyword_extractor(),
            self.key_points,
            self.summary_keywords,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Tests that read or write process env take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn defaults_match_documented_windows() {
        let c = AnalysisConfig::default();
        assert_eq!(c.key_points, 5);
        assert_eq!(c.summary_keywords, 15);
        assert_eq!(c.min_token_len, 2);
        assert_eq!(c.min_keyword_len, 3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let _env = env_guard();
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        write!(f, r#"{{"key_points": 3, "corpus_keywords": 8}}"#).expect("write");
        let c = AnalysisConfig::load(Some(f.path())).expect("loads");
        assert_eq!(c.key_points, 3);
        assert_eq!(c.corpus_keywords, 8);
        assert_eq!(c.summary_keywords, DEFAULT_SUMMARY_KEYWORDS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let _env = env_guard();
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        write!(f, "key_points = 3").expect("write");
        assert!(AnalysisConfig::load(Some(f.path())).is_err());
    }

    #[test]
    fn env_overrides_apply_after_file() {
        let _env = env_guard();
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        write!(f, r#"{{"key_points": 3, "summary_keywords": 9}}"#).expect("write");

        std::env::set_var(CONFIG_ENV, f.path());
        std::env::set_var(KEY_POINTS_ENV, " 7 ");
        let overridden = AnalysisConfig::load(None);

        std::env::set_var(CORPUS_KEYWORDS_ENV, "lots");
        let bad = AnalysisConfig::load(None);

        for var in [CONFIG_ENV, KEY_POINTS_ENV, SUMMARY_KEYWORDS_ENV, CORPUS_KEYWORDS_ENV] {
            std::env::remove_var(var);
        }

        let c = overridden.expect("loads");
        assert_eq!(c.key_points, 7);
        assert_eq!(c.summary_keywords, 9);
        assert_eq!(c.corpus_keywords, 20);

        let err = format!("{:#}", bad.expect_err("non-integer override rejected"));
        assert!(err.contains(CORPUS_KEYWORDS_ENV), "{err}");
        assert_eq!(AnalysisConfig::load(None).expect("defaults"), AnalysisConfig::default());
    }
}
