use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::sentiment::Sentiment;

/// Keyword -> occurrence count, ordered by rank.
pub type FrequencyMap = IndexMap<String, u32>;

/// Category label -> article count.
pub type DistributionMap = IndexMap<String, u32>;

/// Label used when an article's source has no display name.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Source {
    pub fn named(name: impl Into<String>) -> Self {
        Self { id: None, name: Some(name.into()) }
    }

    /// Display name, or the sentinel when absent or blank.
    pub fn label(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => UNKNOWN_SOURCE,
        }
    }
}

/// A news article as handed over by the ingestion layer. The URL is its identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Written by `SentimentScorer::analyze_sentiment`; 0.0 until then.
    #[serde(default)]
    pub sentiment: f64,
}

impl Article {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            content: content.into(),
            source,
            ..Default::default()
        }
    }

    /// Title, description and content joined by spaces, blank parts skipped.
    pub fn combined_text(&self) -> String {
        [&self.title, &self.description, &self.content]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn sentiment_label(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment)
    }

    pub fn source_label(&self) -> &str {
        self.source.label()
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// Result of summarizing one article. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleSummary {
    pub title: String,
    pub word_count: usize,
    /// Selected sentences, in their order of appearance.
    pub key_points: Vec<String>,
    pub keywords: FrequencyMap,
    /// HTML-escaped text with keyword occurrences wrapped in highlight marks.
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
