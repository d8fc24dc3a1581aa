//! Aggregations over already-scored articles. No text processing happens here.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Article, DistributionMap};
use crate::sentiment::Sentiment;

/// Counts per sentiment bucket. All three labels are always present, in the
/// order Positive, Negative, Neutral, even when a count is zero.
pub fn sentiment_distribution(articles: &[Article]) -> DistributionMap {
    let mut dist: DistributionMap = Sentiment::ALL
        .iter()
        .map(|s| (s.label().to_string(), 0))
        .collect();
    for a in articles {
        if let Some(n) = dist.get_mut(a.sentiment_label().label()) {
            *n += 1;
        }
    }
    dist
}

/// Counts per source display name, count descending then name ascending.
/// Articles without a source name count under `UNKNOWN_SOURCE`.
pub fn source_distribution(articles: &[Article]) -> DistributionMap {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for a in articles {
        *counts.entry(a.source_label()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn average_sentiment(articles: &[Article]) -> f64 {
    if articles.is_empty() {
        return 0.0;
    }
    articles.iter().map(|a| a.sentiment).sum::<f64>() / articles.len() as f64
}

/// Articles keyed by source label, groups in first-seen order.
pub fn group_by_source(articles: &[Article]) -> IndexMap<String, Vec<&Article>> {
    let mut groups: IndexMap<String, Vec<&Article>> = IndexMap::new();
    for a in articles {
        groups.entry(a.source_label().to_string()).or_default().push(a);
    }
    groups
}

pub fn group_by_sentiment(articles: &[Article]) -> BTreeMap<Sentiment, Vec<&Article>> {
    let mut groups: BTreeMap<Sentiment, Vec<&Article>> = BTreeMap::new();
    for a in articles {
        groups.entry(a.sentiment_label()).or_default().push(a);
    }
    groups
}

/// Articles keyed by `YYYY-MM-DD` of publication; undated articles are skipped.
pub fn group_by_date(articles: &[Article]) -> BTreeMap<String, Vec<&Article>> {
    let mut groups: BTreeMap<String, Vec<&Article>> = BTreeMap::new();
    for a in articles {
        if let Some(ts) = a.published_at {
            groups.entry(ts.date_naive().to_string()).or_default().push(a);
        }
    }
    groups
}

/// Articles published strictly after `now - hours`. A window too large to
/// represent reaches back indefinitely, so every dated article qualifies.
pub fn recent_articles(articles: &[Article], hours: i64, now: DateTime<Utc>) -> Vec<&Article> {
    let cutoff = Duration::try_hours(hours).and_then(|d| now.checked_sub_signed(d));
    articles
        .iter()
        .filter(|a| match (a.published_at, cutoff) {
            (Some(ts), Some(c)) => ts > c,
            (Some(_), None) => true,
            (None, _) => false,
        })
        .collect()
}
