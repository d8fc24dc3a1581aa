use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{Article, Source};

/// NewsAPI-style response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiResponse {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiArticle {
    pub source: Option<ApiSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub content: Option<String>,
    pub published_at: Option<String>, // RFC 3339, e.g. "2025-03-10T09:30:00Z"
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiPayload {
    Response(ApiResponse),
    Bare(Vec<ApiArticle>),
}

impl From<ApiArticle> for Article {
    fn from(a: ApiArticle) -> Self {
        let published_at = a.published_at.as_deref().and_then(|ts| {
            match DateTime::parse_from_rfc3339(ts.trim()) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(e) => {
                    debug!("Unparseable publishedAt ignored - url={}, value={}, error={}", a.url, ts, e);
                    None
                }
            }
        });
        let source = a
            .source
            .map(|s| Source { id: s.id, name: s.name })
            .unwrap_or_default();

        Article {
            url: a.url,
            title: a.title.unwrap_or_default(),
            description: a.description.unwrap_or_default(),
            content: a.content.unwrap_or_default(),
            source,
            author: a.author,
            category: a.category,
            published_at,
            sentiment: 0.0,
        }
    }
}

/// Parses a response object or a bare article array.
pub fn parse_articles(json: &str) -> Result<Vec<Article>> {
    let payload: ApiPayload = serde_json::from_str(json).context("Decoding article JSON")?;
    let raw = match payload {
        ApiPayload::Response(r) => {
            if let Some(status) = r.status.as_deref().filter(|s| *s != "ok") {
                warn!("Input response status is not ok - status={}", status);
            }
            if let Some(total) = r.total_results {
                debug!("Input response metadata - total_results={}, articles={}", total, r.articles.len());
            }
            r.articles
        }
        ApiPayload::Bare(v) => v,
    };
    Ok(normalize_articles(raw.into_iter().map(Article::from).collect()))
}

pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let start = std::time::Instant::now();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading input {}", path.display()))?;
    let articles = parse_articles(&raw).with_context(|| format!("Parsing input {}", path.display()))?;
    info!(
        "Input load completed - path={}, duration={:.2}s, articles={}",
        path.display(),
        start.elapsed().as_secs_f32(),
        articles.len()
    );
    Ok(articles)
}

/// Trims titles, drops articles without a URL and keeps the first article
/// per URL.
pub fn normalize_articles(mut articles: Vec<Article>) -> Vec<Article> {
    let before = articles.len();
    let mut seen: HashSet<String> = HashSet::new();
    articles.retain_mut(|a| {
        a.url = a.url.trim().to_string();
        a.title = a.title.trim().to_string();
        !a.url.is_empty() && seen.insert(a.url.clone())
    });
    let removed = before - articles.len();
    if removed > 0 {
        info!("Deduplication - removed={} articles, retained={}", removed, articles.len());
    } else {
        debug!("Deduplication - no duplicates found, retained={} articles", articles.len());
    }
    articles
}
