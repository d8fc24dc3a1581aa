// src/viz_export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::distribution::average_sentiment;
use crate::models::{Article, ArticleSummary, DistributionMap, FrequencyMap};

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Everything the chart renderer needs for one batch.
pub struct VizInput<'a> {
    pub articles: &'a [Article],
    pub sentiment: &'a DistributionMap,
    pub sources: &'a DistributionMap,
    pub keywords: &'a FrequencyMap,
    pub summaries: &'a [ArticleSummary],
}

/// Writes the D3-ready JSON files into `out_dir` and returns their names,
/// index last.
pub fn write_all_viz(out_dir: &Path, input: &VizInput<'_>) -> Result<Vec<String>> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;
    let mut files: Vec<String> = Vec::new();

    // 1) Sentiment buckets, fixed label order
    write_viz(out_dir, "viz.sentiment.json", &build_counts("label", input.sentiment), &mut files)?;

    // 2) Sources, rank order
    write_viz(out_dir, "viz.sources.json", &build_counts("source", input.sources), &mut files)?;

    // 3) Corpus keywords, rank order
    write_viz(out_dir, "viz.keywords.json", &build_counts("word", input.keywords), &mut files)?;

    // 4) Per-article scores
    write_viz(out_dir, "viz.articles.json", &build_articles(input.articles), &mut files)?;

    // 5) Summaries, only when any were requested
    if !input.summaries.is_empty() {
        write_viz(out_dir, "summaries.json", &input.summaries, &mut files)?;
    }

    // 6) Index
    let idx = json!({
        "version": 1,
        "counts": {
            "articles": input.articles.len(),
            "sources": input.sources.len(),
            "keywords": input.keywords.len(),
            "summaries": input.summaries.len(),
        },
        "average_sentiment": average_sentiment(input.articles),
        "files": files,
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;
    files.push("viz.index.json".to_string());

    Ok(files)
}

fn write_viz<T: ?Sized + Serialize>(
    out_dir: &Path,
    name: &str,
    value: &T,
    files: &mut Vec<String>,
) -> Result<()> {
    write_json(out_dir.join(name), value)?;
    files.push(name.to_string());
    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?).with_context(|| format!("write {:?}", path))
}

/* -------------------------------------------------------------------------- */
/* Counts (sentiment, sources, keywords)                                      */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VCount {
    key: String,
    count: u32,
}

#[derive(Serialize)]
struct VCounts {
    dimension: &'static str,
    total: u32,
    items: Vec<VCount>,
}

fn build_counts(dimension: &'static str, map: &DistributionMap) -> VCounts {
    VCounts {
        dimension,
        total: map.values().sum(),
        items: map
            .iter()
            .map(|(k, &count)| VCount { key: k.clone(), count })
            .collect(),
    }
}

/* -------------------------------------------------------------------------- */
/* Articles                                                                   */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VArticle {
    url: String,
    title: String,
    source: String,
    score: f64,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<String>,
}

#[derive(Serialize)]
struct VArticles {
    articles: Vec<VArticle>,
}

fn build_articles(articles: &[Article]) -> VArticles {
    VArticles {
        articles: articles
            .iter()
            .map(|a| VArticle {
                url: a.url.clone(),
                title: a.title.clone(),
                source: a.source_label().to_string(),
                score: a.sentiment,
                label: a.sentiment_label().label(),
                published_at: a.published_at.map(|t| t.to_rfc3339()),
            })
            .collect(),
    }
}
