use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::Path;
use tracing::{debug, info};

use crate::api_types::load_articles;
use crate::config::AnalysisConfig;
use crate::distribution::{average_sentiment, sentiment_distribution, source_distribution};
use crate::fetch::ArticleFetcher;
use crate::models::{ArticleSummary, DistributionMap, FrequencyMap};
use crate::render::render_summary_markdown;
use crate::viz_export::{write_all_viz, VizInput};

/// What a batch run produced, for the caller to report.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub articles: usize,
    pub average_sentiment: f64,
    pub sentiment: DistributionMap,
    pub sources: DistributionMap,
    pub keywords: FrequencyMap,
    pub summaries: Vec<ArticleSummary>,
    pub files: Vec<String>,
}

pub async fn run_pipeline<F>(
    config: &AnalysisConfig,
    input: &Path,
    output_dir: &Path,
    summarize_urls: &[String],
    fetcher: &F,
) -> Result<PipelineReport>
where
    F: ArticleFetcher + ?Sized,
{
    let pipeline_start = std::time::Instant::now();
    info!("Pipeline started - input={}, output_dir={}", input.display(), output_dir.display());

    // 1) load + normalize
    let mut articles = load_articles(input)?;

    // 2) sentiment, in place
    let score_start = std::time::Instant::now();
    config.scorer().analyze_sentiment(&mut articles);
    info!(
        "Sentiment scoring completed - duration={:.2}s, articles={}",
        score_start.elapsed().as_secs_f32(),
        articles.len()
    );

    // 3) aggregate
    let sentiment = sentiment_distribution(&articles);
    let sources = source_distribution(&articles);
    let average = average_sentiment(&articles);
    debug!(
        "Aggregation completed - sources={}, average_sentiment={:.3}",
        sources.len(),
        average
    );

    // 4) corpus keywords
    let kw_start = std::time::Instant::now();
    let keywords = config
        .keyword_extractor()
        .extract_keywords(&articles, config.corpus_keywords);
    info!(
        "Keyword extraction completed - duration={:.2}s, keywords={}",
        kw_start.elapsed().as_secs_f32(),
        keywords.len()
    );

    // 5) summaries, concurrently
    let summaries = if summarize_urls.is_empty() {
        Vec::new()
    } else {
        let sum_start = std::time::Instant::now();
        let summarizer = config.summarizer();
        let out: Vec<ArticleSummary> = join_all(
            summarize_urls
                .iter()
                .map(|url| summarizer.summarize_from_url(fetcher, url)),
        )
        .await;
        info!(
            "Summaries completed - duration={:.2}s, requested={}, empty={}",
            sum_start.elapsed().as_secs_f32(),
            out.len(),
            out.iter().filter(|s| s.word_count == 0).count()
        );
        out
    };

    // 6) persist
    let files = write_all_viz(
        output_dir,
        &VizInput {
            articles: &articles,
            sentiment: &sentiment,
            sources: &sources,
            keywords: &keywords,
            summaries: &summaries,
        },
    )?;
    info!("Output persisted - directory={}, files={}", output_dir.display(), files.len());

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, articles={}",
        pipeline_start.elapsed().as_secs_f32(),
        articles.len()
    );

    Ok(PipelineReport {
        articles: articles.len(),
        average_sentiment: average,
        sentiment,
        sources,
        keywords,
        summaries,
        files,
    })
}

/// Summarizes a local plain-text article and renders it as markdown. With
/// two or more non-blank lines the first is the title and the rest is the
/// body; a single line is all body under the default title.
pub fn summarize_text_file(config: &AnalysisConfig, path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading article text {}", path.display()))?;
    let text = raw.trim();
    let (title, body) = match text.split_once('\n') {
        Some((title, body)) if !body.trim().is_empty() => (title, body),
        _ => ("", text),
    };
    let summary = config.summarizer().summarize_from_text(title, body);
    info!(
        "Text summary completed - path={}, words={}, key_points={}",
        path.display(),
        summary.word_count,
        summary.key_points.len()
    );
    Ok(render_summary_markdown(&summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchedArticle;
    use crate::summarize::DEFAULT_TITLE;
    use anyhow::bail;
    use async_trait::async_trait;

    struct OfflineFetcher;

    #[async_trait]
    impl ArticleFetcher for OfflineFetcher {
        async fn fetch_and_extract(&self, url: &str) -> Result<FetchedArticle> {
            if url.ends_with("/down") {
                bail!("host unreachable");
            }
            Ok(FetchedArticle {
                title: "Budget vote".into(),
                body: "Lawmakers passed the budget after a long debate. \
                       The budget raises school funding. Critics called the budget rushed."
                    .into(),
            })
        }
    }

    const INPUT: &str = r#"{"status":"ok","totalResults":2,"articles":[
        {"source":{"id":"s1","name":"Source One"},"title":"Great news for tech",
         "description":"Positive description","url":"http://example.com/1","content":"Excellent results"},
        {"source":{"id":"s2","name":"Source Two"},"title":"Bad news for economy",
         "description":"Negative description","url":"http://example.com/2","content":"Poor performance"}
    ]}"#;

    #[tokio::test]
    async fn batch_run_scores_aggregates_and_exports() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("in.json");
        std::fs::write(&input, INPUT).expect("write input");
        let out = dir.path().join("out");

        let urls = vec!["https://example.com/budget".to_string(), "https://example.com/down".to_string()];
        let report = run_pipeline(&AnalysisConfig::default(), &input, &out, &urls, &OfflineFetcher)
            .await
            .expect("pipeline runs");

        assert_eq!(report.articles, 2);
        assert_eq!(report.sentiment["Positive"], 1);
        assert_eq!(report.sentiment["Negative"], 1);
        assert_eq!(report.sentiment["Neutral"], 0);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.summaries.len(), 2);
        assert!(report.summaries[0].keywords.contains_key("budget"));
        assert_eq!(report.summaries[1].word_count, 0);
        assert!(out.join("summaries.json").exists());
        assert!(out.join("viz.index.json").exists());
    }

    #[tokio::test]
    async fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let res = run_pipeline(
            &AnalysisConfig::default(),
            &dir.path().join("nope.json"),
            dir.path(),
            &[],
            &OfflineFetcher,
        )
        .await;
        assert!(res.is_err());
    }

    #[test]
    fn text_file_first_line_is_title() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "\nHarbor reopens\nThe harbor reopened after repairs. Ships returned to the harbor.")
            .expect("write");
        let md = summarize_text_file(&AnalysisConfig::default(), &path).expect("summary");
        assert!(md.starts_with("# Harbor reopens\n"));
        assert!(md.contains("harbor ("));
    }

    #[test]
    fn single_line_file_is_all_body() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("one.txt");
        std::fs::write(&path, "  The harbor reopened after repairs and ships returned.\n\n").expect("write");
        let md = summarize_text_file(&AnalysisConfig::default(), &path).expect("summary");
        assert!(md.starts_with(&format!("# {}\n", DEFAULT_TITLE)), "{md}");
        assert!(!md.contains("Word count: 0"));
        assert!(md.contains("harbor ("));
    }
}
