use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use news_vibes_analytics::config::AnalysisConfig;
use news_vibes_analytics::fetch::HttpFetcher;
use news_vibes_analytics::orchestrator::{run_pipeline, summarize_text_file};
use news_vibes_analytics::render::render_distribution_text;

/// News Vibes Analytics - sentiment, keywords and summaries for news batches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// NewsAPI-style JSON file (response object or bare article array)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Path to analysis config JSON (overrides NEWS_ANALYTICS_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Article URL to fetch and summarize; may be repeated
    #[arg(long = "summarize", value_name = "URL")]
    summarize: Vec<String>,

    /// Summarize a local plain-text article and print it as markdown
    #[arg(long, value_name = "PATH")]
    text_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting news_vibes_analytics");

    let args = Args::parse();
    let cfg = AnalysisConfig::load(args.config.as_deref())?;
    debug!("Analysis config - {:?}", cfg);

    if let Some(ref path) = args.text_file {
        println!("{}", summarize_text_file(&cfg, path)?);
        if args.input.is_none() {
            return Ok(());
        }
    }

    let Some(input) = args.input else {
        bail!("Nothing to do: pass --input <file> for a batch or --text-file <path> for one article");
    };

    let fetcher = HttpFetcher::new(cfg.fetch_timeout())?;
    let report = run_pipeline(&cfg, &input, &args.output_dir, &args.summarize, &fetcher).await?;

    println!("Articles: {}", report.articles);
    println!("Average sentiment: {:.3}", report.average_sentiment);
    print!("{}", render_distribution_text("Sentiment", &report.sentiment));
    print!("{}", render_distribution_text("Sources", &report.sources));
    print!("{}", render_distribution_text("Top keywords", &report.keywords));
    println!("Wrote {} files to {}", report.files.len(), args.output_dir.display());
    Ok(())
}
