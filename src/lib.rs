//! Text analytics for news batches: lexicon sentiment, keyword frequency,
//! sentiment and source distributions, and extractive article summaries with
//! keyword highlighting.

pub mod api_types;
pub mod config;
pub mod distribution;
pub mod fetch;
pub mod highlight;
pub mod keywords;
pub mod lexicon;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod sentiment;
pub mod stopwords;
pub mod summarize;
pub mod tokenize;
pub mod viz_export;

pub use config::AnalysisConfig;
pub use distribution::{sentiment_distribution, source_distribution};
pub use fetch::{ArticleFetcher, FetchedArticle, HttpFetcher};
pub use keywords::KeywordExtractor;
pub use models::{Article, ArticleSummary, DistributionMap, FrequencyMap, Source};
pub use sentiment::{Sentiment, SentimentScorer};
pub use summarize::ArticleSummarizer;
pub use tokenize::{tokenize, Tokenizer};
