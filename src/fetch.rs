use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Plain title and body text pulled out of a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedArticle {
    pub title: String,
    pub body: String,
}

/// Fetch-and-extract step that runs before summarization. Implementations
/// report their own failures; the summarizer treats any error as an empty body.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_and_extract(&self, url: &str) -> Result<FetchedArticle>;
}

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP fetcher with minimal tag stripping.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Building HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for HttpFetcher {
    async fn fetch_and_extract(&self, url: &str) -> Result<FetchedArticle> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid article URL {}", url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("Unsupported URL scheme '{}' for {}", parsed.scheme(), url);
        }

        let start = std::time::Instant::now();
        let resp = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Article fetch rejected - status={}, url={}", status, url);
        }
        let html = resp
            .error_for_status()
            .with_context(|| format!("HTTP error for {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading body of {}", url))?;

        let article = extract_article(&html);
        info!(
            "Article fetch completed - url={}, duration={:.2}s, html_chars={}, body_chars={}",
            url,
            start.elapsed().as_secs_f32(),
            html.len(),
            article.body.len()
        );
        Ok(article)
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

static NOISE: Lazy<Regex> =
    Lazy::new(|| re(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>|<!--.*?-->"));
static ARTICLE: Lazy<Regex> = Lazy::new(|| re(r"(?is)<article\b[^>]*>(.*?)</article>"));
static MAIN: Lazy<Regex> = Lazy::new(|| re(r"(?is)<main\b[^>]*>(.*?)</main>"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| re(r"(?is)<p\b[^>]*>(.*?)</p>"));
static BODY: Lazy<Regex> = Lazy::new(|| re(r"(?is)<body\b[^>]*>(.*)</body>"));
static TAG: Lazy<Regex> = Lazy::new(|| re(r"(?s)<[^>]+>"));
static SPACES: Lazy<Regex> = Lazy::new(|| re(r"\s+"));
static OG_TITLE: Lazy<Regex> = Lazy::new(|| {
    re(r#"(?is)<meta[^>]*(?:property|name)=["'](?:og|twitter):title["'][^>]*content=["']([^"']*)["']"#)
});
static H1: Lazy<Regex> = Lazy::new(|| re(r"(?is)<h1\b[^>]*>(.*?)</h1>"));
static TITLE: Lazy<Regex> = Lazy::new(|| re(r"(?is)<title\b[^>]*>(.*?)</title>"));
static SITE_SUFFIX: Lazy<Regex> = Lazy::new(|| re(r"\s+(?:-|\||::)\s+[^-|:]*$"));

/// Block-level containers must carry at least this much text to be trusted.
const MIN_CONTAINER_CHARS: usize = 200;
const MIN_PARAGRAPH_CHARS: usize = 30;

const BOILERPLATE: &[&str] = &[
    "subscribe",
    "advertisement",
    "cookie",
    "privacy policy",
    "copyright",
    "all rights reserved",
];

pub fn extract_article(html: &str) -> FetchedArticle {
    FetchedArticle {
        title: extract_title(html),
        body: extract_body(html),
    }
}

/// Body text: `<article>` or `<main>` if substantial, else filtered
/// paragraphs, else the whole `<body>`.
pub fn extract_body(html: &str) -> String {
    let clean = NOISE.replace_all(html, " ");

    for container in [&*ARTICLE, &*MAIN] {
        if let Some(inner) = container.captures(&clean).and_then(|c| c.get(1)) {
            let text = to_text(inner.as_str());
            if text.chars().count() > MIN_CONTAINER_CHARS {
                debug!("Body extracted from container - chars={}", text.len());
                return text;
            }
        }
    }

    let paragraphs: Vec<String> = PARAGRAPH
        .captures_iter(&clean)
        .filter_map(|c| c.get(1))
        .map(|m| to_text(m.as_str()))
        .filter(|p| p.chars().count() > MIN_PARAGRAPH_CHARS && !is_boilerplate(p))
        .collect();
    if !paragraphs.is_empty() {
        debug!("Body extracted from paragraphs - count={}", paragraphs.len());
        return paragraphs.join(" ");
    }

    match BODY.captures(&clean).and_then(|c| c.get(1)) {
        Some(b) => to_text(b.as_str()),
        None => to_text(&clean),
    }
}

/// Title from `og:title`/`twitter:title`, then `<h1>`, then `<title>`, with a
/// trailing " - Site" or " | Site" suffix removed.
pub fn extract_title(html: &str) -> String {
    for pattern in [&*OG_TITLE, &*H1, &*TITLE] {
        if let Some(m) = pattern.captures(html).and_then(|c| c.get(1)) {
            let title = to_text(m.as_str());
            let title = SITE_SUFFIX.replace(&title, "").trim().to_string();
            if !title.is_empty() {
                return title;
            }
        }
    }
    String::new()
}

fn is_boilerplate(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOILERPLATE.iter().any(|b| lower.contains(b))
}

fn to_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    SPACES.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(s: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&#x27;", "'"),
        ("&apos;", "'"),
        ("&rsquo;", "\u{2019}"),
        ("&lsquo;", "\u{2018}"),
        ("&rdquo;", "\u{201d}"),
        ("&ldquo;", "\u{201c}"),
        ("&#8217;", "\u{2019}"),
        ("&#8220;", "\u{201c}"),
        ("&#8221;", "\u{201d}"),
        ("&mdash;", "\u{2014}"),
        ("&ndash;", "\u{2013}"),
        ("&#8212;", "\u{2014}"),
        ("&#8211;", "\u{2013}"),
    ];
    let mut out = s.to_string();
    for (entity, ch) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, ch);
        }
    }
    // last, so "&amp;lt;" stays "&lt;"
    out.replace("&amp;", "&")
}
