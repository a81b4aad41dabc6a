//! Keyword Scraper — gathers keyword signals from competitor pages.
//!
//! Page lookups are pluggable behind `SiteKeywordSource` (carried in `AppState`
//! as `Arc<dyn SiteKeywordSource>`). `scrape_keywords` fans lookups out with a
//! bounded concurrency and a per-URL timeout; a failing URL contributes nothing
//! and never aborts the batch.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::generation::prompts::{SITE_KEYWORDS_PROMPT_TEMPLATE, SITE_KEYWORDS_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::campaign::dedup_keywords;

/// Page text beyond this many characters is not sent to the model.
const MAX_PAGE_CHARS: usize = 12_000;
/// Keyword extraction should be as repeatable as the model allows.
const KEYWORD_TEMPERATURE: f32 = 0.0;
const USER_AGENT: &str = concat!("adcopy/", env!("CARGO_PKG_VERSION"));

static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|svg|template)\b[^>]*>.*?</(script|style|noscript|svg|template)\s*>")
        .expect("Invalid hidden block regex")
});
static HTML_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));
static HTML_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static META_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s[^>]*name\s*=\s*["'](?:description|keywords)["'][^>]*content\s*=\s*["']([^"']*)["']"#)
        .expect("Invalid meta regex")
});

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("{0} has no readable text")]
    EmptyPage(String),

    #[error("keyword extraction failed: {0}")]
    Llm(#[from] LlmError),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces keyword signals for a single URL.
#[async_trait]
pub trait SiteKeywordSource: Send + Sync {
    async fn keywords_for(&self, url: &str) -> Result<Vec<String>, ScrapeError>;
}

/// Fetches the page over HTTP, reduces it to visible text and asks the LLM
/// for its main keywords.
pub struct LlmSiteKeywordSource {
    http: Client,
    llm: LlmClient,
}

impl LlmSiteKeywordSource {
    pub fn new(llm: LlmClient, timeout: Duration) -> Result<Self, ScrapeError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, llm })
    }
}

#[async_trait]
impl SiteKeywordSource for LlmSiteKeywordSource {
    async fn keywords_for(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let page_text: String = html_to_text(&html).chars().take(MAX_PAGE_CHARS).collect();
        if page_text.is_empty() {
            return Err(ScrapeError::EmptyPage(url.to_string()));
        }

        let prompt = SITE_KEYWORDS_PROMPT_TEMPLATE
            .replace("{url}", url)
            .replace("{page_text}", &page_text);
        let answer = self
            .llm
            .complete(&prompt, SITE_KEYWORDS_SYSTEM, KEYWORD_TEMPERATURE)
            .await?;

        Ok(split_keywords(&answer))
    }
}

/// Concurrency and timeout applied to one scraping batch.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeLimits {
    pub concurrency: usize,
    pub timeout: Duration,
}

impl From<&Config> for ScrapeLimits {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.scrape_concurrency,
            timeout: config.scrape_timeout,
        }
    }
}

/// Collects keywords for every URL. Never fails: lookups that error or time
/// out are logged and skipped. The result is deduplicated in first-seen order,
/// walking URLs in the order given.
pub async fn scrape_keywords(
    source: &dyn SiteKeywordSource,
    urls: &[String],
    limits: ScrapeLimits,
) -> Vec<String> {
    if urls.is_empty() {
        return Vec::new();
    }

    // Items must be owned: borrowed ones make callers' futures fail axum's handler bound.
    let per_url: Vec<Vec<String>> = stream::iter(urls.iter().cloned())
        .map(|url: String| async move {
            let lookup = tokio::time::timeout(limits.timeout, source.keywords_for(&url))
                .await
                .unwrap_or(Err(ScrapeError::Timeout(limits.timeout)));
            match lookup {
                Ok(keywords) => {
                    debug!("Scraped {} keywords from {url}", keywords.len());
                    keywords
                }
                Err(e) => {
                    warn!("Skipping {url}: {e}");
                    Vec::new()
                }
            }
        })
        .buffered(limits.concurrency.max(1))
        .collect()
        .await;

    dedup_keywords(per_url.into_iter().flatten())
}

/// Reduces an HTML document to its visible text, prefixed by the meta
/// description/keywords when present.
pub fn html_to_text(html: &str) -> String {
    let meta: Vec<&str> = META_CONTENT
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let body = HIDDEN_BLOCKS.replace_all(html, " ");
    let body = HTML_COMMENTS.replace_all(&body, " ");
    let body = HTML_TAGS.replace_all(&body, " ");

    let combined = format!("{} {}", meta.join(" "), body);
    decode_entities(&combined)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Splits the model's comma-separated answer into keyword tokens.
pub fn split_keywords(answer: &str) -> Vec<String> {
    answer
        .split([',', '\n'])
        .map(|k| k.trim().trim_end_matches('.').trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
