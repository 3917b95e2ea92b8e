//! HTTP page fetching behind a small async trait.
//!
//! The crawler never talks to `reqwest` directly. It goes through
//! [`FetchPage`], which lets the driver and the scrapers run against an
//! in-memory fake in tests and against [`HttpFetcher`] in production.
//!
//! Every failure mode (DNS, connect, timeout, non-2xx status, body decode)
//! surfaces as a single error; callers only ever ask "did I get a page?".

use scraper::Html;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

/// Browser user agent sent by default; bare HTTP clients get blocked by
/// some news CDNs.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

/// `Accept-Language` sent by default.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Trait for fetching a page body.
///
/// Implementors return the raw HTML of `url`, or an error for any network
/// failure or unsuccessful HTTP status.
pub trait FetchPage {
    /// Fetch `url` and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`FetchPage`] implementation backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a browser-like header set and a per-request timeout.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Value for the `User-Agent` header
    /// * `accept_language` - Value for the `Accept-Language` header
    /// * `timeout` - Total time allowed for each request, body included
    ///
    /// # Errors
    ///
    /// Fails when `accept_language` is not a valid header value or the
    /// client cannot be built.
    pub fn new(
        user_agent: &str,
        accept_language: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(accept_language)?);

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Fetch `url` and parse it into a document.
///
/// Fetch and parse failures collapse into `None` after being logged, so a
/// single bad page never aborts a run.
pub async fn fetch_document<F: FetchPage>(fetcher: &F, url: &str) -> Option<Html> {
    match fetcher.fetch(url).await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            error!(%url, error = %e, "Failed to fetch page");
            None
        }
    }
}
