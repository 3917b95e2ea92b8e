//! Sequential crawl driver.
//!
//! Ties the collector and extractor together:
//! homepage → candidate links → (domain filter) → one article at a time,
//! with a fixed pause between fetches, until `max_articles` records exist or
//! the candidates run out.
//!
//! The article stream is lazy: once the bound is reached no further page is
//! requested.

use crate::fetch::FetchPage;
use crate::models::ArticleRecord;
use crate::scrapers::links::{LinkPolicy, collect_candidate_links};
use crate::scrapers::metadata::{MetadataExtractor, extract_article};
use crate::utils::host_in_domain;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};
use url::Url;

/// Knobs for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlPlan {
    pub homepage_url: String,
    pub link_policy: LinkPolicy,
    pub extractor: MetadataExtractor,
    /// Stop after this many records have been extracted.
    pub max_articles: usize,
    /// Pause between consecutive article fetches.
    pub delay: Duration,
}

/// What a crawl produced.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Number of candidate links found on the homepage.
    pub candidates: usize,
    /// Extracted records in processing order.
    pub records: Vec<ArticleRecord>,
}

fn on_domain(url: &str, domain: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| host_in_domain(h, domain)))
        .unwrap_or(false)
}

/// Run a full crawl: collect links, then extract articles one by one.
///
/// An empty outcome means the homepage was unreachable or yielded nothing.
#[instrument(level = "info", skip_all, fields(homepage = %plan.homepage_url, max = plan.max_articles))]
pub async fn crawl<F: FetchPage>(fetcher: &F, plan: &CrawlPlan) -> CrawlOutcome {
    let links = collect_candidate_links(fetcher, &plan.homepage_url, &plan.link_policy).await;
    let candidates = links.len();
    if links.is_empty() || plan.max_articles == 0 {
        return CrawlOutcome {
            candidates,
            records: Vec::new(),
        };
    }

    let domain = plan.link_policy.target_domain.as_str();
    let targets = links.into_iter().filter(|url| {
        let keep = on_domain(url, domain);
        if !keep {
            debug!(%url, "Skipping off-domain candidate");
        }
        keep
    });

    let records: Vec<ArticleRecord> = stream::iter(targets.enumerate())
        .then(|(i, url)| async move {
            if i > 0 && !plan.delay.is_zero() {
                sleep(plan.delay).await;
            }
            info!(index = i, %url, "Processing article");
            extract_article(fetcher, &plan.extractor, &url).await
        })
        .filter_map(std::future::ready)
        .take(plan.max_articles)
        .collect()
        .await;

    info!(
        candidates,
        collected = records.len(),
        "Crawl finished"
    );
    CrawlOutcome {
        candidates,
        records,
    }
}
