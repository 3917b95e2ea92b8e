//! # News Meta Crawler
//!
//! Crawls a news site's homepage, picks out links that look like articles,
//! and extracts per-article metadata (title, author, publication time,
//! summary, lead image, link) into JSON, CSV and XLSX files.
//!
//! ## Usage
//!
//! ```sh
//! news_meta_crawler -u https://www.kompas.com/ -o ./out
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Collect candidate article URLs from the homepage
//! 2. **Extraction**: Fetch each candidate in turn (bounded, throttled) and
//!    resolve every metadata field through its fallback chain
//! 3. **Output**: Write `{"list_post": [...]}` JSON, CSV and an optional spreadsheet

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod crawl;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use fetch::HttpFetcher;
use models::PostList;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_meta_crawler starting up");

    // Parse CLI and layer it over the config file
    let args = Cli::parse();
    let config = CrawlConfig::resolve(&args).await?;
    debug!(?config, "Resolved configuration");

    let plan = config.plan()?;
    info!(
        homepage = %plan.homepage_url,
        domain = %plan.link_policy.target_domain,
        max_articles = plan.max_articles,
        delay_ms = config.delay_ms,
        "Crawl plan ready"
    );

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Collect and extract ----
    let fetcher = HttpFetcher::new(
        &config.user_agent,
        &config.accept_language,
        config.timeout(),
    )?;
    let outcome = crawl::crawl(&fetcher, &plan).await;

    if outcome.records.is_empty() {
        info!(
            candidates = outcome.candidates,
            "No data was scraped; nothing to export"
        );
        return Ok(());
    }

    // ---- Export ----
    let posts = PostList {
        list_post: outcome.records,
    };
    let report =
        outputs::export_all(&posts, &config.output_dir, &config.file_name, config.xlsx).await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        candidates = outcome.candidates,
        articles = posts.list_post.len(),
        json = report.json.is_some(),
        csv = report.csv.is_some(),
        xlsx = report.xlsx.is_some(),
        "Execution complete"
    );

    Ok(())
}
