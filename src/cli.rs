//! Command-line interface definitions for the news metadata crawler.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option is an override: anything left unset falls back to the YAML
//! config file (when given) and then to the built-in defaults in
//! [`CrawlConfig`](crate::config::CrawlConfig).

use clap::Parser;

/// Command-line arguments for the news metadata crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl the default homepage into ./out
/// news_meta_crawler -o ./out
///
/// # Another site, custom section markers, at most 10 articles
/// news_meta_crawler -u https://example.com/ --section-marker /news/ --max-articles 10
///
/// # Settings from a file, spreadsheet export disabled
/// news_meta_crawler -c crawl.yaml --no-xlsx
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Homepage to collect article links from
    #[arg(short = 'u', long, env = "NEWS_BASE_URL")]
    pub base_url: Option<String>,

    /// Output directory for the JSON, CSV and XLSX files
    #[arg(short, long, env = "NEWS_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Base file name (without extension) for the exports
    #[arg(short = 'n', long)]
    pub file_name: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Domain that article links must belong to (defaults to the homepage host without `www.`)
    #[arg(long)]
    pub domain: Option<String>,

    /// Path substring marking an article section; repeat to give several
    #[arg(long = "section-marker")]
    pub section_markers: Vec<String>,

    /// Anchor text longer than this is treated as a headline
    #[arg(long)]
    pub min_headline_chars: Option<usize>,

    /// Maximum number of articles to extract
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Pause between article fetches, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request network timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Accept-Language header sent with every request
    #[arg(long)]
    pub accept_language: Option<String>,

    /// Skip the spreadsheet export
    #[arg(long)]
    pub no_xlsx: bool,
}
