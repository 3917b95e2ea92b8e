//! Crawl configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line overrides. A minimal file looks like:
//!
//! ```yaml
//! base_url: https://www.kompas.com/
//! max_articles: 20
//! section_markers: ["/read/", "/tekno/"]
//! ```
//!
//! Keys that are left out keep their defaults.

use crate::cli::Cli;
use crate::crawl::CrawlPlan;
use crate::fetch::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT};
use crate::scrapers::links::{DEFAULT_MIN_HEADLINE_CHARS, DEFAULT_SECTION_MARKERS, LinkPolicy};
use crate::scrapers::metadata::{DEFAULT_AUTHOR_CLASSES, MetadataExtractor};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Every tunable of a crawl run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Homepage the crawl starts from.
    pub base_url: String,
    /// Domain links must belong to; derived from `base_url` when absent.
    pub target_domain: Option<String>,
    pub section_markers: Vec<String>,
    pub min_headline_chars: usize,
    /// Byline class names, probed in order.
    pub author_classes: Vec<String>,
    pub max_articles: usize,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// `Accept-Language` header; set it to the site's language when a
    /// homepage serves different content per locale.
    pub accept_language: String,
    pub output_dir: String,
    /// Export base name; `.json`, `.csv` and `.xlsx` are appended.
    pub file_name: String,
    /// Whether to attempt the spreadsheet export.
    pub xlsx: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.kompas.com/".to_string(),
            target_domain: None,
            section_markers: DEFAULT_SECTION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            min_headline_chars: DEFAULT_MIN_HEADLINE_CHARS,
            author_classes: DEFAULT_AUTHOR_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_articles: 50,
            delay_ms: 400,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            output_dir: ".".to_string(),
            file_name: "list_post".to_string(),
            xlsx: true,
        }
    }
}

impl CrawlConfig {
    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file from disk.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Resolve the effective config: file (if any) under CLI overrides.
    pub async fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    /// Overwrite fields with whatever the command line set explicitly.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(v) = &cli.base_url {
            self.base_url = v.clone();
        }
        if let Some(v) = &cli.output_dir {
            self.output_dir = v.clone();
        }
        if let Some(v) = &cli.file_name {
            self.file_name = v.clone();
        }
        if let Some(v) = &cli.domain {
            self.target_domain = Some(v.clone());
        }
        if !cli.section_markers.is_empty() {
            self.section_markers = cli.section_markers.clone();
        }
        if let Some(v) = cli.min_headline_chars {
            self.min_headline_chars = v;
        }
        if let Some(v) = cli.max_articles {
            self.max_articles = v;
        }
        if let Some(v) = cli.delay_ms {
            self.delay_ms = v;
        }
        if let Some(v) = cli.timeout_secs {
            self.timeout_secs = v;
        }
        if let Some(v) = &cli.user_agent {
            self.user_agent = v.clone();
        }
        if let Some(v) = &cli.accept_language {
            self.accept_language = v.clone();
        }
        if cli.no_xlsx {
            self.xlsx = false;
        }
    }

    /// The domain links must belong to.
    ///
    /// Uses `target_domain` when set; otherwise the homepage host with a
    /// leading `www.` removed. A blank `target_domain` is an error, since no
    /// host can belong to it.
    pub fn domain(&self) -> Result<String, Box<dyn Error>> {
        if let Some(domain) = &self.target_domain {
            let domain = domain.trim().trim_matches('.').to_ascii_lowercase();
            if domain.is_empty() {
                return Err("target domain is blank".into());
            }
            return Ok(domain);
        }
        let url = Url::parse(&self.base_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| format!("base URL {} has no host", self.base_url))?
            .to_ascii_lowercase();
        Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the config and turn it into a runnable [`CrawlPlan`].
    pub fn plan(&self) -> Result<CrawlPlan, Box<dyn Error>> {
        Url::parse(&self.base_url).map_err(|e| format!("invalid base URL {}: {}", self.base_url, e))?;
        Ok(CrawlPlan {
            homepage_url: self.base_url.clone(),
            link_policy: LinkPolicy {
                section_markers: self.section_markers.clone(),
                min_headline_chars: self.min_headline_chars,
                ..LinkPolicy::for_domain(self.domain()?)
            },
            extractor: MetadataExtractor::new(self.author_classes.clone()),
            max_articles: self.max_articles,
            delay: Duration::from_millis(self.delay_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_articles, 50);
        assert_eq!(config.delay_ms, 400);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.min_headline_chars, 30);
        assert_eq!(config.accept_language, "en-US,en;q=0.9");
        assert!(config.section_markers.contains(&"/read/".to_string()));
        assert_eq!(config.domain().unwrap(), "kompas.com");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CrawlConfig::from_yaml(
            "base_url: https://news.example.com/\nmax_articles: 5\nsection_markers: [\"/story/\"]\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "https://news.example.com/");
        assert_eq!(config.max_articles, 5);
        assert_eq!(config.section_markers, vec!["/story/"]);
        assert_eq!(config.delay_ms, 400);
        assert_eq!(config.domain().unwrap(), "news.example.com");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(CrawlConfig::from_yaml("max_articles: lots").is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = CrawlConfig::from_yaml("max_articles: 5\nxlsx: true\n").unwrap();
        let cli = Cli::parse_from([
            "news_meta_crawler",
            "--max-articles",
            "2",
            "--domain",
            "Example.com",
            "--no-xlsx",
        ]);
        config.apply_overrides(&cli);
        assert_eq!(config.max_articles, 2);
        assert!(!config.xlsx);
        assert_eq!(config.domain().unwrap(), "example.com");
    }

    #[test]
    fn test_plan_carries_policy() {
        let config = CrawlConfig {
            base_url: "https://www.example.com/".to_string(),
            min_headline_chars: 12,
            delay_ms: 0,
            ..CrawlConfig::default()
        };
        let plan = config.plan().unwrap();
        assert_eq!(plan.link_policy.target_domain, "example.com");
        assert_eq!(plan.link_policy.min_headline_chars, 12);
        assert_eq!(plan.delay, Duration::ZERO);
        assert_eq!(plan.extractor, MetadataExtractor::default());
    }

    #[test]
    fn test_blank_target_domain_is_rejected() {
        let config = CrawlConfig::from_yaml("target_domain: \"  \"\n").unwrap();
        assert!(config.domain().is_err());
        assert!(config.plan().is_err());

        let mut config = CrawlConfig::default();
        config.apply_overrides(&Cli::parse_from(["news_meta_crawler", "--domain", ""]));
        assert!(config.plan().is_err());
    }

    #[test]
    fn test_accept_language_override() {
        let mut config = CrawlConfig::from_yaml("accept_language: id-ID,id;q=0.9\n").unwrap();
        assert_eq!(config.accept_language, "id-ID,id;q=0.9");
        config.apply_overrides(&Cli::parse_from([
            "news_meta_crawler",
            "--accept-language",
            "en-GB",
        ]));
        assert_eq!(config.accept_language, "en-GB");
    }

    #[test]
    fn test_plan_rejects_bad_base_url() {
        let config = CrawlConfig {
            base_url: "not a url".to_string(),
            ..CrawlConfig::default()
        };
        assert!(config.plan().is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.yaml");
        std::fs::write(&path, "file_name: posts\n").unwrap();
        let config = CrawlConfig::load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.file_name, "posts");
    }
}
