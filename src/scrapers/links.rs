//! Homepage link collector.
//!
//! Finds URLs on a news homepage that probably point at articles. Two passes
//! feed one candidate list:
//!
//! 1. **Structural**: the first `<a href>` inside every `<article>` element.
//! 2. **Heuristic**: every `<a href>` on the target domain whose path holds a
//!    known section marker (`/read/`, `/tekno/`, ...) or whose anchor text is
//!    long enough to read like a headline rather than a menu entry.
//!
//! Fragments are stripped and duplicates dropped; the first occurrence keeps
//! its position so runs are reproducible. Query strings are left alone.

use crate::fetch::{FetchPage, fetch_document};
use crate::utils::{element_text, host_in_domain};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Section path markers used by the default homepage.
pub const DEFAULT_SECTION_MARKERS: [&str; 7] = [
    "/read/",
    "/travel/",
    "/sains/",
    "/internasional/",
    "/tekno/",
    "/health/",
    "/edu/",
];

/// Anchor text longer than this many characters is treated as a headline.
pub const DEFAULT_MIN_HEADLINE_CHARS: usize = 30;

/// Acceptance rules for the heuristic pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Links must live on this domain or one of its subdomains.
    pub target_domain: String,
    /// A path containing any of these substrings is accepted outright.
    pub section_markers: Vec<String>,
    /// Anchor text must be strictly longer than this to qualify on its own.
    pub min_headline_chars: usize,
}

impl LinkPolicy {
    /// Policy with the default markers and headline threshold for `target_domain`.
    pub fn for_domain(target_domain: impl Into<String>) -> Self {
        Self {
            target_domain: target_domain.into(),
            section_markers: DEFAULT_SECTION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            min_headline_chars: DEFAULT_MIN_HEADLINE_CHARS,
        }
    }

    fn accepts(&self, url: &Url, anchor: &ElementRef) -> bool {
        let on_domain = url
            .host_str()
            .is_some_and(|host| host_in_domain(host, &self.target_domain));
        if !on_domain {
            return false;
        }

        let path = url.path();
        if self.section_markers.iter().any(|m| path.contains(m.as_str())) {
            return true;
        }

        element_text(anchor).chars().count() > self.min_headline_chars
    }
}

/// Resolve an anchor's `href` against `root`. Empty or malformed hrefs yield `None`.
fn resolve_href(root: &Url, anchor: &ElementRef) -> Option<Url> {
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    root.join(href).ok()
}

/// Collect candidate article links from an already-parsed homepage.
///
/// Returns absolute, fragment-free URLs in first-seen order with no
/// duplicates. Structural (`<article>`) hits come first, followed by the
/// heuristic hits.
pub fn collect_links(document: &Html, root_url: &Url, policy: &LinkPolicy) -> Vec<String> {
    let mut found: Vec<Url> = Vec::new();

    for container in document.select(&ARTICLE) {
        if let Some(url) = container
            .select(&ANCHOR)
            .next()
            .and_then(|a| resolve_href(root_url, &a))
        {
            found.push(url);
        }
    }
    let structural = found.len();

    for anchor in document.select(&ANCHOR) {
        let Some(url) = resolve_href(root_url, &anchor) else {
            continue;
        };
        if policy.accepts(&url, &anchor) {
            found.push(url);
        }
    }
    debug!(
        structural,
        heuristic = found.len() - structural,
        "Raw link hits"
    );

    found
        .into_iter()
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .unique()
        .collect()
}

/// Fetch the homepage and collect candidate article links from it.
///
/// Never fails: an unreachable homepage is logged and produces an empty
/// list, which callers treat as "nothing to process".
#[instrument(level = "info", skip_all, fields(%homepage_url))]
pub async fn collect_candidate_links<F: FetchPage>(
    fetcher: &F,
    homepage_url: &str,
    policy: &LinkPolicy,
) -> Vec<String> {
    let root_url = match Url::parse(homepage_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Homepage URL does not parse");
            return Vec::new();
        }
    };

    let Some(document) = fetch_document(fetcher, homepage_url).await else {
        return Vec::new();
    };

    let links = collect_links(&document, &root_url, policy);
    info!(
        count = links.len(),
        domain = %policy.target_domain,
        "Found candidate article links on homepage"
    );
    debug!(urls = ?links, "Candidate URLs");
    links
}
