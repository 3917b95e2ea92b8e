//! Article page metadata extraction.
//!
//! Article pages are loosely structured: any given field may live in an
//! OpenGraph tag, a plain `<meta>`, or only in the visible markup. Each field
//! is therefore resolved through an ordered fallback chain where the first
//! non-empty value wins, ending in a fixed sentinel so every field of the
//! resulting [`ArticleRecord`] is populated.
//!
//! | Field | Chain |
//! |-------|-------|
//! | title | `og:title` → `<title>` → `"no title"` |
//! | summary | `description` → `og:description` → first `<p>` → `"no summary"` |
//! | author | `author` → `article:author` → author-class element → `"unknown"` |
//! | publication_time | `article:published_time` → `<time datetime>` → `<time>` text → `"no time"` |
//! | image_url | `og:image` → first `<img src>` → `"no image"` |

use crate::fetch::{FetchPage, fetch_document};
use crate::models::{ArticleRecord, NO_IMAGE, NO_SUMMARY, NO_TIME, NO_TITLE, UNKNOWN_AUTHOR};
use crate::utils::{element_text, non_empty, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

macro_rules! selector {
    ($s:expr) => {
        Lazy::new(|| Selector::parse($s).unwrap())
    };
}

static OG_TITLE: Lazy<Selector> = selector!(r#"meta[property="og:title"]"#);
static OG_DESCRIPTION: Lazy<Selector> = selector!(r#"meta[property="og:description"]"#);
static OG_IMAGE: Lazy<Selector> = selector!(r#"meta[property="og:image"]"#);
static META_DESCRIPTION: Lazy<Selector> = selector!(r#"meta[name="description"]"#);
static META_AUTHOR: Lazy<Selector> = selector!(r#"meta[name="author"]"#);
static ARTICLE_AUTHOR: Lazy<Selector> = selector!(r#"meta[property="article:author"]"#);
static PUBLISHED_TIME: Lazy<Selector> = selector!(r#"meta[property="article:published_time"]"#);
static TITLE: Lazy<Selector> = selector!("title");
static PARAGRAPH: Lazy<Selector> = selector!("p");
static TIME: Lazy<Selector> = selector!("time");
static IMG: Lazy<Selector> = selector!("img");
static ANY: Lazy<Selector> = selector!("*");

/// Class names that mark a byline element on the default site.
pub const DEFAULT_AUTHOR_CLASSES: [&str; 2] = ["read__author", "author"];

/// Builds an [`ArticleRecord`] from a parsed article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataExtractor {
    /// Class names probed, in order, when no author meta tag is present.
    pub author_classes: Vec<String>,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self {
            author_classes: DEFAULT_AUTHOR_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl MetadataExtractor {
    pub fn new(author_classes: Vec<String>) -> Self {
        Self { author_classes }
    }

    /// Extract a record from `document`, which was served at `page_url`.
    ///
    /// Always returns a record; missing fields carry their sentinel. `link`
    /// is `page_url` exactly as given.
    pub fn extract(&self, document: &Html, page_url: &str) -> ArticleRecord {
        let base = Url::parse(page_url).ok();

        let title = meta_content(document, &OG_TITLE)
            .or_else(|| first_text(document, &TITLE))
            .unwrap_or_else(|| NO_TITLE.to_string());

        let summary = meta_content(document, &META_DESCRIPTION)
            .or_else(|| meta_content(document, &OG_DESCRIPTION))
            .or_else(|| first_text(document, &PARAGRAPH))
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        let author = meta_content(document, &META_AUTHOR)
            .or_else(|| meta_content(document, &ARTICLE_AUTHOR))
            .or_else(|| self.author_by_class(document))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let publication_time = meta_content(document, &PUBLISHED_TIME)
            .or_else(|| time_element(document))
            .unwrap_or_else(|| NO_TIME.to_string());

        let image_url = meta_content(document, &OG_IMAGE)
            .or_else(|| first_attr(document, &IMG, "src"))
            .map(|raw| resolve(base.as_ref(), raw))
            .unwrap_or_else(|| NO_IMAGE.to_string());

        ArticleRecord {
            title,
            link: page_url.to_string(),
            publication_time,
            author,
            image_url,
            summary,
        }
    }

    fn author_by_class(&self, document: &Html) -> Option<String> {
        self.author_classes.iter().find_map(|class| {
            document
                .select(&ANY)
                .find(|el| el.value().classes().any(|c| c == class.as_str()))
                .and_then(|el| non_empty(&element_text(&el)))
        })
    }
}

/// Content of the first matching `<meta>` that carries a non-blank `content`.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .find_map(|el| el.value().attr("content").and_then(non_empty))
}

/// Visible text of the first element matching `selector`.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| non_empty(&element_text(&el)))
}

fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .and_then(non_empty)
}

/// The first `<time>`: its `datetime` attribute, or its text when the
/// attribute is missing or blank.
fn time_element(document: &Html) -> Option<String> {
    let el = document.select(&TIME).next()?;
    el.value()
        .attr("datetime")
        .and_then(non_empty)
        .or_else(|| non_empty(&element_text(&el)))
}

/// Resolve `raw` against the page URL; unresolvable values are kept as-is.
fn resolve(base: Option<&Url>, raw: String) -> String {
    match base.map(|b| b.join(&raw)) {
        Some(Ok(url)) => url.to_string(),
        _ => raw,
    }
}

/// Fetch an article page and extract its metadata.
///
/// Returns `None` only when the page could not be fetched; a page with no
/// recognizable metadata still yields a record of sentinels.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_article<F: FetchPage>(
    fetcher: &F,
    extractor: &MetadataExtractor,
    url: &str,
) -> Option<ArticleRecord> {
    let document = fetch_document(fetcher, url).await?;
    let record = extractor.extract(&document, url);

    if record.title == NO_TITLE {
        warn!("Article page has no title");
    }
    debug!(
        title = %truncate_for_log(&record.title, 80),
        author = %record.author,
        published = %record.publication_time,
        "Extracted article metadata"
    );
    Some(record)
}
