//! Data models for scraped article metadata.
//!
//! This module defines the structures that flow from the extractor to the
//! export layer:
//! - [`ArticleRecord`]: Metadata for a single article page
//! - [`PostList`]: The named container persisted as JSON
//!
//! Every field of an [`ArticleRecord`] is always populated. When no source in
//! a field's fallback chain yields a value, the matching sentinel constant
//! below is stored instead.

use serde::{Deserialize, Serialize};

/// Title placeholder when neither `og:title` nor `<title>` yields text.
pub const NO_TITLE: &str = "no title";
/// Summary placeholder when no description or paragraph is found.
pub const NO_SUMMARY: &str = "no summary";
/// Author placeholder when no byline source is found.
pub const UNKNOWN_AUTHOR: &str = "unknown";
/// Publication time placeholder when no timestamp is found.
pub const NO_TIME: &str = "no time";
/// Image placeholder when neither `og:image` nor an `<img>` is found.
pub const NO_IMAGE: &str = "no image";

/// Metadata extracted from a single article page.
///
/// Constructed once per fetched article and never mutated afterwards. The
/// field order here is the column order of the CSV and XLSX exports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline of the article.
    pub title: String,
    /// The URL the article was fetched from, verbatim.
    pub link: String,
    /// ISO-8601 timestamp when the page provides one, otherwise the raw text.
    pub publication_time: String,
    /// Byline or author name.
    pub author: String,
    /// Absolute URL of the lead image.
    pub image_url: String,
    /// Short description or first paragraph.
    pub summary: String,
}

impl ArticleRecord {
    /// Column headers for tabular exports, in field order.
    pub const COLUMNS: [&'static str; 6] = [
        "title",
        "link",
        "publication_time",
        "author",
        "image_url",
        "summary",
    ];

    /// The record's values in [`ArticleRecord::COLUMNS`] order.
    pub fn as_row(&self) -> [&str; 6] {
        [
            &self.title,
            &self.link,
            &self.publication_time,
            &self.author,
            &self.image_url,
            &self.summary,
        ]
    }
}

/// The result set of one crawl, serialized as `{"list_post": [...]}`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostList {
    /// Records in processing order.
    pub list_post: Vec<ArticleRecord>,
}
