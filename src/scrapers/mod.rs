//! News homepage and article scrapers.
//!
//! Scraping follows the same two-phase pattern for any site:
//!
//! 1. **Indexing**: [`links`] discovers candidate article URLs on the homepage
//! 2. **Extraction**: [`metadata`] turns each article page into an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Both phases are site-agnostic. Site specifics (domain, section markers,
//! byline class names) come in through [`links::LinkPolicy`] and
//! [`metadata::MetadataExtractor`].
//!
//! Failures are never propagated from here: an unreachable page is logged
//! and treated as "no data" so one bad URL cannot end a run.

pub mod links;
pub mod metadata;
