//! Utility functions for text cleanup, URL checks, and file system operations.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for text pulled out of HTML
//! - Domain membership checks for discovered links
//! - String truncation for logging
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trim a string and collapse internal whitespace runs to a single space.
///
/// HTML text nodes carry indentation and line breaks from the markup; this
/// turns them into what a reader would see.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Hello \n\t world "), "Hello world");
/// ```
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Like [`clean_text`], but returns `None` when nothing is left.
pub fn non_empty(s: &str) -> Option<String> {
    let cleaned = clean_text(s);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Visible text of an element, as a reader sees it.
///
/// Text nodes are concatenated as-is, so inline markup (`Kom<b>pas</b>`)
/// does not split words, then whitespace is cleaned with [`clean_text`].
pub fn element_text(el: &ElementRef) -> String {
    clean_text(&el.text().collect::<String>())
}

/// Check whether `host` is `domain` or one of its subdomains.
///
/// Comparison is ASCII case-insensitive. `www.kompas.com` and
/// `tekno.kompas.com` both belong to `kompas.com`; `notkompas.com` does not.
pub fn host_in_domain(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return false;
    }
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to the
/// nearest UTF-8 character boundary) with an ellipsis and byte count
/// indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello \n\t world "), "Hello world");
        assert_eq!(clean_text("single"), "single");
        assert_eq!(clean_text("\n\n"), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  x  "), Some("x".to_string()));
        assert_eq!(non_empty(" \t\n "), None);
        assert_eq!(non_empty(""), None);
    }

    #[test]
    fn test_element_text_keeps_inline_markup_joined() {
        let html = scraper::Html::parse_fragment(
            "<p><strong>JAKARTA</strong>, KOMPAS.com - Kom<b>pas</b>\n   hari ini </p>",
        );
        let p = html
            .select(&scraper::Selector::parse("p").unwrap())
            .next()
            .unwrap();
        assert_eq!(element_text(&p), "JAKARTA, KOMPAS.com - Kompas hari ini");
    }

    #[test]
    fn test_host_in_domain() {
        assert!(host_in_domain("kompas.com", "kompas.com"));
        assert!(host_in_domain("www.kompas.com", "kompas.com"));
        assert!(host_in_domain("Tekno.Kompas.com", "kompas.com"));
        assert!(!host_in_domain("notkompas.com", "kompas.com"));
        assert!(!host_in_domain("kompas.com.evil.net", "kompas.com"));
        assert!(!host_in_domain("kompas.com", ""));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // "é" is two bytes; cutting at 1 must back off to 0
        let result = truncate_for_log("éé", 1);
        assert_eq!(result, "…(+4 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b");
        let nested = nested.to_str().unwrap();
        ensure_writable_dir(nested).await.unwrap();
        assert!(std::path::Path::new(nested).is_dir());
    }
}
