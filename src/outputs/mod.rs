//! Export of crawl results to files.
//!
//! # Submodules
//!
//! - [`json`]: `{"list_post": [...]}` document
//! - [`csv`]: one row per record, fixed column order
//! - [`xlsx`]: spreadsheet with the CSV schema (optional)
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── list_post.json
//! ├── list_post.csv
//! └── list_post.xlsx
//! ```
//!
//! Each export is attempted independently. A failed JSON or CSV write is
//! logged as an error; a failed spreadsheet write only as a warning.

pub mod csv;
pub mod json;
pub mod xlsx;

use crate::models::PostList;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Files produced by [`export_all`].
#[derive(Debug, Default)]
pub struct ExportReport {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub xlsx: Option<PathBuf>,
}

/// Write every export for `posts`.
///
/// Never fails as a whole; the report says which files were written.
#[instrument(level = "info", skip_all, fields(%output_dir, %file_name, with_xlsx = with_xlsx))]
pub async fn export_all(
    posts: &PostList,
    output_dir: &str,
    file_name: &str,
    with_xlsx: bool,
) -> ExportReport {
    let mut report = ExportReport::default();

    match json::write_post_list(posts, output_dir, file_name).await {
        Ok(path) => report.json = Some(path),
        Err(e) => error!(error = %e, "Failed to write JSON export"),
    }

    match csv::write_csv(&posts.list_post, output_dir, file_name).await {
        Ok(path) => report.csv = Some(path),
        Err(e) => error!(error = %e, "Failed to write CSV export"),
    }

    if with_xlsx {
        match xlsx::write_xlsx(&posts.list_post, output_dir, file_name) {
            Ok(path) => report.xlsx = Some(path),
            Err(e) => warn!(error = %e, "Spreadsheet export failed; JSON and CSV are unaffected"),
        }
    } else {
        info!("Spreadsheet export disabled");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;

    fn posts() -> PostList {
        PostList {
            list_post: vec![ArticleRecord {
                title: "T".to_string(),
                link: "https://example.com/read/1".to_string(),
                publication_time: "no time".to_string(),
                author: "unknown".to_string(),
                image_url: "no image".to_string(),
                summary: "no summary".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_export_all_writes_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let report = export_all(&posts(), out, "list_post", false).await;

        assert!(report.json.is_some());
        assert!(report.csv.is_some());
        assert!(report.xlsx.is_none());
        assert!(dir.path().join("list_post.json").is_file());
        assert!(dir.path().join("list_post.csv").is_file());
        assert!(!dir.path().join("list_post.xlsx").exists());
    }

    #[cfg(feature = "xlsx")]
    #[tokio::test]
    async fn test_export_all_with_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_all(&posts(), dir.path().to_str().unwrap(), "list_post", true).await;
        assert!(report.xlsx.is_some());
    }

    #[tokio::test]
    async fn test_export_all_survives_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let report = export_all(&posts(), missing.to_str().unwrap(), "list_post", true).await;
        assert!(report.json.is_none());
        assert!(report.csv.is_none());
        assert!(report.xlsx.is_none());
    }
}
