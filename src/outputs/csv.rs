//! CSV export: one header row, then one row per record in
//! [`ArticleRecord::COLUMNS`] order.

use crate::models::ArticleRecord;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render records as CSV text.
pub fn format_csv(records: &[ArticleRecord]) -> Result<String, Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(ArticleRecord::COLUMNS)?;
    for record in records {
        writer.write_record(record.as_row())?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Write `{output_dir}/{file_name}.csv`.
#[instrument(level = "info", skip_all, fields(%output_dir, %file_name))]
pub async fn write_csv(
    records: &[ArticleRecord],
    output_dir: &str,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let text = format_csv(records)?;
    let path = Path::new(output_dir).join(format!("{}.csv", file_name));

    fs::write(&path, text).await?;
    info!(path = %path.display(), rows = records.len(), "Wrote CSV export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            link: "https://example.com/read/1".to_string(),
            publication_time: "2025-05-06T10:30:00+07:00".to_string(),
            author: "Rina".to_string(),
            image_url: "no image".to_string(),
            summary: "Short, with a comma".to_string(),
        }
    }

    #[test]
    fn test_format_csv_headers() {
        let text = format_csv(&[]).unwrap();
        assert_eq!(
            text,
            "title,link,publication_time,author,image_url,summary\n"
        );
    }

    #[test]
    fn test_format_csv_data_row_quotes_commas() {
        let text = format_csv(&[record("Plain")]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "Plain,https://example.com/read/1,2025-05-06T10:30:00+07:00,Rina,no image,\"Short, with a comma\""
        );
    }

    #[tokio::test]
    async fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&[record("A"), record("B")], dir.path().to_str().unwrap(), "posts")
            .await
            .unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
