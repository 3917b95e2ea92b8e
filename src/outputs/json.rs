//! JSON export of the crawl results.
//!
//! The document is the [`PostList`] container: `{"list_post": [...]}`,
//! UTF-8 with non-ASCII text left as-is and four-space indentation.

use crate::models::PostList;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Serialize a [`PostList`] with four-space indentation.
pub fn to_pretty_json(posts: &PostList) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    posts.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Write `{output_dir}/{file_name}.json`.
///
/// # Returns
///
/// The path written, or an error if serialization or the write fails.
#[instrument(level = "info", skip_all, fields(%output_dir, %file_name))]
pub async fn write_post_list(
    posts: &PostList,
    output_dir: &str,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = to_pretty_json(posts)?;
    let path = Path::new(output_dir).join(format!("{}.json", file_name));

    fs::write(&path, json).await?;
    info!(path = %path.display(), count = posts.list_post.len(), "Wrote JSON export");
    Ok(path)
}
