// =============================================================================
// Output Sink: JSON documents written with an atomic tmp + rename
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// File name for the analytics document of `ticker` over `period`.
pub fn analytics_file_name(ticker: &str, period: &str) -> String {
    format!("{}_{}_analytics.json", ticker.to_lowercase(), period)
}

/// File name for the raw chart document of `ticker` over `period`.
pub fn chart_file_name(ticker: &str, period: &str) -> String {
    format!("{}_{}_output.json", ticker.to_lowercase(), period)
}

/// Serialise `value` as pretty JSON into `dir/file_name`.
///
/// The directory is created if needed.  The document is written to a `.tmp`
/// sibling first and renamed into place, so readers never see a partial file.
pub fn write_json<T: Serialize>(dir: impl AsRef<Path>, file_name: &str, value: &T) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let content = serde_json::to_string_pretty(value).context("failed to serialise document")?;

    let path = dir.join(file_name);
    let tmp_path = path.with_extension("json.tmp");

    std::fs::write(&tmp_path, &content)
        .with_context(|| format!("failed to write tmp document to {}", tmp_path.display()))?;

    std::fs::rename(&tmp_path, &path)
        .with_context(|| format!("failed to rename tmp document to {}", path.display()))?;

    info!(path = %path.display(), bytes = content.len(), "document saved (atomic)");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_lowercase_ticker() {
        assert_eq!(analytics_file_name("AAPL", "1w"), "aapl_1w_analytics.json");
        assert_eq!(chart_file_name("BRK-B", "3m"), "brk-b_3m_output.json");
    }

    #[test]
    fn write_json_creates_dir_and_leaves_no_tmp() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("public").join("data");

        let path = write_json(&dir, "x_1d_output.json", &serde_json::json!({ "a": 1 })).unwrap();

        assert_eq!(path, dir.join("x_1d_output.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
        assert!(!dir.join("x_1d_output.json.tmp").exists());
    }

    #[test]
    fn write_json_overwrites_existing_file() {
        let root = tempfile::tempdir().unwrap();
        write_json(root.path(), "doc.json", &vec![1, 2]).unwrap();
        let path = write_json(root.path(), "doc.json", &vec![3]).unwrap();
        let value: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value, vec![3]);
    }
}
