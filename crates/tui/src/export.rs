//! CSV export of sync statistics.
//!
//! Does NOT handle:
//! - Path validation beyond directory creation.
//! - Streaming large exports (stats are capped for display anyway).

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

use cleanroom_client::models::SyncStat;

/// Write the given sync stats to a timestamped CSV file under `dir`.
///
/// Returns the path of the written file. Multiple error messages on a
/// record are joined with `;` into a single cell.
pub fn export_sync_stats(stats: &[SyncStat], dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let file_name = format!("sync-stats-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(file_name);

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create CSV export file: {}", path.display()))?;

    writer
        .write_record(["timestamp", "status", "merged_count", "errors"])
        .context("Failed to write CSV header")?;

    for stat in stats {
        let errors = stat
            .errors
            .as_ref()
            .map(|e| e.join(";"))
            .unwrap_or_default();
        writer
            .write_record([
                stat.timestamp.as_str(),
                stat.status.as_str(),
                &stat.merged_count.to_string(),
                &errors,
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV export")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> Vec<SyncStat> {
        vec![
            SyncStat {
                timestamp: "2024-05-01T10:00:00Z".to_string(),
                status: "success".to_string(),
                merged_count: 120,
                errors: None,
            },
            SyncStat {
                timestamp: "2024-05-01T10:01:00Z".to_string(),
                status: "error".to_string(),
                merged_count: 0,
                errors: Some(vec!["peer timeout".to_string(), "retrying".to_string()]),
            },
        ]
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_sync_stats(&sample_stats(), dir.path()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers,
            csv::StringRecord::from(vec!["timestamp", "status", "merged_count", "errors"])
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "success");
        assert_eq!(&rows[1][3], "peer timeout;retrying");
    }

    #[test]
    fn test_export_empty_stats_still_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_sync_stats(&[], dir.path()).unwrap();
        assert!(path.exists());
    }
}
