//! Retention pruning for rotated log archives.
//!
//! The rolling appender writes dated files (`<file_name>.YYYY-MM-DD`) and
//! switches to a fresh one each day, but never deletes anything. This module
//! removes files older than the configured retention window, once at startup
//! and then once a day from a background task.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const PRUNE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Delete rotated archives dated `retention_days` or more days ago.
///
/// A 30-day window keeps exactly the last 30 daily files. Files that do not
/// carry a parseable `YYYY-MM-DD` suffix are left alone, and today's file is
/// always inside the window. Returns the number of files removed.
pub fn prune_rotated(
    dir: &Path,
    file_name: &str,
    retention_days: u32,
    today: NaiveDate,
) -> io::Result<usize> {
    let prefix = format!("{file_name}.");
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(retention_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut removed = 0;
    for entry in dir.read_dir()? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();

        let Some(suffix) = name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(suffix, "%Y-%m-%d") else {
            continue;
        };

        if date <= cutoff {
            match std::fs::remove_file(entry.path()) {
                Ok(()) => {
                    removed += 1;
                    tracing::info!(file = %name, "Pruned expired log archive");
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Failed to prune log archive");
                }
            }
        }
    }

    Ok(removed)
}

/// Spawn the daily pruning task. Stops when the shutdown signal fires.
pub fn spawn_pruner(
    dir: PathBuf,
    file_name: String,
    retention_days: u32,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PRUNE_INTERVAL);
        // First tick fires immediately; startup already pruned.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let today = Local::now().date_naive();
                    if let Err(e) = prune_rotated(&dir, &file_name, retention_days, today) {
                        tracing::warn!(error = %e, "Log retention sweep failed");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Log retention task stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn removes_only_archives_past_the_window() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        touch(dir.path(), "algorithms.log.2026-06-01"); // long expired
        touch(dir.path(), "algorithms.log.2026-07-31"); // 30 days old, expired
        touch(dir.path(), "algorithms.log.2026-08-01"); // 29 days old, first day kept
        touch(dir.path(), "algorithms.log.2026-08-29"); // fresh
        touch(dir.path(), "algorithms.log"); // no date suffix
        touch(dir.path(), "other.log.2026-06-01"); // different sink

        let removed = prune_rotated(dir.path(), "algorithms.log", 30, today).unwrap();
        assert_eq!(removed, 2);

        assert!(!dir.path().join("algorithms.log.2026-06-01").exists());
        assert!(!dir.path().join("algorithms.log.2026-07-31").exists());
        assert!(dir.path().join("algorithms.log.2026-08-01").exists());
        assert!(dir.path().join("algorithms.log.2026-08-29").exists());
        assert!(dir.path().join("algorithms.log").exists());
        assert!(dir.path().join("other.log.2026-06-01").exists());
    }

    #[test]
    fn file_dated_exactly_retention_days_ago_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        touch(dir.path(), "algorithms.log.2026-07-31");

        let removed = prune_rotated(dir.path(), "algorithms.log", 30, today).unwrap();
        assert_eq!(removed, 1);
        assert!(!dir.path().join("algorithms.log.2026-07-31").exists());
    }

    #[test]
    fn ignores_files_with_garbage_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        touch(dir.path(), "algorithms.log.bak");
        touch(dir.path(), "algorithms.log.2026-13-99");

        let removed = prune_rotated(dir.path(), "algorithms.log", 30, today).unwrap();
        assert_eq!(removed, 0);
        assert!(dir.path().join("algorithms.log.bak").exists());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(prune_rotated(Path::new("/nonexistent/logs"), "algorithms.log", 30, today).is_err());
    }
}
