//! Bulk fetch-or-skip routine shared by every dataset variant.
//!
//! Walks a sequence of [`FetchTarget`]s in order. A destination that already
//! exists is trusted as-is (no request, no validation). Anything else gets a
//! GET under the supplied retry policy. A failed item is recorded and the walk
//! continues; nothing about one item can abort the batch.

mod report;

pub use report::{BatchReport, FetchOutcome};

use crate::fetch::Fetcher;
use crate::layout::FetchTarget;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use std::fs;

/// Fetches every target that is not already on disk.
pub fn fetch_all<F, I>(fetcher: &mut F, targets: I, policy: &RetryPolicy) -> BatchReport
where
    F: Fetcher + ?Sized,
    I: IntoIterator<Item = FetchTarget>,
{
    let mut report = BatchReport::default();
    for target in targets {
        let outcome = fetch_one(fetcher, &target, policy);
        report.record(outcome);
    }
    tracing::info!(
        attempted = report.local_paths.len(),
        downloaded = report.downloaded(),
        existing = report.existing(),
        failed = report.failed.len(),
        "batch finished"
    );
    report
}

fn fetch_one<F>(fetcher: &mut F, target: &FetchTarget, policy: &RetryPolicy) -> FetchOutcome
where
    F: Fetcher + ?Sized,
{
    // Only a regular file counts as present; a directory in the way is fetched and fails.
    if target.local.is_file() {
        tracing::debug!("already present: {}", target.local.display());
        return FetchOutcome::Existing {
            path: target.local.clone(),
        };
    }

    let result = ensure_parent(target).and_then(|()| {
        run_with_retry(policy, || fetcher.fetch(&target.url, &target.local))
    });

    match result {
        Ok(()) => {
            tracing::info!("downloaded: {}", target.local.display());
            FetchOutcome::Downloaded {
                path: target.local.clone(),
            }
        }
        Err(e) => {
            tracing::warn!("file cannot be fetched: {} ({})", target.name, e);
            FetchOutcome::Failed {
                path: target.local.clone(),
                name: target.name.clone(),
                error: e.to_string(),
            }
        }
    }
}

fn ensure_parent(target: &FetchTarget) -> Result<(), FetchError> {
    match target.local.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    /// Answers from a URL → status table and writes a fixed body on 200.
    #[derive(Default)]
    struct TableFetcher {
        statuses: HashMap<String, u32>,
        requests: Vec<String>,
    }

    impl Fetcher for TableFetcher {
        fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError> {
            self.requests.push(url.to_string());
            match self.statuses.get(url).copied().unwrap_or(404) {
                200 => {
                    fs::write(dest, url.as_bytes())?;
                    Ok(())
                }
                code => Err(FetchError::Http(code)),
            }
        }
    }

    fn target(root: &Path, name: &str) -> FetchTarget {
        FetchTarget {
            name: name.to_string(),
            url: format!("http://origin/{}", name),
            local: root.join(name),
        }
    }

    #[test]
    fn middle_failure_does_not_stop_the_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let targets: Vec<FetchTarget> = ["a.csv", "b.csv", "c.csv"]
            .iter()
            .map(|n| target(tmp.path(), n))
            .collect();
        let mut fetcher = TableFetcher::default();
        fetcher.statuses.insert(targets[0].url.clone(), 200);
        fetcher.statuses.insert(targets[1].url.clone(), 404);
        fetcher.statuses.insert(targets[2].url.clone(), 200);

        let report = fetch_all(&mut fetcher, targets.clone(), &RetryPolicy::never());

        assert_eq!(fetcher.requests.len(), 3);
        assert_eq!(report.local_paths.len(), 3);
        assert_eq!(report.failed, vec![targets[1].local.clone()]);
        assert_eq!(report.downloaded(), 2);
        assert!(!targets[1].local.exists());
        assert!(targets[2].local.exists());
    }

    #[test]
    fn existing_files_are_skipped_without_requests() {
        let tmp = tempfile::tempdir().unwrap();
        let t = target(tmp.path(), "present.csv");
        fs::write(&t.local, b"stale but trusted").unwrap();
        let mut fetcher = TableFetcher::default();

        let report = fetch_all(&mut fetcher, vec![t.clone()], &RetryPolicy::never());

        assert!(fetcher.requests.is_empty());
        assert_eq!(report.existing(), 1);
        assert!(report.failed.is_empty());
        assert_eq!(report.local_paths, vec![t.local.clone()]);
        assert_eq!(fs::read(&t.local).unwrap(), b"stale but trusted");
    }

    #[test]
    fn missing_parent_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let t = FetchTarget {
            name: "county=1/x-0.parquet".to_string(),
            url: "http://origin/county=1/x-0.parquet".to_string(),
            local: tmp.path().join("1").join("x-0.parquet"),
        };
        let mut fetcher = TableFetcher::default();
        fetcher.statuses.insert(t.url.clone(), 200);

        let report = fetch_all(&mut fetcher, vec![t.clone()], &RetryPolicy::never());

        assert_eq!(report.downloaded(), 1);
        assert!(t.local.is_file());
    }

    #[test]
    fn directory_at_destination_is_not_treated_as_present() {
        let tmp = tempfile::tempdir().unwrap();
        let t = target(tmp.path(), "G3600010.csv");
        fs::create_dir(&t.local).unwrap();
        let mut fetcher = TableFetcher::default();
        fetcher.statuses.insert(t.url.clone(), 200);

        let report = fetch_all(&mut fetcher, vec![t.clone()], &RetryPolicy::never());

        assert_eq!(fetcher.requests, vec![t.url.clone()]);
        assert_eq!(report.existing(), 0);
        assert_eq!(report.failed, vec![t.local.clone()]);
        assert!(matches!(
            &report.outcomes[0],
            FetchOutcome::Failed { error, .. } if error.starts_with("storage:")
        ));
        assert!(t.local.is_dir());
    }
}
