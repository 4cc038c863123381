//! Per-batch accounting.

use serde::Serialize;
use std::path::PathBuf;

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Destination was already on disk; nothing was requested.
    Existing { path: PathBuf },
    /// Fetched with a 200 and written.
    Downloaded { path: PathBuf },
    /// Non-200 response or transport/storage error.
    Failed {
        path: PathBuf,
        name: String,
        error: String,
    },
}

impl FetchOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FetchOutcome::Existing { path }
            | FetchOutcome::Downloaded { path }
            | FetchOutcome::Failed { path, .. } => path,
        }
    }
}

/// Result of a bulk fetch, in enumeration order.
///
/// `local_paths` lists every attempted destination, whether it was already
/// present, freshly downloaded, or failed. `failed` lists only the failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub local_paths: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub outcomes: Vec<FetchOutcome>,
}

impl BatchReport {
    pub fn record(&mut self, outcome: FetchOutcome) {
        self.local_paths.push(outcome.path().clone());
        if let FetchOutcome::Failed { path, .. } = &outcome {
            self.failed.push(path.clone());
        }
        self.outcomes.push(outcome);
    }

    /// Appends another batch after this one, preserving order.
    pub fn merge(&mut self, other: BatchReport) {
        self.local_paths.extend(other.local_paths);
        self.failed.extend(other.failed);
        self.outcomes.extend(other.outcomes);
    }

    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FetchOutcome::Downloaded { .. }))
            .count()
    }

    pub fn existing(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FetchOutcome::Existing { .. }))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_order_and_counts() {
        let mut a = BatchReport::default();
        a.record(FetchOutcome::Downloaded { path: "1".into() });
        let mut b = BatchReport::default();
        b.record(FetchOutcome::Failed {
            path: "2".into(),
            name: "two".into(),
            error: "HTTP 404".into(),
        });
        b.record(FetchOutcome::Existing { path: "3".into() });
        a.merge(b);

        assert_eq!(
            a.local_paths,
            vec![PathBuf::from("1"), PathBuf::from("2"), PathBuf::from("3")]
        );
        assert_eq!(a.failed, vec![PathBuf::from("2")]);
        assert_eq!(a.downloaded(), 1);
        assert_eq!(a.existing(), 1);
        assert!(!a.is_complete());
    }

    #[test]
    fn serializes_outcomes_with_status_tag() {
        let mut r = BatchReport::default();
        r.record(FetchOutcome::Existing { path: "/d/x.csv".into() });
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "existing");
        assert_eq!(json["outcomes"][0]["path"], "/d/x.csv");
    }
}
