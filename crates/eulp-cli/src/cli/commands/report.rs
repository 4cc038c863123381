//! Shared output for batch reports.

use anyhow::Result;
use eulp_core::BatchReport;

/// Prints `report` as pretty JSON, or a human summary.
pub fn print(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    print_summary(report);
    Ok(())
}

pub fn print_summary(report: &BatchReport) {
    println!(
        "{} attempted, {} downloaded, {} already present, {} failed",
        report.local_paths.len(),
        report.downloaded(),
        report.existing(),
        report.failed.len()
    );
    for path in &report.failed {
        println!("  failed: {}", path.display());
    }
}

/// Warns when `url` would not concatenate cleanly with a file name.
pub fn check_url_prefix(url: &str) {
    if let Err(e) = eulp_core::config::validate_url_root(url) {
        tracing::warn!("{:#}", e);
        eprintln!("warning: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eulp_core::FetchOutcome;
    use std::path::PathBuf;

    #[test]
    fn prints_a_batch_in_both_modes() {
        let mut batch = BatchReport::default();
        batch.record(FetchOutcome::Failed {
            path: PathBuf::from("/data/ca-baseline.csv"),
            name: "ca-baseline.csv".to_string(),
            error: "HTTP 404".to_string(),
        });
        assert!(print(&batch, true).is_ok());
        assert!(print(&batch, false).is_ok());
    }
}
