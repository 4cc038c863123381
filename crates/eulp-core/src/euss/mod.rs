//! ResStock EUSS two-step pipeline.
//!
//! 1. Fetch one metadata/annual-results file per upgrade scenario for a state.
//! 2. Take the building IDs from the baseline metadata file (or a list the
//!    caller already has) and fetch one time series file per building for
//!    every upgrade partition.
//!
//! Both steps are ordinary runs of the bulk routine; the building ID list is
//! the only thing passed between them.

mod ids;

pub use ids::{read_building_ids, read_building_ids_csv, read_building_ids_parquet, BUILDING_ID_COLUMN};

use crate::bulk::{fetch_all, BatchReport};
use crate::fetch::Fetcher;
use crate::layout::{self, ensure_dir, metadata_file_name};
use crate::retry::RetryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Number of upgrade scenarios, baseline included.
pub const UPGRADE_COUNT: u32 = 11;

#[derive(Debug, Error)]
pub enum EussError {
    #[error("metadata file {0} is not on disk")]
    MetadataMissing(PathBuf),
    #[error("metadata file {path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: String },
    #[error("read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("read {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: duckdb::Error,
    },
}

/// ResStock 2022 releases, keyed by weather year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Release {
    #[default]
    Amy2018,
    Amy2012,
    Tmy3,
}

impl Release {
    pub fn dir_name(self) -> &'static str {
        match self {
            Release::Amy2018 => "resstock_amy2018_release_1",
            Release::Amy2012 => "resstock_amy2012_release_1",
            Release::Tmy3 => "resstock_tmy3_release_1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataFormat {
    #[default]
    Parquet,
    Csv,
}

impl MetadataFormat {
    /// Guesses the format of an ID list from its extension; anything but `.parquet` is csv.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => MetadataFormat::Parquet,
            _ => MetadataFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            MetadataFormat::Parquet => "parquet",
            MetadataFormat::Csv => "csv",
        }
    }
}

/// `baseline`, `upgrade01` … `upgrade10`.
pub fn upgrade_names() -> Vec<String> {
    std::iter::once("baseline".to_string())
        .chain((1..UPGRADE_COUNT).map(|i| format!("upgrade{:02}", i)))
        .collect()
}

/// Partition segment for an upgrade index: `upgrade=<i>`.
pub fn upgrade_partition(index: u32) -> String {
    format!("upgrade={}", index)
}

/// Where one state's EUSS files live, remotely and locally.
#[derive(Debug, Clone)]
pub struct EussPlan {
    /// Dataset year prefix, ending in `/`.
    pub url_root: String,
    pub data_dir: PathBuf,
    pub release: Release,
    pub state: String,
    pub format: MetadataFormat,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EussReport {
    pub metadata: BatchReport,
    pub building_count: usize,
    pub timeseries: BatchReport,
}

impl EussPlan {
    fn state_segment(&self) -> String {
        format!("state={}", self.state.to_uppercase())
    }

    pub fn release_url(&self) -> String {
        format!("{}{}/", self.url_root, self.release.dir_name())
    }

    pub fn metadata_url(&self) -> String {
        format!(
            "{}metadata_and_annual_results/by_state/{}/{}/",
            self.release_url(),
            self.state_segment(),
            self.format.extension()
        )
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.data_dir
            .join(self.release.dir_name())
            .join("metadata_and_annual_results")
            .join("by_state")
            .join(self.state_segment())
            .join(self.format.extension())
    }

    pub fn baseline_metadata_path(&self) -> PathBuf {
        self.metadata_dir()
            .join(metadata_file_name(&self.state, "baseline", self.format.extension()))
    }

    pub fn timeseries_url(&self, upgrade_index: u32) -> String {
        format!(
            "{}timeseries_individual_buildings/by_state/{}/{}/",
            self.release_url(),
            upgrade_partition(upgrade_index),
            self.state_segment()
        )
    }

    pub fn timeseries_dir(&self, upgrade_index: u32) -> PathBuf {
        self.data_dir
            .join(self.release.dir_name())
            .join("timeseries_individual_buildings")
            .join("by_state")
            .join(upgrade_partition(upgrade_index))
            .join(self.state_segment())
    }

    /// Step 1: one metadata file per upgrade scenario.
    pub fn download_metadata<F: Fetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        retry: &RetryPolicy,
    ) -> Result<BatchReport> {
        let local_dir = self.metadata_dir();
        ensure_dir(&local_dir)?;
        let url = self.metadata_url();
        let upgrades = upgrade_names();
        let targets = layout::metadata_targets(
            &url,
            &local_dir,
            &self.state,
            &upgrades,
            self.format.extension(),
        );
        Ok(fetch_all(fetcher, targets, retry))
    }

    /// Building IDs from the baseline metadata file already on disk.
    pub fn building_ids(&self) -> Result<Vec<String>, EussError> {
        let path = self.baseline_metadata_path();
        if !path.is_file() {
            return Err(EussError::MetadataMissing(path));
        }
        read_building_ids(&path, self.format)
    }

    /// Step 2: one time series file per building for every upgrade partition.
    pub fn download_timeseries<F: Fetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        retry: &RetryPolicy,
        building_ids: &[String],
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for index in 0..UPGRADE_COUNT {
            tracing::info!("start downloading {}", upgrade_partition(index));
            let local_dir = self.timeseries_dir(index);
            ensure_dir(&local_dir)?;
            let url = self.timeseries_url(index);
            let targets = layout::timeseries_targets(&url, &local_dir, building_ids, index);
            report.merge(fetch_all(fetcher, targets, retry));
            tracing::info!("finished downloading {}", upgrade_partition(index));
        }
        Ok(report)
    }

    /// Runs both steps. With `building_ids` supplied, the metadata file is not read.
    pub fn run<F: Fetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        retry: &RetryPolicy,
        building_ids: Option<Vec<String>>,
    ) -> Result<EussReport> {
        let metadata = self.download_metadata(fetcher, retry)?;
        let ids = match building_ids {
            Some(ids) => ids,
            None => self.building_ids()?,
        };
        tracing::info!("{} building IDs for state {}", ids.len(), self.state);
        let timeseries = self.download_timeseries(fetcher, retry, &ids)?;
        Ok(EussReport {
            metadata,
            building_count: ids.len(),
            timeseries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(format: MetadataFormat) -> EussPlan {
        EussPlan {
            url_root: "https://lake/eulp/2022/".to_string(),
            data_dir: PathBuf::from("/data/EULP/2022"),
            release: Release::Amy2018,
            state: "ny".to_string(),
            format,
        }
    }

    #[test]
    fn eleven_upgrades() {
        let names = upgrade_names();
        assert_eq!(names.len(), UPGRADE_COUNT as usize);
        assert_eq!(names[0], "baseline");
        assert_eq!(names[1], "upgrade01");
        assert_eq!(names[10], "upgrade10");
        assert_eq!(upgrade_partition(0), "upgrade=0");
    }

    #[test]
    fn metadata_locations() {
        let p = plan(MetadataFormat::Parquet);
        assert_eq!(
            p.metadata_url(),
            "https://lake/eulp/2022/resstock_amy2018_release_1/metadata_and_annual_results/by_state/state=NY/parquet/"
        );
        assert_eq!(
            p.metadata_dir(),
            PathBuf::from(
                "/data/EULP/2022/resstock_amy2018_release_1/metadata_and_annual_results/by_state/state=NY/parquet"
            )
        );
        assert!(p
            .baseline_metadata_path()
            .ends_with("NY_baseline_metadata_and_annual_results.parquet"));
    }

    #[test]
    fn timeseries_locations() {
        let p = plan(MetadataFormat::Csv);
        assert_eq!(
            p.timeseries_url(3),
            "https://lake/eulp/2022/resstock_amy2018_release_1/timeseries_individual_buildings/by_state/upgrade=3/state=NY/"
        );
        assert_eq!(
            p.timeseries_dir(3),
            PathBuf::from(
                "/data/EULP/2022/resstock_amy2018_release_1/timeseries_individual_buildings/by_state/upgrade=3/state=NY"
            )
        );
    }

    #[test]
    fn building_ids_need_the_baseline_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plan(MetadataFormat::Parquet);
        p.data_dir = tmp.path().to_path_buf();
        assert!(matches!(p.building_ids(), Err(EussError::MetadataMissing(_))));
    }

    #[test]
    fn building_ids_from_parquet_baseline() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plan(MetadataFormat::Parquet);
        p.data_dir = tmp.path().to_path_buf();
        let path = p.baseline_metadata_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        ids::write_parquet_fixture(&path, &[(100, "G3600010"), (2, "G3600030")]);

        assert_eq!(p.building_ids().unwrap(), ["100", "2"]);
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            MetadataFormat::from_path(std::path::Path::new("ids.PARQUET")),
            MetadataFormat::Parquet
        );
        assert_eq!(
            MetadataFormat::from_path(std::path::Path::new("ids.csv")),
            MetadataFormat::Csv
        );
        assert_eq!(
            MetadataFormat::from_path(std::path::Path::new("ids")),
            MetadataFormat::Csv
        );
    }
}
