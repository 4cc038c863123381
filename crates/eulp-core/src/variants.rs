//! The three dataset variants, expressed as one parameterized request.
//!
//! A [`BulkRequest`] carries everything a download run needs (URL root,
//! local root, identifier dimensions, retry policy) so several runs can be
//! configured side by side without shared globals.

use crate::bulk::{fetch_all, BatchReport};
use crate::fetch::Fetcher;
use crate::layout::{self, ensure_dir};
use crate::retry::RetryPolicy;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identifier dimensions for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimensions {
    /// Aggregate time series: every location × every building type.
    Aggregate {
        locations: Vec<String>,
        building_types: Vec<String>,
    },
    /// Individual building time series, partitioned by county.
    Buildings {
        county_ids: Vec<String>,
        buildings: HashMap<String, Vec<String>>,
        upgrade_index: u32,
    },
    /// Weather time series: every location with one building type.
    Weather {
        locations: Vec<String>,
        building_type: String,
    },
}

#[derive(Debug, Clone)]
pub struct BulkRequest {
    /// Prefix that, concatenated with a relative file name, addresses the resource.
    pub url_root: String,
    pub local_dir: PathBuf,
    pub dimensions: Dimensions,
    pub retry: RetryPolicy,
}

impl BulkRequest {
    /// Creates the needed directories and fetches every missing file.
    ///
    /// Errors only when a directory cannot be created; per-file failures
    /// end up in the report.
    pub fn run<F: Fetcher + ?Sized>(&self, fetcher: &mut F) -> Result<BatchReport> {
        ensure_dir(&self.local_dir)?;
        let url_root = self.url_root.as_str();
        let root = self.local_dir.as_path();

        let report = match &self.dimensions {
            Dimensions::Aggregate {
                locations,
                building_types,
            } => fetch_all(
                fetcher,
                layout::aggregate_targets(url_root, root, locations, building_types),
                &self.retry,
            ),
            Dimensions::Buildings {
                county_ids,
                buildings,
                upgrade_index,
            } => {
                for county in county_ids {
                    if buildings.contains_key(county) {
                        ensure_dir(&root.join(county))?;
                    } else {
                        tracing::warn!("no building IDs listed for county {}", county);
                    }
                }
                fetch_all(
                    fetcher,
                    layout::building_targets(url_root, root, county_ids, buildings, *upgrade_index),
                    &self.retry,
                )
            }
            Dimensions::Weather {
                locations,
                building_type,
            } => fetch_all(
                fetcher,
                layout::weather_targets(url_root, root, locations, building_type),
                &self.retry,
            ),
        };

        for path in &report.failed {
            tracing::warn!("failed: {}", path.display());
        }
        Ok(report)
    }
}

/// Aggregate time series for `locations × building_types` into `local_dir`.
pub fn download_ts_agg<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    retry: RetryPolicy,
    url_root: &str,
    locations: &[String],
    building_types: &[String],
    local_dir: &Path,
) -> Result<BatchReport> {
    BulkRequest {
        url_root: url_root.to_string(),
        local_dir: local_dir.to_path_buf(),
        dimensions: Dimensions::Aggregate {
            locations: locations.to_vec(),
            building_types: building_types.to_vec(),
        },
        retry,
    }
    .run(fetcher)
}

/// Individual building time series into `<local_dir>/<county>/`.
///
/// The report covers every county in `county_ids`, in order.
pub fn download_bldg_ts<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    retry: RetryPolicy,
    url_root: &str,
    county_ids: &[String],
    buildings: &HashMap<String, Vec<String>>,
    upgrade_index: u32,
    local_dir: &Path,
) -> Result<BatchReport> {
    BulkRequest {
        url_root: url_root.to_string(),
        local_dir: local_dir.to_path_buf(),
        dimensions: Dimensions::Buildings {
            county_ids: county_ids.to_vec(),
            buildings: buildings.clone(),
            upgrade_index,
        },
        retry,
    }
    .run(fetcher)
}

/// Weather time series for `locations` with one building type into `local_dir`.
pub fn download_weather_ts<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    retry: RetryPolicy,
    url_root: &str,
    locations: &[String],
    building_type: &str,
    local_dir: &Path,
) -> Result<BatchReport> {
    BulkRequest {
        url_root: url_root.to_string(),
        local_dir: local_dir.to_path_buf(),
        dimensions: Dimensions::Weather {
            locations: locations.to_vec(),
            building_type: building_type.to_string(),
        },
        retry,
    }
    .run(fetcher)
}
