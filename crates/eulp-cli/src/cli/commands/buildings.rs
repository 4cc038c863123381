//! `eulp buildings` – individual building time series by county.

use anyhow::{Context, Result};
use eulp_core::config::EulpConfig;
use eulp_core::{download_bldg_ts, CurlFetcher};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::report;

#[derive(Debug, Deserialize)]
struct MapRow {
    county_id: String,
    bldg_id: String,
}

/// Buildings grouped by county, plus the counties in order of first appearance.
pub(crate) struct BuildingMap {
    pub counties: Vec<String>,
    pub buildings: HashMap<String, Vec<String>>,
}

pub(crate) fn read_building_map(path: &Path) -> Result<BuildingMap> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut counties = Vec::new();
    let mut buildings: HashMap<String, Vec<String>> = HashMap::new();
    for row in rdr.deserialize::<MapRow>() {
        let row = row.with_context(|| format!("read {}", path.display()))?;
        let ids = buildings.entry(row.county_id.clone()).or_insert_with(|| {
            counties.push(row.county_id.clone());
            Vec::new()
        });
        ids.push(row.bldg_id);
    }
    Ok(BuildingMap {
        counties,
        buildings,
    })
}

pub fn run_buildings(
    cfg: &EulpConfig,
    url: &str,
    out: &Path,
    map: &Path,
    counties: Vec<String>,
    upgrade: u32,
    json: bool,
) -> Result<()> {
    report::check_url_prefix(url);
    let map = read_building_map(map)?;
    let counties = if counties.is_empty() {
        map.counties
    } else {
        counties
    };
    let mut fetcher = CurlFetcher::new(cfg.fetch_options())?;
    let batch = download_bldg_ts(
        &mut fetcher,
        cfg.retry_policy(),
        url,
        &counties,
        &map.buildings,
        upgrade,
        out,
    )?;
    report::print(&batch, json)
}
