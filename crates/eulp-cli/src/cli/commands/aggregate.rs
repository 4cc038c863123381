//! `eulp aggregate` – aggregate time series per location and building type.

use anyhow::Result;
use eulp_core::config::EulpConfig;
use eulp_core::{download_ts_agg, CurlFetcher};
use std::path::Path;

use super::report;

pub fn run_aggregate(
    cfg: &EulpConfig,
    url: &str,
    out: &Path,
    locations: &[String],
    building_types: &[String],
    json: bool,
) -> Result<()> {
    report::check_url_prefix(url);
    let mut fetcher = CurlFetcher::new(cfg.fetch_options())?;
    let batch = download_ts_agg(
        &mut fetcher,
        cfg.retry_policy(),
        url,
        locations,
        building_types,
        out,
    )?;
    report::print(&batch, json)
}
