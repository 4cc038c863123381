//! `eulp weather` – weather time series per location.

use anyhow::Result;
use eulp_core::config::EulpConfig;
use eulp_core::{download_weather_ts, CurlFetcher};
use std::path::Path;

use super::report;

pub fn run_weather(
    cfg: &EulpConfig,
    url: &str,
    out: &Path,
    locations: &[String],
    building_type: &str,
    json: bool,
) -> Result<()> {
    report::check_url_prefix(url);
    let mut fetcher = CurlFetcher::new(cfg.fetch_options())?;
    let batch = download_weather_ts(
        &mut fetcher,
        cfg.retry_policy(),
        url,
        locations,
        building_type,
        out,
    )?;
    report::print(&batch, json)
}
