//! `eulp euss` – metadata per upgrade, then per-building time series.

use anyhow::Result;
use eulp_core::config::EulpConfig;
use eulp_core::euss::{read_building_ids, EussPlan, EussReport, MetadataFormat, Release};
use eulp_core::CurlFetcher;
use std::path::PathBuf;

use super::report;

#[derive(Debug)]
pub struct EussArgs {
    /// Overrides `url_root` from config.toml.
    pub url: Option<String>,
    pub state: String,
    pub release: Release,
    pub format: MetadataFormat,
    pub data_dir: Option<PathBuf>,
    pub ids: Option<PathBuf>,
    pub metadata_only: bool,
}

pub fn run_euss(cfg: &EulpConfig, args: EussArgs, json: bool) -> Result<()> {
    let url_root = match args.url {
        Some(url) => {
            report::check_url_prefix(&url);
            url
        }
        None => cfg.url_root.clone(),
    };
    let plan = EussPlan {
        url_root,
        data_dir: args.data_dir.unwrap_or_else(|| cfg.data_dir.clone()),
        release: args.release,
        state: args.state,
        format: args.format,
    };
    let retry = cfg.retry_policy();
    let mut fetcher = CurlFetcher::new(cfg.fetch_options())?;

    if args.metadata_only {
        let batch = plan.download_metadata(&mut fetcher, &retry)?;
        return report::print(&batch, json);
    }

    let ids = args
        .ids
        .as_deref()
        .map(|path| read_building_ids(path, MetadataFormat::from_path(path)))
        .transpose()?;
    let result: EussReport = plan.run(&mut fetcher, &retry, ids)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    println!("metadata:");
    report::print_summary(&result.metadata);
    println!("time series ({} buildings):", result.building_count);
    report::print_summary(&result.timeseries);
    Ok(())
}
