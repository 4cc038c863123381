//! CLI for the EULP bulk downloader.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use eulp_core::config::{self, EulpConfig};
use eulp_core::euss::{MetadataFormat, Release};
use std::path::PathBuf;

use commands::{run_aggregate, run_buildings, run_completions, run_euss, run_weather, EussArgs};

/// Top-level CLI for the EULP bulk downloader.
#[derive(Debug, Parser)]
#[command(name = "eulp")]
#[command(about = "Fetch End-Use Load Profile dataset files, skipping ones already on disk", long_about = None)]
pub struct Cli {
    /// Print the batch report as JSON instead of a summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Aggregate time series: one `<location>-<type>.csv` per location and building type.
    Aggregate {
        /// URL prefix the file names are appended to.
        #[arg(long)]
        url: String,
        /// Local directory for the files (created if missing).
        #[arg(long)]
        out: PathBuf,
        /// Location identifier; repeat or comma-separate.
        #[arg(long = "location", required = true, value_delimiter = ',')]
        locations: Vec<String>,
        /// Building type; repeat or comma-separate.
        #[arg(long = "type", required = true, value_delimiter = ',')]
        building_types: Vec<String>,
    },

    /// Individual building time series, partitioned by county.
    Buildings {
        /// URL prefix the `county=<id>/` partitions live under.
        #[arg(long)]
        url: String,
        #[arg(long)]
        out: PathBuf,
        /// CSV with `county_id,bldg_id` columns.
        #[arg(long)]
        map: PathBuf,
        /// Restrict to these counties, in this order (default: every county in the map).
        #[arg(long = "county", value_delimiter = ',')]
        counties: Vec<String>,
        /// Upgrade index used in `<bldg_id>-<upgrade>.parquet`.
        #[arg(long, default_value = "0")]
        upgrade: u32,
    },

    /// Weather time series: one `<location>_<type>.csv` per location.
    Weather {
        #[arg(long)]
        url: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long = "location", required = true, value_delimiter = ',')]
        locations: Vec<String>,
        /// Single building type (or weather year) shared by every file.
        #[arg(long = "type")]
        building_type: String,
    },

    /// ResStock metadata per upgrade, then every building's time series per upgrade.
    Euss {
        /// Dataset year prefix (default: `url_root` from config.toml).
        #[arg(long)]
        url: Option<String>,
        /// Two-letter state code, e.g. NY.
        #[arg(long)]
        state: String,
        #[arg(long, value_enum, default_value = "amy2018")]
        release: ReleaseArg,
        /// Metadata file format; building IDs are read from the baseline file in this format.
        #[arg(long, value_enum, default_value = "parquet")]
        format: FormatArg,
        /// Local root (default: `data_dir` from config.toml).
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// CSV or parquet file with a `bldg_id` column to use instead of the baseline metadata.
        #[arg(long)]
        ids: Option<PathBuf>,
        /// Stop after the metadata files.
        #[arg(long)]
        metadata_only: bool,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseArg {
    Amy2018,
    Amy2012,
    Tmy3,
}

impl From<ReleaseArg> for Release {
    fn from(r: ReleaseArg) -> Self {
        match r {
            ReleaseArg::Amy2018 => Release::Amy2018,
            ReleaseArg::Amy2012 => Release::Amy2012,
            ReleaseArg::Tmy3 => Release::Tmy3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Parquet,
    Csv,
}

impl From<FormatArg> for MetadataFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Parquet => MetadataFormat::Parquet,
            FormatArg::Csv => MetadataFormat::Csv,
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        run(Cli::parse(), config::load_or_init)
    }
}

/// Dispatches a parsed command. Config is loaded only for commands that fetch.
pub(crate) fn run<L>(cli: Cli, load_config: L) -> Result<()>
where
    L: FnOnce() -> Result<EulpConfig>,
{
    if let CliCommand::Completions { shell } = cli.command {
        // No config needed; a broken config.toml must not block completions.
        return run_completions(shell, &mut Cli::command());
    }

    let cfg = load_config()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let json = cli.json;

    match cli.command {
        CliCommand::Aggregate {
            url,
            out,
            locations,
            building_types,
        } => run_aggregate(&cfg, &url, &out, &locations, &building_types, json)?,
        CliCommand::Buildings {
            url,
            out,
            map,
            counties,
            upgrade,
        } => run_buildings(&cfg, &url, &out, &map, counties, upgrade, json)?,
        CliCommand::Weather {
            url,
            out,
            locations,
            building_type,
        } => run_weather(&cfg, &url, &out, &locations, &building_type, json)?,
        CliCommand::Euss {
            url,
            state,
            release,
            format,
            data_dir,
            ids,
            metadata_only,
        } => run_euss(
            &cfg,
            EussArgs {
                url,
                state,
                release: release.into(),
                format: format.into(),
                data_dir,
                ids,
                metadata_only,
            },
            json,
        )?,
        CliCommand::Completions { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests;
