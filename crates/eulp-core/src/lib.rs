//! Bulk fetch-or-skip downloader for End-Use Load Profile datasets.
//!
//! Enumerates expected object names from identifier dimensions, fetches the
//! ones missing locally with one blocking GET each, and reports which
//! destinations were attempted and which failed.

pub mod bulk;
pub mod config;
pub mod euss;
pub mod fetch;
pub mod layout;
pub mod logging;
pub mod retry;
pub mod variants;

pub use bulk::{fetch_all, BatchReport, FetchOutcome};
pub use fetch::{CurlFetcher, FetchOptions, Fetcher};
pub use layout::FetchTarget;
pub use retry::{FetchError, RetryPolicy};
pub use variants::{download_bldg_ts, download_ts_agg, download_weather_ts, BulkRequest, Dimensions};

