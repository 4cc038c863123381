//! File name construction for each dataset variant.

/// Aggregate time series: `<location-lowercased>-<building-type>.csv`.
pub fn aggregate_file_name(location: &str, building_type: &str) -> String {
    format!("{}-{}.csv", location.to_lowercase(), building_type)
}

/// Weather time series: `<location>_<building-type>.csv`. No case folding.
pub fn weather_file_name(location: &str, building_type: &str) -> String {
    format!("{}_{}.csv", location, building_type)
}

/// Partition segment for per-building files: `county=<county-id>/`.
pub fn county_prefix(county_id: &str) -> String {
    format!("county={}/", county_id)
}

/// Per-building time series: `<building-id>-<upgrade-index>.parquet`.
pub fn building_file_name(building_id: &str, upgrade_index: u32) -> String {
    format!("{}-{}.parquet", building_id, upgrade_index)
}

/// Metadata and annual results: `<STATE>_<upgrade>_metadata_and_annual_results.<ext>`.
pub fn metadata_file_name(state: &str, upgrade: &str, extension: &str) -> String {
    format!(
        "{}_{}_metadata_and_annual_results.{}",
        state.to_uppercase(),
        upgrade,
        extension
    )
}
