//! Lazy enumeration of the cross product of identifier dimensions.

use super::names::{
    aggregate_file_name, building_file_name, county_prefix, metadata_file_name, weather_file_name,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One expected remote file and where it lands locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    /// Name relative to the URL root (e.g. `county=36001/101-0.parquet`).
    pub name: String,
    /// Full resource address: URL root + `name`, by concatenation.
    pub url: String,
    /// Local destination file.
    pub local: PathBuf,
}

impl FetchTarget {
    fn new(url_root: &str, name: String, local: PathBuf) -> Self {
        let url = format!("{}{}", url_root, name);
        Self { name, url, local }
    }
}

/// Locations × building types, location-major.
pub fn aggregate_targets<'a>(
    url_root: &'a str,
    local_dir: &'a Path,
    locations: &'a [String],
    building_types: &'a [String],
) -> impl Iterator<Item = FetchTarget> + 'a {
    locations.iter().flat_map(move |loc| {
        building_types.iter().map(move |bldg_type| {
            let name = aggregate_file_name(loc, bldg_type);
            let local = local_dir.join(&name);
            FetchTarget::new(url_root, name, local)
        })
    })
}

/// Counties (in the given order) × that county's building IDs.
///
/// Remote names carry the `county=<id>/` partition; locally the county becomes
/// a plain subdirectory. Counties absent from `buildings` yield nothing.
pub fn building_targets<'a>(
    url_root: &'a str,
    local_dir: &'a Path,
    county_ids: &'a [String],
    buildings: &'a HashMap<String, Vec<String>>,
    upgrade_index: u32,
) -> impl Iterator<Item = FetchTarget> + 'a {
    county_ids.iter().flat_map(move |county| {
        let county_dir = local_dir.join(county);
        let prefix = county_prefix(county);
        buildings
            .get(county)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |bldg_id| {
                let file = building_file_name(bldg_id, upgrade_index);
                let local = county_dir.join(&file);
                FetchTarget::new(url_root, format!("{}{}", prefix, file), local)
            })
    })
}

/// Locations with one building type.
pub fn weather_targets<'a>(
    url_root: &'a str,
    local_dir: &'a Path,
    locations: &'a [String],
    building_type: &'a str,
) -> impl Iterator<Item = FetchTarget> + 'a {
    locations.iter().map(move |loc| {
        let name = weather_file_name(loc, building_type);
        let local = local_dir.join(&name);
        FetchTarget::new(url_root, name, local)
    })
}

/// One metadata/annual-results file per upgrade name for a state.
pub fn metadata_targets<'a>(
    url_root: &'a str,
    local_dir: &'a Path,
    state: &'a str,
    upgrades: &'a [String],
    extension: &'a str,
) -> impl Iterator<Item = FetchTarget> + 'a {
    upgrades.iter().map(move |upgrade| {
        let name = metadata_file_name(state, upgrade, extension);
        let local = local_dir.join(&name);
        FetchTarget::new(url_root, name, local)
    })
}

/// One time series file per building ID within a single upgrade partition.
pub fn timeseries_targets<'a>(
    url_root: &'a str,
    local_dir: &'a Path,
    building_ids: &'a [String],
    upgrade_index: u32,
) -> impl Iterator<Item = FetchTarget> + 'a {
    building_ids.iter().map(move |bldg_id| {
        let name = building_file_name(bldg_id, upgrade_index);
        let local = local_dir.join(&name);
        FetchTarget::new(url_root, name, local)
    })
}
