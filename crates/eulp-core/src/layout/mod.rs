//! Local layout and remote naming.
//!
//! Every file the fetcher touches is described by a [`FetchTarget`]: the
//! remote URL (plain string concatenation of a root and a relative name) and
//! the local destination. Both are pure functions of the identifier tuple,
//! so re-running an enumeration always lands on the same paths.

mod dir;
mod names;
mod targets;

pub use dir::{ensure_dir, DirStatus};
pub use names::{
    aggregate_file_name, building_file_name, county_prefix, metadata_file_name,
    weather_file_name,
};
pub use targets::{
    aggregate_targets, building_targets, metadata_targets, timeseries_targets, weather_targets,
    FetchTarget,
};
