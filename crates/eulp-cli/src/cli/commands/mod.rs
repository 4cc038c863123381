//! CLI command handlers. Each command is in its own file.

mod aggregate;
mod buildings;
mod completions;
mod euss;
mod report;
mod weather;

pub use aggregate::run_aggregate;
pub use buildings::run_buildings;
pub use completions::run_completions;
pub use euss::{run_euss, EussArgs};
pub use weather::run_weather;
