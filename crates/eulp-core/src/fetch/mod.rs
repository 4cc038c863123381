//! Single-file HTTP GET to a local path.
//!
//! [`Fetcher`] is the seam between the bulk routine and the network. The
//! production implementation is [`CurlFetcher`]; tests substitute recording
//! fakes so request counts and ordering can be asserted without a server.

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

use crate::retry::FetchError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fetches one resource into `dest`.
///
/// Implementations must leave `dest` untouched unless the response was a
/// success, so that a later presence check never mistakes an error body for
/// a downloaded file.
pub trait Fetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &mut F {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError> {
        (**self).fetch(url, dest)
    }
}

/// Transport timeouts for a fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Upper bound on a whole transfer, body included.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Sibling path the body is streamed into before the final rename.
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
