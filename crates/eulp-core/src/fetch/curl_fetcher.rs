//! libcurl-backed fetcher. One `Easy` handle is reused so consecutive
//! requests to the same origin can share a connection.

use super::{part_path, FetchOptions, Fetcher};
use crate::retry::FetchError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

const USER_AGENT: &str = concat!("eulp/", env!("CARGO_PKG_VERSION"));

pub struct CurlFetcher {
    easy: curl::easy::Easy,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(opts.connect_timeout)?;
        easy.timeout(opts.timeout)?;
        easy.useragent(USER_AGENT)?;
        Ok(Self { easy })
    }

    /// Streams the body of `url` into `part`. Returns the HTTP status on a
    /// completed transfer.
    fn transfer_to(&mut self, url: &str, part: &Path) -> Result<u32, FetchError> {
        self.easy.url(url)?;
        let mut file = File::create(part)?;
        let mut write_err: Option<io::Error> = None;

        let performed = {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(FetchError::Storage(e));
        }
        performed?;
        file.flush()?;
        drop(file);

        Ok(self.easy.response_code()?)
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let part = part_path(dest);
        let result = match self.transfer_to(url, &part) {
            Ok(200) => fs::rename(&part, dest).map_err(FetchError::from),
            Ok(code) => Err(FetchError::Http(code)),
            Err(e) => Err(e),
        };
        if result.is_err() && part.exists() {
            if let Err(e) = fs::remove_file(&part) {
                tracing::warn!("could not remove {}: {}", part.display(), e);
            }
        }
        result
    }
}
