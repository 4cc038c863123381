use crate::fetch::FetchOptions;
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of the 2022 End-Use Load Profiles release on the OEDI data lake.
pub const DEFAULT_URL_ROOT: &str = "https://oedi-data-lake.s3.amazonaws.com/nrel-pds-building-stock/end-use-load-profiles-for-us-building-stock/2022/";

/// Retry policy parameters (optional section in config.toml).
/// Without this section every file gets exactly one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per file (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/eulp/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EulpConfig {
    /// Dataset prefix that relative object names are appended to. Must end in `/`.
    pub url_root: String,
    /// Root for the EUSS pipeline's local tree.
    pub data_dir: PathBuf,
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per file.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, files are attempted once.
    pub retry: Option<RetryConfig>,
}

impl Default for EulpConfig {
    fn default() -> Self {
        Self {
            url_root: DEFAULT_URL_ROOT.to_string(),
            data_dir: PathBuf::from("eulp-data"),
            connect_timeout_secs: 30,
            timeout_secs: 600,
            retry: None,
        }
    }
}

impl EulpConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::to_policy)
            .unwrap_or_else(RetryPolicy::never)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Checks that `url_root` is an absolute URL usable as a concatenation prefix.
    pub fn validate(&self) -> Result<()> {
        validate_url_root(&self.url_root)
    }
}

/// A URL root must parse and end in `/`, otherwise `root + name` addresses the wrong object.
pub fn validate_url_root(url_root: &str) -> Result<()> {
    let parsed = url::Url::parse(url_root).with_context(|| format!("invalid url_root {url_root:?}"))?;
    if parsed.cannot_be_a_base() {
        anyhow::bail!("url_root {url_root:?} is not a hierarchical URL");
    }
    if !url_root.ends_with('/') {
        anyhow::bail!("url_root {url_root:?} must end with '/'");
    }
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("eulp")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EulpConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<EulpConfig> {
    if !path.exists() {
        let default_cfg = EulpConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: EulpConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = EulpConfig::default();
        assert_eq!(cfg.url_root, DEFAULT_URL_ROOT);
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.timeout_secs, 600);
        assert!(cfg.retry.is_none());
        assert_eq!(cfg.retry_policy(), RetryPolicy::never());
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_partial_file_uses_defaults() {
        let toml = r#"
            data_dir = "/mnt/data1/EULP/2022"
            timeout_secs = 120
        "#;
        let cfg: EulpConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/mnt/data1/EULP/2022"));
        assert_eq!(cfg.timeout_secs, 120);
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.url_root, DEFAULT_URL_ROOT);
        assert_eq!(cfg.fetch_options().timeout, Duration::from_secs(120));
    }

    #[test]
    fn config_toml_retry_section() {
        let toml = r#"
            [retry]
            max_attempts = 3
            base_delay_secs = 0.5
            max_delay_secs = 15
        "#;
        let cfg: EulpConfig = toml::from_str(toml).unwrap();
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_secs(15));
    }

    #[test]
    fn url_root_must_end_with_slash() {
        assert!(validate_url_root("https://example.com/data/").is_ok());
        assert!(validate_url_root("https://example.com/data").is_err());
        assert!(validate_url_root("not a url/").is_err());
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("eulp").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.is_file());
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(first.url_root, second.url_root);
        assert_eq!(first.data_dir, second.data_dir);
    }
}
