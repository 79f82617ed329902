//! Deployment configuration.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use sheetproxy_cache::{CacheReadPolicy, DEFAULT_TTL_SECONDS};
use sheetproxy_error::{BuilderError, ConfigError, SheetProxyResult};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Prefix for environment variable overrides, e.g. `SHEETPROXY_DOCUMENT_ID`.
const ENV_PREFIX: &str = "SHEETPROXY";

/// The one sheet this deployment serves, plus how it is cached and served.
///
/// Built once at startup and passed explicitly to the pieces that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(build_fn(error = "BuilderError", validate = "Self::validate"))]
pub struct ProxyConfig {
    /// Spreadsheet ID from the document URL; also the cache key
    #[builder(setter(into))]
    document_id: String,

    /// Sheet (tab) name inside the document
    #[builder(setter(into))]
    sheet_name: String,

    /// Seconds a formatted sheet stays cached
    #[serde(default = "default_cache_ttl_seconds")]
    #[builder(default = "default_cache_ttl_seconds()")]
    cache_ttl_seconds: u64,

    /// Upper bound on in-memory cache entries
    #[serde(default = "default_cache_max_entries")]
    #[builder(default = "default_cache_max_entries()")]
    cache_max_entries: usize,

    /// What a failed cache read means
    #[serde(default)]
    #[builder(default)]
    cache_read_policy: CacheReadPolicy,

    /// Address the HTTP server listens on
    #[serde(default = "default_bind_address")]
    #[builder(default = "default_bind_address()")]
    bind_address: SocketAddr,

    /// Base of the spreadsheet URL, without the document ID
    #[serde(default = "default_upstream_base_url")]
    #[builder(setter(into), default = "default_upstream_base_url()")]
    upstream_base_url: String,

    /// Timeout for the upstream request
    #[serde(default = "default_request_timeout_seconds")]
    #[builder(default = "default_request_timeout_seconds()")]
    request_timeout_seconds: u64,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    #[builder(setter(into), default = "default_log_level()")]
    log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    #[builder(default)]
    json_logs: bool,
}

fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_cache_max_entries() -> usize {
    1000
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8787))
}

fn default_upstream_base_url() -> String {
    "https://docs.google.com/spreadsheets/d".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ProxyConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        check_fields(
            self.document_id.as_deref(),
            self.sheet_name.as_deref(),
            self.upstream_base_url.as_deref(),
        )
    }
}

/// Field checks shared by the builder and loaded configurations. `None`
/// means the field is not set yet and is skipped.
fn check_fields(
    document_id: Option<&str>,
    sheet_name: Option<&str>,
    upstream_base_url: Option<&str>,
) -> Result<(), String> {
    if document_id.is_some_and(|id| id.trim().is_empty()) {
        return Err("document_id must not be empty".to_string());
    }
    if sheet_name.is_some_and(|name| name.trim().is_empty()) {
        return Err("sheet_name must not be empty".to_string());
    }
    if let Some(base) = upstream_base_url
        && !base.starts_with("http://")
        && !base.starts_with("https://")
    {
        return Err(format!("upstream_base_url must be an http(s) URL: {}", base));
    }
    Ok(())
}

impl ProxyConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> SheetProxyResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence, later sources overriding earlier:
    ///
    /// 1. Bundled defaults (`sheetproxy.toml` shipped with the crate)
    /// 2. `~/.config/sheetproxy/sheetproxy.toml`
    /// 3. `./sheetproxy.toml`
    /// 4. `explicit`, when given (must exist)
    /// 5. `SHEETPROXY_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed, a required field such
    /// as `document_id` is missing, or validation fails.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> SheetProxyResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../sheetproxy.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/sheetproxy/sheetproxy.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("sheetproxy").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fields(
            Some(&self.document_id),
            Some(&self.sheet_name),
            Some(&self.upstream_base_url),
        )
        .map_err(ConfigError::new)
    }

    /// Full JSON export URL of the configured sheet. Spaces in the sheet
    /// name are sent as `%20`.
    pub fn sheet_url(&self) -> String {
        format!(
            "{}/{}/gviz/tq?tqx=out:json&sheet={}",
            self.upstream_base_url.trim_end_matches('/'),
            self.document_id,
            self.sheet_name.replace(' ', "%20")
        )
    }

    /// Upstream request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Replace the listen address, e.g. from a CLI flag.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Switch JSON logging on.
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}
