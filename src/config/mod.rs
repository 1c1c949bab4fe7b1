//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `JUDGMENT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{DEFAULT_ID_FIELD, DEFAULT_INDEX_NAME};

/// Server and client configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JUDGMENT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the ratings API used by [`HttpPersistence`](crate::persistence::HttpPersistence).
    /// Default: `http://127.0.0.1:8080/api`.
    pub api_base_url: String,

    /// Per-request timeout of the persistence client. Default: 30 seconds.
    pub request_timeout: Duration,

    /// Index name exported in RRE documents when a case has none.
    pub default_index: String,

    /// `id_field` of exported RRE documents. Default: `id`.
    pub rre_id_field: String,
}

/// Default API base URL used when `JUDGMENT_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Default persistence request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            default_index: DEFAULT_INDEX_NAME.to_string(),
            rre_id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "JUDGMENT_PORT";
    const ENV_BIND_ADDR: &'static str = "JUDGMENT_BIND_ADDR";
    const ENV_API_BASE_URL: &'static str = "JUDGMENT_API_BASE_URL";
    const ENV_REQUEST_TIMEOUT: &'static str = "JUDGMENT_REQUEST_TIMEOUT_SECS";
    const ENV_DEFAULT_INDEX: &'static str = "JUDGMENT_DEFAULT_INDEX";
    const ENV_RRE_ID_FIELD: &'static str = "JUDGMENT_RRE_ID_FIELD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let api_base_url =
            Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let request_timeout = Self::parse_timeout_from_env(defaults.request_timeout)?;
        let default_index =
            Self::parse_string_from_env(Self::ENV_DEFAULT_INDEX, defaults.default_index);
        let rre_id_field =
            Self::parse_string_from_env(Self::ENV_RRE_ID_FIELD, defaults.rre_id_field);

        Ok(Self {
            port,
            bind_addr,
            api_base_url,
            request_timeout,
            default_index,
            rre_id_field,
        })
    }

    /// Checks the URL scheme and that export names are not blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.api_base_url.clone(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".to_string(),
            });
        }

        if self.default_index.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_DEFAULT_INDEX,
            });
        }

        if self.rre_id_field.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_RRE_ID_FIELD,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_REQUEST_TIMEOUT) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
