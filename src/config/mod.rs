// Configuration module entry point
// Loads layered configuration and builds the immutable serving state

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Config file used when `DEVSERVE_CONFIG` is not set (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "devserve";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "DEVSERVE_CONFIG";

impl Config {
    /// Load configuration from the path in `DEVSERVE_CONFIG`, or `devserve.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Missing files are fine; environment variables such as
    /// `DEVSERVE_SERVER__PORT` override file values.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DEVSERVE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.keep_alive", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "default")?
            .set_default("http.escape_not_found_path", false)?
            .build()?;

        settings.try_deserialize()
    }

    /// Listen address; `host` may be IPv4 or IPv6 (`::`)
    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|source| StartupError::InvalidAddress {
                addr: self.server.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
