//! Where the client connects to.
//!
//! Values come from the environment (a `.env` file is honored by the
//! binaries through `dotenv`) and fall back to the store defaults. Command
//! line flags override them.

use std::env;

use crate::consts::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::StoreConfigError;

pub const HOST_ENV: &str = "STORE_HOST";
pub const PORT_ENV: &str = "STORE_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl StoreConfig {
    /// Reads `STORE_HOST` and `STORE_PORT`.
    pub fn from_env() -> Result<StoreConfig, StoreConfigError> {
        Self::from_vars(env::var(HOST_ENV).ok(), env::var(PORT_ENV).ok())
    }

    fn from_vars(
        host: Option<String>,
        port: Option<String>,
    ) -> Result<StoreConfig, StoreConfigError> {
        let mut config = StoreConfig::default();

        if let Some(host) = host.filter(|host| !host.is_empty()) {
            config.host = host;
        }
        if let Some(port) = port {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| StoreConfigError::InvalidPort(port, PORT_ENV))?;
        }

        Ok(config)
    }

    /// `host:port`, the form `client::connect` expects.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_store() {
        let config = StoreConfig::from_vars(None, None).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:6379");
    }

    #[test]
    fn reads_overrides() {
        let config = StoreConfig::from_vars(Some("cache.local".into()), Some(" 7000".into())).unwrap();
        assert_eq!(config.addr(), "cache.local:7000");
    }

    #[test]
    fn rejects_bad_port() {
        assert_eq!(
            StoreConfig::from_vars(None, Some("seventy".into())),
            Err(StoreConfigError::InvalidPort("seventy".into(), PORT_ENV))
        );
    }
}
