//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_POOL_SIZE: u32 = 10;

/// Process-level settings read from `HYDROCHECK_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HYDROCHECK")]
pub struct ServerSettings {
    /// Listen address; `0.0.0.0:8080` when unset.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without it the server runs on in-memory stores.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
    /// Serve synthetic rows for postal codes without measurements.
    #[ortho_config(default = true)]
    pub mock_fallback: bool,
}

impl ServerSettings {
    /// Configured listen address or the default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR))
    }

    /// Configured pool size or the default.
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
