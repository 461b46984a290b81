//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use hydrocheck::domain::EmptyLookupPolicy;
use hydrocheck::inbound::http::session_config::SessionSettings;
use hydrocheck::inbound::http::state::Repositories;

/// Everything `create_server` needs, assembled by `main`.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repositories: Repositories,
    pub(crate) lookup_policy: EmptyLookupPolicy,
}

impl ServerConfig {
    /// Combine session settings, listen address, and storage.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        repositories: Repositories,
    ) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            repositories,
            lookup_policy: EmptyLookupPolicy::Fallback,
        }
    }

    /// Choose what an empty water lookup returns.
    #[must_use]
    pub fn with_lookup_policy(mut self, policy: EmptyLookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }
}
