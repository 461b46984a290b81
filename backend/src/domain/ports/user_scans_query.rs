//! Driving port for reading scan history.

use async_trait::async_trait;

use crate::domain::scans::UserScan;
use crate::domain::{Error, UserId};

/// Domain use-case port for listing a user's scans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserScansQuery: Send + Sync {
    /// Every scan owned by the authenticated user.
    async fn list_scans(&self, user_id: &UserId) -> Result<Vec<UserScan>, Error>;
}
