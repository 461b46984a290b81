//! Driving port for recording scans.

use async_trait::async_trait;
use water_contract::CreateScanInput;

use crate::domain::scans::UserScan;
use crate::domain::{Error, UserId};

/// Domain use-case port for appending to a user's scan history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserScansCommand: Send + Sync {
    /// Record a scan for the authenticated user.
    ///
    /// Any identity carried in `request` is ignored in favour of `user_id`.
    async fn create_scan(
        &self,
        user_id: &UserId,
        request: &CreateScanInput,
    ) -> Result<UserScan, Error>;
}
