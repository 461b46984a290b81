//! Saved postal-code searches of authenticated users.

use crate::domain::UserId;

pub use water_contract::UserScanRecord as UserScan;

/// Scan awaiting insertion. The store assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserScan {
    /// Owner of the scan, taken from the session.
    pub user_id: UserId,
    /// Searched postal code.
    pub plz: String,
    /// Whether the scan is pinned.
    pub is_saved: bool,
}
