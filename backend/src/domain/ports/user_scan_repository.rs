//! Driven port for per-user scan history.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::domain::UserId;
use crate::domain::scans::{NewUserScan, UserScan};

use super::define_port_error;

define_port_error! {
    /// Errors raised by scan history storage adapters.
    pub enum UserScanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user scan repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "user scan repository query failed: {message}",
    }
}

/// Port for reading and appending scan history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserScanRepository: Send + Sync {
    /// Return every scan owned by `user_id`, ordered by id.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserScan>, UserScanRepositoryError>;

    /// Persist a scan; the store assigns the id and `scanned_at`.
    async fn insert(&self, scan: &NewUserScan) -> Result<UserScan, UserScanRepositoryError>;
}

/// In-memory repository used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureUserScanRepository {
    rows: Mutex<Vec<UserScan>>,
}

#[async_trait]
impl UserScanRepository for FixtureUserScanRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserScan>, UserScanRepositoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| UserScanRepositoryError::query("fixture store poisoned"))?;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id.as_ref())
            .cloned()
            .collect())
    }

    async fn insert(&self, scan: &NewUserScan) -> Result<UserScan, UserScanRepositoryError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| UserScanRepositoryError::query("fixture store poisoned"))?;
        let id = i32::try_from(rows.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or_else(|| UserScanRepositoryError::query("fixture id space exhausted"))?;
        let stored = UserScan {
            id,
            user_id: scan.user_id.to_string(),
            plz: scan.plz.clone(),
            scanned_at: Utc::now(),
            is_saved: scan.is_saved,
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_scopes_scans_to_their_owner() {
        let repo = FixtureUserScanRepository::default();
        let alice = UserId::new("alice").expect("valid id");
        let bob = UserId::new("bob").expect("valid id");
        repo.insert(&NewUserScan {
            user_id: alice.clone(),
            plz: "10115".to_owned(),
            is_saved: false,
        })
        .await
        .expect("insert");

        assert_eq!(repo.find_by_user(&alice).await.expect("list").len(), 1);
        assert!(repo.find_by_user(&bob).await.expect("list").is_empty());
    }
}
