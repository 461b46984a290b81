//! Scan history service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use water_contract::CreateScanInput;

use crate::domain::ports::{
    UserScanRepository, UserScanRepositoryError, UserScansCommand, UserScansQuery,
};
use crate::domain::scans::{NewUserScan, UserScan};
use crate::domain::{Error, UserId};

/// Service implementing the scan history driving ports.
pub struct UserScanService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> UserScanService<R> {
    /// Create a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: UserScanRepositoryError) -> Error {
    match error {
        UserScanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("scan history unavailable: {message}"))
        }
        UserScanRepositoryError::Query { message } => {
            Error::internal(format!("scan history error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserScansCommand for UserScanService<R>
where
    R: UserScanRepository + ?Sized,
{
    async fn create_scan(
        &self,
        user_id: &UserId,
        request: &CreateScanInput,
    ) -> Result<UserScan, Error> {
        let scan = NewUserScan {
            user_id: user_id.clone(),
            plz: request.plz.clone(),
            is_saved: request.is_saved,
        };
        let stored = self
            .repo
            .insert(&scan)
            .await
            .map_err(map_repository_error)?;
        info!(scan_id = stored.id, plz = %stored.plz, "scan recorded");
        Ok(stored)
    }
}

#[async_trait]
impl<R> UserScansQuery for UserScanService<R>
where
    R: UserScanRepository + ?Sized,
{
    async fn list_scans(&self, user_id: &UserId) -> Result<Vec<UserScan>, Error> {
        self.repo
            .find_by_user(user_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserScanRepository;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn user_id() -> UserId {
        UserId::new("session-user").expect("valid id")
    }

    #[rstest]
    #[tokio::test]
    async fn create_uses_session_identity_not_body(user_id: UserId) {
        let mut repo = MockUserScanRepository::new();
        repo.expect_insert()
            .withf(|scan| scan.user_id.as_ref() == "session-user" && scan.is_saved)
            .times(1)
            .returning(|scan| {
                Ok(UserScan {
                    id: 1,
                    user_id: scan.user_id.to_string(),
                    plz: scan.plz.clone(),
                    scanned_at: Utc::now(),
                    is_saved: scan.is_saved,
                })
            });

        let request = CreateScanInput {
            plz: "10115".to_owned(),
            is_saved: true,
            user_id: Some("someone-else".to_owned()),
        };
        let stored = UserScanService::new(Arc::new(repo))
            .create_scan(&user_id, &request)
            .await
            .expect("scan stored");

        assert_eq!(stored.user_id, "session-user");
        assert_eq!(stored.plz, "10115");
    }

    #[rstest]
    #[case(UserScanRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserScanRepositoryError::query("constraint"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_repository_errors(
        user_id: UserId,
        #[case] failure: UserScanRepositoryError,
        #[case] code: ErrorCode,
    ) {
        let mut repo = MockUserScanRepository::new();
        repo.expect_find_by_user()
            .return_once(move |_| Err(failure));

        let err = UserScanService::new(Arc::new(repo))
            .list_scans(&user_id)
            .await
            .expect_err("failure");

        assert_eq!(err.code(), code);
    }
}
