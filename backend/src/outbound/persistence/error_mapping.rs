//! Translation of pool and Diesel failures into port errors.
//!
//! Every repository port distinguishes connectivity problems (surfaced as
//! `503`) from query failures (`500`). Raw driver messages are logged at
//! debug level and replaced with stable summaries.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    FilterProductRepositoryError, UserScanRepositoryError, WaterQualityRepositoryError,
};

use super::pool::PoolError;

/// Port error with connection and query variants.
pub(crate) trait RepositoryError: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;
}

macro_rules! impl_repository_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl RepositoryError for $error {
                fn connection(message: String) -> Self {
                    <$error>::connection(message)
                }

                fn query(message: String) -> Self {
                    <$error>::query(message)
                }
            }
        )+
    };
}

impl_repository_error!(
    WaterQualityRepositoryError,
    FilterProductRepositoryError,
    UserScanRepositoryError,
);

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E: RepositoryError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::connection(message)
}

pub(crate) fn map_diesel_error<E: RepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            E::connection("database connection error".to_owned())
        }
        DieselError::NotFound => E::query("record not found".to_owned()),
        DieselError::DeserializationError(_) => E::query("row decoding failed".to_owned()),
        _ => E::query("database error".to_owned()),
    }
}

/// Row conversion failures are query errors.
pub(crate) fn map_row_error<E: RepositoryError>(message: String) -> E {
    E::query(format!("invalid stored row: {message}"))
}
