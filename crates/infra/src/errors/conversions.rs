//! Conversions from external infrastructure errors into domain errors.

use adsync_domain::AdSyncError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AdSyncError);

impl From<InfraError> for AdSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AdSyncError> for InfraError {
    fn from(value: AdSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAdSyncError {
    fn into_adsync(self) -> AdSyncError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → AdSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAdSyncError for SqlError {
    fn into_adsync(self) -> AdSyncError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            // SQLITE_CONSTRAINT_FOREIGNKEY
            RE::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation && err.extended_code == 787 =>
            {
                AdSyncError::OrphanRecord(
                    message.unwrap_or_else(|| "FOREIGN KEY constraint failed".into()),
                )
            }
            // Store errors surface verbatim.
            other => AdSyncError::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_adsync())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → AdSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAdSyncError for r2d2::Error {
    fn into_adsync(self) -> AdSyncError {
        AdSyncError::PersistenceFailure(format!("connection pool: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_adsync())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AdSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAdSyncError for HttpError {
    fn into_adsync(self) -> AdSyncError {
        if self.is_timeout() {
            return AdSyncError::UpstreamUnavailable("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AdSyncError::UpstreamUnavailable(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return AdSyncError::UpstreamUnavailable(format!(
                "upstream response is not valid JSON: {self}"
            ));
        }

        if let Some(status) = self.status() {
            return AdSyncError::UpstreamUnavailable(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        AdSyncError::UpstreamUnavailable(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_adsync())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → AdSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAdSyncError for JoinError {
    fn into_adsync(self) -> AdSyncError {
        AdSyncError::Internal(format!("blocking task failed: {self}"))
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_adsync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
