use std::time::Duration;

use adsync_domain::{AdSyncError, SyncEntity, SyncOutcome};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "adsync=info,adsync_server=info,tower_http=info";

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; `ADSYNC_LOG_FORMAT=json` switches to JSON lines.
/// Calling it twice is harmless, the second install is ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("ADSYNC_LOG_FORMAT").is_ok_and(|format| format == "json");

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a sync invocation with structured fields.
///
/// Only the entity, timing and a stable error label are recorded; request
/// payloads never reach this helper.
#[inline]
pub fn log_sync_execution(entity: SyncEntity, elapsed: Duration, outcome: &SyncOutcome) {
    let duration_ms = elapsed.as_millis() as u64;

    match outcome {
        SyncOutcome::Done(report) => info!(
            entity = %entity,
            duration_ms,
            fetched = report.fetched,
            upserted = report.upserted,
            skipped = report.skipped,
            "sync_execution_success"
        ),
        SyncOutcome::Failed { during, error, .. } => warn!(
            entity = %entity,
            duration_ms,
            during = %during,
            error_type = error_label(error),
            "sync_execution_failure"
        ),
    }
}

/// Convert an `AdSyncError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &AdSyncError) -> &'static str {
    match error {
        AdSyncError::MissingCredential => "missing_credential",
        AdSyncError::UpstreamUnavailable(_) => "upstream_unavailable",
        AdSyncError::InvalidUpstreamRecord(_) => "invalid_upstream_record",
        AdSyncError::OrphanRecord(_) => "orphan_record",
        AdSyncError::PersistenceFailure(_) => "persistence_failure",
        AdSyncError::Unauthorized(_) => "unauthorized",
        AdSyncError::InvalidInput(_) => "invalid_input",
        AdSyncError::Config(_) => "config",
        AdSyncError::Internal(_) => "internal",
    }
}
