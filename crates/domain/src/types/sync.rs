//! Sync run lifecycle types

use serde::{Deserialize, Serialize};

use crate::errors::AdSyncError;
use crate::impl_domain_status_conversions;

/// Entity type a sync run reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncEntity {
    AdAccounts,
    Campaigns,
}

impl_domain_status_conversions!(SyncEntity {
    AdAccounts => "ad_accounts",
    Campaigns => "campaigns",
});

impl SyncEntity {
    /// Plural noun used in human-readable summaries.
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::AdAccounts => "ad accounts",
            Self::Campaigns => "campaigns",
        }
    }
}

/// Phase of a single sync invocation.
///
/// ```text
/// Idle --invoke--> Fetching --ok--> Reconciling --ok--> Done
///                  Fetching --err--> Failed
///                               Reconciling --err--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    Fetching,
    Reconciling,
    Done,
    Failed,
}

impl_domain_status_conversions!(SyncPhase {
    Idle => "idle",
    Fetching => "fetching",
    Reconciling => "reconciling",
    Done => "done",
    Failed => "failed",
});

impl SyncPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether `next` is a legal transition from this phase.
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Fetching)
                | (Self::Fetching, Self::Reconciling | Self::Failed)
                | (Self::Reconciling, Self::Done | Self::Failed)
        )
    }
}

/// Counts produced by a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub entity: SyncEntity,
    /// Records in the upstream page.
    pub fetched: usize,
    /// Rows written by the upsert.
    pub upserted: usize,
    /// Malformed records skipped by the transformer.
    pub skipped: usize,
}

impl SyncReport {
    /// Human-readable summary returned to the caller.
    pub fn summary(&self) -> String {
        let mut message = format!("Successfully synced {} {}", self.upserted, self.entity.noun());
        if self.skipped > 0 {
            message.push_str(&format!(" ({} malformed records skipped)", self.skipped));
        }
        message
    }
}

/// Terminal state of a sync invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Done(SyncReport),
    Failed {
        entity: SyncEntity,
        /// Phase that was active when the error occurred.
        during: SyncPhase,
        error: AdSyncError,
    },
}

impl SyncOutcome {
    pub const fn phase(&self) -> SyncPhase {
        match self {
            Self::Done(_) => SyncPhase::Done,
            Self::Failed { .. } => SyncPhase::Failed,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Record count on success, error detail on failure.
    pub fn summary(&self) -> String {
        match self {
            Self::Done(report) => report.summary(),
            Self::Failed { error, .. } => error.to_string(),
        }
    }

    pub fn into_result(self) -> Result<SyncReport, AdSyncError> {
        match self {
            Self::Done(report) => Ok(report),
            Self::Failed { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        assert!(SyncPhase::Idle.can_transition_to(SyncPhase::Fetching));
        assert!(SyncPhase::Fetching.can_transition_to(SyncPhase::Reconciling));
        assert!(SyncPhase::Fetching.can_transition_to(SyncPhase::Failed));
        assert!(SyncPhase::Reconciling.can_transition_to(SyncPhase::Done));
        assert!(SyncPhase::Reconciling.can_transition_to(SyncPhase::Failed));
    }

    #[test]
    fn illegal_transitions() {
        assert!(!SyncPhase::Idle.can_transition_to(SyncPhase::Done));
        assert!(!SyncPhase::Fetching.can_transition_to(SyncPhase::Done));
        assert!(!SyncPhase::Done.can_transition_to(SyncPhase::Fetching));
        assert!(!SyncPhase::Failed.can_transition_to(SyncPhase::Idle));
        assert!(SyncPhase::Done.is_terminal());
        assert!(!SyncPhase::Reconciling.is_terminal());
    }

    #[test]
    fn summary_mentions_skipped_only_when_present() {
        let clean =
            SyncReport { entity: SyncEntity::AdAccounts, fetched: 3, upserted: 3, skipped: 0 };
        assert_eq!(clean.summary(), "Successfully synced 3 ad accounts");

        let partial =
            SyncReport { entity: SyncEntity::Campaigns, fetched: 5, upserted: 4, skipped: 1 };
        assert_eq!(
            partial.summary(),
            "Successfully synced 4 campaigns (1 malformed records skipped)"
        );
    }

    #[test]
    fn failed_outcome_summary_is_error_text() {
        let outcome = SyncOutcome::Failed {
            entity: SyncEntity::Campaigns,
            during: SyncPhase::Fetching,
            error: AdSyncError::MissingCredential,
        };
        assert_eq!(outcome.phase(), SyncPhase::Failed);
        assert_eq!(outcome.summary(), "Missing access token");
        assert!(outcome.into_result().is_err());
    }
}
