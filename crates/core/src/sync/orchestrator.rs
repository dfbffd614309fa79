//! Sync run state machine
//!
//! One [`SyncRun`] lives for exactly one invocation; nothing is carried over
//! between runs.

use std::future::Future;

use adsync_domain::{AdSyncError, Result, SyncEntity, SyncOutcome, SyncPhase, SyncReport};
use tracing::debug;

/// Tracks the phase of a single sync invocation.
#[derive(Debug)]
pub struct SyncRun {
    entity: SyncEntity,
    phase: SyncPhase,
}

impl SyncRun {
    pub const fn new(entity: SyncEntity) -> Self {
        Self { entity, phase: SyncPhase::Idle }
    }

    pub const fn entity(&self) -> SyncEntity {
        self.entity
    }

    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Move to `next`, rejecting transitions the state machine does not allow.
    pub fn advance(&mut self, next: SyncPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(AdSyncError::Internal(format!(
                "illegal {} sync transition {} -> {}",
                self.entity, self.phase, next
            )));
        }

        debug!(entity = %self.entity, from = %self.phase, to = %next, "sync phase transition");
        self.phase = next;
        Ok(())
    }

    /// Finish successfully from `Reconciling`.
    pub fn complete(mut self, report: SyncReport) -> SyncOutcome {
        match self.advance(SyncPhase::Done) {
            Ok(()) => SyncOutcome::Done(report),
            Err(error) => SyncOutcome::Failed { entity: self.entity, during: self.phase, error },
        }
    }

    /// Finish with `error`, remembering which phase was active.
    pub fn fail(mut self, error: AdSyncError) -> SyncOutcome {
        let during = self.phase;
        if let Err(illegal) = self.advance(SyncPhase::Failed) {
            return SyncOutcome::Failed { entity: self.entity, during, error: illegal };
        }
        SyncOutcome::Failed { entity: self.entity, during, error }
    }

    /// Drive a full run: `fetch` while `Fetching`, then `reconcile` while
    /// `Reconciling`.
    pub async fn execute<T, F, R, RF>(mut self, fetch: F, reconcile: R) -> SyncOutcome
    where
        F: Future<Output = Result<T>>,
        R: FnOnce(T) -> RF,
        RF: Future<Output = Result<SyncReport>>,
    {
        if let Err(error) = self.advance(SyncPhase::Fetching) {
            return self.fail(error);
        }

        let fetched = match fetch.await {
            Ok(fetched) => fetched,
            Err(error) => return self.fail(error),
        };

        if let Err(error) = self.advance(SyncPhase::Reconciling) {
            return self.fail(error);
        }

        match reconcile(fetched).await {
            Ok(report) => self.complete(report),
            Err(error) => self.fail(error),
        }
    }
}
