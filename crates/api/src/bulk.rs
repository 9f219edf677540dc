//! Bulk fan-out
//!
//! Applies one field set to many records. Every target is updated through
//! the façade independently and concurrently; all targets settle before
//! the call returns, and one failure neither cancels nor rolls back its
//! siblings. Outcomes come back in input order.
//!
//! The futures are joined on the caller's task with
//! [`futures::future::join_all`]; nothing is spawned and concurrency is
//! not bounded.

use crate::facade::RecordAccess;
use futures::future::join_all;
use recordgate_core::{Error, FieldSet, Record};
use tracing::info;

/// One record addressed by a bulk update
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Collection the record belongs to
    pub collection: String,
    /// Record identity
    pub id: String,
}

impl Target {
    /// Address `id` in `collection`
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Target {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// Settled result for one target
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    /// The target this outcome belongs to
    pub target: Target,
    /// The updated record on success
    pub result: Result<Option<Record>, Error>,
}

impl TargetOutcome {
    /// Check if the update succeeded
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a fan-out, one per target in input order
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    /// Per-target outcomes
    pub outcomes: Vec<TargetOutcome>,
}

impl BulkOutcome {
    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes that succeeded
    pub fn succeeded(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Outcomes that failed
    pub fn failed(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when no target failed
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_success)
    }
}

impl RecordAccess {
    /// Update every target with `fields`
    ///
    /// Never fails as a whole; inspect the returned outcomes.
    pub async fn apply_to_many(&self, targets: &[Target], fields: &FieldSet) -> BulkOutcome {
        let updates = targets
            .iter()
            .map(|target| self.update(&target.collection, &target.id, fields));
        let outcomes: Vec<TargetOutcome> = join_all(updates)
            .await
            .into_iter()
            .zip(targets.iter().cloned())
            .map(|(result, target)| TargetOutcome { target, result })
            .collect();

        let outcome = BulkOutcome { outcomes };
        info!(
            target: "recordgate::bulk",
            targets = outcome.len(),
            failed = outcome.failed().count(),
            "Bulk update settled"
        );
        outcome
    }
}
