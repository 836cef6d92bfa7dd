//! Per-entity outcomes and the run-wide report.
//!
//! Every processed project and every organization considered for cleanup
//! ends in exactly one [`ActionOutcome`], appended once to a [`RunReport`].
//! The report only grows; its summary is the sole source of the counts
//! shown to the operator.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use bulk_delete_models::{Organization, Project};
use tracing::warn;

use crate::directory::DirectoryError;
use crate::filter::SkipReason;

/// Terminal state of one project or organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Not acted upon.
    Skipped(SkipReason),
    /// Deactivated (or would have been, in a dry run).
    Deactivated,
    /// Deleted (or would have been, in a dry run).
    Deleted,
    /// The directory rejected the mutation.
    Failed(DirectoryError),
}

impl ActionOutcome {
    /// The outcome bucket used for counting.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ActionOutcome::Skipped(_) => OutcomeKind::Skipped,
            ActionOutcome::Deactivated => OutcomeKind::Deactivated,
            ActionOutcome::Deleted => OutcomeKind::Deleted,
            ActionOutcome::Failed(_) => OutcomeKind::Failed,
        }
    }
}

/// Kind of entity an outcome is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Project,
    Organization,
}

impl EntityKind {
    /// Outcome buckets reported for this entity kind, in display order.
    pub fn outcome_kinds(&self) -> &'static [OutcomeKind] {
        match self {
            EntityKind::Project => &[
                OutcomeKind::Deactivated,
                OutcomeKind::Deleted,
                OutcomeKind::Failed,
                OutcomeKind::Skipped,
            ],
            EntityKind::Organization => &[OutcomeKind::Deleted, OutcomeKind::Failed],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "Projects"),
            EntityKind::Organization => write!(f, "Orgs"),
        }
    }
}

/// Outcome bucket without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeKind {
    Deactivated,
    Deleted,
    Failed,
    Skipped,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Deactivated => write!(f, "Deactivated"),
            OutcomeKind::Deleted => write!(f, "Deleted"),
            OutcomeKind::Failed => write!(f, "Failed"),
            OutcomeKind::Skipped => write!(f, "Skipped"),
        }
    }
}

/// One recorded entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntity {
    /// Directory id.
    pub id: String,
    /// Human-facing label (project display URL, org URL or slug).
    pub label: String,
    /// The outcome, with its reason or error.
    pub outcome: ActionOutcome,
}

/// Accumulated outcomes of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    entries: BTreeMap<(EntityKind, OutcomeKind), Vec<RecordedEntity>>,
    seen: HashSet<(EntityKind, String)>,
    interrupted: bool,
}

impl RunReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome.
    ///
    /// Returns false, leaving the report unchanged, when the entity was
    /// already recorded.
    pub fn record(
        &mut self,
        kind: EntityKind,
        id: impl Into<String>,
        label: impl Into<String>,
        outcome: ActionOutcome,
    ) -> bool {
        let id = id.into();
        if !self.seen.insert((kind, id.clone())) {
            warn!(kind = ?kind, id = %id, "Entity already recorded, ignoring");
            return false;
        }
        self.entries
            .entry((kind, outcome.kind()))
            .or_default()
            .push(RecordedEntity {
                id,
                label: label.into(),
                outcome,
            });
        true
    }

    /// Records a project outcome.
    pub fn record_project(&mut self, project: &Project, outcome: ActionOutcome) -> bool {
        self.record(
            EntityKind::Project,
            project.id.as_str(),
            project.display_url(),
            outcome,
        )
    }

    /// Records an organization outcome.
    pub fn record_organization(&mut self, org: &Organization, outcome: ActionOutcome) -> bool {
        self.record(EntityKind::Organization, org.id.as_str(), org.label(), outcome)
    }

    /// Entities recorded under a bucket, in recording order.
    pub fn entities(&self, kind: EntityKind, outcome: OutcomeKind) -> &[RecordedEntity] {
        self.entries
            .get(&(kind, outcome))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true when the entity has an outcome.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.seen.contains(&(kind, id.to_string()))
    }

    /// Marks the run as stopped by the operator.
    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    /// Returns true when the run was stopped early.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Counts per entity kind and outcome bucket.
    pub fn summarize(&self) -> RunSummary {
        let mut counts = BTreeMap::new();
        for kind in [EntityKind::Project, EntityKind::Organization] {
            for outcome in kind.outcome_kinds() {
                counts.insert((kind, *outcome), self.entities(kind, *outcome).len());
            }
        }
        // Buckets outside the display set still count.
        for ((kind, outcome), entities) in &self.entries {
            counts.insert((*kind, *outcome), entities.len());
        }
        RunSummary {
            counts,
            interrupted: self.interrupted,
        }
    }
}

/// Final counts of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    counts: BTreeMap<(EntityKind, OutcomeKind), usize>,
    interrupted: bool,
}

impl RunSummary {
    /// Count for one bucket.
    pub fn count(&self, kind: EntityKind, outcome: OutcomeKind) -> usize {
        self.counts.get(&(kind, outcome)).copied().unwrap_or(0)
    }

    /// Total recorded entities of a kind.
    pub fn total(&self, kind: EntityKind) -> usize {
        self.counts
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, n)| n)
            .sum()
    }

    /// Returns true when the run was stopped early.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// One `"<Kind> - <Outcome>: <count>"` line per bucket.
    pub fn lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|((kind, outcome), n)| format!("{} - {}: {}", kind, outcome, n))
            .collect()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
