use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryResult, SubmissionId};

/// One completed survey attempt. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    id: SubmissionId,
    submitted_at: DateTime<Utc>,
    results: Vec<CategoryResult>,
}

impl SubmissionRecord {
    #[must_use]
    pub fn id(&self) -> SubmissionId {
        self.id
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub fn results(&self) -> &[CategoryResult] {
        &self.results
    }
}

/// Append-only list of submissions for the running session.
///
/// Ids are assigned here, so they stay strictly increasing and gapless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionHistory {
    records: Vec<SubmissionRecord>,
}

impl SessionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record with `id = len + 1` and returns it.
    pub fn append(
        &mut self,
        results: Vec<CategoryResult>,
        submitted_at: DateTime<Utc>,
    ) -> &SubmissionRecord {
        let next = u32::try_from(self.records.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.records.push(SubmissionRecord {
            id: SubmissionId::new(next),
            submitted_at,
            results,
        });
        &self.records[self.records.len() - 1]
    }

    #[must_use]
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: SubmissionId) -> Option<&SubmissionRecord> {
        let index = (id.value() as usize).checked_sub(1)?;
        self.records.get(index)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&SubmissionRecord> {
        self.records.last()
    }

    /// The record submitted immediately before the latest one.
    #[must_use]
    pub fn previous(&self) -> Option<&SubmissionRecord> {
        self.records.len().checked_sub(2).map(|i| &self.records[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
