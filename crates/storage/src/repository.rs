use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use survey_core::model::{CategoryResult, SessionHistory, SubmissionId, SubmissionRecord};
use thiserror::Error;

/// Errors surfaced by history backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// The latest submission and the one immediately before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestPair {
    pub latest: Option<SubmissionRecord>,
    pub previous: Option<SubmissionRecord>,
}

/// Repository contract for the append-only submission history.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append a submission. The backend assigns the next sequence id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_submission(
        &self,
        results: Vec<CategoryResult>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionRecord, StorageError>;

    /// Fetch a submission by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_submission(&self, id: SubmissionId) -> Result<SubmissionRecord, StorageError>;

    /// All submissions in submission order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn latest_pair(&self) -> Result<LatestPair, StorageError>;
}

/// Session-lifetime history. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    history: Arc<Mutex<SessionHistory>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: Arc::new(Mutex::new(SessionHistory::new())),
        }
    }

    fn with_history<T>(
        &self,
        f: impl FnOnce(&mut SessionHistory) -> T,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn append_submission(
        &self,
        results: Vec<CategoryResult>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionRecord, StorageError> {
        self.with_history(|history| history.append(results, submitted_at).clone())
    }

    async fn get_submission(&self, id: SubmissionId) -> Result<SubmissionRecord, StorageError> {
        self.with_history(|history| history.get(id).cloned())?
            .ok_or(StorageError::NotFound)
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        self.with_history(|history| history.records().to_vec())
    }

    async fn latest_pair(&self) -> Result<LatestPair, StorageError> {
        self.with_history(|history| LatestPair {
            latest: history.latest().cloned(),
            previous: history.previous().cloned(),
        })
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryRepository::new());
        Self { history }
    }
}
