use crate::models::LinkRecord;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short code already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a record unless its short code is already present.
    ///
    /// The presence check and the insert are a single atomic step: of two
    /// concurrent inserts with the same code, exactly one succeeds and the
    /// other gets [`StorageError::Conflict`].
    async fn insert(&self, record: LinkRecord) -> StorageResult<LinkRecord>;

    /// Get a record by short code without touching its click count
    async fn get(&self, short_code: &str) -> Result<Option<LinkRecord>>;

    /// Atomically add one click and return the updated record,
    /// or `None` if the code is unknown
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<LinkRecord>>;
}
