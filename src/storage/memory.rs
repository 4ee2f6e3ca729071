use crate::models::LinkRecord;
use crate::storage::{Storage, StorageError, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Process-local storage backed by a sharded concurrent map.
///
/// Every operation completes while holding at most one shard lock and never
/// across an await point.
#[derive(Default)]
pub struct MemoryStorage {
    links: DashMap<String, LinkRecord>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert(&self, record: LinkRecord) -> StorageResult<LinkRecord> {
        match self.links.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get(&self, short_code: &str) -> Result<Option<LinkRecord>> {
        Ok(self.links.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<LinkRecord>> {
        Ok(self.links.get_mut(short_code).map(|mut entry| {
            entry.clicks += 1;
            entry.value().clone()
        }))
    }
}
