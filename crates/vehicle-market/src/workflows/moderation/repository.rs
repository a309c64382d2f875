use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::domain::{ModerationRecord, RecordId};
use crate::workflows::listing::ListingId;

/// Storage for moderation records. Records are appended and updated, never removed.
pub trait ModerationRepository: Send + Sync {
    /// Stores every record or none of them.
    fn insert_many(&self, records: Vec<ModerationRecord>) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<ModerationRecord>, RepositoryError>;
    fn update(&self, record: ModerationRecord) -> Result<(), RepositoryError>;
    fn for_listing(&self, listing_id: &ListingId) -> Result<Vec<ModerationRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<ModerationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record {0} already exists")]
    Conflict(RecordId),
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Insertion-ordered, process-local record list.
#[derive(Default, Clone)]
pub struct InMemoryModerationRepository {
    records: Arc<Mutex<Vec<ModerationRecord>>>,
}

impl ModerationRepository for InMemoryModerationRepository {
    fn insert_many(&self, records: Vec<ModerationRecord>) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let mut seen: HashSet<&RecordId> = guard.iter().map(|record| &record.id).collect();
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(RepositoryError::Conflict(record.id.clone()));
            }
        }
        guard.extend(records);
        Ok(())
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<ModerationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn update(&self, record: ModerationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(record.id)),
        }
    }

    fn for_listing(&self, listing_id: &ListingId) -> Result<Vec<ModerationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.listing_id == listing_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<ModerationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}
