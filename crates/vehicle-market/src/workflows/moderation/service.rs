use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::aggregate::{aggregate, aggregate_all, ModerationStats, VehicleReviewAggregate};
use super::domain::{ModerationRecord, ModerationSettings, RecordId};
use super::queue::ModerationQueue;
use super::repository::{ModerationRepository, RepositoryError};
use crate::clock::Clock;
use crate::workflows::listing::{CatalogError, Listing, ListingCatalog, ListingId};

/// Service composing the listing catalog, record storage, and review actions.
pub struct ModerationService<C, R> {
    catalog: Arc<C>,
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    settings: ModerationSettings,
    in_flight: Mutex<HashSet<RecordId>>,
}

enum Decision<'a> {
    Approve,
    Reject { reason: &'a str },
}

/// Marks a record as processing until dropped.
struct InFlight<'a> {
    records: &'a Mutex<HashSet<RecordId>>,
    id: RecordId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.records
            .lock()
            .expect("in-flight mutex poisoned")
            .remove(&self.id);
    }
}

impl<C, R> ModerationService<C, R>
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    pub fn new(
        catalog: Arc<C>,
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        settings: ModerationSettings,
    ) -> Self {
        Self {
            catalog,
            repository,
            clock,
            settings,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Opens one pending record per photo of a newly registered listing. Listings
    /// without photos, or that already have records, are left alone.
    pub fn create_records_for_listing(
        &self,
        listing: &Listing,
    ) -> Result<Vec<ModerationRecord>, ModerationError> {
        if !listing.has_photos() {
            debug!(listing_id = %listing.id, "listing has no photos to moderate");
            return Ok(Vec::new());
        }
        if !self.repository.for_listing(&listing.id)?.is_empty() {
            debug!(listing_id = %listing.id, "listing already has moderation records");
            return Ok(Vec::new());
        }

        let submitted_at = self.clock.now();
        let records: Vec<ModerationRecord> = listing
            .photos
            .iter()
            .enumerate()
            .map(|(index, photo)| ModerationRecord::pending(&listing.id, index, photo, submitted_at))
            .collect();

        self.repository.insert_many(records.clone())?;
        info!(listing_id = %listing.id, photos = records.len(), "moderation records created");
        Ok(records)
    }

    /// Stores records built elsewhere, e.g. backdated demo data.
    pub fn import_records(&self, records: Vec<ModerationRecord>) -> Result<(), ModerationError> {
        self.repository.insert_many(records)?;
        Ok(())
    }

    pub fn record(&self, id: &RecordId) -> Result<ModerationRecord, ModerationError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ModerationError::RecordNotFound(id.clone()))
    }

    /// Whether an approve or reject call for `id` has not resolved yet.
    pub fn is_processing(&self, id: &RecordId) -> bool {
        self.in_flight
            .lock()
            .expect("in-flight mutex poisoned")
            .contains(id)
    }

    pub async fn approve(
        &self,
        id: &RecordId,
        reviewer: &str,
    ) -> Result<ModerationRecord, ModerationError> {
        self.review(id, reviewer, Decision::Approve).await
    }

    /// Rejects the photo. A blank reason is refused before anything changes.
    pub async fn reject(
        &self,
        id: &RecordId,
        reviewer: &str,
        reason: &str,
    ) -> Result<ModerationRecord, ModerationError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ModerationError::MissingReason);
        }
        self.review(id, reviewer, Decision::Reject { reason }).await
    }

    async fn review(
        &self,
        id: &RecordId,
        reviewer: &str,
        decision: Decision<'_>,
    ) -> Result<ModerationRecord, ModerationError> {
        self.record(id)?;
        let _claim = self.claim(id)?;

        tokio::time::sleep(self.settings.review_latency).await;

        let mut record = self.record(id)?;
        let reviewed_at = self.clock.now();
        match decision {
            Decision::Approve => record.approve(reviewer, reviewed_at),
            Decision::Reject { reason } => record.reject(reviewer, reason, reviewed_at),
        }
        self.repository.update(record.clone())?;

        info!(
            record_id = %record.id,
            listing_id = %record.listing_id,
            status = record.status.label(),
            reviewer,
            "photo reviewed"
        );
        Ok(record)
    }

    fn claim(&self, id: &RecordId) -> Result<InFlight<'_>, ModerationError> {
        let mut guard = self.in_flight.lock().expect("in-flight mutex poisoned");
        if !guard.insert(id.clone()) {
            return Err(ModerationError::RecordBusy(id.clone()));
        }
        Ok(InFlight {
            records: &self.in_flight,
            id: id.clone(),
        })
    }

    /// Fresh aggregates for every listing with records, in catalog order.
    pub fn reviews(&self) -> Result<Vec<VehicleReviewAggregate>, ModerationError> {
        let listings = self.catalog.listings()?;
        let records = self.repository.all()?;
        Ok(aggregate_all(&listings, &records))
    }

    pub fn review_for(
        &self,
        listing_id: &ListingId,
    ) -> Result<Option<VehicleReviewAggregate>, ModerationError> {
        let Some(listing) = self.catalog.get(listing_id)? else {
            return Ok(None);
        };
        let records = self.repository.for_listing(listing_id)?;
        Ok(aggregate(&listing, &records))
    }

    /// Queue over the current aggregates using the configured page size.
    pub fn queue(&self) -> Result<ModerationQueue, ModerationError> {
        Ok(ModerationQueue::new(self.reviews()?, self.settings.page_size))
    }

    pub fn stats(&self) -> Result<ModerationStats, ModerationError> {
        let reviews = self.reviews()?;
        Ok(ModerationStats::compute(
            &reviews,
            self.clock.now().date_naive(),
        ))
    }
}

/// Error raised by moderation operations.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("a rejection reason is required")]
    MissingReason,
    #[error("moderation record {0} not found")]
    RecordNotFound(RecordId),
    #[error("moderation record {0} is already being processed")]
    RecordBusy(RecordId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ModerationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ModerationError::MissingReason => StatusCode::UNPROCESSABLE_ENTITY,
            ModerationError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            ModerationError::RecordBusy(_) => StatusCode::CONFLICT,
            ModerationError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ModerationError::Repository(_) | ModerationError::Catalog(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
