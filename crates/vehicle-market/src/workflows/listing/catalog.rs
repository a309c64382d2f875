use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::info;

use super::domain::{Listing, ListingDraft, ListingId};
use crate::clock::{Clock, SystemClock};

/// Read/append access to the vehicle inventory.
pub trait ListingCatalog: Send + Sync {
    fn listings(&self) -> Result<Vec<Listing>, CatalogError>;
    fn get(&self, id: &ListingId) -> Result<Option<Listing>, CatalogError>;
    /// Assigns the id and posting date, then stores the listing.
    fn register_listing(&self, draft: ListingDraft) -> Result<Listing, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Process-local inventory.
pub struct InMemoryListingCatalog {
    listings: Mutex<Vec<Listing>>,
    sequence: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl InMemoryListingCatalog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_listings(Vec::new(), clock)
    }

    pub fn with_listings(listings: Vec<Listing>, clock: Arc<dyn Clock>) -> Self {
        let next = listings.len() as u64 + 1;
        Self {
            listings: Mutex::new(listings),
            sequence: AtomicU64::new(next),
            clock,
        }
    }

    fn next_listing_id(&self) -> ListingId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ListingId(format!("veh-{id:06}"))
    }
}

impl Default for InMemoryListingCatalog {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ListingCatalog for InMemoryListingCatalog {
    fn listings(&self) -> Result<Vec<Listing>, CatalogError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn get(&self, id: &ListingId) -> Result<Option<Listing>, CatalogError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }

    fn register_listing(&self, draft: ListingDraft) -> Result<Listing, CatalogError> {
        let listing = Listing::from_draft(self.next_listing_id(), draft, self.clock.now());
        self.listings
            .lock()
            .expect("catalog mutex poisoned")
            .push(listing.clone());
        info!(listing_id = %listing.id, title = %listing.title(), "listing registered");
        Ok(listing)
    }
}
