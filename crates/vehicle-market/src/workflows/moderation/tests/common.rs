use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::clock::FixedClock;
use crate::workflows::listing::{
    CatalogError, InMemoryListingCatalog, Listing, ListingCatalog, ListingDraft, ListingId,
    ListingPhoto, VehicleCategory,
};
use crate::workflows::moderation::{
    aggregate, InMemoryModerationRepository, ModerationRecord, ModerationService,
    ModerationSettings, ReviewStatus, VehicleReviewAggregate,
};
use crate::workflows::photos::PhotoCategory;

pub(super) type MemoryService = ModerationService<InMemoryListingCatalog, InMemoryModerationRepository>;

pub(super) fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn settings() -> ModerationSettings {
    ModerationSettings {
        review_latency: Duration::from_millis(500),
        page_size: 10,
        reviewer: "Current Admin".to_string(),
    }
}

pub(super) fn listing(
    number: usize,
    category: VehicleCategory,
    make: &str,
    model: &str,
    seller_name: &str,
    photo_count: usize,
) -> Listing {
    Listing {
        id: ListingId(format!("veh-{number:06}")),
        category,
        make: make.to_string(),
        model: model.to_string(),
        year: 2020,
        price: 18_500,
        mileage: 30_000,
        seller_name: seller_name.to_string(),
        seller_contact: "seller@example.com".to_string(),
        location: "Denver, CO".to_string(),
        description: String::new(),
        photos: ListingPhoto::positional(
            (0..photo_count).map(|index| format!("https://cdn.example.com/{number}/{index}.jpg")),
        ),
        date_posted: instant(),
    }
}

pub(super) fn civic() -> Listing {
    listing(1, VehicleCategory::Cars, "Honda", "Civic", "Sarah Johnson", 2)
}

pub(super) fn fleet() -> Vec<Listing> {
    vec![
        civic(),
        listing(2, VehicleCategory::Bikes, "Ducati", "Monster", "Marco Rossi", 3),
        listing(3, VehicleCategory::Commercial, "Ford", "Transit", "Fleet Sales", 1),
        listing(4, VehicleCategory::Cars, "Tesla", "Model 3", "Dana Lee", 0),
    ]
}

pub(super) fn build_service(listings: Vec<Listing>) -> (Arc<MemoryService>, FixedClock) {
    let clock = FixedClock::new(instant());
    let catalog = InMemoryListingCatalog::with_listings(listings, Arc::new(clock.clone()));
    let service = ModerationService::new(
        Arc::new(catalog),
        Arc::new(InMemoryModerationRepository::default()),
        Arc::new(clock.clone()),
        settings(),
    );
    (Arc::new(service), clock)
}

/// Service whose catalog already has records opened for every listing with photos.
pub(super) fn seeded_service() -> (Arc<MemoryService>, FixedClock) {
    let (service, clock) = build_service(fleet());
    for listing in fleet() {
        service
            .create_records_for_listing(&listing)
            .expect("records created");
    }
    (service, clock)
}

/// Aggregate for a synthetic listing whose photos carry `statuses` in order.
pub(super) fn review_with(listing: Listing, statuses: &[ReviewStatus]) -> VehicleReviewAggregate {
    let records: Vec<ModerationRecord> = statuses
        .iter()
        .enumerate()
        .map(|(index, status)| {
            let photo = ListingPhoto::new(
                format!("https://cdn.example.com/{index}.jpg"),
                PhotoCategory::from_index(index),
            );
            let mut record = ModerationRecord::pending(&listing.id, index, &photo, instant());
            match status {
                ReviewStatus::Pending => {}
                ReviewStatus::Approved => record.approve("Reviewer", instant()),
                ReviewStatus::Rejected => record.reject("Reviewer", "Blurry", instant()),
            }
            record
        })
        .collect();
    aggregate(&listing, &records).expect("at least one status")
}

pub(super) struct UnavailableCatalog;

impl ListingCatalog for UnavailableCatalog {
    fn listings(&self) -> Result<Vec<Listing>, CatalogError> {
        Err(CatalogError::Unavailable("inventory offline".to_string()))
    }

    fn get(&self, _id: &ListingId) -> Result<Option<Listing>, CatalogError> {
        Err(CatalogError::Unavailable("inventory offline".to_string()))
    }

    fn register_listing(&self, _draft: ListingDraft) -> Result<Listing, CatalogError> {
        Err(CatalogError::Unavailable("inventory offline".to_string()))
    }
}

pub(super) fn unavailable_service() -> ModerationService<UnavailableCatalog, InMemoryModerationRepository> {
    ModerationService::new(
        Arc::new(UnavailableCatalog),
        Arc::new(InMemoryModerationRepository::default()),
        Arc::new(FixedClock::new(instant())),
        settings(),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
