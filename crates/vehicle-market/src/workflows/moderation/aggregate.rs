use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{ModerationRecord, OverallStatus, ReviewStatus};
use crate::workflows::listing::{Listing, ListingId};

/// Listing-level view derived from its moderation records. Never stored; rebuild it
/// whenever the records change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleReviewAggregate {
    pub listing: Listing,
    pub photos: Vec<ModerationRecord>,
    pub overall_status: OverallStatus,
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub total_photos: usize,
    pub last_updated: DateTime<Utc>,
}

/// Rolls individual review states up to a listing status. `None` for an empty set.
pub fn overall_status<I>(statuses: I) -> Option<OverallStatus>
where
    I: IntoIterator<Item = ReviewStatus>,
{
    let mut statuses = statuses.into_iter();
    let first = statuses.next()?;
    if statuses.all(|status| status == first) {
        Some(match first {
            ReviewStatus::Pending => OverallStatus::Pending,
            ReviewStatus::Approved => OverallStatus::Approved,
            ReviewStatus::Rejected => OverallStatus::Rejected,
        })
    } else {
        Some(OverallStatus::Partial)
    }
}

/// Builds the aggregate for `listing` from the records that belong to it. Listings
/// without records have no aggregate.
pub fn aggregate(listing: &Listing, records: &[ModerationRecord]) -> Option<VehicleReviewAggregate> {
    let photos: Vec<ModerationRecord> = records
        .iter()
        .filter(|record| record.listing_id == listing.id)
        .cloned()
        .collect();
    build(listing, photos)
}

/// Aggregates for every listing with records, in catalog order.
pub fn aggregate_all(listings: &[Listing], records: &[ModerationRecord]) -> Vec<VehicleReviewAggregate> {
    let mut by_listing: HashMap<&ListingId, Vec<ModerationRecord>> = HashMap::new();
    for record in records {
        by_listing
            .entry(&record.listing_id)
            .or_default()
            .push(record.clone());
    }

    listings
        .iter()
        .filter_map(|listing| {
            let photos = by_listing.remove(&listing.id)?;
            build(listing, photos)
        })
        .collect()
}

fn build(listing: &Listing, photos: Vec<ModerationRecord>) -> Option<VehicleReviewAggregate> {
    let overall_status = overall_status(photos.iter().map(|record| record.status))?;
    let count = |status: ReviewStatus| photos.iter().filter(|record| record.status == status).count();
    let pending_count = count(ReviewStatus::Pending);
    let approved_count = count(ReviewStatus::Approved);
    let rejected_count = count(ReviewStatus::Rejected);
    let last_updated = photos.iter().map(|record| record.uploaded_at).max()?;

    Some(VehicleReviewAggregate {
        listing: listing.clone(),
        total_photos: photos.len(),
        photos,
        overall_status,
        pending_count,
        approved_count,
        rejected_count,
        last_updated,
    })
}

/// Dashboard counters for the review team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModerationStats {
    /// Listings with at least one photo under moderation.
    pub total_vehicles: usize,
    /// Photos still waiting on a decision.
    pub pending_approval: usize,
    pub approved_today: usize,
    pub rejected_today: usize,
    pub total_photos: usize,
    pub pending_photos: usize,
}

impl ModerationStats {
    pub fn compute(reviews: &[VehicleReviewAggregate], today: NaiveDate) -> Self {
        let decided_today = |status: ReviewStatus| {
            reviews
                .iter()
                .flat_map(|review| review.photos.iter())
                .filter(|record| {
                    record.status == status
                        && record
                            .reviewed_at
                            .is_some_and(|at| at.date_naive() == today)
                })
                .count()
        };

        Self {
            total_vehicles: reviews.len(),
            pending_approval: reviews.iter().map(|review| review.pending_count).sum(),
            approved_today: decided_today(ReviewStatus::Approved),
            rejected_today: decided_today(ReviewStatus::Rejected),
            total_photos: reviews.iter().map(|review| review.total_photos).sum(),
            pending_photos: reviews.iter().map(|review| review.pending_count).sum(),
        }
    }
}
