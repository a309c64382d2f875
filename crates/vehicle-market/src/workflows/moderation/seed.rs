use chrono::Duration;
use rand::Rng;
use tracing::info;

use super::domain::{ModerationRecord, ReviewStatus};
use super::repository::ModerationRepository;
use super::service::{ModerationError, ModerationService};
use crate::workflows::listing::ListingCatalog;

pub const DEMO_REVIEWER: &str = "Admin User";

pub const REJECTION_REASONS: [&str; 8] = [
    "Poor image quality",
    "Inappropriate content",
    "Not a vehicle photo",
    "Blurry or unclear",
    "Wrong angle",
    "Contains personal information",
    "Duplicate image",
    "Too dark or overexposed",
];

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Backfills review history for catalog listings that have photos but no records:
/// uploads spread over the past week, roughly 30% pending, 60% approved, 10% rejected.
/// Returns the number of records created.
pub fn seed_demo_reviews<C, R, G>(
    service: &ModerationService<C, R>,
    rng: &mut G,
) -> Result<usize, ModerationError>
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
    G: Rng,
{
    let now = service.now();
    let existing = service.reviews()?;
    let mut records = Vec::new();

    for listing in service.catalog().listings()? {
        if existing.iter().any(|review| review.listing.id == listing.id) {
            continue;
        }
        for (index, photo) in listing.photos.iter().enumerate() {
            let uploaded_at = now - Duration::milliseconds(rng.random_range(0..WEEK_MS));
            let mut record = ModerationRecord::pending(&listing.id, index, photo, uploaded_at);
            let reviewed_at =
                (uploaded_at + Duration::milliseconds(rng.random_range(0..DAY_MS))).min(now);

            match demo_status(rng) {
                ReviewStatus::Pending => {}
                ReviewStatus::Approved => record.approve(DEMO_REVIEWER, reviewed_at),
                ReviewStatus::Rejected => {
                    let reason = REJECTION_REASONS[rng.random_range(0..REJECTION_REASONS.len())];
                    record.reject(DEMO_REVIEWER, reason, reviewed_at);
                }
            }
            records.push(record);
        }
    }

    let created = records.len();
    service.import_records(records)?;
    info!(records = created, "demo moderation history seeded");
    Ok(created)
}

fn demo_status<G: Rng>(rng: &mut G) -> ReviewStatus {
    let roll: f64 = rng.random();
    if roll < 0.3 {
        ReviewStatus::Pending
    } else if roll < 0.9 {
        ReviewStatus::Approved
    } else {
        ReviewStatus::Rejected
    }
}
