use chrono::{Duration, NaiveDate};

use super::common::*;
use crate::workflows::listing::VehicleCategory;
use crate::workflows::moderation::{
    aggregate, aggregate_all, overall_status, ModerationRecord, ModerationStats, OverallStatus,
    ReviewStatus,
};

const STATUSES: [ReviewStatus; 3] = [
    ReviewStatus::Pending,
    ReviewStatus::Approved,
    ReviewStatus::Rejected,
];

/// Every status sequence of length `len`, 3^len in total.
fn sequences(len: usize) -> Vec<Vec<ReviewStatus>> {
    (0..3_usize.pow(len as u32))
        .map(|mut code| {
            (0..len)
                .map(|_| {
                    let status = STATUSES[code % 3];
                    code /= 3;
                    status
                })
                .collect()
        })
        .collect()
}

#[test]
fn overall_status_of_an_empty_set_is_undefined() {
    assert_eq!(overall_status(Vec::<ReviewStatus>::new()), None);
}

#[test]
fn overall_status_follows_the_rollup_rule_for_every_multiset() {
    for len in 1..=6 {
        for statuses in sequences(len) {
            let expected = if statuses.iter().all(|s| *s == ReviewStatus::Pending) {
                OverallStatus::Pending
            } else if statuses.iter().all(|s| *s == ReviewStatus::Approved) {
                OverallStatus::Approved
            } else if statuses.iter().all(|s| *s == ReviewStatus::Rejected) {
                OverallStatus::Rejected
            } else {
                OverallStatus::Partial
            };

            assert_eq!(
                overall_status(statuses.iter().copied()),
                Some(expected),
                "statuses {statuses:?}"
            );
        }
    }
}

#[test]
fn aggregate_counts_always_sum_to_total() {
    for len in 1..=4 {
        for statuses in sequences(len) {
            let review = review_with(civic(), &statuses);
            assert_eq!(
                review.pending_count + review.approved_count + review.rejected_count,
                review.total_photos
            );
            assert_eq!(review.total_photos, len);
        }
    }
}

#[test]
fn aggregate_reports_mixed_decisions_as_partial() {
    let review = review_with(
        civic(),
        &[ReviewStatus::Approved, ReviewStatus::Rejected, ReviewStatus::Pending],
    );

    assert_eq!(review.overall_status, OverallStatus::Partial);
    assert_eq!(review.approved_count, 1);
    assert_eq!(review.rejected_count, 1);
    assert_eq!(review.pending_count, 1);
}

#[test]
fn aggregate_ignores_other_listings_and_tracks_latest_upload() {
    let civic = civic();
    let other = listing(9, VehicleCategory::Bikes, "Yamaha", "MT-07", "Ana", 1);
    let first = ModerationRecord::pending(&civic.id, 0, &civic.photos[0], instant());
    let later = instant() + Duration::hours(3);
    let second = ModerationRecord::pending(&civic.id, 1, &civic.photos[1], later);
    let foreign = ModerationRecord::pending(&other.id, 0, &other.photos[0], later + Duration::hours(1));

    let review = aggregate(&civic, &[first, foreign, second]).expect("civic has records");

    assert_eq!(review.total_photos, 2);
    assert_eq!(review.last_updated, later);
    assert!(review.photos.iter().all(|record| record.listing_id == civic.id));
}

#[test]
fn listings_without_records_have_no_aggregate() {
    let civic = civic();

    assert!(aggregate(&civic, &[]).is_none());
}

#[test]
fn aggregate_all_keeps_catalog_order() {
    let listings = fleet();
    let records: Vec<ModerationRecord> = listings
        .iter()
        .rev()
        .flat_map(|listing| {
            listing
                .photos
                .iter()
                .enumerate()
                .map(|(index, photo)| ModerationRecord::pending(&listing.id, index, photo, instant()))
                .collect::<Vec<_>>()
        })
        .collect();

    let reviews = aggregate_all(&listings, &records);

    let ids: Vec<&str> = reviews.iter().map(|review| review.listing.id.0.as_str()).collect();
    assert_eq!(ids, vec!["veh-000001", "veh-000002", "veh-000003"]);
}

#[test]
fn stats_count_todays_decisions_and_photos_awaiting_approval() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let mut mixed = review_with(
        civic(),
        &[
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
            ReviewStatus::Pending,
            ReviewStatus::Pending,
        ],
    );
    mixed.photos[1].reviewed_at = Some(instant() - Duration::days(2));
    let waiting = review_with(
        listing(2, VehicleCategory::Bikes, "Ducati", "Monster", "Marco", 2),
        &[ReviewStatus::Approved, ReviewStatus::Pending],
    );

    let stats = ModerationStats::compute(&[mixed, waiting], today);

    assert_eq!(
        stats,
        ModerationStats {
            total_vehicles: 2,
            pending_approval: 3,
            approved_today: 2,
            rejected_today: 0,
            total_photos: 6,
            pending_photos: 3,
        }
    );
}
