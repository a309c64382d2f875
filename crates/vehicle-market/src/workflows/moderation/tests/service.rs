use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Duration;

use super::common::*;
use crate::workflows::listing::{ListingId, VehicleCategory};
use crate::workflows::moderation::{
    ModerationError, OverallStatus, RecordId, RepositoryError, ReviewStatus,
};
use crate::workflows::photos::PhotoCategory;

fn record_id(listing: usize, index: usize) -> RecordId {
    RecordId::for_photo(&ListingId(format!("veh-{listing:06}")), index)
}

#[test]
fn records_open_pending_for_each_photo_with_its_category() {
    let (service, _) = build_service(vec![civic()]);

    let records = service
        .create_records_for_listing(&civic())
        .expect("records created");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.0, "veh-000001-photo-0");
    assert_eq!(records[1].category, PhotoCategory::Left);
    assert!(records
        .iter()
        .all(|record| record.status == ReviewStatus::Pending && record.uploaded_at == instant()));
    assert_eq!(
        records[0].photo_url,
        "https://cdn.example.com/1/0.jpg".to_string()
    );
}

#[test]
fn records_are_not_duplicated_or_opened_without_photos() {
    let (service, _) = build_service(fleet());
    service
        .create_records_for_listing(&civic())
        .expect("first pass");

    let again = service
        .create_records_for_listing(&civic())
        .expect("second pass");
    let photoless = listing(4, VehicleCategory::Cars, "Tesla", "Model 3", "Dana Lee", 0);
    let none = service
        .create_records_for_listing(&photoless)
        .expect("no photos");

    assert!(again.is_empty());
    assert!(none.is_empty());
    assert_eq!(service.reviews().expect("reviews").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn approve_records_reviewer_and_time() {
    let (service, clock) = seeded_service();
    clock.advance(Duration::minutes(5));

    let record = service
        .approve(&record_id(2, 1), "Jordan")
        .await
        .expect("approved");

    assert_eq!(record.status, ReviewStatus::Approved);
    assert_eq!(record.reviewed_by.as_deref(), Some("Jordan"));
    assert_eq!(record.reviewed_at, Some(instant() + Duration::minutes(5)));
    assert_eq!(service.record(&record_id(2, 1)).expect("stored"), record);
}

#[tokio::test(start_paused = true)]
async fn reject_with_blank_reason_leaves_the_record_pending() {
    let (service, _) = seeded_service();

    let error = service
        .reject(&record_id(1, 0), "Jordan", "   ")
        .await
        .expect_err("reason required");

    assert!(matches!(error, ModerationError::MissingReason));
    assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let stored = service.record(&record_id(1, 0)).expect("stored");
    assert_eq!(stored.status, ReviewStatus::Pending);
    assert!(stored.reviewed_by.is_none());
}

#[tokio::test(start_paused = true)]
async fn reject_stores_the_trimmed_reason() {
    let (service, _) = seeded_service();

    let record = service
        .reject(&record_id(1, 1), "Jordan", "  Blurry  ")
        .await
        .expect("rejected");

    assert_eq!(record.status, ReviewStatus::Rejected);
    assert_eq!(record.rejection_reason.as_deref(), Some("Blurry"));
}

#[tokio::test(start_paused = true)]
async fn unknown_records_are_reported() {
    let (service, _) = seeded_service();

    let error = service
        .approve(&RecordId("veh-999999-photo-0".to_string()), "Jordan")
        .await
        .expect_err("missing record");

    assert!(matches!(error, ModerationError::RecordNotFound(_)));
    assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn concurrent_actions_on_one_record_are_refused() {
    let (service, _) = seeded_service();
    let id = record_id(3, 0);

    let (first, second) = tokio::join!(
        service.approve(&id, "Jordan"),
        service.reject(&id, "Casey", "Wrong angle"),
    );

    assert_eq!(first.expect("first action wins").status, ReviewStatus::Approved);
    let error = second.expect_err("second action refused");
    assert!(matches!(error, ModerationError::RecordBusy(_)));
    assert_eq!(error.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        service.record(&id).expect("stored").status,
        ReviewStatus::Approved
    );
}

#[tokio::test(start_paused = true)]
async fn record_is_processing_until_the_action_resolves() {
    let (service, _) = seeded_service();
    let id = record_id(2, 0);

    let task = {
        let service = Arc::clone(&service);
        let id = id.clone();
        tokio::spawn(async move { service.approve(&id, "Jordan").await })
    };
    tokio::task::yield_now().await;
    assert!(service.is_processing(&id));

    task.await.expect("task joined").expect("approved");
    assert!(!service.is_processing(&id));
}

#[tokio::test(start_paused = true)]
async fn decisions_can_be_revisited() {
    let (service, _) = seeded_service();
    let id = record_id(1, 0);

    service
        .reject(&id, "Jordan", "Too dark")
        .await
        .expect("rejected");
    let record = service.approve(&id, "Casey").await.expect("approved");

    assert_eq!(record.status, ReviewStatus::Approved);
    assert_eq!(record.reviewed_by.as_deref(), Some("Casey"));
    assert!(record.rejection_reason.is_none());
}

#[tokio::test(start_paused = true)]
async fn civic_with_one_approval_and_one_rejection_is_partial() {
    let (service, clock) = seeded_service();

    service
        .approve(&record_id(1, 0), "Jordan")
        .await
        .expect("approved");
    service
        .reject(&record_id(1, 1), "Jordan", "Blurry")
        .await
        .expect("rejected");

    let review = service
        .review_for(&ListingId("veh-000001".to_string()))
        .expect("lookup")
        .expect("civic under review");
    assert_eq!(review.overall_status, OverallStatus::Partial);
    assert_eq!(
        (review.approved_count, review.rejected_count, review.pending_count),
        (1, 1, 0)
    );

    let stats = service.stats().expect("stats");
    assert_eq!(stats.total_vehicles, 3);
    assert_eq!(stats.approved_today, 1);
    assert_eq!(stats.rejected_today, 1);
    assert_eq!(stats.total_photos, 6);
    assert_eq!(stats.pending_photos, 4);
    assert_eq!(stats.pending_approval, 4);

    clock.set(instant() + Duration::days(1));
    let next_day = service.stats().expect("stats");
    assert_eq!((next_day.approved_today, next_day.rejected_today), (0, 0));
    assert_eq!(next_day.pending_approval, 4);
}

#[test]
fn queue_uses_configured_page_size() {
    let (service, _) = seeded_service();

    let queue = service.queue().expect("queue");

    assert_eq!(queue.page_size(), 10);
    assert_eq!(queue.filtered_count(), 3);
}

#[test]
fn catalog_failures_surface_as_server_errors() {
    let service = unavailable_service();

    let error = service.reviews().expect_err("catalog offline");

    assert!(matches!(error, ModerationError::Catalog(_)));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn repository_not_found_maps_to_not_found() {
    let error = ModerationError::Repository(RepositoryError::NotFound(record_id(1, 0)));

    assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
}
