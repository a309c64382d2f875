use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::aggregate::VehicleReviewAggregate;
use super::domain::RecordId;
use super::queue::{CategoryFilter, FilterParseError, ModerationQueue, QueueFilters, StatusFilter};
use super::repository::ModerationRepository;
use super::service::{ModerationError, ModerationService};
use crate::workflows::listing::{ListingCatalog, ListingId};

/// Router exposing the reviewer queue and review actions.
pub fn moderation_router<C, R>(service: Arc<ModerationService<C, R>>) -> Router
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    Router::new()
        .route("/api/v1/moderation/reviews", get(reviews_handler::<C, R>))
        .route(
            "/api/v1/moderation/reviews/:listing_id",
            get(review_handler::<C, R>),
        )
        .route(
            "/api/v1/moderation/records/:record_id/approve",
            post(approve_handler::<C, R>),
        )
        .route(
            "/api/v1/moderation/records/:record_id/reject",
            post(reject_handler::<C, R>),
        )
        .route("/api/v1/moderation/stats", get(stats_handler::<C, R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl ReviewQuery {
    fn filters(&self) -> Result<QueueFilters, FilterParseError> {
        Ok(QueueFilters {
            status: self
                .status
                .as_deref()
                .map(str::parse::<StatusFilter>)
                .transpose()?
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .map(str::parse::<CategoryFilter>)
                .transpose()?
                .unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewPageView {
    pub items: Vec<VehicleReviewAggregate>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub pages: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    #[serde(default)]
    pub reviewer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default)]
    pub reason: String,
}

fn error_response(error: &ModerationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn reviews_handler<C, R>(
    State(service): State<Arc<ModerationService<C, R>>>,
    Query(query): Query<ReviewQuery>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    let filters = match query.filters() {
        Ok(filters) => filters,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let reviews = match service.reviews() {
        Ok(reviews) => reviews,
        Err(error) => return error_response(&error),
    };
    let page_size = query.page_size.unwrap_or(service.settings().page_size);
    let mut queue = ModerationQueue::new(reviews, page_size);
    queue.set_filters(filters);
    if let Some(page) = query.page {
        queue.page(page);
    }

    let view = ReviewPageView {
        items: queue.get_page().to_vec(),
        page: queue.current_page(),
        total_pages: queue.total_pages(),
        total_items: queue.filtered_count(),
        pages: queue.visible_page_window(),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn review_handler<C, R>(
    State(service): State<Arc<ModerationService<C, R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    let listing_id = ListingId(listing_id);
    match service.review_for(&listing_id) {
        Ok(Some(review)) => (StatusCode::OK, axum::Json(review)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no photos under review for listing {listing_id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn approve_handler<C, R>(
    State(service): State<Arc<ModerationService<C, R>>>,
    Path(record_id): Path<String>,
    axum::Json(request): axum::Json<ApproveRequest>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    let reviewer = request
        .reviewer
        .unwrap_or_else(|| service.settings().reviewer.clone());
    match service.approve(&RecordId(record_id), &reviewer).await {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn reject_handler<C, R>(
    State(service): State<Arc<ModerationService<C, R>>>,
    Path(record_id): Path<String>,
    axum::Json(request): axum::Json<RejectRequest>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    let reviewer = request
        .reviewer
        .unwrap_or_else(|| service.settings().reviewer.clone());
    match service
        .reject(&RecordId(record_id), &reviewer, &request.reason)
        .await
    {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn stats_handler<C, R>(
    State(service): State<Arc<ModerationService<C, R>>>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(&error),
    }
}
