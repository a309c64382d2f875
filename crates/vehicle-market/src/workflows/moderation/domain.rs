use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::listing::{ListingId, ListingPhoto};
use crate::workflows::photos::PhotoCategory;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn for_photo(listing_id: &ListingId, index: usize) -> Self {
        Self(format!("{listing_id}-photo-{index}"))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state of a single photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Listing-level rollup of its photo review states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pending,
    Approved,
    Rejected,
    Partial,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OverallStatus::Pending => "pending",
            OverallStatus::Approved => "approved",
            OverallStatus::Rejected => "rejected",
            OverallStatus::Partial => "partial",
        }
    }
}

/// Review entry for one submitted photo. The URL is a snapshot taken at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRecord {
    pub id: RecordId,
    pub listing_id: ListingId,
    pub category: PhotoCategory,
    pub photo_url: String,
    pub status: ReviewStatus,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl ModerationRecord {
    pub fn pending(
        listing_id: &ListingId,
        index: usize,
        photo: &ListingPhoto,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::for_photo(listing_id, index),
            listing_id: listing_id.clone(),
            category: photo.category,
            photo_url: photo.url.clone(),
            status: ReviewStatus::Pending,
            uploaded_at,
            reviewed_at: None,
            reviewed_by: None,
            rejection_reason: None,
        }
    }

    pub fn approve(&mut self, reviewer: &str, at: DateTime<Utc>) {
        self.status = ReviewStatus::Approved;
        self.reviewed_at = Some(at);
        self.reviewed_by = Some(reviewer.to_string());
        self.rejection_reason = None;
    }

    pub fn reject(&mut self, reviewer: &str, reason: &str, at: DateTime<Utc>) {
        self.status = ReviewStatus::Rejected;
        self.reviewed_at = Some(at);
        self.reviewed_by = Some(reviewer.to_string());
        self.rejection_reason = Some(reason.to_string());
    }
}

/// Reviewer-facing knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationSettings {
    /// Simulated round trip of a remote moderation call.
    pub review_latency: Duration,
    pub page_size: usize,
    /// Name recorded when a request does not identify its reviewer.
    pub reviewer: String,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            review_latency: Duration::from_millis(500),
            page_size: 10,
            reviewer: "Current Admin".to_string(),
        }
    }
}
