//! Photo moderation for submitted listings.
//!
//! Each listing photo gets a [`ModerationRecord`]. Listing-level
//! [`VehicleReviewAggregate`]s are derived from those records on every read and fed to
//! the reviewer-facing [`ModerationQueue`].

pub mod aggregate;
pub mod domain;
pub mod queue;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, aggregate_all, overall_status, ModerationStats, VehicleReviewAggregate};
pub use domain::{ModerationRecord, ModerationSettings, OverallStatus, RecordId, ReviewStatus};
pub use queue::{CategoryFilter, FilterParseError, ModerationQueue, QueueFilters, StatusFilter};
pub use repository::{InMemoryModerationRepository, ModerationRepository, RepositoryError};
pub use router::moderation_router;
pub use seed::{seed_demo_reviews, DEMO_REVIEWER, REJECTION_REASONS};
pub use service::{ModerationError, ModerationService};
