//! Vehicle inventory and the sell-form submission path into moderation.

pub mod catalog;
pub mod domain;
pub mod seed;
pub mod submission;

pub use catalog::{CatalogError, InMemoryListingCatalog, ListingCatalog};
pub use domain::{
    Listing, ListingDraft, ListingId, ListingPhoto, UnknownVehicleCategory, VehicleCategory,
};
pub use seed::seed_inventory;
pub use submission::{ListingSubmissionService, SubmissionError, SubmittedListing};
