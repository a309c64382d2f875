use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::catalog::{CatalogError, ListingCatalog};
use super::domain::{Listing, ListingDraft};
use crate::workflows::moderation::{
    ModerationError, ModerationRecord, ModerationRepository, ModerationService,
};
use crate::workflows::photos::PhotoSlotRegistry;

/// A registered listing together with the moderation records opened for it.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedListing {
    pub listing: Listing,
    pub records: Vec<ModerationRecord>,
}

/// Turns a seller's draft and photo registry into a catalog listing under review.
pub struct ListingSubmissionService<C, R> {
    moderation: Arc<ModerationService<C, R>>,
}

impl<C, R> ListingSubmissionService<C, R>
where
    C: ListingCatalog + 'static,
    R: ModerationRepository + 'static,
{
    pub fn new(moderation: Arc<ModerationService<C, R>>) -> Self {
        Self { moderation }
    }

    pub fn submit(
        &self,
        mut draft: ListingDraft,
        registry: &PhotoSlotRegistry,
    ) -> Result<SubmittedListing, SubmissionError> {
        validate(&draft)?;

        if !registry.required_photos_complete() {
            let error = SubmissionError::RequiredPhotosIncomplete {
                uploaded: registry.required_uploaded(),
                required: registry.required_total(),
            };
            warn!(%error, "listing submission blocked");
            return Err(error);
        }

        draft.photos = registry.uploaded_photos();
        let listing = self.moderation.catalog().register_listing(draft)?;
        let records = self.moderation.create_records_for_listing(&listing)?;

        info!(
            listing_id = %listing.id,
            photos = records.len(),
            "listing submitted for moderation"
        );
        Ok(SubmittedListing { listing, records })
    }
}

fn validate(draft: &ListingDraft) -> Result<(), SubmissionError> {
    let required = [
        ("make", &draft.make),
        ("model", &draft.model),
        ("seller_name", &draft.seller_name),
        ("seller_contact", &draft.seller_contact),
    ];
    if let Some((field, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(SubmissionError::MissingField(field));
    }
    if draft.price == 0 {
        return Err(SubmissionError::InvalidPrice);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("price must be greater than zero")]
    InvalidPrice,
    #[error("{uploaded} of {required} required photos uploaded")]
    RequiredPhotosIncomplete { uploaded: usize, required: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Moderation(#[from] ModerationError),
}
