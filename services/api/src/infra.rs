use metrics_exporter_prometheus::PrometheusHandle;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vehicle_market::clock::Clock;
use vehicle_market::workflows::listing::{seed_inventory, InMemoryListingCatalog};
use vehicle_market::workflows::moderation::{
    seed_demo_reviews, InMemoryModerationRepository, ModerationError, ModerationService,
    ModerationSettings,
};
use vehicle_market::workflows::photos::ImageBinary;

pub(crate) type MarketModeration =
    ModerationService<InMemoryListingCatalog, InMemoryModerationRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Moderation over the seeded inventory, with backdated review history.
pub(crate) fn seeded_moderation<G: Rng>(
    clock: Arc<dyn Clock>,
    settings: ModerationSettings,
    rng: &mut G,
) -> Result<Arc<MarketModeration>, ModerationError> {
    let catalog = InMemoryListingCatalog::with_listings(seed_inventory(), Arc::clone(&clock));
    let service = ModerationService::new(
        Arc::new(catalog),
        Arc::new(InMemoryModerationRepository::default()),
        clock,
        settings,
    );
    seed_demo_reviews(&service, rng)?;
    Ok(Arc::new(service))
}

/// Wraps raw bytes, guessing the media type from the file extension.
pub(crate) fn image_from_file(file_name: &str, bytes: Vec<u8>) -> ImageBinary {
    let media_type = mime_guess::from_path(file_name).first_or_octet_stream();
    ImageBinary::new(file_name, media_type.essence_str(), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vehicle_market::clock::SystemClock;

    #[test]
    fn media_type_follows_the_extension() {
        let photo = image_from_file("front.JPG", vec![0xFF, 0xD8]);
        let brochure = image_from_file("brochure.pdf", vec![0x25, 0x50]);

        assert_eq!(photo.media_type, "image/jpeg");
        assert!(photo.is_image());
        assert_eq!(brochure.media_type, "application/pdf");
        assert!(!brochure.is_image());
    }

    #[test]
    fn seeded_moderation_reviews_every_listing_with_photos() {
        let mut rng = StdRng::seed_from_u64(7);
        let service = seeded_moderation(
            Arc::new(SystemClock),
            ModerationSettings::default(),
            &mut rng,
        )
        .expect("seeded");

        let reviews = service.reviews().expect("reviews");
        assert_eq!(reviews.len(), seed_inventory().len());
        let photos: usize = seed_inventory().iter().map(|listing| listing.photos.len()).sum();
        assert_eq!(
            reviews.iter().map(|review| review.total_photos).sum::<usize>(),
            photos
        );
    }
}
