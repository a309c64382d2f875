use crate::infra::{image_from_file, seeded_moderation, MarketModeration};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use vehicle_market::clock::SystemClock;
use vehicle_market::config::AppConfig;
use vehicle_market::error::AppError;
use vehicle_market::workflows::listing::{
    ListingDraft, ListingSubmissionService, SubmittedListing, VehicleCategory,
};
use vehicle_market::workflows::moderation::{
    CategoryFilter, ModerationQueue, QueueFilters, StatusFilter, DEMO_REVIEWER, REJECTION_REASONS,
};
use vehicle_market::workflows::photos::{
    PhotoCategory, PhotoUploader, SimulatedTransfer, TransferOutcome,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the generated review history. Random when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Only show listings with this overall status (all, pending, approved, rejected, partial)
    #[arg(long, default_value = "all")]
    pub(crate) status: StatusFilter,
    /// Only show listings in this vehicle category (all, cars, bikes, leisure, commercial)
    #[arg(long, default_value = "all")]
    pub(crate) category: CategoryFilter,
    /// Case-insensitive match against make, model, or seller name
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Queue page to print
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
}

const DEMO_PHOTOS: [(PhotoCategory, &str); 5] = [
    (PhotoCategory::Front, "civic-front.jpg"),
    (PhotoCategory::Left, "civic-left.jpg"),
    (PhotoCategory::Right, "civic-right.png"),
    (PhotoCategory::Back, "civic-rear.jpg"),
    (PhotoCategory::Dashboard, "civic-dashboard.webp"),
];

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        status,
        category,
        search,
        page,
    } = args;

    let config = AppConfig::load()?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    println!("Vehicle marketplace moderation demo (seed {seed})");
    let moderation = seeded_moderation(
        Arc::new(SystemClock),
        config.moderation.clone(),
        &mut rng,
    )?;
    let seeded = moderation.reviews()?;
    println!(
        "- Seeded {} listings with {} photos under review",
        seeded.len(),
        seeded
            .iter()
            .map(|review| review.total_photos)
            .sum::<usize>()
    );

    println!("\nPhoto intake");
    let uploader = PhotoUploader::for_listing(
        Vec::<String>::new(),
        Arc::new(SimulatedTransfer::default()),
        config.photos.clone(),
    );
    if let Err(err) = uploader.assign(
        PhotoCategory::Engine,
        image_from_file("service-history.pdf", vec![0x25, 0x50, 0x44, 0x46]),
    ) {
        println!("  Engine bay skipped: {err}");
    }
    for (slot, file_name) in DEMO_PHOTOS {
        uploader.assign(slot, image_from_file(file_name, demo_bytes(file_name)))?;
    }
    {
        let registry = uploader.registry();
        println!(
            "  {} of {} slots filled, required {}/{} uploaded",
            registry.filled_count(),
            registry.total_slots(),
            registry.required_uploaded(),
            registry.required_total()
        );
    }

    for handle in uploader.upload_all() {
        let category = handle.category;
        match handle.wait().await {
            TransferOutcome::Uploaded { .. } => println!("  - {category}: uploaded"),
            TransferOutcome::Failed { error } => println!("  - {category}: failed ({error})"),
            TransferOutcome::Superseded => println!("  - {category}: replaced before finishing"),
        }
    }

    let submitted = {
        let submissions = ListingSubmissionService::new(Arc::clone(&moderation));
        let registry = uploader.registry();
        submissions.submit(demo_draft(), &registry)?
    };
    println!(
        "\nSubmitted {} as {} with {} photos pending review",
        submitted.listing.title(),
        submitted.listing.id,
        submitted.records.len()
    );

    review_submission(&moderation, &submitted).await?;

    let mut queue = moderation.queue()?;
    queue.set_filters(QueueFilters {
        status,
        category,
        search: search.unwrap_or_default(),
    });
    queue.page(page);
    print_queue(&queue);

    let stats = moderation.stats()?;
    println!("\nDashboard");
    println!(
        "- {} vehicles | {} of {} photos awaiting approval",
        stats.total_vehicles, stats.pending_approval, stats.total_photos
    );
    println!(
        "- Today: {} approved, {} rejected",
        stats.approved_today, stats.rejected_today
    );

    Ok(())
}

async fn review_submission(
    moderation: &MarketModeration,
    submitted: &SubmittedListing,
) -> Result<(), AppError> {
    let mut records = submitted.records.iter();
    if let Some(record) = records.next() {
        let approved = moderation.approve(&record.id, DEMO_REVIEWER).await?;
        println!("  - {} approved by {DEMO_REVIEWER}", approved.id);
    }
    if let Some(record) = records.next() {
        let reason = REJECTION_REASONS[3];
        let rejected = moderation.reject(&record.id, DEMO_REVIEWER, reason).await?;
        println!("  - {} rejected: {reason}", rejected.id);
    }

    if let Some(review) = moderation.review_for(&submitted.listing.id)? {
        println!(
            "  Listing status {} ({} approved, {} rejected, {} pending)",
            review.overall_status.label(),
            review.approved_count,
            review.rejected_count,
            review.pending_count
        );
    }
    Ok(())
}

fn print_queue(queue: &ModerationQueue) {
    let filters = queue.filters();
    println!(
        "\nReview queue [status={}, category={}, search={:?}]",
        filters.status.label(),
        filters.category,
        filters.search
    );
    if queue.filtered_count() == 0 {
        println!("  No listings match these filters");
        return;
    }

    println!(
        "  Page {} of {} ({} listings)",
        queue.current_page(),
        queue.total_pages(),
        queue.filtered_count()
    );
    for review in queue.get_page() {
        println!(
            "  - {:<28} {:<10} {:>2} photos | {} approved, {} rejected, {} pending | {}",
            review.listing.title(),
            review.overall_status.label(),
            review.total_photos,
            review.approved_count,
            review.rejected_count,
            review.pending_count,
            review.listing.seller_name
        );
    }

    let window: Vec<String> = queue
        .visible_page_window()
        .into_iter()
        .map(|number| {
            if number == queue.current_page() {
                format!("[{number}]")
            } else {
                number.to_string()
            }
        })
        .collect();
    println!("  Pages: {}", window.join(" "));
}

fn demo_draft() -> ListingDraft {
    ListingDraft {
        category: VehicleCategory::Cars,
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2020,
        price: 21_500,
        mileage: 28_000,
        seller_name: "Demo Seller".to_string(),
        seller_contact: "demo.seller@email.com".to_string(),
        location: "Austin, TX".to_string(),
        description: "Single owner, garage kept, full service history.".to_string(),
        photos: Vec::new(),
    }
}

fn demo_bytes(file_name: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(file_name.as_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_photos_cover_every_required_slot() {
        let required: Vec<PhotoCategory> = PhotoCategory::ordered()
            .into_iter()
            .filter(|category| category.required())
            .collect();

        assert!(required
            .iter()
            .all(|category| DEMO_PHOTOS.iter().any(|(slot, _)| slot == category)));
        assert!(DEMO_PHOTOS
            .iter()
            .all(|(_, file_name)| image_from_file(file_name, demo_bytes(file_name)).is_image()));
    }
}
