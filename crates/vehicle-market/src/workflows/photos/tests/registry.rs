use super::common::*;
use crate::workflows::photos::{
    AssetStatus, PhotoAsset, PhotoCategory, PhotoError, PhotoSlotRegistry,
};

#[test]
fn new_registry_exposes_six_slots_with_four_required() {
    let registry = PhotoSlotRegistry::empty(10);

    let categories: Vec<PhotoCategory> = registry.slots().iter().map(|slot| slot.category).collect();
    assert_eq!(categories, PhotoCategory::ordered().to_vec());
    assert_eq!(registry.total_slots(), 6);
    assert_eq!(registry.required_total(), 4);
    assert_eq!(registry.filled_count(), 0);
    assert!(!registry.required_photos_complete());
    assert!(registry.slot(PhotoCategory::Other).is_none());

    let front = registry.slot(PhotoCategory::Front).expect("front slot");
    assert_eq!(front.name, "Front View");
    assert!(front.required);
    assert!(!registry.slot(PhotoCategory::Engine).expect("engine slot").required);
}

#[test]
fn existing_urls_fill_slots_in_order_as_uploaded() {
    let registry = PhotoSlotRegistry::new(["https://cdn/a.jpg", "https://cdn/b.jpg"], 10);

    let front = registry.asset(PhotoCategory::Front).expect("front asset");
    assert_eq!(front.status, AssetStatus::Uploaded);
    assert_eq!(front.id.0, "existing-0");
    assert_eq!(
        registry.asset(PhotoCategory::Left).and_then(PhotoAsset::usable_url),
        Some("https://cdn/b.jpg")
    );
    assert!(registry.asset(PhotoCategory::Right).is_none());
    assert_eq!(registry.required_uploaded(), 2);
    assert_eq!(
        registry.photo_urls(),
        vec!["https://cdn/a.jpg".to_string(), "https://cdn/b.jpg".to_string()]
    );
}

#[test]
fn existing_urls_beyond_the_slot_count_are_ignored() {
    let urls: Vec<String> = (0..8).map(|index| format!("https://cdn/{index}.jpg")).collect();
    let registry = PhotoSlotRegistry::new(urls, 10);

    assert_eq!(registry.filled_count(), 6);
    assert!(registry.required_photos_complete());
}

#[test]
fn captured_assets_are_not_published_as_urls() {
    let mut registry = PhotoSlotRegistry::new(["https://cdn/front.jpg"], 10);
    registry
        .place(PhotoCategory::Left, PhotoAsset::captured(png("left.png")))
        .expect("slot accepts asset");

    assert!(registry.has_unuploaded_photos());
    assert_eq!(registry.photo_urls(), vec!["https://cdn/front.jpg".to_string()]);
    assert_eq!(registry.snapshot().assets.len(), 2);

    let uploaded = registry.uploaded_photos();
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].category, PhotoCategory::Front);
}

#[test]
fn place_returns_the_displaced_asset() {
    let mut registry = PhotoSlotRegistry::empty(10);
    let first = PhotoAsset::captured(png("first.png"));
    let first_id = first.id.clone();
    registry.place(PhotoCategory::Front, first).expect("first placement");

    let displaced = registry
        .place(PhotoCategory::Front, PhotoAsset::captured(png("second.png")))
        .expect("replacement");

    assert_eq!(displaced.map(|asset| asset.id), Some(first_id));
    assert_eq!(registry.filled_count(), 1);
}

#[test]
fn capacity_only_blocks_filling_new_slots() {
    let mut registry = PhotoSlotRegistry::empty(2);
    registry
        .place(PhotoCategory::Front, PhotoAsset::captured(png("front.png")))
        .expect("front");
    registry
        .place(PhotoCategory::Left, PhotoAsset::captured(png("left.png")))
        .expect("left");
    assert!(!registry.can_add_more_photos());

    let error = registry
        .place(PhotoCategory::Right, PhotoAsset::captured(png("right.png")))
        .expect_err("capacity reached");
    assert_eq!(error, PhotoError::CapacityExceeded { limit: 2 });

    registry
        .place(PhotoCategory::Front, PhotoAsset::captured(png("front-2.png")))
        .expect("replacing an occupied slot is allowed");
}

#[test]
fn other_category_has_no_slot() {
    let mut registry = PhotoSlotRegistry::empty(10);

    let error = registry
        .place(PhotoCategory::Other, PhotoAsset::captured(png("extra.png")))
        .expect_err("no slot for other");

    assert_eq!(
        error,
        PhotoError::UnknownSlot {
            category: PhotoCategory::Other
        }
    );
}

#[test]
fn with_asset_ignores_a_stale_asset_id() {
    let mut registry = PhotoSlotRegistry::empty(10);
    let stale = PhotoAsset::captured(png("old.png"));
    let stale_id = stale.id.clone();
    registry.place(PhotoCategory::Back, stale).expect("place");
    registry
        .place(PhotoCategory::Back, PhotoAsset::captured(png("new.png")))
        .expect("replace");

    let touched = registry.with_asset(PhotoCategory::Back, &stale_id, |_| ());

    assert!(touched.is_none());
}

#[test]
fn mutations_are_published_to_subscribers() {
    let mut registry = PhotoSlotRegistry::empty(10);
    let mut observer = registry.subscribe();
    observer.borrow_and_update();

    registry
        .place(PhotoCategory::Front, PhotoAsset::captured(png("front.png")))
        .expect("place");

    assert!(observer.has_changed().expect("sender alive"));
    assert_eq!(observer.borrow_and_update().assets.len(), 1);

    registry.clear(PhotoCategory::Front).expect("clear");
    assert!(observer.borrow_and_update().assets.is_empty());
}

#[test]
fn photo_category_parses_ids_and_rejects_unknown_values() {
    assert_eq!("Dashboard".parse::<PhotoCategory>(), Ok(PhotoCategory::Dashboard));
    assert_eq!("other".parse::<PhotoCategory>(), Ok(PhotoCategory::Other));
    assert!("roof".parse::<PhotoCategory>().is_err());
    assert_eq!(PhotoCategory::from_index(6), PhotoCategory::Other);
}
