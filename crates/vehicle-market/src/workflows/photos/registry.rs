use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::domain::{AssetId, AssetStatus, PhotoAsset, PhotoCategory, PhotoError, PhotoSlot};
use crate::workflows::listing::ListingPhoto;

/// Derived views published after every slot mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    /// Usable URLs of uploaded assets, in slot order.
    pub photo_urls: Vec<String>,
    /// Every asset currently held by a slot, whatever its status.
    pub assets: Vec<PhotoAsset>,
}

/// The fixed set of photo slots for one listing.
#[derive(Debug)]
pub struct PhotoSlotRegistry {
    slots: Vec<PhotoSlot>,
    max_photos: usize,
    observers: watch::Sender<RegistrySnapshot>,
}

impl PhotoSlotRegistry {
    pub fn empty(max_photos: usize) -> Self {
        Self::new(Vec::<String>::new(), max_photos)
    }

    /// Builds the slots, placing `existing` URLs positionally as uploaded assets.
    /// URLs beyond the slot count are ignored.
    pub fn new<I, S>(existing: I, max_photos: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: Vec<PhotoSlot> = PhotoCategory::ordered()
            .into_iter()
            .map(PhotoSlot::empty)
            .collect();

        for (index, (slot, url)) in slots.iter_mut().zip(existing).enumerate() {
            slot.asset = Some(PhotoAsset::existing(index, url));
        }

        let (observers, _) = watch::channel(RegistrySnapshot::default());
        let registry = Self {
            slots,
            max_photos,
            observers,
        };
        registry.observers.send_replace(registry.snapshot());
        registry
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrySnapshot> {
        self.observers.subscribe()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            photo_urls: self.photo_urls(),
            assets: self
                .slots
                .iter()
                .filter_map(|slot| slot.asset.clone())
                .collect(),
        }
    }

    pub fn slots(&self) -> &[PhotoSlot] {
        &self.slots
    }

    pub fn slot(&self, category: PhotoCategory) -> Option<&PhotoSlot> {
        self.slots.iter().find(|slot| slot.category == category)
    }

    pub fn asset(&self, category: PhotoCategory) -> Option<&PhotoAsset> {
        self.slot(category).and_then(|slot| slot.asset.as_ref())
    }

    pub fn max_photos(&self) -> usize {
        self.max_photos
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.asset.is_some()).count()
    }

    pub fn required_total(&self) -> usize {
        self.slots.iter().filter(|slot| slot.required).count()
    }

    pub fn required_uploaded(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.required && slot.status() == Some(AssetStatus::Uploaded))
            .count()
    }

    pub fn required_photos_complete(&self) -> bool {
        self.slots
            .iter()
            .filter(|slot| slot.required)
            .all(|slot| slot.status() == Some(AssetStatus::Uploaded))
    }

    pub fn has_unuploaded_photos(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.status() == Some(AssetStatus::Captured))
    }

    pub fn can_add_more_photos(&self) -> bool {
        self.filled_count() < self.max_photos
    }

    pub fn photo_urls(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|slot| slot.asset.as_ref()?.usable_url().map(str::to_string))
            .collect()
    }

    /// Uploaded photos tagged with the slot they were captured for.
    pub fn uploaded_photos(&self) -> Vec<ListingPhoto> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let url = slot.asset.as_ref()?.usable_url()?;
                Some(ListingPhoto::new(url, slot.category))
            })
            .collect()
    }

    /// Puts `asset` into the slot, returning the asset it displaced.
    pub(crate) fn place(
        &mut self,
        category: PhotoCategory,
        asset: PhotoAsset,
    ) -> Result<Option<PhotoAsset>, PhotoError> {
        let limit = self.max_photos;
        let filled = self.filled_count();
        let slot = self.slot_mut(category)?;
        if slot.asset.is_none() && filled >= limit {
            return Err(PhotoError::CapacityExceeded { limit });
        }

        let previous = slot.asset.replace(asset);
        if let Some(discarded) = &previous {
            debug!(%category, asset_id = %discarded.id, "discarding replaced photo asset");
        }
        self.publish();
        Ok(previous)
    }

    /// Empties the slot unless its asset is mid-transfer.
    pub(crate) fn clear(&mut self, category: PhotoCategory) -> Result<Option<PhotoAsset>, PhotoError> {
        let slot = self.slot_mut(category)?;
        if slot.status() == Some(AssetStatus::Uploading) {
            return Err(PhotoError::AssetBusy { category });
        }

        let removed = slot.asset.take();
        self.publish();
        Ok(removed)
    }

    /// Applies `change` to the slot's asset when it is still the asset identified by
    /// `asset_id`. Returns `None` when the slot moved on to another asset.
    pub(crate) fn with_asset<F, T>(
        &mut self,
        category: PhotoCategory,
        asset_id: &AssetId,
        change: F,
    ) -> Option<T>
    where
        F: FnOnce(&mut PhotoAsset) -> T,
    {
        let asset = self
            .slots
            .iter_mut()
            .find(|slot| slot.category == category)?
            .asset
            .as_mut()
            .filter(|asset| &asset.id == asset_id)?;
        Some(change(asset))
    }

    pub(crate) fn publish(&self) {
        self.observers.send_replace(self.snapshot());
    }

    fn slot_mut(&mut self, category: PhotoCategory) -> Result<&mut PhotoSlot, PhotoError> {
        self.slots
            .iter_mut()
            .find(|slot| slot.category == category)
            .ok_or(PhotoError::UnknownSlot { category })
    }
}
