use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::domain::{AssetId, AssetStatus, ImageBinary, PhotoAsset, PhotoCategory, PhotoError};
use super::registry::{PhotoSlotRegistry, RegistrySnapshot};
use super::transfer::TransferDriver;

/// Limits and pacing for photo intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoIntakeSettings {
    pub max_photos: usize,
    pub max_file_bytes: usize,
    pub tick_interval: Duration,
    pub settle_delay: Duration,
}

impl Default for PhotoIntakeSettings {
    fn default() -> Self {
        Self {
            max_photos: 10,
            max_file_bytes: 10 * 1024 * 1024,
            tick_interval: Duration::from_millis(200),
            settle_delay: Duration::from_millis(500),
        }
    }
}

/// How a transfer ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransferOutcome {
    Uploaded { remote_url: String },
    Failed { error: String },
    /// The slot no longer held the asset when the transfer finished.
    Superseded,
}

/// Handle on an in-flight transfer.
#[derive(Debug)]
pub struct UploadHandle {
    pub category: PhotoCategory,
    pub asset_id: AssetId,
    task: JoinHandle<TransferOutcome>,
}

impl UploadHandle {
    pub async fn wait(self) -> TransferOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => TransferOutcome::Failed {
                error: format!("transfer task aborted: {err}"),
            },
        }
    }
}

/// Per-slot capture and upload state machine over a shared registry.
///
/// Transfers run as tokio tasks, so `begin_upload` and `upload_all` must be called
/// from within a runtime.
pub struct PhotoUploader<D> {
    registry: Arc<Mutex<PhotoSlotRegistry>>,
    driver: Arc<D>,
    settings: PhotoIntakeSettings,
}

impl<D> PhotoUploader<D>
where
    D: TransferDriver + 'static,
{
    pub fn new(registry: PhotoSlotRegistry, driver: Arc<D>, settings: PhotoIntakeSettings) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            driver,
            settings,
        }
    }

    /// Fresh registry for a new listing, optionally seeded with already stored photos.
    pub fn for_listing<I, S>(existing: I, driver: Arc<D>, settings: PhotoIntakeSettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = PhotoSlotRegistry::new(existing, settings.max_photos);
        Self::new(registry, driver, settings)
    }

    pub fn settings(&self) -> &PhotoIntakeSettings {
        &self.settings
    }

    pub fn registry(&self) -> MutexGuard<'_, PhotoSlotRegistry> {
        lock(&self.registry)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.registry().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrySnapshot> {
        self.registry().subscribe()
    }

    /// Captures `binary` into the slot, discarding whatever the slot held.
    pub fn assign(&self, category: PhotoCategory, binary: ImageBinary) -> Result<AssetId, PhotoError> {
        if !binary.is_image() {
            return Err(PhotoError::InvalidMediaType {
                media_type: binary.media_type,
            });
        }
        let size = binary.len();
        if size > self.settings.max_file_bytes {
            return Err(PhotoError::FileTooLarge {
                file_name: binary.file_name,
                size,
                limit: self.settings.max_file_bytes,
            });
        }

        let asset = PhotoAsset::captured(binary);
        let asset_id = asset.id.clone();
        self.registry().place(category, asset)?;
        info!(%category, %asset_id, "photo captured");
        Ok(asset_id)
    }

    pub fn remove(&self, category: PhotoCategory) -> Result<(), PhotoError> {
        if let Some(removed) = self.registry().clear(category)? {
            info!(%category, asset_id = %removed.id, "photo removed");
        }
        Ok(())
    }

    /// Starts the transfer for a captured asset. Returns `None` when there is nothing to
    /// start: an empty slot, or an asset already uploading, uploaded, or failed.
    pub fn begin_upload(&self, category: PhotoCategory) -> Result<Option<UploadHandle>, PhotoError> {
        let asset_id = {
            let mut registry = self.registry();
            if registry.slot(category).is_none() {
                return Err(PhotoError::UnknownSlot { category });
            }
            let Some(asset) = registry.asset(category) else {
                return Ok(None);
            };
            let asset_id = asset.id.clone();
            let started = registry
                .with_asset(category, &asset_id, PhotoAsset::start_upload)
                .unwrap_or(false);
            if !started {
                return Ok(None);
            }
            registry.publish();
            asset_id
        };

        info!(%category, %asset_id, "photo upload started");
        let task = tokio::spawn(run_transfer(
            Arc::clone(&self.registry),
            Arc::clone(&self.driver),
            self.settings.clone(),
            category,
            asset_id.clone(),
        ));

        Ok(Some(UploadHandle {
            category,
            asset_id,
            task,
        }))
    }

    /// Starts every captured asset. Transfers run concurrently and finish in no
    /// particular order.
    pub fn upload_all(&self) -> Vec<UploadHandle> {
        let pending: Vec<PhotoCategory> = self
            .registry()
            .slots()
            .iter()
            .filter(|slot| slot.status() == Some(AssetStatus::Captured))
            .map(|slot| slot.category)
            .collect();

        pending
            .into_iter()
            .filter_map(|category| self.begin_upload(category).ok().flatten())
            .collect()
    }
}

fn lock(registry: &Mutex<PhotoSlotRegistry>) -> MutexGuard<'_, PhotoSlotRegistry> {
    registry.lock().expect("photo registry mutex poisoned")
}

async fn run_transfer<D>(
    registry: Arc<Mutex<PhotoSlotRegistry>>,
    driver: Arc<D>,
    settings: PhotoIntakeSettings,
    category: PhotoCategory,
    asset_id: AssetId,
) -> TransferOutcome
where
    D: TransferDriver + ?Sized,
{
    loop {
        tokio::time::sleep(settings.tick_interval).await;
        let step = driver.next_increment();
        let progress = {
            let mut guard = lock(&registry);
            let progress = guard.with_asset(category, &asset_id, |asset| asset.advance(step));
            if matches!(progress, Some(Some(_))) {
                guard.publish();
            }
            progress
        };
        match progress {
            Some(Some(progress)) if progress >= 100 => break,
            Some(Some(progress)) => debug!(%category, %asset_id, progress, "upload progress"),
            _ => return superseded(category, &asset_id),
        }
    }

    tokio::time::sleep(settings.settle_delay).await;

    let Some(asset) = lock(&registry).with_asset(category, &asset_id, |asset| asset.clone()) else {
        return superseded(category, &asset_id);
    };
    let result = driver.finish(&asset);

    let mut guard = lock(&registry);
    let outcome = guard.with_asset(category, &asset_id, |asset| match result {
        Ok(remote_url) => {
            asset.complete(remote_url.clone());
            TransferOutcome::Uploaded { remote_url }
        }
        Err(error) => {
            asset.fail(error.clone());
            TransferOutcome::Failed { error }
        }
    });

    match outcome {
        Some(outcome) => {
            guard.publish();
            match &outcome {
                TransferOutcome::Failed { error } => {
                    warn!(%category, %asset_id, %error, "photo upload failed")
                }
                _ => info!(%category, %asset_id, "photo uploaded"),
            }
            outcome
        }
        None => {
            drop(guard);
            superseded(category, &asset_id)
        }
    }
}

fn superseded(category: PhotoCategory, asset_id: &AssetId) -> TransferOutcome {
    debug!(%category, %asset_id, "discarding transfer for an asset no longer in its slot");
    TransferOutcome::Superseded
}
