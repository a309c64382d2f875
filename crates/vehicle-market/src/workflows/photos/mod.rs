//! Photo capture and upload for a single listing.
//!
//! A [`PhotoSlotRegistry`] holds one slot per [`PhotoCategory`]; the [`PhotoUploader`]
//! validates captured images, runs simulated transfers, and publishes a
//! [`RegistrySnapshot`] to observers after each change.

pub mod domain;
pub mod registry;
pub mod transfer;
pub mod upload;

#[cfg(test)]
mod tests;

pub use domain::{
    AssetId, AssetStatus, ImageBinary, PhotoAsset, PhotoCategory, PhotoError, PhotoSlot,
    UnknownPhotoCategory,
};
pub use registry::{PhotoSlotRegistry, RegistrySnapshot};
pub use transfer::{FixedStepTransfer, SimulatedTransfer, TransferDriver};
pub use upload::{PhotoIntakeSettings, PhotoUploader, TransferOutcome, UploadHandle};
