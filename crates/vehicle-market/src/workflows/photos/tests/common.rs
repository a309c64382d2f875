use std::sync::Arc;
use std::time::Duration;

use crate::workflows::photos::{
    FixedStepTransfer, ImageBinary, PhotoIntakeSettings, PhotoUploader,
};

pub(super) fn png(name: &str) -> ImageBinary {
    ImageBinary::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub(super) fn settings() -> PhotoIntakeSettings {
    PhotoIntakeSettings {
        max_photos: 10,
        max_file_bytes: 1024,
        tick_interval: Duration::from_millis(200),
        settle_delay: Duration::from_millis(500),
    }
}

pub(super) fn uploader(driver: FixedStepTransfer) -> PhotoUploader<FixedStepTransfer> {
    PhotoUploader::for_listing(Vec::<String>::new(), Arc::new(driver), settings())
}

pub(super) fn uploader_with(
    driver: FixedStepTransfer,
    settings: PhotoIntakeSettings,
) -> PhotoUploader<FixedStepTransfer> {
    PhotoUploader::for_listing(Vec::<String>::new(), Arc::new(driver), settings)
}
