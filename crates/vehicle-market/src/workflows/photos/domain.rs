use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Photo categories a listing can fill, in capture order. `Other` only tags photos
/// beyond the fixed set and never has a slot of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoCategory {
    Front,
    Left,
    Right,
    Back,
    Engine,
    Dashboard,
    Other,
}

impl PhotoCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Front,
            Self::Left,
            Self::Right,
            Self::Back,
            Self::Engine,
            Self::Dashboard,
        ]
    }

    /// Category for the photo at `index` of a gallery laid out in capture order.
    pub fn from_index(index: usize) -> Self {
        Self::ordered().get(index).copied().unwrap_or(Self::Other)
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
            Self::Engine => "engine",
            Self::Dashboard => "dashboard",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front View",
            Self::Left => "Left Side",
            Self::Right => "Right Side",
            Self::Back => "Rear View",
            Self::Engine => "Engine Bay",
            Self::Dashboard => "Dashboard",
            Self::Other => "Other",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Front => "Front view of the vehicle",
            Self::Left => "Left side profile of the vehicle",
            Self::Right => "Right side profile of the vehicle",
            Self::Back => "Rear view of the vehicle",
            Self::Engine => "Engine compartment",
            Self::Dashboard => "Interior dashboard view",
            Self::Other => "Additional photo",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Front => "Upload front view photo",
            Self::Left => "Upload left side photo",
            Self::Right => "Upload right side photo",
            Self::Back => "Upload rear view photo",
            Self::Engine => "Upload engine bay photo",
            Self::Dashboard => "Upload dashboard photo",
            Self::Other => "Upload photo",
        }
    }

    pub const fn required(self) -> bool {
        matches!(self, Self::Front | Self::Left | Self::Right | Self::Back)
    }
}

impl fmt::Display for PhotoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown photo category '{0}'")]
pub struct UnknownPhotoCategory(pub String);

impl FromStr for PhotoCategory {
    type Err = UnknownPhotoCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .chain(std::iter::once(Self::Other))
            .find(|category| category.id() == normalized)
            .ok_or_else(|| UnknownPhotoCategory(value.to_string()))
    }
}

/// Raw image payload handed over by the seller.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBinary {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageBinary {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared media type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.media_type
            .trim()
            .parse::<mime::Mime>()
            .map(|parsed| parsed.type_() == mime::IMAGE)
            .unwrap_or(false)
    }

    /// Browser-displayable preview of the payload.
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type.trim(),
            STANDARD.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for ImageBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBinary")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Captured,
    Uploading,
    Uploaded,
    Failed,
}

impl AssetStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssetStatus::Captured => "captured",
            AssetStatus::Uploading => "uploading",
            AssetStatus::Uploaded => "uploaded",
            AssetStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A captured photo and its upload lifecycle. Moves forward only:
/// captured, uploading, then uploaded or failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoAsset {
    pub id: AssetId,
    #[serde(skip)]
    binary: Option<ImageBinary>,
    pub preview: String,
    pub status: AssetStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhotoAsset {
    pub fn captured(binary: ImageBinary) -> Self {
        let preview = binary.preview_data_url();
        Self {
            id: AssetId::generate(),
            binary: Some(binary),
            preview,
            status: AssetStatus::Captured,
            progress: 0,
            remote_url: None,
            error: None,
        }
    }

    /// Photo that was already stored before this intake session started.
    pub fn existing(index: usize, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: AssetId(format!("existing-{index}")),
            binary: None,
            preview: url.clone(),
            status: AssetStatus::Uploaded,
            progress: 100,
            remote_url: Some(url),
            error: None,
        }
    }

    pub fn binary(&self) -> Option<&ImageBinary> {
        self.binary.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.status == AssetStatus::Uploaded
    }

    /// URL a listing may publish: only for uploaded assets, preferring the remote locator.
    pub fn usable_url(&self) -> Option<&str> {
        if !self.is_uploaded() {
            return None;
        }
        Some(self.remote_url.as_deref().unwrap_or(&self.preview))
    }

    pub(crate) fn start_upload(&mut self) -> bool {
        if self.status != AssetStatus::Captured {
            return false;
        }
        self.status = AssetStatus::Uploading;
        self.progress = 0;
        true
    }

    pub(crate) fn advance(&mut self, step: u8) -> Option<u8> {
        if self.status != AssetStatus::Uploading {
            return None;
        }
        self.progress = self.progress.saturating_add(step).min(100);
        Some(self.progress)
    }

    pub(crate) fn complete(&mut self, remote_url: String) -> bool {
        if self.status != AssetStatus::Uploading {
            return false;
        }
        self.status = AssetStatus::Uploaded;
        self.progress = 100;
        self.remote_url = Some(remote_url);
        true
    }

    pub(crate) fn fail(&mut self, message: String) -> bool {
        if self.status != AssetStatus::Uploading {
            return false;
        }
        self.status = AssetStatus::Failed;
        self.error = Some(message);
        true
    }
}

/// One named category position on a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoSlot {
    pub category: PhotoCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub asset: Option<PhotoAsset>,
}

impl PhotoSlot {
    pub fn empty(category: PhotoCategory) -> Self {
        Self {
            category,
            name: category.label(),
            description: category.description(),
            placeholder: category.placeholder(),
            required: category.required(),
            asset: None,
        }
    }

    pub fn status(&self) -> Option<AssetStatus> {
        self.asset.as_ref().map(|asset| asset.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoError {
    #[error("'{media_type}' is not an image type; please select only image files")]
    InvalidMediaType { media_type: String },
    #[error("file {file_name} is too large ({size} bytes); maximum size is {limit} bytes")]
    FileTooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },
    #[error("listing already holds the maximum of {limit} photos")]
    CapacityExceeded { limit: usize },
    #[error("the {category} photo is still uploading")]
    AssetBusy { category: PhotoCategory },
    #[error("'{category}' has no photo slot")]
    UnknownSlot { category: PhotoCategory },
}
