use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::photos::PhotoCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    Cars,
    Bikes,
    Leisure,
    Commercial,
}

impl VehicleCategory {
    pub const fn ordered() -> [Self; 4] {
        [Self::Cars, Self::Bikes, Self::Leisure, Self::Commercial]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cars => "Cars",
            Self::Bikes => "Bikes",
            Self::Leisure => "Leisure",
            Self::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle category '{0}'")]
pub struct UnknownVehicleCategory(pub String);

impl FromStr for VehicleCategory {
    type Err = UnknownVehicleCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVehicleCategory(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published photo, tagged with the category it was captured for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPhoto {
    pub url: String,
    pub category: PhotoCategory,
}

impl ListingPhoto {
    pub fn new(url: impl Into<String>, category: PhotoCategory) -> Self {
        Self {
            url: url.into(),
            category,
        }
    }

    /// Tags a gallery laid out in capture order; photos past the fixed categories
    /// become `other`.
    pub fn positional<I, S>(urls: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(index, url)| Self::new(url, PhotoCategory::from_index(index)))
            .collect()
    }
}

/// Seller-provided listing details before the catalog assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub category: VehicleCategory,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub price: u32,
    pub mileage: u32,
    pub seller_name: String,
    pub seller_contact: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<ListingPhoto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub category: VehicleCategory,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub price: u32,
    pub mileage: u32,
    pub seller_name: String,
    pub seller_contact: String,
    pub location: String,
    pub description: String,
    pub photos: Vec<ListingPhoto>,
    pub date_posted: DateTime<Utc>,
}

impl Listing {
    pub fn from_draft(id: ListingId, draft: ListingDraft, date_posted: DateTime<Utc>) -> Self {
        let ListingDraft {
            category,
            make,
            model,
            year,
            price,
            mileage,
            seller_name,
            seller_contact,
            location,
            description,
            photos,
        } = draft;

        Self {
            id,
            category,
            make,
            model,
            year,
            price,
            mileage,
            seller_name,
            seller_contact,
            location,
            description,
            photos,
            date_posted,
        }
    }

    /// Display title, e.g. "2020 Honda Civic".
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }
}
