use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::aggregate::VehicleReviewAggregate;
use super::domain::OverallStatus;
use crate::workflows::listing::VehicleCategory;

const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    Partial,
}

impl StatusFilter {
    pub const fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Approved => "approved",
            StatusFilter::Rejected => "rejected",
            StatusFilter::Partial => "partial",
        }
    }

    pub fn matches(self, status: OverallStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == OverallStatus::Pending,
            StatusFilter::Approved => status == OverallStatus::Approved,
            StatusFilter::Rejected => status == OverallStatus::Rejected,
            StatusFilter::Partial => status == OverallStatus::Partial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("unknown status filter '{0}'")]
    Status(String),
    #[error("unknown category filter '{0}'")]
    Category(String),
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "partial" => Ok(Self::Partial),
            _ => Err(FilterParseError::Status(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(VehicleCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: VehicleCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.label()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<VehicleCategory>()
            .map(Self::Only)
            .map_err(|_| FilterParseError::Category(value.to_string()))
    }
}

/// Reviewer-selected filters. Each is an independent predicate, so the order in which
/// they are set does not affect the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueFilters {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
}

impl QueueFilters {
    pub fn matches(&self, review: &VehicleReviewAggregate) -> bool {
        self.status.matches(review.overall_status)
            && self.category.matches(review.listing.category)
            && self.matches_search(review)
    }

    fn matches_search(&self, review: &VehicleReviewAggregate) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let listing = &review.listing;
        [&listing.make, &listing.model, &listing.seller_name]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Filtered, paginated view over listing aggregates.
#[derive(Debug, Clone)]
pub struct ModerationQueue {
    reviews: Vec<VehicleReviewAggregate>,
    filtered: Vec<VehicleReviewAggregate>,
    filters: QueueFilters,
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

impl ModerationQueue {
    pub fn new(reviews: Vec<VehicleReviewAggregate>, page_size: usize) -> Self {
        let mut queue = Self {
            reviews,
            filtered: Vec::new(),
            filters: QueueFilters::default(),
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 0,
        };
        queue.apply_filters();
        queue
    }

    /// Replaces the underlying aggregates after records changed.
    pub fn reload(&mut self, reviews: Vec<VehicleReviewAggregate>) {
        self.reviews = reviews;
        self.apply_filters();
    }

    pub fn filters(&self) -> &QueueFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: QueueFilters) {
        self.filters = filters;
        self.apply_filters();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filters.status = status;
        self.apply_filters();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filters.category = category;
        self.apply_filters();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.apply_filters();
    }

    /// Recomputes the filtered list and page count, returning to the first page.
    pub fn apply_filters(&mut self) {
        self.filtered = self
            .reviews
            .iter()
            .filter(|review| self.filters.matches(review))
            .cloned()
            .collect();
        self.current_page = 1;
        self.total_pages = self.filtered.len().div_ceil(self.page_size);
    }

    /// Moves to page `n`; out-of-range requests leave the current page unchanged.
    pub fn page(&mut self, n: usize) {
        if (1..=self.total_pages).contains(&n) {
            self.current_page = n;
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered(&self) -> &[VehicleReviewAggregate] {
        &self.filtered
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Up to five page numbers around the current page. Near either end the window
    /// slides so it stays full when enough pages exist.
    pub fn visible_page_window(&self) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let span = MAX_VISIBLE_PAGES.min(self.total_pages);
        let mut start = self
            .current_page
            .saturating_sub(MAX_VISIBLE_PAGES / 2)
            .max(1);
        if start + span - 1 > self.total_pages {
            start = self.total_pages - span + 1;
        }
        (start..start + span).collect()
    }

    pub fn get_page(&self) -> &[VehicleReviewAggregate] {
        let len = self.filtered.len();
        let start = ((self.current_page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        &self.filtered[start..end]
    }
}
