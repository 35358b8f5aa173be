//! Pagination and date windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of documents per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A clamped, 1-based page request.
///
/// Both the page number and the page size are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based page number.
    page: u32,
    /// Documents per page.
    size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Builds a pagination from raw caller input, clamping non-positive values to 1.
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: clamp_positive(page),
            size: clamp_positive(size),
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of documents skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

/// Clamps a raw value into `1..=u32::MAX`.
fn clamp_positive(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

/// An optional inclusive window of calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a window from optional bounds.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Returns true when neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}
