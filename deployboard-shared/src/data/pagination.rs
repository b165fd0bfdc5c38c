/// Page arithmetic for the deployments table
///
/// The page size is fixed at six rows. Page numbers start at 1; `PageNumber`
/// cannot hold 0, so every offset it produces is non-negative.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// Rows per page
pub const ITEMS_PER_PAGE: i64 = 6;

/// A 1-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// Page 1
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Returns `None` for page 0
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// Reads a `?page=` parameter, falling back to page 1 when it is missing,
    /// not a positive whole number, or zero
    ///
    /// Any numeric spelling of a whole number is accepted, so `2.0` and `2e0`
    /// both mean page 2.
    pub fn from_param(param: Option<&str>) -> Self {
        param
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|page| page.fract() == 0.0 && *page >= 1.0 && *page <= f64::from(u32::MAX))
            .and_then(|page| Self::new(page as u32))
            .unwrap_or(Self::FIRST)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Rows skipped before this page: `(page - 1) * ITEMS_PER_PAGE`
    pub fn offset(self) -> i64 {
        (i64::from(self.get()) - 1) * ITEMS_PER_PAGE
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed for `matching_rows` rows: `ceil(rows / ITEMS_PER_PAGE)`
pub fn total_pages(matching_rows: i64) -> i64 {
    if matching_rows <= 0 {
        0
    } else {
        (matching_rows + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
    }
}
