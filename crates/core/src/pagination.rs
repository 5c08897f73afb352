//! Offset pagination primitives for read queries.

use serde::Serialize;

/// Maximum page size accepted from clients.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Default page size when the client supplies none.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// A sanitized page request (1-based page number).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Build a pagination window, clamping out-of-range values instead of
    /// failing: page floors at 1, limit is clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Total number of pages needed for `total` records.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// One page of results plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_page_of_ten() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = Pagination::new(0, 0);
        assert_eq!((p.page(), p.limit()), (1, 1));

        let p = Pagination::new(3, 10_000);
        assert_eq!(p.limit(), MAX_PAGE_LIMIT);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }
}
