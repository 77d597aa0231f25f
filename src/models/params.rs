//! Pagination parameters shared by every listing endpoint

use serde::{Deserialize, Serialize};

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl ListParams {
    /// Create new pagination parameters.
    ///
    /// Page is floored at 1, limit is clamped to 1..=100.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        ((self.page as i64) - 1) * self.limit as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            limit: params.limit,
        }
    }

    /// Calculate the total number of pages: `ceil(total / limit)`
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        ((self.total.max(0) as u64 + self.limit as u64 - 1) / self.limit as u64) as u32
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_first_page_is_zero() {
        assert_eq!(ListParams::new(1, 10).offset(), 0);
    }

    #[test]
    fn test_offset_skips_previous_pages() {
        assert_eq!(ListParams::new(3, 10).offset(), 20);
        assert_eq!(ListParams::new(2, 25).offset(), 25);
    }

    #[test]
    fn test_page_zero_floors_to_one() {
        let params = ListParams::new(0, 10);
        assert_eq!(params.page, 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_clamped() {
        assert_eq!(ListParams::new(1, 0).limit, 1);
        assert_eq!(ListParams::new(1, 1000).limit, 100);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let params = ListParams::new(1, 10);
        let result: PagedResult<i32> = PagedResult::new(vec![], 21, &params);
        assert_eq!(result.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        let params = ListParams::new(1, 10);
        let result: PagedResult<i32> = PagedResult::new(vec![], 30, &params);
        assert_eq!(result.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_empty() {
        let params = ListParams::new(1, 10);
        let result: PagedResult<i32> = PagedResult::new(vec![], 0, &params);
        assert_eq!(result.total_pages(), 0);
    }
}
