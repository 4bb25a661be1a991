//! Pagination primitives shared across list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PER_PAGE: i64 = 100;

    /// Page size, falling back to the list's own default.
    pub fn limit(&self, default_per_page: i64) -> i64 {
        self.per_page
            .unwrap_or(default_per_page)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    pub fn offset(&self, default_per_page: i64) -> i64 {
        (self.current_page() - 1) * self.limit(default_per_page)
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination, default_per_page: i64) -> Self {
        let per_page = pagination.limit(default_per_page);
        Self {
            items,
            total,
            page: pagination.current_page(),
            per_page,
            total_pages: (total + per_page - 1) / per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_the_list() {
        let p = Pagination::default();
        assert_eq!(p.limit(5), 5);
        assert_eq!(p.limit(50), 50);
        assert_eq!(p.offset(5), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn per_page_is_clamped() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.limit(5), 100);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn offset_uses_page_size() {
        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.offset(5), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let result = PagedResult::new(vec![1, 2, 3, 4, 5], 12, &Pagination::default(), 5);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.per_page, 5);
        assert_eq!(result.page, 1);
    }
}
