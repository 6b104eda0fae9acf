//! # Pagination Types
//!
//! Page requests as callers send them, and the derived search query the
//! repository consumes. Offset math lives here so every repository
//! implementation pages the same way.

use serde::{Deserialize, Serialize};

/// Default page when the caller sends none (or zero).
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;

/// A paginated-listing request, as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub sort_field: String,
    #[serde(default)]
    pub sort_direction: String,
}

impl Default for PageRequest {
    /// First page of ten, newest debts first.
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search_term: String::new(),
            sort_field: "debt_date".to_string(),
            sort_direction: "desc".to_string(),
        }
    }
}

/// The repository-facing search criteria derived from a `PageRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub limit: u32,
    pub term_search: String,
    pub sort_field: String,
    pub sort_direction: String,
    offset: u32,
}

impl SearchQuery {
    /// Recomputes the offset for a page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u32) {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        self.offset = (page * self.limit) - self.limit;
    }

    /// Rows to skip before the requested page starts.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl From<&PageRequest> for SearchQuery {
    fn from(request: &PageRequest) -> Self {
        let mut query = SearchQuery {
            limit: request.limit,
            term_search: request.search_term.clone(),
            sort_field: request.sort_field.clone(),
            sort_direction: request.sort_direction.clone(),
            offset: 0,
        };
        query.set_page(request.page);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_math() {
        let mut query = SearchQuery::from(&PageRequest {
            page: 1,
            limit: 10,
            ..PageRequest::default()
        });
        assert_eq!(query.offset(), 0);

        query.set_page(3);
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_page_zero_treated_as_first_page() {
        let query = SearchQuery::from(&PageRequest {
            page: 0,
            limit: 25,
            ..PageRequest::default()
        });
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit, 25);
    }

    #[test]
    fn test_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert_eq!(request.sort_field, "debt_date");
        assert_eq!(request.sort_direction, "desc");
    }
}
