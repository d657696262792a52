use rocket::{FromForm, UriDisplayQuery};
use serde::{Deserialize, Serialize};

/// The largest page a client may request; bigger requests are served this many items.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters: `page_num` (from 1) and `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromForm, UriDisplayQuery)]
pub struct PaginationRequest {
    #[field(default = 1)]
    pub page_num: u32,
    #[field(default = 50)]
    pub page_size: u32,
}

impl PaginationRequest {
    /// The requested page, treating zero as the first.
    pub fn page_num(&self) -> u32 {
        self.page_num.max(1)
    }

    /// The requested page size, limited to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of items before the start of this page.
    pub fn skip(&self) -> usize {
        (self.page_num() as usize - 1).saturating_mul(self.page_size() as usize)
    }

    /// Take this page out of `items`.
    pub fn page_of<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.skip())
            .take(self.page_size() as usize)
            .cloned()
            .collect()
    }

    pub fn to_paginated<T>(&self, total: usize, items: Vec<T>) -> Paginated<T> {
        Paginated {
            items,
            pagination: PaginationResult {
                page_num: self.page_num(),
                page_size: self.page_size(),
                total,
            },
        }
    }
}

/// Which page was served, and how many items there are across all pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub page_num: u32,
    pub page_size: u32,
    pub total: usize,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page_num: u32, page_size: u32) -> PaginationRequest {
        PaginationRequest {
            page_num,
            page_size,
        }
    }

    #[test]
    fn pages_split_items() {
        let items: Vec<u32> = (0..7).collect();
        assert_eq!(request(1, 3).page_of(&items), vec![0, 1, 2]);
        assert_eq!(request(3, 3).page_of(&items), vec![6]);
        assert!(request(4, 3).page_of(&items).is_empty());
    }

    #[test]
    fn out_of_range_requests_are_clamped() {
        let oversized = request(0, 10_000);
        assert_eq!(oversized.page_num(), 1);
        assert_eq!(oversized.page_size(), MAX_PAGE_SIZE);
        assert_eq!(oversized.skip(), 0);

        let empty = request(2, 0);
        assert_eq!(empty.page_size(), 1);
        assert_eq!(empty.skip(), 1);

        let far = request(u32::MAX, MAX_PAGE_SIZE);
        assert!(far.page_of(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn paginated_reports_effective_request() {
        let page = request(2, 500).to_paginated(250, vec!["x"]);
        assert_eq!(
            page.pagination,
            PaginationResult {
                page_num: 2,
                page_size: MAX_PAGE_SIZE,
                total: 250,
            }
        );
        assert_eq!(page.items, vec!["x"]);
    }
}
