//! One window of a result set and the navigation counts derived from it.

use serde::Serialize;
use utoipa::ToSchema;

/// One page of records plus the counts needed to navigate the rest.
///
/// Only `page_number`, `page_size` and `total_items` are stored; page
/// count and neighbour flags are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    items: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_items: u64,
}

impl<T> PageResult<T> {
    /// `page_number` and `page_size` are raised to at least 1; `items` is
    /// truncated to `page_size`.
    pub fn new(mut items: Vec<T>, page_number: u32, page_size: u32, total_items: u64) -> Self {
        let page_size = page_size.max(1);
        items.truncate(page_size as usize);
        Self {
            items,
            page_number: page_number.max(1),
            page_size,
            total_items,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u64 {
        self.meta().total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.meta().has_previous_page
    }

    pub fn has_next_page(&self) -> bool {
        self.meta().has_next_page
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta::new(self.page_number, self.page_size, self.total_items)
    }

    /// Map every item in order, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }

    /// Like [`map`](Self::map) but stops at the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PageResult<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PageResult {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
        })
    }
}

/// Pagination block of a paged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    pub fn new(page_number: u32, page_size: u32, total_items: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(u64::from(page_size));
        Self {
            page_number,
            page_size,
            total_items,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: u64::from(page_number) < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values_follow_the_stored_counts() {
        for total in 0u64..40 {
            for size in 1u32..12 {
                let meta = PageMeta::new(2, size, total);
                let expected = if total == 0 {
                    0
                } else {
                    (total + u64::from(size) - 1) / u64::from(size)
                };
                assert_eq!(meta.total_pages, expected, "total={total} size={size}");
                assert!(meta.has_previous_page);
                assert_eq!(meta.has_next_page, 2 < expected);
            }
        }
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: PageResult<u8> = PageResult::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn items_never_exceed_page_size() {
        let page = PageResult::new(vec![1, 2, 3, 4], 1, 3, 4);
        assert_eq!(page.items(), &[1, 2, 3]);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = PageResult::new(vec![1, 2], 2, 2, 5).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_items(), 5);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn try_map_stops_on_error() {
        let page = PageResult::new(vec![1, 2, 3], 1, 10, 3);
        let result: Result<PageResult<i32>, String> =
            page.try_map(|n| if n == 2 { Err("two".to_string()) } else { Ok(n) });
        assert_eq!(result.unwrap_err(), "two");
    }

    #[test]
    fn meta_serializes_in_camel_case() {
        let json = serde_json::to_value(PageMeta::new(1, 10, 23)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPreviousPage"], false);
    }
}
