//! Page-number pagination shared by every admin listing.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use lensclub_api_types::PaginationMeta;
use serde::Serialize;

/// Which page, filters and sort of a resource the caller wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    page: u32,
    page_size: NonZeroU32,
    filters: BTreeMap<String, String>,
    sort: Option<String>,
}

impl ListQuery {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            page: 1,
            page_size,
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    /// Builder used when a caller already knows the page it wants, e.g. a
    /// deep link. Pages below 1 are clamped to 1.
    #[must_use]
    pub fn at_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.put_filter(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Option<String>) -> Self {
        self.sort = sort.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub(crate) fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub(crate) fn set_page_size(&mut self, page_size: NonZeroU32) {
        self.page_size = page_size;
    }

    pub(crate) fn set_sort(&mut self, sort: Option<String>) {
        self.sort = sort.filter(|key| !key.trim().is_empty());
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Empty values mean "unset" and drop the filter entirely.
    pub(crate) fn put_filter(&mut self, name: String, value: String) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.filters.remove(&name);
        } else {
            self.filters.insert(name, trimmed.to_string());
        }
    }

    /// Query-string pairs in the order `page`, `limit`, filters, `sort`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("limit".to_string(), self.page_size.to_string()));
        for (name, value) in &self.filters {
            params.push((name.clone(), value.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        params
    }
}

/// Normalised pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Computes metadata from a total count, as the backend does.
    pub fn compute(current_page: u32, page_size: NonZeroU32, total_items: u64) -> Self {
        let size = u64::from(page_size.get());
        let total_pages = u32::try_from(total_items.div_ceil(size)).unwrap_or(u32::MAX);
        Self {
            current_page,
            total_pages,
            total_items,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Metadata for a list the backend returned without pagination.
    pub fn single_page(len: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: len as u64,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    /// Page labels for Previous/Next controls, `None` marking a gap.
    pub fn page_window(&self, edge: u32, around: u32) -> Vec<Option<u32>> {
        let last = self.total_pages;
        if last == 0 {
            return Vec::new();
        }
        let current = self.current_page.clamp(1, last);

        let mut pages = Vec::new();
        let left_end = (1 + edge).min(last + 1);
        pages.extend((1..left_end).map(Some));

        let mid_start = left_end.max(current.saturating_sub(around));
        let mid_end = (current + around + 1).min(last + 1);
        if mid_start > left_end {
            pages.push(None);
        }
        pages.extend((mid_start..mid_end).map(Some));

        let right_start = mid_end.max(last.saturating_sub(edge) + 1);
        if right_start > mid_end {
            pages.push(None);
        }
        pages.extend((right_start..=last).map(Some));
        pages
    }
}

impl From<PaginationMeta> for Pagination {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_items: meta.total_items,
            has_next_page: meta
                .has_next_page
                .unwrap_or(meta.current_page < meta.total_pages),
            has_prev_page: meta.has_prev_page.unwrap_or(meta.current_page > 1),
        }
    }
}

/// One page of a resource, in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn unpaged(items: Vec<T>) -> Self {
        let pagination = Pagination::single_page(items.len());
        Self { items, pagination }
    }
}
