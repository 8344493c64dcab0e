use std::num::NonZeroU32;

use crate::domain::entities::artwork::{Artwork, ArtworkId};

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// One fetched batch of records plus the server's total at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub records: Vec<Artwork>,
    pub total_count: u64,
}

impl Page {
    pub fn new(records: Vec<Artwork>, total_count: u64) -> Self {
        Self {
            records,
            total_count,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|record| record.id).collect()
    }
}

/// What is sent to the data source: a 1-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: NonZeroU32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: NonZeroU32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    offset: u64,
    page_size: NonZeroU32,
    total_count: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            offset: 0,
            page_size,
            total_count: 0,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// 1-based page number of the page starting at `offset`.
    pub fn page_number(&self) -> u32 {
        let index = self.offset / u64::from(self.page_size.get());
        u32::try_from(index + 1).unwrap_or(u32::MAX)
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page_number(), self.page_size)
    }

    pub fn page_count(&self) -> u32 {
        let size = u64::from(self.page_size.get());
        u32::try_from(self.total_count.div_ceil(size)).unwrap_or(u32::MAX)
    }

    pub fn offset_of_page(&self, page_number: u32) -> u64 {
        u64::from(page_number.saturating_sub(1)) * u64::from(self.page_size.get())
    }

    /// 1-based index of the first row on the current page, 0 when empty.
    pub fn first_row(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            (self.offset + 1).min(self.total_count)
        }
    }

    pub fn last_row(&self) -> u64 {
        (self.offset + u64::from(self.page_size.get())).min(self.total_count)
    }

    pub fn navigate(&mut self, offset: u64, page_size: NonZeroU32) {
        self.offset = offset;
        self.page_size = page_size;
    }

    /// Rows-per-page changes always go back to the first page.
    pub fn resize(&mut self, page_size: NonZeroU32) {
        if page_size != self.page_size {
            self.offset = 0;
        }
        self.page_size = page_size;
    }

    pub fn set_total(&mut self, total_count: u64) {
        self.total_count = total_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("page size should be positive")
    }

    #[test]
    fn page_number_is_offset_divided_by_page_size_plus_one() {
        for page_size in [1_u32, 5, 12, 100] {
            for offset in [0_u64, 1, 11, 12, 24, 25, 599] {
                let mut state = PaginationState::new(size(page_size));
                state.navigate(offset, size(page_size));
                let expected = offset / u64::from(page_size) + 1;
                assert_eq!(
                    u64::from(state.page_number()),
                    expected,
                    "offset {offset} page_size {page_size}"
                );
                assert_eq!(state.request().page_size, size(page_size));
            }
        }
    }

    #[test]
    fn default_state_starts_on_first_page_of_twelve() {
        let state = PaginationState::default();

        assert_eq!(state.offset(), 0);
        assert_eq!(state.page_size().get(), 12);
        assert_eq!(state.request(), PageRequest::new(1, size(12)));
    }

    #[test]
    fn row_report_bounds_follow_total() {
        let mut state = PaginationState::new(size(12));
        assert_eq!((state.first_row(), state.last_row()), (0, 0));

        state.set_total(50);
        state.navigate(48, size(12));
        assert_eq!(state.page_count(), 5);
        assert_eq!((state.first_row(), state.last_row()), (49, 50));
    }

    #[test]
    fn resize_resets_offset_only_when_size_changes() {
        let mut state = PaginationState::new(size(12));
        state.navigate(24, size(12));

        state.resize(size(12));
        assert_eq!(state.offset(), 24);

        state.resize(size(24));
        assert_eq!(state.offset(), 0);
        assert_eq!(state.offset_of_page(3), 48);
    }
}
