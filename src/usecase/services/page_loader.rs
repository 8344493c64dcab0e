use std::num::NonZeroU32;

use crate::domain::entities::artwork::Artwork;
use crate::domain::entities::page::{Page, PageRequest, PaginationState};
use crate::usecase::ports::source::{ArtworkSource, FetchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading { request: PageRequest },
    Ready,
    Failed { request: PageRequest, error: FetchError },
}

/// Handle for one issued page request. Only the newest ticket may update
/// the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    request: PageRequest,
    offset: u64,
}

impl LoadTicket {
    pub fn request(&self) -> PageRequest {
        self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Current page, its pagination, and the request sequence guard.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLoader {
    pagination: PaginationState,
    displayed: PaginationState,
    status: LoadStatus,
    page: Option<Page>,
    latest_seq: u64,
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new(PaginationState::default().page_size())
    }
}

impl PageLoader {
    pub fn new(page_size: NonZeroU32) -> Self {
        let pagination = PaginationState::new(page_size);
        Self {
            pagination,
            displayed: pagination,
            status: LoadStatus::Idle,
            page: None,
            latest_seq: 0,
        }
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        match &self.status {
            LoadStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Last successfully loaded page.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn records(&self) -> &[Artwork] {
        self.page
            .as_ref()
            .map(|page| page.records.as_slice())
            .unwrap_or(&[])
    }

    /// Moves to `offset`/`page_size` and enters `Loading` from any state.
    pub fn begin(&mut self, offset: u64, page_size: NonZeroU32) -> LoadTicket {
        self.pagination.navigate(offset, page_size);
        self.issue()
    }

    pub fn goto_page(&mut self, page_number: u32) -> LoadTicket {
        let offset = self.pagination.offset_of_page(page_number);
        let page_size = self.pagination.page_size();
        self.begin(offset, page_size)
    }

    /// Changes rows per page, which also returns to the first page.
    pub fn begin_resize(&mut self, page_size: NonZeroU32) -> LoadTicket {
        self.pagination.resize(page_size);
        self.issue()
    }

    /// Re-issues the request that last failed.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        let LoadStatus::Failed { request, .. } = self.status else {
            return None;
        };
        let offset = u64::from(request.page_number.saturating_sub(1)) * u64::from(request.page_size.get());
        Some(self.begin(offset, request.page_size))
    }

    fn issue(&mut self) -> LoadTicket {
        self.latest_seq += 1;
        let request = self.pagination.request();
        self.status = LoadStatus::Loading { request };
        log::debug!(
            "page request #{} issued: page {} size {}",
            self.latest_seq,
            request.page_number,
            request.page_size
        );
        LoadTicket {
            seq: self.latest_seq,
            request,
            offset: self.pagination.offset(),
        }
    }

    /// Applies the result of `ticket`'s fetch.
    ///
    /// Responses for anything but the newest ticket are discarded. A failure
    /// keeps the previous page and rolls pagination back to it.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Page, FetchError>,
    ) -> Result<LoadOutcome, FetchError> {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "dropping stale response #{} (latest #{})",
                ticket.seq,
                self.latest_seq
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(page) => {
                self.pagination
                    .navigate(ticket.offset, ticket.request.page_size);
                self.pagination.set_total(page.total_count);
                self.displayed = self.pagination;
                log::info!(
                    "loaded page {} ({} records, total {})",
                    ticket.request.page_number,
                    page.len(),
                    page.total_count
                );
                self.page = Some(page);
                self.status = LoadStatus::Ready;
                Ok(LoadOutcome::Applied)
            }
            Err(error) => {
                log::warn!(
                    "loading page {} failed: {error}",
                    ticket.request.page_number
                );
                self.pagination = self.displayed;
                self.status = LoadStatus::Failed {
                    request: ticket.request,
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// Fetches the page at `offset` and applies it.
    #[allow(dead_code)]
    pub async fn load(
        &mut self,
        source: &dyn ArtworkSource,
        offset: u64,
        page_size: NonZeroU32,
    ) -> Result<LoadOutcome, FetchError> {
        let ticket = self.begin(offset, page_size);
        let result = source.fetch_page(ticket.request()).await;
        self.complete(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::artwork::Artwork;

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("page size should be positive")
    }

    fn page_of(ids: std::ops::Range<u64>, total: u64) -> Page {
        Page::new(
            ids.map(|id| Artwork::new(id, format!("Artwork {id}")))
                .collect(),
            total,
        )
    }

    #[test]
    fn state_machine_moves_idle_loading_ready() {
        let mut loader = PageLoader::new(size(12));
        assert_eq!(loader.status(), &LoadStatus::Idle);

        let ticket = loader.begin(0, size(12));
        assert!(loader.is_loading());

        let outcome = loader
            .complete(ticket, Ok(page_of(1..13, 50)))
            .expect("load should succeed");

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(loader.status(), &LoadStatus::Ready);
        assert_eq!(loader.pagination().total_count(), 50);
        assert_eq!(loader.records().len(), 12);
    }

    #[test]
    fn older_ticket_cannot_overwrite_newer_page() {
        let mut loader = PageLoader::new(size(12));
        let first = loader.begin(0, size(12));
        let second = loader.begin(12, size(12));

        let newer = loader
            .complete(second, Ok(page_of(13..25, 50)))
            .expect("newest response should apply");
        let older = loader
            .complete(first, Ok(page_of(1..13, 49)))
            .expect("stale response is not an error");

        assert_eq!(newer, LoadOutcome::Applied);
        assert_eq!(older, LoadOutcome::Stale);
        assert_eq!(loader.records()[0].id.0, 13);
        assert_eq!(loader.pagination().total_count(), 50);
        assert_eq!(loader.pagination().page_number(), 2);
    }

    #[test]
    fn stale_failure_is_ignored_while_newer_request_is_in_flight() {
        let mut loader = PageLoader::new(size(12));
        let first = loader.begin(0, size(12));
        let _second = loader.begin(12, size(12));

        let outcome = loader.complete(first, Err(FetchError::Network("reset".into())));

        assert_eq!(outcome, Ok(LoadOutcome::Stale));
        assert!(loader.is_loading(), "newest request is still pending");
    }

    #[test]
    fn failure_keeps_last_good_page_and_allows_retry() {
        let mut loader = PageLoader::new(size(12));
        let ticket = loader.begin(0, size(12));
        loader
            .complete(ticket, Ok(page_of(1..13, 50)))
            .expect("first load should succeed");

        let ticket = loader.begin(24, size(12));
        let err = loader
            .complete(
                ticket,
                Err(FetchError::Status {
                    status: 500,
                    message: "boom".into(),
                }),
            )
            .expect_err("failure should surface");

        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert!(!loader.is_loading(), "loading flag should clear on failure");
        assert_eq!(loader.records()[0].id.0, 1, "previous page stays visible");
        assert_eq!(loader.pagination().offset(), 0, "pagination rolls back");

        let retry = loader.retry().expect("failed request should be retryable");
        assert_eq!(retry.request().page_number, 3);
        assert_eq!(loader.pagination().offset(), 24);
        assert!(loader.retry().is_none(), "nothing to retry while loading");
    }
}
