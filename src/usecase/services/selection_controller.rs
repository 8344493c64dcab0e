use std::num::NonZeroU32;

use tokio_util::sync::CancellationToken;

use crate::domain::entities::artwork::{Artwork, ArtworkId};
use crate::domain::entities::page::PageRequest;
use crate::domain::entities::selection::SelectionSet;
use crate::usecase::ports::source::{ArtworkSource, FailureKind, FetchError};

/// What a bulk select does when the source runs out before `n` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shortfall {
    /// Select whatever exists.
    #[default]
    Truncate,
    /// Fail with [`SelectError::ExhaustedSource`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("fetching page {page_number} failed: {source}")]
    Fetch {
        page_number: u32,
        #[source]
        source: FetchError,
    },

    #[error("requested {requested} records but only {available} exist")]
    ExhaustedSource { requested: u64, available: u64 },

    #[error("bulk selection cancelled")]
    Cancelled,
}

impl SelectError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Fetch { source, .. } => Some(source.kind()),
            Self::ExhaustedSource { .. } => Some(FailureKind::ExhaustedSource),
            Self::Cancelled => None,
        }
    }
}

/// Records gathered by a bulk select, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkSelection {
    pub records: Vec<Artwork>,
    pub pages_fetched: u32,
    pub requested: u64,
}

impl BulkSelection {
    pub fn selection(&self) -> SelectionSet {
        self.records.iter().map(|record| record.id).collect()
    }

    /// True when the source held fewer than `requested` records.
    pub fn is_short(&self) -> bool {
        (self.records.len() as u64) < self.requested
    }
}

/// Gathers the first `n` records of the whole dataset.
///
/// Pages `1..=ceil(n / page_size)` are fetched one after another. The last
/// page is truncated to the remainder, and fetching stops early on a short
/// or empty page. Nothing outside the returned value is touched, so an
/// error leaves every caller-owned state as it was.
pub async fn select_first(
    source: &dyn ArtworkSource,
    n: u64,
    page_size: NonZeroU32,
    shortfall: Shortfall,
    cancel: &CancellationToken,
) -> Result<BulkSelection, SelectError> {
    let mut bulk = BulkSelection {
        requested: n,
        ..BulkSelection::default()
    };
    if n == 0 {
        return Ok(bulk);
    }

    let size = u64::from(page_size.get());
    let pages = u32::try_from(n.div_ceil(size)).unwrap_or(u32::MAX);

    for page_number in 1..=pages {
        if cancel.is_cancelled() {
            return Err(SelectError::Cancelled);
        }

        let request = PageRequest::new(page_number, page_size);
        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SelectError::Cancelled),
            result = source.fetch_page(request) => {
                result.map_err(|source| SelectError::Fetch { page_number, source })?
            }
        };
        bulk.pages_fetched += 1;

        let empty_page = page.is_empty();
        let short_page = (page.len() as u64) < size;
        let remaining = n - bulk.records.len() as u64;
        bulk.records.extend(
            page.records
                .into_iter()
                .take(usize::try_from(remaining).unwrap_or(usize::MAX)),
        );

        if bulk.records.len() as u64 >= n {
            break;
        }
        if short_page {
            log::debug!(
                "page {page_number} came back {}; source exhausted",
                if empty_page { "empty" } else { "short" }
            );
            break;
        }
    }

    if bulk.is_short() && shortfall == Shortfall::Reject {
        return Err(SelectError::ExhaustedSource {
            requested: n,
            available: bulk.records.len() as u64,
        });
    }

    log::info!(
        "bulk select gathered {} of {} records over {} pages",
        bulk.records.len(),
        n,
        bulk.pages_fetched
    );
    Ok(bulk)
}

/// Handle for one bulk run. Only the newest one may commit.
#[derive(Debug, Clone)]
pub struct BulkTicket {
    generation: u64,
    cancel: CancellationToken,
}

impl BulkTicket {
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    /// The selection was replaced; carries the new size.
    Replaced(usize),
    /// A later run or an explicit cancel superseded this one.
    Superseded,
}

/// Owns the selection set and sequences bulk runs against it.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: SelectionSet,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl PartialEq for SelectionController {
    fn eq(&self, other: &Self) -> bool {
        self.selected == other.selected
            && self.generation == other.generation
            && self.in_flight.is_some() == other.in_flight.is_some()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    pub fn toggle(&mut self, id: ArtworkId) -> bool {
        self.selected.toggle(id)
    }

    pub fn select_page(&mut self, ids: &[ArtworkId]) {
        self.selected.select_all(ids);
    }

    pub fn deselect_page(&mut self, ids: &[ArtworkId]) {
        self.selected.deselect_all(ids);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_bulk_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a bulk run, cancelling any run still in flight.
    pub fn begin_bulk(&mut self) -> BulkTicket {
        self.cancel_bulk();
        self.generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        BulkTicket {
            generation: self.generation,
            cancel,
        }
    }

    pub fn cancel_bulk(&mut self) {
        if let Some(token) = self.in_flight.take() {
            log::debug!("cancelling bulk select run #{}", self.generation);
            token.cancel();
        }
    }

    /// Commits a bulk result. Success overwrites the whole selection;
    /// failure leaves it untouched.
    pub fn finish_bulk(
        &mut self,
        ticket: BulkTicket,
        result: Result<BulkSelection, SelectError>,
    ) -> Result<BulkOutcome, SelectError> {
        if ticket.generation != self.generation || ticket.cancel.is_cancelled() {
            return Ok(BulkOutcome::Superseded);
        }
        self.in_flight = None;

        let bulk = result?;
        self.selected = bulk.selection();
        Ok(BulkOutcome::Replaced(self.selected.len()))
    }

    #[allow(dead_code)]
    pub async fn select_first(
        &mut self,
        source: &dyn ArtworkSource,
        n: u64,
        page_size: NonZeroU32,
        shortfall: Shortfall,
    ) -> Result<BulkOutcome, SelectError> {
        let ticket = self.begin_bulk();
        let result = select_first(source, n, page_size, shortfall, ticket.cancel_token()).await;
        self.finish_bulk(ticket, result)
    }
}
