use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::page::{Page, PageRequest};

/// The failure classes a caller has to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkFailure,
    InvalidResponse,
    ExhaustedSource,
}

/// Errors from a single page fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into a page.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Timeout(_) => FailureKind::NetworkFailure,
            Self::Status { .. } | Self::Malformed(_) => FailureKind::InvalidResponse,
        }
    }
}

/// Upstream paged data source.
///
/// Futures are not required to be `Send`: the UI drives them on a
/// single-threaded executor, and the web target cannot produce `Send`
/// HTTP futures.
#[async_trait(?Send)]
pub trait ArtworkSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, FetchError>;
}
