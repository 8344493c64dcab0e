use std::collections::HashMap;
use std::fmt;

use crate::domain::entities::selection::SelectionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtworkId(pub u64);

impl From<u64> for ArtworkId {
    fn from(value: u64) -> Self {
        ArtworkId(value)
    }
}

impl From<ArtworkId> for u64 {
    fn from(value: ArtworkId) -> Self {
        value.0
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One artwork row as the museum API describes it.
///
/// Every descriptive field except the title may be missing upstream. The
/// year range is passed through as-is: `date_end >= date_start` is not
/// guaranteed by the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub place_of_origin: Option<String>,
    pub artist_display: Option<String>,
    pub inscriptions: Option<String>,
    pub date_start: Option<i32>,
    pub date_end: Option<i32>,
    pub image_id: Option<String>,
}

impl Artwork {
    pub fn new(id: impl Into<ArtworkId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
            image_id: None,
        }
    }

    /// Image token, or `None` when the source sent nothing usable.
    pub fn image_token(&self) -> Option<&str> {
        self.image_id
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Every record fetched during the session, keyed by id.
///
/// Rows can only be selected after they were fetched, so a catalog fed by
/// every page load and bulk fetch can resolve any selection to records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkCatalog {
    records: HashMap<ArtworkId, Artwork>,
}

impl ArtworkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, records: &[Artwork]) {
        for record in records {
            self.records.insert(record.id, record.clone());
        }
    }

    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.records.get(&id)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Selected records in id order. Ids the catalog never saw are skipped.
    pub fn resolve(&self, selection: &SelectionSet) -> Vec<Artwork> {
        selection
            .iter()
            .filter_map(|id| self.get(id).cloned())
            .collect()
    }
}
