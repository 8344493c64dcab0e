use std::num::NonZeroU32;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::artwork::{ArtworkCatalog, ArtworkId};
use crate::usecase::services::page_loader::PageLoader;
use crate::usecase::services::selection_controller::SelectionController;

/// Enlarged image shown next to the pointer while hovering a thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    pub artwork_id: ArtworkId,
    pub url: String,
    pub x: f64,
    pub y: f64,
}

pub struct AppState {
    pub loader: Signal<PageLoader>,
    pub selection: Signal<SelectionController>,
    pub catalog: Signal<ArtworkCatalog>,
    pub show_bulk_panel: Signal<bool>,
    pub bulk_input: Signal<String>,
    pub preview: Signal<Option<ImagePreview>>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            loader: use_signal(|| PageLoader::new(page_size)),
            selection: use_signal(SelectionController::new),
            catalog: use_signal(ArtworkCatalog::new),
            show_bulk_panel: use_signal(|| false),
            bulk_input: use_signal(String::new),
            preview: use_signal(|| None::<ImagePreview>),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
