use std::num::NonZeroU32;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::domain::entities::artwork::{ArtworkCatalog, ArtworkId};
use crate::domain::entities::page::Page;
use crate::infra::export::csv::{default_export_file_name, export_artworks_csv};
use crate::infra::http::artic::ArticClient;
use crate::ui::format::{
    artist_name, image_url, inscription_excerpt, origin_label, year_label,
};
use crate::ui::paginator::{page_window, report, PAGE_LINKS};
use crate::ui::state::app_state::{AppState, ImagePreview};
use crate::usecase::ports::source::ArtworkSource;
use crate::usecase::services::page_loader::{LoadOutcome, LoadTicket, PageLoader};
use crate::usecase::services::selection_controller::{
    select_first, BulkOutcome, SelectError, SelectionController,
};

const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px 6px; vertical-align: middle;";
const HEADER_CELL_STYLE: &str =
    "border: 1px solid #bbb; padding: 6px; background: #f3f3f3; position: sticky; top: 0; text-align: left;";
const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

/// Fetches the ticket's page and hands the result back to the loader.
fn run_page_load(
    source: Arc<dyn ArtworkSource>,
    ticket: LoadTicket,
    mut loader: Signal<PageLoader>,
    mut catalog: Signal<ArtworkCatalog>,
    mut status: Signal<String>,
) {
    let page_number = ticket.request().page_number;
    status.set(format!("Loading page {page_number}..."));
    spawn(async move {
        let result = source.fetch_page(ticket.request()).await;
        if let Ok(page) = &result {
            catalog.write().remember(&page.records);
            log::debug!("catalog holds {} artworks", catalog.peek().len());
        }
        let outcome = loader.write().complete(ticket, result);
        match outcome {
            Ok(LoadOutcome::Applied) => status.set(format!("Page {page_number} loaded")),
            Ok(LoadOutcome::Stale) => {}
            Err(err) => status.set(format!("Failed to load page {page_number}: {err}")),
        }
    });
}

fn bulk_status(outcome: &Result<BulkOutcome, SelectError>, requested: u64) -> Option<String> {
    match outcome {
        Ok(BulkOutcome::Replaced(count)) if (*count as u64) < requested => Some(format!(
            "Only {count} artworks exist; all of them are selected"
        )),
        Ok(BulkOutcome::Replaced(count)) => Some(format!("Selected the first {count} artworks")),
        Ok(BulkOutcome::Superseded) | Err(SelectError::Cancelled) => None,
        Err(err) => Some(format!("Bulk selection failed, selection unchanged: {err}")),
    }
}

#[component]
pub fn App() -> Element {
    let config = match use_hook(AppConfig::from_env) {
        Ok(config) => config,
        Err(err) => {
            return rsx! {
                div {
                    p { "Invalid configuration: {err}" }
                }
            };
        }
    };
    let source = match use_hook(|| {
        ArticClient::new(&config)
            .map(|client| Arc::new(client) as Arc<dyn ArtworkSource>)
            .map_err(|err| format!("{err:#}"))
    }) {
        Ok(source) => source,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to create HTTP client: {err}" }
                }
            };
        }
    };

    let AppState {
        mut loader,
        mut selection,
        catalog,
        mut show_bulk_panel,
        mut bulk_input,
        mut preview,
        mut status,
    } = AppState::new(config.default_page_size);

    let source_for_init = source.clone();
    use_effect(move || {
        let ticket = loader.write().goto_page(1);
        run_page_load(source_for_init.clone(), ticket, loader, catalog, status);
    });

    let source_for_navigate = source.clone();
    let navigate = use_callback(move |page_number: u32| {
        let ticket = loader.write().goto_page(page_number);
        run_page_load(source_for_navigate.clone(), ticket, loader, catalog, status);
    });

    let source_for_resize = source.clone();
    let resize = use_callback(move |page_size: NonZeroU32| {
        let ticket = loader.write().begin_resize(page_size);
        run_page_load(source_for_resize.clone(), ticket, loader, catalog, status);
    });

    let source_for_retry = source.clone();
    let retry = use_callback(move |_: ()| {
        let ticket = loader.write().retry();
        if let Some(ticket) = ticket {
            run_page_load(source_for_retry.clone(), ticket, loader, catalog, status);
        }
    });

    let source_for_bulk = source.clone();
    let shortfall = config.bulk_shortfall;
    let run_bulk = use_callback(move |count: u64| {
        let page_size = loader.peek().pagination().page_size();
        let ticket = selection.write().begin_bulk();
        let source = source_for_bulk.clone();
        let mut catalog = catalog;
        status.set(format!("Selecting the first {count} artworks..."));
        spawn(async move {
            let result = select_first(
                source.as_ref(),
                count,
                page_size,
                shortfall,
                ticket.cancel_token(),
            )
            .await;
            if let Ok(bulk) = &result {
                catalog.write().remember(&bulk.records);
            }
            let outcome = selection.write().finish_bulk(ticket, result);
            if let Some(message) = bulk_status(&outcome, count) {
                status.set(message);
            }
        });
    });

    let loader_snapshot = loader();
    let selection_snapshot: SelectionController = selection();
    let selected = selection_snapshot.selected().clone();
    let pagination = *loader_snapshot.pagination();
    let records = loader_snapshot.records().to_vec();
    let page_ids: Vec<ArtworkId> = loader_snapshot.page().map(Page::ids).unwrap_or_default();
    let page_all_selected = selected.all_selected(&page_ids);
    let page_is_empty = page_ids.is_empty();
    let selected_count = selected.len();
    let is_loading = loader_snapshot.is_loading();
    let table_opacity = if is_loading { "0.6" } else { "1" };
    let last_error = loader_snapshot.last_error().cloned();
    let bulk_running = selection_snapshot.is_bulk_running();
    let current_page = pagination.page_number();
    let page_count = pagination.page_count();
    let page_size = pagination.page_size();
    let window = page_window(current_page, page_count, PAGE_LINKS);
    let page_report = report(&pagination);
    let page_size_options = config.page_size_options.clone();
    let iiif_base = config.iiif_base_url.clone();
    let iiif_base_for_export = iiif_base.clone();
    let inscription_budget = config.inscription_budget;
    let thumbnail_width = config.thumbnail_width;
    let preview_width = config.preview_width;

    let error_banner = last_error.map(|err| {
        rsx!(
            div {
                style: "background: #fdecea; border: 1px solid #d24; border-radius: 6px; padding: 6px 10px; margin-bottom: 8px; display: flex; gap: 12px; align-items: center;",
                span { "Could not load artworks: {err}" }
                button {
                    style: "{BUTTON_STYLE}",
                    onclick: move |_| retry.call(()),
                    "Retry"
                }
            }
        )
    });

    let preview_overlay = preview().map(|shown| {
        let left = shown.x + 16.0;
        let top = shown.y + 16.0;
        rsx!(
            div {
                style: "position: fixed; left: {left}px; top: {top}px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); padding: 6px; z-index: 1300; pointer-events: none;",
                img { src: "{shown.url}", style: "max-width: 360px; max-height: 360px; display: block;" }
            }
        )
    });

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 8px;",
            onclick: move |_| preview.set(None),

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    style: "{BUTTON_STYLE}",
                    onclick: move |event| {
                        event.stop_propagation();
                        let open = show_bulk_panel();
                        show_bulk_panel.set(!open);
                    },
                    "Select first N..."
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: selected_count == 0,
                    onclick: move |_| selection.write().clear(),
                    "Clear selection"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: selected_count == 0,
                    onclick: move |_| {
                        let records = catalog.read().resolve(selection.read().selected());
                        if records.is_empty() {
                            status.set("Nothing selected to export".to_string());
                            return;
                        }
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name(default_export_file_name())
                            .save_file() else {
                            status.set("Export cancelled".to_string());
                            return;
                        };
                        match export_artworks_csv(&path, &records, &iiif_base_for_export) {
                            Ok(count) => status.set(format!("Exported {count} artworks to {}", path.display())),
                            Err(err) => status.set(format!("Export failed: {err:#}")),
                        }
                    },
                    "Export selected"
                }
                span { "{selected_count} selected" }
                if is_loading {
                    span { style: "color: #36c;", "Loading..." }
                }
                span { style: "color: #555;", "{status}" }
            }

            if show_bulk_panel() {
                div {
                    style: "position: absolute; margin-top: 4px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 10px; display: flex; gap: 8px; align-items: center;",
                    onclick: move |event| event.stop_propagation(),
                    input {
                        r#type: "number",
                        min: "0",
                        placeholder: "Number of rows",
                        value: "{bulk_input}",
                        oninput: move |event| bulk_input.set(event.value()),
                    }
                    button {
                        style: "{BUTTON_STYLE}",
                        onclick: move |_| {
                            match bulk_input().trim().parse::<u64>() {
                                Ok(count) => {
                                    show_bulk_panel.set(false);
                                    run_bulk.call(count);
                                }
                                Err(_) => status.set("Enter a whole number of rows to select".to_string()),
                            }
                        },
                        "Submit"
                    }
                    if bulk_running {
                        button {
                            style: "{BUTTON_STYLE}",
                            onclick: move |_| {
                                selection.write().cancel_bulk();
                                status.set("Bulk selection cancelled".to_string());
                            },
                            "Cancel"
                        }
                    }
                }
            }

            {error_banner}

            div {
                style: "max-height: 75vh; overflow: auto; border: 1px solid #ddd; opacity: {table_opacity};",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            th { style: "{HEADER_CELL_STYLE} text-align: center;",
                                input {
                                    r#type: "checkbox",
                                    checked: page_all_selected,
                                    disabled: page_is_empty,
                                    onclick: move |_| {
                                        let mut controller = selection.write();
                                        if page_all_selected {
                                            controller.deselect_page(&page_ids);
                                        } else {
                                            controller.select_page(&page_ids);
                                        }
                                    }
                                }
                            }
                            th { style: "{HEADER_CELL_STYLE}", "Image" }
                            th { style: "{HEADER_CELL_STYLE}", "Title" }
                            th { style: "{HEADER_CELL_STYLE}", "Artist" }
                            th { style: "{HEADER_CELL_STYLE}", "Origin" }
                            th { style: "{HEADER_CELL_STYLE}", "Inscriptions" }
                            th { style: "{HEADER_CELL_STYLE}", "Start" }
                            th { style: "{HEADER_CELL_STYLE}", "End" }
                        }
                    }
                    tbody {
                        {records.iter().map(|record| {
                            let id = record.id;
                            let is_selected = selected.contains(id);
                            let row_style = if is_selected { "background: #eef4ff;" } else { "" };
                            let title = record.title.clone();
                            let artist = artist_name(record.artist_display.as_deref());
                            let origin = origin_label(record.place_of_origin.as_deref()).to_string();
                            let inscriptions =
                                inscription_excerpt(record.inscriptions.as_deref(), inscription_budget);
                            let start = year_label(record.date_start);
                            let end = year_label(record.date_end);
                            let large = image_url(&iiif_base, record.image_token(), preview_width);
                            let thumbnail = match image_url(&iiif_base, record.image_token(), thumbnail_width) {
                                Some(src) => rsx!(
                                    img {
                                        src: "{src}",
                                        alt: "{title}",
                                        style: "width: 64px; height: 64px; object-fit: cover; border-radius: 4px; cursor: zoom-in;",
                                        onmouseenter: move |event| {
                                            let Some(url) = large.clone() else {
                                                return;
                                            };
                                            let point = event.client_coordinates();
                                            preview.set(Some(ImagePreview {
                                                artwork_id: id,
                                                url,
                                                x: point.x,
                                                y: point.y,
                                            }));
                                        },
                                        onmouseleave: move |_| {
                                            let hovering =
                                                matches!(&*preview.peek(), Some(shown) if shown.artwork_id == id);
                                            if hovering {
                                                preview.set(None);
                                            }
                                        },
                                    }
                                ),
                                None => rsx!(span { style: "color: #888;", "No image" }),
                            };
                            rsx!(
                                tr {
                                    key: "{id}",
                                    style: "{row_style}",
                                    td { style: "{CELL_STYLE} text-align: center;",
                                        input {
                                            r#type: "checkbox",
                                            checked: is_selected,
                                            onclick: move |_| {
                                                selection.write().toggle(id);
                                            }
                                        }
                                    }
                                    td { style: "{CELL_STYLE}", {thumbnail} }
                                    td { style: "{CELL_STYLE}", "{title}" }
                                    td { style: "{CELL_STYLE}", "{artist}" }
                                    td { style: "{CELL_STYLE}", "{origin}" }
                                    td { style: "{CELL_STYLE} color: #444;", "{inscriptions}" }
                                    td { style: "{CELL_STYLE} text-align: right;", "{start}" }
                                    td { style: "{CELL_STYLE} text-align: right;", "{end}" }
                                }
                            )
                        })}
                    }
                }
                if records.is_empty() && !is_loading {
                    p { style: "padding: 12px; color: #888;", "No artworks to show." }
                }
            }

            div {
                style: "display: flex; gap: 6px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: current_page <= 1,
                    onclick: move |_| navigate.call(1),
                    "<<"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: current_page <= 1,
                    onclick: move |_| navigate.call(current_page.saturating_sub(1).max(1)),
                    "<"
                }
                {window.map(|page_number| {
                    let background = if page_number == current_page { "#eef4ff" } else { "#fff" };
                    rsx!(
                        button {
                            key: "{page_number}",
                            style: "{BUTTON_STYLE} background: {background};",
                            onclick: move |_| navigate.call(page_number),
                            "{page_number}"
                        }
                    )
                })}
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: current_page >= page_count,
                    onclick: move |_| navigate.call(current_page + 1),
                    ">"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: current_page >= page_count,
                    onclick: move |_| navigate.call(page_count),
                    ">>"
                }
                select {
                    value: "{page_size}",
                    onchange: move |event| {
                        let parsed = event.value().parse::<u32>().ok().and_then(NonZeroU32::new);
                        if let Some(size) = parsed {
                            resize.call(size);
                        }
                    },
                    {page_size_options.iter().map(|size| rsx!(
                        option { key: "{size}", value: "{size}", "{size}" }
                    ))}
                }
                span { style: "color: #555;", "{page_report}" }
            }

            {preview_overlay}
        }
    }
}
