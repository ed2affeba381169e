//! Browse page: file selection, schema discovery, data query and CSV export.
//!
//! Control flow matches the two-phase endpoint protocol: a sentinel
//! `get_data` request discovers the merged schema and seeds the target
//! column expression, a second request runs the actual projection. There is
//! no request cancellation; the last completed response wins by overwriting
//! the signals.

pub mod api;
pub mod file_picker;
pub mod logic;
pub mod results_table;

use std::collections::HashSet;

use contracts::browse::DataRow;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::export::{download_csv, rows_to_csv, suggest_filename};
use file_picker::FilePicker;
use logic::TableMode;
use results_table::{ResultsPane, ResultsView, TableView};

/// Source of truth for the CSV download: the rows and headers of the most
/// recent successful query, plus the selection context the filename is
/// derived from. Cleared on every new request dispatch and on any failure,
/// so a stale result can never be exported.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExport {
    pub rows: Vec<DataRow>,
    pub headers: Vec<String>,
    pub selected_files: Vec<String>,
    pub column_tag: String,
}

#[component]
pub fn BrowsePage() -> impl IntoView {
    let catalog = RwSignal::new(Vec::<String>::new());
    let catalog_error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let showing_all = RwSignal::new(false);
    let selected = RwSignal::new(HashSet::<String>::new());

    // Merged column cache from the last successful schema discovery, plus
    // the placeholder text shown in its place while it is absent.
    let schema_columns = RwSignal::new(Vec::<String>::new());
    let schema_status = RwSignal::new(String::new());
    let target_columns = RwSignal::new(String::new());

    let results = RwSignal::new(ResultsView::Idle);
    let export = RwSignal::new(None::<QueryExport>);

    let schema_loading = RwSignal::new(false);
    let data_loading = RwSignal::new(false);

    // Catalog is fetched once per page load; there is no re-fetch.
    spawn_local(async move {
        match api::fetch_files().await {
            Ok(files) => {
                log::info!("Loaded {} files into the catalog", files.len());
                catalog.set(files);
            }
            Err(error) => {
                log::error!("Failed to load the file list: {}", error);
                catalog_error.set(Some(format!("Failed to load the file list: {}", error)));
            }
        }
    });

    let on_load_columns = move |_| {
        let files = logic::selected_in_catalog_order(&catalog.get(), &selected.get());
        if files.is_empty() {
            results.set(ResultsView::Notice(
                "Select at least one file first.".to_string(),
            ));
            return;
        }

        schema_loading.set(true);
        schema_columns.set(Vec::new());
        schema_status.set("Loading column names...".to_string());
        results.set(ResultsView::Loading(
            "Loading sample data and column names...".to_string(),
        ));
        export.set(None);

        spawn_local(async move {
            match api::load_schema(files).await {
                Ok(schema) => {
                    schema_columns.set(schema.all_columns.clone());
                    // Default, not a lock: the user may edit this freely
                    // until the next successful schema load.
                    target_columns.set(schema.all_columns.join(","));

                    let rows = schema.sample_data.unwrap_or_default();
                    if rows.is_empty() {
                        results.set(ResultsView::Notice(
                            "Columns loaded. Enter the columns to query. (No sample data returned.)"
                                .to_string(),
                        ));
                    } else {
                        let headers = schema
                            .sample_data_columns
                            .unwrap_or_else(|| rows[0].keys().cloned().collect());
                        let total = schema.sample_data_row_count.unwrap_or(rows.len() as u64);
                        results.set(ResultsView::Table(TableView {
                            title: format!("Sample data ({} rows):", total),
                            headers,
                            rows,
                            mode: TableMode::Sample,
                            total_rows: total,
                        }));
                    }
                }
                Err(error) => {
                    log::error!("Failed to load columns: {}", error);
                    schema_status.set("Failed to load column names.".to_string());
                    results.set(ResultsView::Failed(format!(
                        "Failed to load columns: {}",
                        error
                    )));
                }
            }
            schema_loading.set(false);
        });
    };

    let on_fetch_data = move |_| {
        let files = logic::selected_in_catalog_order(&catalog.get(), &selected.get());
        let target = target_columns.get().trim().to_string();

        if files.is_empty() {
            results.set(ResultsView::Notice(
                "Select at least one file first.".to_string(),
            ));
            return;
        }
        if target.is_empty() {
            results.set(ResultsView::Notice(
                "Enter the columns to query, or * for all columns.".to_string(),
            ));
            return;
        }

        data_loading.set(true);
        results.set(ResultsView::Loading("Fetching data...".to_string()));
        export.set(None);

        spawn_local(async move {
            match api::fetch_data(files.clone(), target.clone()).await {
                Ok(result) => {
                    results.set(ResultsView::Table(TableView {
                        title: format!("Query result ({} rows total):", result.row_count),
                        headers: result.columns.clone(),
                        rows: result.data.clone(),
                        mode: TableMode::Query,
                        total_rows: result.row_count,
                    }));
                    if result.data.is_empty() {
                        export.set(None);
                    } else {
                        export.set(Some(QueryExport {
                            rows: result.data,
                            headers: result.columns,
                            selected_files: files,
                            column_tag: logic::column_tag(&target),
                        }));
                    }
                }
                Err(error) => {
                    log::error!("Failed to fetch data: {}", error);
                    export.set(None);
                    results.set(ResultsView::Failed(format!(
                        "Failed to fetch data: {}",
                        error
                    )));
                }
            }
            data_loading.set(false);
        });
    };

    let on_download = move |_| {
        if let Some(snapshot) = export.get() {
            let filename = suggest_filename(&snapshot.selected_files, &snapshot.column_tag);
            let csv = rows_to_csv(&snapshot.rows, &snapshot.headers);
            if let Err(error) = download_csv(&csv, &filename) {
                log::error!("CSV download failed: {}", error);
            }
        }
    };

    view! {
        <div>
            <h2 style="font-size: 1.1em;">"1. Select files"</h2>
            <FilePicker
                catalog=catalog
                catalog_error=catalog_error
                search=search
                showing_all=showing_all
                selected=selected
            />

            <h2 style="font-size: 1.1em;">"2. Load the merged schema"</h2>
            <div style="margin-bottom: 16px;">
                <button
                    on:click=on_load_columns
                    disabled=move || schema_loading.get()
                    style="padding: 4px 12px; cursor: pointer;"
                >
                    {move || if schema_loading.get() { "Loading..." } else { "Load columns" }}
                </button>
                <textarea
                    id="columns-display"
                    readonly=true
                    prop:value=move || {
                        let columns = schema_columns.get();
                        if columns.is_empty() {
                            schema_status.get()
                        } else {
                            columns.join("\n")
                        }
                    }
                    rows="6"
                    style="display: block; width: 480px; margin-top: 8px; font-family: monospace;"
                ></textarea>
            </div>

            <h2 style="font-size: 1.1em;">"3. Query"</h2>
            <div style="margin-bottom: 16px;">
                <label for="select-target-columns">"Target columns (comma-separated, or *):"</label>
                <input
                    id="select-target-columns"
                    type="text"
                    prop:value=target_columns
                    on:input=move |ev| target_columns.set(event_target_value(&ev))
                    style="display: block; width: 480px; padding: 4px 8px; margin: 6px 0;"
                />
                <button
                    on:click=on_fetch_data
                    disabled=move || data_loading.get()
                    style="padding: 4px 12px; cursor: pointer;"
                >
                    {move || if data_loading.get() { "Fetching..." } else { "Get data" }}
                </button>
                {move || {
                    if export.get().is_some() {
                        view! {
                            <button
                                id="download-data-btn"
                                on:click=on_download
                                style="padding: 4px 12px; margin-left: 10px; cursor: pointer;"
                            >
                                "Download result (CSV)"
                            </button>
                        }
                        .into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </div>

            <ResultsPane view=results />
        </div>
    }
}
