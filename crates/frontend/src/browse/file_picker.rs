//! File catalog panel: search box, windowed checkbox list and the
//! "show all" control.

use std::collections::HashSet;

use leptos::prelude::*;

use super::logic;

#[component]
pub fn FilePicker(
    /// Catalog of available files, fetched once per page load.
    catalog: RwSignal<Vec<String>>,
    /// Set when the catalog could not be loaded; rendered in its place.
    catalog_error: RwSignal<Option<String>>,
    search: RwSignal<String>,
    showing_all: RwSignal<bool>,
    selected: RwSignal<HashSet<String>>,
) -> impl IntoView {
    // Filtered view of the catalog, computed once per catalog/term change;
    // both the list and the "show all" affordance derive from it.
    let filtered_files = Memo::new(move |_| logic::filter_files(&catalog.get(), &search.get()));

    let file_list = move || {
        if let Some(error) = catalog_error.get() {
            return view! { <p style="color: #c62828;">{error}</p> }.into_any();
        }

        let filtered = filtered_files.get();

        if filtered.is_empty() {
            let message = if search.get().trim().is_empty() {
                "No parquet files available."
            } else {
                "No files match the search term."
            };
            return view! { <p>{message}</p> }.into_any();
        }

        let limit = logic::visible_count(filtered.len(), showing_all.get());
        filtered[..limit]
            .iter()
            .map(|file| {
                let name = file.clone();
                let toggle_name = file.clone();
                let checked_name = file.clone();
                view! {
                    <div class="file-item">
                        <label title=name.clone() style="display: block; padding: 2px 0; cursor: pointer;">
                            <input
                                type="checkbox"
                                name="selected_files"
                                value=name.clone()
                                prop:checked=move || selected.get().contains(&checked_name)
                                on:change=move |ev| {
                                    let is_checked = event_target_checked(&ev);
                                    selected.update(|files| {
                                        if is_checked {
                                            files.insert(toggle_name.clone());
                                        } else {
                                            files.remove(&toggle_name);
                                        }
                                    });
                                }
                            />
                            " " {name.clone()}
                        </label>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    let show_all_button = move || {
        let filtered_len = filtered_files.with(|files| files.len());
        if catalog_error.get().is_none() && logic::can_show_all(filtered_len, showing_all.get()) {
            view! {
                <button
                    on:click=move |_| showing_all.set(true)
                    style="margin-top: 6px; padding: 4px 12px; cursor: pointer;"
                >
                    "Show all matching files"
                </button>
            }
            .into_any()
        } else {
            view! { <></> }.into_any()
        }
    };

    view! {
        <div id="file-selection-area" style="margin-bottom: 16px;">
            <input
                type="text"
                placeholder="Search files..."
                prop:value=search
                on:input=move |ev| {
                    // Every keystroke resets the reveal window
                    search.set(event_target_value(&ev));
                    showing_all.set(false);
                }
                style="width: 320px; padding: 4px 8px; margin-bottom: 8px;"
            />
            <div id="file-checkbox-container" style="max-height: 320px; overflow-y: auto;">
                {file_list}
            </div>
            {show_all_button}
        </div>
    }
}
