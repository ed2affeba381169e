//! Results pane: transient status messages and the bounded data table.

use contracts::browse::DataRow;
use leptos::prelude::*;

use super::logic::{self, TableMode};
use crate::shared::export::cell_text;

/// What the results pane currently shows. Every update replaces the previous
/// content wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Idle,
    Loading(String),
    Notice(String),
    Failed(String),
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<DataRow>,
    pub mode: TableMode,
    pub total_rows: u64,
}

#[component]
pub fn ResultsPane(view: RwSignal<ResultsView>) -> impl IntoView {
    view! {
        <div id="results-area">
            {move || match view.get() {
                ResultsView::Idle => view! { <></> }.into_any(),
                ResultsView::Loading(text) | ResultsView::Notice(text) => {
                    view! { <p>{text}</p> }.into_any()
                }
                ResultsView::Failed(text) => view! {
                    <p style="color: #c62828;">{text}</p>
                }
                .into_any(),
                ResultsView::Table(table) => render_table(&table),
            }}
        </div>
    }
}

fn render_table(table: &TableView) -> AnyView {
    let title = table.title.clone();

    if table.headers.is_empty() {
        return view! {
            <div>
                <h3>{title}</h3>
                <p>"(no data returned, or no valid columns)"</p>
            </div>
        }
        .into_any();
    }

    let shown = logic::display_row_count(table.mode, table.rows.len());
    let note = logic::truncation_note(table.mode, shown, table.total_rows);
    let header_count = table.headers.len();

    let head_cells = table
        .headers
        .iter()
        .map(|header| {
            view! {
                <th style="border: 1px solid #ddd; padding: 6px 8px; background: #f5f5f5; text-align: left;">
                    {header.clone()}
                </th>
            }
        })
        .collect_view();

    let body = if table.rows.is_empty() {
        // Sample mode keeps the header-only table so the schema is still
        // visible; a query with zero rows gets an explicit placeholder row.
        match table.mode {
            TableMode::Sample => view! { <></> }.into_any(),
            TableMode::Query => view! {
                <tr>
                    <td colspan=header_count.to_string() style="border: 1px solid #ddd; padding: 6px 8px;">
                        "(no data rows)"
                    </td>
                </tr>
            }
            .into_any(),
        }
    } else {
        table.rows[..shown]
            .iter()
            .map(|row| {
                let cells = table
                    .headers
                    .iter()
                    .map(|header| {
                        view! {
                            <td style="border: 1px solid #ddd; padding: 6px 8px;">
                                {cell_text(row.get(header))}
                            </td>
                        }
                    })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div>
            <h3>{title}</h3>
            <table id="results-table" style="border-collapse: collapse; width: 100%;">
                <thead>
                    <tr>{head_cells}</tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
            {note.map(|text| view! {
                <p style="font-size: 0.9em; margin-top: 5px;">{text}</p>
            })}
        </div>
    }
    .into_any()
}
