use crate::browse::BrowsePage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div style="max-width: 1100px; margin: 0 auto; padding: 16px; font-family: sans-serif;">
            <h1 style="font-size: 1.4em; margin-bottom: 12px;">"Parquet Data Browser"</h1>
            <BrowsePage />
        </div>
    }
}
