//! Inline status, loading indicator and submitted-rows echo.

use leptos::*;

use crate::types::StatusLine;

#[component]
pub fn StatusPanel(
    status: ReadSignal<Option<StatusLine>>,
    loading: ReadSignal<bool>,
    progress_text: ReadSignal<String>,
    /// Pretty-printed JSON of the rows sent to the backend.
    output_json: ReadSignal<String>,
) -> impl IntoView {
    view! {
        <p id="status" class=move || status.get().map(|s| s.tone.css_class()).unwrap_or("")>
            {move || status.get().map(|s| s.text)}
        </p>
        <div
            id="loadingIndicator"
            style:display=move || if loading.get() { "block" } else { "none" }
        >
            <div class="spinner"></div>
            " Processando sites... "
            <span id="progressText" class="progress-text">{move || progress_text.get()}</span>
        </div>
        <pre id="output">{move || output_json.get()}</pre>
    }
}
