//! Spreadsheet upload and submission.
//!
//! Reads the selected workbook entirely client-side, extracts the
//! (url, term, sheet) rows and posts them to the processing backend.
//! On success the results table is revealed and a polling run starts.

use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::config::SHEET_SCOPE;
use crate::services::poller::{spawn_poller, PollerConfig, PollerCtx, PollerHandle};
use crate::services::{api, workbook};
use crate::types::{AppError, AppResult, RowRecord, StatusLine};

#[component]
pub fn UploadSection(
    /// Signals the polling run writes into.
    ctx: PollerCtx,
    set_output_json: WriteSignal<String>,
    set_table_visible: WriteSignal<bool>,
    /// Slot of the currently running poller, if any.
    poller: StoredValue<Option<PollerHandle>>,
) -> impl IntoView {
    let on_extract = move |_| {
        // A new upload supersedes whatever run is still polling.
        poller.update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
        ctx.set_status.set(None);
        ctx.set_run_error.set(None);
        ctx.set_results.set(Vec::new());
        ctx.set_loop_counter.set(None);
        ctx.set_progress_text.set(String::new());
        ctx.set_loading.set(false);
        set_output_json.set(String::new());
        set_table_visible.set(false);

        let Some(file) = selected_file() else {
            ctx.set_status.set(Some(StatusLine::error(AppError::NoFile.to_string())));
            return;
        };

        spawn_local(async move {
            ctx.set_status.set(Some(StatusLine::neutral("Processando arquivo...")));

            let rows = match prepare_rows(&file).await {
                Ok(rows) => rows,
                Err(err) => {
                    ctx.set_status.set(Some(StatusLine::error(err.to_string())));
                    return;
                }
            };

            set_output_json.set(serde_json::to_string_pretty(&rows).unwrap_or_default());
            ctx.set_progress_text
                .set(format!("Preparando para processar {} sites...", rows.len()));
            ctx.set_status.set(Some(StatusLine::neutral("Iniciando o processamento...")));
            ctx.set_loading.set(true);

            match api::submit_rows(&rows).await {
                Ok(()) => {
                    log::info!("{} sites enviados para processamento", rows.len());
                    set_table_visible.set(true);
                    let handle = spawn_poller(ctx, rows.len(), PollerConfig::default());
                    poller.set_value(Some(handle));
                }
                Err(err) => {
                    ctx.set_loading.set(false);
                    ctx.set_status.set(Some(StatusLine::error(err.to_string())));
                }
            }
        });
    };

    view! {
        <form id="uploadForm">
            <input type="file" id="fileInput" name="file" accept=".xls, .xlsx"/>
            <button type="button" on:click=on_extract>"Extrair e Processar"</button>
        </form>
    }
}

/// Currently picked file, if any.
fn selected_file() -> Option<web_sys::File> {
    gloo_utils::document()
        .get_element_by_id("fileInput")?
        .dyn_ref::<HtmlInputElement>()?
        .files()?
        .get(0)
}

async fn prepare_rows(file: &web_sys::File) -> AppResult<Vec<RowRecord>> {
    let bytes = read_file(file).await?;
    log::debug!("Arquivo lido ({} bytes), extraindo linhas", bytes.len());
    workbook::extract_rows(&bytes, SHEET_SCOPE)
}

/// Pull the file's bytes into memory through `File::arrayBuffer`.
async fn read_file(file: &web_sys::File) -> AppResult<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Read(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
