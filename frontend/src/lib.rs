//! Search-check - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading a spreadsheet of sites and
//! search terms, submitting them to the processing backend and
//! following the per-site verification live.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (file picker, extract & submit)          │
//! │  ├── StatusPanel (status line, spinner, submitted rows)     │
//! │  └── ResultsSection (live table, loop counter, report)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (RowRecord, PollSnapshot, etc.)
//! - [`status`] - Taxonomy of backend status strings
//! - [`components`] - UI components (Upload, Results, etc.)
//! - [`services`] - Workbook parsing, backend calls, polling, report

use leptos::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod status;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Submission
    RowRecord, SheetScope,
    // Wire
    PollSnapshot, ResultRecord,
    // UI
    StatusLine, StatusTone,
    // Errors
    AppError, AppResult,
};

// Status taxonomy
pub use status::{ContentStatus, FinalStatus, SearchBarStatus, Summary};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for one upload-and-poll run
    let (status, set_status) = create_signal(None::<StatusLine>);
    let (output_json, set_output_json) = create_signal(String::new());
    let (results, set_results) = create_signal(Vec::<ResultRecord>::new());
    let (table_visible, set_table_visible) = create_signal(false);
    let (loading, set_loading) = create_signal(false);
    let (progress_text, set_progress_text) = create_signal(String::new());
    let (loop_counter, set_loop_counter) = create_signal(None::<u32>);
    let (run_error, set_run_error) = create_signal(None::<String>);

    // The active polling run, superseded on re-upload.
    let poller = store_value(None::<PollerHandle>);

    // Navigating away must not leave the poller ticking.
    on_cleanup(move || {
        poller.update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
    });

    let ctx = PollerCtx {
        set_results,
        set_progress_text,
        set_loop_counter,
        set_status,
        set_run_error,
        set_loading,
    };

    view! {
        <div class="container">
            <Hero/>
            <UploadSection
                ctx=ctx
                set_output_json=set_output_json
                set_table_visible=set_table_visible
                poller=poller
            />
            <StatusPanel
                status=status
                loading=loading
                progress_text=progress_text
                output_json=output_json
            />
            <ResultsSection
                results=results
                table_visible=table_visible
                loop_counter=loop_counter
                run_error=run_error
            />
        </div>
        <Footer/>
    }
}
