//! Application configuration.
//!
//! Centralized configuration for the search-check frontend.
//! In development these are hardcoded. In production they could be
//! loaded from environment or a config file.

use crate::types::SheetScope;

/// Endpoint receiving the extracted rows for processing.
pub const PROCESS_ENDPOINT: &str = "/process-column";

/// Endpoint polled for the current processing snapshot.
pub const PROGRESS_ENDPOINT: &str = "/check-progress";

/// Search term substituted when a row has no second column.
pub const DEFAULT_SEARCH_TERM: &str = "Giramille";

/// Which worksheets of the uploaded workbook are read.
///
/// Single-sheet deployments switch this to [`SheetScope::FirstOnly`].
pub const SHEET_SCOPE: SheetScope = SheetScope::All;

/// Base polling cadence for the progress endpoint (milliseconds).
pub const POLL_INTERVAL_MS: u32 = 1_000;

/// Upper bound on the backed-off polling delay (milliseconds).
pub const POLL_BACKOFF_CAP_MS: u32 = 30_000;

/// Consecutive poll failures tolerated before the run is abandoned.
pub const MAX_POLL_FAILURES: u32 = 5;

/// Worksheet name of the exported report workbook.
pub const REPORT_SHEET_NAME: &str = "Resultados";

/// File-name prefix of the exported report, completed with a timestamp.
pub const REPORT_FILE_PREFIX: &str = "relatorio_resultados";
