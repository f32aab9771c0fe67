//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Submission Types** - rows extracted from the uploaded workbook
//! - **Wire Types** - backend payloads for submit and progress polling
//! - **UI Types** - inline status line shown above the results
//! - **Error Types** - frontend error handling

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Submission Types
// =============================================================================

/// One (url, term, sheet) triple extracted from the uploaded workbook.
///
/// Built once per upload, immutable afterwards, sent verbatim to the
/// backend inside the `columnData` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Site to look up, first column of the sheet.
    pub url: String,
    /// Term searched for on the site, second column of the sheet.
    pub term: String,
    /// Label of the source worksheet, absent in single-sheet mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

/// Which worksheets of an uploaded workbook are extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetScope {
    /// Walk every worksheet in workbook order, labelling rows per sheet.
    All,
    /// Read only the first worksheet, without a sheet label.
    FirstOnly,
}

// =============================================================================
// Wire Types
// =============================================================================

/// One backend-reported status row, recreated on every poll tick.
///
/// The single-sheet backend variant omits `worksheetNumber`,
/// `number_of_loops` and the two per-phase statuses, so everything
/// beyond `url` defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub url: String,
    /// Source-sheet label, echoed back from the submitted rows. Some
    /// backend builds send it as a number.
    #[serde(
        rename = "worksheetNumber",
        default,
        deserialize_with = "string_or_number"
    )]
    pub worksheet_number: Option<String>,
    /// Terminal status of the whole lookup, tallied in the summary.
    #[serde(default)]
    pub status: String,
    /// Status of locating the site's search field.
    #[serde(default)]
    pub status_search_bar: String,
    /// Status of searching the term through that field.
    #[serde(default)]
    pub status_content_search: String,
    /// Human-readable "(i de n)" position marker.
    #[serde(default)]
    pub progress: String,
    /// Pass counter, identical across all rows of a tick.
    #[serde(default)]
    pub number_of_loops: Option<u32>,
}

/// Full payload of one progress poll.
///
/// Each tick's snapshot fully replaces the previous rendering; nothing
/// here is persisted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PollSnapshot {
    #[serde(default)]
    pub results: Vec<ResultRecord>,
    #[serde(default)]
    pub complete: bool,
    /// Backend-global processing error, surfaced next to the summary.
    #[serde(default)]
    pub error: Option<String>,
    /// Per-site search-bar statuses; its length is the "sites
    /// verificados" figure of the summary line.
    #[serde(default)]
    pub status_search_bar: Vec<String>,
}

/// Accepts a string or a number, normalized to `Option<String>`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

// =============================================================================
// UI Types
// =============================================================================

/// Visual tone of the inline status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Success,
    Error,
}

impl StatusTone {
    /// Get CSS class for styling.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusTone::Neutral => "",
            StatusTone::Success => "success",
            StatusTone::Error => "error",
        }
    }
}

/// Message shown in the `status` element above the results.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusLine {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: StatusTone::Neutral }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: StatusTone::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: StatusTone::Error }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// `Display` carries the user-facing message, in the application's
/// Portuguese voice, so callers can render errors inline as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// The file picker has no selection.
    NoFile,
    /// The selected file could not be read into memory.
    Read(String),
    /// The workbook bytes could not be parsed.
    Workbook(String),
    /// No row with a non-empty url in any worksheet.
    NoRows,
    /// The backend rejected the submission.
    Server(String),
    /// Submit request never reached the backend.
    Network(String),
    /// A progress poll failed.
    Poll(String),
    /// Report generation or download failed.
    Report(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NoFile => write!(f, "Nenhum arquivo selecionado."),
            AppError::Read(msg) => write!(f, "Erro na leitura do arquivo: {}", msg),
            AppError::Workbook(msg) => write!(f, "Erro ao processar o arquivo: {}", msg),
            AppError::NoRows => write!(f, "Nenhuma URL encontrada em nenhuma worksheet."),
            AppError::Server(msg) => write!(f, "Erro no servidor: {}", msg),
            AppError::Network(msg) => {
                write!(f, "Erro ao enviar dados para o servidor: {}", msg)
            }
            AppError::Poll(msg) => write!(f, "Erro ao verificar progresso: {}", msg),
            AppError::Report(msg) => write!(f, "Erro ao gerar o relatório: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_record_omits_absent_sheet() {
        let row = RowRecord {
            url: "http://a.com".into(),
            term: "foo".into(),
            sheet: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://a.com", "term": "foo"})
        );

        let labelled = RowRecord { sheet: Some("Sheet - 2".into()), ..row };
        let json = serde_json::to_value(&labelled).unwrap();
        assert_eq!(json["sheet"], "Sheet - 2");
    }

    #[test]
    fn snapshot_deserializes_multi_sheet_payload() {
        let json = r#"{
            "results": [
                {
                    "url": "http://a.com",
                    "worksheetNumber": "Sheet - 1",
                    "status": "Busca realizada",
                    "status_search_bar": "Campo de busca encontrado",
                    "status_content_search": "Termo encontrado",
                    "progress": "(1 de 2)",
                    "number_of_loops": 3
                }
            ],
            "complete": false,
            "error": null,
            "status_search_bar": ["Campo de busca encontrado"]
        }"#;

        let snapshot: PollSnapshot = serde_json::from_str(json).unwrap();
        assert!(!snapshot.complete);
        assert_eq!(snapshot.status_search_bar.len(), 1);
        let result = &snapshot.results[0];
        assert_eq!(result.worksheet_number.as_deref(), Some("Sheet - 1"));
        assert_eq!(result.number_of_loops, Some(3));
        assert_eq!(result.progress, "(1 de 2)");
    }

    #[test]
    fn snapshot_tolerates_single_sheet_payload() {
        // The single-sheet backend variant sends only url/status/progress.
        let json = r#"{
            "results": [
                {"url": "http://a.com", "status": "Processando...", "progress": "(1 de 1)"}
            ],
            "complete": true,
            "error": "navegador fechou"
        }"#;

        let snapshot: PollSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.complete);
        assert_eq!(snapshot.error.as_deref(), Some("navegador fechou"));
        assert!(snapshot.status_search_bar.is_empty());
        let result = &snapshot.results[0];
        assert_eq!(result.worksheet_number, None);
        assert_eq!(result.number_of_loops, None);
        assert_eq!(result.status_search_bar, "");
    }

    #[test]
    fn worksheet_number_accepts_numbers() {
        let json = r#"{"url": "http://a.com", "worksheetNumber": 2}"#;
        let result: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(result.worksheet_number.as_deref(), Some("2"));
    }
}
