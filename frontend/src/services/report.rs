//! Report generation from the rendered results table.
//!
//! The export is a snapshot of the DOM table exactly as the user sees
//! it: the rows are read back from the document, not from the stored
//! poll results, so anything not shown in the table is not in the
//! report either.

use chrono::NaiveDateTime;
use rust_xlsxwriter::Workbook;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Element, HtmlAnchorElement, Url};

use crate::config::{REPORT_FILE_PREFIX, REPORT_SHEET_NAME};
use crate::types::{AppError, AppResult};

const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Export the rendered results table as a downloadable workbook.
///
/// With no table on screen this alerts and does nothing else, matching
/// the manual-trigger contract: no results, no file.
pub fn generate_report() -> AppResult<()> {
    let document = gloo_utils::document();
    let Some(table) = document.get_element_by_id("resultsTable") else {
        let _ = gloo_utils::window()
            .alert_with_message("Nenhum resultado disponível para gerar o relatório.");
        return Ok(());
    };

    let grid = table_to_grid(&table);
    let bytes = grid_to_workbook(&grid)?;
    let file_name = report_file_name(&chrono::Local::now().naive_local());
    trigger_download(&bytes, &file_name)?;
    log::info!("Relatório gerado: {}", file_name);
    Ok(())
}

/// `relatorio_resultados_YYYY-MM-DD_HH-MM.xlsx`, local clock.
pub fn report_file_name(now: &NaiveDateTime) -> String {
    format!("{}_{}.xlsx", REPORT_FILE_PREFIX, now.format("%Y-%m-%d_%H-%M"))
}

/// Read the table back from the DOM, header row included.
fn table_to_grid(table: &Element) -> Vec<Vec<String>> {
    let rows = table.get_elements_by_tag_name("tr");
    let mut grid = Vec::new();
    for r in 0..rows.length() {
        let Some(row) = rows.item(r) else { continue };
        let cells = row.children();
        let mut texts = Vec::new();
        for c in 0..cells.length() {
            if let Some(cell) = cells.item(c) {
                texts.push(cell.text_content().unwrap_or_default().trim().to_string());
            }
        }
        grid.push(texts);
    }
    grid
}

/// Serialize the grid into a one-sheet workbook.
fn grid_to_workbook(grid: &[Vec<String>]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(REPORT_SHEET_NAME)
        .map_err(|e| AppError::Report(e.to_string()))?;

    for (r, row) in grid.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            worksheet
                .write_string(r as u32, c as u16, text)
                .map_err(|e| AppError::Report(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::Report(e.to_string()))
}

/// Hand the bytes to the browser as a named download.
fn trigger_download(bytes: &[u8], file_name: &str) -> AppResult<()> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(XLSX_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Report(format!("{:?}", e)))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Report(format!("{:?}", e)))?;

    let document = gloo_utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| AppError::Report(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| AppError::Report("elemento <a> inválido".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = gloo_utils::body();
    body.append_child(&anchor)
        .map_err(|e| AppError::Report(format!("{:?}", e)))?;
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn file_name_uses_local_timestamp_pattern() {
        let now = NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap();
        assert_eq!(
            report_file_name(&now),
            "relatorio_resultados_2026-08-05_09-05.xlsx"
        );
    }

    #[test]
    fn grid_becomes_a_named_worksheet() {
        let grid = vec![
            vec!["#".to_string(), "URL/Site".to_string()],
            vec!["1".to_string(), "http://a.com".to_string()],
        ];
        let bytes = grid_to_workbook(&grid).unwrap();
        // xlsx is a zip container.
        assert_eq!(&bytes[..2], b"PK");

        use calamine::Reader;
        let mut workbook =
            calamine::open_workbook_auto_from_rs(std::io::Cursor::new(bytes.as_slice())).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Resultados".to_string()]);
        let range = workbook.worksheet_range("Resultados").unwrap();
        assert_eq!(range.get_value((1, 1)).unwrap().to_string(), "http://a.com");
    }
}
