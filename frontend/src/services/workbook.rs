//! Client-side workbook parsing.
//!
//! The uploaded spreadsheet never leaves the browser: its bytes are
//! parsed in-memory with `calamine` and reduced to the (url, term,
//! sheet) rows the backend consumes.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::config::DEFAULT_SEARCH_TERM;
use crate::types::{AppError, AppResult, RowRecord, SheetScope};

/// Extract submit-ready rows from raw workbook bytes.
///
/// Accepts any container `calamine` can sniff (`.xls`, `.xlsx`, ...).
/// A row is kept iff its first cell, trimmed, is non-empty; a blank or
/// absent second cell falls back to [`DEFAULT_SEARCH_TERM`]. Yielding
/// no rows at all is an error, not an empty submission.
pub fn extract_rows(bytes: &[u8], scope: SheetScope) -> AppResult<Vec<RowRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let mut records = Vec::new();

    for (index, name) in sheet_names.iter().enumerate() {
        if scope == SheetScope::FirstOnly && index > 0 {
            break;
        }
        log::debug!("Lendo worksheet {} de {}: {:?}", index + 1, sheet_names.len(), name);

        let range = workbook
            .worksheet_range(name)
            .map_err(|e| AppError::Workbook(e.to_string()))?;
        records.extend(rows_from_range(&range, sheet_label(index, scope)));
    }

    if records.is_empty() {
        return Err(AppError::NoRows);
    }
    Ok(records)
}

/// Positional label attached to rows in multi-sheet mode.
fn sheet_label(index: usize, scope: SheetScope) -> Option<String> {
    match scope {
        SheetScope::All => Some(format!("Sheet - {}", index + 1)),
        SheetScope::FirstOnly => None,
    }
}

fn rows_from_range(range: &Range<Data>, sheet: Option<String>) -> Vec<RowRecord> {
    range
        .rows()
        .filter_map(|row| row_to_record(row, sheet.clone()))
        .collect()
}

/// Apply the row rule to one worksheet row.
fn row_to_record(cells: &[Data], sheet: Option<String>) -> Option<RowRecord> {
    let url = cell_text(cells.first()?);
    if url.is_empty() {
        return None;
    }

    let term = match cells.get(1).map(cell_text) {
        Some(term) if !term.is_empty() => term,
        _ => DEFAULT_SEARCH_TERM.to_string(),
    };

    Some(RowRecord { url, term, sheet })
}

/// Cell content as trimmed text, empty for blank cells.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(sheets: &[&[(&str, &str)]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        for rows in sheets {
            let worksheet = workbook.add_worksheet();
            for (r, (url, term)) in rows.iter().enumerate() {
                worksheet.write_string(r as u32, 0, *url).unwrap();
                worksheet.write_string(r as u32, 1, *term).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn keeps_rows_with_url_and_applies_term_fallback() {
        let bytes = workbook_bytes(&[&[
            ("http://a.com", "foo"),
            ("http://b.com", ""),
            ("", "bar"),
        ]]);

        let rows = extract_rows(&bytes, SheetScope::All).unwrap();
        assert_eq!(
            rows,
            vec![
                RowRecord {
                    url: "http://a.com".into(),
                    term: "foo".into(),
                    sheet: Some("Sheet - 1".into()),
                },
                RowRecord {
                    url: "http://b.com".into(),
                    term: "Giramille".into(),
                    sheet: Some("Sheet - 1".into()),
                },
            ]
        );
    }

    #[test]
    fn walks_every_sheet_in_order() {
        let bytes = workbook_bytes(&[
            &[("http://a.com", "foo")],
            &[("http://b.com", "bar")],
        ]);

        let rows = extract_rows(&bytes, SheetScope::All).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sheet.as_deref(), Some("Sheet - 1"));
        assert_eq!(rows[1].sheet.as_deref(), Some("Sheet - 2"));
    }

    #[test]
    fn first_only_scope_skips_later_sheets() {
        let bytes = workbook_bytes(&[
            &[("http://a.com", "foo")],
            &[("http://b.com", "bar")],
        ]);

        let rows = extract_rows(&bytes, SheetScope::FirstOnly).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "http://a.com");
        assert_eq!(rows[0].sheet, None);
    }

    #[test]
    fn workbook_without_urls_is_an_error() {
        let bytes = workbook_bytes(&[&[("", ""), ("", "bar")]]);
        assert_eq!(
            extract_rows(&bytes, SheetScope::All),
            Err(AppError::NoRows)
        );
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let result = extract_rows(b"not a spreadsheet", SheetScope::All);
        assert!(matches!(result, Err(AppError::Workbook(_))));
    }

    #[test]
    fn trims_and_stringifies_cells() {
        assert_eq!(cell_text(&Data::String("  http://a.com  ".into())), "http://a.com");
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn whitespace_only_url_is_skipped() {
        assert_eq!(
            row_to_record(&[Data::String("   ".into()), Data::String("bar".into())], None),
            None
        );
    }
}
