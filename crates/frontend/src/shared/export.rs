//! CSV export: serialization, filename derivation and the browser download
//! trigger. The CSV text is the one bit-exact artifact this app produces, so
//! the escaping rules here must not drift.

use contracts::browse::DataRow;
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Escapes a single CSV field. A field is wrapped in double quotes, with
/// internal quotes doubled, iff it contains a comma, a quote, LF or CR;
/// otherwise it is emitted as-is.
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Plain textual form of a cell value. Absent and null cells are empty;
/// strings pass through unquoted; other scalars use their JSON rendering
/// (the backend decides the formatting, we do not reformat).
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Serializes rows into CSV text: header row first, then one row per record,
/// columns in `headers` order regardless of row key order, CRLF terminators.
pub fn rows_to_csv(rows: &[DataRow], headers: &[String]) -> String {
    let mut csv = String::new();

    let header_row: Vec<String> = headers.iter().map(|h| escape_csv_cell(h)).collect();
    csv.push_str(&header_row.join(","));
    csv.push_str("\r\n");

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| escape_csv_cell(&cell_text(row.get(h))))
            .collect();
        csv.push_str(&cells.join(","));
        csv.push_str("\r\n");
    }

    csv
}

/// Derives a download filename from the file selection and the column tag
/// (`all_columns` or `{k}_columns`). Up to two file names are joined
/// directly; more collapse to the first name plus a count.
pub fn suggest_filename(selected_files: &[String], column_tag: &str) -> String {
    let base = if selected_files.is_empty() {
        "downloaded_data".to_string()
    } else if selected_files.len() <= 2 {
        selected_files.join("_")
    } else {
        format!(
            "{}_and_{}_more_files",
            selected_files[0],
            selected_files.len() - 1
        )
    };
    sanitize_filename(&format!("{}_{}.csv", base, column_tag))
}

// Anything outside [A-Za-z0-9_.-] becomes an underscore.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Creates a CSV blob from in-memory text and triggers a client-side save
/// through a synthetic anchor click. No server round-trip.
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(content)?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    document
        .body()
        .ok_or("No body element")?
        .append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;

    anchor.click();

    document
        .body()
        .ok_or("No body element")?
        .remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> DataRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_escape_plain_value_unchanged() {
        assert_eq!(escape_csv_cell("plain value"), "plain value");
        assert_eq!(escape_csv_cell(""), "");
    }

    #[test]
    fn test_escape_comma_quote_and_newlines() {
        assert_eq!(escape_csv_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_cell("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(escape_csv_cell("line1\rline2"), "\"line1\rline2\"");
        // The worked example from the export contract
        assert_eq!(escape_csv_cell("a,\"b\""), "\"a,\"\"b\"\"\"");
    }

    #[test]
    fn test_cell_text_absent_and_null_are_empty() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
    }

    #[test]
    fn test_cell_text_passes_values_through() {
        assert_eq!(cell_text(Some(&json!("abc"))), "abc");
        assert_eq!(cell_text(Some(&json!(42))), "42");
        assert_eq!(cell_text(Some(&json!(1.5))), "1.5");
        assert_eq!(cell_text(Some(&json!(true))), "true");
    }

    #[test]
    fn test_rows_to_csv_header_order_and_crlf() {
        let headers = vec!["b".to_string(), "a".to_string()];
        let rows = vec![
            row(&[("a", json!(1)), ("b", json!(2))]),
            row(&[("a", json!("x,y"))]),
        ];
        let csv = rows_to_csv(&rows, &headers);
        // Column order follows `headers`, not row key order; the missing
        // cell in the second row is an empty field.
        assert_eq!(csv, "b,a\r\n2,1\r\n,\"x,y\"\r\n");
    }

    #[test]
    fn test_rows_to_csv_line_count() {
        let headers = vec!["n".to_string()];
        let rows: Vec<DataRow> = (0..25).map(|i| row(&[("n", json!(i))])).collect();
        let csv = rows_to_csv(&rows, &headers);
        assert_eq!(csv.matches("\r\n").count(), 26);
        assert!(csv.ends_with("\r\n"));
    }

    #[test]
    fn test_suggest_filename_two_files() {
        let files = vec!["a.parquet".to_string(), "b.parquet".to_string()];
        assert_eq!(
            suggest_filename(&files, "all_columns"),
            "a.parquet_b.parquet_all_columns.csv"
        );
    }

    #[test]
    fn test_suggest_filename_many_files() {
        let files: Vec<String> = (1..=5).map(|i| format!("batch_{}", i)).collect();
        assert_eq!(
            suggest_filename(&files, "2_columns"),
            "batch_1_and_4_more_files_2_columns.csv"
        );
    }

    #[test]
    fn test_suggest_filename_sanitizes() {
        let files = vec!["weird name?.parquet".to_string()];
        assert_eq!(
            suggest_filename(&files, "all_columns"),
            "weird_name_.parquet_all_columns.csv"
        );
    }

    #[test]
    fn test_suggest_filename_empty_selection_fallback() {
        assert_eq!(
            suggest_filename(&[], "all_columns"),
            "downloaded_data_all_columns.csv"
        );
    }
}
