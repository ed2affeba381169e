//! Pure rules for the browse page: catalog filtering, the two-tier file list
//! window, display truncation and the column tag. Kept free of any DOM or
//! network types so the behavior is testable on its own.

use std::collections::HashSet;

/// How many files of the filtered view are rendered before "show all".
pub const FILES_TO_SHOW_INITIALLY: usize = 15;

/// Hard cap on rendered query-result rows; the full set is export-only.
pub const ROWS_TO_DISPLAY_IN_TABLE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Schema-discovery preview; the backend bounds the sample, every
    /// returned row is rendered.
    Sample,
    /// Full query result; rendering is capped at ROWS_TO_DISPLAY_IN_TABLE.
    Query,
}

/// Case-insensitive substring filter over the cached catalog. The term is
/// trimmed; an empty term keeps the whole catalog, in catalog order.
pub fn filter_files(catalog: &[String], term: &str) -> Vec<String> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return catalog.to_vec();
    }
    catalog
        .iter()
        .filter(|file| file.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Number of filtered entries actually rendered for the current reveal mode.
pub fn visible_count(filtered_len: usize, showing_all: bool) -> usize {
    if showing_all {
        filtered_len
    } else {
        filtered_len.min(FILES_TO_SHOW_INITIALLY)
    }
}

/// The "show all" affordance is offered exactly when the filtered view is
/// larger than the initial window and has not been fully revealed yet.
pub fn can_show_all(filtered_len: usize, showing_all: bool) -> bool {
    !showing_all && filtered_len > FILES_TO_SHOW_INITIALLY
}

/// Materializes the checkbox selection in catalog order, which is the order
/// used for request bodies and the export filename.
pub fn selected_in_catalog_order(catalog: &[String], selected: &HashSet<String>) -> Vec<String> {
    catalog
        .iter()
        .filter(|file| selected.contains(*file))
        .cloned()
        .collect()
}

/// Human-readable projection tag for the export filename: `all_columns` for
/// the wildcard, otherwise the number of comma-separated entries. Empty
/// segments count, matching how the expression is split.
pub fn column_tag(target_columns: &str) -> String {
    let target = target_columns.trim();
    if target == "*" {
        "all_columns".to_string()
    } else {
        format!("{}_columns", target.split(',').count())
    }
}

/// How many of the supplied rows to render for the given mode.
pub fn display_row_count(mode: TableMode, available: usize) -> usize {
    match mode {
        TableMode::Sample => available,
        TableMode::Query => available.min(ROWS_TO_DISPLAY_IN_TABLE),
    }
}

/// Footer note for a truncated query result; `None` when everything that
/// exists is already on screen (and always for samples).
pub fn truncation_note(mode: TableMode, shown: usize, total_rows: u64) -> Option<String> {
    if mode == TableMode::Query && total_rows > shown as u64 {
        Some(format!(
            "Showing the first {} of {} rows. Use the CSV download to get the full result.",
            shown, total_rows
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let files = catalog(&["Batch_1", "batch_10", "other", "my_BATCH"]);
        assert_eq!(
            filter_files(&files, "batch"),
            catalog(&["Batch_1", "batch_10", "my_BATCH"])
        );
        assert_eq!(filter_files(&files, "ATCH_1"), catalog(&["Batch_1", "batch_10"]));
    }

    #[test]
    fn test_filter_trims_term_and_keeps_order() {
        let files = catalog(&["b", "a", "c"]);
        assert_eq!(filter_files(&files, "  "), files);
        assert_eq!(filter_files(&files, " a "), catalog(&["a"]));
    }

    #[test]
    fn test_filter_no_matches() {
        let files = catalog(&["a", "b"]);
        assert!(filter_files(&files, "zzz").is_empty());
    }

    #[test]
    fn test_visible_count_caps_at_initial_window() {
        assert_eq!(visible_count(40, false), FILES_TO_SHOW_INITIALLY);
        assert_eq!(visible_count(40, true), 40);
        assert_eq!(visible_count(7, false), 7);
        assert_eq!(visible_count(0, false), 0);
    }

    #[test]
    fn test_can_show_all_only_when_window_overflows() {
        assert!(can_show_all(16, false));
        assert!(!can_show_all(15, false));
        assert!(!can_show_all(16, true));
        assert!(!can_show_all(3, false));
    }

    #[test]
    fn test_window_and_affordance_agree_on_one_filtered_view() {
        // The list window and the "show all" button are derived from the
        // same filtered view: the button is offered exactly when the window
        // hides entries, and revealing removes both the cap and the button.
        let files: Vec<String> = (0..30).map(|i| format!("batch_{}", i)).collect();
        let filtered = filter_files(&files, "batch");
        assert!(can_show_all(filtered.len(), false));
        assert!(visible_count(filtered.len(), false) < filtered.len());
        assert!(!can_show_all(filtered.len(), true));
        assert_eq!(visible_count(filtered.len(), true), filtered.len());
    }

    #[test]
    fn test_selected_in_catalog_order() {
        let files = catalog(&["a", "b", "c", "d"]);
        let selected: HashSet<String> = ["d", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(selected_in_catalog_order(&files, &selected), catalog(&["b", "d"]));
    }

    #[test]
    fn test_column_tag_wildcard() {
        assert_eq!(column_tag("*"), "all_columns");
        assert_eq!(column_tag(" * "), "all_columns");
    }

    #[test]
    fn test_column_tag_counts_comma_segments() {
        assert_eq!(column_tag("x"), "1_columns");
        assert_eq!(column_tag("x,y"), "2_columns");
        // Raw comma-split: trailing empty segments count too.
        assert_eq!(column_tag("x,y,"), "3_columns");
    }

    #[test]
    fn test_display_row_count_modes() {
        assert_eq!(display_row_count(TableMode::Sample, 37), 37);
        assert_eq!(display_row_count(TableMode::Query, 37), ROWS_TO_DISPLAY_IN_TABLE);
        assert_eq!(display_row_count(TableMode::Query, 4), 4);
    }

    #[test]
    fn test_truncation_note_only_for_truncated_query() {
        let note = truncation_note(TableMode::Query, 10, 25).unwrap();
        assert!(note.contains("10"));
        assert!(note.contains("25"));
        assert_eq!(truncation_note(TableMode::Query, 8, 8), None);
        assert_eq!(truncation_note(TableMode::Sample, 1, 100), None);
    }
}
