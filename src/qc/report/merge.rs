use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument};

use crate::qc::report::error::{ReportError, Result};
use crate::qc::report::io::excel_read::{self, open_workbook_bytes};
use crate::qc::report::model::{Cell, STYLE_ID_COLUMN, Table};
use crate::qc::report::tiers::required_analysis_columns;

/// Sheet of the Analysis workbook holding per-style check results.
pub const ANALYSIS_SHEET: &str = "Analysis Results";
/// Suffix given to Analysis-side columns whose name is already taken.
pub const ANALYSIS_SUFFIX: &str = "_analysis";

/// Loads the required Analysis columns and left-joins them onto `master`.
#[instrument(level = "info", skip_all, fields(rows = master.len(), bytes = analysis.len()))]
pub fn merge_analysis(master: Table, analysis: &[u8]) -> Result<Table> {
    let analysis = load_analysis(analysis)?;
    left_join(master, &analysis, STYLE_ID_COLUMN)
}

/// Reads the `Analysis Results` sheet keeping only the required columns.
pub fn load_analysis(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_bytes(bytes)?;
    let range = excel_read::read_sheet(&mut workbook, ANALYSIS_SHEET)?
        .ok_or_else(|| ReportError::MissingAnalysisSheet(ANALYSIS_SHEET.to_string()))?;

    let required: HashSet<&str> = required_analysis_columns().into_iter().collect();
    let table = excel_read::range_to_table(&range, |name| required.contains(name));

    if !table.has_column(STYLE_ID_COLUMN) {
        return Err(ReportError::MissingAnalysisStyleId);
    }

    info!(
        rows = table.len(),
        columns = table.columns.len(),
        "loaded analysis results"
    );
    Ok(table)
}

/// Left outer join of `left` with `right` on the column `key`.
///
/// Every left row survives in order. A left row matching several right rows
/// is repeated once per match, in right-table order. Right columns that clash
/// with a left column are renamed with [`ANALYSIS_SUFFIX`]; left columns are
/// never overwritten. Rows without a match, or with a missing key, receive
/// [`Cell::Missing`] for every right column.
pub fn left_join(left: Table, right: &Table, key: &str) -> Result<Table> {
    let right_key = right
        .column_index(key)
        .ok_or_else(|| ReportError::MissingJoinKey(key.to_string()))?;
    let left_key = left.column_index(key);

    let carried: Vec<usize> = (0..right.columns.len())
        .filter(|&idx| idx != right_key)
        .collect();

    let mut columns = left.columns;
    for &idx in &carried {
        let name = unique_name(&columns, &right.columns[idx]);
        columns.push(name);
    }

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (position, row) in right.rows.iter().enumerate() {
        if let Some(value) = row[right_key].key_text() {
            index.entry(value).or_default().push(position);
        }
    }

    let mut merged = Table::with_columns(columns);
    merged.rows.reserve(left.rows.len());
    let mut matched = 0usize;

    for row in left.rows {
        let matches = left_key
            .and_then(|idx| row[idx].key_text())
            .and_then(|value| index.get(&value))
            .map(Vec::as_slice)
            .unwrap_or_default();

        match matches.split_last() {
            None => {
                let mut out = row;
                out.resize(out.len() + carried.len(), Cell::Missing);
                merged.rows.push(out);
            }
            Some((&last, rest)) => {
                matched += 1;
                for &position in rest {
                    merged.rows.push(joined_row(row.clone(), &right.rows[position], &carried));
                }
                merged.rows.push(joined_row(row, &right.rows[last], &carried));
            }
        }
    }

    debug!(
        rows = merged.len(),
        matched,
        columns = merged.columns.len(),
        "left join complete"
    );
    Ok(merged)
}

fn joined_row(mut left: Vec<Cell>, right: &[Cell], carried: &[usize]) -> Vec<Cell> {
    left.extend(carried.iter().map(|&idx| right[idx].clone()));
    left
}

fn unique_name(existing: &[String], name: &str) -> String {
    let mut candidate = name.to_string();
    while existing.iter().any(|column| *column == candidate) {
        candidate.push_str(ANALYSIS_SUFFIX);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::with_columns(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|value| {
                        if value.is_empty() {
                            Cell::Missing
                        } else {
                            Cell::text(*value)
                        }
                    })
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn unmatched_rows_survive_with_missing_cells() {
        let left = table(&["styleId", "Tab Name"], &[&["A1", "Shoes"], &["B2", "Shoes"]]);
        let right = table(&["styleId", "Title Length"], &[&["A1", "Passed"]]);

        let merged = left_join(left, &right, "styleId").unwrap();

        assert_eq!(merged.columns, vec!["styleId", "Tab Name", "Title Length"]);
        assert_eq!(merged.rows[0][2], Cell::text("Passed"));
        assert_eq!(merged.rows[1][2], Cell::Missing);
    }

    #[test]
    fn duplicate_right_keys_fan_out_in_order() {
        let left = table(&["styleId"], &[&["A1"], &["C3"]]);
        let right = table(
            &["styleId", "Failure Rate"],
            &[&["A1", "10%"], &["A1", "20%"]],
        );

        let merged = left_join(left, &right, "styleId").unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.rows[0][1], Cell::text("10%"));
        assert_eq!(merged.rows[1][1], Cell::text("20%"));
        assert_eq!(merged.rows[2][0], Cell::text("C3"));
    }

    #[test]
    fn colliding_columns_get_suffixed() {
        let left = table(
            &["styleId", "Title Length", "Title Length_analysis"],
            &[&["A1", "Passed", "x"]],
        );
        let right = table(&["styleId", "Title Length"], &[&["A1", "Failed"]]);

        let merged = left_join(left, &right, "styleId").unwrap();

        assert_eq!(merged.columns[3], "Title Length_analysis_analysis");
        assert_eq!(merged.rows[0][1], Cell::text("Passed"));
        assert_eq!(merged.rows[0][3], Cell::text("Failed"));
    }

    #[test]
    fn missing_left_keys_never_match() {
        let left = table(&["styleId", "Other"], &[&["", "kept"]]);
        let right = table(&["styleId", "Failure Rate"], &[&["", "5%"]]);

        let merged = left_join(left, &right, "styleId").unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.rows[0][2], Cell::Missing);
    }

    #[test]
    fn missing_right_key_names_the_key() {
        let left = table(&["sku"], &[&["A1"]]);
        let right = table(&["styleId"], &[&["A1"]]);

        let error = left_join(left, &right, "sku").unwrap_err();

        assert!(matches!(error, ReportError::MissingJoinKey(ref key) if key == "sku"));
    }

    #[test]
    fn numeric_and_text_keys_join_by_text() {
        let mut left = Table::with_columns(vec!["styleId".into()]);
        left.push_row(vec![Cell::Number(1001.0)]);
        let right = table(&["styleId", "Failure Rate"], &[&["1001", "0%"]]);

        let merged = left_join(left, &right, "styleId").unwrap();

        assert_eq!(merged.rows[0][1], Cell::text("0%"));
    }
}
