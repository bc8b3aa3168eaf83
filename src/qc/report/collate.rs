use std::collections::HashMap;

use calamine::Reader;
use tracing::{debug, info, instrument, warn};

use crate::qc::report::error::Result;
use crate::qc::report::io::excel_read::{self, open_workbook_bytes};
use crate::qc::report::model::{Cell, STYLE_ID_COLUMN, TAB_NAME_COLUMN, Table};
use crate::qc::report::progress::ProgressSink;

/// Result of collating the Input workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collated {
    /// Every data row of every non-empty sheet, tagged with `Tab Name`.
    pub table: Table,
    /// Non-fatal findings, one per affected sheet.
    pub warnings: Vec<String>,
}

/// Reads every sheet of the Input workbook and concatenates them into one
/// table aligned by column name.
///
/// Sheets without data rows are skipped. Columns missing from a sheet are
/// filled with [`Cell::Missing`]. The returned table is empty when no sheet
/// had data; callers must stop in that case.
#[instrument(level = "info", skip_all, fields(bytes = input.len()))]
pub fn collate_input(input: &[u8], progress: &mut dyn ProgressSink) -> Result<Collated> {
    let mut workbook = open_workbook_bytes(input)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let total = sheet_names.len();

    let mut builder = UnifiedTableBuilder::default();
    let mut warnings = Vec::new();

    for (index, sheet) in sheet_names.iter().enumerate() {
        let table = match excel_read::read_sheet(&mut workbook, sheet)? {
            Some(range) => excel_read::range_to_table(&range, |_| true),
            None => Table::default(),
        };

        if table.is_empty() {
            debug!(sheet = %sheet, "skipping sheet without data rows");
        } else {
            if !table.has_column(STYLE_ID_COLUMN) {
                let message = format!(
                    "Sheet '{sheet}' has no '{STYLE_ID_COLUMN}' column; its rows will not join with Analysis."
                );
                warn!(sheet = %sheet, "sheet has no join key column");
                progress.warning(&message);
                warnings.push(message);
            }
            debug!(sheet = %sheet, rows = table.len(), columns = table.columns.len(), "sheet loaded");
            builder.append_sheet(sheet, table);
        }

        progress.sheet_read(index + 1, total, sheet);
    }

    let table = builder.finish();
    info!(
        sheets = total,
        rows = table.len(),
        columns = table.columns.len(),
        "collated input workbook"
    );
    Ok(Collated { table, warnings })
}

/// Accumulates sheets and aligns them into the unified column order.
#[derive(Debug, Default)]
struct UnifiedTableBuilder {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    sheets: Vec<(String, Table)>,
}

impl UnifiedTableBuilder {
    fn append_sheet(&mut self, sheet: &str, table: Table) {
        for column in &table.columns {
            if column == TAB_NAME_COLUMN || self.positions.contains_key(column) {
                continue;
            }
            self.positions.insert(column.clone(), self.columns.len());
            self.columns.push(column.clone());
        }
        self.sheets.push((sheet.to_string(), table));
    }

    fn finish(self) -> Table {
        let row_count: usize = self.sheets.iter().map(|(_, table)| table.len()).sum();
        if row_count == 0 {
            return Table::default();
        }

        let width = self.columns.len();
        let mut columns = self.columns;
        columns.push(TAB_NAME_COLUMN.to_string());

        let mut unified = Table::with_columns(columns);
        unified.rows.reserve(row_count);

        for (sheet, table) in self.sheets {
            // Source column -> unified column, `None` for a sheet-level `Tab Name`.
            let targets: Vec<Option<usize>> = table
                .columns
                .iter()
                .map(|column| self.positions.get(column).copied())
                .collect();

            for source in table.rows {
                let mut row = vec![Cell::Missing; width + 1];
                for (cell, target) in source.into_iter().zip(&targets) {
                    if let Some(target) = target {
                        row[*target] = cell;
                    }
                }
                row[width] = Cell::text(sheet.as_str());
                unified.rows.push(row);
            }
        }

        unified
    }
}
