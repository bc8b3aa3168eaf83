use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::qc::report::error::Result;
use crate::qc::report::model::{Cell, Table};

/// Name of the single sheet in the exported workbook.
pub const MASTER_SHEET: &str = "Master";
/// Default file name offered for download.
pub const MASTER_FILE_NAME: &str = "Master_Final_optimized.xlsx";
/// MIME type of the exported artifact.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Number format applied to date cells.
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serialises `table` into a single-sheet workbook and returns its bytes.
///
/// The workbook is saved to a scoped temporary file which is removed when this
/// function returns, whether or not serialisation succeeded.
pub fn write_master_bytes(table: &Table) -> Result<Vec<u8>> {
    let temp = tempfile::Builder::new()
        .prefix("master-")
        .suffix(".xlsx")
        .tempfile()?;
    write_master(temp.path(), table)?;
    let bytes = fs::read(temp.path())?;
    debug!(bytes = bytes.len(), "captured master workbook");
    Ok(bytes)
}

/// Writes `table` as a single `Master` sheet to the given path.
pub fn write_master(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(MASTER_SHEET)?;
    let date_format = Format::new().set_num_format(DATETIME_FORMAT);

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_num(col_idx)?, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = row_num(row_idx + 1)?;
        for (col_idx, cell) in row.iter().enumerate() {
            write_cell(worksheet, excel_row, col_num(col_idx)?, cell, &date_format)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    date_format: &Format,
) -> Result<()> {
    match cell {
        Cell::Missing => {}
        Cell::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        Cell::DateTime(serial) => {
            worksheet.write_number_with_format(row, col, *serial, date_format)?;
        }
    }
    Ok(())
}

fn row_num(idx: usize) -> Result<u32> {
    Ok(u32::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)?)
}

fn col_num(idx: usize) -> Result<u16> {
    Ok(u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qc::report::error::ReportError;

    #[test]
    fn oversized_indices_are_rejected() {
        assert_eq!(col_num(3).unwrap(), 3);
        assert!(matches!(
            col_num(usize::from(u16::MAX) + 1),
            Err(ReportError::ExcelWrite(XlsxError::RowColumnLimitError))
        ));
        assert!(matches!(
            row_num(u32::MAX as usize + 1),
            Err(ReportError::ExcelWrite(XlsxError::RowColumnLimitError))
        ));
    }

    #[test]
    fn too_many_columns_fail_instead_of_wrapping() {
        let columns = (0..=usize::from(u16::MAX) + 1)
            .map(|idx| format!("c{idx}"))
            .collect();
        let table = Table::with_columns(columns);
        let dir = tempfile::tempdir().expect("temporary directory");

        let result = write_master(&dir.path().join("wide.xlsx"), &table);

        assert!(matches!(result, Err(ReportError::ExcelWrite(_))));
    }
}
