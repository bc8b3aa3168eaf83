use std::collections::HashSet;
use std::io::Cursor;

use calamine::{DataType, Range, Reader, Xlsx};

use crate::qc::report::error::{ReportError, Result};
use crate::qc::report::model::{Cell, Table};

/// Workbook opened over an in-memory upload.
pub type BytesWorkbook<'a> = Xlsx<Cursor<&'a [u8]>>;

/// Opens an `.xlsx` container held in memory.
pub fn open_workbook_bytes(bytes: &[u8]) -> Result<BytesWorkbook<'_>> {
    let workbook = Xlsx::new(Cursor::new(bytes))?;
    Ok(workbook)
}

/// Loads the cell range of the named sheet, or `None` when the workbook has
/// no sheet with that name.
pub fn read_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Option<Range<DataType>>> {
    match workbook.worksheet_range(name) {
        Some(range) => Ok(Some(range.map_err(ReportError::from)?)),
        None => Ok(None),
    }
}

/// Converts a sheet range into a [`Table`], treating the first row as the
/// header.
///
/// Only columns whose (de-duplicated) header satisfies `keep` are
/// materialised. Data rows whose kept cells are all empty are dropped.
pub fn range_to_table<F>(range: &Range<DataType>, keep: F) -> Table
where
    F: Fn(&str) -> bool,
{
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return Table::default(),
    };

    let projection: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| keep(name))
        .map(|(idx, _)| idx)
        .collect();

    let columns = projection.iter().map(|&idx| headers[idx].clone()).collect();
    let mut table = Table::with_columns(columns);

    for row in rows {
        let cells: Vec<Cell> = projection
            .iter()
            .map(|&idx| row.get(idx).map(cell_from_data).unwrap_or_default())
            .collect();
        if cells.iter().all(Cell::is_missing) {
            continue;
        }
        table.rows.push(cells);
    }

    table
}

/// Builds unique column names from a header row. Blank headers become
/// `Unnamed: <index>` and repeats get a `.1`, `.2`, ... suffix.
pub fn header_names(row: &[DataType]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(row.len());
    let mut names = Vec::with_capacity(row.len());

    for (idx, cell) in row.iter().enumerate() {
        let raw = match cell_from_data(cell) {
            Cell::Missing => format!("Unnamed: {idx}"),
            other => other.display_text(),
        };

        let mut name = raw.clone();
        let mut counter = 1;
        while seen.contains(&name) {
            name = format!("{raw}.{counter}");
            counter += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Maps a calamine cell onto the pipeline's [`Cell`]. Empty strings are
/// treated as missing and date cells keep their serial value.
pub fn cell_from_data(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Missing,
        DataType::String(value) if value.is_empty() => Cell::Missing,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::DateTime(value) => Cell::DateTime(*value),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(cells: &[&[&str]]) -> Range<DataType> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (row_idx, row) in cells.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    range.set_value(
                        (row_idx as u32, col_idx as u32),
                        DataType::String(value.to_string()),
                    );
                }
            }
        }
        range
    }

    #[test]
    fn blank_and_repeated_headers_get_unique_names() {
        let header = [
            DataType::String("styleId".into()),
            DataType::Empty,
            DataType::String("Brand".into()),
            DataType::String("Brand".into()),
            DataType::String("Brand".into()),
        ];

        assert_eq!(
            header_names(&header),
            vec!["styleId", "Unnamed: 1", "Brand", "Brand.1", "Brand.2"]
        );
    }

    #[test]
    fn repeated_header_skips_names_already_taken() {
        let header = [
            DataType::String("Brand.1".into()),
            DataType::String("Brand".into()),
            DataType::String("Brand".into()),
        ];

        assert_eq!(header_names(&header), vec!["Brand.1", "Brand", "Brand.2"]);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let range = range(&[&["styleId", "Brand"], &["", ""], &["A1", "Acme"]]);

        let table = range_to_table(&range, |_| true);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0], vec![Cell::text("A1"), Cell::text("Acme")]);
    }

    #[test]
    fn sheet_with_only_blank_rows_is_empty() {
        let range = range(&[&["styleId", "Brand"], &["", ""], &["", ""]]);

        assert!(range_to_table(&range, |_| true).is_empty());
    }

    #[test]
    fn projection_keeps_only_selected_columns() {
        let range = range(&[&["styleId", "Extra", "Title Length"], &["A1", "x", "Passed"]]);

        let table = range_to_table(&range, |name| name != "Extra");

        assert_eq!(table.columns, vec!["styleId", "Title Length"]);
        assert_eq!(table.rows[0], vec![Cell::text("A1"), Cell::text("Passed")]);
    }

    #[test]
    fn date_cells_keep_their_serial() {
        assert_eq!(cell_from_data(&DataType::DateTime(45366.0)), Cell::DateTime(45366.0));
        assert_eq!(cell_from_data(&DataType::String(String::new())), Cell::Missing);
    }
}
