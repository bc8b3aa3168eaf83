/// Column tagging every Input row with the sheet it came from.
pub const TAB_NAME_COLUMN: &str = "Tab Name";
/// Product identifier shared by the Input and Analysis workbooks.
pub const STYLE_ID_COLUMN: &str = "styleId";

/// A single cell value as it travels through the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Explicit missing marker: an absent column, an unmatched join or an
    /// empty source cell.
    #[default]
    Missing,
    /// Plain string value.
    Text(String),
    /// Numeric value. Integers read from a workbook are widened to `f64`.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Date or time stored as an Excel serial day number.
    DateTime(f64),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns `true` for the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns the textual form used when the cell acts as a join key.
    ///
    /// Missing cells have no key and therefore never match.
    pub fn key_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(value) => Some(value.clone()),
            Cell::Number(value) | Cell::DateTime(value) => Some(value.to_string()),
            Cell::Bool(value) => Some(value.to_string()),
        }
    }

    /// Renders the cell for plain-text display. Missing cells render empty.
    pub fn display_text(&self) -> String {
        self.key_text().unwrap_or_default()
    }
}

/// An ordered, column-aligned table. Every row has exactly one cell per
/// column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the provided header.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a row, padding or truncating it to the table width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    /// Appends a derived column. If a column with the same name already
    /// exists its values are replaced in place instead.
    ///
    /// `values` must yield one cell per row; rows beyond the iterator's end
    /// receive the missing marker.
    pub fn push_column<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        let position = match self.column_index(name) {
            Some(position) => position,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
                self.columns.len() - 1
            }
        };

        let mut values = values.into_iter();
        for row in &mut self.rows {
            row[position] = values.next().unwrap_or_default();
        }
    }

    /// Iterates over the values of one column, top to bottom.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let position = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[position]))
    }

    /// Copy of the first `count` rows, used for previews.
    pub fn head(&self, count: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(count).cloned().collect(),
        }
    }
}
