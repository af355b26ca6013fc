//! Table types.

use super::{ContentUnit, Paragraph};
use crate::style::StyleRecord;
use serde::{Deserialize, Serialize};

/// A table structure. Every row has the same number of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Resolved table style
    pub style: StyleRecord,

    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new(style: StyleRecord) -> Self {
        Self {
            style,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check that all rows have the same number of cells.
    pub fn is_rectangular(&self) -> bool {
        let columns = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == columns)
    }

    /// Number of leading rows made only of header cells.
    pub fn header_rows(&self) -> usize {
        self.rows.iter().take_while(|r| r.is_header).count()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether every cell is a header cell
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells. The row is a header row when it has
    /// cells and all of them are header cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        let is_header = !cells.is_empty() && cells.iter().all(|c| c.header);
        Self { cells, is_header }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<ContentUnit>,

    /// `<th>` cell
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub header: bool,
}

impl TableCell {
    /// Create a cell from content units.
    pub fn new(content: Vec<ContentUnit>) -> Self {
        Self {
            content,
            header: false,
        }
    }

    /// Create a cell holding one paragraph of text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![ContentUnit::Paragraph(Paragraph::with_text(text))])
    }

    /// Create an empty cell, used to pad short rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark the cell as a header cell.
    pub fn header(mut self) -> Self {
        self.header = true;
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(ContentUnit::plain_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
