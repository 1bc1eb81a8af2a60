use crate::spreadsheet::cell::Cell;
use std::collections::HashMap;

/// Represents one worksheet as a sparse grid of non-empty cells.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Source file name
    pub file_name: String,
    /// Sheet name
    pub name: String,
    /// All non-empty cells in reading order
    pub cells: Vec<Cell>,
    /// Index mapping from (row, col) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Actual data extent (determined from cell data)
    pub row_upper_bound: Option<usize>,
    pub col_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            indexes: HashMap::new(),
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Number of rows up to and including the last row holding a value.
    pub fn rows(&self) -> usize {
        self.row_upper_bound.map(|row| row + 1).unwrap_or(0)
    }

    /// Number of columns up to and including the rightmost column holding a value.
    pub fn cols(&self) -> usize {
        self.col_upper_bound.map(|col| col + 1).unwrap_or(0)
    }

    /// Adds a cell to the sheet, updating the data extent.
    /// Blank cells are dropped, text cells holding `""` are kept; a second cell
    /// at the same position replaces the first.
    pub fn push(&mut self, cell: Cell) {
        if cell.is_empty() {
            return;
        }
        self.update_bound(cell.row, cell.col);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(&index) => self.cells[index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Looks up the cell at (row, col), if it holds a value.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.indexes.get(&(row, col)).map(|&index| &self.cells[index])
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::spreadsheet::*;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell::new(row, col, CellType::Text, value));
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("", "");

        assert!(sheet.cell(0, 0).is_none());
        assert_eq!(sheet.row_upper_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
        assert_eq!(sheet.rows(), 0);
        assert_eq!(sheet.cols(), 0);
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        push(&mut sheet, 3, 1, "c");
        push(&mut sheet, 3, 3, "d");

        assert_eq!(sheet.cells.len(), 4);
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_upper_bound, Some(3));
        assert_eq!(sheet.rows(), 4);
        assert_eq!(sheet.cols(), 4);
        assert_eq!(sheet.cell(1, 3).map(|cell| cell.value.as_str()), Some("b"));
        assert!(sheet.cell(2, 2).is_none());
    }

    #[test]
    fn sheet_ignores_blank_cells() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "a");
        sheet.push(Cell::new(6, 8, CellType::Empty, ""));

        assert_eq!(sheet.cells.len(), 1);
        assert_eq!(sheet.rows(), 1);
        assert_eq!(sheet.cols(), 1);
    }

    #[test]
    fn sheet_keeps_empty_text_cells() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "a");
        push(&mut sheet, 2, 1, "");

        assert_eq!(sheet.cells.len(), 2);
        assert_eq!(sheet.rows(), 3);
        assert_eq!(sheet.cell(2, 1).map(|cell| cell.value.as_str()), Some(""));
    }

    #[test]
    fn sheet_replaces_duplicate_positions() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 2, 2, "first");
        push(&mut sheet, 2, 2, "second");

        assert_eq!(sheet.cells.len(), 1);
        assert_eq!(sheet.cell(2, 2).map(|cell| cell.value.as_str()), Some("second"));
    }
}
