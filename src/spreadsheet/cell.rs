/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as "1"/"0"
    Boolean,
    /// Numeric values, including dates stored as serial numbers
    Number,
    /// Inline, shared or formula string values
    Text,
    /// Error values such as "#N/A"
    Error,
}

/// Represents a single cell in a spreadsheet with position, type, and value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell data type
    pub kind: CellType,
    /// Cell value as stored in the sheet XML
    pub value: String,
}

impl Cell {
    pub fn new(row: usize, col: usize, kind: CellType, value: &str) -> Self {
        Cell {
            row,
            col,
            kind,
            value: value.to_owned(),
        }
    }

    /// A cell is blank when the sheet recorded it without a value; text holding `""` is not blank.
    pub fn is_empty(&self) -> bool {
        self.kind == CellType::Empty
    }

    /// Parses the stored value of a numeric cell.
    pub fn to_number(&self) -> Result<f64, String> {
        self.value.trim().parse::<f64>().map_err(|_| format!("parse '{}' to number failed", self.value))
    }

    /// Extracts the cell text used for header rows and string columns.
    ///
    /// Blank cells yield empty text, numbers render as integer literals when they
    /// have no fractional part, every other kind yields its stored value.
    pub fn text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match self.kind {
            CellType::Number => match self.to_number() {
                Ok(number) => render_number(number),
                Err(_) => self.value.to_owned(),
            },
            _ => self.value.to_owned(),
        }
    }
}

/// Text extraction for an optional cell; a missing cell counts as blank.
pub fn cell_text(cell: Option<&Cell>) -> String {
    cell.map(Cell::text).unwrap_or_default()
}

/// Renders a float as an integer literal when exact, otherwise in shortest float form.
pub(crate) fn render_number(number: f64) -> String {
    if number == 0.0 {
        "0".to_owned()
    } else if number.is_finite() && number.fract() == 0.0 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_as_integers_when_exact() {
        assert_eq!(Cell::new(0, 0, CellType::Number, "3").text(), "3");
        assert_eq!(Cell::new(0, 0, CellType::Number, "3.0").text(), "3");
        assert_eq!(Cell::new(0, 0, CellType::Number, "-0").text(), "0");
        assert_eq!(Cell::new(0, 0, CellType::Number, "1E+3").text(), "1000");
        assert_eq!(Cell::new(0, 0, CellType::Number, "2.5").text(), "2.5");
        assert_eq!(Cell::new(0, 0, CellType::Number, "-0.125").text(), "-0.125");
    }

    #[test]
    fn other_kinds_render_stored_value() {
        assert_eq!(Cell::new(0, 0, CellType::Text, " padded ").text(), " padded ");
        assert_eq!(Cell::new(0, 0, CellType::Boolean, "1").text(), "1");
        assert_eq!(Cell::new(0, 0, CellType::Error, "#N/A").text(), "#N/A");
        assert_eq!(Cell::new(0, 0, CellType::Empty, "ignored").text(), "");
        assert_eq!(cell_text(None), "");
    }

    #[test]
    fn only_blank_cells_are_empty() {
        assert!(Cell::new(0, 0, CellType::Empty, "").is_empty());
        assert!(!Cell::new(0, 0, CellType::Text, "").is_empty());
        assert_eq!(Cell::new(0, 0, CellType::Text, "").text(), "");
    }
}
