//! Conversion of raw cells into typed values for a declared column type.

use crate::database::column::ColumnType;
use crate::database::value::Value;
use crate::spreadsheet::cell::cell_text;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use thiserror::Error;

/// A data cell whose content cannot be converted to its column's declared type.
#[derive(Error, Debug)]
#[error("Cannot convert '{value}' at {reference} in sheet '{sheet}' to {kind}: {message}")]
pub struct CoercionError {
    pub sheet: String,
    pub reference: String,
    /// Raw cell value as stored in the workbook
    pub value: String,
    pub kind: String,
    pub message: String,
}

/// Coerces a cell (missing cells count as blank) to a value of the declared type.
///
/// Blank cells never fail: they become `0`, `0.0` or `""`.
pub fn coerce(cell: Option<&Cell>, kind: &ColumnType) -> Result<Value, String> {
    match kind {
        ColumnType::String => Ok(Value::Text(cell_text(cell))),
        ColumnType::Int => to_int(cell).map(Value::Int),
        ColumnType::Float => to_float(cell).map(Value::Float),
        ColumnType::Unsupported(_) => Ok(passthrough(cell)),
    }
}

fn to_int(cell: Option<&Cell>) -> Result<i64, String> {
    let cell = match cell.filter(|cell| !cell.is_empty()) {
        Some(cell) => cell,
        None => return Ok(0),
    };
    let failed = || format!("parse '{}' to int failed", cell.value);
    match cell.kind {
        CellType::Number => {
            let number = cell.to_number()?.trunc();
            if number.is_finite() && number >= i64::MIN as f64 && number < i64::MAX as f64 {
                Ok(number as i64)
            } else {
                Err(failed())
            }
        }
        CellType::Boolean => Ok(if cell.value == "1" { 1 } else { 0 }),
        CellType::Text => cell.value.trim().parse::<i64>().map_err(|_| failed()),
        CellType::Empty | CellType::Error => Err(failed()),
    }
}

fn to_float(cell: Option<&Cell>) -> Result<f64, String> {
    let cell = match cell.filter(|cell| !cell.is_empty() && !cell.value.is_empty()) {
        Some(cell) => cell,
        None => return Ok(0.0),
    };
    let failed = || format!("parse '{}' to float failed", cell.value);
    let number = match cell.kind {
        CellType::Number => cell.to_number()?,
        CellType::Boolean => if cell.value == "1" { 1.0 } else { 0.0 },
        CellType::Text => cell.value.trim().parse::<f64>().map_err(|_| failed())?,
        CellType::Empty | CellType::Error => return Err(failed()),
    };
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("'{}' is not a finite float", cell.value))
    }
}

/// Raw cell content for columns whose type is not recognized.
fn passthrough(cell: Option<&Cell>) -> Value {
    match cell {
        Some(cell) if cell.kind == CellType::Number => cell.to_number()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Text(cell.value.to_owned())),
        _ => Value::Text(cell_text(cell)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: &str) -> Cell {
        Cell::new(3, 0, CellType::Number, value)
    }

    fn text(value: &str) -> Cell {
        Cell::new(3, 0, CellType::Text, value)
    }

    #[test]
    fn empty_cells_use_defaults() {
        assert_eq!(coerce(None, &ColumnType::Int), Ok(Value::Int(0)));
        assert_eq!(coerce(None, &ColumnType::Float), Ok(Value::Float(0.0)));
        assert_eq!(coerce(None, &ColumnType::String), Ok(Value::Text(String::new())));

        let blank = Cell::new(3, 0, CellType::Empty, "");
        assert_eq!(coerce(Some(&blank), &ColumnType::Int), Ok(Value::Int(0)));
        assert_eq!(coerce(Some(&blank), &ColumnType::Float), Ok(Value::Float(0.0)));
        assert_eq!(coerce(Some(&blank), &ColumnType::String), Ok(Value::Text(String::new())));
        assert_eq!(coerce(Some(&text("")), &ColumnType::Float), Ok(Value::Float(0.0)));
    }

    #[test]
    fn integers() {
        assert_eq!(coerce(Some(&number("42")), &ColumnType::Int), Ok(Value::Int(42)));
        assert_eq!(coerce(Some(&number("3.9")), &ColumnType::Int), Ok(Value::Int(3)));
        assert_eq!(coerce(Some(&number("-3.9")), &ColumnType::Int), Ok(Value::Int(-3)));
        assert_eq!(coerce(Some(&text(" 17 ")), &ColumnType::Int), Ok(Value::Int(17)));
        let flag = Cell::new(3, 0, CellType::Boolean, "1");
        assert_eq!(coerce(Some(&flag), &ColumnType::Int), Ok(Value::Int(1)));
    }

    #[test]
    fn floats() {
        assert_eq!(coerce(Some(&number("2.5")), &ColumnType::Float), Ok(Value::Float(2.5)));
        assert_eq!(coerce(Some(&text("0.25")), &ColumnType::Float), Ok(Value::Float(0.25)));
        assert_eq!(coerce(Some(&number("7")), &ColumnType::Float), Ok(Value::Float(7.0)));
    }

    #[test]
    fn strings_render_numbers() {
        assert_eq!(coerce(Some(&number("1001")), &ColumnType::String), Ok(Value::Text("1001".to_owned())));
        assert_eq!(coerce(Some(&number("0.5")), &ColumnType::String), Ok(Value::Text("0.5".to_owned())));
        assert_eq!(coerce(Some(&text(" Sword ")), &ColumnType::String), Ok(Value::Text(" Sword ".to_owned())));
    }

    #[test]
    fn non_numeric_text_fails_with_value() {
        let error = coerce(Some(&text("Sword")), &ColumnType::Int).unwrap_err();
        assert!(error.contains("'Sword'"), "{error}");
        let error = coerce(Some(&text("1.5")), &ColumnType::Int).unwrap_err();
        assert!(error.contains("'1.5'"), "{error}");
        let error = coerce(Some(&text("abc")), &ColumnType::Float).unwrap_err();
        assert!(error.contains("'abc'"), "{error}");
        let error = coerce(Some(&Cell::new(3, 0, CellType::Error, "#N/A")), &ColumnType::Float).unwrap_err();
        assert!(error.contains("'#N/A'"), "{error}");
    }

    #[test]
    fn empty_text_is_not_blank_for_ints() {
        let error = coerce(Some(&text("")), &ColumnType::Int).unwrap_err();
        assert!(error.contains("''"), "{error}");
        assert_eq!(coerce(Some(&text("")), &ColumnType::String), Ok(Value::Text(String::new())));
    }

    #[test]
    fn non_finite_floats_fail() {
        for value in ["inf", "-inf", "NaN", "infinity"] {
            let error = coerce(Some(&text(value)), &ColumnType::Float).unwrap_err();
            assert!(error.contains(value), "{error}");
        }
        let error = coerce(Some(&number("1e400")), &ColumnType::Float).unwrap_err();
        assert!(error.contains("'1e400'"), "{error}");
    }

    #[test]
    fn unsupported_types_pass_raw_values_through() {
        let kind = ColumnType::Unsupported("Vector3".to_owned());
        assert_eq!(coerce(Some(&text("1,2,3")), &kind), Ok(Value::Text("1,2,3".to_owned())));
        assert_eq!(coerce(Some(&number("4")), &kind), Ok(Value::Float(4.0)));
        assert_eq!(coerce(None, &kind), Ok(Value::Text(String::new())));
    }
}
