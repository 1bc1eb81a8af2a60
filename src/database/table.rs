use crate::database::coerce::coerce;
use crate::database::coerce::CoercionError;
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::database::value::RowKey;
use crate::database::value::Value;
use crate::error::ConfSheetError;
use crate::spreadsheet::cell::cell_text;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::sheet::Sheet;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Row holding the declared column types
const TYPE_ROW: usize = 0;
/// Row holding the column names
const NAME_ROW: usize = 1;
/// First data row; the row in between is a free-form comment row
const DATA_ROW: usize = 3;

/// Malformed header rows of a configuration sheet.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Column-type cell {reference} of the key column is empty in sheet '{sheet}'")]
    MissingKeyType { sheet: String, reference: String },

    #[error("Column-type cell {reference} has no usable text in sheet '{sheet}'")]
    MalformedType { sheet: String, reference: String },

    #[error("Key type must be string or int, found '{kind}' in sheet '{sheet}'")]
    InvalidKeyType { sheet: String, kind: String },

    #[error("Unsupported column type '{kind}' at {reference} in sheet '{sheet}'")]
    UnsupportedType { sheet: String, reference: String, kind: String },

    #[error("Column-name cell {reference} is empty in sheet '{sheet}'")]
    MissingColumnName { sheet: String, reference: String },

    #[error("Column-name cell {reference} has no usable text in sheet '{sheet}'")]
    MalformedColumnName { sheet: String, reference: String },
}

/// One data row: (column name, value) pairs in column order.
pub type Record = Vec<(String, Value)>;

/// A parsed configuration table.
#[derive(Clone, Debug)]
pub struct Table {
    /// Table/sheet name
    pub name: String,
    /// Workbook the sheet was read from
    pub file_name: String,
    /// Type of column 0, either `string` or `int`
    pub key_type: ColumnType,
    /// Name of column 0
    pub key_name: String,
    /// Column definitions in header order; skipped columns are absent
    pub columns: Vec<Column>,
    /// Records by key; a later row with the same key replaces the earlier one
    pub rows: BTreeMap<RowKey, Record>,
}

impl Table {
    /// Parses a worksheet laid out as: type row, name row, comment row, data rows.
    ///
    /// With `strict_types` an unrecognized column type is a [`SchemaError`];
    /// otherwise the column is kept and its cells are passed through unmodified.
    pub fn parse(sheet: &Sheet, strict_types: bool) -> Result<Table, ConfSheetError> {
        let mut columns = parse_types(sheet, strict_types)?;
        parse_names(sheet, &mut columns)?;
        let key_type = columns[0].kind.to_owned();
        let key_name = columns[0].name.to_owned();

        let mut rows = BTreeMap::<RowKey, Record>::new();
        for row in DATA_ROW..sheet.rows() {
            let record = parse_record(sheet, &columns, row)?;
            let key = RowKey::from_value(&record[0].1).ok_or_else(|| SchemaError::InvalidKeyType {
                sheet: sheet.name.to_owned(),
                kind: key_type.to_string(),
            })?;
            if rows.insert(key, record).is_some() {
                debug!(sheet = %sheet.name, row = row + 1, "duplicate key replaces an earlier row");
            }
        }

        let table = Table {
            name: sheet.name.to_owned(),
            file_name: sheet.file_name.to_owned(),
            key_type,
            key_name,
            columns,
            rows,
        };
        info!(
            sheet = %table.name,
            key_type = %table.key_type,
            key_name = %table.key_name,
            columns = table.columns.len(),
            rows = table.rows.len(),
            "parsed table"
        );
        Ok(table)
    }

    /// True when the sheet has a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a record by key.
    pub fn get(&self, key: &RowKey) -> Option<&Record> {
        self.rows.get(key)
    }
}

/// Reads row 0; blank non-key cells drop their column entirely.
fn parse_types(sheet: &Sheet, strict_types: bool) -> Result<Vec<Column>, SchemaError> {
    if sheet.cell(TYPE_ROW, 0).is_none() {
        return Err(SchemaError::MissingKeyType {
            sheet: sheet.name.to_owned(),
            reference: index_to_reference(TYPE_ROW, 0),
        });
    }

    let mut columns = Vec::<Column>::new();
    for position in 0..sheet.cols() {
        let cell = sheet.cell(TYPE_ROW, position);
        if cell.is_none() {
            debug!(sheet = %sheet.name, column = %index_to_reference(TYPE_ROW, position), "skipping untyped column");
            continue;
        }
        let reference = index_to_reference(TYPE_ROW, position);
        let tag = cell_text(cell);
        if tag.is_empty() {
            return Err(SchemaError::MalformedType {
                sheet: sheet.name.to_owned(),
                reference,
            });
        }
        let kind = ColumnType::parse(&tag);
        if position == 0 && !kind.is_key() {
            return Err(SchemaError::InvalidKeyType {
                sheet: sheet.name.to_owned(),
                kind: tag,
            });
        }
        if !kind.is_supported() {
            if strict_types {
                return Err(SchemaError::UnsupportedType {
                    sheet: sheet.name.to_owned(),
                    reference,
                    kind: tag,
                });
            }
            warn!(sheet = %sheet.name, column = %reference, kind = %tag, "unsupported column type, values are passed through");
        }
        columns.push(Column {
            position,
            kind,
            name: String::new(),
        });
    }
    Ok(columns)
}

/// Reads row 1 for every column that survived row 0.
fn parse_names(sheet: &Sheet, columns: &mut [Column]) -> Result<(), SchemaError> {
    for column in columns.iter_mut() {
        let reference = index_to_reference(NAME_ROW, column.position);
        let cell = sheet.cell(NAME_ROW, column.position);
        if cell.is_none() {
            return Err(SchemaError::MissingColumnName {
                sheet: sheet.name.to_owned(),
                reference,
            });
        }
        let name = cell_text(cell);
        if name.is_empty() {
            return Err(SchemaError::MalformedColumnName {
                sheet: sheet.name.to_owned(),
                reference,
            });
        }
        column.name = name;
    }
    Ok(())
}

fn parse_record(sheet: &Sheet, columns: &[Column], row: usize) -> Result<Record, CoercionError> {
    let mut record = Record::with_capacity(columns.len());
    for column in columns {
        let cell = sheet.cell(row, column.position);
        let value = coerce(cell, &column.kind).map_err(|message| CoercionError {
            sheet: sheet.name.to_owned(),
            reference: index_to_reference(row, column.position),
            value: cell.map(|cell| cell.value.to_owned()).unwrap_or_default(),
            kind: column.kind.to_string(),
            message,
        })?;
        record.push((column.name.to_owned(), value));
    }
    Ok(record)
}
