//! # Spreadsheet Reading Module
//!
//! Opens Excel workbooks (`.xlsx`, `.xlsm`) and materializes the worksheets
//! selected by a [`Criteria`] as sparse grids of typed cells. Everything in
//! this module is format plumbing; the header convention is interpreted by
//! [`crate::database`].
pub mod cell;
pub mod criteria;
mod excel;
pub mod reference;
pub mod sheet;
pub mod xlsx;

pub use cell::Cell;
pub use cell::CellType;
pub use criteria::Criteria;
pub use sheet::Sheet;

use crate::error::ConfSheetError;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while opening or reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Cannot detect file format for '{0}'")]
    FileFormatError(String),

    #[error("Missing part '{0}' in workbook")]
    FileError(String),

    #[error("Workbook '{0}' contains no worksheets")]
    SpreadsheetEmptyError(String),

    #[error("Workbook '{0}' is password protected")]
    SpreadsheetPasswordProtectedError(String),

    #[error("Invalid cell value in '{0}' sheet '{1}' at {2}: {3}")]
    CellValueError(String, String, String, String),
}

/// A workbook that can list its worksheets and read the qualifying ones.
pub trait Spreadsheet {
    /// Returns the file name of this spreadsheet
    fn name(&self) -> String;

    /// Returns every worksheet name in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the worksheets accepted by the criteria, in workbook order
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, ConfSheetError>;
}

/// Opens a spreadsheet by file extension.
pub fn open_spreadsheet(file_name: &str) -> Result<Box<dyn Spreadsheet>, ConfSheetError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => Ok(Box::new(XlsxSpreadsheet::open(file_name)?)),
        _ => Err(SpreadsheetError::FileFormatError(file_name.to_owned()))?,
    }
}
