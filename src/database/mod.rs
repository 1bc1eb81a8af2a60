//! Typed configuration tables built from worksheets.
//!
//! A worksheet qualifies as a table when its first three rows follow the
//! header convention: declared column types, column names, then a comment
//! row. Column 0 is the key column.
pub mod coerce;
pub mod column;
pub mod table;
pub mod value;

pub use column::Column;
pub use column::ColumnType;
pub use table::Record;
pub use table::Table;
pub use value::RowKey;
pub use value::Value;
