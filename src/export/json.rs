use crate::database::table::Record;
use crate::database::table::Table;
use crate::error::ConfSheetError;
use crate::export::save_file;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Rows keyed by their stringified key, in key order.
struct Rows<'a>(&'a Table);

/// Fields of one record, sorted by name.
struct Fields<'a>(&'a Record);

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.rows.len()))?;
        for (key, record) in &self.0.rows {
            map.serialize_entry(&key.to_string(), &Fields(record))?;
        }
        map.end()
    }
}

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = self.0.iter().collect::<Vec<_>>();
        fields.sort_by(|(left, _), (right, _)| left.cmp(right));
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, value) in fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Renders the rows of a table as pretty-printed JSON.
pub fn to_json_string(table: &Table) -> Result<String, ConfSheetError> {
    Ok(serde_json::to_string_pretty(&Rows(table))?)
}

/// Writes `<dir>/<table>.<extension>`, returning the path written.
///
/// Tables without data rows produce no file.
pub fn write_json(table: &Table, dir: &Path, extension: &str) -> Result<Option<PathBuf>, ConfSheetError> {
    if table.is_empty() {
        debug!(table = %table.name, "no data rows, skipping json");
        return Ok(None);
    }
    let path = dir.join(format!("{}.{extension}", table.name));
    save_file(&path, &to_json_string(table)?)?;
    Ok(Some(path))
}
