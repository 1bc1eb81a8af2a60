//! Source generation for table loaders.
//!
//! Tables are lowered to a language-neutral [`TableSchema`]; an [`Emitter`]
//! turns schemas into source files for one target language.
pub mod csharp;
pub mod hash;

pub use csharp::CSharpEmitter;

use crate::database::column::ColumnType;
use crate::database::table::Table;
use crate::codegen::hash::bkdr_hash;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Tables '{first}' and '{second}' share hash {hash}; rename one of them")]
    HashCollision { first: String, second: String, hash: u32 },

    #[error("Formatting generated code failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// One field of a generated loader type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: ColumnType,
}

/// Everything an emitter needs to know about a table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub key_type: ColumnType,
    pub fields: Vec<Field>,
}

impl From<&Table> for TableSchema {
    fn from(table: &Table) -> Self {
        TableSchema {
            name: table.name.to_owned(),
            key_type: table.key_type.to_owned(),
            fields: table.columns
                .iter()
                .map(|column| Field {
                    name: column.name.to_owned(),
                    kind: column.kind.to_owned(),
                })
                .collect(),
        }
    }
}

/// A `case` of the generated dispatch helper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchEntry {
    pub hash: u32,
    pub name: String,
}

/// Hashes every table name, rejecting names that would produce ambiguous dispatch.
pub fn dispatch_entries<'a, I>(names: I, seed: u32) -> Result<Vec<DispatchEntry>, CodegenError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashMap::<u32, &str>::new();
    let mut entries = Vec::<DispatchEntry>::new();
    for name in names {
        let hash = bkdr_hash(name, seed);
        if let Some(first) = seen.insert(hash, name) {
            return Err(CodegenError::HashCollision {
                first: first.to_owned(),
                second: name.to_owned(),
                hash,
            });
        }
        entries.push(DispatchEntry {
            hash,
            name: name.to_owned(),
        });
    }
    Ok(entries)
}

/// A target language for generated loaders.
pub trait Emitter {
    /// Short identifier of the target language
    fn name(&self) -> &'static str;

    /// Extension of generated source files, without the dot
    fn file_extension(&self) -> &'static str;

    /// File name of the per-table source file
    fn table_file_name(&self, schema: &TableSchema) -> String {
        format!("{}.{}", schema.name, self.file_extension())
    }

    /// File name of the dispatch helper
    fn dispatch_file_name(&self) -> String;

    /// Generates the data-access type of one table
    fn emit_table(&self, schema: &TableSchema) -> Result<String, CodegenError>;

    /// Generates the helper that maps a table hash to a new loader instance
    fn emit_dispatch(&self, entries: &[DispatchEntry]) -> Result<String, CodegenError>;
}
