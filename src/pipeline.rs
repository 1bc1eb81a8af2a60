//! Discovery and export passes of the exporter.
//!
//! [`discover`] reads every qualifying workbook into a [`Catalog`];
//! [`export`] writes JSON data, loader sources and the dispatch helper for
//! the whole catalog or for a single workbook.

use crate::codegen::dispatch_entries;
use crate::codegen::Emitter;
use crate::codegen::TableSchema;
use crate::config::Config;
use crate::database::table::Table;
use crate::error::ConfSheetError;
use crate::error::ResultMessage;
use crate::export::clear_dir;
use crate::export::json::write_json;
use crate::export::save_file;
use crate::spreadsheet::open_spreadsheet;
use crate::spreadsheet::Criteria;
use glob::Pattern;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Table '{table}' is defined in both '{first}' and '{second}'")]
    DuplicateTable { table: String, first: String, second: String },

    #[error("Unknown workbook '{0}'")]
    UnknownWorkbook(String),
}

/// Everything discovered in the excel directory.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Workbook paths by file name without extension
    pub workbooks: BTreeMap<String, PathBuf>,
    /// Parsed tables by name
    pub tables: BTreeMap<String, Table>,
    /// Table names of each workbook, in sheet order
    pub workbook_tables: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Tables belonging to one workbook.
    pub fn tables_of(&self, workbook: &str) -> Option<Vec<&Table>> {
        let names = self.workbook_tables.get(workbook)?;
        Some(names.iter().filter_map(|name| self.tables.get(name)).collect())
    }
}

/// What to regenerate in an export pass.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write loader sources besides JSON data
    pub generate_code: bool,
    /// Restrict the pass to one workbook, given as a name or a path
    pub workbook: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            generate_code: true,
            workbook: None,
        }
    }
}

/// Files written by an export pass.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub json_files: Vec<PathBuf>,
    pub code_files: Vec<PathBuf>,
}

/// Lists `<prefix>*.<extension>` files of the excel directory by file stem.
pub fn find_workbooks(config: &Config) -> Result<BTreeMap<String, PathBuf>, ConfSheetError> {
    let pattern = Pattern::new(&format!(
        "{}*.{}",
        Pattern::escape(&config.workbook_prefix),
        Pattern::escape(&config.workbook_extension)
    ))?;

    let prefix = config.excel_dir.display().to_string();
    let mut workbooks = BTreeMap::<String, PathBuf>::new();
    let entries = std::fs::read_dir(&config.excel_dir)
        .map_err(ConfSheetError::from)
        .with_prefix(&prefix)?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        let (Some(file_name), Some(stem)) = (
            path.file_name().and_then(|name| name.to_str()),
            path.file_stem().and_then(|stem| stem.to_str()),
        ) else {
            continue;
        };
        if pattern.matches(file_name) {
            workbooks.insert(stem.to_owned(), path.to_owned());
        }
    }
    Ok(workbooks)
}

/// Reads every qualifying worksheet of every workbook.
pub fn discover(config: &Config) -> Result<Catalog, ConfSheetError> {
    let criteria = Criteria::new(&config.sheet_prefix);
    let mut catalog = Catalog {
        workbooks: find_workbooks(config)?,
        ..Default::default()
    };

    for (workbook, path) in &catalog.workbooks {
        let file_name = path.to_string_lossy();
        let mut spreadsheet = open_spreadsheet(&file_name).with_prefix(&file_name)?;
        debug!(workbook = %spreadsheet.name(), sheets = ?spreadsheet.sheet_names(), "opened workbook");
        let sheets = spreadsheet.read_sheets(&criteria).with_prefix(&file_name)?;
        info!(workbook = %workbook, sheets = sheets.len(), "read workbook");

        let mut names = Vec::<String>::with_capacity(sheets.len());
        for sheet in &sheets {
            let table = Table::parse(sheet, config.strict_types).with_prefix(&file_name)?;
            if let Some(existing) = catalog.tables.get(&table.name) {
                return Err(PipelineError::DuplicateTable {
                    table: table.name.to_owned(),
                    first: existing.file_name.to_owned(),
                    second: table.file_name.to_owned(),
                }
                .into());
            }
            names.push(table.name.to_owned());
            catalog.tables.insert(table.name.to_owned(), table);
        }
        catalog.workbook_tables.insert(workbook.to_owned(), names);
    }
    Ok(catalog)
}

/// Maps a workbook argument (`ce_items`, `ce_items.xlsx` or a path) to its catalog key.
pub fn workbook_key(argument: &str, extension: &str) -> String {
    let path = Path::new(argument);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| argument.to_owned());
    let has_extension = path
        .extension()
        .is_some_and(|actual| actual.eq_ignore_ascii_case(extension));
    match path.file_stem() {
        Some(stem) if has_extension => stem.to_string_lossy().into_owned(),
        _ => name,
    }
}

/// Writes outputs for the catalog.
///
/// Without a workbook filter both output directories are cleared first and
/// every table is written. The dispatch helper always covers all tables.
pub fn export(
    catalog: &Catalog,
    config: &Config,
    emitter: &dyn Emitter,
    options: &ExportOptions,
) -> Result<ExportSummary, ConfSheetError> {
    let entries = dispatch_entries(catalog.tables.keys().map(String::as_str), config.hash_seed)?;

    let tables = match &options.workbook {
        Some(argument) => {
            let key = workbook_key(argument, &config.workbook_extension);
            catalog
                .tables_of(&key)
                .ok_or(PipelineError::UnknownWorkbook(key))?
        }
        None => {
            clear_dir(&config.json_dir)?;
            clear_dir(&config.code_dir)?;
            catalog.tables.values().collect()
        }
    };

    let mut summary = ExportSummary::default();
    for table in tables {
        if options.generate_code {
            let schema = TableSchema::from(table);
            let path = config.code_dir.join(emitter.table_file_name(&schema));
            save_file(&path, &emitter.emit_table(&schema)?)?;
            debug!(table = %table.name, path = %path.display(), "wrote loader");
            summary.code_files.push(path);
        }
        if let Some(path) = write_json(table, &config.json_dir, &config.json_extension)? {
            debug!(table = %table.name, path = %path.display(), "wrote data");
            summary.json_files.push(path);
        }
    }

    let path = config.code_dir.join(emitter.dispatch_file_name());
    save_file(&path, &emitter.emit_dispatch(&entries)?)?;
    summary.code_files.push(path);

    info!(
        emitter = emitter.name(),
        tables = catalog.tables.len(),
        json_files = summary.json_files.len(),
        code_files = summary.code_files.len(),
        "export finished"
    );
    Ok(summary)
}
