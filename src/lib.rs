//! # Configuration Sheet Exporter
//!
//! Turns Excel workbooks maintained by designers into game configuration
//! data. Every worksheet whose name carries the table prefix becomes a table;
//! for each table the exporter writes a JSON data dump and a C# loader class,
//! plus one dispatch helper that maps the hash of a table name to its loader.
//!
//! ## Sheet layout
//!
//! - Row 1: column types (`int`, `string`, `float`); column A is the key and must be `int` or `string`
//! - Row 2: column names
//! - Row 3: free-form comments, ignored
//! - Row 4 onwards: data, one record per row keyed by column A
//!
//! Columns without a type are ignored. Blank data rows are skipped, and a
//! later row with an existing key replaces the earlier one.
//!
//! ## Pipeline
//!
//! - [`pipeline::discover`] reads `ce_*.xlsx` workbooks into a [`pipeline::Catalog`]
//! - [`pipeline::export`] writes JSON data, loader sources and the dispatch helper,
//!   either for the whole catalog or for a single workbook
pub mod codegen;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
mod helpers;
pub mod pipeline;
pub mod spreadsheet;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the log subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_level(true))
            .with(filter)
            .init();
    });
}
