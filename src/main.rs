//! Command-line entry point.
//!
//! ```sh
//! conf_sheet              # regenerate everything
//! conf_sheet 0            # JSON data only
//! conf_sheet 1 ce_items   # one workbook, data and code
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use conf_sheet::codegen::CSharpEmitter;
use conf_sheet::config::Config;
use conf_sheet::pipeline::{self, ExportOptions};
use std::path::PathBuf;
use tracing::info;

/// Export configuration workbooks to JSON data and C# loaders
#[derive(Parser, Debug)]
#[command(name = "conf_sheet", version)]
struct Args {
    /// Generate loader sources (1) or JSON data only (0)
    #[arg(value_name = "GENERATE_CODE", default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    generate_code: u8,

    /// Only export this workbook, given as a name or a path
    #[arg(value_name = "WORKBOOK")]
    workbook: Option<String>,

    /// TOML file with exporter settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the workbooks
    #[arg(long, value_name = "DIR")]
    excel_dir: Option<PathBuf>,

    /// Output directory of JSON data
    #[arg(long, value_name = "DIR")]
    json_dir: Option<PathBuf>,

    /// Output directory of loader sources
    #[arg(long, value_name = "DIR")]
    code_dir: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).context("Failed to load settings")?,
            None => Config::default(),
        };
        if let Some(dir) = &self.excel_dir {
            config.excel_dir = dir.to_owned();
        }
        if let Some(dir) = &self.json_dir {
            config.json_dir = dir.to_owned();
        }
        if let Some(dir) = &self.code_dir {
            config.code_dir = dir.to_owned();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    conf_sheet::init_tracing();
    let args = Args::parse();
    let config = args.config()?;

    info!("export start");
    let catalog = pipeline::discover(&config)
        .with_context(|| format!("Failed to read workbooks from {}", config.excel_dir.display()))?;
    let options = ExportOptions {
        generate_code: args.generate_code == 1,
        workbook: args.workbook.to_owned(),
    };
    pipeline::export(&catalog, &config, &CSharpEmitter::new(), &options)
        .context("Failed to export tables")?;
    info!("export finish");
    Ok(())
}
