//! Command-line and environment configuration. Everything has a default under
//! the user's home so running the binary with no arguments just works.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.db";
/// Log file written next to the database. The terminal belongs to the UI.
const LOG_FILE_NAME: &str = "library-catalog.log";

/// Track books, patrons and reservations in a local SQLite catalog.
#[derive(Parser, Debug, Clone)]
#[command(name = "library-catalog", version, about)]
pub struct Args {
    /// Catalog database file (created if missing)
    #[arg(short, long, env = "LIBRARY_CATALOG_DB")]
    pub database: Option<PathBuf>,

    /// Where to write diagnostic logs
    #[arg(long, env = "LIBRARY_CATALOG_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The catalog file to open, falling back to `~/.library-catalog/library.db`.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DB_FILE_NAME)),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }
}

/// Resolve the absolute path to the application data directory.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
