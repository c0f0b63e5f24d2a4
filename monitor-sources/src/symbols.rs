//! Company symbol universe loading
//!
//! The symbol list is read from a static local CSV file; it never touches the
//! network. Any problem with the file yields an empty universe.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use monitor_core::MonitorError;

/// Source of the ordered ticker list for a fetch cycle
pub trait SymbolLoader: Send + Sync {
    /// Ordered tickers; empty when unavailable
    fn load_symbols(&self) -> Vec<String>;
}

/// Loads symbols from one column of a CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvSymbolLoader {
    path: PathBuf,
    column: String,
}

impl CsvSymbolLoader {
    pub fn new(path: impl AsRef<Path>, column: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            column: column.into(),
        }
    }

    /// Read the file, surfacing the failure reason
    pub fn try_load(&self) -> Result<Vec<String>, MonitorError> {
        if !self.path.exists() {
            return Err(MonitorError::symbols(format!(
                "static symbol file not found at {}",
                self.path.display()
            )));
        }

        let file = std::fs::File::open(&self.path)
            .map_err(|e| MonitorError::symbols(format!("{}: {}", self.path.display(), e)))?;
        read_symbols(file, &self.column)
    }
}

impl SymbolLoader for CsvSymbolLoader {
    fn load_symbols(&self) -> Vec<String> {
        match self.try_load() {
            Ok(symbols) => {
                info!(
                    "Loaded {} symbols from {}",
                    symbols.len(),
                    self.path.display()
                );
                symbols
            }
            Err(e) => {
                warn!("Symbol list unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

/// Fixed in-memory symbol list
#[derive(Debug, Clone, Default)]
pub struct StaticSymbols(pub Vec<String>);

impl SymbolLoader for StaticSymbols {
    fn load_symbols(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Extract `column` from CSV data, preserving row order and skipping blanks
pub fn read_symbols<R: Read>(reader: R, column: &str) -> Result<Vec<String>, MonitorError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| MonitorError::symbols(format!("unreadable header: {}", e)))?;

    let index = headers.iter().position(|h| h == column).ok_or_else(|| {
        MonitorError::symbols(format!("the CSV file has no column named '{}'", column))
    })?;

    let mut symbols = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| MonitorError::symbols(format!("malformed row: {}", e)))?;
        if let Some(value) = record.get(index).filter(|v| !v.is_empty()) {
            symbols.push(value.to_string());
        }
    }

    Ok(symbols)
}
