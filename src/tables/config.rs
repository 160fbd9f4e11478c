//! Locations of the source tables

use std::env;
use std::path::{Path, PathBuf};

/// Default directory holding the table exports
pub const DEFAULT_DATA_PATH: &str = "data";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "STOCK_EVENTS_DATA_DIR";

/// File names of the four source tables inside a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub data_dir: PathBuf,
    pub inflation_events: String,
    pub inflation_income: String,
    pub interest_rate_events: String,
    pub interest_rate_income: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_PATH)
    }
}

impl TableConfig {
    /// Default file names under a specific directory
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            inflation_events: "Inflation_event_stock_analysis_resultsOct.csv".to_string(),
            inflation_income: "Inflation_IncomeStatement_correlation_results.csv".to_string(),
            interest_rate_events: "interestrate_event_stock_analysis_resultsOct.csv".to_string(),
            interest_rate_income: "interestrate_IncomeStatement_correlation_results.csv".to_string(),
        }
    }

    /// Default file names, directory taken from `STOCK_EVENTS_DATA_DIR` if set
    pub fn from_env() -> Self {
        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::with_data_dir(dir.trim()),
            _ => Self::default(),
        }
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
