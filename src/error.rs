//! Error types for table loading and projection

use thiserror::Error;

use crate::tables::EventType;

/// Failures raised while resolving rows or computing projections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No event row or no income row for the symbol under this event type
    #[error("Stock symbol not found")]
    SymbolNotFound {
        symbol: String,
        event_type: EventType,
    },

    /// Event row lacks a usable `Latest Close Price`
    #[error("Stock Price data not available in event details.")]
    StockPriceUnavailable,
}

/// Failures raised while loading the source tables at startup
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("table is missing identity column '{0}'")]
    MissingIdentityColumn(String),
}
