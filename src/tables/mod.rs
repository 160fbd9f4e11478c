//! Source tables and symbol lookup
//!
//! The four tables are loaded once at startup into a [`MarketData`] value
//! and are read-only afterwards. Share it behind an `Arc` to serve
//! concurrent requests.

mod config;
pub mod loader;
mod row;

pub use config::{TableConfig, DATA_DIR_ENV, DEFAULT_DATA_PATH};
pub use loader::{DataTable, EVENT_IDENTITY_COLUMN, INCOME_IDENTITY_COLUMN};
pub use row::{coerce_numeric, EventRow, FieldRow, IncomeRow};

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, TableError};

/// Macroeconomic event category
///
/// Parsed the same way from JSON and the command line: surrounding
/// whitespace is ignored, anything but the two labels is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum EventType {
    Inflation,
    #[serde(rename = "Interest Rate")]
    InterestRate,
}

impl EventType {
    /// Wire label, also the interpretation key for this event
    pub fn label(self) -> &'static str {
        match self {
            EventType::Inflation => "Inflation",
            EventType::InterestRate => "Interest Rate",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Inflation" => Ok(EventType::Inflation),
            "Interest Rate" => Ok(EventType::InterestRate),
            other => Err(format!(
                "Unknown event type: {} (expected 'Inflation' or 'Interest Rate')",
                other
            )),
        }
    }
}

impl TryFrom<String> for EventType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Event-sensitivity and income tables for one event category
#[derive(Debug, Clone)]
pub struct EventTables {
    pub events: DataTable,
    pub income: DataTable,
}

impl EventTables {
    pub fn new(events: DataTable, income: DataTable) -> Self {
        Self { events, income }
    }

    /// Event and income rows for a symbol, if both exist
    pub fn lookup(&self, symbol: &str) -> Option<(&EventRow, &IncomeRow)> {
        Some((self.events.find(symbol)?, self.income.find(symbol)?))
    }
}

/// All source tables, keyed by event category
#[derive(Debug, Clone)]
pub struct MarketData {
    pub inflation: EventTables,
    pub interest_rate: EventTables,
}

impl MarketData {
    pub fn new(inflation: EventTables, interest_rate: EventTables) -> Self {
        Self {
            inflation,
            interest_rate,
        }
    }

    /// Load all four tables from the configured directory
    pub fn load(config: &TableConfig) -> Result<Self, TableError> {
        info!("Loading market data from {}", config.data_dir().display());

        let inflation = EventTables::new(
            DataTable::load(config.path_of(&config.inflation_events), EVENT_IDENTITY_COLUMN)?,
            DataTable::load(config.path_of(&config.inflation_income), INCOME_IDENTITY_COLUMN)?,
        );
        let interest_rate = EventTables::new(
            DataTable::load(config.path_of(&config.interest_rate_events), EVENT_IDENTITY_COLUMN)?,
            DataTable::load(config.path_of(&config.interest_rate_income), INCOME_IDENTITY_COLUMN)?,
        );

        Ok(Self::new(inflation, interest_rate))
    }

    pub fn tables(&self, event_type: EventType) -> &EventTables {
        match event_type {
            EventType::Inflation => &self.inflation,
            EventType::InterestRate => &self.interest_rate,
        }
    }

    /// Resolve a symbol to its event and income rows
    pub fn lookup(
        &self,
        symbol: &str,
        event_type: EventType,
    ) -> Result<(&EventRow, &IncomeRow), EngineError> {
        self.tables(event_type)
            .lookup(symbol)
            .ok_or_else(|| EngineError::SymbolNotFound {
                symbol: symbol.to_string(),
                event_type,
            })
    }

    /// Symbols with both an event row and an income row
    pub fn symbols(&self, event_type: EventType) -> Vec<&str> {
        let tables = self.tables(event_type);
        tables
            .events
            .keys()
            .filter(|symbol| tables.income.find(symbol).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> MarketData {
        let inflation = EventTables::new(
            DataTable::from_reader(
                "Symbol,Latest Close Price,Event Coefficient\nAAA,100,2\nBBB,50,0.5\n".as_bytes(),
                EVENT_IDENTITY_COLUMN,
            )
            .unwrap(),
            DataTable::from_reader(
                "Stock Name,Latest Event Value\nAAA,2\n".as_bytes(),
                INCOME_IDENTITY_COLUMN,
            )
            .unwrap(),
        );
        let interest_rate = EventTables::new(
            DataTable::from_reader("Symbol,Latest Close Price\nCCC,10\n".as_bytes(), EVENT_IDENTITY_COLUMN)
                .unwrap(),
            DataTable::from_reader("Stock Name,Revenue\nCCC,5\n".as_bytes(), INCOME_IDENTITY_COLUMN)
                .unwrap(),
        );
        MarketData::new(inflation, interest_rate)
    }

    #[test]
    fn test_event_type_labels() {
        assert_eq!("Inflation".parse::<EventType>(), Ok(EventType::Inflation));
        assert_eq!("Interest Rate".parse::<EventType>(), Ok(EventType::InterestRate));
        assert!("Deflation".parse::<EventType>().is_err());
        assert_eq!(EventType::InterestRate.to_string(), "Interest Rate");

        let json = serde_json::to_string(&EventType::InterestRate).unwrap();
        assert_eq!(json, "\"Interest Rate\"");
    }

    #[test]
    fn test_event_type_json_matches_from_str() {
        for label in ["Inflation", " Inflation", "Interest Rate ", "Deflation", ""] {
            let json = serde_json::to_string(label).unwrap();
            let from_json = serde_json::from_str::<EventType>(&json).ok();
            assert_eq!(from_json, label.parse::<EventType>().ok(), "label {:?}", label);
        }

        let padded: EventType = serde_json::from_str("\" Interest Rate\"").unwrap();
        assert_eq!(padded, EventType::InterestRate);
    }

    #[test]
    fn test_lookup_by_event_type() {
        let data = sample_data();

        let (event, income) = data.lookup("AAA", EventType::Inflation).unwrap();
        assert_eq!(event.numeric("Latest Close Price"), Some(100.0));
        assert_eq!(income.numeric("Latest Event Value"), Some(2.0));

        assert!(data.lookup("", EventType::Inflation).is_err());

        // Symbols are scoped to their event category
        assert!(data.lookup("AAA", EventType::InterestRate).is_err());
        assert!(data.lookup("CCC", EventType::InterestRate).is_ok());
    }

    #[test]
    fn test_missing_income_row_is_not_found() {
        let data = sample_data();

        let err = data.lookup("BBB", EventType::Inflation).unwrap_err();
        assert_eq!(
            err,
            EngineError::SymbolNotFound {
                symbol: "BBB".to_string(),
                event_type: EventType::Inflation,
            }
        );
        assert_eq!(err.to_string(), "Stock symbol not found");
    }

    #[test]
    fn test_symbols_require_both_rows() {
        let data = sample_data();
        assert_eq!(data.symbols(EventType::Inflation), vec!["AAA"]);
        assert_eq!(data.symbols(EventType::InterestRate), vec!["CCC"]);
    }
}
