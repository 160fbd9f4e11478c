//! Stock Event Projection - event-driven projections for stocks and income statements
//!
//! This library provides:
//! - Read-only lookup tables of event sensitivities and income-statement correlations
//! - Dynamic and Simple projections of stock price and income line items
//! - Rule-based interpretation of event sensitivity and operating margin
//! - A request handler merging both into one response

pub mod error;
pub mod interpretation;
pub mod projection;
pub mod service;
pub mod tables;

// Re-export commonly used types
pub use error::{EngineError, TableError};
pub use interpretation::{interpret, InterpretationMap};
pub use projection::{compute_projections, ProjectionEngine, ProjectionMethod, ProjectionRecord};
pub use service::{StockAnalysisService, StockDetails, StockRequest};
pub use tables::{EventRow, EventType, IncomeRow, MarketData, TableConfig};
