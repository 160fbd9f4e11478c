//! Stock analysis service
//!
//! Resolves a request to its table rows, runs the projection and
//! interpretation engines, and routes the small JSON HTTP surface used by
//! the Lambda handler.

use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{EngineError, TableError};
use crate::interpretation::{interpret, InterpretationMap};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionMethod, ProjectionRecord};
use crate::tables::{EventType, MarketData, TableConfig};

/// Greeting returned from the root path
pub const WELCOME_MESSAGE: &str = "Welcome to the Stock Analysis API! Use the /stock-details endpoint.";

/// Body of a `POST /stock-details/` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRequest {
    pub stock_symbol: String,
    pub event_type: EventType,
    /// Expected event rate, in percent
    pub expected_rate: f64,
    /// Any string; only `"Dynamic"` selects the dynamic method
    pub method: ProjectionMethod,
}

/// Projections and interpretation for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetails {
    pub stock_symbol: String,
    pub event_type: EventType,
    pub projections: Vec<ProjectionRecord>,
    pub interpretation: InterpretationMap,
}

/// Headers sent with every reply: JSON content and permissive CORS
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "*"),
    ("Access-Control-Allow-Headers", "*"),
];

/// Status code and JSON body of a routed request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    /// `None` for bodiless replies such as CORS preflight
    pub body: Option<Value>,
}

impl HttpReply {
    fn json(status: u16, body: Value) -> Self {
        Self { status, body: Some(body) }
    }

    fn detail(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "detail": message.into() }))
    }

    fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        &RESPONSE_HEADERS
    }

    /// Serialized body, empty for bodiless replies
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

/// Request handler over a shared, read-only set of tables
#[derive(Debug, Clone)]
pub struct StockAnalysisService {
    data: Arc<MarketData>,
}

impl StockAnalysisService {
    pub fn new(data: Arc<MarketData>) -> Self {
        Self { data }
    }

    /// Load tables from the given configuration
    pub fn from_config(config: &TableConfig) -> Result<Self, TableError> {
        Ok(Self::new(Arc::new(MarketData::load(config)?)))
    }

    pub fn data(&self) -> &MarketData {
        &self.data
    }

    /// Project and interpret one symbol
    pub fn stock_details(&self, request: &StockRequest) -> Result<StockDetails, EngineError> {
        let (event_row, income_row) = self.data.lookup(&request.stock_symbol, request.event_type)?;

        let engine = ProjectionEngine::new(ProjectionConfig {
            expected_rate: request.expected_rate,
            event_type: request.event_type,
            method: request.method,
        });
        let projections = engine.project(event_row, income_row)?;
        let interpretation = interpret(event_row, income_row, request.event_type);

        Ok(StockDetails {
            stock_symbol: request.stock_symbol.clone(),
            event_type: request.event_type,
            projections,
            interpretation,
        })
    }

    /// Route an HTTP request to its handler
    pub fn handle(&self, method: &str, path: &str, body: &str) -> HttpReply {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return HttpReply::empty(200);
        }

        match (method.to_ascii_uppercase().as_str(), normalize_path(path)) {
            ("GET", "/") => HttpReply::json(200, json!({ "message": WELCOME_MESSAGE })),
            ("POST", "/stock-details") => self.handle_stock_details(body),
            (_, "/") | (_, "/stock-details") => HttpReply::detail(405, "Method Not Allowed"),
            _ => HttpReply::detail(404, "Not Found"),
        }
    }

    fn handle_stock_details(&self, body: &str) -> HttpReply {
        let request: StockRequest = match serde_json::from_str(body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejecting malformed stock details request: {}", e);
                return HttpReply::detail(422, format!("Invalid request: {}", e));
            }
        };

        info!(
            "Stock details for {} ({}, {} at {}%)",
            request.stock_symbol,
            request.event_type,
            request.method.label(),
            request.expected_rate
        );

        match self.stock_details(&request) {
            Ok(details) => match serde_json::to_value(&details) {
                Ok(body) => HttpReply::json(200, body),
                Err(e) => HttpReply::detail(500, format!("Failed to encode response: {}", e)),
            },
            Err(e) => {
                warn!("Stock details for {} failed: {}", request.stock_symbol, e);
                HttpReply::detail(404, e.to_string())
            }
        }
    }
}

/// Treat `/stock-details` and `/stock-details/` alike
fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
