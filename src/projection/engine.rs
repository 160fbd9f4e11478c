//! Core projection engine for event-driven stock and income projections

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::record::{ProjectionRecord, STOCK_PRICE_PARAMETER};
use crate::error::EngineError;
use crate::tables::{coerce_numeric, EventRow, EventType, IncomeRow, INCOME_IDENTITY_COLUMN};

/// Event row column holding the latest closing price
pub const CLOSE_PRICE_FIELD: &str = "Latest Close Price";

/// Event row column holding the price sensitivity to the event metric
pub const EVENT_COEFFICIENT_FIELD: &str = "Event Coefficient";

/// Income row column holding the baseline value of the event metric
pub const BASELINE_FIELD: &str = "Latest Event Value";

/// Line items from the June 2024 statements, always re-projected after the
/// generic pass even when that pass already emitted them
pub const JUNE_2024_FIELDS: [&str; 10] = [
    "June 2024 Total Revenue/Income",
    "June 2024 Total Operating Expense",
    "June 2024 Operating Income/Profit",
    "June 2024 EBITDA",
    "June 2024 EBIT",
    "June 2024 Income/Profit Before Tax",
    "June 2024 Net Income From Continuing Operation",
    "June 2024 Net Income",
    "June 2024 Net Income Applicable to Common Share",
    "June 2024 EPS (Earning Per Share)",
];

/// Arithmetic used to project values
///
/// Parsed leniently: `"Dynamic"` selects [`ProjectionMethod::Dynamic`] and
/// every other string falls back to [`ProjectionMethod::Simple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectionMethod {
    /// Uses the event coefficient, correlation factors and the delta
    /// between expected rate and baseline
    Dynamic,
    /// Applies the expected rate directly as a percentage change
    #[default]
    Simple,
}

impl ProjectionMethod {
    pub fn label(self) -> &'static str {
        match self {
            ProjectionMethod::Dynamic => "Dynamic",
            ProjectionMethod::Simple => "Simple",
        }
    }
}

impl From<&str> for ProjectionMethod {
    fn from(s: &str) -> Self {
        match s {
            "Dynamic" => ProjectionMethod::Dynamic,
            _ => ProjectionMethod::Simple,
        }
    }
}

impl From<String> for ProjectionMethod {
    fn from(s: String) -> Self {
        ProjectionMethod::from(s.as_str())
    }
}

impl From<ProjectionMethod> for String {
    fn from(method: ProjectionMethod) -> Self {
        method.label().to_string()
    }
}

/// Inputs shared by every record of one projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Expected event rate, in percent
    pub expected_rate: f64,

    /// Event category the rows were resolved under
    pub event_type: EventType,

    pub method: ProjectionMethod,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            expected_rate: 0.0,
            event_type: EventType::Inflation,
            method: ProjectionMethod::Simple,
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the stock price and every numeric income line item
    ///
    /// Fails only when the event row has no usable close price.
    pub fn project(
        &self,
        event_row: &EventRow,
        income_row: &IncomeRow,
    ) -> Result<Vec<ProjectionRecord>, EngineError> {
        let baseline = income_row.numeric(BASELINE_FIELD).unwrap_or(0.0);

        let mut records = Vec::with_capacity(income_row.len() + JUNE_2024_FIELDS.len() + 1);
        records.push(self.project_stock_price(event_row, baseline)?);
        self.project_income_fields(event_row, income_row, baseline, &mut records);
        self.project_june_2024_fields(income_row, baseline, &mut records);

        debug!(
            "{} {} projection at {}%: {} records",
            self.config.event_type,
            self.config.method.label(),
            self.config.expected_rate,
            records.len()
        );
        Ok(records)
    }

    fn project_stock_price(&self, event_row: &EventRow, baseline: f64) -> Result<ProjectionRecord, EngineError> {
        let close = event_row
            .numeric(CLOSE_PRICE_FIELD)
            .ok_or(EngineError::StockPriceUnavailable)?;
        let rate = self.config.expected_rate;

        let (projected, change) = match self.config.method {
            ProjectionMethod::Dynamic => {
                let coefficient = event_row.numeric(EVENT_COEFFICIENT_FIELD).unwrap_or_else(|| {
                    warn!("No numeric {}, projecting stock price flat", EVENT_COEFFICIENT_FIELD);
                    0.0
                });
                let price_change = coefficient * (rate - baseline);
                (close + price_change, price_change)
            }
            ProjectionMethod::Simple => {
                let price_change = close * (rate / 100.0);
                (close + price_change, rate)
            }
        };

        if !projected.is_finite() || !change.is_finite() {
            warn!("Projected stock price overflowed from close {}", close);
        }
        Ok(ProjectionRecord::new(STOCK_PRICE_PARAMETER, close, projected, change))
    }

    fn project_income_fields(
        &self,
        event_row: &EventRow,
        income_row: &IncomeRow,
        baseline: f64,
        records: &mut Vec<ProjectionRecord>,
    ) {
        let rate = self.config.expected_rate;

        for (field, raw) in income_row.fields() {
            if field == INCOME_IDENTITY_COLUMN {
                continue;
            }
            let Some(current) = coerce_numeric(raw) else {
                debug!("Skipping non-numeric income field '{}'", field);
                continue;
            };

            let record = match self.config.method {
                ProjectionMethod::Dynamic => {
                    let projected = match event_row.numeric(field) {
                        Some(correlation) => current + current * correlation * (rate - baseline) / 100.0,
                        None => current * (1.0 + (rate - baseline) / 100.0),
                    };
                    ProjectionRecord::new(field, current, projected, projected - current)
                }
                ProjectionMethod::Simple => {
                    ProjectionRecord::new(field, current, current * (1.0 + rate / 100.0), rate)
                }
            };
            push_finite(records, record);
        }
    }

    fn project_june_2024_fields(&self, income_row: &IncomeRow, baseline: f64, records: &mut Vec<ProjectionRecord>) {
        let rate = self.config.expected_rate;

        for field in JUNE_2024_FIELDS {
            let Some(current) = income_row.numeric(field) else {
                continue;
            };
            let projected = match self.config.method {
                ProjectionMethod::Dynamic => current * (1.0 + (rate - baseline) / 100.0),
                ProjectionMethod::Simple => current * (1.0 + rate / 100.0),
            };
            push_finite(records, ProjectionRecord::new(field, current, projected, rate));
        }
    }
}

/// Income records whose projection overflowed are dropped
fn push_finite(records: &mut Vec<ProjectionRecord>, record: ProjectionRecord) {
    if record.projected_value.is_finite() && record.change.is_finite() {
        records.push(record);
    } else {
        warn!(
            "Dropping '{}': projection of {} is not finite",
            record.parameter, record.current_value
        );
    }
}

/// Project a single event/income row pair
pub fn compute_projections(
    event_row: &EventRow,
    income_row: &IncomeRow,
    expected_rate: f64,
    event_type: EventType,
    method: ProjectionMethod,
) -> Result<Vec<ProjectionRecord>, EngineError> {
    let engine = ProjectionEngine::new(ProjectionConfig {
        expected_rate,
        event_type,
        method,
    });
    engine.project(event_row, income_row)
}
