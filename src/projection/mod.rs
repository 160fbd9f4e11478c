//! Projection engine for event-driven stock and income-statement projections

mod engine;
mod record;

pub use engine::{
    compute_projections, ProjectionConfig, ProjectionEngine, ProjectionMethod, BASELINE_FIELD,
    CLOSE_PRICE_FIELD, EVENT_COEFFICIENT_FIELD, JUNE_2024_FIELDS,
};
pub use record::{ProjectionRecord, STOCK_PRICE_PARAMETER};
