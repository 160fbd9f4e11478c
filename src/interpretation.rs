//! Rule-based interpretation of event sensitivity and operating margin

use std::collections::BTreeMap;

use crate::projection::EVENT_COEFFICIENT_FIELD;
use crate::tables::{EventRow, EventType, IncomeRow};

/// Income row column holding the average operating margin (as a fraction)
pub const OPERATING_MARGIN_FIELD: &str = "Average Operating Margin";

/// Interpretation key for the operating margin rule
pub const INCOME_STATEMENT_KEY: &str = "Income Statement";

/// Category key to assessment sentence; a missing key means no rule fired
pub type InterpretationMap = BTreeMap<String, String>;

const PRICE_DECREASE: &str = "Stock price decreases significantly. Increase portfolio risk.";
const HIGH_MARGIN: &str = "High Operating Margin: Indicates strong management effectiveness.";
const LOW_MARGIN: &str = "Low Operating Margin: Reflects risk in profitability.";

fn price_increase(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Inflation => "Stock price increases, benefiting from inflation.",
        EventType::InterestRate => "Stock price increases, benefiting from interest hikes.",
    }
}

/// Assess the event coefficient and average operating margin of a symbol
///
/// Coefficients within [-1, 1] and margins within [0.1, 0.2] are unremarkable
/// and produce no entry, as do missing or non-numeric fields.
pub fn interpret(event_row: &EventRow, income_row: &IncomeRow, event_type: EventType) -> InterpretationMap {
    let mut interpretation = InterpretationMap::new();

    if let Some(coefficient) = event_row.numeric(EVENT_COEFFICIENT_FIELD) {
        let sentence = if coefficient < -1.0 {
            Some(PRICE_DECREASE)
        } else if coefficient > 1.0 {
            Some(price_increase(event_type))
        } else {
            None
        };
        if let Some(sentence) = sentence {
            interpretation.insert(event_type.label().to_string(), sentence.to_string());
        }
    }

    if let Some(margin) = income_row.numeric(OPERATING_MARGIN_FIELD) {
        if margin > 0.2 {
            interpretation.insert(INCOME_STATEMENT_KEY.to_string(), HIGH_MARGIN.to_string());
        } else if margin < 0.1 {
            interpretation.insert(INCOME_STATEMENT_KEY.to_string(), LOW_MARGIN.to_string());
        }
    }

    interpretation
}
