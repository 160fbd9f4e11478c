//! Projection output structures

use serde::{Deserialize, Serialize};

/// Parameter name of the mandatory stock price record
pub const STOCK_PRICE_PARAMETER: &str = "Projected Stock Price";

/// One projected parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    #[serde(rename = "Parameter")]
    pub parameter: String,
    #[serde(rename = "Current Value")]
    pub current_value: f64,
    #[serde(rename = "Projected Value")]
    pub projected_value: f64,
    /// Price or value delta under Dynamic; the expected rate under Simple
    #[serde(rename = "Change")]
    pub change: f64,
}

impl ProjectionRecord {
    pub fn new(parameter: impl Into<String>, current_value: f64, projected_value: f64, change: f64) -> Self {
        Self {
            parameter: parameter.into(),
            current_value,
            projected_value,
            change,
        }
    }

    pub fn is_stock_price(&self) -> bool {
        self.parameter == STOCK_PRICE_PARAMETER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let record = ProjectionRecord::new(STOCK_PRICE_PARAMETER, 100.0, 102.0, 2.0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["Parameter"], "Projected Stock Price");
        assert_eq!(json["Current Value"], 100.0);
        assert_eq!(json["Projected Value"], 102.0);
        assert_eq!(json["Change"], 2.0);
        assert!(record.is_stock_price());
    }
}
