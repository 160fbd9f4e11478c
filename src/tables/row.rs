//! Single rows of the source tables

use std::sync::Arc;

/// One row of a source table: raw cells keyed by the shared table header
///
/// Cells keep their original text. Numeric interpretation happens on read
/// through [`FieldRow::numeric`], so a malformed cell only affects the
/// consumers that ask for it as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    header: Arc<[String]>,
    values: Vec<String>,
}

/// Row of an event-sensitivity table, identified by `Symbol`
pub type EventRow = FieldRow;

/// Row of an income-statement correlation table, identified by `Stock Name`
pub type IncomeRow = FieldRow;

impl FieldRow {
    /// Build a row from a shared header and its cells
    ///
    /// Missing trailing cells read as empty; surplus cells are dropped.
    pub fn new(header: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self { header, values }
    }

    /// Build a standalone row from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (header, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self {
            header: header.into(),
            values,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Whether the row has a column with this name, regardless of content
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Raw cell text for a column
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.values[i].as_str())
    }

    /// Cell coerced to a number, `None` when absent or not numeric
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(coerce_numeric)
    }

    /// Columns and raw cells in header order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Coerce a raw cell to a number
///
/// Empty cells, text, and NaN literals all fail coercion.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("42"), Some(42.0));
        assert_eq!(coerce_numeric(" -1.5 "), Some(-1.5));
        assert_eq!(coerce_numeric("1e3"), Some(1000.0));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("n/a"), None);
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("1,234"), None);
    }

    #[test]
    fn test_fields_keep_header_order() {
        let row = FieldRow::from_pairs([
            ("Stock Name", "ACME"),
            ("Revenue", "100"),
            ("EBITDA", "20"),
        ]);

        let names: Vec<&str> = row.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Stock Name", "Revenue", "EBITDA"]);
    }

    #[test]
    fn test_present_but_non_numeric() {
        let row = FieldRow::from_pairs([("Sector", "Tech"), ("Blank", "")]);

        assert!(row.contains("Sector"));
        assert_eq!(row.get("Sector"), Some("Tech"));
        assert_eq!(row.numeric("Sector"), None);
        assert!(row.contains("Blank"));
        assert_eq!(row.numeric("Blank"), None);
        assert!(!row.contains("Missing"));
    }

    #[test]
    fn test_short_record_padded() {
        let header: Arc<[String]> = vec!["A".to_string(), "B".to_string()].into();
        let row = FieldRow::new(header, vec!["1".to_string()]);

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("B"), Some(""));
    }
}
