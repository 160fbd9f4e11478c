//! CSV-based table loader
//!
//! Loads the event-sensitivity and income-statement correlation tables
//! exported from the analysis workbooks.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;
use log::{debug, info};

use super::row::FieldRow;
use crate::error::TableError;

/// Identity column of the event-sensitivity tables
pub const EVENT_IDENTITY_COLUMN: &str = "Symbol";

/// Identity column of the income-statement tables
pub const INCOME_IDENTITY_COLUMN: &str = "Stock Name";

/// A loaded table with an index from identity value to row
#[derive(Debug, Clone)]
pub struct DataTable {
    identity_column: String,
    rows: Vec<FieldRow>,
    /// First row index for each identity value
    index: HashMap<String, usize>,
}

impl DataTable {
    /// Build a table from already-parsed rows
    ///
    /// When an identity value repeats, lookups resolve to its first row.
    /// Rows with a blank identity cell are kept but never indexed.
    pub fn from_rows(identity_column: &str, rows: Vec<FieldRow>) -> Result<Self, TableError> {
        if let Some(first) = rows.first() {
            if !first.contains(identity_column) {
                return Err(TableError::MissingIdentityColumn(identity_column.to_string()));
            }
        }

        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match row.get(identity_column).map(str::trim) {
                Some(key) if !key.is_empty() => {
                    index.entry(key.to_string()).or_insert(i);
                }
                _ => debug!("Row {} has no {}, not indexed", i + 1, identity_column),
            }
        }

        Ok(Self {
            identity_column: identity_column.to_string(),
            rows,
            index,
        })
    }

    /// Load a table from any reader (e.g., string buffer, network stream)
    pub fn from_reader<R: Read>(reader: R, identity_column: &str) -> Result<Self, TableError> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let header: Arc<[String]> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>()
            .into();

        if !header.iter().any(|h| h == identity_column) {
            return Err(TableError::MissingIdentityColumn(identity_column.to_string()));
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let values = record.iter().map(str::to_string).collect();
            rows.push(FieldRow::new(Arc::clone(&header), values));
        }

        Self::from_rows(identity_column, rows)
    }

    /// Load a table from a CSV file
    pub fn load<P: AsRef<Path>>(path: P, identity_column: &str) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_reader(file, identity_column)?;
        info!(
            "Loaded {} rows ({} distinct) from {}",
            table.rows.len(),
            table.index.len(),
            path.display()
        );
        Ok(table)
    }

    /// Row for an identity value
    pub fn find(&self, key: &str) -> Option<&FieldRow> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let found = self.index.get(key).map(|&i| &self.rows[i]);
        if found.is_none() {
            debug!("No row with {} = '{}'", self.identity_column, key);
        }
        found
    }

    /// Identity values in first-seen row order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(i, row)| {
                let key = row.get(&self.identity_column)?.trim();
                (self.index.get(key) == Some(&i)).then_some(key)
            })
    }

    pub fn identity_column(&self) -> &str {
        &self.identity_column
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
