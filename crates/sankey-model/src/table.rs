use std::collections::HashMap;

use thiserror::Error;

use crate::FieldValue;

/// Errors raised when assembling a [`SummaryTable`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("schema mismatch: expected {expected} values per row, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },
}

/// Tabular summary data as delivered by a host: named columns and rows of
/// raw + formatted cell values.
///
/// Rows are width-checked against the column list, so consumers may index
/// cells by a resolved column index without bounds anxiety.
#[derive(Clone, Debug, Default)]
pub struct SummaryTable {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<FieldValue>>,
}

impl SummaryTable {
    pub fn new(columns: Vec<impl Into<String>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            // Hosts resolve field names to the first matching column, so a
            // duplicated name keeps its first index.
            column_index.entry(name.clone()).or_insert(idx);
        }

        Self {
            columns,
            column_index,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<FieldValue>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::SchemaMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    /// Index of the first column named `field_name`, if any.
    pub fn column_idx(&self, field_name: &str) -> Option<usize> {
        self.column_index.get(field_name).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[FieldValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, field_name: &str) -> Option<&FieldValue> {
        let idx = self.column_idx(field_name)?;
        self.rows.get(row)?.get(idx)
    }
}
