use std::io::BufRead;

use csv::StringRecord;
use thiserror::Error;

use crate::{FieldValue, RawValue, SummaryTable, TableError};

#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("csv input was empty")]
    EmptyInput,
    #[error("csv parse error at record {record}: {reason}")]
    Parse { record: u64, reason: String },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Imports a delimited text stream into a [`SummaryTable`].
///
/// Every cell keeps its original text as the formatted form; cells whose
/// whole trimmed text parses as a finite number additionally get a numeric
/// raw value, and blank cells become nulls. Missing header cells are named
/// `Column{n}`, and short rows pad with null cells.
pub fn import_csv_summary<R: BufRead>(
    reader: R,
    options: &CsvOptions,
) -> Result<SummaryTable, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers are handled manually so record positions stay consistent.
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = StringRecord::new();
    let mut record_index: u64 = 0;
    let mut header_names: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut column_count = 0usize;

    loop {
        record.clear();
        match csv_reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                record_index += 1;
                let cells: Vec<String> = record.iter().map(str::to_string).collect();
                column_count = column_count.max(cells.len());
                if options.has_header && record_index == 1 {
                    header_names = cells;
                } else {
                    rows.push(cells);
                }
            }
            Err(e) => return Err(map_csv_error(e, record_index + 1)),
        }
    }

    if record_index == 0 {
        return Err(CsvImportError::EmptyInput);
    }

    // An empty record still carries a single empty field.
    if column_count == 0 {
        column_count = 1;
    }

    if header_names.len() < column_count {
        header_names.extend((header_names.len()..column_count).map(|i| format!("Column{}", i + 1)));
    }

    let mut table = SummaryTable::new(header_names);
    for cells in rows {
        let mut row: Vec<FieldValue> = cells.into_iter().map(cell_value).collect();
        row.resize_with(column_count, FieldValue::null);
        table.push_row(row)?;
    }

    Ok(table)
}

fn cell_value(text: String) -> FieldValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return FieldValue::new(RawValue::Null, text);
    }
    match trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
        Some(number) => FieldValue::new(number, text),
        None => {
            let raw = RawValue::Text(text.clone());
            FieldValue::new(raw, text)
        }
    }
}

fn map_csv_error(err: csv::Error, fallback_record: u64) -> CsvImportError {
    let reason = err.to_string();
    let pos = err.position().cloned();

    match err.into_kind() {
        csv::ErrorKind::Io(e) => CsvImportError::Io(e),
        _ => {
            let record = pos
                .map(|p| p.record())
                .filter(|r| *r > 0)
                .unwrap_or(fallback_record);
            CsvImportError::Parse { record, reason }
        }
    }
}
