use pretty_assertions::assert_eq;
use sankey_model::import::{import_csv_summary, CsvImportError, CsvOptions};
use sankey_model::{FieldValue, RawValue};

fn import(text: &str) -> sankey_model::SummaryTable {
    import_csv_summary(text.as_bytes(), &CsvOptions::default()).unwrap()
}

#[test]
fn imports_headers_and_infers_numbers() {
    let table = import("Source,Target,Amount\nA,B,10\nA,B,5\nC,A,3.5\n");

    assert_eq!(table.columns(), ["Source", "Target", "Amount"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.value(0, "Amount"),
        Some(&FieldValue::new(10.0, "10"))
    );
    assert_eq!(
        table.value(2, "Amount"),
        Some(&FieldValue::new(3.5, "3.5"))
    );
    assert_eq!(table.value(1, "Source"), Some(&FieldValue::text("A")));
}

#[test]
fn non_numeric_cells_stay_text_and_blanks_become_null() {
    let table = import("Source,Amount\nA,n/a\nB,\n");

    assert_eq!(
        table.value(0, "Amount"),
        Some(&FieldValue::text("n/a"))
    );
    assert_eq!(
        table.value(1, "Amount"),
        Some(&FieldValue::new(RawValue::Null, ""))
    );
}

#[test]
fn short_rows_pad_with_nulls_and_headers_extend() {
    // The widest record decides the column count; the missing header
    // positions get synthesized names.
    let table = import("Source,Target\nA,B,7\nC\n");

    assert_eq!(table.columns(), ["Source", "Target", "Column3"]);
    assert_eq!(table.value(0, "Column3"), Some(&FieldValue::new(7.0, "7")));
    assert_eq!(table.value(1, "Target"), Some(&FieldValue::null()));
}

#[test]
fn headerless_import_names_every_column() {
    let options = CsvOptions {
        delimiter: b';',
        has_header: false,
    };
    let table = import_csv_summary("A;B;2".as_bytes(), &options).unwrap();

    assert_eq!(table.columns(), ["Column1", "Column2", "Column3"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.value(0, "Column3"), Some(&FieldValue::new(2.0, "2")));
}

#[test]
fn empty_input_is_an_error() {
    let err = import_csv_summary("".as_bytes(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, CsvImportError::EmptyInput));
}
