use gridscope_sheet::{numeric, Book, CellValue, CsvOptions, Sheet, SheetError};
use tempfile::tempdir;

// ===== Data model =====

#[test]
fn test_sheet_from_data() {
    let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);

    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.col_count(), 3);
    assert_eq!(sheet.get(0, 0).unwrap(), &CellValue::Int(1));
    assert_eq!(sheet.get(1, 2).unwrap(), &CellValue::Int(6));
}

#[test]
fn test_normalization_roundtrip() {
    let sheet = Sheet::from_data(vec![
        vec![CellValue::from("h1"), CellValue::from("h2")],
        vec![CellValue::Int(1), CellValue::from("a")],
        vec![CellValue::Int(2), CellValue::from("b")],
    ]);

    assert_eq!(sheet.header_strings(), vec!["h1", "h2"]);
    let rows = sheet.data_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![CellValue::Int(1), CellValue::from("a")]);
    assert_eq!(rows[1], vec![CellValue::Int(2), CellValue::from("b")]);
}

#[test]
fn test_sheets_are_independent() {
    let mut book = Book::new();
    book.add_sheet("A", Sheet::from_data(vec![vec!["x", "y"]]))
        .unwrap();
    book.add_sheet("B", Sheet::new()).unwrap();

    assert_eq!(book.get_sheet("A").unwrap().col_count(), 2);
    assert_eq!(book.get_sheet("B").unwrap().col_count(), 0);
}

// ===== Numeric coercion =====

#[test]
fn test_numeric_truth_table() {
    for numeric_form in ["0", "-5.2", "1,234.5", "42"] {
        assert!(
            numeric::is_numeric(&CellValue::from(numeric_form)),
            "{numeric_form} should be numeric"
        );
    }
    for text_form in ["", "N/A", "12a", "--"] {
        assert!(
            !numeric::is_numeric(&CellValue::from(text_form)),
            "{text_form} should not be numeric"
        );
    }
    assert!(!numeric::is_numeric(&CellValue::Null));
}

// ===== File round-trips =====

#[test]
fn test_csv_to_book_to_xlsx() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("input.csv");
    let xlsx_path = dir.path().join("output.xlsx");

    let sheet = Sheet::from_data(vec![
        vec!["SYMBOL", "VALUE"],
        vec!["TCS", "1,000"],
        vec!["INFY", "2,500"],
    ]);
    sheet.save_as_csv(&csv_path).unwrap();

    let book = Book::from_path(&csv_path).unwrap();
    assert_eq!(book.sheet_names(), vec!["input"]);

    book.save_as_xlsx(&xlsx_path).unwrap();
    let reloaded = Book::from_path(&xlsx_path).unwrap();
    let sheet = reloaded.get_sheet("input").unwrap();
    assert_eq!(sheet.row_count(), 3);
    assert_eq!(
        sheet.get(1, 1).unwrap(),
        &CellValue::String("1,000".to_string())
    );
}

#[test]
fn test_tsv_dispatch() {
    let dir = tempdir().unwrap();
    let tsv_path = dir.path().join("input.tsv");
    std::fs::write(&tsv_path, "a\tb\n1\t2\n").unwrap();

    let book = Book::from_path(&tsv_path).unwrap();
    let sheet = book.first_sheet().unwrap();
    assert_eq!(sheet.col_count(), 2);
    assert_eq!(sheet.get(1, 0).unwrap(), &CellValue::Int(1));
}

#[test]
fn test_csv_without_inference() {
    let csv = "a,b\n1,2";
    let sheet =
        Sheet::from_csv_reader(csv.as_bytes(), CsvOptions::default().with_type_inference(false))
            .unwrap();
    assert_eq!(sheet.get(1, 0).unwrap(), &CellValue::String("1".to_string()));
}

#[test]
fn test_unsupported_extension() {
    let result = Book::from_path("report.pdf");
    assert!(matches!(
        result,
        Err(SheetError::UnsupportedExtension { .. })
    ));
}
