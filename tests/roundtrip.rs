use chrono::NaiveDate;
use umya_spreadsheet::Border;

use xlsx_book::{CellStyle, Error, Value, Workbook};

fn temp_book_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("book.xlsx")
}

#[test]
fn test_text_survives_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_text(1, 1, "Item 1", None).unwrap();
    book.save().unwrap();

    let book = Workbook::open(&path).unwrap();
    assert_eq!(book.get_value(1, 1), Some(Value::Text("Item 1".into())));
}

#[test]
fn test_typed_cells_keep_their_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);
    let restocked = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_number(0, 0, 120.5, None).unwrap();
    book.set_bool(0, 1, true, None).unwrap();
    book.set_date(0, 2, restocked, None).unwrap();
    book.set_formula_with_result(0, 3, "=6*7", "42", None).unwrap();
    book.save().unwrap();

    let book = Workbook::open(&path).unwrap();
    assert_eq!(book.get_value(0, 0), Some(Value::Number(120.5)));
    assert_eq!(book.get_value(0, 1), Some(Value::Bool(true)));
    assert_eq!(book.get_value(0, 2), Some(Value::DateTime(restocked)));
    assert_eq!(book.get_value(0, 3), Some(Value::Number(42.0)));
}

#[test]
fn test_row_gaps_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_text(1, 0, "one", None).unwrap();
    book.set_text(3, 0, "three", None).unwrap();
    book.save().unwrap();

    let book = Workbook::open(&path).unwrap();
    let rows: Vec<_> = book.rows().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].is_none());
    assert!(rows[1].is_some());
    assert!(rows[2].is_none());
    assert!(rows[3].is_some());
}

#[test]
fn test_sheets_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);

    let mut book = Workbook::create(&path);
    book.create_sheet("first").unwrap();
    book.set_text(0, 0, "a", None).unwrap();
    book.create_sheet("second").unwrap();
    book.set_text(0, 0, "b", None).unwrap();
    book.save().unwrap();

    let mut book = Workbook::open(&path).unwrap();
    assert_eq!(book.sheet_count(), 2);
    assert_eq!(book.sheet_names(), vec!["first", "second"]);
    // Opening activates the first sheet.
    assert_eq!(book.get_value(0, 0), Some(Value::Text("a".into())));
    book.select_sheet(1).unwrap();
    assert_eq!(book.get_value(0, 0), Some(Value::Text("b".into())));
}

#[test]
fn test_accent_style_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_text(0, 0, "Header", Some(&CellStyle::accent())).unwrap();
    book.save().unwrap();

    // Inspect the written formatting through the engine directly.
    let raw = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let sheet = raw.get_sheet(&0).unwrap();
    let style = sheet.get_cell((1, 1)).unwrap().get_style();

    let fill_argb = style
        .get_fill()
        .unwrap()
        .get_pattern_fill()
        .unwrap()
        .get_foreground_color()
        .unwrap()
        .get_argb()
        .to_string();
    assert!(fill_argb.eq_ignore_ascii_case("FF4169E1"), "fill was {fill_argb}");

    let borders = style.get_borders().unwrap();
    for border in [
        borders.get_top(),
        borders.get_bottom(),
        borders.get_left(),
        borders.get_right(),
    ] {
        assert_eq!(border.get_border_style(), Border::BORDER_THIN);
    }

    let font = style.get_font().unwrap();
    assert_eq!(*font.get_size(), 14.0);
    assert!(font.get_color().get_argb().eq_ignore_ascii_case("FFFFFFFF"));

    // And the styled cell still reads back as its text value.
    let book = Workbook::open(&path).unwrap();
    assert_eq!(book.get_value(0, 0), Some(Value::Text("Header".into())));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.xlsx");

    match Workbook::open(&path) {
        Err(Error::FileAccess { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected FileAccess, got {:?}", other.err()),
    }
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_book_path(&dir);

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_text(0, 0, "old", None).unwrap();
    book.save().unwrap();

    let mut book = Workbook::create(&path);
    book.create_sheet("data").unwrap();
    book.set_text(0, 0, "new", None).unwrap();
    book.save().unwrap();

    let book = Workbook::open(&path).unwrap();
    assert_eq!(book.get_value(0, 0), Some(Value::Text("new".into())));
}
