use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use umya_spreadsheet::{Cell, NumberingFormat, Spreadsheet, Worksheet, reader, writer};

use crate::error::{Error, Result};
use crate::style::CellStyle;
use crate::value::{self, CellKind, Value};

/// Handle to a row position in the active sheet.
///
/// Carries the 0-based row index and the populated column span (last
/// populated column index + 1). Obtaining a handle never materializes
/// storage; rows come into being when a write targets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    index: u32,
    cell_count: u32,
}

impl Row {
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Exclusive upper bound of the row's column span
    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }
}

/// Façade over a spreadsheet document: creates or opens a workbook, selects
/// sheets, writes typed cell values with optional styling, and reads values
/// back with kind resolution.
///
/// Rows and columns are addressed 0-based; the underlying engine's 1-based
/// coordinates never leak through the API. All operations run on the calling
/// thread; the only file I/O happens inside [`Workbook::open`] and
/// [`Workbook::save`].
pub struct Workbook {
    book: Spreadsheet,
    path: PathBuf,
    active: Option<usize>,
}

impl Workbook {
    /// New empty workbook bound to `path`. No file I/O happens until
    /// [`Workbook::save`].
    pub fn create<P: AsRef<Path>>(path: P) -> Self {
        Workbook {
            book: umya_spreadsheet::new_file_empty_worksheet(),
            path: path.as_ref().to_path_buf(),
            active: None,
        }
    }

    /// Load a workbook from an existing file. The first sheet, when present,
    /// becomes the active one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let book = reader::xlsx::read(&path).map_err(|e| Error::FileAccess {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let active = (book.get_sheet_count() > 0).then_some(0);
        Ok(Workbook { book, path, active })
    }

    /// Serialize to the bound path, overwriting any existing file.
    pub fn save(&self) -> Result<()> {
        writer::xlsx::write(&self.book, &self.path).map_err(|e| Error::FileAccess {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Add a sheet named `name` and make it active.
    pub fn create_sheet(&mut self, name: &str) -> Result<()> {
        self.book
            .new_sheet(name)
            .map_err(|_| Error::DuplicateSheet(name.to_string()))?;
        self.active = Some(self.book.get_sheet_count() - 1);
        Ok(())
    }

    /// Make the sheet at `index` active.
    pub fn select_sheet(&mut self, index: usize) -> Result<()> {
        let count = self.book.get_sheet_count();
        if index >= count {
            return Err(Error::SheetOutOfBounds { index, count });
        }
        self.active = Some(index);
        Ok(())
    }

    pub fn sheet_count(&self) -> usize {
        self.book.get_sheet_count()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|s| s.get_name().to_string())
            .collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Row handle at `index`, valid whether or not the row is occupied yet.
    pub fn create_row(&mut self, index: u32) -> Result<Row> {
        if self.active.is_none() {
            return Err(Error::NoSheetSelected);
        }
        Ok(self
            .get_row(index)
            .unwrap_or(Row {
                index,
                cell_count: 0,
            }))
    }

    /// Handle to the existing row at `index`, or `None` when it holds no
    /// cells. Never creates anything.
    pub fn get_row(&self, index: u32) -> Option<Row> {
        let sheet = self.active_sheet()?;
        let cell_count = row_cell_count(sheet, index)?;
        Some(Row { index, cell_count })
    }

    /// Write `text` at `(row, col)`, creating the row and cell as needed and
    /// overwriting any previous value. A given style replaces the cell's
    /// existing one.
    pub fn set_text(
        &mut self,
        row: u32,
        col: u32,
        text: &str,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        self.write_cell(row, col, style, |cell| {
            cell.set_value_string(text);
        })
    }

    /// [`Workbook::set_text`] through an already-obtained row handle.
    pub fn set_text_in_row(
        &mut self,
        row: &Row,
        col: u32,
        text: &str,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        self.set_text(row.index, col, text, style)
    }

    pub fn set_number(
        &mut self,
        row: u32,
        col: u32,
        number: f64,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        self.write_cell(row, col, style, |cell| {
            cell.set_value_number(number);
        })
    }

    pub fn set_bool(
        &mut self,
        row: u32,
        col: u32,
        flag: bool,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        self.write_cell(row, col, style, |cell| {
            cell.set_value_bool(flag);
        })
    }

    /// Write a date as a date-formatted numeric cell, so it resolves back as
    /// [`Value::DateTime`] rather than a raw serial.
    pub fn set_date(
        &mut self,
        row: u32,
        col: u32,
        date: NaiveDateTime,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        let serial = value::serial_from_datetime(&date);
        self.write_cell(row, col, style, |cell| {
            cell.set_value_number(serial);
        })?;
        // The date tag lives in the number format; set it after any style
        // replacement so the style cannot clobber it.
        let sheet = self.active_sheet_mut()?;
        sheet
            .get_cell_mut(engine_coord(row, col))
            .get_style_mut()
            .get_number_format_mut()
            .set_format_code(NumberingFormat::FORMAT_DATE_YYYYMMDD2);
        Ok(())
    }

    /// Write a formula (leading `=` optional) with no cached result; it
    /// resolves as blank until a calculating application fills one in.
    pub fn set_formula(
        &mut self,
        row: u32,
        col: u32,
        formula: &str,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        self.write_cell(row, col, style, |cell| {
            cell.set_formula(formula);
        })
    }

    /// Write a formula along with a cached result, as a reader of an
    /// already-calculated file would observe it.
    pub fn set_formula_with_result(
        &mut self,
        row: u32,
        col: u32,
        formula: &str,
        result: &str,
        style: Option<&CellStyle>,
    ) -> Result<()> {
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        self.write_cell(row, col, style, |cell| {
            cell.set_formula(formula);
            cell.set_formula_result_default(result);
        })
    }

    /// Resolved value at `(row, col)`, or `None` when the row or cell does
    /// not exist. Formula cells resolve to their cached result's kind,
    /// date-formatted numerics to [`Value::DateTime`], blanks to empty text.
    pub fn get_value(&self, row: u32, col: u32) -> Option<Value> {
        let cell = self.active_sheet()?.get_cell(engine_coord(row, col))?;
        value::resolve(cell, CellKind::Unknown)
    }

    /// Kind tag of the cell at `(row, col)`, or `None` when absent.
    pub fn cell_kind(&self, row: u32, col: u32) -> Option<CellKind> {
        let cell = self.active_sheet()?.get_cell(engine_coord(row, col))?;
        Some(value::kind_of(cell))
    }

    /// Lazy walk over the active sheet from row 0 through the last occupied
    /// row index, inclusive. Unoccupied positions yield `None` so gaps are
    /// preserved. Each call produces a fresh iterator; an empty sheet yields
    /// nothing.
    pub fn rows(&self) -> impl Iterator<Item = Option<Row>> + '_ {
        let end = self
            .active_sheet()
            .and_then(last_occupied_row)
            .map_or(0, |last| last + 1);
        (0..end).map(move |index| self.get_row(index))
    }

    /// Lazy walk over a row's column span from 0 up to its populated width.
    /// Absent cells yield `None`; blank cells resolve to empty text.
    pub fn cells<'a>(&'a self, row: &Row) -> impl Iterator<Item = Option<Value>> + 'a {
        let index = row.index;
        (0..row.cell_count).map(move |col| self.get_value(index, col))
    }

    fn active_sheet(&self) -> Option<&Worksheet> {
        self.book.get_sheet(&self.active?)
    }

    fn active_sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let index = self.active.ok_or(Error::NoSheetSelected)?;
        self.book.get_sheet_mut(&index).ok_or(Error::NoSheetSelected)
    }

    fn write_cell<F>(&mut self, row: u32, col: u32, style: Option<&CellStyle>, write: F) -> Result<()>
    where
        F: FnOnce(&mut Cell),
    {
        let sheet = self.active_sheet_mut()?;
        let cell = sheet.get_cell_mut(engine_coord(row, col));
        write(&mut *cell);
        if let Some(style) = style {
            cell.set_style(style.to_engine());
        }
        Ok(())
    }
}

/// 0-based `(row, col)` to the engine's 1-based `(col, row)` coordinates.
fn engine_coord(row: u32, col: u32) -> (u32, u32) {
    (col + 1, row + 1)
}

fn last_occupied_row(sheet: &Worksheet) -> Option<u32> {
    match sheet.get_highest_row() {
        0 => None,
        highest => Some(highest - 1),
    }
}

/// Populated width of a row, or `None` when the row holds no cells.
fn row_cell_count(sheet: &Worksheet, row: u32) -> Option<u32> {
    let engine_row = row + 1;
    let mut width = None;
    for cell in sheet.get_cell_collection() {
        let coord = cell.get_coordinate();
        if *coord.get_row_num() == engine_row {
            // Engine columns are 1-based, so the highest column number is
            // exactly the exclusive 0-based span.
            let col = *coord.get_col_num();
            width = Some(width.map_or(col, |w: u32| w.max(col)));
        }
    }
    width
}
