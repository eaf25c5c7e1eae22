use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use umya_spreadsheet::{Cell, NumberingFormat};

/// Tag determining how a cell's stored content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Boolean,
    Numeric,
    Formula,
    Blank,
    Unknown,
}

/// A resolved cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bool(bool),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(true) => Some(1.0),
            Value::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a date-time
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Number(n) => write!(f, "{}", n),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Cached error literals never resolve to a value.
const ERROR_LITERALS: &[&str] = &[
    "#NULL!", "#DIV/0!", "#VALUE!", "#REF!", "#NAME?", "#NUM!", "#N/A",
];

/// Resolve a cell to its value under `declared`, falling back to the cell's
/// own kind when `declared` is [`CellKind::Unknown`].
///
/// Formula cells re-enter with the kind of their cached result, so a formula
/// whose last computed result was numeric resolves to that number, never to
/// the formula text. Blank cells resolve to empty text. Unrecognized content
/// resolves to `None` so enumeration stays robust against unexpected
/// documents.
pub(crate) fn resolve(cell: &Cell, declared: CellKind) -> Option<Value> {
    let kind = if declared == CellKind::Unknown {
        kind_of(cell)
    } else {
        declared
    };
    let raw = cell.get_value().to_string();
    match kind {
        CellKind::Text => Some(Value::Text(raw)),
        CellKind::Boolean => Some(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        CellKind::Numeric => {
            let number: f64 = raw.parse().ok()?;
            if is_date_formatted(cell) {
                Some(Value::DateTime(datetime_from_serial(number)?))
            } else {
                Some(Value::Number(number))
            }
        }
        // Cached results classify as literals, never as formulas again.
        CellKind::Formula => resolve(cell, classify_literal(&raw)),
        CellKind::Blank => Some(Value::Text(String::new())),
        CellKind::Unknown => None,
    }
}

/// Kind tag for a cell: the formula flag wins, otherwise the canonical
/// rendering of the stored value decides.
pub(crate) fn kind_of(cell: &Cell) -> CellKind {
    if cell.is_formula() {
        return CellKind::Formula;
    }
    classify_literal(&cell.get_value().to_string())
}

fn classify_literal(raw: &str) -> CellKind {
    if raw.is_empty() {
        CellKind::Blank
    } else if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false") {
        CellKind::Boolean
    } else if ERROR_LITERALS.contains(&raw) {
        CellKind::Unknown
    } else if raw.parse::<f64>().is_ok_and(f64::is_finite) {
        CellKind::Numeric
    } else {
        CellKind::Text
    }
}

fn is_date_formatted(cell: &Cell) -> bool {
    cell.get_style()
        .get_number_format()
        .map(|nf| is_date_format(nf.get_format_code()))
        .unwrap_or(false)
}

/// Whether a number-format code marks its cell as a date/time.
///
/// Known limitation: a cell holding a date serial under a format this check
/// does not recognize reads back as a plain number.
pub(crate) fn is_date_format(format_code: &str) -> bool {
    if format_code == NumberingFormat::FORMAT_GENERAL
        || format_code == NumberingFormat::FORMAT_TEXT
    {
        return false;
    }
    let lower = format_code.to_lowercase();
    ["y", "m", "d", "h", "am", "pm"]
        .iter()
        .any(|marker| lower.contains(marker))
}

// Excel's 1900 date system: serial 1.0 is 1900-01-01, and serial 60 is the
// fictional 1900-02-29 carried over from Lotus 1-2-3.
const SERIAL_1900_LEAP: i64 = 60;

pub(crate) fn datetime_from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let adjusted = if days > SERIAL_1900_LEAP { days - 1 } else { days };
    let base = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
    let date = base.checked_add_signed(Duration::days(adjusted))?;
    let millis = (serial.fract() * 86_400_000.0).round() as i64;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

pub(crate) fn serial_from_datetime(value: &NaiveDateTime) -> f64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
    let days = (value.date() - base).num_days();
    let adjusted = if days >= SERIAL_1900_LEAP { days + 1 } else { days };
    let seconds = f64::from(value.time().num_seconds_from_midnight());
    adjusted as f64 + seconds / 86_400.0
}
