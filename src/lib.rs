//! Thin typed façade over [`umya_spreadsheet`] for writing, styling, saving
//! and reading back `.xlsx` workbooks.
//!
//! The central type is [`Workbook`]: create or open a document, pick a sheet,
//! write typed cell values (optionally styled), then read them back as
//! [`Value`]s with formula results and date-formatted numerics resolved to
//! their semantic kinds.

pub mod error;
pub mod style;
pub mod value;
pub mod workbook;

pub use error::{Error, Result};
pub use style::CellStyle;
pub use value::{CellKind, Value};
pub use workbook::{Row, Workbook};
