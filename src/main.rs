use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

use xlsx_book::{CellStyle, Workbook};

#[derive(Parser, Debug)]
#[command(author, version, about = "Write a sample XLSX workbook, then read it back", long_about = None)]
struct Args {
    /// Path to the XLSX file (overwritten if it exists)
    path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    write_sample(&args.path)?;
    dump(&args.path)?;

    Ok(())
}

fn write_sample(path: &Path) -> Result<()> {
    let mut book = Workbook::create(path);
    book.create_sheet("inventory")?;

    let header = CellStyle::accent();
    book.set_text(0, 0, "Item", Some(&header))?;
    book.set_text(0, 1, "Count", Some(&header))?;
    book.set_text(0, 2, "Restocked", Some(&header))?;

    let restocked = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    book.set_text(1, 0, "Bolt M6", None)?;
    book.set_number(1, 1, 120.0, None)?;
    book.set_date(1, 2, restocked, None)?;

    book.set_text(2, 0, "Washer M6", None)?;
    book.set_number(2, 1, 48.0, None)?;

    book.set_text(4, 0, "Total", None)?;
    book.set_formula_with_result(4, 1, "=B2+B3", "168", None)?;

    book.save()?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn dump(path: &Path) -> Result<()> {
    let book = Workbook::open(path)?;
    println!("Sheets: {}", book.sheet_names().join(", "));

    for (index, row) in book.rows().enumerate() {
        match row {
            Some(row) => {
                let cells: Vec<String> = book
                    .cells(&row)
                    .map(|value| match value {
                        Some(value) => value.to_string(),
                        None => "-".to_string(),
                    })
                    .collect();
                println!("{:>4}: {}", index, cells.join(" | "));
            }
            None => println!("{:>4}:", index),
        }
    }
    Ok(())
}
