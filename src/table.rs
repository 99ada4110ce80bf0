//! Workbook loading.
//!
//! Decodes an `.xlsx`/`.xls` workbook (via calamine) or a single-sheet `.csv`
//! export into plain string tables. Everything downstream works on
//! [`Table`] values, so the extraction heuristics never see spreadsheet
//! internals.
//!
//! Date cells are rendered as ISO `YYYY-MM-DD` strings on purpose: the
//! source spreadsheets corrupt small numeric fields ("2", "8-9") into dates,
//! and the normalizer recognizes and repairs the ISO form. Whole floats are
//! rendered without a trailing `.0` so a set count typed as `3` reads back
//! as "3".

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// One sheet of the input workbook as rows of trimmed string cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Table {
        Table {
            name: name.into(),
            rows,
        }
    }

    /// Number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// Load every sheet of the given workbook. CSV files load as one table named
/// after the file stem.
pub fn load_tables(path: &Path) -> Result<Vec<Table>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        Ok(vec![load_csv(path)?])
    } else {
        load_workbook(path)
    }
}

fn load_workbook(path: &Path) -> Result<Vec<Table>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_owned();
    log::info!(
        "Found {} sheet(s): {}",
        sheet_names.len(),
        sheet_names.join(", ")
    );

    let mut tables = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Failed to read sheet '{}'", name))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        tables.push(Table::new(name, rows));
    }

    Ok(tables)
}

fn load_csv(path: &Path) -> Result<Table> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV row")?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }

    Ok(Table::new(name, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => {
                let naive: chrono::NaiveDateTime = naive;
                naive.format("%Y-%m-%d").to_string()
            }
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_float_cells_render_as_integers() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(4)), "4");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_string_cells_are_trimmed() {
        assert_eq!(
            cell_to_string(&Data::String("  Bench Press ".to_string())),
            "Bench Press"
        );
    }

    #[test]
    fn test_load_csv_sheet() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Week 1,,,,").unwrap();
        writeln!(file, "Push Day #1,,,,").unwrap();
        writeln!(file, "Bench Press,3,8-10,8-9,2 min").unwrap();
        file.flush().unwrap();

        let tables = load_tables(file.path()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[0].rows[2][0], "Bench Press");
        assert_eq!(tables[0].width(), 5);
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        assert!(load_tables(Path::new("no-such-file.xlsx")).is_err());
    }
}
