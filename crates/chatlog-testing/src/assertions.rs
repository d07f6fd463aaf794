//! Assertions over exported CSV and xlsx tables.

use anyhow::{Context, Result};
use calamine::{Reader, Xlsx, open_workbook};
use std::path::Path;

/// An exported table read back into memory. Empty cells read as `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .header
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Column {} not in header {:?}", name, self.header))?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

pub fn read_csv(path: &Path) -> Result<CsvTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let header = reader.headers()?.iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| Ok(record?.iter().map(String::from).collect::<Vec<String>>()))
        .collect::<Result<Vec<Vec<String>>>>()?;
    Ok(CsvTable { header, rows })
}

/// Read the only worksheet of an xlsx file, returning its name and contents.
///
/// The first row is taken as the header. Blank cells read as `""` so the result
/// compares equal to the CSV export of the same table.
pub fn read_xlsx(path: &Path) -> Result<(String, CsvTable)> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let names = workbook.sheet_names();
    let [name] = names.as_slice() else {
        anyhow::bail!("Expected exactly one worksheet, got {:?}", names);
    };
    let name = name.clone();

    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("Failed to read worksheet {}", name))?;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());
    let header = rows.next().context("Worksheet has no header row")?;
    let rows = rows.collect();

    Ok((name, CsvTable { header, rows }))
}

/// Assert the CSV header equals `expected` exactly, in order.
pub fn assert_csv_header(path: &Path, expected: &[&str]) -> Result<()> {
    let table = read_csv(path)?;
    if table.header != expected {
        anyhow::bail!("Expected header {:?}, got {:?}", expected, table.header);
    }
    Ok(())
}

pub fn assert_row_count(path: &Path, expected: usize) -> Result<()> {
    let table = read_csv(path)?;
    if table.rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, table.rows.len());
    }
    Ok(())
}

/// Assert the named column holds exactly `expected`, in order.
pub fn assert_column(path: &Path, column: &str, expected: &[&str]) -> Result<()> {
    let table = read_csv(path)?;
    let values = table.column(column)?;
    if values != expected {
        anyhow::bail!(
            "Column {}: expected {:?}, got {:?}",
            column,
            expected,
            values
        );
    }
    Ok(())
}
