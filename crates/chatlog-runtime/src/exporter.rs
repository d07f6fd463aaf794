use crate::{Error, Result};
use chatlog_engine::Table;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Pick the writer from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Excel refuses longer cell strings; rust_xlsxwriter reports them as errors.
const XLSX_MAX_CELL_CHARS: usize = 32_767;

/// Today's local date, `YYYY-MM-DD`.
pub fn default_sheet_name() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Where and how the finished table is written.
///
/// Built before any sessions are fetched so a bad path or sheet name fails early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    path: PathBuf,
    format: OutputFormat,
    sheet_name: String,
}

impl ExportTarget {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self {
            path,
            format,
            sheet_name: default_sheet_name(),
        })
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Result<Self> {
        let sheet_name = sheet_name.into();
        if self.format == OutputFormat::Xlsx {
            validate_sheet_name(&sheet_name)?;
        }
        self.sheet_name = sheet_name;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

/// Check `name` against Excel's sheet naming rules.
///
/// rust_xlsxwriter only exposes the rules through `Worksheet::set_name`, so a
/// scratch worksheet is named and dropped. Names must be 1 to 31 chars without
/// any of `[ ] : * ? / \`.
fn validate_sheet_name(name: &str) -> Result<()> {
    Worksheet::new().set_name(name)?;
    Ok(())
}

/// Write `table` to `target`, creating missing parent directories.
pub fn write_table(table: &Table, target: &ExportTarget) -> Result<()> {
    ensure_parent_dir(target.path())?;

    match target.format() {
        OutputFormat::Csv => write_csv(table, target.path())?,
        OutputFormat::Xlsx => write_xlsx(table, target.path(), target.sheet_name())?,
    }

    tracing::info!(
        path = %target.path().display(),
        format = %target.format(),
        rows = table.len(),
        "Table written"
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.header())?;
    for record in table.records() {
        writer.write_record(record.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(table: &Table, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    let header = table.header();
    for (index, export_row) in table.rows().iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in export_row.cells().into_iter().enumerate() {
            let Some(value) = cell else { continue };
            let value = fit_xlsx_cell(value, export_row.session_id(), header[col]);
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Truncate `value` to the xlsx cell limit, counted in chars.
fn fit_xlsx_cell(value: String, session_id: &str, column: &str) -> String {
    let length = value.chars().count();
    if length <= XLSX_MAX_CELL_CHARS {
        return value;
    }

    tracing::warn!(
        session_id,
        column,
        length,
        limit = XLSX_MAX_CELL_CHARS,
        "Cell exceeds the xlsx limit; truncated"
    );
    value.chars().take(XLSX_MAX_CELL_CHARS).collect()
}
