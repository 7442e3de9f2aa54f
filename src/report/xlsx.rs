//! Workbook report: one sheet per summarized column.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{SummaryError, SummaryResult};
use crate::summary::ColumnResult;

use super::{categorical_facts, numeric_facts, output, Cell, COUNT_HEADER, UNDEFINED, VALUE_HEADER};

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const RESERVED_SHEET_NAME: &str = "History";
const FALLBACK_SHEET_NAME: &str = "column";
const EMPTY_SHEET_NAME: &str = "Summary";

/// Largest integer magnitude an Excel number cell holds exactly.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Turns column names into valid, unique sheet names.
///
/// - `[ ] : * ? / \` become `_`
/// - leading/trailing apostrophes are dropped, an empty name becomes `column`
/// - names are cut to [`MAX_SHEET_NAME_LEN`] characters; `History` is reserved and gets `_`
/// - a name already taken (case-insensitive) gets ` (2)`, ` (3)`, ... appended
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sheet name for `column` and reserves it.
    pub fn assign(&mut self, column: &str) -> String {
        let base = sanitize(column);
        let mut candidate = base.clone();
        let mut n = 2usize;
        while self.used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{}{suffix}", stem.trim_end_matches('\''));
            n += 1;
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

fn sanitize(column: &str) -> String {
    let replaced: String = column
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let truncated: String = replaced
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let name = truncated.trim_end_matches('\'');

    if name.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else if name.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Build the workbook in memory.
///
/// Numeric columns get a header row (`Column Name` + the statistic labels) and one data row;
/// categorical columns get a `Value`/`Count` table with one row per distinct value. A categorical
/// column with more distinct values than a sheet has rows fails with
/// [`XlsxError::RowColumnLimitError`].
pub fn render_xlsx_to_buffer(results: &[ColumnResult]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let mut namer = SheetNamer::new();

    for result in results {
        let sheet = workbook.add_worksheet();
        sheet.set_name(namer.assign(result.name()))?;

        match result {
            ColumnResult::Numeric(s) => {
                sheet.write_string_with_format(0, 0, "Column Name", &header)?;
                sheet.write_string(1, 0, s.name.as_str())?;
                for (i, (label, cell)) in numeric_facts(s).into_iter().enumerate() {
                    let col = (i + 1) as u16;
                    sheet.write_string_with_format(0, col, label, &header)?;
                    write_cell(sheet, 1, col, cell)?;
                }
            }
            ColumnResult::Categorical(s) => {
                sheet.write_string_with_format(0, 0, VALUE_HEADER, &header)?;
                sheet.write_string_with_format(0, 1, COUNT_HEADER, &header)?;
                for (i, (value, count)) in categorical_facts(s).enumerate() {
                    let row = u32::try_from(i + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
                    write_cell(sheet, row, 0, value)?;
                    write_cell(sheet, row, 1, count)?;
                }
            }
        }
    }

    if results.is_empty() {
        workbook.add_worksheet().set_name(EMPTY_SHEET_NAME)?;
    }

    workbook.save_to_buffer()
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: Cell<'_>) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => sheet.write_string(row, col, s)?,
        Cell::Number(Some(v)) | Cell::Percent(v) if v.is_finite() => sheet.write_number(row, col, v)?,
        Cell::Number(_) | Cell::Percent(_) => sheet.write_string(row, col, UNDEFINED)?,
        // Integers past 2^53 would be rounded in a number cell.
        Cell::Integer(n) if n.unsigned_abs() <= MAX_EXACT_INTEGER as u64 => {
            sheet.write_number(row, col, n as f64)?
        }
        Cell::Integer(n) => sheet.write_string(row, col, n.to_string())?,
        Cell::Count(n) => sheet.write_number(row, col, n as f64)?,
    };
    Ok(())
}

/// Write the workbook to `path`.
///
/// The file only appears at `path` once it is complete; a failure leaves any previous file
/// untouched.
pub fn render_xlsx(results: &[ColumnResult], path: impl AsRef<Path>) -> SummaryResult<PathBuf> {
    let path = path.as_ref();
    let bytes = render_xlsx_to_buffer(results).map_err(|source| SummaryError::Xlsx {
        path: path.to_path_buf(),
        source,
    })?;
    output::write_atomic(path, &bytes)?;
    Ok(path.to_path_buf())
}
