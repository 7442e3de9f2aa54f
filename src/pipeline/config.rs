//! Run configuration, loadable from TOML.
//!
//! ```toml
//! input = "data/iris.csv"
//! format = "csv"            # optional, inferred from the extension otherwise
//! sheet = "Measurements"    # optional, spreadsheets only
//! output_dir = "reports"
//! file_stem = "iris"
//! formats = ["text", "html"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SummaryError, SummaryResult};
use crate::ingestion::{ExcelSheetSelection, IngestionFormat, IngestionOptions};
use crate::report::ReportFormat;

/// File stem used for report files when none is configured.
pub const DEFAULT_FILE_STEM: &str = "summary_report";

/// Everything a summary run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// Dataset to summarize.
    pub input: PathBuf,
    /// Input format; `None` infers it from the extension of `input`.
    pub format: Option<IngestionFormat>,
    /// Worksheet to read from a spreadsheet input; `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Directory the report files are written to. It must already exist.
    pub output_dir: PathBuf,
    /// Report files are named `<file_stem>.<extension>`.
    pub file_stem: String,
    /// Reports to produce. Duplicates are ignored.
    pub formats: Vec<ReportFormat>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            format: None,
            sheet: None,
            output_dir: PathBuf::from("."),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            formats: ReportFormat::ALL.to_vec(),
        }
    }
}

impl SummaryConfig {
    /// A default configuration reading `input`.
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> SummaryResult<Self> {
        toml::from_str(text).map_err(|e| SummaryError::Config {
            message: e.to_string(),
        })
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> SummaryResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SummaryError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        toml::from_str(&text).map_err(|e| SummaryError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Checks the fields that have no usable default.
    pub fn validate(&self) -> SummaryResult<()> {
        let problem = if self.input.as_os_str().is_empty() {
            "no input dataset given"
        } else if self.file_stem.trim().is_empty() {
            "file_stem is empty"
        } else if self.formats.is_empty() {
            "no report formats requested"
        } else {
            return Ok(());
        };
        Err(SummaryError::Config {
            message: problem.to_string(),
        })
    }

    /// Requested formats in first-requested order, without duplicates.
    pub fn requested_formats(&self) -> Vec<ReportFormat> {
        let mut out: Vec<ReportFormat> = Vec::with_capacity(self.formats.len());
        for f in &self.formats {
            if !out.contains(f) {
                out.push(*f);
            }
        }
        out
    }

    /// Destination of the report in `format`.
    pub fn output_path(&self, format: ReportFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.file_stem, format.extension()))
    }

    /// Ingestion options for `input`, without an observer.
    pub fn ingestion_options(&self) -> IngestionOptions {
        IngestionOptions {
            format: self.format,
            excel_sheet_selection: match &self.sheet {
                Some(name) => ExcelSheetSelection::Sheet(name.clone()),
                None => ExcelSheetSelection::First,
            },
            ..IngestionOptions::default()
        }
    }
}
