//! Report rendering.
//!
//! The same ordered `&[ColumnResult]` feeds three independent renderers:
//!
//! - [`render_text`]: markdown-flavoured structured text
//! - [`render_html`]: a self-contained HTML5 document
//! - [`render_xlsx`]: a workbook with one sheet per column
//!
//! All three draw their rows from [`numeric_facts`] / [`CategoricalSummary::counts`], so every
//! format states the same facts. Numbers use the shortest decimal form that round-trips to the
//! same `f64`; the zero-row percentage is shown with two decimals in text and HTML; undefined
//! statistics are written as [`UNDEFINED`].
//!
//! ```rust
//! use rust_data_summary::report::render_text;
//! use rust_data_summary::summary::{CategoricalSummary, ColumnResult};
//!
//! let results = vec![ColumnResult::Categorical(CategoricalSummary::from_values(
//!     "letter",
//!     ["a", "b", "a", "a"],
//!     0,
//! ))];
//! let text = render_text(&results);
//! assert!(text.contains("- a: 3\n- b: 1\n"));
//! ```

mod html;
pub(crate) mod output;
mod text;
mod xlsx;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SummaryError;
use crate::summary::{CategoricalSummary, Number, NumericSummary};

pub use html::render_html;
pub use text::render_text;
pub use xlsx::{render_xlsx, render_xlsx_to_buffer, SheetNamer, MAX_SHEET_NAME_LEN};

/// Top-level heading shared by the text and HTML reports.
pub const REPORT_TITLE: &str = "Summary Statistics";

/// Marker written in place of an undefined statistic.
pub const UNDEFINED: &str = "undefined";

/// Header of the value column in categorical tables.
pub const VALUE_HEADER: &str = "Value";

/// Header of the count column in categorical tables.
pub const COUNT_HEADER: &str = "Count";

/// Label of the zero-row percentage fact.
pub const PERCENT_ZERO_LABEL: &str = "Percent of Zero Rows";

/// Output encodings a report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Structured (markdown-flavoured) text.
    #[serde(alias = "md", alias = "markdown")]
    Text,
    /// Hypertext.
    #[serde(alias = "htm")]
    Html,
    /// Spreadsheet workbook.
    #[serde(alias = "excel")]
    Xlsx,
}

impl ReportFormat {
    /// All formats, in the order reports are produced.
    pub const ALL: [ReportFormat; 3] = [Self::Text, Self::Html, Self::Xlsx];

    /// File extension used for output files of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "md",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
        })
    }
}

impl FromStr for ReportFormat {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "md" | "markdown" => Ok(Self::Text),
            "html" | "htm" => Ok(Self::Html),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            _ => Err(SummaryError::UnsupportedFormat {
                requested: s.to_string(),
            }),
        }
    }
}

/// Rendered report bodies. Formats that were not requested are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBundle {
    /// Structured text report.
    pub text: Option<String>,
    /// HTML report.
    pub html: Option<String>,
    /// Path of the written workbook.
    pub xlsx: Option<PathBuf>,
}

/// One value in a report row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    /// A statistic; `None` when undefined.
    Number(Option<f64>),
    /// An exact value of an `Int64` column.
    Integer(i64),
    /// A percentage in `0..=100`.
    Percent(f64),
    Count(usize),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(Some(v)) if v.is_finite() => write!(f, "{v}"),
            Cell::Number(_) => f.write_str(UNDEFINED),
            Cell::Percent(p) if p.is_finite() => write!(f, "{p:.2}%"),
            Cell::Percent(_) => f.write_str(UNDEFINED),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Count(n) => write!(f, "{n}"),
        }
    }
}

impl From<Option<Number>> for Cell<'_> {
    fn from(value: Option<Number>) -> Self {
        match value {
            Some(Number::Int(n)) => Cell::Integer(n),
            Some(Number::Float(v)) => Cell::Number(Some(v)),
            None => Cell::Number(None),
        }
    }
}

/// Labelled facts of a numeric summary, in report order.
pub fn numeric_facts(s: &NumericSummary) -> [(&'static str, Cell<'_>); 12] {
    [
        ("Type", Cell::Text(s.data_type.label())),
        ("Min", Cell::from(s.min)),
        ("Max", Cell::from(s.max)),
        ("Mean", Cell::Number(s.mean)),
        ("Median", Cell::Number(s.median)),
        ("Mode", Cell::from(s.mode)),
        (PERCENT_ZERO_LABEL, Cell::Percent(s.percent_zero)),
        ("Variance", Cell::Number(s.variance)),
        ("Standard Deviation", Cell::Number(s.std_dev)),
        ("Interquartile Range", Cell::Number(s.interquartile_range)),
        ("Coefficient of Variation", Cell::Number(s.coefficient_of_variation)),
        ("Number of Distinct Values", Cell::Count(s.distinct_count)),
    ]
}

/// `(value, count)` rows of a categorical summary, in report order.
pub fn categorical_facts(s: &CategoricalSummary) -> impl Iterator<Item = (Cell<'_>, Cell<'_>)> {
    s.counts
        .iter()
        .map(|(value, count)| (Cell::Text(value), Cell::Count(*count)))
}

#[cfg(test)]
mod tests {
    use super::{numeric_facts, Cell, ReportFormat};
    use crate::error::ErrorKind;
    use crate::summary::NumericSummary;

    #[test]
    fn cells_render_with_stable_precision() {
        assert_eq!(Cell::Number(Some(2.0)).to_string(), "2");
        assert_eq!(Cell::Number(Some(1.6)).to_string(), "1.6");
        assert_eq!(Cell::Number(Some(0.1 + 0.2)).to_string(), "0.30000000000000004");
        assert_eq!(Cell::Number(None).to_string(), "undefined");
        assert_eq!(Cell::Number(Some(f64::NAN)).to_string(), "undefined");
        assert_eq!(Cell::Percent(20.0).to_string(), "20.00%");
        assert_eq!(Cell::Percent(100.0 / 3.0).to_string(), "33.33%");
        assert_eq!(Cell::Count(4).to_string(), "4");
        assert_eq!(Cell::Integer(9_007_199_254_740_993).to_string(), "9007199254740993");
    }

    #[test]
    fn numeric_facts_cover_every_statistic() {
        let s = NumericSummary::from_integers("x", vec![1, 2, 2, 3, 0], 0);
        let facts = numeric_facts(&s);
        let labels: Vec<&str> = facts.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Type");
        assert_eq!(labels[11], "Number of Distinct Values");
        assert_eq!(facts[6].1.to_string(), "20.00%");
    }

    #[test]
    fn report_format_parsing() {
        assert_eq!("Markdown".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("htm".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!(" XLSX ".parse::<ReportFormat>().unwrap(), ReportFormat::Xlsx);

        let err = "pdf".parse::<ReportFormat>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("'pdf'"));
    }
}
