//! `rust-data-summary` computes per-column descriptive statistics for a tabular dataset and renders
//! them as a structured text report, an HTML page and an XLSX workbook.
//!
//! The pieces, in the order a run uses them:
//!
//! - [`ingestion`]: load CSV / JSON / Parquet / spreadsheet files into a [`types::DataSet`], with
//!   the [`types::Schema`] either given or inferred from the file
//! - [`summary`]: [`summary::compute`] turns a dataset into one [`summary::ColumnResult`] per numeric
//!   or textual column
//! - [`report`]: [`report::render_text`], [`report::render_html`] and [`report::render_xlsx`]
//! - [`pipeline`]: [`pipeline::run`] ties the three together from a [`pipeline::SummaryConfig`]
//! - [`error`]: error types used across the crate
//!
//! ## What gets summarized
//!
//! - `Int64` / `Float64` columns get min, max, mean, median, mode, percent of zero rows, sample
//!   variance, standard deviation, interquartile range, coefficient of variation and the number of
//!   distinct values.
//! - `Utf8` columns get the occurrence count of every distinct value, most frequent first.
//! - `Bool` columns are skipped.
//!
//! Missing cells ([`types::Value::Null`]) are excluded from every statistic. Statistics that are
//! undefined for a column (an empty column, a variance from a single value, a coefficient of
//! variation with a zero mean) are `None` and render as `undefined`.
//!
//! ## Quick example: summarize an in-memory dataset
//!
//! ```rust
//! use rust_data_summary::report::{render_html, render_text};
//! use rust_data_summary::summary::compute;
//! use rust_data_summary::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("petal_length", DataType::Float64),
//!     Field::new("species", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(1.4), Value::Utf8("setosa".to_string())],
//!         vec![Value::Float64(4.7), Value::Utf8("versicolor".to_string())],
//!         vec![Value::Null, Value::Utf8("setosa".to_string())],
//!     ],
//! );
//!
//! let results = compute(&ds).unwrap();
//! let text = render_text(&results);
//! assert!(text.contains("## petal_length\n"));
//! assert!(text.contains("- setosa: 2\n"));
//! assert!(render_html(&results).contains("<h2>species</h2>"));
//! ```
//!
//! ## Quick example: summarize a file
//!
//! ```no_run
//! use rust_data_summary::pipeline::{run, SummaryConfig};
//!
//! # fn main() -> Result<(), rust_data_summary::SummaryError> {
//! // Writes ./summary_report.md, ./summary_report.html and ./summary_report.xlsx.
//! let bundle = run(&SummaryConfig::for_input("iris.csv"), None)?;
//! assert!(bundle.xlsx.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod types;

pub use error::{ErrorKind, IngestionError, IngestionResult, SummaryError, SummaryResult};
