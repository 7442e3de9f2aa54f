//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`load_dataset`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - infers a [`crate::types::Schema`] by scanning the source
//! - performs ingestion into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`parquet`]
//! - `excel` (Cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub(crate) mod infer;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStage,
    IngestionStats, LogObserver,
};
pub use unified::{
    infer_schema_from_path, ingest_from_path, load_dataset, ExcelSheetSelection, IngestionFormat, IngestionOptions,
};
