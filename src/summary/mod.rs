//! Per-column descriptive statistics.
//!
//! [`compute`] walks the columns of a [`DataSet`] in schema order and produces one
//! [`ColumnResult`] per numeric or textual column:
//!
//! - `Int64` / `Float64` columns → [`NumericSummary`]
//! - `Utf8` columns → [`CategoricalSummary`]
//! - `Bool` columns are skipped ([`summarize`] reports them in [`Summary::skipped`])
//!
//! Computation is all-or-nothing: a column that cannot be summarized fails the whole call.
//!
//! ```rust
//! use rust_data_summary::summary::{compute, ColumnResult, Number};
//! use rust_data_summary::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("x", DataType::Int64)]);
//! let rows = [1, 2, 2, 3, 0].into_iter().map(|v| vec![Value::Int64(v)]).collect();
//! let results = compute(&DataSet::new(schema, rows)).unwrap();
//!
//! match &results[0] {
//!     ColumnResult::Numeric(s) => {
//!         assert_eq!(s.mean, Some(1.6));
//!         assert_eq!(s.mode, Some(Number::Int(2)));
//!     }
//!     ColumnResult::Categorical(_) => unreachable!(),
//! }
//! ```

pub mod categorical;
pub mod numeric;

use crate::error::SummaryResult;
use crate::types::{DataSet, DataType};

pub use categorical::CategoricalSummary;
pub use numeric::{Number, NumericSummary};

/// Result computed for a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnResult {
    /// Numeric column statistics.
    Numeric(NumericSummary),
    /// Textual column occurrence counts.
    Categorical(CategoricalSummary),
}

impl ColumnResult {
    /// Name of the summarized column.
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(s) => &s.name,
            Self::Categorical(s) => &s.name,
        }
    }

    /// Short label for the result shape (`numeric` / `categorical`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Categorical(_) => "categorical",
        }
    }
}

/// A column that produced no [`ColumnResult`] because its type has no summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedColumn {
    pub name: String,
    pub data_type: DataType,
}

/// Output of [`summarize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Results in dataset column order.
    pub results: Vec<ColumnResult>,
    /// Columns left out of `results`, in dataset column order.
    pub skipped: Vec<SkippedColumn>,
}

/// Compute the ordered per-column results for `dataset`.
///
/// A dataset without columns yields an empty result list.
pub fn compute(dataset: &DataSet) -> SummaryResult<Vec<ColumnResult>> {
    summarize(dataset).map(|s| s.results)
}

/// Like [`compute`], but also reports which columns were skipped.
pub fn summarize(dataset: &DataSet) -> SummaryResult<Summary> {
    let mut results = Vec::with_capacity(dataset.column_count());
    let mut skipped = Vec::new();

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let cells = dataset.column(idx);
        match field.data_type {
            DataType::Int64 | DataType::Float64 => {
                let s = numeric::summarize_numeric(&field.name, field.data_type, cells)?;
                results.push(ColumnResult::Numeric(s));
            }
            DataType::Utf8 => {
                let s = categorical::summarize_categorical(&field.name, cells)?;
                results.push(ColumnResult::Categorical(s));
            }
            DataType::Bool => skipped.push(SkippedColumn {
                name: field.name.clone(),
                data_type: field.data_type,
            }),
        }
    }

    Ok(Summary { results, skipped })
}

#[cfg(test)]
mod tests {
    use super::{compute, summarize, ColumnResult};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn mixed_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("score", DataType::Float64),
            Field::new("active", DataType::Bool),
            Field::new("species", DataType::Utf8),
            Field::new("count", DataType::Int64),
        ]);
        let rows = vec![
            vec![Value::Float64(1.5), Value::Bool(true), Value::Utf8("a".into()), Value::Int64(0)],
            vec![Value::Float64(2.5), Value::Bool(false), Value::Utf8("b".into()), Value::Int64(4)],
            vec![Value::Null, Value::Null, Value::Utf8("a".into()), Value::Int64(4)],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn results_follow_column_order_and_skip_bools() {
        let summary = summarize(&mixed_dataset()).unwrap();
        let names: Vec<&str> = summary.results.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["score", "species", "count"]);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].name, "active");

        let kinds: Vec<&str> = summary.results.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["numeric", "categorical", "numeric"]);
    }

    #[test]
    fn empty_dataset_yields_no_results() {
        let ds = DataSet::new(Schema::default(), Vec::new());
        assert!(compute(&ds).unwrap().is_empty());
    }

    #[test]
    fn computing_twice_is_identical() {
        let ds = mixed_dataset();
        assert_eq!(compute(&ds).unwrap(), compute(&ds).unwrap());
    }

    #[test]
    fn one_bad_column_fails_everything() {
        let mut ds = mixed_dataset();
        ds.rows[1][3] = Value::Float64(4.0);
        let err = compute(&ds).unwrap_err();
        assert!(err.to_string().contains("column 'count'"));
    }

    #[test]
    fn numeric_bounds_hold() {
        let results = compute(&mixed_dataset()).unwrap();
        for r in &results {
            if let ColumnResult::Numeric(s) = r {
                let (min, max) = (s.min.unwrap().as_f64(), s.max.unwrap().as_f64());
                assert!(min <= s.median.unwrap() && s.median.unwrap() <= max);
                assert!(min <= s.mean.unwrap() && s.mean.unwrap() <= max);
            }
        }
    }
}
