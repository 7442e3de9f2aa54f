//! Occurrence counts for textual columns.

use std::collections::HashMap;

use crate::error::{SummaryError, SummaryResult};
use crate::types::Value;

use super::numeric::ragged_row;

/// Distinct values of a `Utf8` column and how often each occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalSummary {
    /// Column name.
    pub name: String,
    /// `(value, count)` pairs ordered by descending count, ties in first-seen order.
    pub counts: Vec<(String, usize)>,
    /// Number of null values (not part of `counts`).
    pub null_count: usize,
}

impl CategoricalSummary {
    /// Build the summary from the non-null values of a column, in row order.
    pub fn from_values<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = &'a str>,
        null_count: usize,
    ) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for v in values {
            match index.get(v) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(v, counts.len());
                    counts.push((v.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            name: name.into(),
            counts,
            null_count,
        }
    }

    /// Sum of all occurrence counts (the number of non-null entries).
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

pub(crate) fn summarize_categorical<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a Value>>,
) -> SummaryResult<CategoricalSummary> {
    let mut values: Vec<&str> = Vec::new();
    let mut null_count = 0usize;

    for (idx0, cell) in cells.enumerate() {
        let row = idx0 + 1;
        match cell {
            None => return Err(ragged_row(name, row)),
            Some(Value::Null) => null_count += 1,
            Some(Value::Utf8(s)) => values.push(s.as_str()),
            Some(other) => {
                return Err(SummaryError::Data {
                    column: name.to_string(),
                    message: format!("row {row}: expected utf8 value, found {other:?}"),
                });
            }
        }
    }

    Ok(CategoricalSummary::from_values(name, values, null_count))
}
