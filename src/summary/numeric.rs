//! Descriptive statistics for numeric columns.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{SummaryError, SummaryResult};
use crate::types::{DataType, Value};

/// A statistic that is one of the column's own values.
///
/// `Int64` columns keep their values exact; converting them to `f64` would merge neighbours
/// above 2^53.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a float (lossy above 2^53 for integers).
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Statistics computed for an `Int64`/`Float64` column.
///
/// Nulls are excluded from every statistic. A statistic that is undefined for the sample is
/// `None`:
///
/// - `min`/`max`/`mean`/`median`/`mode`/`interquartile_range` on a column without values
/// - `variance`/`std_dev` with fewer than two values (sample, N-1 denominator)
/// - `coefficient_of_variation` when the mean is zero or the sample is empty
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    /// Column name.
    pub name: String,
    /// Declared column type.
    pub data_type: DataType,
    pub min: Option<Number>,
    pub max: Option<Number>,
    pub mean: Option<f64>,
    /// 50th percentile (linear interpolation).
    pub median: Option<f64>,
    /// Most frequent value; the smallest one when several share the top count.
    pub mode: Option<Number>,
    /// Share of entries (nulls included) that are exactly zero, in percent.
    pub percent_zero: f64,
    /// Sample variance.
    pub variance: Option<f64>,
    /// Sample standard deviation.
    pub std_dev: Option<f64>,
    /// 75th percentile minus 25th percentile (linear interpolation).
    pub interquartile_range: Option<f64>,
    /// Population standard deviation divided by the mean.
    pub coefficient_of_variation: Option<f64>,
    /// Number of distinct non-null values.
    pub distinct_count: usize,
    /// Number of non-null values.
    pub count: usize,
    /// Number of null values.
    pub null_count: usize,
}

/// Summarize a numeric column from its cells (one per row).
///
/// `None` cells (rows shorter than the schema) and values whose variant disagrees with
/// `data_type` fail with [`SummaryError::Data`]. `NaN` floats count as nulls.
pub(crate) fn summarize_numeric<'a>(
    name: &str,
    data_type: DataType,
    cells: impl Iterator<Item = Option<&'a Value>>,
) -> SummaryResult<NumericSummary> {
    let mut ints: Vec<i64> = Vec::new();
    let mut floats: Vec<f64> = Vec::new();
    let mut null_count = 0usize;

    for (idx0, cell) in cells.enumerate() {
        let row = idx0 + 1;
        match (data_type, cell) {
            (_, None) => return Err(ragged_row(name, row)),
            (_, Some(Value::Null)) => null_count += 1,
            (_, Some(Value::Float64(v))) if v.is_nan() => null_count += 1,
            (DataType::Int64, Some(Value::Int64(v))) => ints.push(*v),
            (DataType::Float64, Some(Value::Float64(v))) => floats.push(*v),
            (_, Some(other)) => {
                return Err(SummaryError::Data {
                    column: name.to_string(),
                    message: format!("row {row}: expected {data_type} value, found {other:?}"),
                });
            }
        }
    }

    Ok(match data_type {
        DataType::Int64 => NumericSummary::from_integers(name, ints, null_count),
        _ => NumericSummary::from_values(name, data_type, floats, null_count),
    })
}

pub(crate) fn ragged_row(column: &str, row: usize) -> SummaryError {
    SummaryError::Data {
        column: column.to_string(),
        message: format!("row {row} has fewer cells than the schema"),
    }
}

impl NumericSummary {
    /// Compute the summary from the non-null float values of a column.
    pub fn from_values(
        name: impl Into<String>,
        data_type: DataType,
        mut values: Vec<f64>,
        null_count: usize,
    ) -> Self {
        // -0.0 and 0.0 are the same value for counting purposes.
        for v in values.iter_mut() {
            *v += 0.0;
        }
        values.sort_by(f64::total_cmp);

        let (mode, distinct_count) = mode_and_distinct(&values, |a, b| a.total_cmp(b) == Ordering::Equal);
        let extremes = Extremes {
            min: values.first().copied().map(Number::Float),
            max: values.last().copied().map(Number::Float),
            mode: mode.map(Number::Float),
            distinct_count,
        };
        Self::assemble(name.into(), data_type, &values, extremes, null_count)
    }

    /// Compute the summary of an `Int64` column from its non-null values.
    ///
    /// Min, max, mode and the distinct count are taken from the integers themselves; the
    /// remaining statistics are computed in `f64`.
    pub fn from_integers(name: impl Into<String>, mut values: Vec<i64>, null_count: usize) -> Self {
        values.sort_unstable();

        let (mode, distinct_count) = mode_and_distinct(&values, |a, b| a == b);
        let extremes = Extremes {
            min: values.first().copied().map(Number::Int),
            max: values.last().copied().map(Number::Int),
            mode: mode.map(Number::Int),
            distinct_count,
        };
        let floats: Vec<f64> = values.iter().map(|v| *v as f64).collect();
        Self::assemble(name.into(), DataType::Int64, &floats, extremes, null_count)
    }

    /// `sorted` must be ascending.
    fn assemble(
        name: String,
        data_type: DataType,
        sorted: &[f64],
        extremes: Extremes,
        null_count: usize,
    ) -> Self {
        let count = sorted.len();
        let total = count + null_count;
        let zeros = sorted.iter().filter(|v| **v == 0.0).count();
        let percent_zero = if total == 0 {
            0.0
        } else {
            zeros as f64 / total as f64 * 100.0
        };

        // Rounding in the running sum can push the mean a few ulps past the extremes.
        let mean = match (mean(sorted), sorted.first(), sorted.last()) {
            (Some(m), Some(lo), Some(hi)) => Some(m.clamp(*lo, *hi)),
            _ => None,
        };
        let sum_sq = mean.map(|m| sorted.iter().map(|v| (v - m) * (v - m)).sum::<f64>());

        let variance = match sum_sq {
            Some(ss) if count > 1 => Some(ss / (count - 1) as f64),
            _ => None,
        };
        let std_dev = variance.map(f64::sqrt);

        let coefficient_of_variation = match (mean, sum_sq) {
            (Some(m), Some(ss)) if m != 0.0 => {
                let cv = (ss / count as f64).sqrt() / m;
                cv.is_finite().then_some(cv)
            }
            _ => None,
        };

        let interquartile_range = match (quantile(sorted, 0.75), quantile(sorted, 0.25)) {
            (Some(q3), Some(q1)) => Some(q3 - q1),
            _ => None,
        };

        Self {
            name,
            data_type,
            min: extremes.min,
            max: extremes.max,
            mean,
            median: quantile(sorted, 0.5),
            mode: extremes.mode,
            percent_zero,
            variance,
            std_dev,
            interquartile_range,
            coefficient_of_variation,
            distinct_count: extremes.distinct_count,
            count,
            null_count,
        }
    }
}

/// Statistics taken from the column's own values rather than computed in `f64`.
struct Extremes {
    min: Option<Number>,
    max: Option<Number>,
    mode: Option<Number>,
    distinct_count: usize,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        Some(sum / n)
    } else {
        // The plain sum overflowed; dividing first keeps every term finite.
        Some(values.iter().map(|v| v / n).sum())
    }
}

/// Quantile of an ascending-sorted slice using linear interpolation between closest ranks.
pub(crate) fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        return Some(a);
    }
    Some(a + (h - lo as f64) * (b - a))
}

/// Walk the runs of an ascending-sorted slice. Returns the first (smallest) value of the
/// longest run and the number of runs.
fn mode_and_distinct<T: Copy>(sorted: &[T], same: impl Fn(&T, &T) -> bool) -> (Option<T>, usize) {
    let mut mode: Option<(T, usize)> = None;
    let mut distinct = 0usize;
    let mut i = 0usize;

    while i < sorted.len() {
        let v = sorted[i];
        let mut j = i + 1;
        while j < sorted.len() && same(&sorted[j], &v) {
            j += 1;
        }
        let run = j - i;
        distinct += 1;
        if mode.is_none_or(|(_, best)| run > best) {
            mode = Some((v, run));
        }
        i = j;
    }

    (mode.map(|(v, _)| v), distinct)
}
