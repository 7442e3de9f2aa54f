//! Column type inference.
//!
//! Every format-specific inferrer reduces its cells to an [`Inferred`] kind and folds them with
//! [`Inferred::merge`]. The final kind maps onto a [`DataType`]:
//!
//! | cells seen                        | type      |
//! |-----------------------------------|-----------|
//! | only integers                     | `Int64`   |
//! | integers and/or other numbers     | `Float64` |
//! | only `true` / `false`             | `Bool`    |
//! | anything else                     | `Utf8`    |
//! | nothing (all cells empty)         | `Float64` |

use std::collections::HashMap;

use crate::types::{DataType, Field, Schema};

/// The narrowest kind that covers every cell seen so far in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Inferred {
    #[default]
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

impl Inferred {
    pub(crate) fn merge(self, other: Inferred) -> Inferred {
        use Inferred::*;
        match (self, other) {
            (Empty, x) | (x, Empty) => x,
            (a, b) if a == b => a,
            (Int, Float) | (Float, Int) => Float,
            _ => Text,
        }
    }

    /// Classify a raw text cell (CSV field, spreadsheet string).
    pub(crate) fn of_str(raw: &str) -> Inferred {
        let s = raw.trim();
        if s.is_empty() {
            Inferred::Empty
        } else if s.parse::<i64>().is_ok() {
            Inferred::Int
        } else if s.parse::<f64>().is_ok() {
            Inferred::Float
        } else if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
            Inferred::Bool
        } else {
            Inferred::Text
        }
    }

    pub(crate) fn data_type(self) -> DataType {
        match self {
            Inferred::Empty | Inferred::Float => DataType::Float64,
            Inferred::Int => DataType::Int64,
            Inferred::Bool => DataType::Bool,
            Inferred::Text => DataType::Utf8,
        }
    }
}

/// Ordered per-column accumulator used while scanning a source.
///
/// Columns keep first-seen order. Empty and repeated names are ignored since ingestion resolves
/// columns by name.
#[derive(Debug, Default)]
pub(crate) struct SchemaBuilder {
    columns: Vec<(String, Inferred)>,
    index: HashMap<String, usize>,
}

impl SchemaBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a column (if new) and return its slot.
    pub(crate) fn column(&mut self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        if let Some(&idx) = self.index.get(name) {
            return Some(idx);
        }
        let idx = self.columns.len();
        self.columns.push((name.to_string(), Inferred::Empty));
        self.index.insert(name.to_string(), idx);
        Some(idx)
    }

    pub(crate) fn observe(&mut self, slot: usize, kind: Inferred) {
        if let Some((_, current)) = self.columns.get_mut(slot) {
            *current = current.merge(kind);
        }
    }

    pub(crate) fn build(self) -> Schema {
        Schema::new(
            self.columns
                .into_iter()
                .map(|(name, kind)| Field::new(name, kind.data_type()))
                .collect(),
        )
    }
}

/// Maps header positions onto builder slots, dropping empty and repeated header cells.
///
/// Header text is trimmed, matching how CSV and spreadsheet ingestion look columns up.
pub(crate) fn header_slots<'a>(
    builder: &mut SchemaBuilder,
    headers: impl Iterator<Item = &'a str>,
) -> Vec<Option<usize>> {
    let mut seen: Vec<usize> = Vec::new();
    headers
        .map(|h| {
            let slot = builder.column(h.trim())?;
            if seen.contains(&slot) {
                return None;
            }
            seen.push(slot);
            Some(slot)
        })
        .collect()
}
