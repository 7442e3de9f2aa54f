use std::borrow::Cow;
use std::fmt::Write;

use crate::summary::ColumnResult;

use super::{categorical_facts, numeric_facts, REPORT_TITLE};

/// Render results as structured text.
///
/// ```text
/// # Summary Statistics
///
/// ## <column>
/// Type: int64
/// Min: 0
/// ...
///
/// ## <column>
/// Unique Values:
/// - a: 3
/// ```
pub fn render_text(results: &[ColumnResult]) -> String {
    let mut out = format!("# {REPORT_TITLE}\n\n");

    // Writing into a String cannot fail.
    for result in results {
        let _ = writeln!(out, "## {}", escape_line(result.name()));
        match result {
            ColumnResult::Numeric(s) => {
                for (label, cell) in numeric_facts(s) {
                    let _ = writeln!(out, "{label}: {cell}");
                }
            }
            ColumnResult::Categorical(s) => {
                out.push_str("Unique Values:\n");
                for (value, count) in categorical_facts(s) {
                    let _ = writeln!(out, "- {}: {count}", escape_line(&value.to_string()));
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Keep a user-provided string on one line: `\\`, `\n` and `\r` are written as escapes.
pub(crate) fn escape_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::{escape_line, render_text};
    use crate::summary::{CategoricalSummary, ColumnResult, NumericSummary};
    use crate::types::DataType;

    #[test]
    fn empty_results_render_heading_only() {
        assert_eq!(render_text(&[]), "# Summary Statistics\n\n");
    }

    #[test]
    fn numeric_section_lists_every_field() {
        let s = NumericSummary::from_integers("x", vec![1, 2, 2, 3, 0], 0);
        let text = render_text(&[ColumnResult::Numeric(s)]);

        assert!(text.starts_with("# Summary Statistics\n\n## x\nType: int64\n"));
        assert!(text.contains("Min: 0\n"));
        assert!(text.contains("Max: 3\n"));
        assert!(text.contains("Mean: 1.6\n"));
        assert!(text.contains("Median: 2\n"));
        assert!(text.contains("Mode: 2\n"));
        assert!(text.contains("Percent of Zero Rows: 20.00%\n"));
        assert!(text.contains("Number of Distinct Values: 4\n"));
    }

    #[test]
    fn zero_mean_renders_undefined_coefficient() {
        let s = NumericSummary::from_values("x", DataType::Float64, vec![-2.0, 2.0], 0);
        let text = render_text(&[ColumnResult::Numeric(s)]);
        assert!(text.contains("Coefficient of Variation: undefined\n"));
    }

    #[test]
    fn categorical_section_in_descending_count_order() {
        let s = CategoricalSummary::from_values("letter", ["a", "b", "a", "a"], 0);
        let text = render_text(&[ColumnResult::Categorical(s)]);
        assert_eq!(
            text,
            "# Summary Statistics\n\n## letter\nUnique Values:\n- a: 3\n- b: 1\n\n"
        );
    }

    #[test]
    fn multi_line_values_stay_inside_their_section() {
        let s = CategoricalSummary::from_values("c", ["a\n## fake\nMean: 1", "b"], 0);
        let text = render_text(&[ColumnResult::Categorical(s)]);

        assert_eq!(text.matches("\n## ").count(), 1);
        assert!(text.contains("- a\\n## fake\\nMean: 1: 1\n"));
    }

    #[test]
    fn escape_line_handles_backslashes_and_returns() {
        assert_eq!(escape_line("plain"), "plain");
        assert_eq!(escape_line("a\\n"), "a\\\\n");
        assert_eq!(escape_line("x\r\ny"), "x\\r\\ny");
    }
}
