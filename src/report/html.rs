use std::fmt::Write;

use crate::summary::ColumnResult;

use super::{categorical_facts, numeric_facts, COUNT_HEADER, REPORT_TITLE, VALUE_HEADER};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:1.5em}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:left}\
th{background:#f3f3f3}";

/// Render results as a self-contained HTML document: one `<h2>` plus a two-column table per
/// column. All user-provided text is escaped.
pub fn render_html(results: &[ColumnResult]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{REPORT_TITLE}</title>");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{REPORT_TITLE}</h1>");

    for result in results {
        let _ = writeln!(out, "<h2>{}</h2>", escape(result.name()));
        out.push_str("<table>\n");
        match result {
            ColumnResult::Numeric(s) => {
                push_row(&mut out, "th", "Statistic", "Value");
                for (label, cell) in numeric_facts(s) {
                    push_row(&mut out, "td", label, &cell.to_string());
                }
            }
            ColumnResult::Categorical(s) => {
                push_row(&mut out, "th", VALUE_HEADER, COUNT_HEADER);
                for (value, count) in categorical_facts(s) {
                    push_row(&mut out, "td", &value.to_string(), &count.to_string());
                }
            }
        }
        out.push_str("</table>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn push_row(out: &mut String, tag: &str, left: &str, right: &str) {
    let _ = writeln!(
        out,
        "<tr><{tag}>{}</{tag}><{tag}>{}</{tag}></tr>",
        escape(left),
        escape(right)
    );
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
