//! Learning-to-rank text export.
//!
//! One line per judgment: `{rating}\tqid:{query_id}\t# {doc_id}\t"{query_text}"`.

use std::fmt::Write;

/// One judgment as it appears in an LTR line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtrRow<'a> {
    pub rating: f64,
    pub query_id: u64,
    pub doc_id: &'a str,
    pub query_text: &'a str,
}

/// Renders `rows` in order, each line newline-terminated.
pub fn render_ltr<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = LtrRow<'a>>,
{
    let mut out = String::new();
    for row in rows {
        push_line(&mut out, &row);
    }
    out
}

fn push_line(out: &mut String, row: &LtrRow<'_>) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}\tqid:{}\t# ", row.rating, row.query_id);
    if needs_quoting(row.doc_id) {
        push_quoted(out, row.doc_id);
    } else {
        out.push_str(row.doc_id);
    }
    out.push('\t');
    push_quoted(out, row.query_text);
    out.push('\n');
}

fn needs_quoting(field: &str) -> bool {
    field.is_empty()
        || field.chars().any(|c| {
            c.is_whitespace() || c.is_control() || !c.is_ascii() || matches!(c, '#' | '"' | '\\')
        })
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for c in field.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
