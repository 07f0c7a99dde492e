//! Human-readable rendering of values.
//!
//! Output follows redis-cli conventions: `(integer)` and `(error)` prefixes,
//! quoted bulks, `(nil)` for null and numbered array items.

use crate::value::{Bulk, Value};

/// Formats a value for terminal display.
pub fn format_value(value: &Value) -> String {
    format_at(value, 0)
}

fn format_at(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "(nil)".to_string(),
        Value::Simple(s) => escape(s),
        Value::Error(e) => format!("(error) {} {}", escape(&e.name), escape(&e.message)),
        Value::Integer(n) => format!("(integer) {n}"),
        Value::Bulk(Bulk::Text(s)) => format!("\"{}\"", escape(s)),
        Value::Bulk(Bulk::Raw(bytes)) => format!("\"{}\"", bytes.escape_ascii()),
        Value::Array(items) if items.is_empty() => "(empty array)".to_string(),
        Value::Array(items) => {
            let pad = " ".repeat(indent);
            let mut lines = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let num = format!("{})", i + 1);
                // nested items line up under the parent's first column
                let formatted = format_at(item, indent + num.len() + 1);
                let lead = if i == 0 { String::new() } else { pad.clone() };
                lines.push(format!("{lead}{num} {formatted}"));
            }
            lines.join("\n")
        }
    }
}

/// Escapes control characters so server text cannot drive the terminal.
fn escape(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_control() {
                c.escape_default().collect::<Vec<_>>()
            } else {
                vec![c]
            }
        })
        .collect()
}
