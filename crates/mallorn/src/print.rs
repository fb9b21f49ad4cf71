//! Multi-line pretty printing for nested values
//!
//! [`Display`](std::fmt::Display) emits the canonical single-line
//! form; `pretty` breaks wide collections across lines for human
//! readers. Both forms re-read to the same value.

use crate::value::Value;

/// Width at which a form stays on one line.
const INLINE_WIDTH: usize = 60;

/// Indentation per nesting level.
const INDENT: usize = 2;

/// Render `value` with nested collections broken across lines.
///
/// # Example
///
/// ```
/// use mallorn::{print::pretty, read_str};
///
/// let v = read_str("{:a 1}").unwrap();
/// assert_eq!(pretty(&v), "{:a 1}");
/// ```
pub fn pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, 0);
    out
}

fn write_pretty(out: &mut String, value: &Value, level: usize) {
    let flat = value.to_string();
    if flat.chars().count() <= INLINE_WIDTH {
        out.push_str(&flat);
        return;
    }

    match value {
        Value::List(items) => write_seq(out, items, '(', ')', level),
        Value::Vector(items) => write_seq(out, items, '[', ']', level),
        Value::Set(items) => {
            out.push('#');
            let items: Vec<&Value> = items.iter().collect();
            write_refs(out, &items, '{', '}', level);
        }
        Value::Map(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&" ".repeat((level + 1) * INDENT));
                }
                write_pretty(out, k, level + 1);
                out.push(' ');
                write_pretty(out, v, level + 1);
            }
            out.push('}');
        }
        Value::Tagged(t) => {
            out.push('#');
            out.push_str(&t.tag.to_string());
            out.push(' ');
            write_pretty(out, &t.value, level);
        }
        // Scalars never exceed the inline width by nesting
        other => out.push_str(&other.to_string()),
    }
}

fn write_seq(out: &mut String, items: &[Value], open: char, close: char, level: usize) {
    let refs: Vec<&Value> = items.iter().collect();
    write_refs(out, &refs, open, close, level);
}

fn write_refs(out: &mut String, items: &[&Value], open: char, close: char, level: usize) {
    out.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&" ".repeat((level + 1) * INDENT));
        }
        write_pretty(out, item, level + 1);
    }
    out.push(close);
}
