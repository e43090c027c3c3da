//! Structure dump helper.
//!
//! Renders any `Serialize` value the way Perl's `Data::Dumper` prints a
//! reference: hashes as `{ 'key' => value }`, arrays as `[ ... ]`, strings
//! single-quoted, `undef` for null.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const INDENT: &str = "  ";

/// Errors that can occur while dumping an object.
#[derive(Error, Debug)]
pub enum DumpError {
    /// The object could not be converted to a value tree.
    #[error("failed to serialize object: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The rendered dump could not be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Returns a multi-line `$VAR1 = ...;` rendering of `obj`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use taglog::dumper::data_dumper;
///
/// let mut opts = BTreeMap::new();
/// opts.insert("filename", "foo.txt");
/// assert_eq!(
///     data_dumper(&opts).unwrap(),
///     "$VAR1 = {\n  'filename' => 'foo.txt'\n};"
/// );
/// ```
pub fn data_dumper<T: Serialize + ?Sized>(obj: &T) -> Result<String, DumpError> {
    let value = serde_json::to_value(obj)?;
    let mut out = String::from("$VAR1 = ");
    render(&value, 0, &mut out);
    out.push(';');
    Ok(out)
}

/// Writes `"<comment>:\n<dump>\n"` to `out`.
pub fn print_object<T: Serialize + ?Sized>(
    out: &mut dyn Write,
    obj: &T,
    comment: Option<&str>,
) -> Result<(), DumpError> {
    let dump = data_dumper(obj)?;
    writeln!(out, "{}:\n{}", comment.unwrap_or("Output"), dump)?;
    Ok(())
}

fn render(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("undef"),
        Value::Bool(true) => out.push('1'),
        Value::Bool(false) => out.push_str("''"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => push_quoted(s, out),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(depth + 1, out);
                render(item, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(depth, out);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(depth + 1, out);
                push_quoted(key, out);
                out.push_str(" => ");
                render(item, depth + 1, out);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(depth, out);
            out.push('}');
        }
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub(crate) fn push_quoted(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}
