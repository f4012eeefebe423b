//! Lazy rendering of captured records.
//!
//! Formatting happens on the consumer's time, never at capture. Rendering
//! is a pure function of the record: integers and booleans print decimal
//! (booleans as `1`/`0`), handles as fixed-width hex, strings verbatim and
//! masks as a compact CPU list (`0-3,8`).

use crate::record::{EventRecord, FieldValue, MaskValue};
use std::fmt::{self, Write};

/// Render `record` against its schema's print template.
///
/// `{field}` placeholders resolve by schema field name; `{cpu}` and
/// `{timestamp}` resolve from record metadata. A placeholder with no
/// matching field renders as `?` — schemas are validated by tests, so this
/// only surfaces a template typo, never a capture defect.
pub fn render(record: &EventRecord) -> String {
    let mut out = String::with_capacity(64 + record.schema().format.len());
    out.push_str(record.event());
    out.push_str(": ");

    let mut rest = record.schema().format;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        match tail.find('}') {
            Some(end) => {
                write_placeholder(&mut out, record, &tail[..end]);
                rest = &tail[end + 1..];
            }
            None => {
                // Unterminated brace, emit literally.
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn write_placeholder(out: &mut String, record: &EventRecord, name: &str) {
    match name {
        "cpu" => {
            let _ = write!(out, "{}", record.cpu());
        }
        "timestamp" => {
            let _ = write!(out, "{}", record.timestamp_ns());
        }
        _ => match record.field(name) {
            Some(value) => write_field(out, value),
            None => out.push('?'),
        },
    }
}

fn write_field(out: &mut String, value: &FieldValue) {
    let _ = match value {
        FieldValue::Int32(v) => write!(out, "{v}"),
        FieldValue::UInt32(v) => write!(out, "{v}"),
        FieldValue::Bool(v) => write!(out, "{}", i32::from(*v)),
        FieldValue::Handle(v) => write!(out, "{v}"),
        FieldValue::Str(v) => write!(out, "{v}"),
        FieldValue::Mask(v) => write!(out, "{}", cpu_list(v)),
    };
}

/// Compact set notation for a captured mask: consecutive runs collapse to
/// ranges, e.g. bits {0,1,2,3,8} render as `0-3,8`.
pub fn cpu_list(mask: &MaskValue) -> String {
    let mut out = String::new();
    let mut run: Option<(usize, usize)> = None;
    for cpu in mask.iter_set() {
        match run {
            Some((first, last)) if cpu == last + 1 => run = Some((first, cpu)),
            Some(range) => {
                flush_range(&mut out, range);
                run = Some((cpu, cpu));
            }
            None => run = Some((cpu, cpu)),
        }
    }
    if let Some(range) = run {
        flush_range(&mut out, range);
    }
    out
}

fn flush_range(out: &mut String, (first, last): (usize, usize)) {
    if !out.is_empty() {
        out.push(',');
    }
    let _ = if first == last {
        write!(out, "{first}")
    } else {
        write!(out, "{first}-{last}")
    };
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
