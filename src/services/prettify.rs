//! Human-readable rendering of Renovate's NDJSON logs.
//!
//! Each JSON record becomes a header line followed by its remaining fields:
//!
//! ```text
//! [2024-07-12 17:00:20.861 +0000] INFO: Repository started
//!     repository: "foo/bar"
//!     renovateVersion: "12.345.6"
//! ```
//!
//! Lines that are not JSON objects pass through unchanged.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Bookkeeping fields every Renovate record carries.
const HIDDEN_FIELDS: &[&str] = &["v", "name", "pid", "hostname", "logContext"];

/// Fields rendered in the header line.
const HEADER_FIELDS: &[&str] = &["time", "level", "msg"];

const FIELD_INDENT: &str = "    ";

/// Input bytes processed between cooperative yields in [`prettify_logs_async`].
const YIELD_EVERY_BYTES: usize = 4096;

/// Render a whole log.
pub fn prettify_logs(logs: &str) -> String {
    let mut out = String::with_capacity(logs.len());
    for line in logs.lines() {
        prettify_line(line, &mut out);
    }
    out
}

/// Same output as [`prettify_logs`], yielding to the runtime periodically so
/// a multi-megabyte log doesn't monopolize a worker thread.
pub async fn prettify_logs_async(logs: &str) -> String {
    let mut out = String::with_capacity(logs.len());
    let mut since_yield = 0;
    for line in logs.lines() {
        prettify_line(line, &mut out);
        since_yield += line.len() + 1;
        if since_yield >= YIELD_EVERY_BYTES {
            since_yield = 0;
            tokio::task::yield_now().await;
        }
    }
    out
}

fn prettify_line(line: &str, out: &mut String) {
    if line.trim().is_empty() {
        return;
    }
    let Ok(record) = serde_json::from_str::<Map<String, Value>>(line) else {
        out.push_str(line);
        out.push('\n');
        return;
    };

    let mut header = Vec::with_capacity(3);
    if let Some(time) = record.get("time") {
        header.push(format!("[{}]", format_time(time)));
    }
    if let Some(level) = record.get("level") {
        header.push(format!("{}:", level_label(level)));
    }
    if let Some(msg) = record.get("msg") {
        header.push(match msg {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });
    }
    if !header.is_empty() {
        out.push_str(&header.join(" "));
        out.push('\n');
    }

    for (key, value) in &record {
        if HIDDEN_FIELDS.contains(&key.as_str()) || HEADER_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let _ = writeln!(out, "{FIELD_INDENT}{key}: {}", format_value(value));
    }
}

fn format_time(time: &Value) -> String {
    let parsed = match time {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|time| time.with_timezone(&Utc)),
        Value::Number(millis) => millis.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    match parsed {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f +0000").to_string(),
        None => match time {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}

fn level_label(level: &Value) -> String {
    match level {
        Value::Number(number) => match number.as_u64() {
            Some(10) => "TRACE",
            Some(20) => "DEBUG",
            Some(30) => "INFO",
            Some(40) => "WARN",
            Some(50) => "ERROR",
            Some(60) => "FATAL",
            _ => "USERLVL",
        }
        .to_string(),
        Value::String(label) => label.to_uppercase(),
        _ => "USERLVL".to_string(),
    }
}

/// Scalars inline; objects and arrays as indented JSON aligned under the key.
fn format_value(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            pretty.replace('\n', &format!("\n{FIELD_INDENT}"))
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTED: &str = r#"{"name":"renovate","hostname":"renovate-1337","pid":10,"level":30,"logContext":"abcd","repository":"foo/bar","renovateVersion":"12.345.6","msg":"Repository started","time":"2024-07-12T17:00:20.861Z","v":0}"#;

    #[test]
    fn test_renders_header_and_fields() {
        let pretty = prettify_logs(STARTED);
        assert_eq!(
            pretty,
            "[2024-07-12 17:00:20.861 +0000] INFO: Repository started\n    repository: \"foo/bar\"\n    renovateVersion: \"12.345.6\"\n"
        );
    }

    #[test]
    fn test_passes_through_non_json() {
        let pretty = prettify_logs("plain text\nnull\n[1,2]");
        assert_eq!(pretty, "plain text\nnull\n[1,2]\n");
    }

    #[test]
    fn test_drops_blank_lines() {
        assert_eq!(prettify_logs("\n\n  \n"), "");
    }

    #[test]
    fn test_record_without_header_fields() {
        let pretty = prettify_logs("{\"repository\":\"foo/bar\",\"hostname\":\"renovate-1337\"}\n{}");
        assert_eq!(pretty, "    repository: \"foo/bar\"\n");
    }

    #[test]
    fn test_level_labels() {
        for (level, label) in [
            (10, "TRACE"),
            (20, "DEBUG"),
            (30, "INFO"),
            (40, "WARN"),
            (50, "ERROR"),
            (60, "FATAL"),
            (35, "USERLVL"),
        ] {
            assert_eq!(level_label(&Value::from(level)), label);
        }
        assert_eq!(level_label(&Value::from("warn")), "WARN");
    }

    #[test]
    fn test_epoch_millis_time() {
        let pretty = prettify_logs(r#"{"time":1720803606051,"level":20,"msg":"hi"}"#);
        assert_eq!(pretty, "[2024-07-12 17:00:06.051 +0000] DEBUG: hi\n");
    }

    #[test]
    fn test_unparseable_time_kept_verbatim() {
        let pretty = prettify_logs(r#"{"time":"yesterday","msg":"hi"}"#);
        assert_eq!(pretty, "[yesterday] hi\n");
    }

    #[test]
    fn test_nested_values_are_indented() {
        let pretty = prettify_logs(r#"{"level":30,"msg":"config","config":{"a":1}}"#);
        assert_eq!(pretty, "INFO: config\n    config: {\n      \"a\": 1\n    }\n");
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let log = std::iter::repeat(STARTED).take(200).collect::<Vec<_>>().join("\n");
        assert_eq!(prettify_logs_async(&log).await, prettify_logs(&log));
    }
}
