//! Progress extraction from Renovate's NDJSON log stream.
//!
//! Renovate logs one JSON object per line. Three kinds of records matter:
//! - the autodiscovery record, carrying a `repositories` array,
//! - `"Repository started"` records, carrying a `repository` name,
//! - `"Repository finished"` records, likewise.
//!
//! Everything else, including malformed lines, is skipped. Logs can be huge
//! (debug level produces megabytes), so lines are scanned for cheap substring
//! markers before any JSON parsing happens.

use std::collections::HashMap;

use serde_json::{Map, Value};
use url::Url;

use crate::domain::models::{ProgressConfig, ProgressItem, ProgressState};

const DISCOVERY_MARKER: &str = "\"repositories\"";
const STARTED_MSG: &str = "Repository started";
const FINISHED_MSG: &str = "Repository finished";

/// Options for [`extract_progress`].
#[derive(Debug, Clone, Default)]
pub struct ProgressOptions {
    /// Base URL that repository names are resolved against
    pub repository_base_url: Option<Url>,
}

impl ProgressOptions {
    pub fn with_base_url(url: Url) -> Self {
        Self {
            repository_base_url: Some(url),
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Result<Self, url::ParseError> {
        let repository_base_url = config
            .repository_base_url
            .as_deref()
            .map(Url::parse)
            .transpose()?;
        Ok(Self {
            repository_base_url,
        })
    }
}

/// Reconstruct per-repository progress from raw log text.
///
/// Returns `None` when the log holds no autodiscovery record (the run has not
/// got that far, or this is not a Renovate log). Returns `Some` of an empty
/// list when discovery found zero repositories.
pub fn extract_progress(logs: &str, options: &ProgressOptions) -> Option<Vec<ProgressItem>> {
    let mut extractor = ProgressExtractor::new(options);
    for line in logs.lines() {
        extractor.push_line(line);
    }
    extractor.finish()
}

/// Incremental form of [`extract_progress`], fed one line at a time.
#[derive(Debug)]
pub struct ProgressExtractor<'a> {
    options: &'a ProgressOptions,
    items: Vec<ProgressItem>,
    positions: HashMap<String, usize>,
    discovered: bool,
}

impl<'a> ProgressExtractor<'a> {
    pub fn new(options: &'a ProgressOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            positions: HashMap::new(),
            discovered: false,
        }
    }

    /// Process one log line. Irrelevant or malformed lines are ignored.
    pub fn push_line(&mut self, line: &str) {
        if !is_candidate(line) {
            return;
        }
        // Only objects qualify; null, booleans and arrays fail to parse here.
        let Ok(record) = serde_json::from_str::<Map<String, Value>>(line) else {
            return;
        };
        self.apply(&record);
    }

    /// The items in first-discovery order, or `None` if nothing was discovered.
    pub fn finish(self) -> Option<Vec<ProgressItem>> {
        self.discovered.then_some(self.items)
    }

    fn apply(&mut self, record: &Map<String, Value>) {
        let Some(msg) = record.get("msg") else {
            return;
        };

        if let Some(names) = record.get("repositories").and_then(repository_names) {
            self.discover(&names);
        }

        let Some(repository) = record.get("repository").and_then(Value::as_str) else {
            return;
        };
        let Some(&position) = self.positions.get(repository) else {
            return;
        };
        let item = &mut self.items[position];
        match msg.as_str() {
            Some(STARTED_MSG) if item.state == ProgressState::Pending => {
                item.state = ProgressState::Started;
            }
            Some(FINISHED_MSG) => item.state = ProgressState::Finished,
            _ => {}
        }
    }

    /// A repeated discovery record resets known repositories to pending in
    /// place and appends new ones.
    fn discover(&mut self, names: &[&str]) {
        if self.discovered {
            tracing::debug!(count = names.len(), "repeated discovery record resets progress");
        }
        self.discovered = true;
        for &name in names {
            let mut item = ProgressItem::pending(name);
            item.repository_url = self.repository_url(name);
            match self.positions.get(name).copied() {
                Some(position) => self.items[position] = item,
                None => {
                    self.positions.insert(name.to_string(), self.items.len());
                    self.items.push(item);
                }
            }
        }
    }

    fn repository_url(&self, name: &str) -> Option<String> {
        let base = self.options.repository_base_url.as_ref()?;
        base.join(name).ok().map(String::from)
    }
}

fn is_candidate(line: &str) -> bool {
    line.contains(DISCOVERY_MARKER) || line.contains(STARTED_MSG) || line.contains(FINISHED_MSG)
}

/// The names in a `repositories` field, provided every element is a string.
fn repository_names(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = r#"{"name":"renovate","hostname":"renovate-foo-bar","pid":10,"level":30,"logContext":"abcd","msg":"test message","time":"2024-07-12T17:00:06.051Z","v":0}"#;
    const DISCOVERY: &str = r#"{"name":"renovate","hostname":"renovate-1337","pid":10,"level":30,"logContext":"abcd","length":3,"repositories":["foo/bar", "foo/baz/qux", "random"],"msg":"Autodiscovered repositories","time":"2024-07-12T17:00:08.848Z","v":0}"#;
    const STARTED_FOO_BAR: &str = r#"{"name":"renovate","hostname":"renovate-1337","pid":10,"level":30,"logContext":"abcd","repository":"foo/bar","renovateVersion":"12.345.6","msg":"Repository started","time":"2024-07-12T17:00:20.861Z","v":0}"#;
    const FINISHED_FOO_BAR: &str = r#"{"name":"renovate","hostname":"renovate-1337","pid":10,"level":30,"logContext":"abcd","repository":"foo/bar","cloned":true,"durationMs":7133,"msg":"Repository finished","time":"2024-07-12T17:00:30.123Z","v":0}"#;
    const STARTED_QUX: &str = r#"{"name":"renovate","hostname":"renovate-1337","pid":10,"level":30,"logContext":"abcd","repository":"foo/baz/qux","renovateVersion":"12.345.6","msg":"Repository started","time":"2024-07-12T17:00:32.456Z","v":0}"#;

    fn extract(lines: &[&str]) -> Option<Vec<ProgressItem>> {
        extract_progress(&lines.join("\n"), &ProgressOptions::default())
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(extract_progress("", &ProgressOptions::default()), None);
    }

    #[test]
    fn test_non_json_input_is_none() {
        assert_eq!(extract(&["foo bar", "baz qux 42 {}"]), None);
    }

    #[test]
    fn test_detects_repository_list() {
        let result = extract(&[PREAMBLE, DISCOVERY]);
        assert_eq!(
            result,
            Some(vec![
                ProgressItem::pending("foo/bar"),
                ProgressItem::pending("foo/baz/qux"),
                ProgressItem::pending("random"),
            ])
        );
    }

    #[test]
    fn test_detects_started_and_finished() {
        let result = extract(&[PREAMBLE, DISCOVERY, STARTED_FOO_BAR, FINISHED_FOO_BAR, STARTED_QUX]);
        assert_eq!(
            result,
            Some(vec![
                ProgressItem::pending("foo/bar").with_state(ProgressState::Finished),
                ProgressItem::pending("foo/baz/qux").with_state(ProgressState::Started),
                ProgressItem::pending("random"),
            ])
        );
    }

    #[test]
    fn test_empty_discovery_is_some_empty() {
        let discovery = r#"{"repositories":[],"msg":"Autodiscovered repositories"}"#;
        assert_eq!(extract(&[discovery]), Some(vec![]));
    }

    #[test]
    fn test_discovery_requires_msg() {
        let discovery = r#"{"repositories":["foo/bar"]}"#;
        assert_eq!(extract(&[discovery]), None);
    }

    #[test]
    fn test_discovery_requires_string_names() {
        let discovery = r#"{"repositories":["foo/bar", 42],"msg":"Autodiscovered repositories"}"#;
        assert_eq!(extract(&[discovery]), None);
    }

    #[test]
    fn test_ignores_unknown_repository() {
        let started = r#"{"repository":"other/repo","msg":"Repository started"}"#;
        let result = extract(&[DISCOVERY, started]).unwrap();
        assert!(result.iter().all(|item| item.state == ProgressState::Pending));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_events_before_discovery_are_ignored() {
        let result = extract(&[STARTED_FOO_BAR, DISCOVERY]).unwrap();
        assert_eq!(result[0], ProgressItem::pending("foo/bar"));
    }

    #[test]
    fn test_state_never_regresses_to_started() {
        let result = extract(&[DISCOVERY, STARTED_FOO_BAR, FINISHED_FOO_BAR, STARTED_FOO_BAR]).unwrap();
        assert_eq!(result[0].state, ProgressState::Finished);
    }

    #[test]
    fn test_finished_without_started() {
        let result = extract(&[DISCOVERY, FINISHED_FOO_BAR]).unwrap();
        assert_eq!(result[0].state, ProgressState::Finished);
    }

    #[test]
    fn test_repeated_discovery_resets_in_place() {
        let rediscovery = r#"{"repositories":["random","new/one","foo/bar"],"msg":"Autodiscovered repositories"}"#;
        let result = extract(&[DISCOVERY, STARTED_FOO_BAR, rediscovery]).unwrap();
        let names: Vec<_> = result.iter().map(|item| item.repository.as_str()).collect();
        assert_eq!(names, vec!["foo/bar", "foo/baz/qux", "random", "new/one"]);
        assert_eq!(result[0].state, ProgressState::Pending);
    }

    #[test]
    fn test_ignores_invalid_log_lines() {
        let result = extract(&[
            PREAMBLE,
            "null",
            DISCOVERY,
            "false",
            "true",
            "{}",
            STARTED_FOO_BAR,
            r#"[{"msg:"something"}]"#,
            "some random text",
            FINISHED_FOO_BAR,
            STARTED_QUX,
        ]);
        assert_eq!(result, extract(&[PREAMBLE, DISCOVERY, STARTED_FOO_BAR, FINISHED_FOO_BAR, STARTED_QUX]));
    }

    #[test]
    fn test_ignores_marker_lines_that_are_not_objects() {
        let result = extract(&[
            DISCOVERY,
            r#"["Repository started", {"repository":"foo/bar"}]"#,
            r#"{"repository":"foo/bar","msg":"Repository started""#,
        ])
        .unwrap();
        assert_eq!(result[0].state, ProgressState::Pending);
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let log = [DISCOVERY, STARTED_FOO_BAR].join("\r\n");
        let result = extract_progress(&log, &ProgressOptions::default()).unwrap();
        assert_eq!(result[0].state, ProgressState::Started);
    }

    #[test]
    fn test_sets_repository_url_from_base() {
        let options = ProgressOptions::with_base_url(Url::parse("https://gitlab.example.com").unwrap());
        let log = [PREAMBLE, DISCOVERY, STARTED_FOO_BAR].join("\n");
        let result = extract_progress(&log, &options);
        assert_eq!(
            result,
            Some(vec![
                ProgressItem::pending("foo/bar")
                    .with_state(ProgressState::Started)
                    .with_url("https://gitlab.example.com/foo/bar"),
                ProgressItem::pending("foo/baz/qux").with_url("https://gitlab.example.com/foo/baz/qux"),
                ProgressItem::pending("random").with_url("https://gitlab.example.com/random"),
            ])
        );
    }

    #[test]
    fn test_options_from_config() {
        let config = ProgressConfig {
            repository_base_url: Some("https://example.com".to_string()),
        };
        let options = ProgressOptions::from_config(&config).unwrap();
        assert_eq!(
            options.repository_base_url.map(String::from).as_deref(),
            Some("https://example.com/")
        );

        let config = ProgressConfig {
            repository_base_url: Some("not a url".to_string()),
        };
        assert!(ProgressOptions::from_config(&config).is_err());
        assert!(ProgressOptions::from_config(&ProgressConfig::default())
            .unwrap()
            .repository_base_url
            .is_none());
    }

    #[test]
    fn test_incremental_matches_batch() {
        let options = ProgressOptions::default();
        let mut extractor = ProgressExtractor::new(&options);
        for line in [PREAMBLE, DISCOVERY, STARTED_FOO_BAR] {
            extractor.push_line(line);
        }
        assert_eq!(extractor.finish(), extract(&[PREAMBLE, DISCOVERY, STARTED_FOO_BAR]));
    }
}
