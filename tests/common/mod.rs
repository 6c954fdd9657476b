//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use foreman::{DomainError, DomainResult, LogSource, PodPhase, PodRef};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// One NDJSON record as Renovate would log it.
pub fn record(fields: serde_json::Value) -> String {
    let mut object = serde_json::json!({
        "name": "renovate",
        "hostname": "renovate-job-1",
        "pid": 7,
        "level": 30,
        "logContext": "f00d",
        "time": "2024-07-12T17:00:20.861Z",
        "v": 0,
    });
    if let (Some(base), serde_json::Value::Object(extra)) = (object.as_object_mut(), fields) {
        base.extend(extra);
    }
    object.to_string()
}

pub fn discovery(repositories: &[&str]) -> String {
    record(serde_json::json!({
        "repositories": repositories,
        "msg": "Autodiscovered repositories",
    }))
}

pub fn started(repository: &str) -> String {
    record(serde_json::json!({ "repository": repository, "msg": "Repository started" }))
}

pub fn finished(repository: &str) -> String {
    record(serde_json::json!({
        "repository": repository,
        "msg": "Repository finished",
        "cloned": true,
        "durationMs": 1234,
    }))
}

/// In-memory [`LogSource`] that counts calls and can be made slow or failing.
#[derive(Default)]
pub struct MockLogSource {
    phases: Mutex<HashMap<PodRef, PodPhase>>,
    logs: Mutex<HashMap<PodRef, String>>,
    fetch_delay: Option<Duration>,
    failing: AtomicBool,
    pub phase_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn set_pod(&self, pod: &PodRef, phase: PodPhase, logs: &str) {
        self.phases.lock().unwrap().insert(pod.clone(), phase);
        self.logs.lock().unwrap().insert(pod.clone(), logs.to_string());
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn phase_lookups(&self) -> usize {
        self.phase_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn pod_phase(&self, pod: &PodRef) -> DomainResult<Option<PodPhase>> {
        self.phase_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.phases.lock().unwrap().get(pod).copied())
    }

    async fn fetch_logs(&self, pod: &PodRef) -> DomainResult<String> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::LogSource("connection reset".to_string()));
        }
        self.logs
            .lock()
            .unwrap()
            .get(pod)
            .cloned()
            .ok_or_else(|| DomainError::PodNotFound(pod.to_string()))
    }
}
