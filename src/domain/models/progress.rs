//! Per-repository progress of a Renovate run.

use serde::{Deserialize, Serialize};

/// Processing state of one repository within a run.
///
/// Only advances `Pending -> Started -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressState {
    /// Discovered, not yet picked up
    #[default]
    Pending,
    /// Processing has begun
    Started,
    /// Processing completed
    Finished,
}

impl ProgressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for ProgressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single repository, as reported to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    /// Repository path, unique within a run (e.g. `group/project`)
    pub repository: String,
    /// Link to the repository on its hosting platform, when a base URL is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Current processing state
    pub state: ProgressState,
}

impl ProgressItem {
    /// A freshly discovered repository.
    pub fn pending(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            repository_url: None,
            state: ProgressState::Pending,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: ProgressState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }
}
