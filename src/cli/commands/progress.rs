//! `foreman progress`: per-repository progress of a Renovate run.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use url::Url;

use super::{open_input, read_line_lossy};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, ProgressItem, ProgressState};
use crate::services::{ProgressExtractor, ProgressOptions};

#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Renovate NDJSON log file, or `-` for stdin
    pub input: PathBuf,

    /// Base URL repository names are resolved against (overrides config)
    #[arg(long)]
    pub repository_base_url: Option<Url>,
}

#[derive(Debug, Serialize)]
pub struct ProgressOutput {
    pub repositories: Vec<ProgressItem>,
    pub pending: usize,
    pub started: usize,
    pub finished: usize,
}

impl ProgressOutput {
    pub fn new(repositories: Vec<ProgressItem>) -> Self {
        let count = |state| repositories.iter().filter(|item| item.state == state).count();
        Self {
            pending: count(ProgressState::Pending),
            started: count(ProgressState::Started),
            finished: count(ProgressState::Finished),
            repositories,
        }
    }
}

impl CommandOutput for ProgressOutput {
    fn to_human(&self) -> String {
        if self.repositories.is_empty() {
            return "Discovery found no repositories.".to_string();
        }
        format!(
            "{}\n{} repositories: {} pending, {} started, {} finished",
            TableFormatter::new().format_progress(&self.repositories),
            self.repositories.len(),
            self.pending,
            self.started,
            self.finished,
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ProgressArgs, config: &Config, json_mode: bool) -> Result<()> {
    let options = match args.repository_base_url {
        Some(url) => ProgressOptions::with_base_url(url),
        None => ProgressOptions::from_config(&config.progress)
            .context("Invalid progress.repository_base_url")?,
    };

    let mut reader = open_input(&args.input).await?;
    let mut buf = Vec::new();
    let mut extractor = ProgressExtractor::new(&options);
    let mut line_count = 0_usize;
    while let Some(line) = read_line_lossy(&mut reader, &mut buf)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?
    {
        extractor.push_line(&line);
        line_count += 1;
    }

    let Some(repositories) = extractor.finish() else {
        bail!(
            "No repository discovery found in {} ({line_count} lines read)",
            args.input.display()
        );
    };
    info!(lines = line_count, repositories = repositories.len(), "extracted progress");

    output(&ProgressOutput::new(repositories), json_mode);
    Ok(())
}
