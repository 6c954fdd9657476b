//! `foreman pretty`: human-readable rendering of a Renovate log.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_input, read_to_string_lossy};
use crate::cli::output::{output, CommandOutput};
use crate::services::prettify_logs_async;

#[derive(Args, Debug)]
pub struct PrettyArgs {
    /// Renovate NDJSON log file, or `-` for stdin
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct PrettyOutput {
    pub text: String,
}

impl CommandOutput for PrettyOutput {
    fn to_human(&self) -> String {
        self.text.trim_end_matches('\n').to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PrettyArgs, json_mode: bool) -> Result<()> {
    let mut reader = open_input(&args.input).await?;
    let logs = read_to_string_lossy(&mut reader)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let text = prettify_logs_async(&logs).await;
    output(&PrettyOutput { text }, json_mode);
    Ok(())
}
