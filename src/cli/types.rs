//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::pretty::PrettyArgs;
use super::commands::progress::ProgressArgs;

#[derive(Parser, Debug)]
#[command(name = "foreman")]
#[command(about = "Foreman - Renovate job log inspection", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .foreman/
    #[arg(short, long, global = true, env = "FOREMAN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show per-repository progress of a Renovate run
    Progress(ProgressArgs),

    /// Render a Renovate log for humans
    Pretty(PrettyArgs),
}
