//! Command-line interface for structsim.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compare**: Score two serialized syntax trees against each other
//! - **detect**: Run the structural detector over every pair of submissions
//!
//! ## Usage
//!
//! ```text
//! # Whole-tree score of two submissions
//! structsim compare alice.json bob.json
//!
//! # Directional percentages for every pair, as JSON
//! structsim detect submissions/*.json --format json
//!
//! # Count every fingerprint pair instead of the best counterpart
//! structsim detect submissions/*.json --aggregation merge-all
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::detector::DetectorConfig;
use crate::matching::fingerprint::AggregationPolicy;

pub mod compare;
pub mod detect;

#[derive(Parser)]
#[command(name = "structsim")]
#[command(version)]
#[command(about = "Structural similarity of syntax trees for plagiarism detection")]
#[command(
    long_about = "structsim compares submissions by the shape of their syntax trees.\n\nTrees are read as JSON documents produced by a language parser. Every pair of submissions gets two percentages: how much of the first is matched by the second, and the reverse."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score two syntax trees against each other
    Compare(compare::CompareArgs),

    /// Detect similarity between every pair of submissions
    Detect(detect::DetectArgs),
}

/// Options shared by commands that build a detector configuration
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Path to a JSON detector configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grammar assigned to trees that do not name one
    #[arg(long)]
    pub grammar: Option<String>,

    /// Maximum tree depth accepted
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl ConfigArgs {
    /// Load the configuration file (if any), then apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn resolve(
        &self,
        aggregation: Option<AggregationPolicy>,
    ) -> anyhow::Result<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::load_from_file(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(grammar) = &self.grammar {
            config.default_grammar.clone_from(grammar);
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(aggregation) = aggregation {
            config.aggregation = aggregation;
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
