//! Detect command - score every pair of a set of submissions.
//!
//! Each submission is a JSON syntax tree. A pair that cannot be scored (for
//! example, trees from different grammars) is reported and skipped; the rest
//! of the batch still runs.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{ConfigArgs, OutputFormat};
use crate::detector::batch::{detect_all, PairOutcome, Submission};
use crate::detector::syntax_tree::SyntaxTreeDetector;
use crate::detector::SimilarityDetector;
use crate::matching::fingerprint::AggregationPolicy;

/// Arguments for the detect command
#[derive(Args)]
pub struct DetectArgs {
    /// Submission trees (JSON), at least two
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<PathBuf>,

    /// How fingerprint scores are aggregated (overrides the config file)
    #[arg(long, value_enum)]
    pub aggregation: Option<AggregationPolicy>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute the detect command
///
/// # Errors
///
/// Returns an error if the configuration or any submission cannot be loaded.
/// Pairs that fail to score are reported in the output, not as an error.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: DetectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.resolve(args.aggregation)?;
    let detector = SyntaxTreeDetector::new(config);
    let parser = detector.parser();

    if verbose {
        eprintln!(
            "Detector: {} ({:?} aggregation, max depth {})",
            detector.name(),
            detector.config().aggregation,
            detector.config().max_depth,
        );
    }

    let submissions = args
        .inputs
        .iter()
        .map(|path| {
            let tree = parser
                .parse_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", path.display()))?;
            Ok(Submission::new(path.display().to_string(), tree))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let outcomes = detect_all(&detector, &submissions)?;

    if verbose {
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        eprintln!(
            "Scored {} pairs ({failed} skipped)",
            outcomes.len() - failed
        );
    }

    match format {
        OutputFormat::Text => print_text_results(&outcomes),
        OutputFormat::Json => print_json_results(&outcomes)?,
    }

    Ok(())
}

fn format_percent(percent: Option<f64>) -> String {
    percent.map_or_else(|| "n/a".to_string(), |p| format!("{:.2}%", p * 100.0))
}

fn print_text_results(outcomes: &[PairOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(results) => {
                let identical = if results.identical { " [identical]" } else { "" };
                println!(
                    "{} vs {}: {} of A matched by B, {} of B matched by A{identical}",
                    outcome.pair.a,
                    outcome.pair.b,
                    format_percent(results.percent_a().ok()),
                    format_percent(results.percent_b().ok()),
                );
            }
            Err(e) => {
                println!("{} vs {}: skipped ({e})", outcome.pair.a, outcome.pair.b);
            }
        }
    }
}

fn print_json_results(outcomes: &[PairOutcome]) -> anyhow::Result<()> {
    let rows: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(results) => serde_json::json!({
                "a": outcome.pair.a,
                "b": outcome.pair.b,
                "a_matched_by_b": results.a_matched_by_b,
                "b_matched_by_a": results.b_matched_by_a,
                "percent_a": results.percent_a().ok(),
                "percent_b": results.percent_b().ok(),
                "identical": results.identical,
            }),
            Err(e) => serde_json::json!({
                "a": outcome.pair.a,
                "b": outcome.pair.b,
                "error": e.to_string(),
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
