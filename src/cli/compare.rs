use std::path::PathBuf;

use clap::Args;

use crate::cli::{ConfigArgs, OutputFormat};
use crate::core::fraction::Fraction;
use crate::core::tree::SyntaxTree;
use crate::matching::engine::compare_with_limit;
use crate::parsing::json::JsonTreeParser;
use crate::parsing::TreeParser;

#[derive(Args)]
pub struct CompareArgs {
    /// First submission tree (JSON)
    #[arg(required = true)]
    pub input_a: PathBuf,

    /// Second submission tree (JSON)
    #[arg(required = true)]
    pub input_b: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute the compare command
///
/// # Errors
///
/// Returns an error if either input cannot be parsed, the trees cannot be
/// compared, or nothing was compared at all.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.resolve(None)?;
    let parser = JsonTreeParser::new(config.default_grammar.clone());

    let tree_a = parser.parse_file(&args.input_a)?;
    let tree_b = parser.parse_file(&args.input_b)?;

    if verbose {
        eprintln!(
            "Input A: {} nodes, depth {} ({})",
            tree_a.root.node_count(),
            tree_a.root.depth(),
            tree_a.grammar
        );
        eprintln!(
            "Input B: {} nodes, depth {} ({})",
            tree_b.root.node_count(),
            tree_b.root.depth(),
            tree_b.grammar
        );
    }

    let score = compare_with_limit(&tree_a, &tree_b, config.max_depth)?;
    let similarity = score.percent()?;

    match format {
        OutputFormat::Text => print_text_comparison(&args, &tree_a, &tree_b, &score, similarity),
        OutputFormat::Json => print_json_comparison(&args, &tree_a, &tree_b, &score, similarity)?,
    }

    Ok(())
}

fn print_text_comparison(
    args: &CompareArgs,
    tree_a: &SyntaxTree,
    tree_b: &SyntaxTree,
    score: &Fraction,
    similarity: f64,
) {
    println!("Structural Comparison");
    println!("{}", "=".repeat(60));

    println!("\nInput A: {}", args.input_a.display());
    println!("  Nodes: {}", tree_a.root.node_count());
    println!("\nInput B: {}", args.input_b.display());
    println!("  Nodes: {}", tree_b.root.node_count());

    println!("\n  Score: {score}");
    println!("  Similarity: {:.2}%", similarity * 100.0);
}

fn print_json_comparison(
    args: &CompareArgs,
    tree_a: &SyntaxTree,
    tree_b: &SyntaxTree,
    score: &Fraction,
    similarity: f64,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input_a": {
            "path": args.input_a.display().to_string(),
            "grammar": tree_a.grammar,
            "nodes": tree_a.root.node_count(),
        },
        "input_b": {
            "path": args.input_b.display().to_string(),
            "grammar": tree_b.grammar,
            "nodes": tree_b.root.node_count(),
        },
        "score": {
            "matches": score.matches,
            "total": score.total,
            "similarity": similarity,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
