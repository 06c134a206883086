use thiserror::Error;

use crate::core::fraction::{count_to_f64, Fraction};
use crate::core::tree::{Node, SyntaxTree};
use crate::utils::validation::{check_depth, MAX_TREE_DEPTH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Incompatible units: cannot compare a '{left}' tree with a '{right}' tree")]
    IncompatibleUnits { left: String, right: String },

    #[error("Malformed tree: child slot {index} is missing")]
    MissingChild { index: usize },

    #[error("Cannot take a percentage of a score with a zero total")]
    ZeroDenominator,

    #[error("Tree too deep: depth {depth} exceeds maximum of {max}")]
    TooDeep { depth: usize, max: usize },
}

/// Compare two parsed submissions.
///
/// # Errors
///
/// Returns `EngineError::IncompatibleUnits` if the trees come from different
/// grammars, or `EngineError::TooDeep` if either tree exceeds [`MAX_TREE_DEPTH`].
pub fn compare(a: &SyntaxTree, b: &SyntaxTree) -> Result<Fraction, EngineError> {
    compare_with_limit(a, b, MAX_TREE_DEPTH)
}

/// [`compare`] with a caller-chosen depth limit
///
/// # Errors
///
/// See [`compare`].
pub fn compare_with_limit(
    a: &SyntaxTree,
    b: &SyntaxTree,
    max_depth: usize,
) -> Result<Fraction, EngineError> {
    check_compatible(a, b)?;
    check_depth(&a.root, max_depth)?;
    check_depth(&b.root, max_depth)?;
    Ok(compare_nodes(&a.root, &b.root))
}

/// Reject trees built from different token vocabularies
///
/// # Errors
///
/// Returns `EngineError::IncompatibleUnits` when the grammars differ.
pub fn check_compatible(a: &SyntaxTree, b: &SyntaxTree) -> Result<(), EngineError> {
    if a.grammar != b.grammar {
        return Err(EngineError::IncompatibleUnits {
            left: a.grammar.clone(),
            right: b.grammar.clone(),
        });
    }
    Ok(())
}

/// Structural similarity of two nodes.
///
/// Pure and deterministic: the same inputs always produce the same fraction.
#[must_use]
pub fn compare_nodes(a: &Node, b: &Node) -> Fraction {
    compare_slots(Some(a), Some(b))
}

/// Compare a node against the placeholder ("no counterpart here")
#[must_use]
pub fn compare_to_placeholder(node: &Node) -> Fraction {
    compare_slots(Some(node), None)
}

/// Case matrix over the kinds of both slots. `None` is the placeholder.
fn compare_slots(a: Option<&Node>, b: Option<&Node>) -> Fraction {
    match (a, b) {
        (None, None) => Fraction::ZERO,

        (Some(Node::Leaf(x)), Some(Node::Leaf(y))) => {
            if x == y {
                Fraction::MATCH
            } else {
                Fraction::MISMATCH
            }
        }
        (Some(Node::Leaf(_)), _) | (_, Some(Node::Leaf(_))) => Fraction::MISMATCH,

        (Some(Node::Ordered(xs)), Some(Node::Ordered(ys))) => zip_ordered(xs, ys),
        (Some(Node::Unordered(xs)), Some(Node::Unordered(ys))) => fuzzy_multiset(xs, ys),

        (Some(Node::Ordered(xs)), Some(Node::Unordered(ys)))
        | (Some(Node::Unordered(xs)), Some(Node::Ordered(ys))) => mismatched_shapes(xs, ys),

        (Some(composite), None) | (None, Some(composite)) => {
            children_vs_placeholder(composite.children())
        }
    }
}

/// Position-by-position alignment, padding the shorter side with placeholders
fn zip_ordered(xs: &[Node], ys: &[Node]) -> Fraction {
    let width = xs.len().max(ys.len());
    Fraction::merge_all((0..width).map(|i| compare_slots(xs.get(i), ys.get(i))))
}

/// Order-insensitive soft matching of two multisets.
///
/// Every left child is scored against every right child. Each pairwise score
/// has its numerator raised to the fourth power before the row is merged, and
/// the merged row is brought back with a fourth root, so one strong pair
/// outweighs several mediocre ones. The grand total is then rescaled by the
/// average collection size.
fn fuzzy_multiset(xs: &[Node], ys: &[Node]) -> Fraction {
    if xs.is_empty() || ys.is_empty() {
        return children_vs_placeholder(xs).merge(children_vs_placeholder(ys));
    }

    let total = Fraction::merge_all(xs.iter().map(|x| {
        let row = Fraction::merge_all(
            ys.iter()
                .map(|y| compare_nodes(x, y).square_numerator().square_numerator()),
        );
        row.sqrt_numerator().sqrt_numerator()
    }));

    let average_size = (count_to_f64(xs.len()) + count_to_f64(ys.len())) / 2.0;

    // Duplicate near-matches on one side can push matches past the rescaled total
    total.divide_denominator(average_size).capped()
}

/// Ordered against unordered: nothing lines up, so every child on both sides
/// counts as unmatched.
fn mismatched_shapes(xs: &[Node], ys: &[Node]) -> Fraction {
    let width = xs.len().max(ys.len());
    Fraction::merge_all((0..width).map(|i| {
        compare_slots(xs.get(i), None).merge(compare_slots(ys.get(i), None))
    }))
}

fn children_vs_placeholder(children: &[Node]) -> Fraction {
    Fraction::merge_all(children.iter().map(compare_to_placeholder))
}
