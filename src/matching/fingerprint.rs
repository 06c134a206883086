use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::fraction::Fraction;
use crate::core::tree::Node;
use crate::core::types::SubmissionPair;
use crate::matching::engine::{compare_nodes, compare_to_placeholder};

/// Splits a tree into independently comparable fragments
pub trait Fingerprinter: Send + Sync {
    fn fingerprints<'t>(&self, tree: &'t Node) -> Vec<&'t Node>;
}

/// One fingerprint per direct child of the root (statement or declaration).
///
/// A leaf root is its own single fingerprint; an empty composite root has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevelFingerprinter;

impl Fingerprinter for TopLevelFingerprinter {
    fn fingerprints<'t>(&self, tree: &'t Node) -> Vec<&'t Node> {
        match tree {
            Node::Leaf(_) => vec![tree],
            Node::Ordered(children) | Node::Unordered(children) => children.iter().collect(),
        }
    }
}

/// How fingerprint-level scores are folded into one directional score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationPolicy {
    /// Each fingerprint counts once, with its strongest counterpart on the other side
    #[default]
    BestMatch,
    /// Every fingerprint pair contributes
    MergeAll,
}

/// How much of `xs` is matched by `ys`.
///
/// A fingerprint with nothing on the other side is scored against the
/// placeholder, so it counts as entirely unmatched.
#[must_use]
pub fn percent_matched(xs: &[&Node], ys: &[&Node], policy: AggregationPolicy) -> Fraction {
    match policy {
        AggregationPolicy::BestMatch => {
            Fraction::merge_all(xs.iter().map(|x| best_counterpart(x, ys)))
        }
        AggregationPolicy::MergeAll => Fraction::merge_all(xs.iter().map(|x| {
            if ys.is_empty() {
                compare_to_placeholder(x)
            } else {
                Fraction::merge_all(ys.iter().map(|y| compare_nodes(x, y)))
            }
        })),
    }
}

/// Directional scores for a pair: (A matched by B, B matched by A)
#[must_use]
pub fn detect(
    pair: &SubmissionPair,
    fingerprints_a: &[&Node],
    fingerprints_b: &[&Node],
    policy: AggregationPolicy,
) -> (Fraction, Fraction) {
    let a_matched = percent_matched(fingerprints_a, fingerprints_b, policy);
    let b_matched = percent_matched(fingerprints_b, fingerprints_a, policy);

    debug!(
        pair = %pair,
        fingerprints_a = fingerprints_a.len(),
        fingerprints_b = fingerprints_b.len(),
        a_matched = %a_matched,
        b_matched = %b_matched,
        "Scored submission pair"
    );

    (a_matched, b_matched)
}

fn best_counterpart(x: &Node, ys: &[&Node]) -> Fraction {
    ys.iter()
        .map(|y| compare_nodes(x, y))
        .reduce(stronger)
        .unwrap_or_else(|| compare_to_placeholder(x))
}

/// Higher ratio wins; on equal ratios the score backed by more compared units wins.
/// Full ties keep the earlier score.
fn stronger(current: Fraction, candidate: Fraction) -> Fraction {
    let ratio = |f: &Fraction| f.percent().unwrap_or(0.0);
    let (current_ratio, candidate_ratio) = (ratio(&current), ratio(&candidate));

    if candidate_ratio > current_ratio
        || (candidate_ratio == current_ratio && candidate.total > current.total)
    {
        candidate
    } else {
        current
    }
}
