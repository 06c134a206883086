//! Similarity detectors: the boundary between the engine and a submission pipeline.
//!
//! - [`SimilarityDetector`]: contract a detector registry consumes
//! - [`syntax_tree::SyntaxTreeDetector`]: the structural detector built on the engine
//! - [`batch::detect_all`]: every pair of a submission set, in parallel
//!
//! ## Example
//!
//! ```rust
//! use structsim::core::{Node, SubmissionPair, SyntaxTree};
//! use structsim::detector::{DetectorConfig, SimilarityDetector};
//! use structsim::detector::syntax_tree::SyntaxTreeDetector;
//!
//! let detector = SyntaxTreeDetector::new(DetectorConfig::default());
//! let a = SyntaxTree::new("java", Node::ordered([Node::leaf("x")]));
//! let b = SyntaxTree::new("java", Node::ordered([Node::leaf("x"), Node::leaf("y")]));
//!
//! let results = detector
//!     .detect_similarity(&SubmissionPair::new("alice", "bob"), &a, &b)
//!     .unwrap();
//! assert_eq!(results.percent_a().unwrap(), 1.0);
//! assert_eq!(results.percent_b().unwrap(), 0.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::fraction::Fraction;
use crate::core::tree::SyntaxTree;
use crate::core::types::SubmissionPair;
use crate::matching::engine::EngineError;
use crate::matching::fingerprint::AggregationPolicy;
use crate::parsing::json::DEFAULT_GRAMMAR;
use crate::parsing::{ParseError, TreeParser};
use crate::utils::validation::MAX_TREE_DEPTH;

pub mod batch;
pub mod syntax_tree;

/// A pluggable similarity detection strategy
pub trait SimilarityDetector: Send + Sync {
    /// Short identifier used to select the detector
    fn name(&self) -> &str;

    /// Factory for the component that turns raw submissions into trees
    fn parser(&self) -> Box<dyn TreeParser>;

    /// Score a pair of parsed submissions in both directions
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the two trees cannot be compared.
    fn detect_similarity(
        &self,
        pair: &SubmissionPair,
        a: &SyntaxTree,
        b: &SyntaxTree,
    ) -> Result<AlgorithmResults, EngineError>;
}

/// Directional scores for one submission pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResults {
    /// The pair the scores belong to
    pub pair: SubmissionPair,

    /// How much of A's content is matched by B
    pub a_matched_by_b: Fraction,

    /// How much of B's content is matched by A
    pub b_matched_by_a: Fraction,

    /// Both trees share a structural signature
    pub identical: bool,
}

impl AlgorithmResults {
    /// Fraction of A matched by B
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ZeroDenominator` if A had nothing to compare.
    pub fn percent_a(&self) -> Result<f64, EngineError> {
        self.a_matched_by_b.percent()
    }

    /// Fraction of B matched by A
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ZeroDenominator` if B had nothing to compare.
    pub fn percent_b(&self) -> Result<f64, EngineError> {
        self.b_matched_by_a.percent()
    }

    /// The same result seen from the other side of the pair
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            pair: self.pair.reversed(),
            a_matched_by_b: self.b_matched_by_a,
            b_matched_by_a: self.a_matched_by_b,
            identical: self.identical,
        }
    }
}

/// Configuration for the structural detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// How fingerprint scores are folded into a directional score
    pub aggregation: AggregationPolicy,

    /// Trees deeper than this are rejected before comparison
    pub max_depth: usize,

    /// Grammar assigned to serialized trees that do not name one
    pub default_grammar: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationPolicy::default(),
            max_depth: MAX_TREE_DEPTH,
            default_grammar: DEFAULT_GRAMMAR.to_string(),
        }
    }
}

impl DetectorConfig {
    /// Parse configuration from a JSON string; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::Json` if it is not a valid configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
