//! # structsim
//!
//! A library for measuring how structurally similar two pieces of source code
//! are, for plagiarism and originality checks across many submissions.
//!
//! Each submission is parsed (outside this crate) into a syntax tree made of
//! three kinds of node: leaf tokens, ordered sequences and unordered
//! collections. `structsim` compares two trees recursively and returns an
//! exact `(matches, total)` [`Fraction`] rather than a bare percentage, so
//! that scores of sub-trees compose by weight.
//!
//! ## Features
//!
//! - **Positional matching** for ordered children, padded when lengths differ
//! - **Fuzzy multiset matching** for unordered children, rewarding strong pairs
//!   without searching for an optimal assignment
//! - **Directional scores**: how much of A is found in B, and of B in A
//! - **Batch detection** over every pair of a submission set, in parallel,
//!   with per-pair failure isolation
//!
//! ## Example
//!
//! ```rust
//! use structsim::{compare, Node, SyntaxTree};
//!
//! let a = SyntaxTree::new("java", Node::unordered([Node::leaf("A"), Node::leaf("B")]));
//! let b = SyntaxTree::new("java", Node::unordered([Node::leaf("B"), Node::leaf("A")]));
//!
//! let score = compare(&a, &b).unwrap();
//! assert_eq!(score.percent().unwrap(), 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Fractions, trees and submission identities
//! - [`matching`]: Comparison engine and fingerprint aggregation
//! - [`detector`]: Detector contract, structural detector and batch driver
//! - [`parsing`]: Parser contract and JSON tree reader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod detector;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::fraction::Fraction;
pub use crate::core::tree::{Node, NodeKind, SyntaxTree};
pub use crate::core::types::{SubmissionId, SubmissionPair};
pub use crate::detector::syntax_tree::SyntaxTreeDetector;
pub use crate::detector::{AlgorithmResults, DetectorConfig, SimilarityDetector};
pub use crate::matching::engine::{compare, compare_nodes, EngineError};
