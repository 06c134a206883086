//! Structural comparison engine and fingerprint aggregation.
//!
//! - [`engine::compare`]: score two whole trees as one [`Fraction`](crate::core::Fraction)
//! - [`fingerprint::detect`]: directional scores over fingerprint sets
//!
//! ## Comparison rules
//!
//! | left \ right | Leaf | Ordered | Unordered | Placeholder |
//! |--------------|------|---------|-----------|-------------|
//! | Leaf | 1/1 if equal, else 0/1 | 0/1 | 0/1 | 0/1 |
//! | Ordered | 0/1 | positional zip | all children vs placeholder | children vs placeholder |
//! | Unordered | 0/1 | all children vs placeholder | fuzzy multiset | children vs placeholder |
//! | Placeholder | 0/1 | children vs placeholder | children vs placeholder | 0/0 |
//!
//! The placeholder stands in for "no counterpart here" and only appears
//! while zipping sequences of unequal length.
//!
//! ## Example
//!
//! ```rust
//! use structsim::core::{Node, SyntaxTree};
//! use structsim::matching::engine::compare;
//!
//! let a = SyntaxTree::new("java", Node::ordered([Node::leaf("A"), Node::leaf("B")]));
//! let b = SyntaxTree::new("java", Node::ordered([Node::leaf("A"), Node::leaf("C")]));
//!
//! let score = compare(&a, &b).unwrap();
//! assert_eq!((score.matches, score.total), (1.0, 2.0));
//! ```

pub mod engine;
pub mod fingerprint;

pub use engine::EngineError;
