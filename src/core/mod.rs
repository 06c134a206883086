//! Core data types for structural similarity.
//!
//! - [`Fraction`]: a `(matches, total)` score that composes under merging
//! - [`Node`], [`SyntaxTree`]: the immutable parsed representation of a submission
//! - [`SubmissionId`], [`SubmissionPair`]: opaque identities threaded through results
//!
//! ## Node kinds
//!
//! | Kind | Children | Compared |
//! |------|----------|----------|
//! | Leaf | none | by exact token equality |
//! | Ordered | sequence | position by position |
//! | Unordered | multiset | every child against every child |

pub mod fraction;
pub mod tree;
pub mod types;

pub use fraction::Fraction;
pub use tree::{Node, NodeKind, SyntaxTree};
pub use types::{SubmissionId, SubmissionPair};
