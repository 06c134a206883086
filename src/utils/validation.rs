//! Centralized validation and helper functions.

use crate::core::tree::Node;
use crate::matching::engine::EngineError;

/// Maximum tree depth accepted by the engine.
///
/// Comparison recurses once per level, so this must stay within what a
/// default 2 MiB thread stack handles in an unoptimised build.
pub const MAX_TREE_DEPTH: usize = 512;

/// Stack size of the worker threads used for batch detection
pub const BATCH_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Maximum number of submissions in a single batch.
///
/// Pairwise detection is quadratic in the number of submissions.
pub const MAX_SUBMISSIONS: usize = 10_000;

/// Maximum size of a serialized submission tree in bytes
pub const MAX_SUBMISSION_SIZE: usize = 64 * 1024 * 1024;

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Submission content is empty")]
    EmptyContent,
    #[error("Submission content too large: {0} bytes exceeds maximum of {MAX_SUBMISSION_SIZE}")]
    ContentTooLarge(usize),
    #[error("Submission content appears malformed or invalid")]
    InvalidFileContent,
}

/// Reject trees deeper than `max_depth` before anything recurses over them.
///
/// # Errors
///
/// Returns `EngineError::TooDeep` with the measured depth.
pub fn check_depth(node: &Node, max_depth: usize) -> Result<(), EngineError> {
    let depth = node.depth();
    if depth > max_depth {
        return Err(EngineError::TooDeep {
            depth,
            max: max_depth,
        });
    }
    Ok(())
}

/// Check if a batch would exceed the maximum number of submissions.
///
/// Returns an error message if the limit is exceeded, None if safe.
#[must_use]
pub fn check_submission_limit(count: usize) -> Option<String> {
    if count > MAX_SUBMISSIONS {
        Some(format!(
            "Too many submissions: {count} exceeds maximum of {MAX_SUBMISSIONS}"
        ))
    } else {
        None
    }
}

/// Validate raw submission content before handing it to a parser
///
/// # Errors
///
/// Returns `ValidationError::EmptyContent` for blank input,
/// `ValidationError::ContentTooLarge` past [`MAX_SUBMISSION_SIZE`], or
/// `ValidationError::InvalidFileContent` if the bytes are not UTF-8 text.
pub fn validate_submission_content(content: &[u8]) -> Result<&str, ValidationError> {
    if content.len() > MAX_SUBMISSION_SIZE {
        return Err(ValidationError::ContentTooLarge(content.len()));
    }
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::EmptyContent);
    }
    std::str::from_utf8(content).map_err(|_| ValidationError::InvalidFileContent)
}

/// Compute a structural signature of a tree.
///
/// The signature is the MD5 of a canonical rendering in which the children
/// of every unordered node are sorted, so two trees that differ only in the
/// storage order of unordered members share a signature.
#[must_use]
pub fn compute_signature(node: &Node) -> String {
    let digest = md5::compute(canonical_form(node).as_bytes());
    format!("{digest:x}")
}

fn canonical_form(node: &Node) -> String {
    match node {
        // Length prefix keeps tokens containing delimiters unambiguous
        Node::Leaf(token) => format!("{}:{token}", token.len()),
        Node::Ordered(children) => {
            let parts: Vec<String> = children.iter().map(canonical_form).collect();
            format!("({})", parts.join(" "))
        }
        Node::Unordered(children) => {
            let mut parts: Vec<String> = children.iter().map(canonical_form).collect();
            parts.sort_unstable();
            format!("{{{}}}", parts.join(" "))
        }
    }
}
