//! Turning submissions into [`SyntaxTree`]s.
//!
//! Grammar-specific parsers live outside this crate; they only have to
//! implement [`TreeParser`]. The bundled [`json::JsonTreeParser`] reads trees
//! that such a parser has already serialized.

use std::path::Path;

use thiserror::Error;

use crate::core::tree::SyntaxTree;
use crate::utils::validation::{validate_submission_content, ValidationError};

pub mod json;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid submission content: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Invalid tree document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Produces a finite, acyclic [`SyntaxTree`] from a submission's text
pub trait TreeParser: Send + Sync {
    /// Grammar identifier stamped on every tree this parser produces
    fn grammar(&self) -> &str;

    /// Parse one submission
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when the text cannot be turned into a tree.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Read, validate and parse a submission file
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read,
    /// `ParseError::Invalid` if the content fails validation, or the error of
    /// [`TreeParser::parse`].
    fn parse_file(&self, path: &Path) -> Result<SyntaxTree, ParseError> {
        let content = std::fs::read(path)?;
        let text = validate_submission_content(&content)?;
        self.parse(text)
    }
}
