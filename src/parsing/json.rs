use serde::Deserialize;

use crate::core::tree::{Node, SyntaxTree};
use crate::parsing::{ParseError, TreeParser};

/// Grammar assigned to bare trees when no other is configured
pub const DEFAULT_GRAMMAR: &str = "generic";

/// Accepted document shapes: a full tree with its grammar, or a bare root node
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeDocument {
    Tagged(SyntaxTree),
    Bare(Node),
}

/// Reads trees serialized by an out-of-process grammar parser.
///
/// ```text
/// {"grammar": "java", "root": {"ordered": [{"leaf": "int"}, {"leaf": "x"}]}}
/// {"unordered": [{"leaf": "a"}, {"leaf": "b"}]}
/// ```
///
/// Bare roots are stamped with the parser's default grammar.
#[derive(Debug, Clone)]
pub struct JsonTreeParser {
    grammar: String,
}

impl JsonTreeParser {
    pub fn new(grammar: impl Into<String>) -> Self {
        Self {
            grammar: grammar.into(),
        }
    }
}

impl Default for JsonTreeParser {
    fn default() -> Self {
        Self::new(DEFAULT_GRAMMAR)
    }
}

impl TreeParser for JsonTreeParser {
    fn grammar(&self) -> &str {
        &self.grammar
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tree = match serde_json::from_str(source)? {
            TreeDocument::Tagged(tree) => tree,
            TreeDocument::Bare(root) => SyntaxTree::new(self.grammar.clone(), root),
        };
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_tagged_tree() {
        let parser = JsonTreeParser::default();
        let tree = parser
            .parse(r#"{"grammar": "java", "root": {"ordered": [{"leaf": "int"}, {"leaf": "x"}]}}"#)
            .unwrap();
        assert_eq!(tree.grammar, "java");
        assert_eq!(
            tree.root,
            Node::ordered([Node::leaf("int"), Node::leaf("x")])
        );
    }

    #[test]
    fn test_parse_bare_tree_uses_default_grammar() {
        let parser = JsonTreeParser::new("python");
        let tree = parser
            .parse(r#"{"unordered": [{"leaf": "a"}, {"leaf": "a"}]}"#)
            .unwrap();
        assert_eq!(tree.grammar, "python");
        assert_eq!(tree.root.len(), 2);
    }

    #[test]
    fn test_parse_rejects_null_child() {
        let parser = JsonTreeParser::default();
        let result = parser.parse(r#"{"ordered": [{"leaf": "a"}, null]}"#);
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let parser = JsonTreeParser::default();
        assert!(parser.parse(r#"{"set": []}"#).is_err());
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"{{"leaf": "x"}}"#).unwrap();
        file.flush().unwrap();

        let tree = JsonTreeParser::default().parse_file(file.path()).unwrap();
        assert_eq!(tree.root, Node::leaf("x"));
        assert_eq!(tree.grammar, DEFAULT_GRAMMAR);
    }

    #[test]
    fn test_parse_empty_file() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let result = JsonTreeParser::default().parse_file(file.path());
        assert!(matches!(result, Err(ParseError::Invalid(_))));
    }
}
