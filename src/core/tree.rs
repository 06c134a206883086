use serde::{Deserialize, Serialize};

use crate::matching::engine::EngineError;

/// Structural kind of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Leaf,
    Ordered,
    Unordered,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf => write!(f, "leaf"),
            Self::Ordered => write!(f, "ordered"),
            Self::Unordered => write!(f, "unordered"),
        }
    }
}

/// One node of a parsed syntax tree.
///
/// There is no placeholder variant: "no counterpart here" only exists while
/// comparing, where the engine represents it as an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// A token, compared by exact string equality
    Leaf(String),

    /// Children whose position is significant (statements, parameters)
    Ordered(Vec<Node>),

    /// Children whose position carries no meaning (member declarations).
    ///
    /// Stored in insertion order; duplicates are kept as distinct entries.
    Unordered(Vec<Node>),
}

impl Node {
    pub fn leaf(token: impl Into<String>) -> Self {
        Self::Leaf(token.into())
    }

    pub fn ordered(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Ordered(children.into_iter().collect())
    }

    pub fn unordered(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Unordered(children.into_iter().collect())
    }

    /// Build an ordered node from parser output that may contain holes.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingChild` with the index of the first absent child.
    pub fn try_ordered(
        children: impl IntoIterator<Item = Option<Node>>,
    ) -> Result<Self, EngineError> {
        collect_children(children).map(Self::Ordered)
    }

    /// Build an unordered node from parser output that may contain holes.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingChild` with the index of the first absent child.
    pub fn try_unordered(
        children: impl IntoIterator<Item = Option<Node>>,
    ) -> Result<Self, EngineError> {
        collect_children(children).map(Self::Unordered)
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Leaf(_) => NodeKind::Leaf,
            Self::Ordered(_) => NodeKind::Ordered,
            Self::Unordered(_) => NodeKind::Unordered,
        }
    }

    /// Direct children; empty for a leaf
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Leaf(_) => &[],
            Self::Ordered(children) | Self::Unordered(children) => children,
        }
    }

    /// Token of a leaf
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Leaf(token) => Some(token),
            _ => None,
        }
    }

    /// Number of direct children
    #[must_use]
    pub fn len(&self) -> usize {
        self.children().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Height of the tree; a lone leaf has depth 1.
    ///
    /// Walks with an explicit stack so that it can be used to reject
    /// pathologically deep input before anything recurses over it.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Total number of nodes, including this one
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

fn collect_children(
    children: impl IntoIterator<Item = Option<Node>>,
) -> Result<Vec<Node>, EngineError> {
    children
        .into_iter()
        .enumerate()
        .map(|(index, child)| child.ok_or(EngineError::MissingChild { index }))
        .collect()
}

/// S-expression rendering: `(a b)` for ordered, `{a b}` for unordered
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (open, close, children) = match self {
            Self::Leaf(token) => return write!(f, "{token}"),
            Self::Ordered(children) => ('(', ')', children),
            Self::Unordered(children) => ('{', '}', children),
        };
        write!(f, "{open}")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, "{close}")
    }
}

/// A submission's parsed tree together with the grammar that produced it.
///
/// Trees built by different grammars use unrelated token vocabularies and
/// cannot be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    /// Identifier of the grammar / token vocabulary (e.g. "java")
    pub grammar: String,

    /// Root node
    pub root: Node,
}

impl SyntaxTree {
    pub fn new(grammar: impl Into<String>, root: Node) -> Self {
        Self {
            grammar: grammar.into(),
            root,
        }
    }
}

impl std::fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.grammar, self.root)
    }
}
