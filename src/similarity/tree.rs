// src/similarity/tree.rs
//! Structural similarity between syntax trees.
//!
//! Normalized text is parsed with a tree-sitter reference grammar and copied
//! into an owned arena of named nodes (abstract syntax, no punctuation
//! tokens). A parse containing error or missing nodes is treated as
//! unparseable rather than as a failure.
//!
//! Two trees are scored by walking them in lockstep: each visited node pair
//! contributes 1 when the kinds agree, and children are paired by position.
//! When child lists differ in length only the common prefix is compared, so
//! surplus children on the longer side add nothing. The score therefore
//! counts shared structure and grows with tree size; it is not a percentage.

use crate::error::{CodematchError, ScoreError};
use crate::lang::Grammar;
use tree_sitter::{Node, Parser};

/// One node of a [`SyntaxTree`]: a kind label and ordered child indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: &'static str,
    pub children: Vec<usize>,
}

/// Owned syntax tree stored as an arena; index 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

/// Result of parsing one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(SyntaxTree),
    /// The grammar rejected the text.
    Unparseable,
    /// The tree has more nodes than the configured budget.
    Oversized,
}

impl ParseOutcome {
    #[must_use]
    pub fn tree(&self) -> Option<&SyntaxTree> {
        match self {
            Self::Parsed(tree) => Some(tree),
            Self::Unparseable | Self::Oversized => None,
        }
    }

    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable)
    }
}

/// Creates a parser for `grammar`.
///
/// # Errors
/// Returns [`CodematchError::Grammar`] if the linked grammar is incompatible
/// with the tree-sitter runtime.
pub fn new_parser(grammar: Grammar) -> Result<Parser, CodematchError> {
    let mut parser = Parser::new();
    parser
        .set_language(grammar.language())
        .map_err(|e| CodematchError::Grammar(format!("{grammar}: {e}")))?;
    Ok(parser)
}

impl SyntaxTree {
    /// Parses `text` with `grammar`, refusing trees above `max_nodes`.
    #[must_use]
    pub fn parse(text: &str, grammar: Grammar, max_nodes: usize) -> ParseOutcome {
        let mut parser = match new_parser(grammar) {
            Ok(parser) => parser,
            Err(e) => {
                tracing::warn!(error = %e, "parser unavailable, treating input as unparseable");
                return ParseOutcome::Unparseable;
            }
        };
        let Some(tree) = parser.parse(text, None) else {
            return ParseOutcome::Unparseable;
        };
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!(%grammar, "syntax error in normalized text");
            return ParseOutcome::Unparseable;
        }
        Self::from_node(root, max_nodes).map_or(ParseOutcome::Oversized, ParseOutcome::Parsed)
    }

    fn from_node(root: Node<'_>, max_nodes: usize) -> Option<Self> {
        let mut nodes: Vec<SyntaxNode> = Vec::new();
        let mut pending: Vec<(Node<'_>, Option<usize>)> = vec![(root, None)];

        while let Some((node, parent)) = pending.pop() {
            if nodes.len() >= max_nodes {
                return None;
            }
            let index = nodes.len();
            nodes.push(SyntaxNode {
                kind: node.kind(),
                children: Vec::new(),
            });
            if let Some(parent) = parent.and_then(|p| nodes.get_mut(p)) {
                parent.children.push(index);
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            // reversed so the first child is popped (and numbered) first
            pending.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }

        Some(Self { nodes })
    }

    /// Single-node tree.
    #[must_use]
    pub fn leaf(kind: &'static str) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind,
                children: Vec::new(),
            }],
        }
    }

    /// Tree with `kind` at the root and `children` as ordered subtrees.
    #[must_use]
    pub fn branch(kind: &'static str, children: Vec<SyntaxTree>) -> Self {
        let mut nodes = vec![SyntaxNode {
            kind,
            children: Vec::new(),
        }];
        for child in children {
            let offset = nodes.len();
            if let Some(root) = nodes.first_mut() {
                root.children.push(offset);
            }
            nodes.extend(child.nodes.into_iter().map(|mut node| {
                for c in &mut node.children {
                    *c += offset;
                }
                node
            }));
        }
        Self { nodes }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root(&self) -> Option<&SyntaxNode> {
        self.nodes.first()
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&SyntaxNode> {
        self.nodes.get(index)
    }
}

/// Scores two parse outcomes. Unparseable on either side scores 0.
///
/// # Errors
/// Returns [`ScoreError::TreeBudget`] when a tree was too large to build or
/// the comparison visits more than `max_nodes` node pairs.
pub fn tree_similarity(
    a: &ParseOutcome,
    b: &ParseOutcome,
    max_nodes: usize,
) -> Result<usize, ScoreError> {
    match (a, b) {
        (ParseOutcome::Unparseable, _) | (_, ParseOutcome::Unparseable) => Ok(0),
        (ParseOutcome::Parsed(x), ParseOutcome::Parsed(y)) => compare_trees(x, y, max_nodes),
        _ => Err(ScoreError::TreeBudget { limit: max_nodes }),
    }
}

/// Lockstep comparison of two trees.
///
/// # Errors
/// Returns [`ScoreError::TreeBudget`] after visiting `max_nodes` pairs.
pub fn compare_trees(a: &SyntaxTree, b: &SyntaxTree, max_nodes: usize) -> Result<usize, ScoreError> {
    if a.is_empty() || b.is_empty() {
        return Ok(0);
    }
    let mut score = 0;
    let mut visited = 0usize;
    let mut pending = vec![(0usize, 0usize)];

    while let Some((i, j)) = pending.pop() {
        visited += 1;
        if visited > max_nodes {
            return Err(ScoreError::TreeBudget { limit: max_nodes });
        }
        let (Some(x), Some(y)) = (a.node(i), b.node(j)) else {
            continue;
        };
        if x.kind == y.kind {
            score += 1;
        }
        // zip stops at the shorter child list
        pending.extend(x.children.iter().copied().zip(y.children.iter().copied()));
    }

    Ok(score)
}
