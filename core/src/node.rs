//! Trie nodes.
//!
//! Every node owns its children, so patterns that share a prefix share the
//! very same `UrlNode` values on that prefix. Variants are a closed enum; the
//! only open seam is [`NodeKind::Custom`], which is what parametrized
//! factories usually hand back.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Endpoint;

/// Key of the per-method root node. Never matched against user input.
pub const ROOT_KEY: &str = "ROOT";

/// Caller-defined segment behavior for [`NodeKind::Custom`] nodes.
///
/// # Example
///
/// ```
/// use urltrie::SegmentMatcher;
///
/// #[derive(Debug)]
/// struct IndexNames(Vec<String>);
///
/// impl SegmentMatcher for IndexNames {
///     fn matches(&self, token: &str) -> bool {
///         !token.is_empty()
///     }
///
///     fn suggestions(&self) -> Vec<String> {
///         self.0.clone()
///     }
/// }
/// ```
pub trait SegmentMatcher: Send + Sync + Debug {
    /// Whether a typed path segment is accepted at this position.
    fn matches(&self, token: &str) -> bool;

    /// Values offered while the user types this segment.
    fn suggestions(&self) -> Vec<String> {
        Vec::new()
    }
}

/// What a node matches and what it suggests.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Method root. Matches nothing, suggests nothing.
    Root,
    /// A literal segment.
    Constant {
        /// Lookahead strings offered as suggestions, insertion order, no duplicates.
        options: Vec<String>,
    },
    /// A placeholder restricted to an enumerated value set.
    List {
        /// Allowed values, also the suggestions.
        values: Vec<String>,
        /// Accept `a,b,c` as one segment.
        multi_valued: bool,
        /// Accept values outside `values`.
        allow_non_valid: bool,
    },
    /// An unconstrained placeholder: any non-empty segment, no suggestions.
    Param,
    /// Body template for the `pattern[body]` key under a method root.
    FullRequest {
        /// The template offered as the request body.
        template: serde_json::Value,
    },
    /// Behavior supplied by the caller, typically via a parametrized factory.
    Custom(Arc<dyn SegmentMatcher>),
}

/// A node in a method trie.
#[derive(Debug, Clone)]
pub struct UrlNode {
    key: String,
    kind: NodeKind,
    next: Vec<UrlNode>,
    accepts: Vec<Arc<Endpoint>>,
}

impl UrlNode {
    fn with_kind(key: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            kind,
            next: Vec::new(),
            accepts: Vec::new(),
        }
    }

    /// A method root keyed [`ROOT_KEY`].
    #[must_use]
    pub fn root() -> Self {
        Self::with_kind(ROOT_KEY, NodeKind::Root)
    }

    /// A literal segment carrying its first lookahead.
    pub fn constant(key: impl Into<String>, lookahead: impl Into<String>) -> Self {
        Self::with_kind(
            key,
            NodeKind::Constant {
                options: vec![lookahead.into()],
            },
        )
    }

    /// A list-constrained placeholder.
    pub fn list(
        key: impl Into<String>,
        values: Vec<String>,
        multi_valued: bool,
        allow_non_valid: bool,
    ) -> Self {
        Self::with_kind(
            key,
            NodeKind::List {
                values,
                multi_valued,
                allow_non_valid,
            },
        )
    }

    /// An open placeholder.
    pub fn param(key: impl Into<String>) -> Self {
        Self::with_kind(key, NodeKind::Param)
    }

    /// A body-template leaf.
    pub fn full_request(key: impl Into<String>, template: serde_json::Value) -> Self {
        Self::with_kind(key, NodeKind::FullRequest { template })
    }

    /// A node whose matching is delegated to `matcher`.
    pub fn custom(key: impl Into<String>, matcher: Arc<dyn SegmentMatcher>) -> Self {
        Self::with_kind(key, NodeKind::Custom(matcher))
    }

    /// The literal key this node is stored under in its parent.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The node variant.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children in insertion order.
    #[must_use]
    pub fn next(&self) -> &[UrlNode] {
        &self.next
    }

    /// Endpoints whose pattern ends at this node, in registration order.
    #[must_use]
    pub fn accepts(&self) -> &[Arc<Endpoint>] {
        &self.accepts
    }

    /// Whether at least one pattern ends here.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.accepts.is_empty()
    }

    /// Direct child stored under `key`.
    #[must_use]
    pub fn get_component(&self, key: &str) -> Option<&UrlNode> {
        self.next.iter().find(|child| child.key == key)
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.next.iter().position(|child| child.key == key)
    }

    /// Record another lookahead on a literal node.
    ///
    /// Lookaheads accumulate; re-adding a known one is a no-op. Nodes other
    /// than [`NodeKind::Constant`] carry no lookaheads and ignore the call.
    pub fn add_option(&mut self, option: impl Into<String>) {
        if let NodeKind::Constant { options } = &mut self.kind {
            let option = option.into();
            if !options.contains(&option) {
                options.push(option);
            }
        }
    }

    /// Append `child` and return its index. The caller guarantees the key is new.
    pub(crate) fn attach(&mut self, child: UrlNode) -> usize {
        debug_assert!(self.position(&child.key).is_none());
        self.next.push(child);
        self.next.len() - 1
    }

    /// Only used on detached nodes, before they enter a trie.
    pub(crate) fn rekey(mut self, key: &str) -> Self {
        key.clone_into(&mut self.key);
        self
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut UrlNode {
        &mut self.next[index]
    }

    pub(crate) fn accept(&mut self, endpoint: Arc<Endpoint>) {
        self.accepts.push(endpoint);
    }

    /// Whether `token`, one typed path segment, is accepted at this node.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        match &self.kind {
            NodeKind::Root | NodeKind::FullRequest { .. } => false,
            NodeKind::Constant { .. } => token == self.key,
            NodeKind::List {
                values,
                multi_valued,
                allow_non_valid,
            } => {
                if token.is_empty() {
                    return false;
                }
                let mut parts = token.split(',');
                if !multi_valued && token.contains(',') {
                    return false;
                }
                *allow_non_valid || parts.all(|part| values.iter().any(|v| v == part))
            }
            NodeKind::Param => !token.is_empty(),
            NodeKind::Custom(matcher) => matcher.matches(token),
        }
    }

    /// Text offered while the user types the segment this node stands for.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Constant { options } => options.clone(),
            NodeKind::List { values, .. } => values.clone(),
            NodeKind::Custom(matcher) => matcher.suggestions(),
            NodeKind::Root | NodeKind::Param | NodeKind::FullRequest { .. } => Vec::new(),
        }
    }
}
