//! Query-time traversal of a method trie.
//!
//! A typed segment can be accepted by several siblings at once: `_search`
//! matches the literal `_search` and an open `{index}` next to it. The walk
//! follows every accepting child and remembers how many segments were taken
//! by literals, which is what ranks the results.

use std::sync::Arc;

use crate::{Endpoint, Method, NodeKind, UrlNode, UrlPatternMatcher};

/// A node reached by walking typed segments.
#[derive(Debug, Clone, Copy)]
pub struct WalkState<'a> {
    /// The node reached.
    pub node: &'a UrlNode,
    /// How many of the walked segments were matched by literal nodes.
    pub literal_hits: usize,
}

/// Where a suggestion comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SuggestionKind {
    /// A literal segment, possibly with its literal tail.
    Literal,
    /// A value of a list-constrained placeholder.
    Value,
    /// A value offered by a caller-supplied segment matcher.
    Custom,
}

/// One autocomplete candidate for the segment being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text to insert.
    pub text: String,
    /// Key of the node that offered it.
    pub component: String,
    /// Literal or parameter value.
    pub kind: SuggestionKind,
}

/// An endpoint whose pattern matches a fully typed path.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint<'a> {
    /// The matched endpoint.
    pub endpoint: &'a Arc<Endpoint>,
    /// Segments matched by literals on the way; higher is more specific.
    pub literal_hits: usize,
    /// Body suggestion for this endpoint.
    pub body: Option<&'a serde_json::Value>,
}

impl UrlPatternMatcher {
    /// Follow `segments` from `method`'s root through every accepting child.
    ///
    /// An empty result means no registered pattern starts with these segments.
    #[must_use]
    pub fn walk<'a>(&'a self, method: Method, segments: &[&str]) -> Vec<WalkState<'a>> {
        self.walk_with(method, segments, false)
    }

    /// Like [`walk`](Self::walk), but a segment taken by a literal drops the
    /// parameter siblings that also accepted it.
    fn walk_preferring_literals<'a>(
        &'a self,
        method: Method,
        segments: &[&str],
    ) -> Vec<WalkState<'a>> {
        self.walk_with(method, segments, true)
    }

    fn walk_with<'a>(
        &'a self,
        method: Method,
        segments: &[&str],
        literals_win: bool,
    ) -> Vec<WalkState<'a>> {
        let mut states = vec![WalkState {
            node: self.root(method),
            literal_hits: 0,
        }];

        for segment in segments {
            states = states
                .iter()
                .flat_map(|state| {
                    state
                        .node
                        .next()
                        .iter()
                        .filter(|child| child.matches(segment))
                        .map(move |child| WalkState {
                            node: child,
                            literal_hits: state.literal_hits + usize::from(is_literal(child)),
                        })
                })
                .collect();
            if literals_win && states.iter().any(|s| is_literal(s.node)) {
                states.retain(|s| is_literal(s.node));
            }
            if states.is_empty() {
                break;
            }
        }

        states
    }

    /// Candidates for the last, partially typed segment of `path`.
    ///
    /// Every segment before the last `/` is walked; suggestions of the
    /// reachable children that start with the partial segment are returned,
    /// literals first, without duplicates. A typed segment that names a
    /// literal is read as that literal only, so `_cat/` never offers what
    /// would follow an index called `_cat`. Unknown methods and dead-end
    /// paths yield nothing.
    ///
    /// ```
    /// use urltrie::{Endpoint, Method, UrlComponentSpec, UrlPatternMatcher};
    ///
    /// let mut m = UrlPatternMatcher::new();
    /// m.add_endpoint(
    ///     "_cluster/{level}",
    ///     Endpoint::new("health")
    ///         .method(Method::Get)
    ///         .component("level", UrlComponentSpec::values(["indices", "shards"])),
    /// );
    ///
    /// let texts: Vec<_> = m.suggest("GET", "_cluster/sh").into_iter().map(|s| s.text).collect();
    /// assert_eq!(texts, vec!["shards"]);
    /// ```
    #[must_use]
    pub fn suggest(&self, method: &str, path: &str) -> Vec<Suggestion> {
        let Ok(method) = method.parse::<Method>() else {
            return Vec::new();
        };
        let path = strip_query(path).trim_start_matches('/');
        let (typed, partial): (Vec<&str>, &str) = match path.rsplit_once('/') {
            Some((head, tail)) => (head.split('/').collect(), tail),
            None => (Vec::new(), path),
        };

        let mut suggestions: Vec<Suggestion> = Vec::new();
        for state in self.walk_preferring_literals(method, &typed) {
            for child in state.node.next() {
                let kind = match child.kind() {
                    NodeKind::Constant { .. } => SuggestionKind::Literal,
                    NodeKind::List { .. } => SuggestionKind::Value,
                    NodeKind::Custom(_) => SuggestionKind::Custom,
                    NodeKind::Root | NodeKind::Param | NodeKind::FullRequest { .. } => continue,
                };
                for text in child.suggestions() {
                    if text.starts_with(partial) && !suggestions.iter().any(|s| s.text == text) {
                        suggestions.push(Suggestion {
                            text,
                            component: child.key().to_owned(),
                            kind,
                        });
                    }
                }
            }
        }

        // stable: insertion order survives within each kind
        suggestions.sort_by_key(|s| s.kind);
        suggestions
    }

    /// Endpoints whose pattern matches the whole of `path`.
    ///
    /// Results are ordered most literal first, then by registration order.
    /// An endpoint reachable through several patterns is listed once, at
    /// its best rank.
    #[must_use]
    pub fn resolve(&self, method: &str, path: &str) -> Vec<ResolvedEndpoint<'_>> {
        let Ok(method) = method.parse::<Method>() else {
            return Vec::new();
        };
        let path = strip_query(path).trim_start_matches('/');
        let segments: Vec<&str> = path.split('/').collect();

        let mut states = self.walk(method, &segments);
        states.sort_by(|a, b| b.literal_hits.cmp(&a.literal_hits));

        let mut resolved: Vec<ResolvedEndpoint<'_>> = Vec::new();
        for state in states {
            for endpoint in state.node.accepts() {
                if resolved.iter().any(|r| Arc::ptr_eq(r.endpoint, endpoint)) {
                    continue;
                }
                resolved.push(ResolvedEndpoint {
                    endpoint,
                    literal_hits: state.literal_hits,
                    body: endpoint.template.as_ref(),
                });
            }
        }
        resolved
    }
}

fn is_literal(node: &UrlNode) -> bool {
    matches!(node.kind(), NodeKind::Constant { .. })
}

/// Drop a `?query` suffix.
fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}
