//! `UrlPatternMatcher`: per-method pattern tries and the registrar that builds them.
//!
//! Registration walks a `/`-separated pattern one segment at a time, reusing
//! any child already stored under the same key, so endpoints sharing a prefix
//! share the nodes of that prefix.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{
    Diagnostic, DiagnosticSink, Endpoint, Method, ParamFactories, TracingSink, UrlComponentSpec,
    UrlNode,
};

/// Suffix appended to a pattern to key its body-template node under the root.
pub const BODY_SUFFIX: &str = "[body]";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{(.+)\}$").expect("placeholder regex is valid"));

/// One method's trie paired with the factory table used while building it.
#[derive(Debug)]
struct MethodData {
    root: UrlNode,
    factories: Arc<ParamFactories>,
}

/// Registry of endpoint patterns, one isolated trie per [`Method`].
///
/// # Lifecycle
///
/// Build, then read. All [`add_endpoint`](Self::add_endpoint) calls take
/// `&mut self`; once built the matcher is `Send + Sync` and can be shared
/// behind an `Arc` by any number of readers. Rebuild wholesale when the
/// endpoint catalog changes.
///
/// # Example
///
/// ```
/// use urltrie::{Endpoint, Method, UrlPatternMatcher};
///
/// let mut matcher = UrlPatternMatcher::new();
/// matcher.add_endpoint("_cat/indices", Endpoint::new("cat.indices").method(Method::Get));
/// matcher.add_endpoint("_cat/nodes", Endpoint::new("cat.nodes").method(Method::Get));
///
/// let top = matcher.top_level_components("GET");
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].suggestions(), vec!["_cat/indices", "_cat/nodes"]);
/// assert!(matcher.top_level_components("PATCH").is_empty());
/// ```
pub struct UrlPatternMatcher {
    methods: [MethodData; 5],
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Default for UrlPatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UrlPatternMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlPatternMatcher")
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

impl UrlPatternMatcher {
    /// A matcher with no parametrized factories that logs diagnostics via `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a matcher.
    #[must_use]
    pub fn builder() -> UrlPatternMatcherBuilder {
        UrlPatternMatcherBuilder::default()
    }

    /// Register `pattern` for every method of `endpoint`.
    ///
    /// Never fails. A malformed placeholder override is reported to the
    /// diagnostics sink and registered as an open parameter.
    pub fn add_endpoint(&mut self, pattern: &str, endpoint: impl Into<Arc<Endpoint>>) {
        let endpoint = endpoint.into();
        for &method in &endpoint.methods {
            tracing::debug!(endpoint = %endpoint.id, %method, pattern, "registering endpoint");
            let data = &mut self.methods[method.index()];
            register(data, pattern, &endpoint, self.diagnostics.as_ref());
        }
    }

    /// Children of `method`'s root in insertion order: the seed set of an
    /// autocomplete session. Unknown methods yield an empty slice.
    #[must_use]
    pub fn top_level_components(&self, method: &str) -> &[UrlNode] {
        match method.parse::<Method>() {
            Ok(m) => self.root(m).next(),
            Err(_) => &[],
        }
    }

    /// The root node of `method`'s trie.
    #[must_use]
    pub fn root(&self, method: Method) -> &UrlNode {
        &self.methods[method.index()].root
    }

    /// The factory table consulted for unconstrained placeholders.
    #[must_use]
    pub fn factories(&self) -> &ParamFactories {
        &self.methods[0].factories
    }

    /// Body template registered for exactly `pattern` under `method`.
    #[must_use]
    pub fn body_template(&self, method: &str, pattern: &str) -> Option<&serde_json::Value> {
        let method = method.parse::<Method>().ok()?;
        let key = format!("{pattern}{BODY_SUFFIX}");
        match self.root(method).get_component(&key)?.kind() {
            crate::NodeKind::FullRequest { template } => Some(template),
            _ => None,
        }
    }

    pub(crate) fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

/// Builder for a [`UrlPatternMatcher`].
#[derive(Default)]
pub struct UrlPatternMatcherBuilder {
    factories: Option<ParamFactories>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl UrlPatternMatcherBuilder {
    /// Factory table shared by all five methods.
    #[must_use]
    pub fn factories(mut self, factories: ParamFactories) -> Self {
        self.factories = Some(factories);
        self
    }

    /// Where registration diagnostics go. Defaults to [`TracingSink`].
    #[must_use]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Create the five empty method tries.
    #[must_use]
    pub fn build(self) -> UrlPatternMatcher {
        let factories = Arc::new(self.factories.unwrap_or_default());
        UrlPatternMatcher {
            methods: Method::ALL.map(|_| MethodData {
                root: UrlNode::root(),
                factories: Arc::clone(&factories),
            }),
            diagnostics: self.diagnostics.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }
}

/// Placeholder name of a `{name}` segment.
fn placeholder_name(segment: &str) -> Option<&str> {
    PLACEHOLDER
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `parts[0]` joined with every following literal, up to the next segment
/// containing `{`.
fn lookahead(parts: &[&str]) -> String {
    let mut joined = parts[0].to_owned();
    for part in parts[1..].iter().take_while(|p| !p.contains('{')) {
        joined.push('/');
        joined.push_str(part);
    }
    joined
}

fn register(data: &mut MethodData, pattern: &str, endpoint: &Arc<Endpoint>, sink: &dyn DiagnosticSink) {
    let MethodData { root, factories } = data;

    if let Some(template) = &endpoint.template {
        let key = format!("{pattern}{BODY_SUFFIX}");
        // first template registered for a pattern wins the flat lookup
        if root.position(&key).is_none() {
            root.attach(UrlNode::full_request(key, template.clone()));
        }
    }

    let parts: Vec<&str> = pattern.split('/').collect();
    let mut cursor: &mut UrlNode = root;

    for (i, part) in parts.iter().enumerate() {
        let index = if let Some(name) = placeholder_name(part) {
            match cursor.position(name) {
                // shared placeholder: keep whatever the first endpoint resolved
                Some(existing) => existing,
                None => {
                    let node = resolve_param(name, endpoint, cursor, factories, sink);
                    cursor.attach(node)
                }
            }
        } else {
            let lookahead = lookahead(&parts[i..]);
            match cursor.position(part) {
                Some(existing) => {
                    cursor.child_mut(existing).add_option(lookahead);
                    existing
                }
                None => cursor.attach(UrlNode::constant(*part, lookahead)),
            }
        };
        cursor = cursor.child_mut(index);
    }

    cursor.accept(Arc::clone(endpoint));
}

/// Endpoint override, then parametrized factory, then open parameter.
fn resolve_param(
    name: &str,
    endpoint: &Endpoint,
    parent: &UrlNode,
    factories: &ParamFactories,
    sink: &dyn DiagnosticSink,
) -> UrlNode {
    if let Some(spec) = endpoint.url_components.get(name) {
        return match spec {
            UrlComponentSpec::Values(values) => UrlNode::list(name, values.clone(), false, false),
            UrlComponentSpec::Structured(s) if s.kind == "list" => {
                UrlNode::list(name, s.list.clone(), s.multi_valued, s.allow_non_valid)
            }
            UrlComponentSpec::Structured(_) | UrlComponentSpec::Unrecognized(_) => {
                sink.report(&Diagnostic::MalformedComponent {
                    placeholder: name.to_owned(),
                    endpoint: endpoint.id.clone(),
                });
                UrlNode::param(name)
            }
        };
    }

    if let Some(factory) = factories.get_component(name) {
        let node = factory(name, parent);
        if node.key() != name {
            tracing::debug!(placeholder = name, key = node.key(), "factory node re-keyed");
            return node.rekey(name);
        }
        return node;
    }

    UrlNode::param(name)
}
