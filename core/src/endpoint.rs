//! Endpoint definitions fed to the registrar.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::Method;

/// A registered API operation.
///
/// An endpoint is built once by the definition loader and handed to
/// [`UrlPatternMatcher::add_endpoint`](crate::UrlPatternMatcher::add_endpoint).
/// The matcher wraps it in an `Arc` so one endpoint can terminate several
/// patterns under several methods without being copied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Endpoint {
    /// Identifier shown in diagnostics and resolve results (e.g. `"indices.get"`).
    pub id: String,
    /// Methods the endpoint answers to. Duplicates are ignored on insert.
    pub methods: Vec<Method>,
    /// Request body suggested once the user has typed the full path.
    pub template: Option<serde_json::Value>,
    /// Per-placeholder overrides of the default parameter handling.
    pub url_components: BTreeMap<String, UrlComponentSpec>,
}

impl Endpoint {
    /// Create an endpoint with no methods, template or component overrides.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Add a method (builder pattern).
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Set the body template (builder pattern).
    #[must_use]
    pub fn template(mut self, template: serde_json::Value) -> Self {
        self.template = Some(template);
        self
    }

    /// Override handling of the placeholder `name` (builder pattern).
    #[must_use]
    pub fn component(mut self, name: impl Into<String>, spec: UrlComponentSpec) -> Self {
        self.url_components.insert(name.into(), spec);
        self
    }
}

/// How a `{placeholder}` segment is constrained.
///
/// Deserializes from either shape found in endpoint definitions:
///
/// ```json
/// { "level": ["cluster", "indices", "shards"] }
/// { "metric": { "type": "list", "list": ["docs", "store"], "multiValued": true } }
/// ```
///
/// Anything else lands in [`Unrecognized`](Self::Unrecognized) instead of
/// failing the whole definition; the registrar reports it and falls back to
/// an open parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UrlComponentSpec {
    /// Shorthand list: single-valued, strict.
    Values(Vec<String>),
    /// `{ "type": ..., "list": [...], ... }`
    Structured(StructuredComponent),
    /// Any other shape.
    Unrecognized(serde_json::Value),
}

impl UrlComponentSpec {
    /// Shorthand list spec from string-likes.
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }
}

/// Structured form of a [`UrlComponentSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructuredComponent {
    /// Only `"list"` is understood.
    #[serde(rename = "type")]
    pub kind: String,
    /// Allowed values.
    #[serde(default)]
    pub list: Vec<String>,
    /// Accept a comma-separated run of values.
    #[serde(default, alias = "multiValued")]
    pub multi_valued: bool,
    /// Accept values outside `list` (they are still suggested from `list`).
    #[serde(default, alias = "allowNonValidValues")]
    pub allow_non_valid: bool,
}

impl StructuredComponent {
    /// A `"list"` spec with both flags off.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: "list".to_owned(),
            list: values.into_iter().map(Into::into).collect(),
            multi_valued: false,
            allow_non_valid: false,
        }
    }
}
