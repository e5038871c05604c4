//! Parametrized factories for placeholders.
//!
//! When a `{placeholder}` has no endpoint-specific override, the registrar asks
//! the factory table whether the caller knows how to build a node for that
//! name. This is how shared suggesters (index names, node ids, template
//! names...) get plugged in once and reused by every endpoint that mentions
//! the placeholder.
//!
//! # Architecture (axum `BoxedIntoRoute` pattern)
//!
//! Each factory is a closure erased behind `Box<dyn Fn>` at registration
//! time and invoked at `add_endpoint` time with the placeholder name and the
//! parent node.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use urltrie::{ParamFactoriesBuilder, SegmentMatcher, UrlNode};
//!
//! #[derive(Debug)]
//! struct Indices;
//!
//! impl SegmentMatcher for Indices {
//!     fn matches(&self, token: &str) -> bool {
//!         !token.is_empty()
//!     }
//!     fn suggestions(&self) -> Vec<String> {
//!         vec!["logs".into(), "metrics".into()]
//!     }
//! }
//!
//! let factories = ParamFactoriesBuilder::new()
//!     .factory("index", |name, _parent| UrlNode::custom(name, Arc::new(Indices)))
//!     .build();
//!
//! assert!(factories.get_component("index").is_some());
//! assert!(factories.get_component("id").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::UrlNode;

/// Type-erased node factory: `(placeholder name, parent node) -> node`.
pub type BoxedParamFactory = Box<dyn Fn(&str, &UrlNode) -> UrlNode + Send + Sync>;

/// Builder for a [`ParamFactories`] table.
///
/// The built table is immutable; no factory can be added after
/// [`build()`](Self::build).
#[derive(Default)]
pub struct ParamFactoriesBuilder {
    factories: HashMap<String, BoxedParamFactory>,
}

impl ParamFactoriesBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory used for placeholders called `name`.
    ///
    /// Registering the same name twice keeps the last factory.
    #[must_use]
    pub fn factory<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&str, &UrlNode) -> UrlNode + Send + Sync + 'static,
    {
        self.factories.insert(name.to_owned(), Box::new(factory));
        self
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> ParamFactories {
        ParamFactories {
            factories: self.factories,
        }
    }
}

/// Immutable placeholder-name to factory table.
///
/// The default table is empty: every lookup reports "no factory".
#[derive(Default)]
pub struct ParamFactories {
    factories: HashMap<String, BoxedParamFactory>,
}

impl ParamFactories {
    /// A table with no factories.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The factory for placeholder `name`, if one is registered.
    #[must_use]
    pub fn get_component(&self, name: &str) -> Option<&BoxedParamFactory> {
        self.factories.get(name)
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered placeholder names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ParamFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamFactories")
            .field("names", &self.names())
            .finish()
    }
}
