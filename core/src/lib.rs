//! urltrie - method-scoped URL pattern tries for endpoint autocomplete
//!
//! Endpoint path templates such as `{index}/_search` or `_cat/indices` are
//! registered into one trie per HTTP method. An autocomplete session then
//! walks the trie with the segments the user has typed so far and asks for
//! the next candidates, or resolves a complete path to the endpoints it
//! matches.
//!
//! # Architecture
//!
//! - [`UrlPatternMatcher`]: Method registry: five isolated roots plus a shared
//!   [`ParamFactories`] table. Owns registration and lookup.
//! - [`UrlNode`] / [`NodeKind`]: Trie nodes. Literal, list-constrained, open
//!   parameter, body template, or caller-defined ([`SegmentMatcher`]).
//! - [`Endpoint`] / [`UrlComponentSpec`]: What gets registered.
//! - [`Diagnostic`] / [`DiagnosticSink`]: Non-fatal reports about bad input.
//!
//! # Key Design Insights
//!
//! 1. **Shared prefixes are shared nodes**: children are owned by their
//!    parent and looked up by key before anything is created, so two patterns
//!    with a common prefix walk through the same `UrlNode` values.
//!
//! 2. **Placeholder resolution has three tiers**: endpoint override, then
//!    parametrized factory, then open parameter. The first endpoint to reach
//!    a placeholder decides its node; later endpoints reuse it.
//!
//! 3. **Registration never fails**: malformed overrides degrade to open
//!    parameters and are reported to the [`DiagnosticSink`].
//!
//! # Example
//!
//! ```
//! use urltrie::prelude::*;
//!
//! let mut matcher = UrlPatternMatcher::new();
//! matcher.add_endpoint("a/{b}/c", Endpoint::new("E1").method(Method::Get));
//! matcher.add_endpoint("a/{b}/d", Endpoint::new("E2").method(Method::Get));
//!
//! let texts: Vec<String> = matcher
//!     .suggest("GET", "a/anything/")
//!     .into_iter()
//!     .map(|s| s.text)
//!     .collect();
//! assert_eq!(texts, vec!["c", "d"]);
//!
//! let resolved = matcher.resolve("GET", "a/anything/d");
//! assert_eq!(resolved[0].endpoint.id, "E2");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod diagnostics;
mod endpoint;
mod factory;
mod matcher;
mod method;
mod node;
mod walk;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::{CatalogConfig, EndpointConfig};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use endpoint::{Endpoint, StructuredComponent, UrlComponentSpec};
pub use factory::{BoxedParamFactory, ParamFactories, ParamFactoriesBuilder};
pub use matcher::{UrlPatternMatcher, UrlPatternMatcherBuilder, BODY_SUFFIX};
pub use method::{Method, UnsupportedMethod};
pub use node::{NodeKind, SegmentMatcher, UrlNode, ROOT_KEY};
pub use walk::{ResolvedEndpoint, Suggestion, SuggestionKind, WalkState};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use urltrie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Registration
        Endpoint,
        Method,
        // Nodes
        NodeKind,
        ParamFactories,
        ParamFactoriesBuilder,
        SegmentMatcher,
        // Lookup
        Suggestion,
        SuggestionKind,
        UrlComponentSpec,
        UrlNode,
        UrlPatternMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from reading an endpoint catalog.
///
/// Registration itself never fails; only getting the catalog into memory can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Io {
        /// Path as given.
        path: String,
        /// The underlying error message.
        source: String,
    },
    /// The catalog text does not deserialize.
    InvalidConfig {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read \"{path}\": {source}"),
            Self::InvalidConfig { source } => write!(f, "invalid catalog: {source}"),
        }
    }
}

impl std::error::Error for CatalogError {}
