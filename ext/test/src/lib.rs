//! urltrie-test: Test domain for conformance testing
//!
//! Provides a canned parametrized factory so fixtures can exercise the
//! factory tier of placeholder resolution without a live cluster behind it.
//!
//! # Example
//!
//! ```
//! use urltrie_test::prelude::*;
//!
//! let factories = register(ParamFactoriesBuilder::new(), "index", ["logs", "metrics"]).build();
//! let mut matcher = UrlPatternMatcher::builder().factories(factories).build();
//! matcher.add_endpoint("{index}/_search", Endpoint::new("search").method(Method::Get));
//!
//! let texts: Vec<String> = matcher.suggest("GET", "m").into_iter().map(|s| s.text).collect();
//! assert_eq!(texts, vec!["metrics"]);
//! ```

use std::sync::Arc;

use urltrie::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Suggests a fixed value set and accepts any non-empty segment.
///
/// Stands in for suggesters backed by live data (index names, aliases...),
/// where the suggestions are a hint and the user may type anything.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggester {
    values: Vec<String>,
}

impl StaticSuggester {
    /// Create a suggester offering `values`.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl SegmentMatcher for StaticSuggester {
    fn matches(&self, token: &str) -> bool {
        !token.is_empty()
    }

    fn suggestions(&self) -> Vec<String> {
        self.values.clone()
    }
}

/// Register a [`StaticSuggester`] factory for placeholders called `name`.
#[must_use]
pub fn register<I, S>(builder: ParamFactoriesBuilder, name: &str, values: I) -> ParamFactoriesBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let suggester = Arc::new(StaticSuggester::new(values));
    builder.factory(name, move |placeholder, _parent| {
        UrlNode::custom(placeholder, Arc::clone(&suggester) as Arc<dyn SegmentMatcher>)
    })
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{register, StaticSuggester};
    pub use urltrie::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggester_accepts_anything_non_empty() {
        let s = StaticSuggester::new(["a"]);
        assert!(s.matches("zzz"));
        assert!(!s.matches(""));
        assert_eq!(s.suggestions(), vec!["a"]);
    }

    #[test]
    fn registered_factory_builds_custom_nodes() {
        let factories = register(ParamFactoriesBuilder::new(), "index", ["logs"]).build();
        let node = factories.get_component("index").unwrap()("index", &UrlNode::root());
        assert_eq!(node.key(), "index");
        assert!(matches!(node.kind(), NodeKind::Custom(_)));
        assert_eq!(node.suggestions(), vec!["logs"]);
    }

    #[test]
    fn factory_nodes_share_one_suggester() {
        let factories = register(ParamFactoriesBuilder::new(), "index", ["logs"]).build();
        let mut m = UrlPatternMatcher::builder().factories(factories).build();
        m.add_endpoint("{index}", Endpoint::new("get").method(Method::Get));
        m.add_endpoint("{index}", Endpoint::new("delete").method(Method::Delete));

        let get = &m.top_level_components("GET")[0];
        let delete = &m.top_level_components("DELETE")[0];
        match (get.kind(), delete.kind()) {
            (NodeKind::Custom(a), NodeKind::Custom(b)) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("expected custom nodes, got {other:?}"),
        }
    }
}
