//! Conformance test fixture runner
//!
//! Loads YAML fixtures (catalog + cases) and runs them against a freshly
//! built `UrlPatternMatcher`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use urltrie::{CatalogConfig, CollectingSink, ParamFactoriesBuilder, UrlPatternMatcher};

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Placeholder name -> values offered by a `StaticSuggester` factory.
    #[serde(default)]
    pub factories: BTreeMap<String, Vec<String>>,
    pub catalog: CatalogConfig,
    /// Number of diagnostics loading the catalog must produce.
    #[serde(default)]
    pub expect_diagnostics: usize,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// What a case asks the matcher.
/// Uses untagged deserialization: `{ suggest: path }`, `{ resolve: path }`
/// or the bare keyword `top_level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Query {
    /// Suggestion texts for a partially typed path.
    Suggest { suggest: String },
    /// Endpoint ids for a complete path.
    Resolve { resolve: String },
    /// A query that takes no path.
    Keyword(QueryKeyword),
}

/// Path-less queries, written as a bare word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKeyword {
    /// Keys of the root's children.
    TopLevel,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub method: String,
    pub query: Query,
    pub expect: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

impl Fixture {
    /// Build the matcher described by this fixture.
    pub fn build(&self) -> (UrlPatternMatcher, Arc<CollectingSink>) {
        let mut builder = ParamFactoriesBuilder::new();
        for (name, values) in &self.factories {
            builder = crate::register(builder, name, values.iter().cloned());
        }

        let sink = Arc::new(CollectingSink::new());
        let mut matcher = UrlPatternMatcher::builder()
            .factories(builder.build())
            .diagnostics(sink.clone())
            .build();
        matcher.load_catalog(self.catalog.clone());
        (matcher, sink)
    }
}

impl TestCase {
    fn evaluate(&self, matcher: &UrlPatternMatcher) -> Vec<String> {
        match &self.query {
            Query::Suggest { suggest: path } => matcher
                .suggest(&self.method, path)
                .into_iter()
                .map(|s| s.text)
                .collect(),
            Query::Resolve { resolve: path } => matcher
                .resolve(&self.method, path)
                .into_iter()
                .map(|r| r.endpoint.id.clone())
                .collect(),
            Query::Keyword(QueryKeyword::TopLevel) => matcher
                .top_level_components(&self.method)
                .iter()
                .map(|n| n.key().to_owned())
                .collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        let (matcher, _) = self.build();
        self.cases
            .iter()
            .map(|case| {
                let actual = case.evaluate(&matcher);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect.clone(),
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let (_, sink) = self.build();
        let diagnostics = sink.diagnostics();
        assert_eq!(
            diagnostics.len(),
            self.expect_diagnostics,
            "Fixture '{}' produced diagnostics {:?}",
            self.name,
            diagnostics
        );

        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_variants() {
        let yaml = r#"
name: inline
catalog:
  endpoints:
    - id: cat.indices
      methods: [GET]
      patterns: ["_cat/indices"]
cases:
  - name: top
    method: GET
    query: top_level
    expect: ["_cat"]
  - name: suggest
    method: GET
    query: { suggest: "_cat/" }
    expect: ["indices"]
  - name: resolve
    method: GET
    query: { resolve: "_cat/indices" }
    expect: ["cat.indices"]
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.cases.len(), 3);
        assert!(matches!(
            fixture.cases[0].query,
            Query::Keyword(QueryKeyword::TopLevel)
        ));
        assert!(matches!(
            &fixture.cases[1].query,
            Query::Suggest { suggest } if suggest == "_cat/"
        ));
        assert!(matches!(
            &fixture.cases[2].query,
            Query::Resolve { resolve } if resolve == "_cat/indices"
        ));
        fixture.run_and_assert();
    }

    #[test]
    fn flow_mapping_queries_deserialize() {
        let case: TestCase = serde_yaml::from_str(
            r#"{ name: s, method: GET, query: { suggest: "" }, expect: [] }"#,
        )
        .unwrap();
        assert!(matches!(&case.query, Query::Suggest { suggest } if suggest.is_empty()));

        let case: TestCase =
            serde_yaml::from_str("{ name: r, method: GET, query: { resolve: x/y }, expect: [a] }")
                .unwrap();
        assert!(matches!(&case.query, Query::Resolve { resolve } if resolve == "x/y"));
    }

    #[test]
    fn unknown_query_is_rejected() {
        let err = serde_yaml::from_str::<TestCase>(
            "{ name: u, method: GET, query: { explain: x }, expect: [] }",
        );
        assert!(err.is_err());
    }

    #[test]
    fn failing_case_is_reported_not_panicked() {
        let fixture = Fixture::from_yaml(
            r#"
name: mismatch
catalog:
  endpoints:
    - id: a
      methods: [GET]
      patterns: ["a"]
cases:
  - name: wrong expectation
    method: GET
    query: { resolve: "a" }
    expect: ["b"]
"#,
        )
        .unwrap();
        let results = fixture.run();
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, vec!["a"]);
    }
}
