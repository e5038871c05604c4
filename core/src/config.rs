//! Endpoint catalog: serde-deserializable endpoint definitions.
//!
//! A catalog is the input of [`UrlPatternMatcher::load_catalog()`]. It is kept
//! deliberately close to the on-disk shape so that loading never has to
//! reject a whole file because of one odd entry.
//!
//! ```yaml
//! endpoints:
//!   - id: cluster.health
//!     methods: [GET]
//!     patterns: ["_cluster/health", "_cluster/health/{index}"]
//!     url_components:
//!       level: [cluster, indices, shards]
//!   - id: search
//!     methods: [GET, POST]
//!     patterns: ["_search", "{index}/_search"]
//!     template: { query: { match_all: {} } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::{CatalogError, Diagnostic, Endpoint, Method, UrlComponentSpec, UrlPatternMatcher};

/// A list of endpoint definitions, registered in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Endpoint definitions.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// One endpoint definition.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Identifier used in diagnostics and resolve output.
    pub id: String,

    /// Method names. Unsupported names are reported and skipped.
    #[serde(default)]
    pub methods: Vec<String>,

    /// Path patterns, `/`-separated, `{name}` for placeholders.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Request body suggestion.
    #[serde(default)]
    pub template: Option<serde_json::Value>,

    /// Per-placeholder overrides.
    #[serde(default)]
    pub url_components: BTreeMap<String, UrlComponentSpec>,
}

impl CatalogConfig {
    /// Parse a JSON catalog.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidConfig`] if the text is not a catalog.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|e| CatalogError::InvalidConfig {
            source: format!("JSON parse error: {e}"),
        })
    }

    /// Parse a YAML catalog.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidConfig`] if the text is not a catalog.
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(text).map_err(|e| CatalogError::InvalidConfig {
            source: format!("YAML parse error: {e}"),
        })
    }

    /// Read a catalog file. `.json` is parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] if the file cannot be read,
    /// [`CatalogError::InvalidConfig`] if it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }
}

impl UrlPatternMatcher {
    /// Register every pattern of every catalog endpoint.
    ///
    /// Returns the number of endpoints that ended up under at least one
    /// method. Unsupported method names are reported as
    /// [`Diagnostic::UnsupportedMethod`] and skipped.
    pub fn load_catalog(&mut self, catalog: CatalogConfig) -> usize {
        let mut registered = 0;

        for config in catalog.endpoints {
            let mut endpoint = Endpoint::new(config.id);
            for name in &config.methods {
                match name.parse::<Method>() {
                    Ok(method) => endpoint = endpoint.method(method),
                    Err(_) => self.report(&Diagnostic::UnsupportedMethod {
                        method: name.clone(),
                        endpoint: endpoint.id.clone(),
                    }),
                }
            }
            endpoint.template = config.template;
            endpoint.url_components = config.url_components;

            if endpoint.methods.is_empty() || config.patterns.is_empty() {
                tracing::debug!(endpoint = %endpoint.id, "endpoint has nothing to register");
                continue;
            }

            let endpoint = Arc::new(endpoint);
            for pattern in &config.patterns {
                self.add_endpoint(pattern, Arc::clone(&endpoint));
            }
            registered += 1;
        }

        registered
    }
}
