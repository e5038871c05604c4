//! Non-fatal registration diagnostics.
//!
//! Bad endpoint data never aborts registration. The registrar degrades the
//! offending piece and reports a [`Diagnostic`] to the matcher's
//! [`DiagnosticSink`]. The default sink logs through `tracing`.

use std::fmt;
use std::sync::Mutex;

/// Something in an endpoint definition that the registrar had to work around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A placeholder override has a shape other than a list.
    /// The placeholder was registered as an open parameter.
    MalformedComponent {
        /// Placeholder name, without braces.
        placeholder: String,
        /// Id of the endpoint that declared it.
        endpoint: String,
    },
    /// A catalog entry names a method outside HEAD, GET, PUT, POST, DELETE.
    /// The method was skipped.
    UnsupportedMethod {
        /// The method as written in the catalog.
        method: String,
        /// Id of the endpoint that declared it.
        endpoint: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedComponent {
                placeholder,
                endpoint,
            } => write!(
                f,
                "incorrectly configured url component \"{placeholder}\" in endpoint \"{endpoint}\"; \
                 treating it as an open parameter"
            ),
            Self::UnsupportedMethod { method, endpoint } => write!(
                f,
                "endpoint \"{endpoint}\" declares unsupported method \"{method}\"; skipped"
            ),
        }
    }
}

/// Receives diagnostics emitted during registration.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one diagnostic. Must not panic.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}

/// Logs each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(%diagnostic, "endpoint definition degraded");
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what was reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        let mut guard = self
            .collected
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.push(diagnostic.clone());
    }
}
