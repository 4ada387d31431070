//! The fact record emitted for each configuration file.

use serde::Serialize;

use crate::error::Result;

/// Namespace reported when no host document names one.
pub const DEFAULT_NAMESPACE: &str = "deployment";

/// JSON rendering of [`ConfigFacts::default()`].
///
/// Only used when serializing a record fails, so that something parseable is
/// still written.
pub const FALLBACK_JSON: &str = r#"{"namespace":"deployment","principal":false,"hosts":0}"#;

/// Deployment facts derived from a configuration file.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFacts {
    /// Namespace of the last host document, or [`DEFAULT_NAMESPACE`].
    pub namespace: String,
    /// Whether any document declared a principal deployment scope.
    pub principal: bool,
    /// Number of host documents.
    pub hosts: u64,
}

impl Default for ConfigFacts {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            principal: false,
            hosts: 0,
        }
    }
}

impl ConfigFacts {
    /// Renders the record as a single line of compact JSON.
    ///
    /// ## Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
