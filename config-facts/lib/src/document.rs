//! Safe, path-based access to loosely-typed resource documents.
//!
//! Resource documents come straight out of a YAML stream with no schema, so
//! every field may be missing or of the wrong type. [`ResourceDocument`]
//! turns each of those deviations into `None` instead of an error.

use serde_yaml::Value;

use crate::facts::DEFAULT_NAMESPACE;

/// The `kind` value that marks a host resource (compared case-insensitively).
const HOST_KIND: &str = "host";

/// The `status.deploymentScope` value that marks principal scope.
const PRINCIPAL_SCOPE: &str = "principal";

/// What a document says about its `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind<'a> {
    /// The document is not a mapping or has no `kind` key.
    Missing,
    /// `kind` is present but is not a string.
    Invalid,
    /// `kind` is a string.
    Named(&'a str),
}

/// Borrowed view over a single resource document.
///
/// ## Examples
///
/// ```
/// use config_facts_lib::ResourceDocument;
///
/// let value: serde_yaml::Value =
///     serde_yaml::from_str("kind: Host\nstatus:\n  deploymentScope: Principal\n").unwrap();
/// let doc = ResourceDocument::new(&value);
///
/// assert!(doc.is_host());
/// assert!(doc.is_principal_scope());
/// assert_eq!(doc.namespace(), "deployment");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceDocument<'a> {
    value: &'a Value,
}

impl<'a> ResourceDocument<'a> {
    /// Wraps a parsed YAML value.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Returns true for documents that carry no information at all.
    ///
    /// Null, `false`, zero, and empty strings, sequences, and mappings all
    /// count as empty.
    pub fn is_empty(&self) -> bool {
        match untagged(self.value) {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Sequence(seq) => seq.is_empty(),
            Value::Mapping(map) => map.is_empty(),
            Value::Tagged(_) => false,
        }
    }

    /// Follows a dot-separated path through nested mappings.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate
    /// value is not a mapping.
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        path.split('.').try_fold(self.value, |current, key| {
            untagged(current).as_mapping()?.get(key).map(untagged)
        })
    }

    /// Like [`lookup`](Self::lookup), but only string leaves count.
    pub fn lookup_str(&self, path: &str) -> Option<&'a str> {
        self.lookup(path)?.as_str()
    }

    /// Classifies the document's `kind` field.
    pub fn kind(&self) -> DocumentKind<'a> {
        match self.lookup("kind") {
            None => DocumentKind::Missing,
            Some(value) => match value.as_str() {
                Some(kind) => DocumentKind::Named(kind),
                None => DocumentKind::Invalid,
            },
        }
    }

    /// Returns true if `kind` is `host`, ignoring case.
    pub fn is_host(&self) -> bool {
        matches!(self.kind(), DocumentKind::Named(kind) if kind.to_lowercase() == HOST_KIND)
    }

    /// Returns true if `status.deploymentScope` is `principal`, ignoring case.
    pub fn is_principal_scope(&self) -> bool {
        self.lookup_str("status.deploymentScope")
            .is_some_and(|scope| scope.to_lowercase() == PRINCIPAL_SCOPE)
    }

    /// Returns `metadata.namespace`, or [`DEFAULT_NAMESPACE`] when it is
    /// absent, empty, or not a string.
    pub fn namespace(&self) -> &'a str {
        match self.lookup_str("metadata.namespace") {
            Some(namespace) if !namespace.is_empty() => namespace,
            _ => DEFAULT_NAMESPACE,
        }
    }
}

/// Looks through YAML tags such as `!Host { ... }`.
fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}
