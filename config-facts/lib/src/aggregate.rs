//! Single-pass aggregation of resource documents into [`ConfigFacts`].

use serde_yaml::Value;
use tracing::debug;

use crate::document::{DocumentKind, ResourceDocument};
use crate::error::{FactsError, Result};
use crate::facts::ConfigFacts;

/// How to treat a non-empty document whose `kind` is missing or not a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKindPolicy {
    /// The document is not a host. Its scope still counts toward `principal`.
    #[default]
    TreatAsNonHost,
    /// Fail the whole parse with [`FactsError::MissingKind`], so the caller
    /// falls back to the default record.
    AbortParse,
}

/// Options controlling aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Handling of documents without a usable `kind`.
    pub missing_kind: MissingKindPolicy,
}

/// Folds resource documents into a [`ConfigFacts`] record.
///
/// Each observed document can only add information: `principal` is OR-ed,
/// `hosts` only grows, and `namespace` is overwritten by every host document
/// so the last one wins.
#[derive(Debug, Default)]
pub struct FactAggregator {
    facts: ConfigFacts,
    options: AggregateOptions,
    seen: usize,
}

impl FactAggregator {
    /// Creates an aggregator starting from the default record.
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            facts: ConfigFacts::default(),
            options,
            seen: 0,
        }
    }

    /// Applies one document to the record.
    ///
    /// ## Errors
    ///
    /// Returns [`FactsError::MissingKind`] when the document has no string
    /// `kind` and the policy is [`MissingKindPolicy::AbortParse`].
    pub fn observe(&mut self, value: &Value) -> Result<()> {
        let index = self.seen;
        self.seen += 1;

        let doc = ResourceDocument::new(value);
        if doc.is_empty() {
            debug!(index, "skipping empty document");
            return Ok(());
        }

        self.facts.principal = self.facts.principal || doc.is_principal_scope();

        match doc.kind() {
            DocumentKind::Named(kind) => {
                if doc.is_host() {
                    self.facts.namespace = doc.namespace().to_string();
                    self.facts.hosts += 1;
                    debug!(index, namespace = %self.facts.namespace, "host document");
                } else {
                    debug!(index, kind, "non-host document");
                }
            }
            DocumentKind::Missing | DocumentKind::Invalid => match self.options.missing_kind {
                MissingKindPolicy::TreatAsNonHost => {
                    debug!(index, "document has no string kind, treating as non-host");
                }
                MissingKindPolicy::AbortParse => {
                    return Err(FactsError::MissingKind { index });
                }
            },
        }

        Ok(())
    }

    /// Returns the facts accumulated so far.
    pub fn facts(&self) -> &ConfigFacts {
        &self.facts
    }

    /// Consumes the aggregator and returns the final record.
    pub fn finish(self) -> ConfigFacts {
        self.facts
    }
}

/// Aggregates a sequence of documents in order.
///
/// ## Errors
///
/// Propagates the first error from [`FactAggregator::observe`].
pub fn aggregate<'a, I>(documents: I, options: &AggregateOptions) -> Result<ConfigFacts>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut aggregator = FactAggregator::new(*options);
    for document in documents {
        aggregator.observe(document)?;
    }
    Ok(aggregator.finish())
}
