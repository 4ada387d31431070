//! Deployment fact extraction for multi-document YAML configuration files.
//!
//! This library reads a stream of loosely-typed resource documents and
//! reduces them to a fixed-shape [`ConfigFacts`] record for orchestration
//! tooling.
//!
//! ## Core Types
//!
//! - [`ConfigFacts`] - The three-field record: namespace, principal flag, host count
//! - [`ResourceDocument`] - Borrowed view over one YAML document with safe path lookups
//! - [`FactAggregator`] - Folds documents into a [`ConfigFacts`] in a single pass
//!
//! ## Loading
//!
//! - [`parse_config`] - Parse a file into facts, propagating errors
//! - [`parse_str`] / [`parse_reader`] - Same over in-memory or streamed input
//! - [`collect_facts`] - Guarded entry point that always returns a record
//!
//! ## Example
//!
//! ```
//! use config_facts_lib::{parse_str, AggregateOptions};
//!
//! let yaml = "kind: Host\nmetadata:\n  namespace: ns1\n---\nkind: Host\nmetadata:\n  namespace: ns2\n";
//! let facts = parse_str(yaml, &AggregateOptions::default()).unwrap();
//! assert_eq!(facts.namespace, "ns2");
//! assert_eq!(facts.hosts, 2);
//! assert!(!facts.principal);
//! ```

mod aggregate;
mod document;
mod error;
mod facts;
mod parse;
mod value;

pub use aggregate::{AggregateOptions, FactAggregator, MissingKindPolicy, aggregate};
pub use document::{DocumentKind, ResourceDocument};
pub use error::{FactsError, Result};
pub use facts::{ConfigFacts, DEFAULT_NAMESPACE, FALLBACK_JSON};
pub use parse::{collect_facts, parse_config, parse_reader, parse_str};
