//! Loading configuration files and the guarded fact collection entry point.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Deserializer;
use tracing::{debug, warn};

use crate::aggregate::{AggregateOptions, FactAggregator};
use crate::error::{FactsError, Result};
use crate::facts::ConfigFacts;
use crate::value::LastWins;

/// Parses a multi-document YAML stream into facts.
///
/// Documents are deserialized and aggregated one at a time, front to back.
/// A mapping that repeats a key keeps the last value.
///
/// ## Errors
///
/// Returns an error if any document fails to parse, or if aggregation
/// rejects a document under [`MissingKindPolicy::AbortParse`](crate::MissingKindPolicy::AbortParse).
pub fn parse_reader<R: Read>(reader: R, options: &AggregateOptions) -> Result<ConfigFacts> {
    let mut aggregator = FactAggregator::new(*options);
    for document in Deserializer::from_reader(reader) {
        let LastWins(value) = LastWins::deserialize(document)?;
        aggregator.observe(&value)?;
    }
    Ok(aggregator.finish())
}

/// Parses an in-memory multi-document YAML string into facts.
///
/// ## Errors
///
/// Same as [`parse_reader`].
pub fn parse_str(content: &str, options: &AggregateOptions) -> Result<ConfigFacts> {
    parse_reader(content.as_bytes(), options)
}

/// Parses the configuration file at `path` into facts.
///
/// ## Errors
///
/// Returns [`FactsError::Read`] if the file cannot be opened, otherwise the
/// errors of [`parse_reader`].
pub fn parse_config(path: &Path, options: &AggregateOptions) -> Result<ConfigFacts> {
    let file = File::open(path).map_err(|source| FactsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Parsing configuration file {:?}", path);
    parse_reader(BufReader::new(file), options)
}

/// Collects facts for the optional `path`, never failing.
///
/// Every error (no path, unreadable file, invalid YAML, rejected document)
/// is logged at WARN and replaced by [`ConfigFacts::default()`].
///
/// ## Examples
///
/// ```
/// use config_facts_lib::{collect_facts, AggregateOptions, ConfigFacts};
/// use std::path::Path;
///
/// let facts = collect_facts(Some(Path::new("/nonexistent/deploy.yaml")), &AggregateOptions::default());
/// assert_eq!(facts, ConfigFacts::default());
///
/// let facts = collect_facts(None, &AggregateOptions::default());
/// assert_eq!(facts, ConfigFacts::default());
/// ```
pub fn collect_facts(path: Option<&Path>, options: &AggregateOptions) -> ConfigFacts {
    let result = path
        .ok_or(FactsError::MissingPath)
        .and_then(|path| parse_config(path, options));

    match result {
        Ok(facts) => facts,
        Err(e) => {
            warn!("Falling back to default facts: {}", e);
            ConfigFacts::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MissingKindPolicy;

    const DEPLOY_CONFIG: &str = "\
---
apiVersion: starlingx.windriver.com/v1
kind: System
metadata:
  name: vbox
  namespace: deployment
status:
  deploymentScope: principal
---
apiVersion: starlingx.windriver.com/v1
kind: Host
metadata:
  name: controller-0
  namespace: site-a
spec:
  personality: controller
---
apiVersion: starlingx.windriver.com/v1
kind: Host
metadata:
  name: controller-1
  namespace: site-b
";

    #[test]
    fn parse_str_reads_every_document() {
        let facts = parse_str(DEPLOY_CONFIG, &AggregateOptions::default()).expect("parse");
        assert_eq!(
            facts,
            ConfigFacts {
                namespace: "site-b".to_string(),
                principal: true,
                hosts: 2,
            }
        );
    }

    #[test]
    fn parse_str_of_empty_input_is_default() {
        let facts = parse_str("", &AggregateOptions::default()).expect("parse");
        assert_eq!(facts, ConfigFacts::default());
    }

    #[test]
    fn parse_str_skips_empty_documents() {
        let facts = parse_str("---\n---\nkind: host\n---\n", &AggregateOptions::default())
            .expect("parse");
        assert_eq!(facts.hosts, 1);
    }

    #[test]
    fn parse_str_rejects_malformed_yaml() {
        let result = parse_str(
            "kind: Host\n---\nkind: [unterminated\n",
            &AggregateOptions::default(),
        );
        assert!(matches!(result, Err(FactsError::Yaml(_))));
    }

    #[test]
    fn parse_str_propagates_missing_kind_under_strict_policy() {
        let options = AggregateOptions {
            missing_kind: MissingKindPolicy::AbortParse,
        };
        let result = parse_str("kind: Host\n---\nfoo: bar\n", &options);
        assert!(matches!(result, Err(FactsError::MissingKind { index: 1 })));
    }

    #[test]
    fn parse_str_accepts_repeated_keys() {
        let facts = parse_str(
            "kind: Host\nmetadata:\n  name: a\n  name: b\n  namespace: ns1\n",
            &AggregateOptions::default(),
        )
        .expect("parse");
        assert_eq!(facts.namespace, "ns1");
        assert_eq!(facts.hosts, 1);
    }

    #[test]
    fn parse_str_repeated_namespace_uses_last() {
        let facts = parse_str(
            "kind: Host\nmetadata:\n  namespace: first\n  namespace: second\n",
            &AggregateOptions::default(),
        )
        .expect("parse");
        assert_eq!(facts.namespace, "second");
    }

    #[test]
    fn parse_config_reports_missing_file() {
        let result = parse_config(
            Path::new("/definitely/not/here.yaml"),
            &AggregateOptions::default(),
        );
        assert!(matches!(result, Err(FactsError::Read { .. })));
    }

    #[test]
    fn collect_facts_without_path_is_default() {
        assert_eq!(
            collect_facts(None, &AggregateOptions::default()),
            ConfigFacts::default()
        );
    }

    #[test]
    fn collect_facts_with_missing_file_is_default() {
        let facts = collect_facts(
            Some(Path::new("/definitely/not/here.yaml")),
            &AggregateOptions::default(),
        );
        assert_eq!(facts, ConfigFacts::default());
    }
}
