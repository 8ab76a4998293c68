use crate::config;
use crate::diagnostics::ErrorHandler;
use crate::element::ElementTree;
use crate::rules::Node;
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// A loaded rule forest, ready to apply to documents.
///
/// The engine never mutates its rules, so a shared reference can be used from
/// several threads at once, each applying to its own document.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Node>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Node>) -> Self {
        Self { rules }
    }

    /// Load rules from `path`, failing if any rule in the document is malformed.
    ///
    /// Errors are passed to `handler` as they are found when one is given.
    pub fn from_file(path: impl AsRef<Path>, handler: Option<&mut dyn ErrorHandler>) -> Result<Self> {
        let path = path.as_ref();
        let rules = config::load_file(path, handler)
            .and_then(|report| report.into_result())
            .with_context(|| format!("Error loading rules from {}", path.display()))?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[Node] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every top-level rule to the document root, in order.
    pub fn apply<E: ElementTree>(&self, root: &mut E) -> bool {
        let mut updated = false;
        for rule in &self.rules {
            updated |= rule.apply(root);
        }
        debug!("Applied {} rules to <{}>: changed={}", self.rules.len(), root.tag(), updated);
        updated
    }

    /// Apply to each document, returning how many of them changed.
    pub fn apply_all<E: ElementTree>(&self, documents: &mut [E]) -> usize {
        documents
            .iter_mut()
            .map(|doc| self.apply(doc))
            .filter(|changed| *changed)
            .count()
    }

    /// Canonical JSON form of the rules: a single object for one rule, an
    /// array otherwise.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        match self.rules.as_slice() {
            [rule] => serde_json::to_string_pretty(rule),
            rules => serde_json::to_string_pretty(rules),
        }
    }
}
