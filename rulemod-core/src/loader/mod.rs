// Rule document loader
//
// Turns a loosely-typed JSON value into the rule forest. Every unpack function
// takes the shared Diagnostics context and records problems instead of
// failing, so one load reports every error in the document.
// - unpack.rs: typed field access helpers
// - matches.rs: match objects and action conditions
// - actions.rs: action objects
// - node.rs: rule objects

pub mod actions;
pub mod matches;
pub mod node;
pub mod unpack;

use crate::diagnostics::{Diagnostics, ErrorHandler};
use crate::error::{LoadError, LoadResult, ParseCountError};
use crate::rules::Node;
use log::debug;
use serde_json::Value;

/// Everything salvaged from a rule document, plus the aggregate error if any
/// part of it failed to load.
#[derive(Debug)]
pub struct LoadReport {
    pub nodes: Vec<Node>,
    pub error: Option<ParseCountError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Treat any recorded schema error as a failure of the whole load.
    pub fn into_result(self) -> LoadResult<Vec<Node>> {
        match self.error {
            Some(error) => Err(LoadError::Parse(error)),
            None => Ok(self.nodes),
        }
    }
}

/// Load rules from a JSON value: either one rule object or an array of them.
///
/// Without `handler` errors are collected and itemized in the report; with one
/// they are passed to it as they are found and only counted here.
pub fn load_value(
    name: &str,
    value: &Value,
    handler: Option<&mut dyn ErrorHandler>,
) -> LoadResult<LoadReport> {
    let mut diag = Diagnostics::new(name, handler);
    let nodes = match value {
        Value::Array(raw) => node::unpack_node_list(&mut diag, raw),
        Value::Object(obj) => node::unpack_node(&mut diag, obj).into_iter().collect(),
        other => {
            return Err(LoadError::NotARuleDocument {
                name: name.to_string(),
                actual: unpack::type_name(other),
            })
        }
    };

    debug!(
        "Loaded {} rules from {:?} ({} errors)",
        nodes.len(),
        name,
        diag.error_count()
    );
    Ok(LoadReport {
        nodes,
        error: diag.finish(),
    })
}
