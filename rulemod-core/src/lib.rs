// rulemod core library
//
// Declarative rules that match elements of an XML-like tree and rewrite their
// attributes. Rule documents are JSON (or YAML) and are validated on load with
// every error reported against its location in the document.

pub mod config;
pub mod diagnostics;
pub mod element;
pub mod engine;
pub mod error;
pub mod loader;
pub mod rules;

// Re-export main types and functions for easy use
pub use config::{load_bytes, load_file, load_reader, load_str, RuleFormat};
pub use diagnostics::{DiscardErrors, DocPath, ErrorCollector, ErrorHandler, ErrorPrinter, PathSegment};
pub use element::{Element, ElementTree};
pub use engine::RuleEngine;
pub use error::{LoadError, ParseCountError, PathError, SchemaError};
pub use loader::{load_value, LoadReport};
pub use rules::{Action, Match, Node, NumberAction, TextMatch};
