// Path-qualified error accumulation for the rule loader
//
// The loader pushes a segment before descending into an array index or object
// key and pops it on the way back out. Errors are recorded against a snapshot of
// the current path so later pushes and pops never alter what was recorded.

use crate::error::{ParseCountError, PathError, SchemaError};
use log::debug;
use std::fmt;
use std::io::Write;

/// A single step from the document root towards a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Location inside a named rule document (e.g. `rules.json:[2].actions[0].if`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocPath {
    pub filename: String,
    segments: Vec<PathSegment>,
}

impl DocPath {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.filename)?;
        if self.is_root() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Receives every schema error the loader finds.
///
/// Implementations may print, collect or discard; the loader keeps its own
/// count either way.
pub trait ErrorHandler {
    fn record(&mut self, path: &DocPath, error: SchemaError);
}

/// Keeps every error together with a copy of its location.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    pub errors: Vec<PathError>,
}

impl ErrorHandler for ErrorCollector {
    fn record(&mut self, path: &DocPath, error: SchemaError) {
        self.errors.push(PathError {
            path: path.clone(),
            error,
        });
    }
}

/// Writes one line per error to a stream (usually stderr).
pub struct ErrorPrinter<W: Write> {
    stream: W,
}

impl<W: Write> ErrorPrinter<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl<W: Write> ErrorHandler for ErrorPrinter<W> {
    fn record(&mut self, path: &DocPath, error: SchemaError) {
        // Reporting is best effort; a broken stream must not abort the load.
        let _ = writeln!(self.stream, "{}: {}", path, error);
    }
}

/// Drops every error; only the count survives.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardErrors;

impl ErrorHandler for DiscardErrors {
    fn record(&mut self, _path: &DocPath, _error: SchemaError) {}
}

enum Sink<'h> {
    Collect(ErrorCollector),
    External(&'h mut dyn ErrorHandler),
}

/// Error context threaded through every unpack function of a single load.
pub struct Diagnostics<'h> {
    path: DocPath,
    count: usize,
    sink: Sink<'h>,
}

impl<'h> Diagnostics<'h> {
    /// Create a context for the document `name`. Without an external handler
    /// errors are collected and returned itemized from [`Diagnostics::finish`].
    pub fn new(name: impl Into<String>, handler: Option<&'h mut dyn ErrorHandler>) -> Self {
        let sink = match handler {
            Some(handler) => Sink::External(handler),
            None => {
                debug!("Using default error collector");
                Sink::Collect(ErrorCollector::default())
            }
        };
        Self {
            path: DocPath::new(name),
            count: 0,
            sink,
        }
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    pub fn error_count(&self) -> usize {
        self.count
    }

    /// Record an error at the current location.
    pub fn error(&mut self, error: SchemaError) {
        self.count += 1;
        match &mut self.sink {
            Sink::Collect(collector) => collector.record(&self.path, error),
            Sink::External(handler) => handler.record(&self.path, error),
        }
    }

    /// Record an error one key below the current location.
    pub fn error_at_key(&mut self, key: &str, error: SchemaError) {
        self.with_key(key, |diag| diag.error(error));
    }

    /// Run `f` with `key` pushed onto the path.
    pub fn with_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(PathSegment::Key(key.to_string()));
        let result = f(self);
        self.path.pop();
        result
    }

    /// Run `f` with `index` pushed onto the path.
    pub fn with_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(PathSegment::Index(index));
        let result = f(self);
        self.path.pop();
        result
    }

    /// Consume the context, returning the aggregate error if anything was recorded.
    pub fn finish(self) -> Option<ParseCountError> {
        if self.count == 0 {
            return None;
        }
        let errors = match self.sink {
            Sink::Collect(collector) => collector.errors,
            Sink::External(_) => Vec::new(),
        };
        Some(ParseCountError {
            count: self.count,
            name: self.path.filename,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_path_display() {
        let mut path = DocPath::new("config.json");
        assert_eq!(path.to_string(), "config.json:(root)");

        path.push(PathSegment::Index(2));
        assert_eq!(path.to_string(), "config.json:[2]");

        path.push(PathSegment::Key("match".into()));
        path.push(PathSegment::Key("matches".into()));
        path.push(PathSegment::Index(1));
        assert_eq!(path.to_string(), "config.json:[2].match.matches[1]");
    }

    #[test]
    fn test_recorded_path_is_a_snapshot() {
        let mut diag = Diagnostics::new("doc", None);
        diag.with_key("actions", |diag| {
            diag.with_index(3, |diag| diag.error(SchemaError::EmptyNode));
        });
        diag.with_key("children", |diag| diag.error(SchemaError::EmptyList));
        assert!(diag.path().is_root());

        let report = diag.finish().expect("errors were recorded");
        assert_eq!(report.count, 2);
        assert_eq!(report.errors[0].path.to_string(), "doc:actions[3]");
        assert_eq!(report.errors[1].path.to_string(), "doc:children");
    }

    #[test]
    fn test_no_errors_finishes_clean() {
        let diag = Diagnostics::new("doc", None);
        assert!(diag.finish().is_none());
    }

    #[test]
    fn test_external_handler_keeps_items() {
        let mut collector = ErrorCollector::default();
        let mut diag = Diagnostics::new("doc", Some(&mut collector));
        diag.error_at_key("name", SchemaError::MissingKey("name".into()));
        let report = diag.finish().expect("one error");

        assert_eq!(report.count, 1);
        assert!(report.errors.is_empty());
        assert_eq!(collector.errors.len(), 1);
        assert_eq!(collector.errors[0].path.to_string(), "doc:name");
    }

    #[test]
    fn test_printer_writes_lines() {
        let mut printer = ErrorPrinter::new(Vec::new());
        let mut diag = Diagnostics::new("doc", Some(&mut printer));
        diag.with_index(0, |diag| diag.error(SchemaError::EmptyValue));
        drop(diag);

        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "doc:[0]: value must not be empty\n");
    }

    #[test]
    fn test_discard_still_counts() {
        let mut discard = DiscardErrors;
        let mut diag = Diagnostics::new("doc", Some(&mut discard));
        diag.error(SchemaError::EmptyList);
        diag.error(SchemaError::EmptyNode);
        assert_eq!(diag.error_count(), 2);
        assert_eq!(diag.finish().map(|e| e.count), Some(2));
    }
}
