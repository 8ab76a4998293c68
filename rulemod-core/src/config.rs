// Rule document sources
//
// A rule document is the configuration of the engine. It can come from a file,
// a reader, raw bytes or an already-parsed value, as JSON or YAML. All of them
// end up in `loader::load_value`.

use crate::diagnostics::ErrorHandler;
use crate::error::{LoadError, LoadResult};
use crate::loader::{self, LoadReport};
use log::info;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Default rule document path used by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Text format of a rule document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleFormat {
    #[default]
    Json,
    Yaml,
}

impl RuleFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RuleFormat::Yaml
            }
            _ => RuleFormat::Json,
        }
    }
}

/// Load a rule document from disk.
pub fn load_file(
    path: impl AsRef<Path>,
    handler: Option<&mut dyn ErrorHandler>,
) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    let name = path.display().to_string();
    info!("Loading rules from {:?}", name);
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        name: name.clone(),
        source,
    })?;
    load_bytes(&name, &data, RuleFormat::from_path(path), handler)
}

/// Load a rule document from any reader (stdin, network, archive entry).
pub fn load_reader(
    name: &str,
    mut reader: impl Read,
    format: RuleFormat,
    handler: Option<&mut dyn ErrorHandler>,
) -> LoadResult<LoadReport> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|source| LoadError::Io {
            name: name.to_string(),
            source,
        })?;
    load_bytes(name, &data, format, handler)
}

/// Load a rule document from raw bytes.
pub fn load_bytes(
    name: &str,
    data: &[u8],
    format: RuleFormat,
    handler: Option<&mut dyn ErrorHandler>,
) -> LoadResult<LoadReport> {
    let value = parse_document(name, data, format)?;
    loader::load_value(name, &value, handler)
}

/// Load a rule document from a string.
pub fn load_str(
    name: &str,
    text: &str,
    format: RuleFormat,
    handler: Option<&mut dyn ErrorHandler>,
) -> LoadResult<LoadReport> {
    load_bytes(name, text.as_bytes(), format, handler)
}

fn parse_document(name: &str, data: &[u8], format: RuleFormat) -> LoadResult<Value> {
    match format {
        RuleFormat::Json => serde_json::from_slice(data).map_err(|source| LoadError::Json {
            name: name.to_string(),
            source,
        }),
        RuleFormat::Yaml => serde_yaml::from_slice(data).map_err(|source| LoadError::Yaml {
            name: name.to_string(),
            source,
        }),
    }
}
