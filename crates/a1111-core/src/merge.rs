//! Merge the default settings table into an on-disk `config.json`.
//!
//! The merge is shallow and lenient: keys already in the file keep their
//! values untouched (no type checking against the defaults), keys missing
//! from the file are appended with their default value, and unknown keys are
//! carried through. A file that is absent, empty or not a JSON object is
//! replaced by the default table.

use crate::atomic::atomic_write_json;
use crate::defaults::default_table;
use crate::{A1111Error, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A flat settings document.
pub type ConfigDocument = Map<String, Value>;

/// Where the starting document of a merge came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// No file at the path.
    Missing,
    /// A zero-length file.
    Empty,
    /// A file whose contents were not a JSON object; they were discarded.
    Invalid { reason: String },
    /// A JSON object read from the file.
    Existing,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Missing => write!(f, "file not found"),
            DocumentSource::Empty => write!(f, "file empty"),
            DocumentSource::Invalid { reason } => write!(f, "invalid JSON: {}", reason),
            DocumentSource::Existing => write!(f, "existing file"),
        }
    }
}

/// Outcome of [`merge_config_file`].
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub path: PathBuf,
    pub source: DocumentSource,
    /// Keys inserted from the default table, in table order.
    pub filled_keys: Vec<String>,
    pub document: ConfigDocument,
}

/// Insert every default key missing from `doc`. Returns the inserted keys.
pub fn merge_defaults(doc: &mut ConfigDocument) -> Vec<String> {
    let mut filled = Vec::new();
    for (key, value) in default_table() {
        if !doc.contains_key(key) {
            doc.insert(key.clone(), value.clone());
            filled.push(key.clone());
        }
    }
    filled
}

/// Parse settings bytes. Anything other than a UTF-8 JSON object is rejected.
///
/// Numbers are kept as written, so integers past 64 bits and exponents past
/// `f64` range survive a merge unchanged.
pub fn parse_document(contents: impl AsRef<[u8]>) -> std::result::Result<ConfigDocument, String> {
    match serde_json::from_slice::<Value>(contents.as_ref()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, found {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

/// Read the starting document for a merge.
///
/// Missing, empty and malformed files all yield a copy of the default table;
/// only genuine filesystem failures are errors.
pub fn load_document(path: &Path) -> Result<(ConfigDocument, DocumentSource)> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No settings file at {}", path.display());
            return Ok((default_table().clone(), DocumentSource::Missing));
        }
        Err(e) => return Err(A1111Error::io_with_path(e, path)),
    };

    if metadata.is_file() && metadata.len() == 0 {
        debug!("Settings file {} is empty", path.display());
        return Ok((default_table().clone(), DocumentSource::Empty));
    }

    let contents = fs::read(path).map_err(|e| A1111Error::io_with_path(e, path))?;

    match parse_document(&contents) {
        Ok(doc) => {
            debug!("Read {} settings from {}", doc.len(), path.display());
            Ok((doc, DocumentSource::Existing))
        }
        Err(reason) => {
            debug!("Discarding malformed settings in {}: {}", path.display(), reason);
            Ok((default_table().clone(), DocumentSource::Invalid { reason }))
        }
    }
}

/// Load `path`, fill in missing defaults and write the result back in place.
pub fn merge_config_file(path: &Path) -> Result<MergeReport> {
    let (mut document, source) = load_document(path)?;
    let filled_keys = merge_defaults(&mut document);

    atomic_write_json(path, &document)?;

    info!(
        "Merged settings into {} ({}, {} defaults filled)",
        path.display(),
        source,
        filled_keys.len()
    );
    if !filled_keys.is_empty() {
        debug!("Filled keys: {}", filled_keys.join(", "));
    }

    Ok(MergeReport {
        path: path.to_path_buf(),
        source,
        filled_keys,
        document,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
