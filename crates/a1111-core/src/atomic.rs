//! Atomic file operations for safe JSON persistence.
//!
//! Implements atomic writes using:
//! 1. Write to a sibling temp file with a unique PID+TID suffix
//! 2. fsync to ensure data reaches disk
//! 3. Atomic rename over the target path

use crate::config::MergeConfig;
use crate::{A1111Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use tracing::{debug, warn};

/// Serialize to pretty JSON with four-space indentation and no trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(MergeConfig::INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser).map_err(|e| A1111Error::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    // serde_json only ever emits valid UTF-8
    String::from_utf8(buf).map_err(|e| A1111Error::Other(e.to_string()))
}

/// Write data to a JSON file atomically, replacing whatever is at `path`.
///
/// The parent directory must already exist. An existing target's permissions
/// are carried over to the new file. A symlink at `path` is replaced by a
/// regular file rather than written through.
pub fn atomic_write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let serialized = to_pretty_json(data)?;

    // Validate JSON by re-parsing
    serde_json::from_str::<serde_json::Value>(&serialized).map_err(|e| A1111Error::Json {
        message: format!("JSON validation failed: {}", e),
        source: Some(e),
    })?;

    let existing_permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(A1111Error::io_with_path(e, path)),
    };

    let temp_path = temp_path_for(path);

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| A1111Error::io_with_path(e, &temp_path))?;

        file.write_all(serialized.as_bytes())
            .map_err(|e| A1111Error::io_with_path(e, &temp_path))?;

        file.flush()
            .map_err(|e| A1111Error::io_with_path(e, &temp_path))?;

        if let Some(permissions) = existing_permissions {
            file.set_permissions(permissions)
                .map_err(|e| A1111Error::io_with_path(e, &temp_path))?;
        }

        file.sync_all()
            .map_err(|e| A1111Error::io_with_path(e, &temp_path))?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!(
                "Failed to remove temp file {}: {}",
                temp_path.display(),
                cleanup
            );
        }
        return Err(A1111Error::io_with_path(e, path));
    }

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

/// Sibling temp path, e.g. `config.json` -> `config.json.1234.5678.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("settings"));
    name.push(format!(
        ".{}.{}.{}",
        process::id(),
        thread_id(),
        MergeConfig::TEMP_SUFFIX
    ));
    path.with_file_name(name)
}

/// Get a unique thread identifier.
fn thread_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    thread::current().id().hash(&mut hasher);
    hasher.finish()
}
