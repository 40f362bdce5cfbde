//! Save files using `MessagePack`.
//!
//! A save file holds every committed table of a [`Store`]. Uncommitted
//! transactions are never part of it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use delve_foundation::{Error, ErrorKind, Result};
use delve_storage::{Store, Tables};
use tracing::info;

/// Serializes tables to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(tables: &Tables) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(tables)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes tables from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Tables> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Saves the committed state of a store to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the store is unavailable, the file cannot be written,
/// or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(store: &Store, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(&store.snapshot()?)?;

    let file = File::create(path).map_err(|e| io_error("create file", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to file", path, &e))?;
    writer
        .flush()
        .map_err(|e| io_error("flush file", path, &e))?;

    info!(path = %path.display(), bytes = bytes.len(), "store_saved");
    Ok(())
}

/// Loads tables from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Tables> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open file", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read file", path, &e))?;

    let tables = from_bytes(&bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "store_loaded");
    Ok(tables)
}
