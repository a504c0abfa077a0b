//! JSON file helpers for client configuration files.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Load a JSON object from `path`.
///
/// Returns an empty map if the file does not exist.
pub fn load_json_map(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let bytes = std::fs::read(path).map_err(|err| Error::io("read", path, err))?;
    match serde_json::from_slice(&bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidInput(format!(
            "Expected JSON object at root: {}",
            path.display()
        ))),
    }
}

/// Pretty-print `map` to `path`, replacing the file and creating parent
/// directories as needed.
pub fn save_json_map(path: &Path, map: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| Error::io("create directory", parent, err))?;
    }
    let bytes = serde_json::to_vec_pretty(map)?;
    std::fs::write(path, bytes).map_err(|err| Error::io("write", path, err))?;
    Ok(())
}
