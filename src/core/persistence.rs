//! JSON encoding of the stock mapping and the file IO behind `load`/`save`.
//!
//! The on-disk format is a single UTF-8 JSON object whose keys are item
//! names and whose values are integer quantities. There is no version tag.

use crate::utils::error::{InventoryError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const DEFAULT_DATA_FILE: &str = "inventory.json";

pub fn encode(stock: &BTreeMap<String, i64>) -> Result<String> {
    serde_json::to_string(stock).map_err(|e| InventoryError::FormatError {
        origin: "in-memory inventory".to_string(),
        message: e.to_string(),
    })
}

/// Decodes a whole mapping. Any bad entry fails the entire decode.
pub fn decode(text: &str, origin: &str) -> Result<BTreeMap<String, i64>> {
    let format_error = |message: String| InventoryError::FormatError {
        origin: origin.to_string(),
        message,
    };

    let value: Value =
        serde_json::from_str(text).map_err(|e| format_error(format!("invalid JSON: {}", e)))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(format_error(format!(
                "expected a JSON object at top level, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut stock = BTreeMap::new();
    for (name, quantity) in object {
        let quantity = as_quantity(&quantity).ok_or_else(|| {
            format_error(format!(
                "quantity for '{}' must be an integer, found {}",
                name, quantity
            ))
        })?;
        stock.insert(name, quantity);
    }

    Ok(stock)
}

// Whole-number floats such as `7.0` are accepted; JSON does not tell them
// apart from integers.
fn as_quantity(value: &Value) -> Option<i64> {
    if let Some(quantity) = value.as_i64() {
        return Some(quantity);
    }

    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
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

pub fn read_inventory(path: &Path) -> Result<BTreeMap<String, i64>> {
    let bytes = fs::read(path).map_err(|e| InventoryError::io(path, e))?;
    let origin = path.display().to_string();
    let text = std::str::from_utf8(&bytes).map_err(|e| InventoryError::FormatError {
        origin: origin.clone(),
        message: format!("file is not valid UTF-8: {}", e),
    })?;
    decode(text, &origin)
}

/// Writes the mapping to `path`. With `atomic` set, the JSON goes to a
/// temporary file next to the real target which is then renamed over it.
/// Symlinks are followed and an existing file keeps its permissions.
pub fn write_inventory(path: &Path, stock: &BTreeMap<String, i64>, atomic: bool) -> Result<()> {
    let json = encode(stock)?;

    if !atomic {
        return fs::write(path, json).map_err(|e| InventoryError::io(path, e));
    }

    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(InventoryError::io(path, e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InventoryError::io(dir, e))?;

    match fs::metadata(&target) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| InventoryError::io(tmp.path(), e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(InventoryError::io(&target, e)),
    }

    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| InventoryError::io(tmp.path(), e))?;
    tmp.persist(&target)
        .map_err(|e| InventoryError::io(&target, e.error))?;

    Ok(())
}
