use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::protocol::RequestCollection;

/// Reads `path` and decodes it as an object of named requests.
///
/// Entries are not validated here; an empty object is a valid, empty batch.
pub fn load_requests(path: &Path) -> Result<RequestCollection, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_requests(&bytes)
}

pub fn parse_requests(bytes: &[u8]) -> Result<RequestCollection, LoadError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => {
            log::debug!("Loaded {} named request(s)", map.len());
            Ok(map)
        }
        other => {
            log::warn!("Request file top-level value is not an object: {}", kind_of(&other));
            Err(LoadError::NotAnObject)
        }
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
