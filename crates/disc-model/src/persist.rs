//! JSON document read/write shared by sessions and preferences.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SessionError;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SessionError> {
    let json = std::fs::read_to_string(path).map_err(|e| SessionError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&json).map_err(|e| SessionError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SessionError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SessionError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| SessionError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    std::fs::write(path, json).map_err(|e| SessionError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
