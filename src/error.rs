use std::path::PathBuf;

use thiserror::Error;

use crate::config::exit;

/// Fatal failures while loading the request file. None of them lets a request go out.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} no such file or directory", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode your JSON file")]
    Malformed(#[from] serde_json::Error),
    #[error("Failed to decode your JSON file: top-level value must be an object of named requests")]
    NotAnObject,
}

impl LoadError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::NotFound(_) | LoadError::Unreadable { .. } => exit::ERR_FILE_NOT_FOUND,
            LoadError::Malformed(_) | LoadError::NotAnObject => exit::ERR_WRONG_JSON,
        }
    }
}

/// Per-request failures. The batch keeps going after any of these.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Server returns wrong status code")]
    UnexpectedStatus(u16),
    #[error("Failed to decode the answer from the JSON RPC server")]
    MalformedResponse,
    #[error("Failed to reach the JSON RPC server: {0}")]
    Transport(String),
    #[error("Failed to encode the request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::UnexpectedStatus(_) => exit::ERR_STATUS_CODE,
            DispatchError::MalformedResponse | DispatchError::Encode(_) => exit::ERR_WRONG_JSON,
            DispatchError::Transport(_) => exit::ERR_TRANSPORT,
        }
    }
}
