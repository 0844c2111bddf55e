//! Error types for the editor

use thiserror::Error;

/// Failures reported by a host while touching the page
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node is not a child of the given parent")]
    NotAChild,

    #[error("Node is detached from the document")]
    Detached,

    #[error("Node is not an image")]
    NotAnImage,

    #[error("Host error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
