//! Errors surfaced by the resource layer (store, config, commands).
//!
//! The markup engine has no error type: malformed markup renders as literal
//! text and bad offsets are clamped. Only loading and saving can fail.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NotemarkError {
    #[error("Notebook entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("No notebook entry matches {0}")]
    NoMatch(String),

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotemarkError>;
