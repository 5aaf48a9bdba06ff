use thiserror::Error;

use crate::board::Id;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Validation error: {0}")]
    Validation(String),

    /// A drag start arrived while another drag session was still open.
    #[error("Drag already in progress for {active}")]
    DragInProgress { active: Id },

    #[error("Duplicate id: {0}")]
    DuplicateId(Id),

    #[error("Task {task} references missing column {column}")]
    OrphanTask { task: Id, column: Id },

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
