use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpellcheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to load dictionary: {}", path.display())]
    DictionaryLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Checking engine error: {0}")]
    Engine(String),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpellcheckError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
