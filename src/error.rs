// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodematchError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid config in {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No submissions found under {0}")]
    EmptyCohort(PathBuf),

    #[error("{0} is not valid UTF-8")]
    NonUtf8(PathBuf),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CodematchError>;

// Allow `?` on std::io::Error by converting to CodematchError::Io with unknown path.
impl From<std::io::Error> for CodematchError {
    fn from(source: std::io::Error) -> Self {
        CodematchError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for CodematchError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(PathBuf::from);
        match (e.into_io_error(), path) {
            (Some(source), Some(path)) => CodematchError::Io { source, path },
            (Some(source), None) => CodematchError::from(source),
            (None, path) => CodematchError::Other(format!(
                "filesystem loop detected at {}",
                path.unwrap_or_default().display()
            )),
        }
    }
}

/// A scorer ran past its step budget. Confined to a single pair: the
/// comparator turns it into a degraded field and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("LCS table of {cells} cells exceeds budget of {limit}")]
    LcsBudget { cells: u128, limit: u128 },

    #[error("ratio alignment exceeded {limit} steps")]
    RatioBudget { limit: u64 },

    #[error("syntax tree comparison exceeded {limit} nodes")]
    TreeBudget { limit: usize },
}
