//! Error types shared by every module.

use thiserror::Error;

/// Errors produced by salestats.
///
/// An empty dataset is never an error: every operation degrades to an empty
/// or zero result instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no {field} selected")]
    EmptySelection { field: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
