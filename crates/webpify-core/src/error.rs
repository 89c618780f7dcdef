use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors. Any of these stops the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Source root does not exist: {}", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("Source root is not a directory: {}", .0.display())]
    SourceRootNotDirectory(PathBuf),

    #[error("Unable to read source root {}: {source}", path.display())]
    SourceRootUnreadable { path: PathBuf, source: io::Error },

    #[error("Unable to create output directory {}: {source}", path.display())]
    OutputDir { path: PathBuf, source: io::Error },
}

/// Per-file errors. These are recorded in the file's result and the run moves on.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("WebP encoding failed: {0}")]
    Encode(String),

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("WebP file was not created at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("cannot delete {}: {source}", path.display())]
    Delete { path: PathBuf, source: io::Error },
}
