//! Error type shared by every stage of a style-diff run

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StyleDiffError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("output directory {0} must not be identical to the source directory")]
    OutputIsSourceRoot(PathBuf),

    #[error("cannot run an empty command")]
    EmptyCommand,

    #[error("executable '{executable}' is not found; install it or fix the executable name")]
    ToolNotFound {
        executable: String,
        source: io::Error,
    },

    #[error("{executable} failed (exit code {code:?}) with the following error output: {stderr}")]
    ToolFailed {
        executable: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("parsing of tool config failed: {0}")]
    ConfigFormat(String),

    #[error("cannot find key '{0}' in tool config")]
    MissingConfigKey(&'static str),

    #[error("uncrustify config is not set; pass a config file or set UNCRUSTIFY_CONFIG")]
    MissingUncrustifyConfig,

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("no files found for analysis")]
    NoFilesFound,

    #[error("{path} is outside of source root {root}")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("file worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, StyleDiffError>;
