//! Output module for harvested documentation
//!
//! This module handles:
//! - Writing the JSON document of clean modules
//! - Rendering a human-readable markdown report
//! - Recording harvest statistics

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, HarvestStatistics};

use crate::model::CleanModule;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes modules to the pretty-printed JSON document
pub fn to_json_string(modules: &[CleanModule]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(modules)?)
}

/// Writes modules as JSON to `path`, creating parent directories
pub fn write_json(modules: &[CleanModule], path: &Path) -> OutputResult<()> {
    write_file(path, &to_json_string(modules)?)
}

pub(crate) fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    Ok(())
}
