//! Reading script files from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use qc_ir::Program;
use thiserror::Error;

/// File extension of QuickCode scripts.
pub const SCRIPT_EXTENSION: &str = "qc";

/// Failure to obtain a script's source text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// The path that could not be loaded.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path } | LoadError::Read { path, .. } => path,
        }
    }
}

/// Read a script's source text.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Read and preprocess a script.
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    read_source(path).map(|source| qc_ir::preprocess(&source))
}

/// Whether `path` names a QuickCode script.
pub fn is_script(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
}
