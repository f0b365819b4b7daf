//! Script discovery.
//!
//! Finds every `.qc` file under a directory tree, skipping hidden entries
//! and build output directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::load::is_script;

/// A discovered script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptFile {
    pub path: PathBuf,
}

impl ScriptFile {
    pub fn new(path: PathBuf) -> Self {
        ScriptFile { path }
    }
}

/// Directory names never searched.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

/// Every script under `root`, sorted by path.
///
/// Hidden entries are skipped. Unreadable directories are skipped too.
pub fn discover_scripts(root: &Path) -> Vec<ScriptFile> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') {
                continue;
            }
            if path.is_dir() {
                if !SKIPPED_DIRS.contains(&name) {
                    pending.push(path);
                }
            } else if is_script(&path) {
                files.push(ScriptFile::new(path));
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Discover scripts at `path`.
///
/// A script file yields itself, a directory is searched recursively and
/// anything else yields nothing.
pub fn discover_scripts_in(path: &Path) -> Vec<ScriptFile> {
    if path.is_dir() {
        discover_scripts(path)
    } else if path.is_file() && is_script(path) {
        vec![ScriptFile::new(path.to_path_buf())]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
