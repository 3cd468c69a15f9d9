use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::ast::File;
use crate::error::CoreError;

pub const AST_EXTENSION: &str = "json";

/// Load one serialized AST file.
pub fn load_file(path: impl AsRef<Path>) -> Result<File, CoreError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CoreError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every input in order. Directories are walked recursively for
/// `*.json` files, sorted by path.
pub fn load_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<File>, CoreError> {
    let mut files = Vec::new();
    for input in inputs {
        for path in expand_input(input.as_ref())? {
            debug!(path = %path.display(), "loading AST");
            files.push(load_file(&path)?);
        }
    }
    Ok(files)
}

fn expand_input(root: &Path) -> Result<Vec<PathBuf>, CoreError> {
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| CoreError::Input {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: err.into(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == AST_EXTENSION) {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}
