use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::model::Novel;

/// Error type for document I/O.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load a manuscript document from a JSON file.
pub fn load_novel(path: &Path) -> Result<Novel, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save the document atomically: write a temp file next to the target,
/// then rename over it, so a crash mid-write never truncates the document.
pub fn save_novel(path: &Path, novel: &Novel) -> Result<(), DocumentError> {
    let text = serde_json::to_string_pretty(novel).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let write_err = |e: std::io::Error| DocumentError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
