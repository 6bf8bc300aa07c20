use std::fs;
use std::path::{Path, PathBuf};

use crate::model::MatrixPrefs;

/// Error type for preferences I/O.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The preferences file lives next to the document:
/// `novel.json` → `novel.matrix.toml`.
pub fn prefs_path(document: &Path) -> PathBuf {
    document.with_extension("matrix.toml")
}

/// Load preferences for a document. A missing file yields the defaults;
/// a malformed file (including unknown keys) is an error so typos do not
/// silently drop settings.
pub fn load_prefs(document: &Path) -> Result<MatrixPrefs, PrefsError> {
    let path = prefs_path(document);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(MatrixPrefs::default());
        }
        Err(e) => return Err(PrefsError::Read { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| PrefsError::Parse { path, source: e })
}

/// Write preferences back, at panel close.
pub fn save_prefs(document: &Path, prefs: &MatrixPrefs) -> Result<(), PrefsError> {
    let path = prefs_path(document);
    let text = toml::to_string_pretty(prefs)?;
    fs::write(&path, text).map_err(|e| PrefsError::Write { path, source: e })
}
