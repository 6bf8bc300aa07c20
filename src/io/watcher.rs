use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the document file for edits made by other programs, standing in
/// for the host application's "document changed elsewhere" signal.
///
/// The parent directory is watched rather than the file itself because many
/// editors save by replacing the file, which would break a file-level watch.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl DocumentWatcher {
    pub fn start(document: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let document = document.canonicalize().unwrap_or_else(|_| document.to_path_buf());
        let dir = document
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let target_name = document.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
            let Ok(event) = result else {
                return;
            };
            match event.kind {
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                _ => return,
            }
            let hit = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == target_name);
            if hit {
                let _ = tx.send(());
            }
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(DocumentWatcher { _watcher: watcher, rx })
    }

    /// Drain pending events. Returns true when the document changed since
    /// the last poll; bursts of events collapse into one change.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
