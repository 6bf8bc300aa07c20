use std::path::Path;

use crate::io::config_io::{self, PrefsError};
use crate::model::{ChangeBus, MatrixPrefs, Novel};

use super::panel::MatrixPanel;

/// Panel lifecycle, as driven by the host application: open on the "start
/// viewer" request, relay lock signals, persist preferences on close.
///
/// At most one panel exists at a time; a second open request while one is
/// showing is a focus request and changes nothing.
#[derive(Default)]
pub struct PanelService {
    panel: Option<MatrixPanel>,
}

impl PanelService {
    pub fn new() -> Self {
        PanelService::default()
    }

    /// Open the viewer for the current document. With no document open the
    /// request is ignored.
    pub fn start_viewer(
        &mut self,
        novel: Option<&Novel>,
        prefs: MatrixPrefs,
        locked: bool,
        bus: &mut ChangeBus,
    ) {
        let Some(novel) = novel else {
            return;
        };
        if self.panel.is_some() {
            return;
        }
        self.panel = Some(MatrixPanel::open(novel, prefs, locked, bus));
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel(&self) -> Option<&MatrixPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut MatrixPanel> {
        self.panel.as_mut()
    }

    /// Host lock signal, forwarded to the open panel.
    pub fn lock(&mut self) {
        if let Some(panel) = &mut self.panel {
            panel.lock();
        }
    }

    pub fn unlock(&mut self) {
        if let Some(panel) = &mut self.panel {
            panel.unlock();
        }
    }

    /// Close the panel: record its scroll geometry, drop the change
    /// subscription, and write the preferences file next to the document.
    pub fn on_close(&mut self, bus: &mut ChangeBus, document: &Path) -> Result<(), PrefsError> {
        let Some(mut panel) = self.panel.take() else {
            return Ok(());
        };
        panel.close(bus);
        config_io::save_prefs(document, &panel.prefs)
    }
}
