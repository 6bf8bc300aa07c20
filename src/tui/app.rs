use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::document_io::{self, save_novel};
use crate::io::watcher::DocumentWatcher;
use crate::model::{ChangeBus, DocumentChange, Novel};

use super::input;
use super::render;
use super::service::PanelService;

/// Top-level application state: the open document, the panel service, and
/// the change bus connecting them.
pub struct App {
    pub novel: Novel,
    pub service: PanelService,
    pub bus: ChangeBus,
    pub should_quit: bool,
    /// Set by input when a gesture changed the document; the event loop
    /// writes the file and clears it.
    pub dirty: bool,
    pub read_only: bool,
    document: PathBuf,
}

impl App {
    /// Load the document and its preferences, then open the matrix panel.
    pub fn open(document: &Path, read_only: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let novel = document_io::load_novel(document)?;
        let prefs = config_io::load_prefs(document)?;

        let mut bus = ChangeBus::new();
        let mut service = PanelService::new();
        service.start_viewer(Some(&novel), prefs, read_only, &mut bus);

        Ok(App {
            novel,
            service,
            bus,
            should_quit: false,
            dirty: false,
            read_only,
            document: document.to_path_buf(),
        })
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Reload the document after it changed on disk and notify the panel.
    /// A document that no longer parses leaves the last good state in place.
    pub fn reload(&mut self) {
        if let Ok(novel) = document_io::load_novel(&self.document) {
            self.novel = novel;
            self.bus.publish(DocumentChange::External);
        }
    }
}

/// Run the matrix panel for a document until the user quits.
pub fn run(document: &Path, read_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open(document, read_only)?;
    let watcher = DocumentWatcher::start(app.document())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &watcher);

    // Persist scroll geometry and preferences
    let document = app.document().to_path_buf();
    app.service.on_close(&mut app.bus, &document)?;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: &DocumentWatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    // Writes made by this process come back through the file watcher;
    // each one is swallowed instead of triggering a reload.
    let mut own_writes = 0u32;

    loop {
        if watcher.poll() {
            if own_writes > 0 {
                own_writes -= 1;
            } else {
                app.reload();
            }
        }
        if let Some(panel) = app.service.panel_mut() {
            panel.poll_changes(&app.novel);
        }

        terminal.draw(|frame| {
            if let Some(panel) = app.service.panel_mut() {
                render::render(frame, panel, &app.novel);
            }
        })?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.dirty {
            if !app.read_only {
                save_novel(app.document(), &app.novel)?;
                own_writes += 1;
            }
            app.dirty = false;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
