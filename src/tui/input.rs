use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::App;
use super::panel::DisplayOption;

/// Handle a key event.
///
/// `q`, Esc, and Ctrl+Q close the panel and quit. Arrows and `hjkl` move
/// the cell cursor. Space and Enter toggle the selected cell. Shifted
/// `P`/`C`/`L`/`I`/`M` flip the display options (the lowercase letters
/// stay free for movement).
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    let Some(panel) = app.service.panel_mut() else {
        return;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => panel.move_cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => panel.move_cursor(1, 0),
        KeyCode::Left | KeyCode::Char('h') => panel.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => panel.move_cursor(0, 1),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if panel.toggle_cursor_cell(&mut app.novel) {
                app.dirty = true;
            }
        }
        KeyCode::Char('P') => panel.toggle_option(DisplayOption::PlotLines, &app.novel),
        KeyCode::Char('C') => panel.toggle_option(DisplayOption::Characters, &app.novel),
        KeyCode::Char('L') => panel.toggle_option(DisplayOption::Locations, &app.novel),
        KeyCode::Char('I') => panel.toggle_option(DisplayOption::Items, &app.novel),
        KeyCode::Char('M') => panel.toggle_option(DisplayOption::MajorCharactersOnly, &app.novel),
        _ => {}
    }
}

/// Handle a mouse event. Ctrl+Left-click toggles the cell under the
/// pointer; everything else (movement, wheel, Shift+wheel) goes to the
/// scroll frame.
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    let Some(panel) = app.service.panel_mut() else {
        return;
    };
    if let MouseEventKind::Down(MouseButton::Left) = event.kind
        && event.modifiers.contains(KeyModifiers::CONTROL)
    {
        if panel.toggle_cell_at_screen(&mut app.novel, event.column, event.row) {
            app.dirty = true;
        }
        return;
    }
    panel.frame.handle_mouse(&event);
}
