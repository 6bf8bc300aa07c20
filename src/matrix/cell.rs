/// Edit-lock context handed to every toggle gesture.
///
/// The panel owns one lock and passes it by shared reference, so all cells
/// obey the same lock without any global state. Asserted while the host is
/// in a bulk operation (or the document was opened read-only).
#[derive(Debug, Default)]
pub struct EditLock {
    locked: bool,
}

impl EditLock {
    pub fn new(locked: bool) -> Self {
        EditLock { locked }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}

/// One boolean grid cell bound to a (section, entity) pair.
///
/// The cell is a pure state unit: setting it has no effect on the document;
/// the binding to the relationship lists is performed by the grid's pull and
/// push passes. Cells are not authoritative between syncs.
#[derive(Debug, Default)]
pub struct ToggleCell {
    state: bool,
}

impl ToggleCell {
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    /// The activation gesture. Flips the state unless the lock is asserted.
    /// Returns whether the state changed.
    pub fn toggle(&mut self, lock: &EditLock) -> bool {
        if lock.is_locked() {
            return false;
        }
        self.state = !self.state;
        true
    }

    /// The marker drawn in the cell: filled when true, blank when false.
    pub fn marker(&self) -> &'static str {
        if self.state { "⬛" } else { "" }
    }
}
