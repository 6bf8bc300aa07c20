use std::sync::mpsc::{Receiver, Sender, channel};

/// A change to the document made outside the matrix panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    /// The document was edited elsewhere (reloaded from disk, another view).
    External,
}

/// Token returned by [`ChangeBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// Explicit observer channel between the document owner and its views.
///
/// Single-threaded: publishers and subscribers both live on the event loop.
/// Subscribers drain their receiver each tick; `unsubscribe` is deterministic
/// so a closed panel never receives another notification.
#[derive(Debug, Default)]
pub struct ChangeBus {
    subscribers: Vec<(ObserverId, Sender<DocumentChange>)>,
    next_id: u64,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> (ObserverId, Receiver<DocumentChange>) {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = channel();
        self.subscribers.push((id, tx));
        (id, rx)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn publish(&mut self, change: DocumentChange) {
        // A dropped receiver is as good as an unsubscribe.
        self.subscribers.retain(|(_, tx)| tx.send(change).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
