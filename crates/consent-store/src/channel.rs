//! # Signaling Channel
//!
//! An append-only, ordered sequence of [`ConsentSignal`]s observed by
//! third-party tags. [`DataLayer`] is the in-process implementation; host
//! bindings forward [`SignalSink::push`] to the page's data layer array.

use parking_lot::RwLock;

use consent_core::ConsentSignal;

/// Receiver of consent signals.
pub trait SignalSink: Send + Sync {
    /// Append `signal`. Must not reorder or drop earlier signals.
    fn push(&self, signal: ConsentSignal);
}

/// In-memory signaling channel.
#[derive(Debug, Default)]
pub struct DataLayer {
    events: RwLock<Vec<ConsentSignal>>,
}

impl DataLayer {
    /// An empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every signal pushed so far, oldest first.
    pub fn events(&self) -> Vec<ConsentSignal> {
        self.events.read().clone()
    }

    /// The most recent signal.
    pub fn last(&self) -> Option<ConsentSignal> {
        self.events.read().last().copied()
    }

    /// Number of signals pushed so far.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// The channel as a JSON array, in the shape tags read it.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.events.read())
    }
}

impl SignalSink for DataLayer {
    fn push(&self, signal: ConsentSignal) {
        self.events.write().push(signal);
    }
}
