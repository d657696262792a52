use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};
use voting_session::{EventSink, SessionEvent};

/// A session event as recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, starting from zero.
    pub sequence: u64,
    #[serde(with = "ts_seconds")]
    pub emitted_at: DateTime<Utc>,
    pub event: SessionEvent,
}

/// An append-only, in-memory record of everything the session has announced.
#[derive(Debug, Default)]
pub struct EventJournal {
    entries: Vec<JournalEntry>,
}

impl EventJournal {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with a sequence number of at least `since`.
    pub fn since(&self, since: u64) -> &[JournalEntry] {
        // Sequence numbers equal indices, so this is a plain slice.
        let start = usize::try_from(since)
            .map_or(self.entries.len(), |since| since.min(self.entries.len()));
        &self.entries[start..]
    }
}

impl EventSink for EventJournal {
    fn publish(&mut self, event: SessionEvent) {
        let entry = JournalEntry {
            sequence: self.entries.len() as u64,
            emitted_at: Utc::now(),
            event,
        };
        info!("Event #{}: {:?}", entry.sequence, entry.event);
        self.entries.push(entry);
    }
}
