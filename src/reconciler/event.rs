use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::filesystem::EntryKind;

/// A mutating action performed on the replica tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    DirectoryCreated { path: PathBuf },
    Copied { from: PathBuf, to: PathBuf },
    Removed { path: PathBuf, kind: EntryKind },
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::DirectoryCreated { path } => {
                write!(f, "Created directory {}", path.display())
            }
            SyncEvent::Copied { from, to } => {
                write!(f, "Copied {} to {}", from.display(), to.display())
            }
            SyncEvent::Removed { path, kind } => {
                write!(f, "Removed {} {}", kind.as_str(), path.display())
            }
        }
    }
}

/// Receives every mutating action as it happens.
pub trait EventSink {
    fn record(&self, event: &SyncEvent);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn record(&self, event: &SyncEvent) {
        (**self).record(event)
    }
}

/// Emits one `info` record per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &SyncEvent) {
        info!("{event}");
    }
}

/// Counters for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub created: usize,
    pub copied: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl PassSummary {
    pub(super) fn count(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::DirectoryCreated { .. } => self.created += 1,
            SyncEvent::Copied { .. } => self.copied += 1,
            SyncEvent::Removed { .. } => self.removed += 1,
        }
    }

    /// True when the pass left the replica untouched.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.copied == 0 && self.removed == 0
    }
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} copied, {} removed, {} unchanged",
            self.created, self.copied, self.removed, self.unchanged
        )
    }
}

#[cfg(test)]
pub(crate) use memory::MemorySink;
