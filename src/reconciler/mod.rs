//! One-way tree reconciliation.
//!
//! A [`Reconciler`] walks a source and a replica directory side by side and
//! mutates the replica until it holds the same entries, with the same kinds and
//! the same bytes, as the source. Mutations are reported as [`SyncEvent`]s to an
//! injected [`EventSink`].

mod compare;
mod event;
mod reconciler;

pub use compare::CompareMode;
#[cfg(test)]
pub(crate) use event::MemorySink;
pub use event::{EventSink, PassSummary, SyncEvent, TracingSink};
pub use reconciler::{ReconcileError, Reconciler};
