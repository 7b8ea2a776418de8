//! Thin filesystem helpers used by the reconciler.
//!
//! Listing is one level deep and never recurses; classification distinguishes
//! following and non-following lookups so source links are mirrored by content
//! while replica links are never written through.

mod entry;
mod ops;

pub use entry::{DirListing, EntryKind};
pub use ops::{copy_preserving_times, remove_entry};
