use std::path::{Path, PathBuf};

use compio::fs as cfs;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::filesystem::{DirListing, EntryKind, copy_preserving_times, remove_entry};
use crate::reconciler::compare::{CompareMode, files_match};
use crate::reconciler::{EventSink, PassSummary, SyncEvent};

/// Makes a replica directory tree mirror a source directory tree.
///
/// One call is one pass: children are compared in listing order, source entries
/// first, then replica-only entries are removed. Every mutation is reported to
/// the sink. The first filesystem error aborts the pass.
pub struct Reconciler<S> {
    sink: S,
    compare: CompareMode,
}

impl<S: EventSink> Reconciler<S> {
    pub fn new(sink: S, compare: CompareMode) -> Self {
        Self { sink, compare }
    }

    pub async fn reconcile(
        &self,
        source: &Path,
        replica: &Path,
    ) -> Result<PassSummary, ReconcileError> {
        let mut summary = PassSummary::default();
        self.reconcile_dir(source, replica, &mut summary).await?;
        Ok(summary)
    }

    async fn reconcile_dir(
        &self,
        source: &Path,
        replica: &Path,
        summary: &mut PassSummary,
    ) -> Result<(), ReconcileError> {
        let replica_exists = replica
            .try_exists()
            .context(InspectSnafu { path: replica })?;
        if !replica_exists {
            cfs::create_dir_all(replica)
                .await
                .context(CreateDirSnafu { path: replica })?;
            self.emit(
                summary,
                SyncEvent::DirectoryCreated {
                    path: replica.to_path_buf(),
                },
            );
        }

        let source_listing = DirListing::read(source).context(ListDirSnafu { path: source })?;
        let replica_listing = DirListing::read(replica).context(ListDirSnafu { path: replica })?;
        debug!(
            "Comparing {} ({} entries) with {} ({} entries)",
            source.display(),
            source_listing.len(),
            replica.display(),
            replica_listing.len()
        );

        for name in source_listing.names() {
            let source_path = source.join(name);
            let replica_path = replica.join(name);
            let source_kind =
                EntryKind::of(&source_path).context(InspectSnafu { path: &source_path })?;
            let replica_kind = if replica_listing.contains(name) {
                Some(EntryKind::of_link(&replica_path).context(InspectSnafu {
                    path: &replica_path,
                })?)
            } else {
                None
            };

            // A replica entry of another kind is replaced, never merged into.
            let replica_kind = match replica_kind {
                Some(kind) if kind != source_kind => {
                    debug!(
                        "{} is a {} in the source but a {} in the replica",
                        name.to_string_lossy(),
                        source_kind.as_str(),
                        kind.as_str()
                    );
                    self.remove(&replica_path, kind, summary)?;
                    None
                }
                other => other,
            };

            match source_kind {
                EntryKind::Directory => {
                    Box::pin(self.reconcile_dir(&source_path, &replica_path, summary)).await?;
                }
                _ => {
                    self.sync_file(&source_path, &replica_path, replica_kind.is_some(), summary)
                        .await?;
                }
            }
        }

        for name in replica_listing.missing_from(&source_listing) {
            let replica_path = replica.join(name);
            let kind =
                EntryKind::of_link(&replica_path).context(InspectSnafu { path: &replica_path })?;
            self.remove(&replica_path, kind, summary)?;
        }

        Ok(())
    }

    async fn sync_file(
        &self,
        source: &Path,
        replica: &Path,
        replica_present: bool,
        summary: &mut PassSummary,
    ) -> Result<(), ReconcileError> {
        if replica_present && files_match(source, replica, self.compare).await? {
            debug!("{} is up to date", replica.display());
            summary.unchanged += 1;
            return Ok(());
        }

        copy_preserving_times(source, replica).context(CopySnafu {
            from: source,
            to: replica,
        })?;
        self.emit(
            summary,
            SyncEvent::Copied {
                from: source.to_path_buf(),
                to: replica.to_path_buf(),
            },
        );
        Ok(())
    }

    fn remove(
        &self,
        path: &Path,
        kind: EntryKind,
        summary: &mut PassSummary,
    ) -> Result<(), ReconcileError> {
        remove_entry(path, kind).context(RemoveSnafu { path })?;
        self.emit(
            summary,
            SyncEvent::Removed {
                path: path.to_path_buf(),
                kind,
            },
        );
        Ok(())
    }

    fn emit(&self, summary: &mut PassSummary, event: SyncEvent) {
        summary.count(&event);
        self.sink.record(&event);
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ReconcileError {
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to list directory {}", path.display()))]
    ListDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to inspect {}", path.display()))]
    InspectError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to copy {} to {}", from.display(), to.display()))]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to remove {}", path.display()))]
    RemoveError {
        path: PathBuf,
        source: std::io::Error,
    },
}
