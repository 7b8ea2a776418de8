use std::fs;
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};

use super::EntryKind;

/// Copies `from` over `to`, including permission bits, then stamps `to` with the
/// access and modification times of `from`.
pub fn copy_preserving_times(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;

    let metadata = fs::metadata(from)?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    set_file_times(to, accessed, modified)
}

/// Removes the entry at `path`. Directories go with their whole subtree,
/// symlinks are unlinked without touching their target.
pub fn remove_entry(path: &Path, kind: EntryKind) -> io::Result<()> {
    match kind {
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::File => fs::remove_file(path),
        EntryKind::Symlink => remove_symlink(path),
    }
}

#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    // Directory links on Windows have to be removed as directories.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_symlink(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}
