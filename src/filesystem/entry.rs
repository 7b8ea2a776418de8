use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// The kind of a single directory entry, as far as mirroring is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    /// Classifies `path`, following symbolic links.
    ///
    /// Used on the source side: a link to a directory is a [`EntryKind::Directory`],
    /// a link to anything else is a [`EntryKind::File`]. A dangling link is an error.
    pub fn of(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self::from_file_type(metadata.file_type()))
    }

    /// Classifies `path` without following symbolic links.
    pub fn of_link(path: &Path) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        Ok(Self::from_file_type(metadata.file_type()))
    }

    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
        }
    }
}

/// Names of the immediate children of a directory.
///
/// Keeps the order the operating system returned them in, plus a set for lookups.
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    names: Vec<OsString>,
    index: HashSet<OsString>,
}

impl DirListing {
    pub fn read(dir: &Path) -> io::Result<Self> {
        let mut listing = Self::default();
        for entry in fs::read_dir(dir)? {
            listing.push(entry?.file_name());
        }
        Ok(listing)
    }

    fn push(&mut self, name: OsString) {
        if self.index.insert(name.clone()) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        self.index.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &OsStr> {
        self.names.iter().map(OsString::as_os_str)
    }

    /// Names present here but missing from `other`.
    pub fn missing_from<'a>(&'a self, other: &'a DirListing) -> impl Iterator<Item = &'a OsStr> {
        self.names().filter(|name| !other.contains(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_listing_is_one_level_deep() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "a").expect("Failed to write file");
        fs::create_dir_all(temp_dir.path().join("sub/deeper")).expect("Failed to create dirs");
        fs::write(temp_dir.path().join("sub/deeper/b.txt"), "b").expect("Failed to write file");

        let listing = DirListing::read(temp_dir.path()).expect("Failed to list directory");

        assert_eq!(listing.len(), 2);
        assert!(listing.contains(OsStr::new("a.txt")));
        assert!(listing.contains(OsStr::new("sub")));
        assert!(!listing.contains(OsStr::new("deeper")));
    }

    #[test]
    fn test_empty_listing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let listing = DirListing::read(temp_dir.path()).expect("Failed to list directory");

        assert_eq!(listing.len(), 0);
        assert_eq!(listing.names().count(), 0);
    }

    #[test]
    fn test_listing_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = DirListing::read(&temp_dir.path().join("nope"));

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_from() {
        let left = TempDir::new().expect("Failed to create temp directory");
        let right = TempDir::new().expect("Failed to create temp directory");
        for name in ["shared", "only_left"] {
            fs::write(left.path().join(name), name).expect("Failed to write file");
        }
        fs::write(right.path().join("shared"), "x").expect("Failed to write file");

        let left = DirListing::read(left.path()).expect("Failed to list directory");
        let right = DirListing::read(right.path()).expect("Failed to list directory");

        let missing: Vec<_> = left.missing_from(&right).collect();
        assert_eq!(missing, vec![OsStr::new("only_left")]);
        assert_eq!(right.missing_from(&left).count(), 0);
    }

    #[test]
    fn test_entry_kinds() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file");
        let dir = temp_dir.path().join("dir");
        fs::write(&file, "content").expect("Failed to write file");
        fs::create_dir(&dir).expect("Failed to create dir");

        assert_eq!(EntryKind::of(&file).unwrap(), EntryKind::File);
        assert_eq!(EntryKind::of(&dir).unwrap(), EntryKind::Directory);
        assert_eq!(EntryKind::of_link(&file).unwrap(), EntryKind::File);
        assert_eq!(EntryKind::of_link(&dir).unwrap(), EntryKind::Directory);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_followed_only_by_of() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("dir");
        let link = temp_dir.path().join("link");
        fs::create_dir(&dir).expect("Failed to create dir");
        std::os::unix::fs::symlink(&dir, &link).expect("Failed to create symlink");

        assert_eq!(EntryKind::of(&link).unwrap(), EntryKind::Directory);
        assert_eq!(EntryKind::of_link(&link).unwrap(), EntryKind::Symlink);
    }
}
