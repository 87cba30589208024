use super::directory::read_directory;
use super::ops::{copy_path, delete_path, move_path};
use crate::config::{Config, ListingConfig};
use crate::error::{FmError, Result};
use std::path::Path;

/// Filesystem capabilities the file manager needs.
///
/// Kept narrow so tests can substitute a recording fake for the disk.
pub trait FileSystem {
    /// Entry names of a directory.
    fn list(&self, path: &Path) -> Result<Vec<String>>;

    fn copy(&self, src: &Path, dest: &Path) -> Result<()>;

    fn move_to(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Removes a file, or a directory recursively. Other kinds of entries
    /// are left alone.
    fn delete(&self, path: &Path) -> Result<()>;

    fn is_directory(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;
}

/// Pass-through to the local disk.
#[derive(Clone, Debug, Default)]
pub struct NativeFileSystem {
    pub listing: ListingConfig,
    pub preserve_metadata: bool,
    pub use_trash: bool,
}

impl NativeFileSystem {
    pub fn from_config(config: &Config) -> Self {
        Self {
            listing: config.listing.clone(),
            preserve_metadata: config.operations.preserve_metadata,
            use_trash: config.operations.use_trash,
        }
    }
}

impl FileSystem for NativeFileSystem {
    fn list(&self, path: &Path) -> Result<Vec<String>> {
        read_directory(path, &self.listing).map_err(|source| FmError::List {
            path: path.to_path_buf(),
            source,
        })
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<()> {
        let target = copy_path(src, dest, self.preserve_metadata)?;
        tracing::debug!("copied {:?} -> {:?}", src, target);
        Ok(())
    }

    fn move_to(&self, src: &Path, dest: &Path) -> Result<()> {
        let target = move_path(src, dest, self.preserve_metadata)?;
        tracing::debug!("moved {:?} -> {:?}", src, target);
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        delete_path(path, self.use_trash)?;
        tracing::debug!("deleted {:?}", path);
        Ok(())
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let native = NativeFileSystem::from_config(&Config::default());

        match native.list(&missing) {
            Err(FmError::List { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected list error, got {:?}", other),
        }
    }

    #[test]
    fn test_queries_follow_disk_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file1.txt");
        fs::write(&file, "x").unwrap();
        let native = NativeFileSystem::default();

        assert!(native.exists(&file));
        assert!(!native.is_directory(&file));
        assert!(native.is_directory(dir.path()));

        native.delete(&file).unwrap();
        assert!(!native.exists(&file));
    }
}
