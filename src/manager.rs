use crate::error::{FmError, Result};
use crate::io::FileSystem;
use crate::state::{parse_indices, FileSelection, NavigationState};
use crate::ui::UserInterface;
use std::path::{Path, PathBuf};

/// Drives navigation and the copy/move/delete operations.
///
/// Every failure is recovered here: it is logged, shown through the user
/// interface, and the operation returns its empty value (`Vec::new()`,
/// `None` or `0`).
pub struct FileManager<F, S, U> {
    navigation: NavigationState,
    selection: S,
    file_system: F,
    ui: U,
    /// Last listing and the directory it came from; selection indices
    /// refer to this.
    listing: (PathBuf, Vec<String>),
}

impl<F: FileSystem, S: FileSelection, U: UserInterface> FileManager<F, S, U> {
    pub fn new(start_path: PathBuf, selection: S, file_system: F, ui: U) -> Self {
        Self {
            listing: (start_path.clone(), Vec::new()),
            navigation: NavigationState::new(start_path),
            selection,
            file_system,
            ui,
        }
    }

    pub fn current_path(&self) -> &Path {
        self.navigation.current_path()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    #[cfg(test)]
    pub fn file_system(&self) -> &F {
        &self.file_system
    }

    /// Entry names of the current directory; empty if it cannot be read.
    pub fn display_directory_contents(&mut self) -> Vec<String> {
        match self.list_current() {
            Ok(contents) => contents,
            Err(e) => {
                self.report(&e);
                Vec::new()
            }
        }
    }

    /// Selects entries of the last listing from input like `"0,2"`.
    /// Malformed input leaves the previous selection in place.
    pub fn select_files_by_indices(&mut self, input: &str) -> Vec<PathBuf> {
        let indices = match parse_indices(input) {
            Ok(indices) => indices,
            Err(e) => {
                self.report(&e);
                return Vec::new();
            }
        };
        let (directory, contents) = &self.listing;
        let selected = self.selection.set_from_indices(&indices, directory, contents);
        tracing::debug!("selected {} of {} index(es)", selected.len(), indices.len());
        selected
    }

    pub fn selected_files(&self) -> Vec<PathBuf> {
        self.selection.get()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Enters the directory at `index` of a fresh listing and returns its
    /// path. Files are refused and the current path stays put.
    pub fn navigate(&mut self, index: isize) -> Option<PathBuf> {
        let (full_path, name) = match self.resolve_entry(index) {
            Ok(found) => found,
            Err(e) => {
                self.report(&e);
                return None;
            }
        };

        if self.file_system.is_directory(&full_path) {
            self.navigation.descend(full_path.clone());
            tracing::info!("entered {:?}", full_path);
            Some(full_path)
        } else {
            self.report(&FmError::NotADirectory { name });
            None
        }
    }

    /// Path of the entry at `index` in a fresh listing of the current
    /// directory, whatever kind of entry it is.
    pub fn entry_path(&mut self, index: isize) -> Option<PathBuf> {
        match self.resolve_entry(index) {
            Ok((path, _)) => Some(path),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    pub fn go_to_parent_directory(&mut self) -> PathBuf {
        let parent = self.navigation.go_to_parent().to_path_buf();
        tracing::info!("moved up to {:?}", parent);
        parent
    }

    /// Copies the selection into `destination`. Returns how many paths were
    /// selected, or 0 if any copy failed.
    pub fn copy_files(&mut self, destination: &Path) -> usize {
        self.transfer("copy", destination, |fs, src, dest| fs.copy(src, dest))
    }

    /// Moves the selection into `destination`. Same count rules as
    /// [`copy_files`](Self::copy_files).
    pub fn move_files(&mut self, destination: &Path) -> usize {
        self.transfer("move", destination, |fs, src, dest| fs.move_to(src, dest))
    }

    pub fn delete_files(&mut self) -> usize {
        let selected = self.selection.get_and_reset();
        let result = selected
            .iter()
            .try_for_each(|path| self.file_system.delete(path));

        match result {
            Ok(()) => {
                tracing::info!("deleted {} item(s)", selected.len());
                selected.len()
            }
            Err(e) => {
                self.report(&e);
                0
            }
        }
    }

    fn transfer(
        &mut self,
        op: &str,
        destination: &Path,
        action: impl Fn(&F, &Path, &Path) -> Result<()>,
    ) -> usize {
        let selected = self.selection.get_and_reset();
        // Paths that vanished since selection are skipped but still counted
        let result = selected
            .iter()
            .filter(|path| self.file_system.exists(path))
            .try_for_each(|path| action(&self.file_system, path, destination));

        match result {
            Ok(()) => {
                tracing::info!("{} of {} item(s) to {:?} done", op, selected.len(), destination);
                selected.len()
            }
            Err(e) => {
                self.report(&e);
                0
            }
        }
    }

    fn list_current(&mut self) -> Result<Vec<String>> {
        let current = self.navigation.current_path().to_path_buf();
        let contents = self.file_system.list(&current)?;
        self.listing = (current, contents.clone());
        Ok(contents)
    }

    fn resolve_entry(&mut self, index: isize) -> Result<(PathBuf, String)> {
        let contents = self.list_current()?;
        let name = usize::try_from(index)
            .ok()
            .and_then(|i| contents.get(i))
            .ok_or(FmError::Index {
                index,
                len: contents.len(),
            })?;
        Ok((self.navigation.current_path().join(name), name.clone()))
    }

    fn report(&self, err: &FmError) {
        tracing::warn!("{}", err);
        self.ui.report_error(&err.to_string());
    }
}
