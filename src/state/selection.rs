// Selection state - paths queued for the next copy, move or delete
use crate::error::{FmError, Result};
use std::path::{Path, PathBuf};

/// Ordered list of selected paths.
pub trait FileSelection {
    /// Replaces the selection with `directory_contents[i]` joined onto
    /// `directory_path` for every in-range index, in the order given.
    /// Out-of-range indices are skipped.
    fn set_from_indices(
        &mut self,
        indices: &[isize],
        directory_path: &Path,
        directory_contents: &[String],
    ) -> Vec<PathBuf>;

    fn get(&self) -> Vec<PathBuf>;

    /// Returns the selection and leaves it empty.
    fn get_and_reset(&mut self) -> Vec<PathBuf>;

    fn clear(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected: Vec<PathBuf>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSelection for SelectionState {
    fn set_from_indices(
        &mut self,
        indices: &[isize],
        directory_path: &Path,
        directory_contents: &[String],
    ) -> Vec<PathBuf> {
        self.selected.clear();
        for &index in indices {
            let Ok(index) = usize::try_from(index) else {
                continue;
            };
            if let Some(name) = directory_contents.get(index) {
                self.selected.push(directory_path.join(name));
            }
        }
        self.selected.clone()
    }

    fn get(&self) -> Vec<PathBuf> {
        self.selected.clone()
    }

    fn get_and_reset(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.selected)
    }

    fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Parses user input such as `"0, 2,5"` into indices.
///
/// Any piece that is not an integer rejects the whole input. Negative
/// numbers parse fine and are dropped later as out of range.
pub fn parse_indices(input: &str) -> Result<Vec<isize>> {
    input
        .split(',')
        .map(|piece| piece.trim().parse::<isize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| FmError::Parse {
            input: input.to_string(),
        })
}
