// Navigation state - the directory the session is positioned in
use std::path::{Path, PathBuf};

pub struct NavigationState {
    current_path: PathBuf,
}

impl NavigationState {
    pub fn new(start_path: PathBuf) -> Self {
        Self {
            current_path: start_path,
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Moves into `path`. Callers check that it is a directory.
    pub fn descend(&mut self, path: PathBuf) {
        tracing::trace!("descend {:?} -> {:?}", self.current_path, path);
        self.current_path = path;
    }

    /// Moves to the lexical parent. A root (or a bare relative name) has
    /// no parent and stays where it is.
    pub fn go_to_parent(&mut self) -> &Path {
        if let Some(parent) = self.current_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.current_path = parent.to_path_buf();
            }
        }
        &self.current_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of_nested_path() {
        let mut nav = NavigationState::new(PathBuf::from("/home/user/docs"));
        assert_eq!(nav.go_to_parent(), Path::new("/home/user"));
        assert_eq!(nav.go_to_parent(), Path::new("/home"));
        assert_eq!(nav.go_to_parent(), Path::new("/"));
    }

    #[test]
    fn test_root_is_a_fixed_point() {
        let mut nav = NavigationState::new(PathBuf::from("/"));
        assert_eq!(nav.go_to_parent(), Path::new("/"));
        assert_eq!(nav.go_to_parent(), Path::new("/"));
    }

    #[test]
    fn test_parent_is_not_checked_on_disk() {
        let mut nav = NavigationState::new(PathBuf::from("/does/not/exist"));
        assert_eq!(nav.go_to_parent(), Path::new("/does/not"));
    }

    #[test]
    fn test_descend() {
        let mut nav = NavigationState::new(PathBuf::from("/a"));
        nav.descend(PathBuf::from("/a/folder1"));
        assert_eq!(nav.current_path(), Path::new("/a/folder1"));
    }
}
