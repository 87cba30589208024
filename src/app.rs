use crate::entry::FileEntry;
use crate::io::FileSystem;
use crate::manager::FileManager;
use crate::state::FileSelection;
use crate::ui::{Command, CommandError, UserInterface, HELP};
use std::path::{Path, PathBuf};

/// Interactive session: reads commands from the user interface and runs
/// them against the file manager until the user quits or input ends.
pub struct App<F, S, U> {
    manager: FileManager<F, S, U>,
    confirm_delete: bool,
}

impl<F: FileSystem, S: FileSelection, U: UserInterface> App<F, S, U> {
    pub fn new(manager: FileManager<F, S, U>, confirm_delete: bool) -> Self {
        Self {
            manager,
            confirm_delete,
        }
    }

    #[cfg(test)]
    pub fn manager(&self) -> &FileManager<F, S, U> {
        &self.manager
    }

    pub fn run(&mut self) {
        tracing::info!("session started in {:?}", self.manager.current_path());
        self.list();

        loop {
            let Some(line) = self.manager.ui().prompt("fmgr> ") else {
                break;
            };
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command),
                Err(CommandError::Empty) => {}
                Err(e) => self.manager.ui().report_error(&e.to_string()),
            }
        }

        tracing::info!("session ended");
    }

    fn execute(&mut self, command: Command) {
        tracing::trace!("command {:?}", command);
        match command {
            Command::List => self.list(),
            Command::Enter(index) => {
                if self.manager.navigate(index).is_some() {
                    self.list();
                }
            }
            Command::Up => {
                self.manager.go_to_parent_directory();
                self.list();
            }
            Command::Pwd => {
                let path = self.manager.current_path().display().to_string();
                self.manager.ui().report_info(&path);
            }
            Command::Select(input) => {
                let selected = self.manager.select_files_by_indices(&input);
                self.show_paths("selected", &selected);
            }
            Command::ShowSelection => {
                let selected = self.manager.selected_files();
                self.show_paths("selected", &selected);
            }
            Command::ClearSelection => {
                self.manager.clear_selection();
                self.manager.ui().report_info("selection cleared");
            }
            Command::Copy(dest) => {
                if let Some(dest) = self.destination(dest) {
                    let count = self.manager.copy_files(&dest);
                    self.manager.ui().report_info(&format!("copied {} item(s)", count));
                }
            }
            Command::Move(dest) => {
                if let Some(dest) = self.destination(dest) {
                    let count = self.manager.move_files(&dest);
                    self.manager.ui().report_info(&format!("moved {} item(s)", count));
                }
            }
            Command::Delete => self.delete(),
            Command::Open(index) => self.open(index),
            Command::Help => self.manager.ui().report_info(HELP),
            Command::Quit => {}
        }
    }

    fn list(&mut self) {
        let names = self.manager.display_directory_contents();
        let current = self.manager.current_path().to_path_buf();
        let entries: Vec<FileEntry> = names
            .iter()
            .map(|name| {
                let path = current.join(name);
                FileEntry::from_path(path.clone()).unwrap_or_else(|| FileEntry::bare(path, name))
            })
            .collect();
        self.manager.ui().show_listing(&current, &entries);
    }

    fn delete(&mut self) {
        let selected = self.manager.selected_files();
        if selected.is_empty() {
            self.manager.ui().report_info("nothing selected");
            return;
        }
        if self.confirm_delete
            && !self
                .manager
                .ui()
                .confirm(&format!("Delete {} item(s)?", selected.len()))
        {
            // Declining keeps the selection for a later attempt
            self.manager.ui().report_info("delete cancelled");
            return;
        }
        let count = self.manager.delete_files();
        self.manager.ui().report_info(&format!("deleted {} item(s)", count));
    }

    fn open(&mut self, index: isize) {
        let Some(path) = self.manager.entry_path(index) else {
            return;
        };
        if let Err(e) = open::that(&path) {
            tracing::warn!("open {:?} failed: {}", path, e);
            self.manager
                .ui()
                .report_error(&format!("could not open {}: {}", path.display(), e));
        }
    }

    /// The destination argument, or one prompted for. Relative paths are
    /// taken from the current directory.
    fn destination(&self, arg: Option<String>) -> Option<PathBuf> {
        let raw = match arg {
            Some(raw) => raw,
            None => self.manager.ui().prompt("destination: ")?,
        };
        let raw = raw.trim();
        if raw.is_empty() {
            self.manager.ui().report_info("no destination given");
            return None;
        }
        Some(resolve_destination(self.manager.current_path(), raw))
    }

    fn show_paths(&self, label: &str, paths: &[PathBuf]) {
        let ui = self.manager.ui();
        ui.report_info(&format!("{} {} item(s)", label, paths.len()));
        for path in paths {
            ui.report_info(&format!("  {}", path.display()));
        }
    }
}

fn resolve_destination(current: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::io::NativeFileSystem;
    use crate::state::SelectionState;
    use crate::ui::ConsoleUi;
    use std::fs;
    use std::io::Cursor;

    type TestApp = App<NativeFileSystem, SelectionState, ConsoleUi<Cursor<Vec<u8>>, Vec<u8>>>;

    fn session(start: &Path, script: &str, confirm_delete: bool) -> TestApp {
        let ui = ConsoleUi::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let native = NativeFileSystem::from_config(&Config::default());
        let manager = FileManager::new(start.to_path_buf(), SelectionState::new(), native, ui);
        let mut app = App::new(manager, confirm_delete);
        app.run();
        app
    }

    fn transcript(app: &TestApp) -> String {
        String::from_utf8(app.manager().ui().output().clone()).unwrap()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("file1.txt"), "one").unwrap();
        fs::write(dir.path().join("file2.txt"), "two").unwrap();
        fs::create_dir(dir.path().join("folder1")).unwrap();
        dir
    }

    #[test]
    fn test_copy_selection_into_subdirectory() {
        let dir = fixture();
        let app = session(dir.path(), "select 0,1\ncopy folder1\nquit\n", true);

        assert_eq!(fs::read_to_string(dir.path().join("folder1/file1.txt")).unwrap(), "one");
        assert_eq!(fs::read_to_string(dir.path().join("folder1/file2.txt")).unwrap(), "two");
        assert!(dir.path().join("file1.txt").exists());
        assert!(transcript(&app).contains("copied 2 item(s)"));
        assert!(app.manager().selected_files().is_empty());
    }

    #[test]
    fn test_copy_onto_own_directory_leaves_file_intact() {
        let dir = fixture();
        fs::write(dir.path().join("file1.txt"), "precious data").unwrap();
        let app = session(dir.path(), "select 0\ncopy .\nquit\n", true);

        assert_eq!(fs::read_to_string(dir.path().join("file1.txt")).unwrap(), "precious data");
        let text = transcript(&app);
        assert!(text.contains("source and destination are the same file"));
        assert!(text.contains("copied 0 item(s)"));
        assert!(app.manager().selected_files().is_empty());
    }

    #[test]
    fn test_move_with_prompted_destination() {
        let dir = fixture();
        let dest = dir.path().join("folder1");
        let script = format!("select 1\nmove\n{}\n", dest.display());
        let app = session(dir.path(), &script, true);

        assert!(!dir.path().join("file2.txt").exists());
        assert!(dest.join("file2.txt").exists());
        assert!(transcript(&app).contains("moved 1 item(s)"));
    }

    #[test]
    fn test_delete_asks_first() {
        let dir = fixture();
        let app = session(dir.path(), "select 0\ndelete\nn\ndelete\ny\n", true);

        assert!(!dir.path().join("file1.txt").exists());
        let text = transcript(&app);
        assert!(text.contains("delete cancelled"));
        assert!(text.contains("deleted 1 item(s)"));
    }

    #[test]
    fn test_navigation_commands() {
        let dir = fixture();
        let app = session(dir.path(), "cd 2\ncd 0\nup\nup\n", false);

        let parent = dir.path().parent().unwrap();
        assert_eq!(app.manager().current_path(), parent);
        // folder1 is empty, so "cd 0" inside it is out of range
        assert!(transcript(&app).contains("error: index 0 out of range (0 entries)"));
    }

    #[test]
    fn test_entering_a_file_is_refused() {
        let dir = fixture();
        let app = session(dir.path(), "cd 0\npwd\n", false);

        assert_eq!(app.manager().current_path(), dir.path());
        assert!(transcript(&app).contains("error: cannot open file file1.txt"));
    }

    #[test]
    fn test_bad_input_is_reported_and_session_continues() {
        let dir = fixture();
        let app = session(dir.path(), "select a\nbogus\n\nselect 2\n", false);

        let text = transcript(&app);
        assert!(text.contains("error: invalid index \"a\""));
        assert!(text.contains("error: unknown command \"bogus\""));
        assert_eq!(app.manager().selected_files(), vec![dir.path().join("folder1")]);
    }

    #[test]
    fn test_resolve_destination() {
        assert_eq!(resolve_destination(Path::new("/a"), "b"), PathBuf::from("/a/b"));
        assert_eq!(resolve_destination(Path::new("/a"), "/dest"), PathBuf::from("/dest"));
    }
}
