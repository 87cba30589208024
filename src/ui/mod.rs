mod command;
mod console;

pub use command::{Command, CommandError, HELP};
pub use console::ConsoleUi;

use crate::entry::FileEntry;
use std::path::Path;

/// Everything the session shows to, or asks of, the user.
pub trait UserInterface {
    fn show_listing(&self, path: &Path, entries: &[FileEntry]);

    /// Asks for one line of input. `None` once input is exhausted.
    fn prompt(&self, label: &str) -> Option<String>;

    fn confirm(&self, question: &str) -> bool {
        matches!(
            self.prompt(&format!("{} [y/N] ", question))
                .as_deref()
                .map(str::trim),
            Some("y" | "Y" | "yes")
        )
    }

    fn report_info(&self, message: &str);

    fn report_error(&self, message: &str);
}
