use super::UserInterface;
use crate::entry::FileEntry;
use std::cell::RefCell;
#[cfg(test)]
use std::cell::Ref;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

/// Line-oriented terminal front end.
pub struct ConsoleUi<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl ConsoleUi<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> Ref<'_, W> {
        self.output.borrow()
    }

    fn write_line(&self, line: &str) {
        let mut out = self.output.borrow_mut();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!("terminal write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> UserInterface for ConsoleUi<R, W> {
    fn show_listing(&self, path: &Path, entries: &[FileEntry]) {
        self.write_line(&format!("{}", path.display()));
        if entries.is_empty() {
            self.write_line("  (empty)");
            return;
        }
        let name_width = entries
            .iter()
            .map(|e| e.display_name().chars().count())
            .max()
            .unwrap_or(0)
            .min(48);
        for (index, entry) in entries.iter().enumerate() {
            self.write_line(&format!(
                "{:>4}  {} {:<name_width$}  {:>10}  {}",
                index,
                entry.kind_marker(),
                entry.display_name(),
                entry.display_size(),
                entry.display_modified(),
                name_width = name_width,
            ));
        }
    }

    fn prompt(&self, label: &str) -> Option<String> {
        {
            let mut out = self.output.borrow_mut();
            let _ = write!(out, "{}", label).and_then(|_| out.flush());
        }
        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) => {
                tracing::warn!("terminal read failed: {}", e);
                None
            }
        }
    }

    fn report_info(&self, message: &str) {
        self.write_line(message);
    }

    fn report_error(&self, message: &str) {
        self.write_line(&format!("error: {}", message));
    }
}
