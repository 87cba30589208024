use crate::config::{ListingConfig, SortBy};
use std::fs;
use std::path::Path;

/// Reads the entry names of `path`, filtered and ordered per `options`.
pub fn read_directory(path: &Path, options: &ListingConfig) -> Result<Vec<String>, std::io::Error> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    let read_dir = fs::read_dir(path)?;

    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !options.show_hidden && name.starts_with('.') {
            continue;
        }
        // Follows symlinks so a link to a directory groups with directories
        let is_dir = entry.path().is_dir();
        entries.push((name, is_dir));
    }

    match options.sort_by {
        SortBy::Name => entries.sort_by(|a, b| {
            if options.dirs_first && a.1 != b.1 {
                return b.1.cmp(&a.1);
            }
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        }),
        SortBy::None => {
            if options.dirs_first {
                // Stable sort keeps the native order inside each group
                entries.sort_by(|a, b| b.1.cmp(&a.1));
            }
        }
    }

    Ok(entries.into_iter().map(|(name, _)| name).collect())
}
