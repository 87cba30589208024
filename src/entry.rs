use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// One row of a directory listing, with whatever metadata could be read.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(&path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();

        let metadata = fs::metadata(&path).ok();
        let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
        let size = metadata.as_ref().map(|m| m.len());
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| symlink_meta.modified().ok());

        Some(Self {
            path,
            name,
            is_dir,
            is_symlink,
            size,
            modified,
        })
    }

    /// Entry for a name whose metadata is unavailable (vanished, or not
    /// on the local disk at all). Keeps listing indices aligned.
    pub fn bare(path: PathBuf, name: &str) -> Self {
        Self {
            path,
            name: name.to_string(),
            is_dir: false,
            is_symlink: false,
            size: None,
            modified: None,
        }
    }

    pub fn kind_marker(&self) -> char {
        if self.is_symlink {
            'l'
        } else if self.is_dir {
            'd'
        } else {
            '-'
        }
    }

    /// Name as listed: directories end in `/`, links show their target.
    pub fn display_name(&self) -> String {
        if self.is_symlink {
            match fs::read_link(&self.path) {
                Ok(target) => format!("{} \u{2192} {}", self.name, target.display()),
                Err(_) => format!("{} \u{2192}", self.name),
            }
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn display_size(&self) -> String {
        match self.size {
            Some(size) if !self.is_dir => bytesize::ByteSize::b(size).to_string(),
            _ => String::new(),
        }
    }

    pub fn display_modified(&self) -> String {
        self.modified
            .map(|m| DateTime::<Local>::from(m).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}
