mod directory;
mod fs;
mod ops;

pub use fs::{FileSystem, NativeFileSystem};
