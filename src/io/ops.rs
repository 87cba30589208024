use crate::error::{FmError, Result};
use filetime::FileTime;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where `src` ends up when sent to `dest`: inside it when `dest` is an
/// existing directory, otherwise `dest` itself.
pub fn resolve_target(src: &Path, dest: &Path) -> Result<PathBuf> {
    if dest.is_dir() {
        let file_name = src.file_name().ok_or_else(|| FmError::InvalidSource {
            path: src.to_path_buf(),
        })?;
        Ok(dest.join(file_name))
    } else {
        Ok(dest.to_path_buf())
    }
}

pub fn copy_path(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<PathBuf> {
    let target = resolve_target(src, dest)?;

    if src.is_dir() {
        if target.starts_with(src) {
            return Err(FmError::operation(
                "copy",
                src,
                std::io::Error::new(ErrorKind::InvalidInput, "destination is inside the source directory"),
            ));
        }
        copy_dir_recursive(src, &target, preserve_metadata)?;
    } else {
        if same_file(src, &target) {
            return Err(FmError::operation(
                "copy",
                src,
                std::io::Error::new(ErrorKind::InvalidInput, "source and destination are the same file"),
            ));
        }
        copy_file(src, &target, preserve_metadata)?;
    }
    Ok(target)
}

pub fn move_path(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<PathBuf> {
    let target = resolve_target(src, dest)?;

    match fs::rename(src, &target) {
        Ok(()) => Ok(target),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!("rename across devices, copying {:?} instead", src);
            copy_then_remove(src, &target, preserve_metadata)?;
            Ok(target)
        }
        Err(e) => Err(FmError::operation("move", src, e)),
    }
}

/// Move without rename: copy `src` to exactly `target`, then remove `src`.
fn copy_then_remove(src: &Path, target: &Path, preserve_metadata: bool) -> Result<()> {
    let meta = fs::symlink_metadata(src).map_err(|e| FmError::operation("move", src, e))?;
    if meta.is_dir() {
        copy_dir_recursive(src, target, preserve_metadata)?;
    } else if meta.file_type().is_symlink() {
        copy_symlink(src, target)?;
    } else {
        copy_file(src, target, preserve_metadata)?;
    }
    remove_path(src)
}

/// True when both paths exist and name the same file on disk.
fn same_file(a: &Path, b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino()
    }
    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        matches!((fs::canonicalize(a), fs::canonicalize(b)), (Ok(x), Ok(y)) if x == y)
    }
}

/// Removes a file or link, or a directory with everything below it.
/// Anything else, including a path that no longer exists, is skipped.
pub fn delete_path(path: &Path, use_trash: bool) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    let file_type = meta.file_type();
    if !(file_type.is_file() || file_type.is_symlink() || file_type.is_dir()) {
        return Ok(());
    }

    if use_trash {
        return trash::delete(path).map_err(|e| FmError::Trash {
            path: path.to_path_buf(),
            message: e.to_string(),
        });
    }

    remove_path(path)
}

fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| FmError::operation("delete", path, e))?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FmError::operation("delete", path, e))
}

fn copy_file(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<()> {
    // fs::copy carries permission bits over already
    fs::copy(src, dest).map_err(|e| FmError::operation("copy", src, e))?;

    if preserve_metadata {
        let meta = fs::metadata(src).map_err(|e| FmError::operation("copy", src, e))?;
        filetime::set_file_times(
            dest,
            FileTime::from_last_access_time(&meta),
            FileTime::from_last_modification_time(&meta),
        )
        .map_err(|e| FmError::operation("copy", dest, e))?;
    }
    Ok(())
}

fn copy_dir_recursive(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| FmError::operation("copy", dest, e))?;

    for entry in fs::read_dir(src).map_err(|e| FmError::operation("copy", src, e))? {
        let entry = entry.map_err(|e| FmError::operation("copy", src, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());
        // file_type does not follow links, so a link back up the tree is not walked
        let file_type = entry.file_type().map_err(|e| FmError::operation("copy", &path, e))?;

        if file_type.is_symlink() {
            copy_symlink(&path, &dest_path)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&path, &dest_path, preserve_metadata)?;
        } else {
            copy_file(&path, &dest_path, preserve_metadata)?;
        }
    }

    Ok(())
}

/// Recreates the link itself rather than copying what it points at.
#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let link_target = fs::read_link(src).map_err(|e| FmError::operation("copy", src, e))?;
    std::os::unix::fs::symlink(&link_target, dest).map_err(|e| FmError::operation("copy", dest, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dest: &Path) -> Result<()> {
    tracing::debug!("skipping symlink {:?}", src);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_into_directory_keeps_name_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        let dest = dir.path().join("dest");
        fs::write(&src, "hello").unwrap();
        fs::create_dir(&dest).unwrap();
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, old).unwrap();

        let target = copy_path(&src, &dest, true).unwrap();

        assert_eq!(target, dest.join("file1.txt"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
        let meta = fs::metadata(&target).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
        assert!(src.exists());
    }

    #[test]
    fn test_copy_to_new_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "a").unwrap();

        let target = copy_path(&src, &dir.path().join("b.txt"), false).unwrap();

        assert_eq!(target, dir.path().join("b.txt"));
        assert_eq!(fs::read_to_string(target).unwrap(), "a");
    }

    #[test]
    fn test_copy_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("folder1");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/inner.txt"), "x").unwrap();
        let dest = dir.path().join("dest");
        fs::create_dir(&dest).unwrap();

        copy_path(&src, &dest, true).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("folder1/nested/inner.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_copy_directory_into_itself_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("folder1");
        fs::create_dir(&src).unwrap();

        let err = copy_path(&src, &src, false).unwrap_err();
        assert!(matches!(err, FmError::Operation { op: "copy", .. }));
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_path(&dir.path().join("nope"), &dir.path().join("x"), true).unwrap_err();
        assert!(matches!(err, FmError::Operation { .. }));
    }

    #[test]
    fn test_copy_onto_itself_is_refused_and_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "precious data").unwrap();

        let err = copy_path(&src, &dir.path().join("."), true).unwrap_err();

        assert!(matches!(err, FmError::Operation { op: "copy", .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "precious data");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_directory_keeps_links_as_links() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("folder1");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(&src, src.join("loop")).unwrap();
        let dest = dir.path().join("dest");
        fs::create_dir(&dest).unwrap();

        copy_path(&src, &dest, true).unwrap();

        let copied_link = dest.join("folder1/loop");
        assert!(fs::symlink_metadata(&copied_link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&copied_link).unwrap(), src);
        assert_eq!(fs::read_to_string(dest.join("folder1/a.txt")).unwrap(), "a");
    }

    #[test]
    fn test_copy_then_remove_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("folder1");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/inner.txt"), "x").unwrap();
        let target = dir.path().join("moved");

        copy_then_remove(&src, &target, true).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(target.join("nested/inner.txt")).unwrap(), "x");
    }

    #[test]
    fn test_copy_then_remove_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "m").unwrap();
        let target = dir.path().join("renamed.txt");

        copy_then_remove(&src, &target, false).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "m");
    }

    #[test]
    fn test_copy_then_remove_keeps_source_when_copy_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "m").unwrap();
        let target = dir.path().join("missing_dir/file1.txt");

        assert!(copy_then_remove(&src, &target, false).is_err());
        assert!(src.exists());
    }

    #[test]
    fn test_move_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        let dest = dir.path().join("dest");
        fs::write(&src, "m").unwrap();
        fs::create_dir(&dest).unwrap();

        let target = move_path(&src, &dest, true).unwrap();

        assert_eq!(target, dest.join("file1.txt"));
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "m");
    }

    #[test]
    fn test_delete_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        let folder = dir.path().join("d");
        fs::write(&file, "f").unwrap();
        fs::create_dir_all(folder.join("sub")).unwrap();
        fs::write(folder.join("sub/g.txt"), "g").unwrap();

        delete_path(&file, false).unwrap();
        delete_path(&folder, false).unwrap();

        assert!(!file.exists());
        assert!(!folder.exists());
    }

    #[test]
    fn test_delete_missing_path_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(delete_path(&dir.path().join("gone"), false).is_ok());
    }

    #[test]
    fn test_resolve_target_rejects_nameless_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_target(Path::new("/"), dir.path()).unwrap_err();
        assert!(matches!(err, FmError::InvalidSource { .. }));
    }
}
