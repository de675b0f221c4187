use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vmtask_common::error::TaskError;

pub const GREETING_FILE: &str = "Hello.txt";
pub const GREETING: &str = "Hello";

/// Directory the greeting file goes into.
///
/// A directory is used as is, a file resolves to its parent.
pub fn target_directory(path: &Path) -> Result<PathBuf, TaskError> {
    if !path.exists() {
        return Err(TaskError::PathNotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Ok(path.to_path_buf());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(PathBuf::from(".")),
    }
}

/// Writes [`GREETING`] into `dir/Hello.txt`, replacing an existing file.
pub async fn write_greeting(dir: &Path) -> Result<PathBuf, TaskError> {
    let file_path: PathBuf = dir.join(GREETING_FILE);
    match tokio::fs::write(&file_path, GREETING).await {
        Ok(()) => Ok(file_path),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(TaskError::NotWritable(dir.to_path_buf()))
        }
        Err(source) => Err(TaskError::FileWrite {
            path: file_path,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_its_own_target() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(target_directory(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn file_resolves_to_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        assert_eq!(target_directory(&file).unwrap(), dir.path());
    }

    #[test]
    fn missing_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("home2").join("nobody");

        let err = target_directory(&missing).unwrap_err();
        assert!(matches!(err, TaskError::PathNotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn greeting_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GREETING_FILE), "stale content").unwrap();

        let written = write_greeting(dir.path()).await.unwrap();

        assert_eq!(written, dir.path().join(GREETING_FILE));
        assert_eq!(std::fs::read_to_string(written).unwrap(), GREETING);
    }
}
