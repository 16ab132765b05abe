//! File checks performed before processing starts

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Input file helpers
pub struct FileReader;

impl FileReader {
    /// Open the input file, mapping failures to CLI errors
    pub fn open(path: &Path) -> Result<File> {
        let metadata = fs::metadata(path).map_err(|e| Self::access_error(path, e))?;
        if !metadata.is_file() {
            return Err(CliError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            ))
            .into());
        }

        File::open(path).map_err(|e| Self::access_error(path, e))
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }

    fn access_error(path: &Path, err: io::Error) -> anyhow::Error {
        let shown = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => CliError::FileNotFound(shown).into(),
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied(shown).into(),
            _ => anyhow::Error::new(err).context(format!("Failed to open file: {shown}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_open_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("responses.tsv");
        fs::write(&file_path, "Text Response\nfine\n").unwrap();

        let mut content = String::new();
        FileReader::open(&file_path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "Text Response\nfine\n");
    }

    #[test]
    fn test_open_nonexistent_file() {
        let err = FileReader::open(Path::new("/nonexistent/file.tsv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_open_directory_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileReader::open(temp_dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sized.tsv");

        let content = "a".repeat(1024);
        fs::write(&file_path, &content).unwrap();

        let size = FileReader::file_size(&file_path).unwrap();
        assert_eq!(size, 1024);
    }

    #[test]
    fn test_file_size_nonexistent() {
        let result = FileReader::file_size(Path::new("/nonexistent/file.tsv"));

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to get metadata"));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("no_read.tsv");

        fs::write(&file_path, "content").unwrap();

        // Remove read permissions
        let mut permissions = fs::metadata(&file_path).unwrap().permissions();
        permissions.set_mode(0o000);
        fs::set_permissions(&file_path, permissions).unwrap();

        let result = FileReader::open(&file_path);
        // root ignores file modes
        if let Err(err) = result {
            assert!(matches!(
                err.downcast_ref::<CliError>(),
                Some(CliError::PermissionDenied(_))
            ));
        }

        // Restore permissions for cleanup
        let mut permissions = fs::metadata(&file_path).unwrap().permissions();
        permissions.set_mode(0o644);
        fs::set_permissions(&file_path, permissions).unwrap();
    }
}
