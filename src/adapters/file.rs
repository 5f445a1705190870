// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file storage adapter.
//!
//! This module provides a [`ConfigStorage`] implementation backed by a file on
//! disk, with optional discovery of the file in the OS configuration directory.

use crate::domain::{ConfigError, Document, Result};
use crate::ports::ConfigStorage;
use directories::ProjectDirs;
use std::fs::{self, File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Maximum accepted size of a configuration file (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name used when discovering the configuration in the default location.
pub const DEFAULT_FILE_NAME: &str = "config.cfg";

/// Configuration storage backed by a single file.
///
/// Loading opens the file read-only and parses it as it streams in. Storing
/// truncates the file (creating it and any missing parent directories) and
/// writes the serialized document.
///
/// # Examples
///
/// ```rust,no_run
/// use linecfg::adapters::FileStorage;
/// use linecfg::ports::ConfigStorage;
///
/// // A specific file
/// let storage = FileStorage::new("/etc/myapp/app.cfg");
/// let doc = storage.load().unwrap();
///
/// // The OS-appropriate location, e.g. ~/.config/myapp/config.cfg on Linux
/// let storage = FileStorage::default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    /// Path to the configuration file
    path: PathBuf,
}

impl FileStorage {
    /// Creates a storage for the file at `path`.
    ///
    /// The file is not touched until [`ConfigStorage::load`] or
    /// [`ConfigStorage::store`] is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a storage for `config.cfg` in the OS configuration directory of
    /// the application.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Creates a storage for `filename` in the OS configuration directory of the
    /// application.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::FileError {
                action: "locate",
                path: PathBuf::from(filename),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no home directory to derive a configuration directory from",
                ),
            }
        })?;

        Ok(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path to the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, action: &'static str, source: std::io::Error) -> ConfigError {
        ConfigError::FileError {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStorage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<Document> {
        let file = File::open(&self.path).map_err(|e| self.error("open", e))?;

        // Check file size before reading to avoid pulling in huge files
        let size = file
            .metadata()
            .map_err(|e| self.error("inspect", e))?
            .len();
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::FileTooLarge {
                path: self.path.clone(),
                size,
                max: MAX_CONFIG_FILE_SIZE,
            });
        }

        let document =
            Document::from_reader(file.take(MAX_CONFIG_FILE_SIZE)).map_err(|e| match e {
                ConfigError::IoError(source) => self.error("read", source),
                other => other,
            })?;

        tracing::debug!(
            "Loaded configuration file '{}' ({} keys)",
            self.path.display(),
            document.len()
        );
        Ok(document)
    }

    fn store(&mut self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::FileError {
                    action: "create directory for",
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.error("open", e))?;

        document.write_to(file).map_err(|e| match e {
            ConfigError::IoError(source) => self.error("write", source),
            other => other,
        })?;

        tracing::debug!("Stored configuration file '{}'", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_file_storage_load() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "# app\nanswer = 42\npi = 3.14").unwrap();

        let storage = FileStorage::new(temp_file.path());
        let doc = storage.load().unwrap();

        assert_eq!(storage.name(), "file");
        assert_eq!(doc.get_int("answer").unwrap(), 42);
        assert_eq!(doc.comments(), ["app"]);
    }

    #[test]
    fn test_file_storage_store_truncates() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "answer = 42\nsome = very long line that must go away").unwrap();

        let mut storage = FileStorage::new(temp_file.path());
        let mut doc = storage.load().unwrap();
        doc.unset("some");
        storage.store(&doc).unwrap();

        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "answer = 42");
    }

    #[test]
    fn test_file_storage_store_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("app.cfg");

        let mut storage = FileStorage::new(&path);
        let mut doc = Document::new();
        doc.set_string("foo", "bar").unwrap();
        storage.store(&doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "foo = bar");
    }

    #[test]
    fn test_file_storage_missing_file() {
        let storage = FileStorage::new("/nonexistent/path/to/app.cfg");
        let err = storage.load().unwrap_err();
        assert!(matches!(err, ConfigError::FileError { action: "open", .. }));
    }

    #[test]
    fn test_file_storage_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[b'a', b'=', 0xff, 0xfe]).unwrap();

        let err = FileStorage::new(temp_file.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::FileError { action: "read", .. }));
    }

    #[test]
    fn test_file_storage_path() {
        let storage = FileStorage::new("relative/app.cfg");
        assert_eq!(storage.path(), Path::new("relative/app.cfg"));
    }

    #[test]
    fn test_with_filename_uses_given_name() {
        if let Ok(storage) = FileStorage::with_filename("linecfg-test", "org.example", "x.cfg") {
            assert!(storage.path().ends_with("x.cfg"));
        }
    }

    #[test]
    fn test_default_location_file_name() {
        if let Ok(storage) = FileStorage::default_location("linecfg-test", "org.example") {
            assert!(storage.path().ends_with(DEFAULT_FILE_NAME));
        }
    }
}
