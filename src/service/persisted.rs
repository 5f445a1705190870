// SPDX-License-Identifier: MIT OR Apache-2.0

//! A document tied to the storage it was loaded from.

use crate::domain::{Document, Result};
use crate::ports::ConfigStorage;
use std::ops::{Deref, DerefMut};

/// A [`Document`] together with the storage it is loaded from and persisted to.
///
/// `PersistedConfig` dereferences to its document, so every accessor is
/// available directly. Edits stay in memory until [`PersistedConfig::persist`]
/// is called.
///
/// # Examples
///
/// ```rust
/// use linecfg::adapters::MemoryStorage;
/// use linecfg::service::PersistedConfig;
///
/// # fn main() -> linecfg::domain::Result<()> {
/// let mut config = PersistedConfig::open(MemoryStorage::new("# app\nanswer = 42"))?;
/// assert_eq!(config.get_int("answer")?, 42);
///
/// config.set_int("answer", 314)?;
/// config.persist()?;
/// assert_eq!(config.storage().contents(), "# app\nanswer = 314");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PersistedConfig<S: ConfigStorage> {
    storage: S,
    document: Document,
}

impl<S: ConfigStorage> PersistedConfig<S> {
    /// Loads the document from `storage`.
    pub fn open(storage: S) -> Result<Self> {
        let document = storage.load()?;
        Ok(Self { storage, document })
    }

    /// Writes the current document back to the storage.
    pub fn persist(&mut self) -> Result<()> {
        tracing::debug!(
            "Persisting configuration to storage '{}'",
            self.storage.name()
        );
        self.storage.store(&self.document)
    }

    /// Discards in-memory edits and loads the document from the storage again.
    ///
    /// On error the current document is kept.
    pub fn reload(&mut self) -> Result<()> {
        tracing::debug!(
            "Reloading configuration from storage '{}'",
            self.storage.name()
        );
        self.document = self.storage.load()?;
        Ok(())
    }

    /// Returns the storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the wrapper, returning the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}

impl<S: ConfigStorage> Deref for PersistedConfig<S> {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl<S: ConfigStorage> DerefMut for PersistedConfig<S> {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

/// A configuration file on disk.
#[cfg(feature = "file")]
pub type ConfigFile = PersistedConfig<crate::adapters::FileStorage>;

#[cfg(feature = "file")]
impl PersistedConfig<crate::adapters::FileStorage> {
    /// Opens and parses the configuration file at `path`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use linecfg::service::ConfigFile;
    ///
    /// # fn main() -> linecfg::domain::Result<()> {
    /// let mut config = ConfigFile::open_path("/etc/myapp/app.cfg")?;
    /// config.set_bool("is_active", false)?;
    /// config.persist()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::open(crate::adapters::FileStorage::new(path))
    }

    /// Returns the path of the configuration file.
    pub fn path(&self) -> &std::path::Path {
        self.storage.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::ConfigError;

    #[test]
    fn test_open_reads_storage() {
        let config = PersistedConfig::open(MemoryStorage::new("answer = 42")).unwrap();
        assert_eq!(config.get_int("answer").unwrap(), 42);
        assert_eq!(config.document().len(), 1);
    }

    #[test]
    fn test_edits_stay_in_memory_until_persist() {
        let mut config = PersistedConfig::open(MemoryStorage::new("answer = 42")).unwrap();
        config.set_int("answer", 314).unwrap();
        assert_eq!(config.storage().contents(), "answer = 42");

        config.persist().unwrap();
        assert_eq!(config.storage().contents(), "answer = 314");
    }

    #[test]
    fn test_reload_discards_edits() {
        let mut config = PersistedConfig::open(MemoryStorage::new("answer = 42")).unwrap();
        config.set_int("answer", 314).unwrap();
        config.reload().unwrap();
        assert_eq!(config.get_int("answer").unwrap(), 42);
    }

    struct BrokenStorage;

    impl ConfigStorage for BrokenStorage {
        fn name(&self) -> &str {
            "broken"
        }

        fn load(&self) -> Result<Document> {
            Err(ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "unreachable",
            )))
        }

        fn store(&mut self, _document: &Document) -> Result<()> {
            Err(ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "unreachable",
            )))
        }
    }

    #[test]
    fn test_open_propagates_storage_error() {
        let result = PersistedConfig::open(BrokenStorage);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_into_document() {
        let config = PersistedConfig::open(MemoryStorage::new("a = 1")).unwrap();
        let doc = config.into_document();
        assert_eq!(doc.to_string(), "a = 1");
    }
}
