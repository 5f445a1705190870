// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration storage adapter.

use crate::domain::{Document, Result};
use crate::ports::ConfigStorage;

/// Configuration storage that keeps the persisted text in memory.
///
/// Useful for tests and for configuration that is embedded in or generated by
/// the application.
///
/// # Examples
///
/// ```rust
/// use linecfg::adapters::MemoryStorage;
/// use linecfg::ports::ConfigStorage;
///
/// let mut storage = MemoryStorage::new("answer = 42");
/// let mut doc = storage.load().unwrap();
/// doc.set_int("answer", 314).unwrap();
/// storage.store(&doc).unwrap();
/// assert_eq!(storage.contents(), "answer = 314");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    contents: String,
}

impl MemoryStorage {
    /// Creates a storage holding `contents`.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// Returns the stored text.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replaces the stored text, as an external edit would.
    pub fn replace(&mut self, contents: impl Into<String>) {
        self.contents = contents.into();
    }
}

impl ConfigStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Document> {
        Ok(Document::parse(&self.contents))
    }

    fn store(&mut self, document: &Document) -> Result<()> {
        self.contents = document.to_string();
        Ok(())
    }
}
