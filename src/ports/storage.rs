// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration storage trait definition.
//!
//! This module defines the `ConfigStorage` trait, the port through which a
//! [`Document`] is loaded from and persisted to wherever its text lives. The
//! document model itself never touches files or other resources.

use crate::domain::{Document, Result};

/// A place configuration text is loaded from and persisted to.
///
/// `load` hands the stored text to the parser and returns the resulting
/// document. `store` replaces the stored text with the document's serialized
/// form. Failures of the underlying resource are reported as errors distinct
/// from key and type errors.
///
/// # Examples
///
/// ```rust
/// use linecfg::ports::ConfigStorage;
/// use linecfg::domain::{Document, Result};
///
/// struct StaticStorage;
///
/// impl ConfigStorage for StaticStorage {
///     fn name(&self) -> &str {
///         "static"
///     }
///
///     fn load(&self) -> Result<Document> {
///         Ok(Document::parse("answer = 42"))
///     }
///
///     fn store(&mut self, _document: &Document) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let storage = StaticStorage;
/// let doc = storage.load().unwrap();
/// assert_eq!(doc.get_int("answer").unwrap(), 42);
/// ```
pub trait ConfigStorage {
    /// Returns a short name for this storage, used in logs.
    fn name(&self) -> &str;

    /// Reads and parses the stored configuration.
    fn load(&self) -> Result<Document>;

    /// Replaces the stored configuration with `document`.
    fn store(&mut self, document: &Document) -> Result<()>;
}
