// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer tying documents to their storage.
//!
//! This module contains [`PersistedConfig`], which loads a document through a
//! [`ConfigStorage`](crate::ports::ConfigStorage) and writes it back on request.

pub mod persisted;

// Re-export commonly used types
#[cfg(feature = "file")]
pub use persisted::ConfigFile;
pub use persisted::PersistedConfig;
