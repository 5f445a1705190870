// SPDX-License-Identifier: MIT OR Apache-2.0

//! A layout-preserving reader and writer for flat `key = value` configuration
//! files.
//!
//! Configuration text is a sequence of lines. A line whose first non-blank
//! character is `#` is a comment, a line containing `=` assigns the trimmed text
//! before the first `=` as key and the trimmed text after it as value, and every
//! other line is kept but ignored. Values are stored as text: newlines in strings
//! are written as the two characters `\n`, numbers and booleans in their plain
//! decimal and `true`/`false` forms.
//!
//! Editing a [`Document`](domain::Document) rewrites only the value part of the
//! affected lines, so comments, blank lines, spacing and key order survive a
//! load, edit and save cycle. New keys are appended at the end.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The document model and its building blocks (`Document`,
//!   `ConfigKey`, `ConfigValue`, errors)
//! - **Ports**: The `ConfigStorage` trait for loading and storing documents
//! - **Adapters**: Storage implementations (a file on disk, an in-memory buffer)
//! - **Service**: `PersistedConfig`, a document bound to its storage
//! - **Binding**: Marshal and unmarshal serde records to and from documents
//!
//! # Feature Flags
//!
//! - `file`: Enable the file storage adapter and OS config directory discovery
//!   (default)
//!
//! # Quick Start
//!
//! ```rust
//! use linecfg::prelude::*;
//!
//! # fn main() -> linecfg::domain::Result<()> {
//! let mut doc = Document::parse("# Server settings\nport = 8080\nname = main");
//!
//! assert_eq!(doc.get_int("port")?, 8080);
//! assert_eq!(doc.comments(), ["Server settings"]);
//!
//! doc.set_int("port", 9090)?;
//! doc.set_bool("verbose", true)?;
//! assert_eq!(
//!     doc.to_string(),
//!     "# Server settings\nport = 9090\nname = main\nverbose = true"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Records
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Server {
//!     port: u16,
//!     name: String,
//! }
//!
//! # fn main() -> linecfg::domain::Result<()> {
//! let server: Server = linecfg::unmarshal(b"port = 8080\nName = main")?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.name, "main");
//!
//! let text = linecfg::marshal_to_string(&server)?;
//! assert_eq!(text, "port = 8080\nname = main\n");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod binding;
pub mod domain;
pub mod ports;
pub mod service;

pub use binding::{
    marshal, marshal_to_config, marshal_to_string, unmarshal, unmarshal_from_config,
};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::binding::{
        marshal, marshal_to_config, marshal_to_string, unmarshal, unmarshal_from_config,
    };
    pub use crate::domain::{ConfigError, ConfigKey, ConfigValue, Document, Result};
    pub use crate::ports::ConfigStorage;
    pub use crate::service::PersistedConfig;

    pub use crate::adapters::MemoryStorage;

    // Re-export file support based on feature flags
    #[cfg(feature = "file")]
    pub use crate::adapters::FileStorage;
    #[cfg(feature = "file")]
    pub use crate::service::ConfigFile;
}
