// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the configuration model.
//!
//! This module holds the document model and its building blocks: keys, encoded
//! values, line classification and errors. It has no knowledge of where
//! configuration text comes from or goes to.

pub mod config_key;
pub mod config_value;
pub mod document;
pub mod errors;
pub mod line;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use document::Document;
pub use errors::{ConfigError, Result};
