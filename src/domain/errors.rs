// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the errors that can occur when reading, editing, binding or
//! persisting a configuration document. All errors use `thiserror`.

use std::fmt::Display;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Malformed configuration text is never an error: unparseable lines are kept
/// verbatim and carry no data. Errors come from missing keys, values that cannot
/// be coerced on a typed read, binding targets of the wrong shape, and I/O.
///
/// # Examples
///
/// ```
/// use linecfg::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::ConfigKeyNotFound {
///         key: "answer".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key is not in the document.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A marshal or unmarshal target is not a struct.
    #[error("Cannot bind configuration to {found}: expected a struct")]
    ShapeError {
        /// What was found instead of a struct
        found: String,
    },

    /// A custom error raised by a `Serialize` or `Deserialize` implementation
    /// while binding a record.
    #[error("Failed to bind configuration: {message}")]
    BindingError {
        /// The error message
        message: String,
    },

    /// A key cannot be written as the key of a key-value line.
    #[error("Invalid configuration key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// An encoded value cannot be written on a single line.
    #[error("Invalid value for configuration key '{key}': {reason}")]
    InvalidValue {
        /// The key being set
        key: String,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A configuration file could not be opened, read or written.
    #[error("Failed to {action} configuration file '{path}': {source}")]
    FileError {
        /// What was being done with the file ("open", "read", "write", ...)
        action: &'static str,
        /// The file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exceeds the size the file adapter accepts.
    #[error("Configuration file '{path}' too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// The file path
        path: PathBuf,
        /// The size of the file in bytes
        size: u64,
        /// The maximum accepted size in bytes
        max: u64,
    },

    /// An I/O error occurred while reading or writing a configuration stream.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` if this error reports a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::ConfigKeyNotFound { .. })
    }

    /// Returns `true` if this error reports a value of the wrong type.
    pub fn is_type_error(&self) -> bool {
        matches!(self, ConfigError::TypeConversionError { .. })
    }
}

impl serde::ser::Error for ConfigError {
    fn custom<T: Display>(msg: T) -> Self {
        ConfigError::BindingError {
            message: msg.to_string(),
        }
    }
}

impl serde::de::Error for ConfigError {
    fn custom<T: Display>(msg: T) -> Self {
        ConfigError::BindingError {
            message: msg.to_string(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
