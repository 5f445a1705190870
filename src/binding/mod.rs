// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding between configuration documents and serde records.
//!
//! A record is any struct implementing `Serialize` and/or `Deserialize`. Each
//! top-level field maps to one key: the serde field name, so
//! `#[serde(rename = "...")]` chooses the key and `#[serde(skip)]` excludes the
//! field.
//!
//! [`marshal`] writes one `key = value` line per field that has a single-line
//! encoding (integers, floats, booleans, strings, chars, unit enum variants and
//! `Some` of those) in declaration order. Other fields are skipped.
//!
//! [`unmarshal`] fills every field. A key matching the field name exactly is
//! preferred, otherwise the first key in the document matching it ignoring case
//! is used. Missing keys and values that do not parse as the field's type leave
//! the field at its zero value.
//! Names added with `#[serde(alias = "...")]` are matched the same way.
//!
//! # Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Settings {
//!     #[serde(rename = "Answer")]
//!     answer: i64,
//!     verbose: bool,
//! }
//!
//! # fn main() -> linecfg::domain::Result<()> {
//! let text = linecfg::marshal_to_string(&Settings { answer: 42, verbose: true })?;
//! assert_eq!(text, "Answer = 42\nverbose = true\n");
//!
//! let settings: Settings = linecfg::unmarshal(b"answer = 7\nVERBOSE = false")?;
//! assert_eq!(settings, Settings { answer: 7, verbose: false });
//! # Ok(())
//! # }
//! ```

mod de;
mod ser;

use crate::domain::{line, ConfigError, Document, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes the fields of `record` to configuration text.
///
/// Every emitted line ends with a newline.
///
/// # Errors
///
/// Returns [`ConfigError::ShapeError`](crate::domain::ConfigError::ShapeError)
/// if `record` is not a struct, and
/// [`ConfigError::InvalidKey`](crate::domain::ConfigError::InvalidKey) or
/// [`ConfigError::InvalidValue`](crate::domain::ConfigError::InvalidValue) if a
/// field name or encoded value could not be read back as one assignment.
pub fn marshal_to_string<T: Serialize + ?Sized>(record: &T) -> Result<String> {
    let pairs = ser::to_pairs(record)?;
    tracing::debug!("Marshalled {} fields", pairs.len());

    let mut text = String::new();
    for (name, value) in pairs {
        let key = line::normalize_key(name).map_err(|reason| ConfigError::InvalidKey {
            key: name.to_string(),
            reason,
        })?;
        line::check_value(value.as_str()).map_err(|reason| ConfigError::InvalidValue {
            key: key.to_string(),
            reason,
        })?;
        text.push_str(&line::format_assignment(key, value.as_str()));
        text.push('\n');
    }
    Ok(text)
}

/// Serializes the fields of `record` to configuration bytes.
///
/// See [`marshal_to_string`].
pub fn marshal<T: Serialize + ?Sized>(record: &T) -> Result<Vec<u8>> {
    marshal_to_string(record).map(String::into_bytes)
}

/// Serializes the fields of `record` into a new [`Document`].
pub fn marshal_to_config<T: Serialize + ?Sized>(record: &T) -> Result<Document> {
    marshal_to_string(record).map(|text| Document::parse(&text))
}

/// Builds a record from configuration bytes.
///
/// # Errors
///
/// Returns [`ConfigError::IoError`](crate::domain::ConfigError::IoError) if
/// `data` is not valid UTF-8, or
/// [`ConfigError::ShapeError`](crate::domain::ConfigError::ShapeError) if `T` is
/// not a struct.
pub fn unmarshal<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let document = Document::from_reader(data)?;
    unmarshal_from_config(&document)
}

/// Builds a record from a parsed [`Document`].
pub fn unmarshal_from_config<T: DeserializeOwned>(document: &Document) -> Result<T> {
    de::from_document(document)
}
