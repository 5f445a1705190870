// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory configuration document.
//!
//! A `Document` keeps two views of the same configuration:
//!
//! - the raw lines, in source order, which are what gets written back out;
//! - an index from key to stored value, which is what typed reads consult.
//!
//! Every mutation goes through [`Document::set`] or [`Document::unset`], which
//! update both views together. Editing an existing key rewrites only the value
//! part of its line, so comments, blank lines, spacing and key spelling survive
//! any number of edits.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::line::{self, LineKind};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};

/// A parsed configuration document.
///
/// # Examples
///
/// ```
/// use linecfg::domain::Document;
///
/// let mut doc = Document::parse("# Settings\nanswer = 42\npi = 3.14");
/// assert_eq!(doc.get_int("answer").unwrap(), 42);
///
/// doc.set_int("answer", 404).unwrap();
/// doc.set_bool("is_active", true).unwrap();
/// assert_eq!(
///     doc.to_string(),
///     "# Settings\nanswer = 404\npi = 3.14\nis_active = true"
/// );
/// assert_eq!(doc.comments(), ["Settings"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    comments: Vec<String>,
    values: HashMap<String, String>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration text.
    ///
    /// Parsing in-memory text cannot fail: lines that are neither comments nor
    /// assignments are kept verbatim and ignored. Lines are split on `\n`; a
    /// trailing `\r` is dropped and a final newline does not add an empty line.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        for raw in text.lines() {
            doc.push_line(raw.to_string());
        }
        doc.trace_parsed();
        doc
    }

    /// Parses configuration text from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the reader fails or yields invalid
    /// UTF-8. The content itself never causes an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut doc = Self::new();
        for raw in BufReader::new(reader).lines() {
            doc.push_line(raw?);
        }
        doc.trace_parsed();
        Ok(doc)
    }

    /// Writes the serialized document to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.to_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn push_line(&mut self, raw: String) {
        match LineKind::of(&raw) {
            LineKind::Comment(text) => self.comments.push(text.to_string()),
            LineKind::KeyValue { key, value } => {
                self.values.insert(key.to_string(), value.to_string());
            }
            LineKind::Inert => {}
        }
        self.lines.push(raw);
    }

    fn trace_parsed(&self) {
        tracing::debug!(
            "Parsed configuration: {} lines, {} keys, {} comments",
            self.lines.len(),
            self.values.len(),
            self.comments.len()
        );
    }

    /// Returns the comments in source order, without their `#` markers.
    ///
    /// Comments are read-only: no operation adds, edits or removes them.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns the raw lines in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the keys in the order they first appear in the document.
    pub fn keys(&self) -> Vec<ConfigKey> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter_map(|raw| LineKind::of(raw).key())
            .filter(|key| self.values.contains_key(*key) && seen.insert(*key))
            .map(ConfigKey::from)
            .collect()
    }

    /// Returns `true` if the document defines `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key.trim())
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the document defines no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the stored value for `key`, still in encoded form.
    ///
    /// Like every lookup, surrounding whitespace in `key` is ignored.
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key.trim()).map(|v| ConfigValue::from(v.as_str()))
    }

    fn require(&self, key: &str) -> Result<ConfigValue> {
        self.get(key).ok_or_else(|| ConfigError::ConfigKeyNotFound {
            key: key.to_string(),
        })
    }

    /// Returns the value for `key` as a string, with `\n` sequences turned into
    /// newlines.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigKeyNotFound`] if the key is not defined.
    pub fn get_string(&self, key: &str) -> Result<String> {
        Ok(self.require(key)?.as_string())
    }

    /// Returns the value for `key` as a base 10 integer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigKeyNotFound`] if the key is not defined,
    /// [`ConfigError::TypeConversionError`] if the value is not an integer or
    /// does not fit in an `i64`.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.require(key)?.as_i64(key)
    }

    /// Returns the value for `key` as a float.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigKeyNotFound`] if the key is not defined,
    /// [`ConfigError::TypeConversionError`] if the value is not a float.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.require(key)?.as_f64(key)
    }

    /// Returns the value for `key` as a boolean (`true` or `false`).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigKeyNotFound`] if the key is not defined,
    /// [`ConfigError::TypeConversionError`] if the value is not `true` or `false`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.require(key)?.as_bool(key)
    }

    /// Sets `key` to a string, escaping embedded newlines.
    ///
    /// # Errors
    ///
    /// See [`Document::set`].
    pub fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(key, ConfigValue::from_string(value))
    }

    /// Sets `key` to an integer.
    pub fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.set(key, ConfigValue::from_i64(value))
    }

    /// Sets `key` to a float, written without exponent.
    pub fn set_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.set(key, ConfigValue::from_f64(value))
    }

    /// Sets `key` to `true` or `false`.
    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.set(key, ConfigValue::from_bool(value))
    }

    /// Sets `key` to an already encoded value.
    ///
    /// Surrounding whitespace is trimmed from `key`. A new key is appended as a
    /// `key = value` line at the end of the document. For an existing key, the
    /// value part of every line assigning it is replaced in place and the rest of
    /// the line is left as it was.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidKey`] if `key` is empty, starts with `#` or
    /// contains `=` or a line break, [`ConfigError::InvalidValue`] if `value`
    /// contains a line break. The document is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::{ConfigValue, Document};
    ///
    /// let mut doc = Document::new();
    /// doc.set(" mode ", ConfigValue::from("fast")).unwrap();
    /// assert_eq!(doc.to_string(), "mode = fast");
    ///
    /// assert!(doc.set("a=b", ConfigValue::from("1")).is_err());
    /// assert!(doc.set("mode", ConfigValue::from("two\nlines")).is_err());
    /// assert_eq!(doc.to_string(), "mode = fast");
    /// ```
    pub fn set(&mut self, key: &str, value: ConfigValue) -> Result<()> {
        let key = line::normalize_key(key).map_err(|reason| ConfigError::InvalidKey {
            key: key.to_string(),
            reason,
        })?;
        let value = value.as_str();
        line::check_value(value).map_err(|reason| ConfigError::InvalidValue {
            key: key.to_string(),
            reason,
        })?;

        if self.values.contains_key(key) {
            let mut updated = 0usize;
            let assigning = self
                .lines
                .iter_mut()
                .filter(|raw| line::assigns(raw.as_str(), key));
            for raw in assigning {
                if let Some(rewritten) = line::replace_value(raw, value) {
                    *raw = rewritten;
                    updated += 1;
                }
            }
            tracing::trace!("Updated key '{}' on {} line(s)", key, updated);
        } else {
            self.lines.push(line::format_assignment(key, value));
            tracing::trace!("Appended new key '{}'", key);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Removes `key` and the first line assigning it.
    ///
    /// Unsetting a key that is not defined does nothing. Comments are never
    /// removed.
    pub fn unset(&mut self, key: &str) {
        let key = key.trim();
        if self.values.remove(key).is_none() {
            return;
        }
        if let Some(pos) = self.lines.iter().position(|raw| line::assigns(raw, key)) {
            self.lines.remove(pos);
        }
        tracing::trace!("Unset key '{}'", key);
    }
}

impl fmt::Display for Document {
    /// Joins the raw lines with `\n`, without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, raw) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(raw)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Document {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Document::parse(s))
    }
}
