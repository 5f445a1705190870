// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! Keys are whatever precedes the first `=` on a key-value line, trimmed. They are
//! compared exactly, except by the binding layer, which also accepts a
//! case-insensitive match against a record's field name.

use std::fmt;

/// A configuration key as it appears in a document.
///
/// # Examples
///
/// ```
/// use linecfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("is_active");
/// assert_eq!(key.as_str(), "is_active");
/// assert!(key.matches_ignore_case("IS_ACTIVE"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if `name` equals this key ignoring case.
    ///
    /// Case folding uses Unicode lowercase mapping, so `"Straße"` and `"STRAßE"`
    /// match while `"ä"` and `"a"` do not.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::from("Answer");
    /// assert!(key.matches_ignore_case("answer"));
    /// assert!(!key.matches_ignore_case("answers"));
    /// ```
    pub fn matches_ignore_case(&self, name: &str) -> bool {
        self.0 == name || self.0.to_lowercase() == name.to_lowercase()
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
