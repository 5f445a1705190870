// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type and its textual encodings.
//!
//! A `ConfigValue` holds the value exactly as it is stored in a document, i.e. in
//! its encoded form. The `from_*` constructors produce that encoded form from Rust
//! values, the `as_*` methods decode it again:
//!
//! | type    | encoding                                                   |
//! |---------|------------------------------------------------------------|
//! | string  | embedded newlines written as the two characters `\` `n`    |
//! | integer | base 10, optional sign, no leading zeros                   |
//! | float   | shortest round-tripping decimal, never in exponent form    |
//! | boolean | `true` or `false`                                          |

use crate::domain::errors::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

const NEWLINE: &str = "\n";
const ESCAPED_NEWLINE: &str = "\\n";

/// A configuration value in its stored, encoded form.
///
/// # Examples
///
/// ```
/// use linecfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from_string("Alea iacta est\nEt tu, Brute?");
/// assert_eq!(value.as_str(), "Alea iacta est\\nEt tu, Brute?");
/// assert_eq!(value.as_string(), "Alea iacta est\nEt tu, Brute?");
///
/// let value = ConfigValue::from_f64(3.14);
/// assert_eq!(value.as_str(), "3.14");
/// assert_eq!(value.as_f64("pi").unwrap(), 3.14);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a value from text that is already in encoded form.
    pub fn new(raw: String) -> Self {
        ConfigValue(raw)
    }

    /// Encodes a string, escaping embedded newlines so the value stays on one line.
    pub fn from_string(value: &str) -> Self {
        ConfigValue(value.replace(NEWLINE, ESCAPED_NEWLINE))
    }

    /// Encodes an integer in base 10.
    pub fn from_i64(value: i64) -> Self {
        ConfigValue(value.to_string())
    }

    /// Encodes an unsigned integer in base 10.
    pub fn from_u64(value: u64) -> Self {
        ConfigValue(value.to_string())
    }

    /// Encodes a float as the shortest decimal that parses back to `value`.
    ///
    /// Rust's `Display` for `f64` never switches to exponent notation, so large and
    /// tiny magnitudes are written out in full.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from_f64(1e21).as_str(), "1000000000000000000000");
    /// assert_eq!(ConfigValue::from_f64(1e-7).as_str(), "0.0000001");
    /// assert_eq!(ConfigValue::from_f64(-2.0).as_str(), "-2");
    /// ```
    pub fn from_f64(value: f64) -> Self {
        ConfigValue(value.to_string())
    }

    /// Encodes a boolean as `true` or `false`.
    pub fn from_bool(value: bool) -> Self {
        ConfigValue(value.to_string())
    }

    /// Returns the encoded value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the value as a string, turning every `\n` sequence into a newline.
    ///
    /// No other escape sequence exists, so a literal backslash followed by `n` can
    /// not be represented.
    pub fn as_string(&self) -> String {
        self.0.replace(ESCAPED_NEWLINE, NEWLINE)
    }

    /// Decodes the value as a boolean.
    ///
    /// Only the exact literals `true` and `false` are accepted, the same ones
    /// [`ConfigValue::from_bool`] writes.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("true").as_bool("flag").unwrap(), true);
    /// assert!(ConfigValue::from("True").as_bool("flag").is_err());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        self.0
            .parse::<bool>()
            .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e))
    }

    /// Decodes the value as a base 10 signed integer.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.0
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Decodes the value as a base 10 unsigned integer.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.0
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Decodes the value as a float. Exponent notation is accepted here.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        self.0
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Parses the decoded string into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("listen").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.as_string()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
