// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of raw document lines.
//!
//! Every line of a document is one of three things: a comment, a key-value
//! assignment, or an inert line (blank or malformed) that is kept verbatim but
//! carries no data.

use std::ops::Range;

const COMMENT_MARKER: char = '#';
const ASSIGNMENT: char = '=';
const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// What a single raw line contributes to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A comment line; holds the text after the leading `#`s, trimmed.
    Comment(&'a str),
    /// A key-value line; key and value are trimmed independently.
    KeyValue {
        /// Text before the first `=`
        key: &'a str,
        /// Text after the first `=`
        value: &'a str,
    },
    /// A blank or otherwise unparseable line.
    Inert,
}

impl<'a> LineKind<'a> {
    /// Classifies a raw line.
    ///
    /// # Examples
    ///
    /// ```
    /// use linecfg::domain::line::LineKind;
    ///
    /// assert_eq!(LineKind::of("## hello "), LineKind::Comment("hello"));
    /// assert_eq!(
    ///     LineKind::of("  url = a=b "),
    ///     LineKind::KeyValue { key: "url", value: "a=b" }
    /// );
    /// assert_eq!(LineKind::of("just text"), LineKind::Inert);
    /// ```
    pub fn of(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with(COMMENT_MARKER) {
            return LineKind::Comment(trimmed.trim_start_matches(COMMENT_MARKER).trim());
        }
        match trimmed.split_once(ASSIGNMENT) {
            Some((key, value)) => LineKind::KeyValue {
                key: key.trim(),
                value: value.trim(),
            },
            None => LineKind::Inert,
        }
    }

    /// Returns the key if this is a key-value line.
    pub fn key(&self) -> Option<&'a str> {
        match self {
            LineKind::KeyValue { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Returns `true` if `line` is a key-value line assigning `key`.
pub(crate) fn assigns(line: &str, key: &str) -> bool {
    LineKind::of(line).key() == Some(key)
}

/// Byte range of the value within a key-value line, without surrounding
/// whitespace. `None` for comments and inert lines.
fn value_span(line: &str) -> Option<Range<usize>> {
    LineKind::of(line).key()?;
    let eq = line.find(ASSIGNMENT)?;
    let rest = &line[eq + 1..];
    let start = eq + 1 + (rest.len() - rest.trim_start().len());
    let end = eq + 1 + rest.trim_end().len();
    Some(start..end.max(start))
}

/// Rewrites the value of a key-value line, keeping everything around it.
///
/// A line whose value is empty is rewritten as `<text up to '='> <value>`.
pub(crate) fn replace_value(line: &str, value: &str) -> Option<String> {
    let span = value_span(line)?;
    if span.is_empty() {
        let eq = line.find(ASSIGNMENT)?;
        return Some(format!("{} {}", &line[..=eq], value));
    }
    let mut out = String::with_capacity(line.len() - span.len() + value.len());
    out.push_str(&line[..span.start]);
    out.push_str(value);
    out.push_str(&line[span.end..]);
    Some(out)
}

/// Trims `key` and checks that a line written with it parses back to the same
/// key.
pub(crate) fn normalize_key(key: &str) -> Result<&str, &'static str> {
    let key = key.trim();
    if key.is_empty() {
        Err("key is empty")
    } else if key.starts_with(COMMENT_MARKER) {
        Err("key starts with '#'")
    } else if key.contains(ASSIGNMENT) {
        Err("key contains '='")
    } else if key.contains(LINE_BREAKS) {
        Err("key contains a line break")
    } else {
        Ok(key)
    }
}

/// Checks that an encoded value stays on its line.
pub(crate) fn check_value(value: &str) -> Result<(), &'static str> {
    if value.contains(LINE_BREAKS) {
        Err("value contains a line break")
    } else {
        Ok(())
    }
}

/// Formats a fresh key-value line in canonical form.
pub(crate) fn format_assignment(key: &str, value: &str) -> String {
    format!("{} {} {}", key, ASSIGNMENT, value)
}
