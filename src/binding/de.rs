// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde `Deserializer` filling a record from a [`Document`].
//!
//! Every field the record declares is produced, whether or not the document has a
//! matching key. A field with no key, or whose value cannot be coerced to the
//! field's type, receives the zero value of that type (`0`, `0.0`, `false`, an
//! empty string, `None`, an empty collection, ...). Coercion failures are logged
//! at debug level and never reported as errors.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Document, Result};
use serde::de::value::{MapDeserializer, StrDeserializer, StringDeserializer};
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor,
};
use std::str::FromStr;

/// Builds a `T` from the keys of `document`.
pub(crate) fn from_document<T: DeserializeOwned>(document: &Document) -> Result<T> {
    T::deserialize(RecordDeserializer {
        document,
        type_name: std::any::type_name::<T>(),
        groups: field_groups::<T>(),
    })
}

/// Accepts a struct and rejects everything else.
struct RecordDeserializer<'a> {
    document: &'a Document,
    type_name: &'static str,
    groups: Option<Vec<Vec<&'static str>>>,
}

impl<'de, 'a> de::Deserializer<'de> for RecordDeserializer<'a> {
    type Error = ConfigError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(ConfigError::ShapeError {
            found: self.type_name.to_string(),
        })
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let groups = self
            .groups
            .filter(|groups| groups.concat() == fields)
            .unwrap_or_else(|| fields.iter().map(|&field| vec![field]).collect());
        tracing::trace!(
            "Binding {} fields of '{}' from {} keys",
            groups.len(),
            name,
            self.document.len()
        );
        visitor.visit_map(FieldAccess::new(self.document, groups))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

// --- Struct fields ---

/// Yields each declared field once, paired with the value of its key.
struct FieldAccess<'a> {
    document: &'a Document,
    keys: Vec<ConfigKey>,
    groups: std::vec::IntoIter<Vec<&'static str>>,
    pending: Option<FieldValue>,
}

impl<'a> FieldAccess<'a> {
    fn new(document: &'a Document, groups: Vec<Vec<&'static str>>) -> Self {
        Self {
            document,
            keys: document.keys(),
            groups: groups.into_iter(),
            pending: None,
        }
    }

    /// Finds the key for a field known by any of `names`: the first key in
    /// document order equal to one of them, then the first key that matches one
    /// of them ignoring case.
    fn lookup(&self, names: &[&'static str]) -> FieldValue {
        let field = names[0];
        let key = self
            .keys
            .iter()
            .find(|key| names.contains(&key.as_str()))
            .or_else(|| {
                self.keys
                    .iter()
                    .find(|key| names.iter().any(|name| key.matches_ignore_case(name)))
            });

        match key {
            Some(key) => {
                tracing::trace!("Field '{}' bound to key '{}'", field, key);
                FieldValue {
                    field,
                    value: self.document.get(key.as_str()),
                }
            }
            None => {
                tracing::trace!("No key for field '{}'", field);
                FieldValue::absent(field)
            }
        }
    }
}

impl<'de, 'a> MapAccess<'de> for FieldAccess<'a> {
    type Error = ConfigError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let names = match self.groups.next() {
            Some(names) => names,
            None => return Ok(None),
        };
        self.pending = Some(self.lookup(&names));
        let name: StrDeserializer<'_, ConfigError> = names[0].into_deserializer();
        seed.deserialize(name).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let value = self
            .pending
            .take()
            .unwrap_or_else(|| FieldValue::absent(""));
        seed.deserialize(value)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.groups.len())
    }
}

// --- Field aliases ---

/// Groups the names a record declares by the field they belong to.
///
/// Serde lists `#[serde(alias = "...")]` names next to the field name itself, and
/// a record rejects a second value for the same field. Two names share a field
/// when feeding both of them to the record is refused as a duplicate. Returns
/// `None` when `T` is not a struct.
fn field_groups<T: DeserializeOwned>() -> Option<Vec<Vec<&'static str>>> {
    let fields = match T::deserialize(FieldListing) {
        Err(ScanError::Fields(fields)) => fields,
        _ => return None,
    };

    let mut groups: Vec<Vec<&'static str>> = Vec::new();
    for &name in fields {
        match groups.iter_mut().find(|group| same_field::<T>(group[0], name)) {
            Some(group) => group.push(name),
            None => groups.push(vec![name]),
        }
    }
    Some(groups)
}

fn same_field<T: DeserializeOwned>(first: &'static str, second: &'static str) -> bool {
    let pair = NamePair {
        names: [first, second],
    };
    matches!(T::deserialize(pair), Err(ScanError::Duplicate))
}

/// Outcome of walking a record's shape without building it.
#[derive(Debug, thiserror::Error)]
enum ScanError {
    #[error("struct with {} field names", .0.len())]
    Fields(&'static [&'static str]),
    #[error("duplicate field")]
    Duplicate,
    #[error("{0}")]
    Other(String),
}

type ScanResult<T> = std::result::Result<T, ScanError>;

impl de::Error for ScanError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ScanError::Other(msg.to_string())
    }

    fn duplicate_field(_field: &'static str) -> Self {
        ScanError::Duplicate
    }
}

/// Stops at the first struct and reports its field names.
struct FieldListing;

impl<'de> de::Deserializer<'de> for FieldListing {
    type Error = ScanError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> ScanResult<V::Value> {
        Err(ScanError::Other("not a struct".to_string()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> ScanResult<V::Value> {
        Err(ScanError::Fields(fields))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> ScanResult<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

/// A struct holding exactly two keys, each with an absent value.
struct NamePair {
    names: [&'static str; 2],
}

impl<'de> de::Deserializer<'de> for NamePair {
    type Error = ScanError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> ScanResult<V::Value> {
        Err(ScanError::Other("not a struct".to_string()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> ScanResult<V::Value> {
        visitor.visit_map(NamePairAccess {
            names: self.names.into_iter(),
            pending: None,
        })
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> ScanResult<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

struct NamePairAccess {
    names: std::array::IntoIter<&'static str, 2>,
    pending: Option<&'static str>,
}

impl<'de> MapAccess<'de> for NamePairAccess {
    type Error = ScanError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> ScanResult<Option<K::Value>> {
        match self.names.next() {
            Some(name) => {
                self.pending = Some(name);
                let key: StrDeserializer<'_, ScanError> = name.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> ScanResult<V::Value> {
        let field = self.pending.take().unwrap_or_default();
        seed.deserialize(FieldValue::absent(field))
            .map_err(|e| ScanError::Other(e.to_string()))
    }
}

// --- Field values ---

/// The value bound to one field, absent when no key matched.
struct FieldValue {
    field: &'static str,
    value: Option<ConfigValue>,
}

impl FieldValue {
    fn absent(field: &'static str) -> Self {
        Self { field, value: None }
    }

    fn parsed<T>(&self) -> Option<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let value = self.value.as_ref()?;
        match value.parse::<T>(self.field) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Leaving field '{}' at its zero value: {}", self.field, e);
                None
            }
        }
    }

    fn text(&self) -> String {
        self.value
            .as_ref()
            .map(ConfigValue::as_string)
            .unwrap_or_default()
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty);)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                visitor.$visit(self.parsed::<$ty>().unwrap_or_default())
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldValue {
    type Error = ConfigError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Some(ref value) => visitor.visit_string(value.as_string()),
            None => visitor.visit_unit(),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool);
        deserialize_i8 => visit_i8(i8);
        deserialize_i16 => visit_i16(i16);
        deserialize_i32 => visit_i32(i32);
        deserialize_i64 => visit_i64(i64);
        deserialize_i128 => visit_i128(i128);
        deserialize_u8 => visit_u8(u8);
        deserialize_u16 => visit_u16(u16);
        deserialize_u32 => visit_u32(u32);
        deserialize_u64 => visit_u64(u64);
        deserialize_u128 => visit_u128(u128);
        deserialize_f32 => visit_f32(f32);
        deserialize_f64 => visit_f64(f64);
        deserialize_char => visit_char(char);
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.text())
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.text())
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_byte_buf(self.text().into_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_byte_buf(self.text().into_bytes())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.value.is_some() {
            visitor.visit_some(self)
        } else {
            visitor.visit_none()
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq::new(self.field, 0))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq::new(self.field, len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq::new(self.field, len))
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let empty: MapDeserializer<'de, _, ConfigError> =
            MapDeserializer::new(std::iter::empty::<((), ())>());
        visitor.visit_map(empty)
    }

    /// A nested struct gets every field at its zero value, in declaration order.
    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq::new(self.field, fields.len()))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        if let Some(text) = self.value.as_ref().map(ConfigValue::as_string) {
            if variants.contains(&text.as_str()) {
                let variant: StringDeserializer<ConfigError> = text.into_deserializer();
                return visitor.visit_enum(variant);
            }
            tracing::debug!(
                "Leaving field '{}' at its zero value: '{}' is not a variant of {}",
                self.field,
                text,
                name
            );
        }

        match variants.first() {
            Some(&first) => {
                let variant: StrDeserializer<'_, ConfigError> = first.into_deserializer();
                visitor.visit_enum(variant)
            }
            None => Err(ConfigError::BindingError {
                message: format!("enum {} of field '{}' has no variants", name, self.field),
            }),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.text())
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

/// A sequence of `remaining` absent elements.
struct ZeroSeq {
    field: &'static str,
    remaining: usize,
}

impl ZeroSeq {
    fn new(field: &'static str, remaining: usize) -> Self {
        Self { field, remaining }
    }
}

impl<'de> SeqAccess<'de> for ZeroSeq {
    type Error = ConfigError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(FieldValue::absent(self.field)).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Server {
        host: String,
        port: u16,
        ratio: f32,
        enabled: bool,
        initial: char,
    }

    #[test]
    fn test_fields_from_keys() {
        let doc = Document::parse(
            "host = example.org\nport = 8080\nratio = 0.5\nenabled = true\ninitial = q",
        );
        let server: Server = from_document(&doc).unwrap();
        assert_eq!(
            server,
            Server {
                host: "example.org".to_string(),
                port: 8080,
                ratio: 0.5,
                enabled: true,
                initial: 'q',
            }
        );
    }

    #[test]
    fn test_missing_keys_give_zero_values() {
        let server: Server = from_document(&Document::new()).unwrap();
        assert_eq!(server, Server::default());
    }

    #[test]
    fn test_unparsable_values_give_zero_values() {
        let doc = Document::parse(
            "host = ok\nport = 99999\nratio = wide\nenabled = yes\ninitial = qq",
        );
        let server: Server = from_document(&doc).unwrap();
        assert_eq!(
            server,
            Server {
                host: "ok".to_string(),
                ..Server::default()
            }
        );
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_case_insensitive_match() {
        let doc = Document::parse("NAME = upper");
        let named: Named = from_document(&doc).unwrap();
        assert_eq!(named.name, "upper");
    }

    #[test]
    fn test_exact_match_wins() {
        let doc = Document::parse("name = lower\nName = exact\nNAME = upper");
        let named: Named = from_document(&doc).unwrap();
        assert_eq!(named.name, "exact");
    }

    #[test]
    fn test_first_case_insensitive_match_in_document_order() {
        let doc = Document::parse("NAME = upper\nname = lower");
        let named: Named = from_document(&doc).unwrap();
        assert_eq!(named.name, "upper");
    }

    #[test]
    fn test_newlines_are_unescaped() {
        let doc = Document::parse("Name = a\\nb");
        let named: Named = from_document(&doc).unwrap();
        assert_eq!(named.name, "a\nb");
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Inner {
        depth: i32,
        label: String,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    enum Level {
        #[default]
        Low,
        High,
    }

    #[derive(Debug, Deserialize)]
    struct Mixed {
        inner: Inner,
        list: Vec<i32>,
        table: HashMap<String, i32>,
        pair: (i32, String),
        maybe: Option<i64>,
        level: Level,
        other: Level,
        #[serde(skip)]
        skipped: String,
    }

    #[test]
    fn test_unsupported_fields_are_zeroed() {
        let doc = Document::parse(
            "inner = 5\nlist = 1,2\ntable = a\npair = x\nmaybe = 7\nlevel = High\nother = Max\nskipped = no",
        );
        let mixed: Mixed = from_document(&doc).unwrap();
        assert_eq!(mixed.inner, Inner::default());
        assert!(mixed.list.is_empty());
        assert!(mixed.table.is_empty());
        assert_eq!(mixed.pair, (0, String::new()));
        assert_eq!(mixed.maybe, Some(7));
        assert_eq!(mixed.level, Level::High);
        assert_eq!(mixed.other, Level::Low);
        assert_eq!(mixed.skipped, "");
    }

    #[test]
    fn test_absent_option_is_none() {
        let mixed: Mixed = from_document(&Document::new()).unwrap();
        assert_eq!(mixed.maybe, None);
        assert_eq!(mixed.level, Level::Low);
    }

    #[derive(Debug, Deserialize)]
    struct Wrapper(Named);

    #[test]
    fn test_newtype_record_is_transparent() {
        let doc = Document::parse("name = inner");
        let wrapper: Wrapper = from_document(&doc).unwrap();
        assert_eq!(wrapper.0.name, "inner");
    }

    #[test]
    fn test_non_struct_is_shape_error() {
        let doc = Document::parse("a = 1");
        let err = from_document::<i64>(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::ShapeError { ref found } if found == "i64"));

        assert!(matches!(
            from_document::<HashMap<String, String>>(&doc),
            Err(ConfigError::ShapeError { .. })
        ));
        assert!(matches!(
            from_document::<Vec<String>>(&doc),
            Err(ConfigError::ShapeError { .. })
        ));
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Aliased {
        #[serde(rename = "is_active", alias = "IsActive")]
        is_active: bool,
        #[serde(alias = "Limit", alias = "max")]
        limit: u32,
    }

    #[test]
    fn test_alias_shares_one_field() {
        let groups = field_groups::<Aliased>().unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].contains(&"is_active") && groups[0].contains(&"IsActive"));
        assert_eq!(groups[1].len(), 3);
    }

    #[test]
    fn test_alias_binds_field() {
        let record: Aliased = from_document(&Document::parse("is_active = true")).unwrap();
        assert!(record.is_active);

        let record: Aliased = from_document(&Document::parse("IsActive = true
max = 3")).unwrap();
        assert_eq!(record, Aliased { is_active: true, limit: 3 });

        let record: Aliased = from_document(&Document::parse("isactive = true")).unwrap();
        assert!(record.is_active);
    }

    #[test]
    fn test_alias_first_exact_key_in_document_order() {
        let doc = Document::parse("LIMIT = 1
max = 2
limit = 3");
        let record: Aliased = from_document(&doc).unwrap();
        assert_eq!(record.limit, 2);
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        inner: Aliased,
        #[serde(alias = "Name")]
        name: String,
    }

    #[test]
    fn test_nested_struct_with_alias_is_zeroed() {
        let doc = Document::parse("inner = x
Name = outer");
        let outer: Outer = from_document(&doc).unwrap();
        assert_eq!(outer.inner, Aliased::default());
        assert_eq!(outer.name, "outer");
    }

    #[derive(Debug, Deserialize)]
    struct Renamed {
        #[serde(rename = "is_active")]
        active: bool,
    }

    #[test]
    fn test_rename_replaces_field_name() {
        let record: Renamed = from_document(&Document::parse("active = true")).unwrap();
        assert!(!record.active);

        let record: Renamed = from_document(&Document::parse("IS_ACTIVE = true")).unwrap();
        assert!(record.active);
    }
}
