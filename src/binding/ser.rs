// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde `Serializer` turning a record into encoded key-value pairs.
//!
//! Only the top-level fields of a struct are visited. A field whose value has no
//! single-line encoding (sequences, maps, nested structs, `None`, ...) produces no
//! pair and is skipped.

use crate::domain::{ConfigError, ConfigValue, Result};
use serde::ser::{self, Impossible, Serialize, Serializer};

/// Key-value pairs in field declaration order.
pub(crate) type Pairs = Vec<(&'static str, ConfigValue)>;

/// Serializes the top-level fields of `record`.
pub(crate) fn to_pairs<T: Serialize + ?Sized>(record: &T) -> Result<Pairs> {
    record.serialize(RecordSerializer {
        type_name: std::any::type_name::<T>(),
    })
}

fn shape_error(type_name: &str) -> ConfigError {
    ConfigError::ShapeError {
        found: type_name.to_string(),
    }
}

/// Accepts a struct and rejects everything else.
struct RecordSerializer {
    type_name: &'static str,
}

macro_rules! reject {
    ($($method:ident($($arg:ty),*);)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Pairs> {
                Err(shape_error(self.type_name))
            }
        )*
    };
}

impl ser::Serializer for RecordSerializer {
    type Ok = Pairs;
    type Error = ConfigError;
    type SerializeSeq = Impossible<Pairs, ConfigError>;
    type SerializeTuple = Impossible<Pairs, ConfigError>;
    type SerializeTupleStruct = Impossible<Pairs, ConfigError>;
    type SerializeTupleVariant = Impossible<Pairs, ConfigError>;
    type SerializeMap = Impossible<Pairs, ConfigError>;
    type SerializeStruct = FieldCollector;
    type SerializeStructVariant = Impossible<Pairs, ConfigError>;

    reject! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_i128(i128);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_u128(u128);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<Pairs> {
        Err(shape_error(self.type_name))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Pairs> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Pairs> {
        Err(shape_error(self.type_name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(shape_error(self.type_name))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(shape_error(self.type_name))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(shape_error(self.type_name))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(shape_error(self.type_name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(shape_error(self.type_name))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(FieldCollector {
            pairs: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(shape_error(self.type_name))
    }
}

// --- SerializeStruct ---

struct FieldCollector {
    pairs: Pairs,
}

impl ser::SerializeStruct for FieldCollector {
    type Ok = Pairs;
    type Error = ConfigError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        match value.serialize(ScalarSerializer)? {
            Some(encoded) => self.pairs.push((key, encoded)),
            None => tracing::trace!("Skipping field '{}': no single-line encoding", key),
        }
        Ok(())
    }

    fn end(self) -> Result<Pairs> {
        Ok(self.pairs)
    }
}

// --- Field values ---

/// Encodes a single field value, or yields `None` for unsupported kinds.
struct ScalarSerializer;

type Scalar = Option<ConfigValue>;

impl ser::Serializer for ScalarSerializer {
    type Ok = Scalar;
    type Error = ConfigError;
    type SerializeSeq = SkipCompound;
    type SerializeTuple = SkipCompound;
    type SerializeTupleStruct = SkipCompound;
    type SerializeTupleVariant = SkipCompound;
    type SerializeMap = SkipCompound;
    type SerializeStruct = SkipCompound;
    type SerializeStructVariant = SkipCompound;

    fn serialize_bool(self, v: bool) -> Result<Scalar> {
        Ok(Some(ConfigValue::from_bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Scalar> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Scalar> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Scalar> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Scalar> {
        Ok(Some(ConfigValue::from_i64(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Scalar> {
        Ok(Some(ConfigValue::new(v.to_string())))
    }

    fn serialize_u8(self, v: u8) -> Result<Scalar> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Scalar> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Scalar> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Scalar> {
        Ok(Some(ConfigValue::from_u64(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Scalar> {
        Ok(Some(ConfigValue::new(v.to_string())))
    }

    fn serialize_f32(self, v: f32) -> Result<Scalar> {
        // f32's own Display keeps the shortest form, widening would not
        Ok(Some(ConfigValue::new(v.to_string())))
    }

    fn serialize_f64(self, v: f64) -> Result<Scalar> {
        Ok(Some(ConfigValue::from_f64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Scalar> {
        self.serialize_str(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<Scalar> {
        Ok(Some(ConfigValue::from_string(v)))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Scalar> {
        Ok(None)
    }

    fn serialize_none(self) -> Result<Scalar> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Scalar> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Scalar> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Scalar> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Scalar> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Scalar> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Scalar> {
        Ok(None)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_tuple(self, _len: usize) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SkipCompound> {
        Ok(SkipCompound)
    }
}

// --- Compound values: accepted and dropped ---

struct SkipCompound;

impl ser::SerializeSeq for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeTuple for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeTupleStruct for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeTupleVariant for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeMap for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, _key: &T) -> Result<()> {
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeStruct for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}

impl ser::SerializeStructVariant for SkipCompound {
    type Ok = Scalar;
    type Error = ConfigError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Scalar> {
        Ok(None)
    }
}
