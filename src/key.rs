//! Key codec for textual formats.
//!
//! Mapping keys in JSON are always strings, and in YAML they are plain
//! scalars. This module decides how a map key of type `K` is written as such
//! a scalar and read back, by walking the serde data model of `K`:
//!
//! | Key shape | Encoded as |
//! |---|---|
//! | `str`, `String`, `char` | text, verbatim |
//! | any signed or unsigned integer | decimal integer (quoted in JSON) |
//! | newtype wrapper (`struct Id(u32)`) | whatever the wrapped type encodes as |
//! | [`TextMarshal`] type, or any type serializing through `serialize_str` | its text |
//! | anything else | [`Error::UnsupportedKeyType`](crate::Error::UnsupportedKeyType) |
//!
//! Decoding mirrors the table: the raw key text is handed to `K`'s
//! `Deserialize` impl, integers are parsed from decimal text and every other
//! shape is rejected with the same unsupported-key error.
//!
//! # Custom text keys
//!
//! ```
//! use linked_ordered_map::OrderedMap;
//! use linked_ordered_map::TextMarshal;
//! use linked_ordered_map::impl_text_marshal_serde;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Tagged(u32);
//!
//! impl TextMarshal for Tagged {
//!     type Err = String;
//!
//!     fn marshal_text(&self) -> Result<String, String> {
//!         Ok(format!("#{}#", self.0))
//!     }
//!
//!     fn unmarshal_text(text: &str) -> Result<Self, String> {
//!         text.strip_prefix('#')
//!             .and_then(|t| t.strip_suffix('#'))
//!             .and_then(|t| t.parse().ok())
//!             .map(Tagged)
//!             .ok_or_else(|| format!("not a tag: {text}"))
//!     }
//! }
//!
//! impl_text_marshal_serde!(Tagged);
//!
//! let mut map = OrderedMap::new();
//! map.set(Tagged(1), "bar");
//! map.set(Tagged(7), "baz");
//!
//! let text = linked_ordered_map::json::to_string(&map).unwrap();
//! assert_eq!(text, r##"{"#1#":"bar","#7#":"baz"}"##);
//!
//! let decoded: OrderedMap<Tagged, String> = linked_ordered_map::json::from_str(&text).unwrap();
//! assert_eq!(decoded.oldest().unwrap().key(), &Tagged(1));
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::Visitor;
use serde::ser;
use serde::ser::Impossible;

/// Opens and closes the message of every unsupported-key failure.
///
/// serde quotes input data in its messages with `Debug` escaping, so a
/// control character never reaches a message from the data itself.
pub(crate) const KEY_MARK: char = '\u{1}';

/// Text that follows the opening [`KEY_MARK`].
pub(crate) const UNSUPPORTED_KEY_TYPE: &str = "unsupported key type: ";

/// A type with its own textual scalar form.
///
/// Implement this, then invoke [`impl_text_marshal_serde!`] to derive the
/// matching `Serialize`/`Deserialize` impls. The type can then be used as a
/// map key (and as a value) in every supported format.
///
/// [`impl_text_marshal_serde!`]: crate::impl_text_marshal_serde
pub trait TextMarshal: Sized {
    /// Error produced when the text form cannot be built or parsed.
    type Err: fmt::Display;

    /// Renders `self` as text.
    fn marshal_text(&self) -> Result<String, Self::Err>;

    /// Parses a value back from the text produced by
    /// [`marshal_text`](TextMarshal::marshal_text).
    fn unmarshal_text(text: &str) -> Result<Self, Self::Err>;
}

/// Implements `serde::Serialize` and `serde::Deserialize` for a
/// [`TextMarshal`] type, so it serializes as a string.
///
/// See the [module documentation](crate::key) for an example.
#[macro_export]
macro_rules! impl_text_marshal_serde {
    ($ty:ty) => {
        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                let text = <$ty as $crate::TextMarshal>::marshal_text(self)
                    .map_err(<S::Error as $crate::__private::serde::ser::Error>::custom)?;
                serializer.serialize_str(&text)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                struct TextVisitor;

                impl<'de> $crate::__private::serde::de::Visitor<'de> for TextVisitor {
                    type Value = $ty;

                    fn expecting(
                        &self,
                        formatter: &mut ::core::fmt::Formatter<'_>,
                    ) -> ::core::fmt::Result {
                        formatter.write_str(concat!("text for ", stringify!($ty)))
                    }

                    fn visit_str<E>(self, text: &str) -> ::core::result::Result<$ty, E>
                    where
                        E: $crate::__private::serde::de::Error,
                    {
                        <$ty as $crate::TextMarshal>::unmarshal_text(text).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(TextVisitor)
            }
        }
    };
}

/// Failure inside the key codec. Surfaces through the format's own error
/// type as a custom message; unsupported key types are wrapped in
/// [`KEY_MARK`] so the adapters can tell them apart from data errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum KeyError {
    #[error("\u{1}unsupported key type: {0}\u{1}")]
    UnsupportedKeyType(&'static str),
    #[error("{0}")]
    Malformed(String),
}

impl ser::Error for KeyError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        KeyError::Malformed(msg.to_string())
    }
}

impl de::Error for KeyError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        KeyError::Malformed(msg.to_string())
    }
}

/// The scalar a key encodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyScalar {
    Text(String),
    Signed(i128),
    Unsigned(u128),
}

impl Serialize for KeyScalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            KeyScalar::Text(ref text) => serializer.serialize_str(text),
            KeyScalar::Signed(n) => match i64::try_from(n) {
                Ok(n) => serializer.serialize_i64(n),
                Err(_) => serializer.serialize_i128(n),
            },
            KeyScalar::Unsigned(n) => match u64::try_from(n) {
                Ok(n) => serializer.serialize_u64(n),
                Err(_) => serializer.serialize_u128(n),
            },
        }
    }
}

/// Encodes `key` into its scalar form.
pub(crate) fn to_scalar<K: Serialize + ?Sized>(key: &K) -> Result<KeyScalar, KeyError> {
    key.serialize(KeySerializer {
        type_name: type_name::<K>(),
    })
}

/// Decodes a `K` from the raw text of a mapping key.
pub(crate) fn from_raw<'de, K: Deserialize<'de>>(raw: RawKey<'de>) -> Result<K, KeyError> {
    K::deserialize(KeyDeserializer {
        text: raw.0,
        type_name: type_name::<K>(),
    })
}

struct KeySerializer {
    type_name: &'static str,
}

impl KeySerializer {
    fn unsupported(&self) -> KeyError {
        KeyError::UnsupportedKeyType(self.type_name)
    }
}

macro_rules! serialize_integers {
    ($($method:ident($ty:ty) => $scalar:ident,)*) => {$(
        fn $method(self, v: $ty) -> Result<KeyScalar, KeyError> {
            Ok(KeyScalar::$scalar(v.into()))
        }
    )*};
}

impl Serializer for KeySerializer {
    type Error = KeyError;
    type Ok = KeyScalar;
    type SerializeMap = Impossible<KeyScalar, KeyError>;
    type SerializeSeq = Impossible<KeyScalar, KeyError>;
    type SerializeStruct = Impossible<KeyScalar, KeyError>;
    type SerializeStructVariant = Impossible<KeyScalar, KeyError>;
    type SerializeTuple = Impossible<KeyScalar, KeyError>;
    type SerializeTupleStruct = Impossible<KeyScalar, KeyError>;
    type SerializeTupleVariant = Impossible<KeyScalar, KeyError>;

    serialize_integers! {
        serialize_i8(i8) => Signed,
        serialize_i16(i16) => Signed,
        serialize_i32(i32) => Signed,
        serialize_i64(i64) => Signed,
        serialize_i128(i128) => Signed,
        serialize_u8(u8) => Unsigned,
        serialize_u16(u16) => Unsigned,
        serialize_u32(u32) => Unsigned,
        serialize_u64(u64) => Unsigned,
        serialize_u128(u128) => Unsigned,
    }

    fn serialize_str(self, v: &str) -> Result<KeyScalar, KeyError> {
        Ok(KeyScalar::Text(v.to_owned()))
    }

    fn serialize_char(self, v: char) -> Result<KeyScalar, KeyError> {
        Ok(KeyScalar::Text(v.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<KeyScalar, KeyError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_f32(self, _v: f32) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_f64(self, _v: f64) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_none(self) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<KeyScalar, KeyError>
    where
        T: Serialize + ?Sized,
    {
        Err(self.unsupported())
    }

    fn serialize_unit(self) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<KeyScalar, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<KeyScalar, KeyError>
    where
        T: Serialize + ?Sized,
    {
        Err(self.unsupported())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, KeyError> {
        Err(self.unsupported())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, KeyError> {
        Err(self.unsupported())
    }
}

/// The text of a mapping key, as found in the input.
///
/// The key is requested as a string, so YAML hands over the source text of a
/// plain scalar (`0x1F`, `True`, `~`) rather than its resolved value. Formats
/// that ignore the hint and report a typed scalar are folded back to text.
/// The target key type decides how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawKey<'de>(pub(crate) Cow<'de, str>);

impl<'de> Deserialize<'de> for RawKey<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawKeyVisitor;

        impl<'de> Visitor<'de> for RawKeyVisitor {
            type Value = RawKey<'de>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a scalar mapping key")
            }

            fn visit_borrowed_str<E: de::Error>(self, v: &'de str) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Borrowed(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_owned())))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v)))
            }

            fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(RawKey(Cow::Owned(v.to_string())))
            }
        }

        deserializer.deserialize_str(RawKeyVisitor)
    }
}

/// Deserializes a key type from the text of a [`RawKey`].
struct KeyDeserializer<'de> {
    text: Cow<'de, str>,
    type_name: &'static str,
}

impl KeyDeserializer<'_> {
    fn unsupported(&self) -> KeyError {
        KeyError::UnsupportedKeyType(self.type_name)
    }

    fn parse<T>(&self) -> Result<T, KeyError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.text.parse().map_err(|err| {
            KeyError::Malformed(format!(
                "invalid key {:?} for {}: {err}",
                self.text, self.type_name
            ))
        })
    }
}

macro_rules! deserialize_integers {
    ($($method:ident => $visit:ident($ty:ty),)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
            visitor.$visit(self.parse::<$ty>()?)
        }
    )*};
}

macro_rules! deserialize_unsupported {
    ($($method:ident,)*) => {$(
        fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, KeyError> {
            Err(self.unsupported())
        }
    )*};
}

impl<'de> Deserializer<'de> for KeyDeserializer<'de> {
    type Error = KeyError;

    deserialize_integers! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
    }

    deserialize_unsupported! {
        deserialize_bool,
        deserialize_f32,
        deserialize_f64,
        deserialize_bytes,
        deserialize_byte_buf,
        deserialize_option,
        deserialize_unit,
        deserialize_seq,
        deserialize_map,
    }

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        match self.text {
            Cow::Borrowed(text) => visitor.visit_borrowed_str(text),
            Cow::Owned(text) => visitor.visit_string(text),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        self.deserialize_any(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        self.deserialize_any(visitor)
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        self.deserialize_any(visitor)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(KeyError::Malformed(format!(
                "invalid key {:?} for char: expected a single character",
                self.text
            ))),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, KeyError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, KeyError> {
        Err(self.unsupported())
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, KeyError> {
        Err(self.unsupported())
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, KeyError> {
        Err(self.unsupported())
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, KeyError> {
        Err(self.unsupported())
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, KeyError> {
        Err(self.unsupported())
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, KeyError> {
        visitor.visit_unit()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Name(String);

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Id(u16);

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Nested(Id);

    #[derive(Debug, PartialEq)]
    struct Upper(String);

    impl TextMarshal for Upper {
        type Err = &'static str;

        fn marshal_text(&self) -> Result<String, Self::Err> {
            Ok(self.0.to_uppercase())
        }

        fn unmarshal_text(text: &str) -> Result<Self, Self::Err> {
            if text.is_empty() {
                return Err("empty");
            }
            Ok(Upper(text.to_lowercase()))
        }
    }

    crate::impl_text_marshal_serde!(Upper);

    fn raw(text: &str) -> RawKey<'_> {
        RawKey(Cow::Borrowed(text))
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(to_scalar("hello").unwrap(), KeyScalar::Text("hello".into()));
        assert_eq!(
            to_scalar(&"owned".to_string()).unwrap(),
            KeyScalar::Text("owned".into())
        );
        assert_eq!(to_scalar(&'x').unwrap(), KeyScalar::Text("x".into()));

        assert_eq!(from_raw::<String>(raw("hello")).unwrap(), "hello");
        assert_eq!(from_raw::<&str>(raw("borrowed")).unwrap(), "borrowed");
        assert_eq!(from_raw::<char>(raw("x")).unwrap(), 'x');
        assert!(matches!(
            from_raw::<char>(raw("xy")),
            Err(KeyError::Malformed(_))
        ));
    }

    #[test]
    fn test_integer_keys() {
        assert_eq!(to_scalar(&-7i8).unwrap(), KeyScalar::Signed(-7));
        assert_eq!(to_scalar(&42u64).unwrap(), KeyScalar::Unsigned(42));
        assert_eq!(
            to_scalar(&u128::MAX).unwrap(),
            KeyScalar::Unsigned(u128::MAX)
        );

        assert_eq!(from_raw::<i32>(raw("-12")).unwrap(), -12);
        assert_eq!(from_raw::<u8>(raw("255")).unwrap(), 255);
        assert_eq!(
            from_raw::<i128>(raw("-170141183460469231731687303715884105728")).unwrap(),
            i128::MIN
        );
    }

    #[test]
    fn test_integer_key_out_of_range_is_malformed() {
        let err = from_raw::<u8>(raw("256")).unwrap_err();
        assert!(matches!(err, KeyError::Malformed(_)));
        assert!(err.to_string().contains("\"256\""));

        assert!(matches!(
            from_raw::<i64>(raw("bar")),
            Err(KeyError::Malformed(_))
        ));
    }

    #[test]
    fn test_newtype_keys_unwrap() {
        assert_eq!(
            to_scalar(&Name("n".into())).unwrap(),
            KeyScalar::Text("n".into())
        );
        assert_eq!(to_scalar(&Nested(Id(9))).unwrap(), KeyScalar::Unsigned(9));

        assert_eq!(from_raw::<Name>(raw("n")).unwrap(), Name("n".into()));
        assert_eq!(from_raw::<Nested>(raw("9")).unwrap(), Nested(Id(9)));
    }

    #[test]
    fn test_text_marshal_keys() {
        assert_eq!(
            to_scalar(&Upper("abc".into())).unwrap(),
            KeyScalar::Text("ABC".into())
        );
        assert_eq!(from_raw::<Upper>(raw("ABC")).unwrap(), Upper("abc".into()));
        assert!(matches!(
            from_raw::<Upper>(raw("")),
            Err(KeyError::Malformed(msg)) if msg == "empty"
        ));
    }

    #[test]
    fn test_unsupported_keys_name_the_type() {
        let err = to_scalar(&true).unwrap_err();
        assert_eq!(err.to_string(), "\u{1}unsupported key type: bool\u{1}");
        assert!(err.to_string()[KEY_MARK.len_utf8()..].starts_with(UNSUPPORTED_KEY_TYPE));

        assert!(matches!(
            to_scalar(&1.5f64),
            Err(KeyError::UnsupportedKeyType("f64"))
        ));
        assert!(matches!(
            to_scalar(&(1, 2)),
            Err(KeyError::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            to_scalar(&Some(1)),
            Err(KeyError::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            to_scalar(&vec![1u8]),
            Err(KeyError::UnsupportedKeyType(_))
        ));

        assert!(matches!(
            from_raw::<bool>(raw("true")),
            Err(KeyError::UnsupportedKeyType("bool"))
        ));
        assert!(matches!(
            from_raw::<Option<i32>>(raw("1")),
            Err(KeyError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn test_key_scalar_serializes_integers_natively() {
        assert_eq!(
            serde_json::to_string(&KeyScalar::Signed(-3)).unwrap(),
            "-3"
        );
        assert_eq!(
            serde_json::to_string(&KeyScalar::Text("a\"b".into())).unwrap(),
            r#""a\"b""#
        );
    }

    #[test]
    fn test_raw_key_keeps_source_text() {
        let raw: RawKey<'_> = serde_json::from_str(r#""key""#).unwrap();
        assert_eq!(raw.0, "key");
        assert!(matches!(raw.0, Cow::Borrowed(_)));

        for text in ["17", "1.0", "True", "0x1F", "~", "null"] {
            let raw: RawKey<'_> = serde_yaml::from_str(text).unwrap();
            assert_eq!(raw.0, text);
        }

        assert!(serde_json::from_str::<RawKey<'_>>("[1]").is_err());
        assert!(serde_yaml::from_str::<RawKey<'_>>("[1]").is_err());
    }
}
