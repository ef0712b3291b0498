//! JSON encoding and decoding.
//!
//! Thin wrappers over `serde_json` that report failures as the crate
//! [`Error`]. The functions accept any serde type, so an [`OrderedMap`] can
//! be encoded on its own or nested anywhere inside a larger value; map keys
//! always come out as JSON strings, with integer keys written as quoted
//! decimals.
//!
//! # Examples
//!
//! ```
//! use linked_ordered_map::OrderedMap;
//! use linked_ordered_map::json;
//! use serde_json::Value;
//!
//! let map: OrderedMap<i64, Value> = json::from_str(r#"{"1":"bar","2":28}"#).unwrap();
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
//! assert_eq!(json::to_string(&map).unwrap(), r#"{"1":"bar","2":28}"#);
//! ```

use std::hash::BuildHasher;
use std::hash::Hash;
use std::io;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::de::DeserializeSeed;
use serde_json::ser::PrettyFormatter;

use crate::Error;
use crate::MergeSeed;
use crate::ordered_map::OrderedMap;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::from_message(err.to_string()),
        }
    }
}

/// Encodes `value` as compact JSON.
pub fn to_string<T>(value: &T) -> Result<String, Error>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string(value)?)
}

/// Encodes `value` as JSON indented by four spaces per level.
///
/// ```
/// use linked_ordered_map::OrderedMap;
/// use linked_ordered_map::json;
///
/// let mut map = OrderedMap::new();
/// map.set("b", vec![1]);
/// map.set("a", vec![]);
///
/// assert_eq!(
///     json::to_string_pretty(&map).unwrap(),
///     "{\n    \"b\": [\n        1\n    ],\n    \"a\": []\n}"
/// );
/// ```
pub fn to_string_pretty<T>(value: &T) -> Result<String, Error>
where
    T: Serialize + ?Sized,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Encodes `value` as compact JSON bytes.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(value)?)
}

/// Writes `value` as compact JSON to `writer`.
///
/// The document is encoded in full before anything is written, so an
/// encoding failure leaves `writer` untouched.
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<(), Error>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    let out = to_vec(value)?;
    writer.write_all(&out)?;
    Ok(())
}

/// Decodes a `T` from JSON text.
///
/// Decoding an [`OrderedMap`] requires a JSON object; any other value is
/// [`Error::MalformedInput`].
pub fn from_str<'a, T>(s: &'a str) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    Ok(serde_json::from_str(s)?)
}

/// Decodes a `T` from JSON bytes.
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    Ok(serde_json::from_slice(v)?)
}

/// Decodes a `T` from a JSON reader.
pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
    R: io::Read,
    T: DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Decodes a JSON object into an existing map. See [`MergeSeed`].
///
/// ```
/// use linked_ordered_map::OrderedMap;
/// use linked_ordered_map::json;
///
/// let mut map: OrderedMap<String, u8> = OrderedMap::new();
/// json::merge_from_str(&mut map, r#"{"x": 1}"#).unwrap();
/// json::merge_from_str(&mut map, r#"{"y": 2, "x": 3}"#).unwrap();
/// assert_eq!(json::to_string(&map).unwrap(), r#"{"x":3,"y":2}"#);
/// ```
pub fn merge_from_str<'a, K, V, S>(map: &mut OrderedMap<K, V, S>, s: &'a str) -> Result<(), Error>
where
    K: Deserialize<'a> + Hash + Eq,
    V: Deserialize<'a>,
    S: BuildHasher,
{
    let mut deserializer = serde_json::Deserializer::from_str(s);
    MergeSeed::new(map).deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedMap;

    #[test]
    fn test_error_classification() {
        let err = from_str::<OrderedMap<String, i32>>("[1]").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = from_str::<OrderedMap<String, i32>>("{\"a\": ").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = from_str::<OrderedMap<bool, i32>>(r#"{"true": 1}"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(ref name) if name.starts_with("bool")));
    }

    #[test]
    fn test_writer_failure_is_io() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut map = OrderedMap::new();
        map.set("a", 1);
        let err = to_writer(Broken, &map).unwrap_err();
        assert!(
            matches!(err, Error::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe),
            "{err:?}"
        );
    }

    #[test]
    fn test_writer_untouched_on_key_failure() {
        let mut map = OrderedMap::new();
        map.set(true, 1);
        let mut out = Vec::new();
        let err = to_writer(&mut out, &map).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(ref name) if name == "bool"), "{err:?}");
        assert!(out.is_empty());

        let mut outer: OrderedMap<&str, OrderedMap<bool, i32>> = OrderedMap::new();
        outer.set("ok", OrderedMap::new());
        outer.set("bad", map);
        let err = to_writer(&mut out, &outer).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(_)), "{err:?}");
        assert!(out.is_empty());
    }

    #[test]
    fn test_value_text_is_not_a_key_failure() {
        let err = from_str::<OrderedMap<String, i32>>(r#"{"a": "unsupported key type: x"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");
    }

    #[test]
    fn test_merge_rejects_trailing_input() {
        let mut map: OrderedMap<String, i32> = OrderedMap::new();
        let err = merge_from_str(&mut map, r#"{"a": 1} {"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert_eq!(map.get("a"), Some(&1));
    }
}
