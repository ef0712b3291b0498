//! YAML encoding and decoding.
//!
//! Wrappers over `serde_yaml`. Integer keys are written as plain YAML
//! integers; string keys and values that would read back as another scalar
//! type are quoted.
//!
//! # Examples
//!
//! ```
//! use linked_ordered_map::OrderedMap;
//! use linked_ordered_map::yaml;
//!
//! let mut map = OrderedMap::new();
//! map.set(2, "28".to_string());
//! map.set(1, "bar".to_string());
//!
//! let text = yaml::to_string(&map).unwrap();
//! assert_eq!(text, "2: '28'\n1: bar\n");
//!
//! let decoded: OrderedMap<u8, String> = yaml::from_str(&text).unwrap();
//! assert_eq!(decoded.keys().copied().collect::<Vec<_>>(), [2, 1]);
//! ```

use std::hash::BuildHasher;
use std::hash::Hash;
use std::io;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::de::DeserializeSeed;

use crate::Error;
use crate::MergeSeed;
use crate::ordered_map::OrderedMap;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        let io_kind = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .map(io::Error::kind);

        match io_kind {
            Some(kind) => Error::Io(io::Error::new(kind, err.to_string())),
            None => Error::from_message(err.to_string()),
        }
    }
}

/// Encodes `value` as a YAML document.
///
/// An empty map encodes as `{}\n`.
pub fn to_string<T>(value: &T) -> Result<String, Error>
where
    T: Serialize + ?Sized,
{
    Ok(serde_yaml::to_string(value)?)
}

/// Writes `value` as a YAML document to `writer`.
///
/// The document is encoded in full before anything is written, so an
/// encoding failure leaves `writer` untouched.
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<(), Error>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    let out = to_string(value)?;
    writer.write_all(out.as_bytes())?;
    Ok(())
}

/// Decodes a `T` from a YAML document.
///
/// Decoding an [`OrderedMap`] requires a YAML mapping; any other node is
/// [`Error::MalformedInput`].
pub fn from_str<'a, T>(s: &'a str) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    Ok(serde_yaml::from_str(s)?)
}

/// Decodes a `T` from YAML bytes.
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    Ok(serde_yaml::from_slice(v)?)
}

/// Decodes a `T` from a YAML reader.
pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
    R: io::Read,
    T: DeserializeOwned,
{
    Ok(serde_yaml::from_reader(reader)?)
}

/// Decodes a YAML mapping into an existing map. See [`MergeSeed`].
pub fn merge_from_str<'a, K, V, S>(map: &mut OrderedMap<K, V, S>, s: &'a str) -> Result<(), Error>
where
    K: Deserialize<'a> + Hash + Eq,
    V: Deserialize<'a>,
    S: BuildHasher,
{
    MergeSeed::new(map).deserialize(serde_yaml::Deserializer::from_str(s))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedMap;

    #[test]
    fn test_error_classification() {
        let err = from_str::<OrderedMap<String, i32>>("- a\n- b\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = from_str::<OrderedMap<String, i32>>("a: [\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = from_str::<OrderedMap<bool, i32>>("true: 1\n").unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(_)), "{err:?}");
    }

    #[test]
    fn test_nested_key_failure_keeps_its_kind() {
        let err = from_str::<OrderedMap<String, OrderedMap<bool, i32>>>("m:\n  true: 1\n")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(ref name) if name == "bool"), "{err:?}");

        let err = from_str::<OrderedMap<String, i32>>("a: 'unsupported key type: x'\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");
    }

    #[test]
    fn test_writer_untouched_on_key_failure() {
        let mut map = OrderedMap::new();
        map.set(false, 1);
        let mut out = Vec::new();
        let err = to_writer(&mut out, &map).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(_)), "{err:?}");
        assert!(out.is_empty());

        let mut ok = OrderedMap::new();
        ok.set(1u8, "one");
        to_writer(&mut out, &ok).unwrap();
        assert_eq!(out, b"1: one\n");
    }

    #[test]
    fn test_merge_keeps_existing_positions() {
        let mut map = OrderedMap::new();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);
        merge_from_str(&mut map, "c: 3\na: 10\n").unwrap();

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, [("a", 10), ("b", 2), ("c", 3)]);
    }
}
