//! Format-agnostic serde support for [`OrderedMap`].
//!
//! A map encodes as a mapping whose entries appear oldest first, with every
//! key passed through the [key codec](crate::key). Decoding applies each
//! entry with [`OrderedMap::set`] in source order.

use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::DeserializeSeed;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser;
use serde::ser::SerializeMap;

use crate::key;
use crate::key::RawKey;
use crate::ordered_map::OrderedMap;

impl<K, V, S> Serialize for OrderedMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (key, value) in self {
            let key = key::to_scalar(key).map_err(<Ser::Error as ser::Error>::custom)?;
            map.serialize_entry(&key, value)?;
        }

        map.end()
    }
}

impl<'de, K, V, S> Deserialize<'de> for OrderedMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = OrderedMap::with_hasher(S::default());
        MergeSeed::new(&mut map).deserialize(deserializer)?;
        Ok(map)
    }
}

/// Decodes a mapping into an existing [`OrderedMap`].
///
/// Decoded entries are applied with [`OrderedMap::set`] in source order:
/// keys new to the map are appended, and keys already present keep their
/// position and take the decoded value.
///
/// # Examples
///
/// ```
/// use linked_ordered_map::MergeSeed;
/// use linked_ordered_map::OrderedMap;
/// use serde::de::DeserializeSeed;
///
/// let mut map = OrderedMap::new();
/// map.set("a".to_string(), 1);
///
/// let mut de = serde_json::Deserializer::from_str(r#"{"b": 2, "a": 3}"#);
/// MergeSeed::new(&mut map).deserialize(&mut de).unwrap();
///
/// let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
/// assert_eq!(entries, [("a", 3), ("b", 2)]);
/// ```
pub struct MergeSeed<'a, K, V, S> {
    map: &'a mut OrderedMap<K, V, S>,
}

impl<'a, K, V, S> MergeSeed<'a, K, V, S> {
    /// Creates a seed that decodes into `map`.
    pub fn new(map: &'a mut OrderedMap<K, V, S>) -> Self {
        MergeSeed { map }
    }
}

impl<'de, K, V, S> DeserializeSeed<'de> for MergeSeed<'_, K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher,
{
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MergeVisitor { map: self.map })
    }
}

struct MergeVisitor<'a, K, V, S> {
    map: &'a mut OrderedMap<K, V, S>,
}

impl<'de, K, V, S> Visitor<'de> for MergeVisitor<'_, K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_map<A>(self, mut access: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        self.map.reserve(access.size_hint().unwrap_or(0));

        let mut entries = 0usize;
        while let Some(raw) = access.next_key::<RawKey<'de>>()? {
            let key: K = key::from_raw(raw).map_err(<A::Error as de::Error>::custom)?;
            let value: V = access.next_value()?;
            entries += 1;

            let (handle, replaced) = self.map.set_full(key, value);
            if replaced.is_some() {
                tracing::debug!(?handle, "key already present, value replaced in place");
            }
        }

        tracing::trace!(entries, len = self.map.len(), "decoded ordered mapping");
        Ok(())
    }
}
