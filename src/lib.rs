#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod arena;
pub mod error;
pub mod key;
pub mod ordered_map;
mod serde_impl;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;

use core::num::NonZeroU32;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

type RandomState = std::hash::RandomState;

/// An insertion-ordered hash map using the default hasher.
///
/// For custom hashers, use [`ordered_map::OrderedMap`] directly.
///
/// # Examples
///
/// ```
/// use linked_ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
/// map.set("a", 10);
///
/// // Updating a key keeps its original position.
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"a", &10), (&"b", &2)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;

pub use error::Error;
pub use error::KeyNotFound;
pub use error::StaleHandle;
pub use key::TextMarshal;
pub use ordered_map::InitOption;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::IterMut;
pub use ordered_map::Pair;
pub use serde_impl::MergeSeed;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A detached, generation-checked reference to a pair in an
/// [`OrderedMap`].
///
/// Unlike a borrowed [`Pair`], a handle may be held across mutations of the
/// map. Once the pair it refers to is deleted, the handle is stale: every
/// handle-based operation reports [`StaleHandle`] instead of resolving to
/// whichever pair later reuses the storage slot.
///
/// # Examples
///
/// ```
/// use linked_ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// let handle = map.get_pair(&"a").unwrap().handle();
///
/// assert_eq!(map.pair(handle).map(|p| *p.value()), Ok(1));
///
/// map.delete(&"a");
/// map.set("b", 2);
/// assert!(map.pair(handle).is_err());
/// ```
pub struct Handle {
    slot: NonZeroU32,
    generation: u32,
}

impl core::fmt::Debug for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Handle({}v{})", self.index(), self.generation)
    }
}

impl Handle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Handle: {index}"
        );
        Handle {
            slot: NonZeroU32::MIN.saturating_add(index as u32),
            generation,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.slot.get() as usize - 1
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}
