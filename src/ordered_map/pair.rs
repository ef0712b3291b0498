use crate::Handle;
use crate::arena::Arena;
#[cfg(doc)]
use crate::ordered_map::OrderedMap;

/// A borrowed view of one key-value pair of an [`OrderedMap`], positioned in
/// its order list.
///
/// From a pair the map can be walked in either direction with
/// [`next`](Pair::next) and [`prev`](Pair::prev). The view borrows the map,
/// so the order cannot change underneath it; use [`handle`](Pair::handle) to
/// keep a reference to the pair across mutations.
///
/// # Examples
///
/// ```
/// use linked_ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set(1, "one");
/// map.set(2, "two");
/// map.set(3, "three");
///
/// let mut keys = Vec::new();
/// let mut pair = map.newest();
/// while let Some(p) = pair {
///     keys.push(*p.key());
///     pair = p.prev();
/// }
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub struct Pair<'a, K, V> {
    nodes: &'a Arena<K, V>,
    handle: Handle,
}

impl<K, V> Clone for Pair<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Pair<'_, K, V> {}

impl<'a, K, V> Pair<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<K, V>, handle: Handle) -> Self {
        debug_assert!(nodes.is_live(handle));
        Pair { nodes, handle }
    }

    /// Returns the key of this pair.
    pub fn key(&self) -> &'a K {
        &self.nodes[self.handle].key
    }

    /// Returns the value of this pair.
    pub fn value(&self) -> &'a V {
        &self.nodes[self.handle].value
    }

    /// Returns the key and value of this pair.
    pub fn key_value(&self) -> (&'a K, &'a V) {
        let node = &self.nodes[self.handle];
        (&node.key, &node.value)
    }

    /// Returns the handle of this pair.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the next newer pair, or `None` if this is the newest.
    pub fn next(&self) -> Option<Pair<'a, K, V>> {
        self.nodes[self.handle]
            .next
            .map(|handle| Pair::new(self.nodes, handle))
    }

    /// Returns the next older pair, or `None` if this is the oldest.
    pub fn prev(&self) -> Option<Pair<'a, K, V>> {
        self.nodes[self.handle]
            .prev
            .map(|handle| Pair::new(self.nodes, handle))
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug> core::fmt::Debug for Pair<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pair")
            .field("key", self.key())
            .field("value", self.value())
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedMap;

    #[test]
    fn test_pair_walk_after_reverse() {
        let mut map: OrderedMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        map.reverse();

        let oldest = map.oldest().unwrap();
        assert_eq!(oldest.key_value(), (&"c", &3));
        assert!(oldest.prev().is_none());
        assert_eq!(oldest.next().unwrap().next().unwrap().key(), &"a");
    }

    #[test]
    fn test_pair_is_copy() {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        let pair = map.oldest().unwrap();
        let copy = pair;
        assert_eq!(pair.handle(), copy.handle());
    }

    #[test]
    fn test_pair_debug() {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        let pair = map.get_pair("a").unwrap();
        assert_eq!(
            format!("{pair:?}"),
            r#"Pair { key: "a", value: 1, handle: Handle(0v0) }"#
        );
    }
}
