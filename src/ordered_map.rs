//! Ordered map implementation.
//!
//! This module provides the core [`OrderedMap`] type. The map keeps its
//! entries in a doubly-linked order list stored in a slot arena, and indexes
//! them by key in a hash table, so lookups, insertions, deletions and every
//! reordering operation are O(1).
//!
//! # Examples
//!
//! ```
//! use linked_ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set(1, "one");
//! map.set(2, "two");
//! map.set(3, "three");
//! map.move_to_front(&3).unwrap();
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, [3, 1, 2]);
//! ```

mod iter;
mod pair;

use core::borrow::Borrow;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use hashbrown::HashTable;
use hashbrown::hash_table;

use crate::Handle;
use crate::RandomState;
use crate::arena::Arena;
use crate::error::KeyNotFound;
use crate::error::StaleHandle;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use iter::Keys;
pub use iter::Values;
pub use iter::ValuesMut;
pub use pair::Pair;

/// A construction option for [`OrderedMap::with_options`].
///
/// # Examples
///
/// ```
/// use linked_ordered_map::InitOption;
/// use linked_ordered_map::OrderedMap;
///
/// let map: OrderedMap<&str, i32> = OrderedMap::with_options([
///     InitOption::Capacity(16),
///     InitOption::Pairs(vec![("b", 2), ("a", 1)]),
/// ]);
///
/// assert!(map.capacity() >= 16);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOption<K, V> {
    /// Pre-size the map for at least this many pairs.
    Capacity(usize),
    /// Seed the map with these pairs, in order, with [`OrderedMap::add_pairs`]
    /// semantics.
    Pairs(Vec<(K, V)>),
}

/// A hash map that remembers the order in which keys were first inserted.
///
/// Every pair lives in a slot arena and is threaded onto a doubly-linked
/// order list running from the oldest pair to the newest. A hash table maps
/// each key to the [`Handle`] of its pair.
///
/// Setting a new key appends it to the newest end. Setting an existing key
/// replaces the value in place and never moves it. Deleting a key and setting
/// it again makes it the newest pair. The `move_*` operations reorder pairs
/// explicitly.
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `V`: Value type
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// A map created with [`new`](OrderedMap::new) owns no storage until its
/// first write, and behaves as an ordinary empty map for every read.
///
/// # Examples
///
/// ```
/// use linked_ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("apple", 5);
/// map.set("banana", 3);
/// map.set("cherry", 8);
///
/// let mut pair = map.oldest();
/// while let Some(p) = pair {
///     println!("{}: {}", p.key(), p.value());
///     pair = p.next();
/// }
/// // Prints: apple: 5, banana: 3, cherry: 8
/// ```
pub struct OrderedMap<K, V, S = RandomState> {
    head: Option<Handle>,
    tail: Option<Handle>,
    nodes: Arena<K, V>,
    table: HashTable<Handle>,
    hasher: S,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    ///
    /// The map does not allocate until the first pair is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<String, i32> = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// assert!(map.oldest().is_none());
    /// assert!(map.newest().is_none());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map with room for at least `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map that will hash keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        OrderedMap {
            head: None,
            tail: None,
            nodes: Arena::new(),
            table: HashTable::new(),
            hasher,
        }
    }

    /// Creates an empty map with room for at least `capacity` pairs that will
    /// hash keys with `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            head: None,
            tail: None,
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns a reference to the map's hash builder.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of pairs in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.set(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of pairs the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.table.capacity().min(self.nodes.capacity())
    }

    /// Removes every pair, keeping the allocated memory for reuse.
    ///
    /// Every outstanding [`Handle`] becomes stale.
    pub fn clear(&mut self) {
        self.table.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.debug_check();
    }

    /// Returns the oldest pair, the first one in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let oldest = map.oldest().unwrap();
    /// assert_eq!(oldest.key(), &"a");
    /// assert_eq!(oldest.next().map(|p| *p.key()), Some("b"));
    /// ```
    pub fn oldest(&self) -> Option<Pair<'_, K, V>> {
        self.head.map(|handle| Pair::new(&self.nodes, handle))
    }

    /// Returns the newest pair, the last one in iteration order.
    pub fn newest(&self) -> Option<Pair<'_, K, V>> {
        self.tail.map(|handle| Pair::new(&self.nodes, handle))
    }

    /// Alias of [`oldest`](Self::oldest).
    #[inline]
    pub fn front(&self) -> Option<Pair<'_, K, V>> {
        self.oldest()
    }

    /// Alias of [`newest`](Self::newest).
    #[inline]
    pub fn back(&self) -> Option<Pair<'_, K, V>> {
        self.newest()
    }

    /// Resolves a [`Handle`] to its pair.
    ///
    /// Fails with [`StaleHandle`] if the pair has been deleted since the
    /// handle was obtained, even if its storage has been reused.
    pub fn pair(&self, handle: Handle) -> Result<Pair<'_, K, V>, StaleHandle> {
        if self.nodes.is_live(handle) {
            Ok(Pair::new(&self.nodes, handle))
        } else {
            Err(StaleHandle(handle))
        }
    }

    /// Returns a mutable reference to the value of the pair at `handle`.
    pub fn value_at_mut(&mut self, handle: Handle) -> Result<&mut V, StaleHandle> {
        self.nodes
            .get_mut(handle)
            .map(|node| &mut node.value)
            .ok_or(StaleHandle(handle))
    }

    /// Returns `true` if `handle` refers to a pair currently in the map.
    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.nodes.is_live(handle)
    }

    /// Returns an iterator over the pairs from oldest to newest.
    ///
    /// The iterator is double-ended; reverse it to walk from newest to
    /// oldest.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// map.set("c", 3);
    ///
    /// let newest_first: Vec<_> = map.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(newest_first, ["c", "b", "a"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            front: self.head,
            back: self.tail,
            remaining: self.len(),
            nodes: &self.nodes,
        }
    }

    /// Returns an iterator over the pairs from oldest to newest, with mutable
    /// references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            front: self.head,
            back: self.tail,
            remaining: self.table.len(),
            nodes: self.nodes.raw_nodes(),
        }
    }

    /// Returns an iterator over the keys from oldest to newest.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over the values from oldest to newest.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// Returns an iterator over mutable references to the values from oldest
    /// to newest.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Reverses the order of the map in place, so the oldest pair becomes the
    /// newest and vice versa.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// map.reverse();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = &mut self.nodes[handle];
            core::mem::swap(&mut node.prev, &mut node.next);
            cursor = node.prev;
        }
        core::mem::swap(&mut self.head, &mut self.tail);
        self.debug_check();
    }

    /// Detaches `handle` from the order list, leaving it allocated.
    fn unlink(&mut self, handle: Handle) {
        let node = &mut self.nodes[handle];
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links a detached `handle` immediately after `after`.
    fn link_after(&mut self, handle: Handle, after: Handle) {
        debug_assert!(self.is_detached(handle));
        let next = self.nodes[after].next.replace(handle);
        let node = &mut self.nodes[handle];
        node.prev = Some(after);
        node.next = next;
        match next {
            Some(next) => self.nodes[next].prev = Some(handle),
            None => self.tail = Some(handle),
        }
    }

    /// Links a detached `handle` immediately before `before`.
    fn link_before(&mut self, handle: Handle, before: Handle) {
        debug_assert!(self.is_detached(handle));
        let prev = self.nodes[before].prev.replace(handle);
        let node = &mut self.nodes[handle];
        node.next = Some(before);
        node.prev = prev;
        match prev {
            Some(prev) => self.nodes[prev].next = Some(handle),
            None => self.head = Some(handle),
        }
    }

    /// Links a detached `handle` as the newest pair.
    fn link_back(&mut self, handle: Handle) {
        match self.tail {
            Some(tail) => self.link_after(handle, tail),
            None => {
                debug_assert!(self.head.is_none());
                self.head = Some(handle);
                self.tail = Some(handle);
            }
        }
    }

    fn is_detached(&self, handle: Handle) -> bool {
        let node = &self.nodes[handle];
        node.prev.is_none() && node.next.is_none() && self.head != Some(handle)
    }

    fn relink_after(&mut self, moved: Handle, after: Handle) {
        if moved == after || self.nodes[after].next == Some(moved) {
            return;
        }
        self.unlink(moved);
        self.link_after(moved, after);
        self.debug_check();
    }

    fn relink_before(&mut self, moved: Handle, before: Handle) {
        if moved == before || self.nodes[before].prev == Some(moved) {
            return;
        }
        self.unlink(moved);
        self.link_before(moved, before);
        self.debug_check();
    }

    fn relink_front(&mut self, moved: Handle) {
        if let Some(head) = self.head {
            self.relink_before(moved, head);
        }
    }

    fn relink_back(&mut self, moved: Handle) {
        if let Some(tail) = self.tail {
            self.relink_after(moved, tail);
        }
    }

    /// Constant-time agreement checks between the index, the arena and the
    /// ends of the order list. The full walk lives in `assert_invariants`.
    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(self.nodes.live(), self.table.len(), "index and arena disagree");
        debug_assert_eq!(self.head.is_none(), self.table.is_empty());
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());
        debug_assert!(self.head.is_none_or(|head| self.nodes[head].prev.is_none()));
        debug_assert!(self.tail.is_none_or(|tail| self.nodes[tail].next.is_none()));
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut seen = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            assert_eq!(node.prev, prev, "broken back link at {handle:?}");
            assert!(
                self.table.find(node.hash, |&h| h == handle).is_some(),
                "{handle:?} is linked but not indexed"
            );
            seen += 1;
            prev = Some(handle);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev, "tail does not end the order list");
        assert_eq!(seen, self.table.len(), "order list and index disagree");
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> OrderedMap<K, V, S> {
    /// Creates a map from a list of [`InitOption`]s.
    ///
    /// The map is pre-sized for the largest requested capacity (or the number
    /// of seeded pairs, if larger), then every [`InitOption::Pairs`] list is
    /// added in the order given.
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = InitOption<K, V>>,
        S: Default,
    {
        let mut capacity = 0;
        let mut pairs = Vec::new();
        for option in options {
            match option {
                InitOption::Capacity(requested) => capacity = capacity.max(requested),
                InitOption::Pairs(seed) => pairs.extend(seed),
            }
        }

        let mut map = Self::with_capacity_and_hasher(capacity.max(pairs.len()), S::default());
        map.add_pairs(pairs);
        map
    }

    /// Reserves room for at least `additional` more pairs.
    pub fn reserve(&mut self, additional: usize) {
        let Self { nodes, table, .. } = self;
        table.reserve(additional, |&h| nodes[h].hash);
        nodes.reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let Self { nodes, table, .. } = self;
        table.shrink_to_fit(|&h| nodes[h].hash);
        nodes.shrink_to_fit();
    }

    fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.table.is_empty() {
            return None;
        }
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&h| Borrow::<Q>::borrow(&self.nodes[h].key) == key)
            .copied()
    }

    fn find_or_not_found(&self, key: &K) -> Result<Handle, KeyNotFound<K>>
    where
        K: Clone,
    {
        self.find(key)
            .ok_or_else(|| KeyNotFound { key: key.clone() })
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// Lookup never changes the order of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a".to_string(), 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|h| &self.nodes[h].value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|h| {
            let node = &self.nodes[h];
            (&node.key, &node.value)
        })
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.find(key)?;
        Some(&mut self.nodes[handle].value)
    }

    /// Returns the pair stored for `key`, from which the map can be walked in
    /// either direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// map.set("c", 3);
    ///
    /// let b = map.get_pair(&"b").unwrap();
    /// assert_eq!(b.prev().map(|p| *p.key()), Some("a"));
    /// assert_eq!(b.next().map(|p| *p.key()), Some("c"));
    /// assert!(b.next().unwrap().next().is_none());
    /// ```
    pub fn get_pair<Q>(&self, key: &Q) -> Option<Pair<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|h| Pair::new(&self.nodes, h))
    }

    /// Returns `true` if the map holds a pair for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Sets the value for `key`, returning the value it replaced.
    ///
    /// A new key is appended as the newest pair. An existing key keeps its
    /// position; only its value changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.set("a", 1), None);
    /// assert_eq!(map.set("b", 2), None);
    /// assert_eq!(map.set("a", 3), Some(1));
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"a", &3), (&"b", &2)]);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.set_full(key, value).1
    }

    /// Equivalent to [`set`](Self::set).
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    /// Sets the value for `key` like [`set`](Self::set), additionally
    /// returning the handle of the pair.
    pub fn set_full(&mut self, key: K, value: V) -> (Handle, Option<V>) {
        let hash = self.hasher.hash_one(&key);
        let Self { nodes, table, .. } = self;
        let entry = table.entry(hash, |&h| nodes[h].key == key, |&h| nodes[h].hash);

        match entry {
            hash_table::Entry::Occupied(occupied) => {
                let handle = *occupied.get();
                let old = core::mem::replace(&mut nodes[handle].value, value);
                (handle, Some(old))
            }
            hash_table::Entry::Vacant(vacant) => {
                let handle = nodes.alloc(key, value, hash, None, None);
                vacant.insert(handle);
                self.link_back(handle);
                self.debug_check();
                (handle, None)
            }
        }
    }

    /// Appends a key known to be absent, reusing its precomputed hash.
    fn push_back_unique(&mut self, key: K, value: V, hash: u64) {
        let Self { nodes, table, .. } = self;
        let handle = nodes.alloc(key, value, hash, None, None);
        table.insert_unique(hash, handle, |&h| nodes[h].hash);
        self.link_back(handle);
        self.debug_check();
    }

    /// Sets every pair from `pairs`, in order.
    ///
    /// A key repeated within `pairs` takes its position from its first
    /// occurrence and its value from its last, exactly as a sequence of
    /// [`set`](Self::set) calls would.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.add_pairs([("x", 1), ("y", 2), ("x", 3)]);
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"x", &3), (&"y", &2)]);
    /// ```
    pub fn add_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        self.reserve(pairs.size_hint().0);
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Deletes `key` from the map, returning its value.
    ///
    /// Setting the same key again later appends it as the newest pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// assert_eq!(map.delete(&"a"), Some(1));
    /// assert_eq!(map.delete(&"a"), None);
    ///
    /// map.set("a", 1);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.delete_entry(key).map(|(_, v)| v)
    }

    /// Equivalent to [`delete`](Self::delete).
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.delete(key)
    }

    /// Deletes `key` from the map, returning the stored key and value.
    pub fn delete_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.table.is_empty() {
            return None;
        }
        let hash = self.hasher.hash_one(key);
        let Self { nodes, table, .. } = self;
        let occupied = table
            .find_entry(hash, |&h| Borrow::<Q>::borrow(&nodes[h].key) == key)
            .ok()?;
        let (handle, _) = occupied.remove();
        Some(self.release(handle))
    }

    /// Deletes the pair at `handle`, returning its key and value.
    pub fn delete_at(&mut self, handle: Handle) -> Result<(K, V), StaleHandle> {
        if !self.nodes.is_live(handle) {
            return Err(StaleHandle(handle));
        }
        Ok(self.remove_live(handle))
    }

    /// Removes a pair known to be live from the index, then releases it.
    fn remove_live(&mut self, handle: Handle) -> (K, V) {
        let hash = self.nodes[handle].hash;
        match self.table.find_entry(hash, |&h| h == handle) {
            Ok(occupied) => {
                occupied.remove();
            }
            Err(_) => {
                #[cold]
                #[inline(never)]
                fn die() -> ! {
                    panic!("Live handle not found in index");
                }
                die()
            }
        }

        self.release(handle)
    }

    /// Unlinks and frees a pair that has already left the index.
    fn release(&mut self, handle: Handle) -> (K, V) {
        self.unlink(handle);
        let node = self.nodes.free(handle);
        self.debug_check();
        (node.key, node.value)
    }

    /// Removes and returns the oldest pair.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let head = self.head?;
        Some(self.remove_live(head))
    }

    /// Removes and returns the newest pair.
    pub fn pop_newest(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        Some(self.remove_live(tail))
    }

    /// Retains only the pairs for which `f` returns `true`, visiting them
    /// from oldest to newest.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = (1..=6).map(|i| (i, i * 10)).collect();
    /// map.retain(|k, v| {
    ///     *v += 1;
    ///     k % 2 == 0
    /// });
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&2, &21), (&4, &41), (&6, &61)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = &mut self.nodes[handle];
            cursor = node.next;
            if !f(&node.key, &mut node.value) {
                self.remove_live(handle);
            }
        }
    }

    /// Moves `key` to sit immediately after `mark`.
    ///
    /// Fails with [`KeyNotFound`] naming whichever of the two keys is absent.
    /// Moving a key after itself, or after the pair it already follows,
    /// leaves the order unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = [(1, ()), (2, ()), (3, ()), (4, ())].into_iter().collect();
    /// map.move_after(&2, &3).unwrap();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 2, 4]);
    ///
    /// let err = map.move_after(&2, &9).unwrap_err();
    /// assert_eq!(err.key, 9);
    /// ```
    pub fn move_after(&mut self, key: &K, mark: &K) -> Result<(), KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        let after = self.find_or_not_found(mark)?;
        self.relink_after(moved, after);
        Ok(())
    }

    /// Moves `key` to sit immediately before `mark`.
    ///
    /// Fails with [`KeyNotFound`] naming whichever of the two keys is absent.
    pub fn move_before(&mut self, key: &K, mark: &K) -> Result<(), KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        let before = self.find_or_not_found(mark)?;
        self.relink_before(moved, before);
        Ok(())
    }

    /// Moves `key` to the oldest end of the map.
    pub fn move_to_front(&mut self, key: &K) -> Result<(), KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        self.relink_front(moved);
        Ok(())
    }

    /// Moves `key` to the newest end of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// map.set("c", 3);
    ///
    /// map.move_to_back(&"a").unwrap();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "c", "a"]);
    /// assert!(map.move_to_back(&"z").is_err());
    /// ```
    pub fn move_to_back(&mut self, key: &K) -> Result<(), KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        self.relink_back(moved);
        Ok(())
    }

    /// Moves `key` to the oldest end of the map and returns its value.
    pub fn get_and_move_to_front(&mut self, key: &K) -> Result<&mut V, KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        self.relink_front(moved);
        Ok(&mut self.nodes[moved].value)
    }

    /// Moves `key` to the newest end of the map and returns its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// *map.get_and_move_to_back(&"a").unwrap() += 10;
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&"b", &2), (&"a", &11)]);
    /// ```
    pub fn get_and_move_to_back(&mut self, key: &K) -> Result<&mut V, KeyNotFound<K>>
    where
        K: Clone,
    {
        let moved = self.find_or_not_found(key)?;
        self.relink_back(moved);
        Ok(&mut self.nodes[moved].value)
    }
}

impl<K, V, S> Default for OrderedMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Copies the map into fresh, compacted storage with the same order.
    ///
    /// Handles from the source do not resolve in the copy.
    fn clone(&self) -> Self {
        let mut map = Self::with_capacity_and_hasher(self.len(), self.hasher.clone());
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            map.push_back_unique(node.key.clone(), node.value.clone(), node.hash);
            cursor = node.next;
        }
        map
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Two maps are equal if they hold the same pairs, regardless of order.
    /// Compare [`iter`](OrderedMap::iter) sequences to also compare order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.add_pairs(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.add_pairs(iter);
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.add_pairs(iter.into_iter().map(|(k, v)| (*k, *v)));
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            front: self.head,
            back: self.tail,
            remaining: self.table.len(),
            nodes: self.nodes,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, Q, V, S> Index<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => {
                #[cold]
                #[inline(never)]
                fn missing() -> ! {
                    panic!("key not found in OrderedMap");
                }
                missing()
            }
        }
    }
}
