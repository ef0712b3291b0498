use core::marker::PhantomData;
use core::ops::Index;
use core::ops::IndexMut;
use core::ptr::NonNull;

use crate::Handle;

#[cold]
#[inline(never)]
fn assert_free() -> ! {
    panic!("Attempted to access data of free slot");
}

/// A live pair together with its position in the order list.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

#[derive(Debug, Clone)]
enum SlotState<K, V> {
    Free { next_free: Option<u32> },
    Occupied(Node<K, V>),
}

#[derive(Debug, Clone)]
struct Slot<K, V> {
    generation: u32,
    state: SlotState<K, V>,
}

/// Slot storage for the order list.
///
/// Freed slots are chained into a free list and reused by later allocations.
/// Every reuse bumps the slot's generation, so a [`Handle`] minted before the
/// slot was freed no longer resolves. A slot whose generation reaches
/// `u32::MAX` is retired instead of reused.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<u32>,
    live: usize,
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Frees every slot in place. Generations survive, so handles minted
    /// before the clear stay stale.
    pub(crate) fn clear(&mut self) {
        self.free_head = None;
        self.live = 0;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.generation == u32::MAX {
                slot.state = SlotState::Free { next_free: None };
                continue;
            }
            slot.state = SlotState::Free {
                next_free: self.free_head,
            };
            self.free_head = Some(index as u32);
        }
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Occupied slots cannot be compacted because outstanding handles
        // address them by index. Only trailing spare capacity is released.
        self.slots.shrink_to_fit();
    }

    pub(crate) fn alloc(
        &mut self,
        key: K,
        value: V,
        hash: u64,
        prev: Option<Handle>,
        next: Option<Handle>,
    ) -> Handle {
        let node = Node {
            key,
            value,
            hash,
            prev,
            next,
        };
        self.live += 1;

        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let SlotState::Free { next_free } = slot.state else {
                    assert_free()
                };
                self.free_head = next_free;
                slot.generation += 1;
                slot.state = SlotState::Occupied(node);
                Handle::new(index as usize, slot.generation)
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Occupied(node),
                });
                Handle::new(index, 0)
            }
        }
    }

    /// Returns `true` if `handle` addresses a live node of this arena.
    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&Node<K, V>> {
        let slot = self.slots.get(handle.index())?;
        match &slot.state {
            SlotState::Occupied(node) if slot.generation == handle.generation() => Some(node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        let slot = self.slots.get_mut(handle.index())?;
        match &mut slot.state {
            SlotState::Occupied(node) if slot.generation == handle.generation() => Some(node),
            _ => None,
        }
    }

    /// Releases the node at `handle` and returns it. The caller is
    /// responsible for unlinking its neighbours.
    pub(crate) fn free(&mut self, handle: Handle) -> Node<K, V> {
        assert!(self.is_live(handle), "Handle to free must be live");
        let index = handle.index();
        let retired = handle.generation() == u32::MAX;
        let next_free = if retired { None } else { self.free_head };
        let old = core::mem::replace(&mut self.slots[index].state, SlotState::Free { next_free });
        if !retired {
            self.free_head = Some(index as u32);
        }
        self.live -= 1;

        match old {
            SlotState::Occupied(node) => node,
            SlotState::Free { .. } => assert_free(),
        }
    }

    pub(crate) fn raw_nodes(&mut self) -> RawNodes<'_, K, V> {
        RawNodes {
            base: NonNull::new(self.slots.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            len: self.slots.len(),
            _arena: PhantomData,
        }
    }
}

/// An exclusive borrow of an arena that hands out disjoint mutable node
/// borrows by handle.
pub(crate) struct RawNodes<'a, K, V> {
    base: NonNull<Slot<K, V>>,
    len: usize,
    _arena: PhantomData<&'a mut Arena<K, V>>,
}

impl<K, V> core::fmt::Debug for RawNodes<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawNodes").field("len", &self.len).finish()
    }
}

impl<'a, K, V> RawNodes<'a, K, V> {
    /// # Safety
    ///
    /// `handle` must be live in the borrowed arena, and the returned
    /// reference must be the only one to that node for `'a`.
    pub(crate) unsafe fn node(&self, handle: Handle) -> &'a mut Node<K, V> {
        debug_assert!(handle.index() < self.len);
        // SAFETY: Per the contract, the index is in bounds and the slot is
        // not aliased.
        let slot = unsafe { &mut *self.base.as_ptr().add(handle.index()) };
        match &mut slot.state {
            SlotState::Occupied(node) => node,
            SlotState::Free { .. } => assert_free(),
        }
    }
}

impl<K, V> Index<Handle> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, handle: Handle) -> &Self::Output {
        match self.get(handle) {
            Some(node) => node,
            None => assert_free(),
        }
    }
}

impl<K, V> IndexMut<Handle> for Arena<K, V> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        match self.get_mut(handle) {
            Some(node) => node,
            None => assert_free(),
        }
    }
}
