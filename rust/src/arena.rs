//! Slot arena implementation using Vec<T> with a free list.
//! Chunks live in one arena and link to each other by index instead of
//! by pointer, so the chain owns no self-referential borrows.

use std::convert::TryFrom;
use std::fmt::Debug;

pub type NodeId = u32;
pub const NULL_NODE: NodeId = u32::MAX;

/// Occupancy counters reported by [`SlotArena::stats`]
#[derive(Debug, Clone, Copy)]
pub struct ArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Slot arena allocator backed by direct Vec<T> storage.
/// Uses a separate free list and generation tracking; freed slots are
/// reused in LIFO order, so a NodeId is only meaningful while its slot
/// stays allocated.
#[derive(Debug)]
pub struct SlotArena<T> {
    /// Slot storage; a NodeId is an index into this Vec
    storage: Vec<T>,
    /// Indices of freed slots, reused last-in first-out
    free_list: Vec<usize>,
    /// Bumped on every allocation
    generation: u32,
    /// Which slots currently hold a live value
    allocated_mask: Vec<bool>,
}

impl<T> SlotArena<T> {
    /// Create an arena with no slots
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            generation: 0,
            allocated_mask: Vec::new(),
        }
    }

    /// Create an arena with `capacity` slots preallocated
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            generation: 0,
            allocated_mask: Vec::with_capacity(capacity),
        }
    }

    /// Store `item` in a slot and return its id. Freed slots are reused
    /// before the backing storage grows.
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        self.generation = self.generation.wrapping_add(1);

        let index = match self.free_list.pop() {
            Some(slot) => {
                self.storage[slot] = item;
                self.allocated_mask[slot] = true;
                slot
            }
            None => {
                self.storage.push(item);
                self.allocated_mask.push(true);
                self.storage.len() - 1
            }
        };

        NodeId::try_from(index).expect("Index should fit in NodeId")
    }

    /// Free the slot for `id` and return its value, or None if the id is
    /// null or stale. The vacated slot holds `T::default()` until reuse.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T>
    where
        T: Default,
    {
        let index = self.live_index(id)?;
        self.allocated_mask[index] = false;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Resolve an id to a storage index, or None if it does not name a
    /// live slot. The mask and storage always have equal length, so the
    /// mask lookup doubles as the bounds check.
    #[inline]
    fn live_index(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }

        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(index)
        } else {
            None
        }
    }

    /// Get a reference to the value in a live slot
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.live_index(id)?;
        Some(&self.storage[index])
    }

    /// Get a mutable reference to the value in a live slot
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.live_index(id)?;
        Some(&mut self.storage[index])
    }

    /// Check whether `id` names a live slot
    pub fn contains(&self, id: NodeId) -> bool {
        self.live_index(id).is_some()
    }

    /// Snapshot of slot occupancy
    pub fn stats(&self) -> ArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.len();
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        ArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Number of live slots. Counts the mask, so this is O(slots).
    pub fn len(&self) -> usize {
        self.allocated_mask.iter().filter(|&&live| live).count()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the total capacity
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Drop every value and forget every slot. Ids handed out before the
    /// clear no longer name anything.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
        self.generation = 0;
    }

    /// Raw pointer to the storage buffer. IDs of live slots index this
    /// buffer directly; callers that walk it must keep the arena borrowed
    /// for as long as the pointer is in use.
    #[inline]
    pub(crate) fn storage_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Number of freed slots awaiting reuse
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Alias for [`SlotArena::len`]
    pub fn allocated_count(&self) -> usize {
        self.len()
    }

    /// Fraction of reserved capacity holding live values
    pub fn utilization(&self) -> f64 {
        let stats = self.stats();
        stats.utilization
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
