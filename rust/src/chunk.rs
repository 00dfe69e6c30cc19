//! Chunk implementations for UnrolledList.
//!
//! This module contains the element-level operations on a single chunk:
//! indexed access, shifting inserts and removes, and the midpoint split
//! used when a full chunk has to absorb one more element.

use crate::arena::NULL_NODE;
use crate::types::Chunk;

// ============================================================================
// CHUNK IMPLEMENTATION
// ============================================================================

impl<T> Chunk<T> {
    /// Creates a new empty chunk with the specified capacity.
    ///
    /// The element storage is reserved up front so in-chunk edits never
    /// reallocate.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            elems: Vec::with_capacity(capacity),
            prev: NULL_NODE,
            next: NULL_NODE,
        }
    }

    // ============================================================================
    // GET OPERATIONS
    // ============================================================================

    /// Get a reference to the element at `index` within this chunk.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.elems.get(index)
    }

    /// Get a mutable reference to the element at `index` within this chunk.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elems.get_mut(index)
    }

    /// Returns the number of elements in this chunk.
    pub(crate) fn len(&self) -> usize {
        self.elems.len()
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Insert an element at `index`, shifting later elements one slot right.
    pub(crate) fn insert_at(&mut self, index: usize, value: T) {
        debug_assert!(!self.is_full(), "insert into full chunk must split first");
        self.elems.insert(index, value);
    }

    /// Append an element to the end of this chunk.
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(!self.is_full(), "push into full chunk must split first");
        self.elems.push(value);
    }

    // ============================================================================
    // REMOVE OPERATIONS
    // ============================================================================

    /// Remove and return the element at `index`, shifting later elements
    /// one slot left.
    pub(crate) fn remove_at(&mut self, index: usize) -> T {
        self.elems.remove(index)
    }

    /// Remove and return the last element of this chunk.
    pub(crate) fn pop(&mut self) -> Option<T> {
        self.elems.pop()
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns true if this chunk holds no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Returns true if this chunk is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.elems.len() >= self.capacity
    }

    // ============================================================================
    // SPLIT
    // ============================================================================

    /// Split this chunk at the midpoint, returning the new right chunk.
    ///
    /// The lower half `[0, len/2)` stays here; the upper half moves into the
    /// returned chunk. The right chunk takes over the `next` pointer, and
    /// both link fields that point at the new chunk are left for the caller
    /// to wire once the arena has assigned it an ID.
    pub(crate) fn split_off_upper(&mut self) -> Chunk<T> {
        let mid = self.elems.len() / 2;

        let mut upper = self.elems.split_off(mid);
        upper.reserve(self.capacity - upper.len());

        let new_right = Chunk {
            capacity: self.capacity,
            elems: upper,
            prev: NULL_NODE,
            next: self.next, // Right chunk takes over the next pointer
        };

        // This chunk's next is wired to the new right chunk by the caller
        // once the arena has assigned an ID.
        self.next = NULL_NODE;

        new_right
    }
}
