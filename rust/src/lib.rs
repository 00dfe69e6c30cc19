//! Unrolled linked list implementation in Rust with cursor-based editing.
//!
//! This module provides a doubly linked list of fixed-capacity chunks,
//! supporting efficient push/pop at both ends, cursor navigation, insertion
//! and removal at any position, and pluggable allocation policies.

mod arena;
mod chunk;
mod types;
mod error;
mod policy;
mod cursor;
mod construction;
mod insert_operations;
mod remove_operations;
mod iteration;
mod validation;

pub use arena::{ArenaStats, SlotArena};
pub use construction::DEFAULT_CHUNK_CAPACITY;
pub use cursor::Cursor;
pub use error::{InitResult, ListError, ListResult, ListResultExt, ModifyResult};
pub use iteration::{IntoIter, Iter, IterMut};
pub use policy::{AllocError, AllocPolicy, Quota, Unbounded};
pub use types::{UnrolledList, NodeId, NULL_NODE};

use std::fmt;

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    // ============================================================================
    // OTHER API OPERATIONS
    // ============================================================================

    // Construction methods live in construction.rs; cursor navigation and
    // element access in cursor.rs; mutation in insert_operations.rs and
    // remove_operations.rs; iterators in iteration.rs.

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the chunk capacity the list was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the theoretical maximum number of elements.
    ///
    /// In practice the allocation policy or the allocator refuses long
    /// before this bound is reached.
    pub fn max_len(&self) -> usize {
        usize::MAX
    }

    /// Returns a reference to the allocation policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns the number of chunks currently linked into the list.
    pub fn chunk_count(&self) -> usize {
        self.arena.allocated_count()
    }

    /// Returns the number of free chunk slots retained by the arena.
    pub fn free_chunk_count(&self) -> usize {
        self.arena.free_count()
    }

    /// Get statistics for the chunk arena.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Swaps the contents of two lists, policies included.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl<T, P, Q> PartialEq<UnrolledList<T, Q>> for UnrolledList<T, P>
where
    T: PartialEq,
    P: AllocPolicy,
    Q: AllocPolicy,
{
    fn eq(&self, other: &UnrolledList<T, Q>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P: AllocPolicy> Eq for UnrolledList<T, P> {}

impl<T: fmt::Debug, P: AllocPolicy> fmt::Debug for UnrolledList<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[test]
    fn test_len_and_capacity_reporting() {
        let mut list = UnrolledList::new(4).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 4);

        for i in 0..9 {
            list.push_back(i).unwrap();
        }
        assert_eq!(list.len(), 9);
        assert!(!list.is_empty());
        assert_eq!(list.chunk_count(), 3);
        assert!(list.max_len() >= list.len());
    }

    #[test]
    fn test_arena_retains_released_chunks() {
        let mut list = UnrolledList::new(2).unwrap();
        for i in 0..6 {
            list.push_back(i).unwrap();
        }
        assert_eq!(list.chunk_count(), 3);

        while list.pop_back().is_some() {}
        assert_eq!(list.chunk_count(), 0);
        assert_eq!(list.free_chunk_count(), 3);

        let stats = list.arena_stats();
        assert_eq!(stats.allocated_count, 0);
        assert_eq!(stats.free_count, 3);
    }

    #[test]
    fn test_swap_exchanges_everything() {
        let mut a = UnrolledList::from_iter_with_capacity(0..5, 2).unwrap();
        let mut b = UnrolledList::from_iter_with_capacity(10..12, 8).unwrap();

        a.swap(&mut b);

        assert_eq!(a.slice(), [&10, &11]);
        assert_eq!(a.capacity(), 8);
        assert_eq!(b.slice(), [&0, &1, &2, &3, &4]);
        assert_eq!(b.capacity(), 2);
        assert!(a.check_invariants());
        assert!(b.check_invariants());
    }

    #[test]
    fn test_equality_ignores_chunk_layout() {
        let a = UnrolledList::from_iter_with_capacity(0..10, 2).unwrap();
        let b = UnrolledList::from_iter_with_capacity(0..10, 7).unwrap();
        let c = UnrolledList::from_iter_with_capacity(0..9, 2).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_formats_as_sequence() {
        let list = UnrolledList::from_iter_with_capacity(1..4, 2).unwrap();
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    }
}
