//! Core types and data structures for UnrolledList.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the unrolled list implementation.

use crate::arena::SlotArena;
use crate::policy::Unbounded;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

pub use crate::arena::{NodeId, NULL_NODE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum capacity for any chunk. A midpoint split of a full chunk must
/// leave both halves occupied, which rules out capacity 1.
pub(crate) const MIN_CHUNK_CAPACITY: usize = 2;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Unrolled linked list: a doubly linked chain of fixed-capacity chunks.
///
/// Each chunk stores up to `capacity` elements contiguously, so traversal
/// touches far fewer pointers than a node-per-element list while edits in
/// the middle only shift elements within one chunk. Chunks live in a slot
/// arena and refer to each other by index, so positions are plain
/// `(chunk, offset)` pairs ([`Cursor`]) instead of borrowed references.
///
/// Every growing operation consults an [`AllocPolicy`] before mutating
/// anything. If the policy refuses, the operation returns an error and the
/// list is untouched; partially applied bulk operations roll themselves
/// back. Lists built with [`UnrolledList::new`] use the [`Unbounded`]
/// policy, which never refuses.
///
/// # Type Parameters
///
/// * `T` - Element type
/// * `P` - Allocation policy (defaults to [`Unbounded`])
///
/// # Examples
///
/// ```
/// use unrolled_list::UnrolledList;
///
/// let mut list = UnrolledList::new(10).unwrap();
/// list.push_back(1).unwrap();
/// list.push_back(2).unwrap();
/// list.push_front(0).unwrap();
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
///
/// // Cursor-based editing: insert before the second element
/// let second = list.cursor_next(list.cursor_front());
/// list.insert(second, 99).unwrap();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 99, 1, 2]);
/// ```
///
/// # Performance Characteristics
///
/// - **Push/pop at the back**: O(1) amortized
/// - **Push/pop at the front**: O(capacity), shifts within the first chunk
/// - **Insert/remove at a cursor**: O(capacity)
/// - **Cursor step**: O(1)
/// - **Iteration**: O(n)
///
/// # Capacity Guidelines
///
/// - Minimum capacity: 2 (enforced)
/// - Default capacity: 10
/// - Higher capacity = fewer links and better locality but more shifting per edit
/// - Lower capacity = cheaper edits but more pointer chasing
///
/// [`Cursor`]: crate::Cursor
/// [`AllocPolicy`]: crate::AllocPolicy
pub struct UnrolledList<T, P = Unbounded> {
    /// Maximum number of elements per chunk.
    pub(crate) capacity: usize,
    /// First chunk in the chain, or NULL_NODE when empty.
    pub(crate) front: NodeId,
    /// Last chunk in the chain, or NULL_NODE when empty.
    pub(crate) back: NodeId,
    /// Total number of elements across all chunks.
    pub(crate) len: usize,
    /// Slot arena storage for chunks.
    pub(crate) arena: SlotArena<Chunk<T>>,
    /// Allocation policy consulted before every grow and after every shrink.
    pub(crate) policy: P,
}

/// Fixed-capacity chunk holding a contiguous run of elements.
#[derive(Debug, Clone)]
pub(crate) struct Chunk<T> {
    /// Maximum number of elements this chunk can hold.
    pub(crate) capacity: usize,
    /// Elements in list order, reserved to `capacity` up front.
    pub(crate) elems: Vec<T>,
    /// Previous chunk in the chain.
    pub(crate) prev: NodeId,
    /// Next chunk in the chain.
    pub(crate) next: NodeId,
}
