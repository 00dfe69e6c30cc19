//! INSERT operations for UnrolledList.
//!
//! This module contains all the growing operations: pushes at both ends,
//! cursor-positioned insertion with midpoint splitting, and the bulk
//! insert and extend operations with rollback on partial failure.
//!
//! Every path reserves storage through the allocation policy before the
//! chain is touched, so a refusal leaves the list exactly as it was.

use crate::arena::{NodeId, NULL_NODE};
use crate::cursor::Cursor;
use crate::error::{ListError, ModifyResult};
use crate::policy::AllocPolicy;
use crate::types::{Chunk, UnrolledList};

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    // ============================================================================
    // POLICY RESERVATION HELPERS
    // ============================================================================

    /// Reserve storage for one element.
    fn reserve_element(&mut self) -> ModifyResult<()> {
        self.policy
            .reserve_element()
            .map_err(|_| ListError::allocation_failed("element slot", "policy refused the request"))
    }

    /// Reserve storage for one element plus the chunk it will live in.
    ///
    /// Either both reservations are held on return or neither is.
    fn reserve_element_and_chunk(&mut self) -> ModifyResult<()> {
        self.reserve_element()?;
        if self.policy.reserve_node().is_err() {
            self.policy.release_element();
            return Err(ListError::allocation_failed(
                "chunk",
                "policy refused the request",
            ));
        }
        Ok(())
    }

    /// Allocate a new chunk in the arena and return its ID.
    pub(crate) fn allocate_chunk(&mut self, chunk: Chunk<T>) -> NodeId {
        self.arena.allocate(chunk)
    }

    // ============================================================================
    // PUSH OPERATIONS
    // ============================================================================

    /// Append an element at the back of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list = UnrolledList::new(10).unwrap();
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn push_back(&mut self, value: T) -> ModifyResult<()> {
        let needs_chunk = self.back == NULL_NODE || self.chunk(self.back).is_full();

        if needs_chunk {
            self.reserve_element_and_chunk()?;

            let mut chunk = Chunk::new(self.capacity);
            chunk.prev = self.back;
            chunk.push(value);
            let id = self.allocate_chunk(chunk);

            if self.back != NULL_NODE {
                self.chunk_mut(self.back).next = id;
            } else {
                self.front = id;
            }
            self.back = id;
        } else {
            self.reserve_element()?;
            self.chunk_mut(self.back).push(value);
        }

        self.len += 1;
        Ok(())
    }

    /// Prepend an element at the front of the list.
    ///
    /// The first chunk keeps its first element at offset zero, so a push
    /// into a chunk with spare room shifts that chunk's elements one slot
    /// right.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list = UnrolledList::new(10).unwrap();
    /// list.push_back(2).unwrap();
    /// list.push_front(1).unwrap();
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, value: T) -> ModifyResult<()> {
        let needs_chunk = self.front == NULL_NODE || self.chunk(self.front).is_full();

        if needs_chunk {
            self.reserve_element_and_chunk()?;

            let mut chunk = Chunk::new(self.capacity);
            chunk.next = self.front;
            chunk.push(value);
            let id = self.allocate_chunk(chunk);

            if self.front != NULL_NODE {
                self.chunk_mut(self.front).prev = id;
            } else {
                self.back = id;
            }
            self.front = id;
        } else {
            self.reserve_element()?;
            self.chunk_mut(self.front).insert_at(0, value);
        }

        self.len += 1;
        Ok(())
    }

    // ============================================================================
    // CURSOR-POSITIONED INSERTION
    // ============================================================================

    /// Insert an element before the position at `at`, returning a cursor
    /// to the inserted element.
    ///
    /// Inserting at the end cursor appends. When the target chunk is full
    /// it is split at the midpoint and the element goes into whichever
    /// half owns the position; the returned cursor is the only cursor
    /// guaranteed valid afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `at` is neither the end cursor nor a live element of
    /// this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32> = [1, 3].into_iter().collect();
    ///
    /// let pos = list.cursor_next(list.cursor_front());
    /// let inserted = list.insert(pos, 2).unwrap();
    /// assert_eq!(list.get(inserted), Some(&2));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn insert(&mut self, at: Cursor, value: T) -> ModifyResult<Cursor> {
        if at.is_end() {
            self.push_back(value)?;
            return Ok(self.cursor_back());
        }

        // Validate the cursor before reserving anything
        let chunk = self.chunk(at.node);
        assert!(
            at.index < chunk.len(),
            "cursor offset out of range for its chunk"
        );
        let is_full = chunk.is_full();

        if !is_full {
            self.reserve_element()?;
            self.chunk_mut(at.node).insert_at(at.index, value);
            self.len += 1;
            return Ok(at);
        }

        // Full chunk: reserve for the split first, then carve
        self.reserve_element_and_chunk()?;

        let mid = self.chunk(at.node).len() / 2;
        let mut right = self.chunk_mut(at.node).split_off_upper();
        right.prev = at.node;
        let old_next = right.next;
        let right_id = self.allocate_chunk(right);

        self.chunk_mut(at.node).next = right_id;
        if old_next != NULL_NODE {
            self.chunk_mut(old_next).prev = right_id;
        } else {
            self.back = right_id;
        }

        // Insert into whichever half now owns the logical position
        let target = if at.index < mid {
            at
        } else {
            Cursor {
                node: right_id,
                index: at.index - mid,
            }
        };
        self.chunk_mut(target.node).insert_at(target.index, value);
        self.len += 1;
        Ok(target)
    }

    // ============================================================================
    // BULK INSERTION WITH ROLLBACK
    // ============================================================================

    /// Insert `count` clones of `value` before the position at `at`,
    /// returning a cursor to the first inserted element.
    ///
    /// If the policy refuses partway through, every element inserted so
    /// far is removed again and the original sequence is restored before
    /// the error is returned.
    ///
    /// # Panics
    ///
    /// Panics if `at` is neither the end cursor nor a live element of
    /// this list.
    pub fn insert_many(&mut self, at: Cursor, count: usize, value: T) -> ModifyResult<Cursor>
    where
        T: Clone,
    {
        if count == 0 {
            return Ok(at);
        }

        let mut scope = RollbackScope::begin(self, at);
        for _ in 0..count {
            scope.insert_one(value.clone())?;
        }
        Ok(scope.commit())
    }

    /// Append every element of `iter` at the back of the list.
    ///
    /// If the policy refuses partway through, the elements appended so far
    /// are removed again and the error is returned. Lists with the
    /// [`Unbounded`](crate::Unbounded) policy can use [`Extend`] instead.
    pub fn try_extend<I>(&mut self, iter: I) -> ModifyResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut scope = RollbackScope::begin(self, Cursor::END);
        for value in iter {
            scope.insert_one(value)?;
        }
        scope.commit();
        Ok(())
    }
}

/// Guard that undoes a partially applied run of insertions when dropped
/// without [`commit`](RollbackScope::commit).
///
/// The guard keeps its anchor cursor fresh across splits by re-deriving it
/// from each insertion's returned cursor, so rollback never touches a stale
/// position.
struct RollbackScope<'a, T, P: AllocPolicy> {
    list: &'a mut UnrolledList<T, P>,
    /// Position the next element is inserted before. This is the position
    /// just past the run inserted so far.
    anchor: Cursor,
    inserted: usize,
    committed: bool,
}

impl<'a, T, P: AllocPolicy> RollbackScope<'a, T, P> {
    fn begin(list: &'a mut UnrolledList<T, P>, at: Cursor) -> Self {
        Self {
            list,
            anchor: at,
            inserted: 0,
            committed: false,
        }
    }

    /// Insert one element at the end of the run built so far.
    fn insert_one(&mut self, value: T) -> ModifyResult<()> {
        let inserted_at = self.list.insert(self.anchor, value)?;
        self.anchor = self.list.cursor_next(inserted_at);
        self.inserted += 1;
        Ok(())
    }

    /// Keep the insertions and return a cursor to the first element of
    /// the run.
    fn commit(mut self) -> Cursor {
        self.committed = true;
        let mut at = self.anchor;
        for _ in 0..self.inserted {
            at = self.list.cursor_prev(at);
        }
        at
    }
}

impl<T, P: AllocPolicy> Drop for RollbackScope<'_, T, P> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Peel the run off back to front; remove returns the cursor of
        // the element after the removed one, which is the fresh anchor.
        for _ in 0..self.inserted {
            let last = self.list.cursor_prev(self.anchor);
            let (_, follows) = self.list.remove(last);
            self.anchor = follows;
        }
    }
}

// ============================================================================
// EXTEND IMPLEMENTATION
// ============================================================================

impl<T> Extend<T> for UnrolledList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.try_extend(iter).expect("Unbounded policy never refuses");
    }
}
