//! REMOVE operations for UnrolledList.
//!
//! This module contains all the shrinking operations: pops at both ends,
//! cursor-positioned removal, range removal, and clearing. A chunk that
//! runs out of elements is unlinked from the chain and returned to the
//! arena on the spot; the chain never carries empty chunks.
//!
//! Shrinking cannot fail. Storage released here is returned to the
//! allocation policy after it is genuinely gone.

use crate::arena::{NodeId, NULL_NODE};
use crate::cursor::Cursor;
use crate::policy::AllocPolicy;
use crate::types::UnrolledList;

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    // ============================================================================
    // CHUNK RELEASE
    // ============================================================================

    /// Unlink an empty chunk from the chain and return it to the arena.
    pub(crate) fn release_chunk(&mut self, id: NodeId) {
        let (prev, next) = {
            let chunk = self.chunk(id);
            debug_assert!(chunk.is_empty(), "only empty chunks are released");
            (chunk.prev, chunk.next)
        };

        if prev != NULL_NODE {
            self.chunk_mut(prev).next = next;
        } else {
            self.front = next;
        }
        if next != NULL_NODE {
            self.chunk_mut(next).prev = prev;
        } else {
            self.back = prev;
        }

        self.arena.deallocate(id);
        self.policy.release_node();
    }

    // ============================================================================
    // POP OPERATIONS
    // ============================================================================

    /// Remove and return the last element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(list.pop_back(), Some(3));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.back == NULL_NODE {
            return None;
        }

        // Non-empty lists never keep empty chunks, so the back chunk has
        // a last element
        let back_id = self.back;
        let value = self.chunk_mut(back_id).pop()?;
        self.len -= 1;
        self.policy.release_element();

        if self.chunk(back_id).is_empty() {
            self.release_chunk(back_id);
        }
        Some(value)
    }

    /// Remove and return the first element, or `None` if the list is empty.
    ///
    /// The remaining elements of the first chunk shift one slot left.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.front == NULL_NODE {
            return None;
        }

        let front_id = self.front;
        let value = self.chunk_mut(front_id).remove_at(0);
        self.len -= 1;
        self.policy.release_element();

        if self.chunk(front_id).is_empty() {
            self.release_chunk(front_id);
        }
        Some(value)
    }

    // ============================================================================
    // CURSOR-POSITIONED REMOVAL
    // ============================================================================

    /// Remove the element at `at`, returning it together with a cursor to
    /// the element that followed it (or the end cursor).
    ///
    /// The returned cursor is the only cursor guaranteed valid afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `at` is the end cursor or does not address a live element
    /// of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32> = [1, 2, 3].into_iter().collect();
    ///
    /// let second = list.cursor_next(list.cursor_front());
    /// let (removed, follows) = list.remove(second);
    /// assert_eq!(removed, 2);
    /// assert_eq!(list.get(follows), Some(&3));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove(&mut self, at: Cursor) -> (T, Cursor) {
        assert!(!at.is_end(), "cannot remove at the end cursor");

        let chunk = self.chunk(at.node);
        assert!(
            at.index < chunk.len(),
            "cursor offset out of range for its chunk"
        );
        let next_chunk = chunk.next;

        let value = self.chunk_mut(at.node).remove_at(at.index);
        self.len -= 1;
        self.policy.release_element();

        let follows = if self.chunk(at.node).is_empty() {
            self.release_chunk(at.node);
            if next_chunk != NULL_NODE {
                Cursor {
                    node: next_chunk,
                    index: 0,
                }
            } else {
                Cursor::END
            }
        } else if at.index < self.chunk(at.node).len() {
            // Same offset now holds the element that followed
            at
        } else if next_chunk != NULL_NODE {
            Cursor {
                node: next_chunk,
                index: 0,
            }
        } else {
            Cursor::END
        };

        (value, follows)
    }

    /// Remove every element in `[first, last)`, returning a fresh cursor
    /// for the position `last` addressed.
    ///
    /// # Panics
    ///
    /// Panics if the cursors do not address this list, or if `last` is not
    /// reachable from `first`.
    pub fn remove_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        // Counting up front also validates that the cursors are in order
        let count = self.cursor_distance(first, last);

        let mut at = first;
        for _ in 0..count {
            let (_, follows) = self.remove(at);
            at = follows;
        }
        at
    }

    // ============================================================================
    // CLEAR
    // ============================================================================

    /// Remove all elements, returning every reservation to the policy.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
        self.arena.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::Quota;
    use crate::UnrolledList;

    #[test]
    fn test_pop_back_releases_emptied_chunk() {
        let mut list = UnrolledList::new(2).unwrap();
        for v in 0..4 {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.chunk_count(), 2);

        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.chunk_count(), 1);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.chunk_count(), 0);
    }

    #[test]
    fn test_pop_front_shifts_and_releases() {
        let mut list = UnrolledList::new(3).unwrap();
        for v in 0..5 {
            list.push_back(v).unwrap();
        }

        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.chunk_count(), 1);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 4]);
    }

    #[test]
    fn test_remove_returns_following_cursor_within_chunk() {
        let mut list: UnrolledList<i32> = [10, 20, 30, 40].into_iter().collect();

        let second = list.cursor_next(list.cursor_front());
        let (value, follows) = list.remove(second);
        assert_eq!(value, 20);
        assert_eq!(list.get(follows), Some(&30));
    }

    #[test]
    fn test_remove_last_element_of_chunk_crosses_boundary() {
        let mut list = UnrolledList::new(2).unwrap();
        for v in [1, 2, 3, 4] {
            list.push_back(v).unwrap();
        }

        // Remove the second element; the cursor lands on the next chunk
        let second = list.cursor_next(list.cursor_front());
        let (value, follows) = list.remove(second);
        assert_eq!(value, 2);
        assert_eq!(list.get(follows), Some(&3));
    }

    #[test]
    fn test_remove_sole_element_of_chunk_releases_it() {
        let mut list = UnrolledList::new(2).unwrap();
        for v in [1, 2, 3] {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.chunk_count(), 2);

        // Third element lives alone in the second chunk
        let third = list.cursor_next(list.cursor_next(list.cursor_front()));
        let (value, follows) = list.remove(third);
        assert_eq!(value, 3);
        assert!(follows.is_end());
        assert_eq!(list.chunk_count(), 1);
        assert!(list.check_invariants());
    }

    #[test]
    fn test_remove_final_element_yields_end() {
        let mut list: UnrolledList<i32> = [7].into_iter().collect();

        let (value, follows) = list.remove(list.cursor_front());
        assert_eq!(value, 7);
        assert!(follows.is_end());
        assert!(list.is_empty());
    }

    #[test]
    #[should_panic(expected = "end cursor")]
    fn test_remove_at_end_cursor_panics() {
        let mut list: UnrolledList<i32> = [1].into_iter().collect();
        let end = list.cursor_end();
        let _ = list.remove(end);
    }

    #[test]
    fn test_remove_range() {
        let mut list: UnrolledList<i32> = (0..10).collect();

        let first = list.cursor_next(list.cursor_next(list.cursor_front()));
        let last = {
            let mut at = first;
            for _ in 0..5 {
                at = list.cursor_next(at);
            }
            at
        };

        let follows = list.remove_range(first, last);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 7, 8, 9]);
        assert_eq!(list.get(follows), Some(&7));
    }

    #[test]
    fn test_remove_empty_range_is_noop() {
        let mut list: UnrolledList<i32> = (0..4).collect();
        let at = list.cursor_front();

        let follows = list.remove_range(at, at);
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(follows), Some(&0));
    }

    #[test]
    fn test_clear_restores_policy_budget() {
        let mut list =
            UnrolledList::<i32, Quota>::with_policy(2, Quota::new(10, 5)).unwrap();
        for v in 0..6 {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.policy().elements_remaining(), 4);
        assert_eq!(list.policy().nodes_remaining(), 2);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.chunk_count(), 0);
        assert_eq!(list.policy().elements_remaining(), 10);
        assert_eq!(list.policy().nodes_remaining(), 5);
    }
}
