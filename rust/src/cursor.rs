//! Cursor type and position-based access for UnrolledList.
//!
//! A cursor names a position in the list as a `(chunk, offset)` pair. It is
//! a plain value with no borrow of the list, so it can be stored, copied,
//! and handed back to the list later. Every navigation step is resolved by
//! the list itself; iterators are thin wrappers over the same stepping
//! logic.

use crate::arena::{NodeId, NULL_NODE};
use crate::policy::AllocPolicy;
use crate::types::{Chunk, UnrolledList};

/// Position of one element in an [`UnrolledList`], or the end position.
///
/// Cursors stay valid only as long as the element they address stays where
/// it is. Any mutation of the list may shift elements within a chunk, split
/// a chunk, or release one; after a mutation, keep using only the cursors
/// that operation returned. Navigating or mutating through a cursor whose
/// chunk is gone panics; [`UnrolledList::get`] returns `None` instead.
///
/// The end position is a cursor one past the last element. It compares
/// equal no matter how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Chunk addressed by this cursor, or NULL_NODE for the end position.
    pub(crate) node: NodeId,
    /// Offset of the element within the chunk.
    pub(crate) index: usize,
}

impl Cursor {
    pub(crate) const END: Cursor = Cursor {
        node: NULL_NODE,
        index: 0,
    };

    /// Returns true if this cursor is the end position.
    pub fn is_end(&self) -> bool {
        self.node == NULL_NODE
    }
}

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    // ============================================================================
    // INTERNAL CHUNK ACCESS
    // ============================================================================

    /// Resolve a chunk ID that an operation requires to be live.
    ///
    /// This is the single panic point for stale cursors handed to
    /// navigation and mutation methods.
    pub(crate) fn chunk(&self, id: NodeId) -> &Chunk<T> {
        match self.arena.get(id) {
            Some(chunk) => chunk,
            None => panic!("cursor does not address a live chunk"),
        }
    }

    /// Mutable variant of [`chunk`](Self::chunk).
    pub(crate) fn chunk_mut(&mut self, id: NodeId) -> &mut Chunk<T> {
        match self.arena.get_mut(id) {
            Some(chunk) => chunk,
            None => panic!("cursor does not address a live chunk"),
        }
    }

    // ============================================================================
    // CURSOR NAVIGATION
    // ============================================================================

    /// Returns a cursor at the first element, or the end cursor if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list = UnrolledList::new(4).unwrap();
    /// list.push_back("a").unwrap();
    ///
    /// let front = list.cursor_front();
    /// assert_eq!(list.get(front), Some(&"a"));
    /// ```
    pub fn cursor_front(&self) -> Cursor {
        if self.front == NULL_NODE {
            Cursor::END
        } else {
            Cursor {
                node: self.front,
                index: 0,
            }
        }
    }

    /// Returns a cursor at the last element, or the end cursor if the
    /// list is empty.
    pub fn cursor_back(&self) -> Cursor {
        if self.back == NULL_NODE {
            Cursor::END
        } else {
            // Non-empty lists never keep empty chunks, so back has a last slot
            Cursor {
                node: self.back,
                index: self.chunk(self.back).len() - 1,
            }
        }
    }

    /// Returns the end cursor, one past the last element.
    pub fn cursor_end(&self) -> Cursor {
        Cursor::END
    }

    /// Advance a cursor one element toward the back.
    ///
    /// Advancing the end cursor yields the end cursor again.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not address a live element of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list: UnrolledList<i32> = [10, 20].into_iter().collect();
    ///
    /// let mut at = list.cursor_front();
    /// at = list.cursor_next(at);
    /// assert_eq!(list.get(at), Some(&20));
    /// at = list.cursor_next(at);
    /// assert!(at.is_end());
    /// ```
    pub fn cursor_next(&self, at: Cursor) -> Cursor {
        if at.is_end() {
            return at;
        }

        let chunk = self.chunk(at.node);
        assert!(
            at.index < chunk.len(),
            "cursor offset out of range for its chunk"
        );

        if at.index + 1 < chunk.len() {
            Cursor {
                node: at.node,
                index: at.index + 1,
            }
        } else if chunk.next != NULL_NODE {
            Cursor {
                node: chunk.next,
                index: 0,
            }
        } else {
            Cursor::END
        }
    }

    /// Move a cursor one element toward the front.
    ///
    /// Retreating from the end cursor yields the last element, which makes
    /// a backward sweep from `cursor_end` symmetric with a forward sweep
    /// from `cursor_front`. On an empty list the end cursor stays put.
    ///
    /// # Panics
    ///
    /// Panics if `at` is already at the first element, or if it does not
    /// address a live element of this list.
    pub fn cursor_prev(&self, at: Cursor) -> Cursor {
        if at.is_end() {
            return self.cursor_back();
        }

        let chunk = self.chunk(at.node);
        assert!(
            at.index < chunk.len(),
            "cursor offset out of range for its chunk"
        );

        if at.index > 0 {
            Cursor {
                node: at.node,
                index: at.index - 1,
            }
        } else if chunk.prev != NULL_NODE {
            let prev_id = chunk.prev;
            let prev = self.chunk(prev_id);
            Cursor {
                node: prev_id,
                index: prev.len() - 1,
            }
        } else {
            panic!("cursor retreated past the front of the list");
        }
    }

    /// Count the elements in `[from, to)` by stepping forward.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not reachable from `from`, which includes handing
    /// the cursors in the wrong order.
    pub fn cursor_distance(&self, from: Cursor, to: Cursor) -> usize {
        let mut at = from;
        let mut count = 0;
        while at != to {
            if at.is_end() {
                panic!("cursor range end not reachable from its start");
            }
            at = self.cursor_next(at);
            count += 1;
        }
        count
    }

    // ============================================================================
    // ELEMENT ACCESS
    // ============================================================================

    /// Get a reference to the element at a cursor.
    ///
    /// Returns `None` for the end cursor and for cursors whose element is
    /// gone, so this is also the non-panicking way to probe whether a
    /// stored cursor is still usable.
    pub fn get(&self, at: Cursor) -> Option<&T> {
        self.arena.get(at.node).and_then(|chunk| chunk.get(at.index))
    }

    /// Get a mutable reference to the element at a cursor.
    pub fn get_mut(&mut self, at: Cursor) -> Option<&mut T> {
        self.arena
            .get_mut(at.node)
            .and_then(|chunk| chunk.get_mut(at.index))
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Option<&T> {
        self.get(self.cursor_front())
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let at = self.cursor_front();
        self.get_mut(at)
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Option<&T> {
        self.get(self.cursor_back())
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let at = self.cursor_back();
        self.get_mut(at)
    }
}

#[cfg(test)]
mod tests {
    use crate::UnrolledList;

    #[test]
    fn test_cursor_walk_crosses_chunk_boundaries() {
        let mut list = UnrolledList::new(3).unwrap();
        for v in 0..10 {
            list.push_back(v).unwrap();
        }

        let mut at = list.cursor_front();
        for expected in 0..10 {
            assert_eq!(list.get(at), Some(&expected));
            at = list.cursor_next(at);
        }
        assert!(at.is_end());
        assert_eq!(list.cursor_next(at), list.cursor_end());
    }

    #[test]
    fn test_cursor_prev_from_end_reaches_back() {
        let mut list = UnrolledList::new(3).unwrap();
        for v in 0..7 {
            list.push_back(v).unwrap();
        }

        let mut at = list.cursor_end();
        for expected in (0..7).rev() {
            at = list.cursor_prev(at);
            assert_eq!(list.get(at), Some(&expected));
        }
    }

    #[test]
    #[should_panic(expected = "retreated past the front")]
    fn test_cursor_prev_past_front_panics() {
        let mut list = UnrolledList::new(4).unwrap();
        list.push_back(1).unwrap();

        let front = list.cursor_front();
        let _ = list.cursor_prev(front);
    }

    #[test]
    fn test_cursor_on_empty_list() {
        let list: UnrolledList<i32> = UnrolledList::new(4).unwrap();
        assert!(list.cursor_front().is_end());
        assert!(list.cursor_back().is_end());
        assert_eq!(list.cursor_prev(list.cursor_end()), list.cursor_end());
        assert_eq!(list.get(list.cursor_end()), None);
    }

    #[test]
    fn test_cursor_distance() {
        let mut list = UnrolledList::new(3).unwrap();
        for v in 0..8 {
            list.push_back(v).unwrap();
        }

        let front = list.cursor_front();
        let end = list.cursor_end();
        assert_eq!(list.cursor_distance(front, end), 8);
        assert_eq!(list.cursor_distance(front, front), 0);

        let third = list.cursor_next(list.cursor_next(front));
        assert_eq!(list.cursor_distance(third, end), 6);
    }
}
