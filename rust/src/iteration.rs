//! Iterator implementations for UnrolledList.
//!
//! This module contains all iterator types and their implementations for
//! the list: borrowed iteration in both directions, mutable iteration, and
//! consuming iteration. Borrowed iterators are thin wrappers around the
//! same cursor stepping the list exposes directly.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::policy::{AllocPolicy, Unbounded};
use crate::types::{Chunk, UnrolledList};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Borrowed iterator over the elements of an [`UnrolledList`].
///
/// Steps with the list's own cursor navigation, one chunk at a time from
/// either end.
pub struct Iter<'a, T, P = Unbounded> {
    list: &'a UnrolledList<T, P>,
    front: Cursor,
    back: Cursor,
    remaining: usize,
}

/// Mutable iterator over the elements of an [`UnrolledList`].
///
/// Walks the chunk chain through raw pointers so the `&mut` items it hands
/// out stay disjoint from its own stepping. The exclusive borrow taken by
/// [`UnrolledList::iter_mut`] keeps the chain frozen for the iterator's
/// whole lifetime.
pub struct IterMut<'a, T> {
    /// Base of the arena's chunk storage.
    chunks: *mut Chunk<T>,
    front: Cursor,
    back: Cursor,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: IterMut is a borrow of the list plus plain offsets; it moves
// between threads whenever the elements themselves may.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// Consuming iterator over the elements of an [`UnrolledList`].
pub struct IntoIter<T, P = Unbounded> {
    list: UnrolledList<T, P>,
}

// ============================================================================
// LIST ITERATOR METHODS
// ============================================================================

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    /// Returns an iterator over the elements from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list: UnrolledList<i32> = [1, 2, 3].into_iter().collect();
    /// let doubled: Vec<i32> = list.iter().map(|v| v * 2).collect();
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            list: self,
            front: self.cursor_front(),
            back: self.cursor_back(),
            remaining: self.len,
        }
    }

    /// Returns an iterator yielding mutable references from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32> = [1, 2, 3].into_iter().collect();
    /// for v in list.iter_mut() {
    ///     *v *= 10;
    /// }
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.cursor_front();
        let back = self.cursor_back();
        let remaining = self.len;
        IterMut {
            chunks: self.arena.storage_mut_ptr(),
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

// ============================================================================
// ITER IMPLEMENTATION
// ============================================================================

impl<'a, T, P: AllocPolicy> Iterator for Iter<'a, T, P> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.list.get(self.front);
        self.front = self.list.cursor_next(self.front);
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, P: AllocPolicy> DoubleEndedIterator for Iter<'a, T, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.list.get(self.back);
        // Only retreat while a predecessor exists; the counter ends the
        // iteration before the cursor would step past the front
        if self.remaining > 1 {
            self.back = self.list.cursor_prev(self.back);
        }
        self.remaining -= 1;
        item
    }
}

impl<T, P: AllocPolicy> ExactSizeIterator for Iter<'_, T, P> {}

impl<T, P: AllocPolicy> FusedIterator for Iter<'_, T, P> {}

impl<T, P> Clone for Iter<'_, T, P> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

// ============================================================================
// ITERMUT IMPLEMENTATION
// ============================================================================

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: the counter only admits cursors addressing live chunks,
        // their IDs index the arena storage, and every step yields a
        // distinct element. Only the Vec headers are referenced while
        // stepping, never the element buffers the items point into.
        unsafe {
            let chunk = self.chunks.add(self.front.node as usize);
            let elem = (*chunk).elems.as_mut_ptr().add(self.front.index);

            if self.front.index + 1 < (*chunk).elems.len() {
                self.front.index += 1;
            } else {
                self.front = Cursor {
                    node: (*chunk).next,
                    index: 0,
                };
            }
            self.remaining -= 1;
            Some(&mut *elem)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: same contract as `next`; the retreat only runs while a
        // predecessor chunk or slot exists.
        unsafe {
            let chunk = self.chunks.add(self.back.node as usize);
            let elem = (*chunk).elems.as_mut_ptr().add(self.back.index);

            if self.remaining > 1 {
                if self.back.index > 0 {
                    self.back.index -= 1;
                } else {
                    let prev = (*chunk).prev;
                    let prev_chunk = self.chunks.add(prev as usize);
                    self.back = Cursor {
                        node: prev,
                        index: (*prev_chunk).elems.len() - 1,
                    };
                }
            }
            self.remaining -= 1;
            Some(&mut *elem)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// ============================================================================
// INTOITER IMPLEMENTATION
// ============================================================================

impl<T, P: AllocPolicy> Iterator for IntoIter<T, P> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, P: AllocPolicy> DoubleEndedIterator for IntoIter<T, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T, P: AllocPolicy> ExactSizeIterator for IntoIter<T, P> {}

impl<T, P: AllocPolicy> FusedIterator for IntoIter<T, P> {}

// ============================================================================
// INTOITERATOR IMPLEMENTATIONS
// ============================================================================

impl<T, P: AllocPolicy> IntoIterator for UnrolledList<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> IntoIter<T, P> {
        IntoIter { list: self }
    }
}

impl<'a, T, P: AllocPolicy> IntoIterator for &'a UnrolledList<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

impl<'a, T, P: AllocPolicy> IntoIterator for &'a mut UnrolledList<T, P> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::UnrolledList;

    fn sample(capacity: usize, n: i32) -> UnrolledList<i32> {
        UnrolledList::from_iter_with_capacity(0..n, capacity).unwrap()
    }

    #[test]
    fn test_iter_forward_and_back() {
        let list = sample(3, 10);

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        assert_eq!(
            list.iter().rev().copied().collect::<Vec<_>>(),
            (0..10).rev().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let list = sample(3, 6);
        let mut iter = list.iter();

        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_mut_updates_across_chunks() {
        let mut list = sample(2, 9);
        for v in list.iter_mut() {
            *v += 100;
        }
        assert_eq!(
            list.iter().copied().collect::<Vec<_>>(),
            (100..109).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_iter_mut_reverse() {
        let mut list = sample(4, 6);
        let collected: Vec<i32> = list.iter_mut().rev().map(|v| *v).collect();
        assert_eq!(collected, (0..6).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_mut_meets_in_the_middle() {
        let mut list = sample(2, 5);
        let mut iter = list.iter_mut();

        *iter.next().unwrap() = -1;
        *iter.next_back().unwrap() = -2;
        assert_eq!(iter.len(), 3);
        drop(iter);

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [-1, 1, 2, 3, -2]);
    }

    #[test]
    fn test_into_iter_both_ends() {
        let list = sample(3, 5);
        let mut iter = list.into_iter();

        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_iterators_on_empty_list() {
        let mut list: UnrolledList<i32> = UnrolledList::new(4).unwrap();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
        assert_eq!(list.iter_mut().next(), None);
        assert_eq!(list.iter().len(), 0);
    }

    #[test]
    fn test_for_loop_sugar() {
        let mut list = sample(3, 4);

        let mut seen = Vec::new();
        for v in &list {
            seen.push(*v);
        }
        assert_eq!(seen, [0, 1, 2, 3]);

        for v in &mut list {
            *v = -*v;
        }

        let collected: Vec<i32> = list.into_iter().collect();
        assert_eq!(collected, [0, -1, -2, -3]);
    }
}
