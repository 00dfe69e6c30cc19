//! Construction and initialization logic for UnrolledList.
//!
//! This module contains all the construction, initialization, and copying
//! logic for the list: capacity validation, fill and range construction,
//! policy-carrying variants, and the fallible clone and assign operations
//! that budgeted policies need.

use crate::arena::{SlotArena, NULL_NODE};
use crate::error::{InitResult, ListError, ListResultExt, ModifyResult};
use crate::policy::{AllocPolicy, Unbounded};
use crate::types::{Chunk, UnrolledList, MIN_CHUNK_CAPACITY};

/// Default number of elements per chunk
pub const DEFAULT_CHUNK_CAPACITY: usize = 10;

impl<T> UnrolledList<T> {
    /// Create an empty list with the specified chunk capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of elements per chunk (minimum 2)
    ///
    /// # Returns
    ///
    /// Returns `Ok(UnrolledList)` if capacity is valid, `Err(ListError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list = UnrolledList::<i32>::new(10).unwrap();
    /// assert!(list.is_empty());
    /// ```
    pub fn new(capacity: usize) -> InitResult<Self> {
        Self::with_policy(capacity, Unbounded)
    }

    /// Create an empty list with the default chunk capacity.
    ///
    /// This is equivalent to calling `new(DEFAULT_CHUNK_CAPACITY)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list = UnrolledList::<i32>::with_default_capacity().unwrap();
    /// assert_eq!(list.capacity(), 10);
    /// ```
    pub fn with_default_capacity() -> InitResult<Self> {
        Self::new(DEFAULT_CHUNK_CAPACITY)
    }

    /// Create a list holding `count` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list = UnrolledList::from_fill(5, 7, 10).unwrap();
    /// assert_eq!(list.len(), 5);
    /// assert!(list.iter().all(|&v| v == 7));
    /// ```
    pub fn from_fill(count: usize, value: T, capacity: usize) -> InitResult<Self>
    where
        T: Clone,
    {
        Self::from_fill_with_policy(count, value, capacity, Unbounded)
    }

    /// Create a list from an iterator with the specified chunk capacity.
    ///
    /// `collect()` is the shorthand for this with the default capacity.
    pub fn from_iter_with_capacity<I>(iter: I, capacity: usize) -> InitResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_iter_with_policy(iter, capacity, Unbounded)
    }
}

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    /// Create an empty list with the specified chunk capacity and
    /// allocation policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::{Quota, UnrolledList};
    ///
    /// // Room for 8 elements across at most 2 chunks
    /// let list = UnrolledList::<i32, _>::with_policy(4, Quota::new(8, 2)).unwrap();
    /// assert!(list.is_empty());
    /// ```
    pub fn with_policy(capacity: usize, policy: P) -> InitResult<Self> {
        if capacity < MIN_CHUNK_CAPACITY {
            return Err(ListError::invalid_capacity(capacity, MIN_CHUNK_CAPACITY));
        }

        Ok(Self {
            capacity,
            front: NULL_NODE,
            back: NULL_NODE,
            len: 0,
            arena: SlotArena::new(),
            policy,
        })
    }

    /// Create a list holding `count` clones of `value` under the given
    /// policy.
    ///
    /// If the policy refuses partway through, the partially built list is
    /// torn down and the error is returned; nothing observable remains.
    pub fn from_fill_with_policy(
        count: usize,
        value: T,
        capacity: usize,
        policy: P,
    ) -> InitResult<Self>
    where
        T: Clone,
    {
        let mut list = Self::with_policy(capacity, policy)?;
        for _ in 0..count {
            list.push_back(value.clone()).with_context("from_fill")?;
        }
        Ok(list)
    }

    /// Create a list from an iterator under the given policy.
    ///
    /// If the policy refuses partway through, the partially built list is
    /// torn down and the error is returned; nothing observable remains.
    pub fn from_iter_with_policy<I>(iter: I, capacity: usize, policy: P) -> InitResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::with_policy(capacity, policy)?;
        for value in iter {
            list.push_back(value).with_context("from_iter")?;
        }
        Ok(list)
    }

    /// Copy this list element by element under its own policy.
    ///
    /// The copy draws fresh reservations from a clone of the current
    /// policy, so a budgeted policy can refuse; in that case nothing is
    /// built. Use plain [`Clone`] when the policy is [`Unbounded`].
    pub fn try_clone(&self) -> InitResult<Self>
    where
        T: Clone,
    {
        self.try_clone_with_policy(self.policy.clone())
    }

    /// Copy this list element by element under a different policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::{Quota, UnrolledList};
    ///
    /// let source: UnrolledList<i32> = (0..6).collect();
    ///
    /// // A budget of 4 elements cannot hold a 6-element copy
    /// let denied = source.try_clone_with_policy(Quota::new(4, 8));
    /// assert!(denied.is_err());
    ///
    /// let copied = source.try_clone_with_policy(Quota::new(16, 8)).unwrap();
    /// assert!(copied.iter().eq(source.iter()));
    /// ```
    pub fn try_clone_with_policy<Q: AllocPolicy>(&self, policy: Q) -> InitResult<UnrolledList<T, Q>>
    where
        T: Clone,
    {
        let mut fresh = UnrolledList::with_policy(self.capacity, policy)?;
        for value in self.iter() {
            fresh.push_back(value.clone()).with_operation("clone")?;
        }
        Ok(fresh)
    }

    /// Replace this list's contents with a copy of `other`.
    ///
    /// The replacement is built completely before anything is torn down:
    /// on error the list is untouched, and on success it adopts `other`'s
    /// chunk capacity. The copy draws its reservations from a clone of the
    /// current policy while the old contents still hold theirs, so the
    /// budget must cover both lists at once; the displaced reservations
    /// are returned once the copy is in place.
    pub fn try_assign(&mut self, other: &Self) -> ModifyResult<()>
    where
        T: Clone,
    {
        let mut fresh = other
            .try_clone_with_policy(self.policy.clone())
            .with_operation("assign")?;
        // The surviving policy clone still carries the reservations of the
        // contents being displaced; return them before the overwrite.
        for _ in 0..self.len {
            fresh.policy.release_element();
        }
        for _ in 0..self.chunk_count() {
            fresh.policy.release_node();
        }
        *self = fresh;
        Ok(())
    }
}

// ============================================================================
// DEFAULT AND CONVERSION IMPLEMENTATIONS
// ============================================================================

impl<T> Default for UnrolledList<T> {
    /// Create an empty list with the default chunk capacity.
    fn default() -> Self {
        Self::with_default_capacity().unwrap()
    }
}

impl<T> Default for Chunk<T> {
    /// Empty placeholder left behind in freed arena slots.
    fn default() -> Self {
        Self {
            capacity: 0,
            elems: Vec::new(),
            prev: NULL_NODE,
            next: NULL_NODE,
        }
    }
}

impl<T: Clone> Clone for UnrolledList<T> {
    fn clone(&self) -> Self {
        self.try_clone().expect("Unbounded policy never refuses")
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_assign(source)
            .expect("Unbounded policy never refuses");
    }
}

impl<T> FromIterator<T> for UnrolledList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::with_default_capacity().unwrap();
        for value in iter {
            list.push_back(value)
                .expect("Unbounded policy never refuses");
        }
        list
    }
}

impl<T, const N: usize> From<[T; N]> for UnrolledList<T> {
    /// Build a list from an array with the default chunk capacity.
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Quota;

    #[test]
    fn test_list_construction() {
        let list = UnrolledList::<i32>::new(10).unwrap();
        assert_eq!(list.capacity, 10);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_list_invalid_capacity() {
        let result = UnrolledList::<i32>::new(1); // Below MIN_CHUNK_CAPACITY (2)
        assert!(result.is_err());
        assert!(result.unwrap_err().is_capacity_error());

        assert!(UnrolledList::<i32>::new(0).is_err());
        assert!(UnrolledList::<i32>::new(2).is_ok());
    }

    #[test]
    fn test_list_default() {
        let list = UnrolledList::<i32>::default();
        assert_eq!(list.capacity, DEFAULT_CHUNK_CAPACITY);
    }

    #[test]
    fn test_from_fill() {
        let list = UnrolledList::from_fill(25, 9, 10).unwrap();
        assert_eq!(list.len(), 25);
        assert!(list.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_from_fill_refused_leaves_nothing() {
        let result = UnrolledList::from_fill_with_policy(10, 1, 4, Quota::new(5, 8));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_allocation_failure());
    }

    #[test]
    fn test_from_iter_with_capacity() {
        let list = UnrolledList::from_iter_with_capacity(0..12, 3).unwrap();
        assert_eq!(list.len(), 12);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_clone_matches_source() {
        let source: UnrolledList<i32> = (0..30).collect();
        let copy = source.clone();
        assert_eq!(copy, source);
        assert_eq!(copy.capacity(), source.capacity());
    }

    #[test]
    fn test_clone_is_independent_of_source() {
        let mut source: UnrolledList<i32> = (0..12).collect();
        let mut copy = source.clone();

        copy.push_back(99).unwrap();
        *copy.front_mut().unwrap() = -1;
        source.pop_front();

        assert_eq!(
            source.iter().copied().collect::<Vec<_>>(),
            (1..12).collect::<Vec<_>>()
        );
        let mut expected: Vec<i32> = (0..12).collect();
        expected[0] = -1;
        expected.push(99);
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_from_iter_with_policy_refused_leaves_nothing() {
        let result =
            UnrolledList::from_iter_with_policy(0..20, 4, Quota::new(7, 8));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_allocation_failure());
    }

    #[test]
    fn test_try_assign_adopts_source_capacity() {
        let mut target = UnrolledList::from_iter_with_capacity(0..5, 4).unwrap();
        let source = UnrolledList::from_iter_with_capacity(100..110, 7).unwrap();

        target.try_assign(&source).unwrap();
        assert_eq!(target, source);
        assert_eq!(target.capacity(), 7);
    }

    #[test]
    fn test_try_assign_refused_leaves_target_untouched() {
        let mut target =
            UnrolledList::from_fill_with_policy(3, 1, 4, Quota::new(6, 4)).unwrap();
        let source: UnrolledList<i32, Quota> =
            UnrolledList::from_fill_with_policy(50, 2, 4, Quota::new(100, 30)).unwrap();

        let result = target.try_assign(&source);
        assert!(result.is_err());
        assert_eq!(target.len(), 3);
        assert!(target.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_try_assign_returns_displaced_reservations() {
        let mut target = UnrolledList::with_policy(4, Quota::new(10, 10)).unwrap();
        for v in 0..4 {
            target.push_back(v).unwrap();
        }
        assert_eq!(target.policy().elements_remaining(), 6);
        assert_eq!(target.policy().nodes_remaining(), 9);

        let source =
            UnrolledList::from_iter_with_policy(7..9, 4, Quota::new(4, 4)).unwrap();
        target.try_assign(&source).unwrap();

        // Two elements and one chunk are live; everything else is back
        assert_eq!(target.iter().copied().collect::<Vec<_>>(), [7, 8]);
        assert_eq!(target.policy().elements_remaining(), 8);
        assert_eq!(target.policy().nodes_remaining(), 9);

        target.clear();
        assert_eq!(target.policy().elements_remaining(), 10);
        assert_eq!(target.policy().nodes_remaining(), 10);
    }

    #[test]
    fn test_from_array() {
        let list = UnrolledList::from([1, 2, 3, 4]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    }
}
