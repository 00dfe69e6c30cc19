//! Allocation policies for UnrolledList storage.
//!
//! Every operation that grows the list reserves storage through its policy
//! before touching the chain, and every operation that shrinks it releases
//! the reservation afterwards. A policy that refuses a reservation aborts
//! the operation before any element moves, which is what gives the mutating
//! operations their all-or-nothing behavior.

/// Refusal returned by an allocation policy.
///
/// Carries no payload; the list wraps it into a [`ListError`] with the
/// operation context at the call site.
///
/// [`ListError`]: crate::error::ListError
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "allocation request refused by policy")
    }
}

impl std::error::Error for AllocError {}

/// Storage accounting hooks consulted by every growing or shrinking operation.
///
/// `reserve_*` is called before the list mutates anything; `release_*` is
/// called after storage is genuinely gone. The paired calls must balance:
/// the list guarantees one release per successful reserve.
pub trait AllocPolicy: Clone {
    /// Reserve room for one element.
    fn reserve_element(&mut self) -> Result<(), AllocError>;

    /// Reserve room for one chunk.
    fn reserve_node(&mut self) -> Result<(), AllocError>;

    /// Return one element reservation.
    fn release_element(&mut self) {}

    /// Return one chunk reservation.
    fn release_node(&mut self) {}
}

/// Policy that never refuses. This is the default for lists built with
/// [`UnrolledList::new`] and the container trait impls.
///
/// [`UnrolledList::new`]: crate::UnrolledList::new
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbounded;

impl AllocPolicy for Unbounded {
    #[inline]
    fn reserve_element(&mut self) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline]
    fn reserve_node(&mut self) -> Result<(), AllocError> {
        Ok(())
    }
}

/// Policy with fixed element and chunk budgets.
///
/// Reservations draw the budgets down and refusals start once a budget hits
/// zero; releases restore it. Useful for capping memory in embedded-style
/// deployments and for driving failure-injection tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    element_budget: usize,
    node_budget: usize,
}

impl Quota {
    /// Create a policy allowing at most `element_budget` live elements and
    /// `node_budget` live chunks.
    pub fn new(element_budget: usize, node_budget: usize) -> Self {
        Self {
            element_budget,
            node_budget,
        }
    }

    /// Remaining element budget.
    pub fn elements_remaining(&self) -> usize {
        self.element_budget
    }

    /// Remaining chunk budget.
    pub fn nodes_remaining(&self) -> usize {
        self.node_budget
    }
}

impl AllocPolicy for Quota {
    fn reserve_element(&mut self) -> Result<(), AllocError> {
        if self.element_budget == 0 {
            return Err(AllocError);
        }
        self.element_budget -= 1;
        Ok(())
    }

    fn reserve_node(&mut self) -> Result<(), AllocError> {
        if self.node_budget == 0 {
            return Err(AllocError);
        }
        self.node_budget -= 1;
        Ok(())
    }

    fn release_element(&mut self) {
        self.element_budget += 1;
    }

    fn release_node(&mut self) {
        self.node_budget += 1;
    }
}
