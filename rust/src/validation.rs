//! Validation and debugging utilities for UnrolledList.
//!
//! This module contains all validation methods, invariant checking, and
//! debugging utilities for the chunk chain.

use crate::arena::NULL_NODE;
use crate::policy::AllocPolicy;
use crate::types::UnrolledList;

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<T, P: AllocPolicy> UnrolledList<T, P> {
    /// Check if the list maintains its structural invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        // First check the chunk chain structure
        self.check_chain_invariants()?;

        // Then check that iteration agrees with the recorded length
        self.check_iteration_invariants()?;

        Ok(())
    }

    /// Walk the chain from front to back and verify every link, chunk
    /// fill level, and the arena bookkeeping along the way.
    fn check_chain_invariants(&self) -> Result<(), String> {
        if self.front == NULL_NODE {
            if self.back != NULL_NODE {
                return Err(format!("front is null but back is chunk {}", self.back));
            }
            if self.len != 0 {
                return Err(format!("chain is empty but len is {}", self.len));
            }
            if self.arena.allocated_count() != 0 {
                return Err(format!(
                    "chain is empty but arena holds {} chunks",
                    self.arena.allocated_count()
                ));
            }
            return Ok(());
        }

        if self.back == NULL_NODE {
            return Err(format!("back is null but front is chunk {}", self.front));
        }

        let allocated = self.arena.allocated_count();
        let mut visited = 0;
        let mut total_elements = 0;
        let mut prev = NULL_NODE;
        let mut current = self.front;

        while current != NULL_NODE {
            let chunk = self
                .arena
                .get(current)
                .ok_or_else(|| format!("chain references chunk {} missing from the arena", current))?;

            if chunk.prev != prev {
                return Err(format!(
                    "chunk {} records prev {} but follows chunk {}",
                    current, chunk.prev, prev
                ));
            }
            if chunk.elems.is_empty() {
                return Err(format!("chunk {} is empty but still linked", current));
            }
            if chunk.elems.len() > chunk.capacity {
                return Err(format!(
                    "chunk {} holds {} elements but its capacity is {}",
                    current,
                    chunk.elems.len(),
                    chunk.capacity
                ));
            }
            if chunk.capacity != self.capacity {
                return Err(format!(
                    "chunk {} has capacity {} but the list uses {}",
                    current, chunk.capacity, self.capacity
                ));
            }

            visited += 1;
            total_elements += chunk.elems.len();
            if visited > allocated {
                return Err(format!(
                    "chain does not terminate (cycle through chunk {})",
                    current
                ));
            }

            prev = current;
            current = chunk.next;
        }

        if prev != self.back {
            return Err(format!(
                "chain ends at chunk {} but back is chunk {}",
                prev, self.back
            ));
        }
        if total_elements != self.len {
            return Err(format!(
                "chunks hold {} elements but len is {}",
                total_elements, self.len
            ));
        }
        if visited != allocated {
            return Err(format!(
                "{} chunks in the chain but {} allocated in the arena",
                visited, allocated
            ));
        }

        Ok(())
    }

    /// Check that the iterator visits exactly `len` elements.
    fn check_iteration_invariants(&self) -> Result<(), String> {
        let counted = self.iter().count();
        if counted != self.len {
            return Err(format!(
                "Iterator returned {} elements but list has {}",
                counted, self.len
            ));
        }
        Ok(())
    }

    // ============================================================================
    // DEBUGGING AND TESTING UTILITIES
    // ============================================================================

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> Result<(), String> {
        self.check_invariants_detailed()
    }

    /// Returns all elements as a vector of references (for testing/debugging).
    pub fn slice(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Returns the fill level of every chunk from front to back
    /// (for testing/debugging).
    pub fn chunk_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut current = self.front;
        while current != NULL_NODE {
            match self.arena.get(current) {
                Some(chunk) => {
                    sizes.push(chunk.elems.len());
                    current = chunk.next;
                }
                None => break,
            }
        }
        sizes
    }

    /// Prints the chunk chain for debugging.
    pub fn print_chunk_chain(&self) {
        println!(
            "Chunk chain: {} elements in {} chunks",
            self.len,
            self.chunk_count()
        );
        let mut current = self.front;
        while current != NULL_NODE {
            match self.arena.get(current) {
                Some(chunk) => {
                    println!(
                        "  Chunk[id={}, cap={}]: {} elements",
                        current,
                        chunk.capacity,
                        chunk.elems.len()
                    );
                    current = chunk.next;
                }
                None => {
                    println!("  Chunk[id={}]: <missing>", current);
                    break;
                }
            }
        }
    }
}
