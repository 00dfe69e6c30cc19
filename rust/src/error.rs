//! Error handling and result types for UnrolledList operations.
//!
//! This module provides error handling for all list operations, including
//! specialized error types and result type aliases for better ergonomics.
//! Only two things fail at runtime: construction can reject a chunk capacity,
//! and the allocation policy can refuse storage. Cursor misuse is a
//! precondition violation and panics rather than surfacing here.

/// Error type for unrolled list operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// Invalid chunk capacity specified.
    InvalidCapacity(String),
    /// The allocation policy refused storage.
    AllocationFailed(String),
}

impl ListError {
    /// Create an InvalidCapacity error with context
    pub fn invalid_capacity(capacity: usize, min_required: usize) -> Self {
        Self::InvalidCapacity(format!(
            "Capacity {} is invalid (minimum required: {})",
            capacity, min_required
        ))
    }

    /// Create an AllocationFailed error with context
    pub fn allocation_failed(resource: &str, reason: &str) -> Self {
        Self::AllocationFailed(format!("Failed to allocate {}: {}", resource, reason))
    }

    /// Check if this error is a capacity error
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::InvalidCapacity(_))
    }

    /// Check if this error is an allocation failure
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed(_))
    }
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::InvalidCapacity(msg) => write!(f, "Invalid capacity: {}", msg),
            ListError::AllocationFailed(msg) => write!(f, "Allocation failed: {}", msg),
        }
    }
}

impl std::error::Error for ListError {}

/// Public result type for list operations that may fail
pub type ListResult<T> = Result<T, ListError>;

/// Result type for list modification operations
pub type ModifyResult<T> = Result<T, ListError>;

/// Result type for list construction and validation
pub type InitResult<T> = Result<T, ListError>;

/// Result extension trait for improved error handling
pub trait ListResultExt<T> {
    /// Convert to a ListResult with additional context
    fn with_context(self, context: &str) -> ListResult<T>;

    /// Convert to a ListResult with operation context
    fn with_operation(self, operation: &str) -> ListResult<T>;
}

impl<T> ListResultExt<T> for Result<T, ListError> {
    fn with_context(self, context: &str) -> ListResult<T> {
        self.map_err(|e| match e {
            ListError::InvalidCapacity(msg) => {
                ListError::InvalidCapacity(format!("{}: {}", context, msg))
            }
            ListError::AllocationFailed(msg) => {
                ListError::AllocationFailed(format!("{}: {}", context, msg))
            }
        })
    }

    fn with_operation(self, operation: &str) -> ListResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}
