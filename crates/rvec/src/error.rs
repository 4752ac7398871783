//! Errors from checked element access.

use std::fmt;

/// Errors from [`ReactiveVec`](crate::ReactiveVec) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VecError {
    /// A bounds-checked access named an index at or beyond the length.
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for VecError {}
