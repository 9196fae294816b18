//! Error types for block storage.

use std::fmt;

/// Result type for block storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for block storage operations.
///
/// [`Error::OutOfRange`] signals either corrupted image dimensions or an
/// internal addressing defect. Callers are expected to propagate it and
/// abandon the image; there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid grid dimensions (zero, or over the configured limits)
    InvalidDimensions {
        /// Grid width in blocks
        width: u32,
        /// Grid height in blocks
        height: u32,
    },
    /// Requested block count does not fit in the grid
    BlockCountExceedsGrid {
        /// Requested number of blocks
        requested: u32,
        /// Grid capacity (width x height)
        capacity: u64,
    },
    /// `init` was called on an image that already owns storage
    AlreadyInitialized,
    /// Memory allocation failed
    AllocationFailed,
    /// Allocation would exceed the configured byte limit
    AllocationLimitExceeded {
        /// Bytes the allocation would need
        requested: usize,
        /// Configured maximum
        limit: usize,
    },
    /// Block address outside the backing storage
    OutOfRange {
        /// Offending index (linear offset or column)
        index: u64,
        /// Exclusive upper bound that was violated
        limit: u64,
    },
    /// Invalid color channel index
    InvalidComponentIndex(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions: {}x{} blocks", width, height)
            }
            Error::BlockCountExceedsGrid {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "Block count {} exceeds grid capacity {}",
                    requested, capacity
                )
            }
            Error::AlreadyInitialized => write!(f, "Block image already initialized"),
            Error::AllocationFailed => write!(f, "Memory allocation failed"),
            Error::AllocationLimitExceeded { requested, limit } => {
                write!(
                    f,
                    "Allocation of {} bytes exceeds limit of {} bytes",
                    requested, limit
                )
            }
            Error::OutOfRange { index, limit } => {
                write!(f, "Block index {} out of range (limit {})", index, limit)
            }
            Error::InvalidComponentIndex(idx) => {
                write!(f, "Invalid component index: {}", idx)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = [
            (
                Error::InvalidDimensions {
                    width: 0,
                    height: 100,
                },
                "Invalid grid dimensions: 0x100 blocks",
            ),
            (
                Error::BlockCountExceedsGrid {
                    requested: 9,
                    capacity: 8,
                },
                "Block count 9 exceeds grid capacity 8",
            ),
            (Error::AlreadyInitialized, "Block image already initialized"),
            (Error::AllocationFailed, "Memory allocation failed"),
            (
                Error::AllocationLimitExceeded {
                    requested: 2048,
                    limit: 1024,
                },
                "Allocation of 2048 bytes exceeds limit of 1024 bytes",
            ),
            (
                Error::OutOfRange { index: 8, limit: 8 },
                "Block index 8 out of range (limit 8)",
            ),
            (
                Error::InvalidComponentIndex(4),
                "Invalid component index: 4",
            ),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_error_is_error_trait() {
        let error: &dyn std::error::Error = &Error::AllocationFailed;
        let _ = error.to_string();
    }

    #[test]
    fn test_from_try_reserve_error() {
        let mut v: Vec<u64> = Vec::new();
        let reserve_err = v.try_reserve_exact(usize::MAX).unwrap_err();
        let error: Error = reserve_err.into();
        assert_eq!(error, Error::AllocationFailed);
    }

    #[test]
    fn test_error_clone_and_eq() {
        let error1 = Error::OutOfRange { index: 3, limit: 2 };
        let error2 = error1.clone();
        assert_eq!(error1, error2);
        assert_ne!(error1, Error::OutOfRange { index: 4, limit: 2 });
    }
}
