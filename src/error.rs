//! Common error types for driver operations

use core::fmt;

/// Failures a UART operation can report.
///
/// Every variant is recoverable by the caller: the driver never panics,
/// never retries internally and never leaves the device half-written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartError {
    /// No valid register window to operate on.
    NullHandle,
    /// Operation attempted before a successful initialize.
    NotInitialized,
    /// The status bit stayed clear for the whole poll budget.
    Timeout,
}

impl fmt::Display for UartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullHandle => write!(f, "invalid register window"),
            Self::NotInitialized => write!(f, "device not initialized"),
            Self::Timeout => write!(f, "device never became ready"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UartError {}

/// Result type for driver operations
pub type UartResult<T> = Result<T, UartError>;
