//! Error types for mcpath.
//!
//! Every failure in the workspace is a variant of a single
//! `thiserror`-derived enum. Preconditions are written with the `ensure!`
//! macro and unconditional failures with `fail!`.

use thiserror::Error;

/// The top-level error type used throughout mcpath.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument, e.g. an unsupported type code or a badly shaped
    /// caller buffer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A variate source does not produce as many variates per draw as the
    /// time grid has steps.
    #[error("sequence generator dimensionality ({actual}) != time steps ({expected})")]
    DimensionMismatch {
        /// Number of time steps on the grid.
        expected: usize,
        /// Dimension reported by the variate source.
        actual: usize,
    },

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },
}

/// Shorthand `Result` type used throughout mcpath.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mcp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> mcp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mcp_core::{ensure_arg, errors::Error};
/// fn code(c: i32) -> mcp_core::errors::Result<i32> {
///     ensure_arg!((0..4).contains(&c), "unsupported code {c}");
///     Ok(c)
/// }
/// assert!(code(2).is_ok());
/// assert!(matches!(code(7), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure_arg {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use mcp_core::{fail, errors::Error};
/// fn always_err() -> mcp_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
