use std::fmt;

/// Errors produced by [`crate::sort_range`].
///
/// `InvalidRange` and `OutOfBounds` are recoverable, caller-facing faults: they are
/// surfaced before any allocation or mutation, so the array is left untouched.
/// `Interrupted` is the non-recoverable case: a worker thread panicked while a
/// parallel pass was running, and the array may be partially permuted within
/// the requested range.
#[derive(Debug)]
pub enum SortError {
    /// `from > to`.
    InvalidRange { from: isize, to: isize },
    /// `from < 0` or `to > len`.
    OutOfBounds { index: isize, len: usize },
    /// A worker thread panicked while the sort was in flight.
    Interrupted { cause: String },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidRange { from, to } => {
                write!(f, "invalid range: from ({from}) > to ({to})")
            }
            SortError::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for array of length {len}")
            }
            SortError::Interrupted { cause } => {
                write!(f, "sort was interrupted: {cause}")
            }
        }
    }
}

impl std::error::Error for SortError {}

/// Turns a caught worker-thread panic payload into an `Interrupted` error.
/// `Box<dyn Any + Send>` is what `std::thread::Result` carries; panics raised
/// via `panic!("{msg}")` or a string literal are the only payload shapes the
/// standard library's own panic hook produces, so those are the two cases
/// worth naming; anything else still degrades to a generic message instead
/// of panicking again.
pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> SortError {
    let cause = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker thread panicked".to_string());

    SortError::Interrupted { cause }
}
