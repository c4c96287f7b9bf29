/// Errors that can occur when accessing a collection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An index (or range bound) does not refer to a stored element.
    #[error("index out of range: {index} >= {len}")]
    OutOfRange { index: u64, len: u64 },

    /// The lower bound of an inclusive range exceeds its upper bound.
    #[error("invalid range: {from} > {to}")]
    InvalidRange { from: u64, to: u64 },

    /// The destination of a bulk copy cannot hold every element.
    #[error("destination too short: {available} < {required}")]
    DestinationTooShort { required: usize, available: usize },
}
