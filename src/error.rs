use std::fmt::{Display, Formatter};

/// Result alias used by every fallible [`BlockDeque`](crate::BlockDeque) operation.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by [`BlockDeque`](crate::BlockDeque) and [`ReverseView`](crate::ReverseView).
///
/// A failed operation never changes the container: every precondition is checked before the
/// first slot, index or block is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A mutating call was made while iterators over the container were still open.
    ActiveIteration {
        /// Number of iterators registered at the time of the call.
        iterators: usize,
    },
    /// `pop_front` or `pop_back` on an empty container.
    EmptyContainer,
    /// An index outside of the valid range for the operation.
    ///
    /// Element access and removal accept `0..len`; insertion accepts `0..=len`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the container when the index was rejected.
        len: usize,
    },
    /// The destination of a copy can not hold the whole sequence at the requested offset.
    InvalidArgument {
        /// Requested starting position inside the destination.
        offset: usize,
        /// Number of elements that had to fit.
        required: usize,
        /// Number of destination slots from `offset` onwards.
        available: usize,
    },
}

impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::ActiveIteration { iterators } => write!(
                f,
                "container can not be modified while {iterators} iterator(s) are open"
            ),
            Self::EmptyContainer => f.write_str("container is empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for length {len}")
            }
            Self::InvalidArgument {
                offset,
                required,
                available,
            } => write!(
                f,
                "destination has {available} slot(s) from offset {offset} but {required} are required"
            ),
        }
    }
}

impl std::error::Error for Error {}
