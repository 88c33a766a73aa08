macro_rules! _debug {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($tt)+);
    };
}

macro_rules! _trace {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($tt)+);
    };
}

/// A version of the [`vec!`] macro but for [`BlockDeque`](crate::BlockDeque).
/// It uses the default block size and the [`Lazy`](crate::Lazy) allocation policy.
/// # Examples
/// ```
/// # use blockdeque::block_deque;
/// let deque = block_deque![1, 2, 3, 4, 5];
/// assert_eq!(deque.len(), 5);
/// assert_eq!(deque, [1, 2, 3, 4, 5][..]);
/// ```
/// ```
/// # use blockdeque::block_deque;
/// let deque = block_deque![7; 3];
/// assert_eq!(deque, [7, 7, 7][..]);
/// ```
/// ```
/// # use blockdeque::{block_deque, BlockDeque};
/// let deque: BlockDeque<i32> = block_deque![];
/// assert!(deque.is_empty());
/// assert_eq!(deque.capacity(), deque.block_size());
/// ```
#[macro_export]
macro_rules! block_deque {
    () => {
        $crate::BlockDeque::<_>::new()
    };
    ($elem:expr; $n:expr) => {
        <$crate::BlockDeque<_> as core::iter::FromIterator<_>>::from_iter(
            core::iter::repeat($elem).take($n),
        )
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::BlockDeque<_> as core::convert::From<_>>::from([$($x),+])
    };
}
