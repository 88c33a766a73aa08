//! A [`BlockDeque`] is a growable double-ended queue stored in fixed-size blocks that together form
//! one circular buffer.
//! Its API follows [`VecDeque`](std::collections::VecDeque) where it can, with a few differences:
//! - operations that can fail return a [`Result`] instead of panicking or returning `Option`,
//! - iterators register with the deque, and mutation is refused while any of them is open,
//! - [`clear`](BlockDeque::clear) gives the grown capacity back,
//! - a [`ReverseView`] presents the same deque back to front.
//!
//! ```
//! use blockdeque::{BlockDeque, Error};
//! let mut deque = BlockDeque::new();
//! deque.push_back(2)?;
//! deque.push_front(1)?;
//! deque.push_back(3)?;
//! assert_eq!(deque, [1, 2, 3][..]);
//!
//! let mut iter = deque.iter();
//! assert_eq!(iter.next(), Some(&1));
//! # drop(iter);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Features
//! - `serde`: serializes a deque as a plain sequence.
//! - `tracing`: emits `tracing` events on block store growth, clearing and rejected mutations.

#[macro_use]
mod macros;

mod block;
mod deque;
mod error;
mod iter;
mod reverse;
pub mod settings;


pub use deque::BlockDeque;
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, RevIter};
pub use reverse::ReverseView;
pub use settings::{AllocationPolicy, Eager, Lazy, DEFAULT_BLOCK_SIZE};
