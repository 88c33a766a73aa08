//! A [`BlockDeque`] is a growable double-ended queue stored in fixed-size blocks.
//! The blocks form one circular buffer: the front can wrap around behind the back, so pushing and
//! popping at either end never moves the rest of the content.
//! When the buffer fills up, the number of blocks doubles and the content is laid out again from
//! the first slot.

use crate::block::BlockStore;
use crate::iter::{IntoIter, Iter, RevIter};
use crate::settings::{is_eager, AllocationPolicy, Lazy, DEFAULT_BLOCK_SIZE};
use crate::{Error, Result, ReverseView};
use std::cell::Cell;
use std::fmt::Debug;

/// A double-ended queue built from blocks of `B` slots each.
///
/// Logical index `i` lives in physical slot `(first + i) % capacity`, so both ends are amortized
/// O(1), random access is O(1) and insertion or removal in the middle is O(n).
///
/// # Examples
/// ```
/// use blockdeque::BlockDeque;
/// let mut deque = BlockDeque::new();
/// deque.push_back(2).unwrap();
/// deque.push_front(1).unwrap();
/// deque.push_back(3).unwrap();
/// assert_eq!(deque, [1, 2, 3][..]);
/// ```
///
/// # Iteration guard
/// Every iterator handed out by [`iter`](BlockDeque::iter) or [`iter_rev`](BlockDeque::iter_rev)
/// registers itself with the deque until it is exhausted, closed or dropped. Mutating calls made
/// while any iterator is registered fail with [`Error::ActiveIteration`].
///
/// # Allocation policy
/// With [`Lazy`] (the default) a block is allocated the first time one of its slots is written.
/// With [`Eager`](crate::Eager) every block is allocated as soon as the store is built or grown.
pub struct BlockDeque<T, const B: usize = { DEFAULT_BLOCK_SIZE }, A = Lazy>
where
    A: AllocationPolicy,
{
    pub(crate) store: BlockStore<T, B>,
    pub(crate) first: usize,
    pub(crate) len: usize,
    pub(crate) active_iterators: Cell<usize>,
    pub(crate) policy: A,
}

impl<T> BlockDeque<T> {
    /// Creates an empty deque holding a single block of [`DEFAULT_BLOCK_SIZE`] slots.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque: BlockDeque<i32> = BlockDeque::new();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), 16);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::new_sized(0)
    }

    /// Creates an empty deque able to hold at least `capacity` elements before growing.
    /// The capacity is rounded up to a whole number of blocks, with a minimum of one block.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque: BlockDeque<i32> = BlockDeque::with_capacity(20);
    /// assert_eq!(deque.capacity(), 32);
    /// assert_eq!(deque.block_count(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new_sized(capacity)
    }
}

impl<T, const B: usize, A> BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    const NONZERO_BLOCK_SIZE: () = assert!(B > 0, "block size must be at least one");

    /// Creates an empty deque for an explicit block size and allocation policy.
    /// `capacity` is rounded up the same way as in [`with_capacity`](BlockDeque::with_capacity).
    ///
    /// # Examples
    /// ```
    /// use blockdeque::{BlockDeque, Eager};
    /// let deque = BlockDeque::<u8, 4, Eager>::new_sized(9);
    /// assert_eq!(deque.capacity(), 12);
    /// assert_eq!(deque.allocated_blocks(), 3);
    /// ```
    #[must_use]
    pub fn new_sized(capacity: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_BLOCK_SIZE;
        BlockDeque {
            store: BlockStore::new(BlockStore::<T, B>::blocks_for(capacity), is_eager::<A>()),
            first: 0,
            len: 0,
            active_iterators: Cell::new(0),
            policy: A::default(),
        }
    }

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the deque contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push or insert will grow the block store.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::<i32, 2>::new_sized(2);
    /// deque.push_back(1).unwrap();
    /// deque.push_back(2).unwrap();
    /// assert!(deque.is_full());
    /// deque.push_back(3).unwrap();
    /// assert!(!deque.is_full());
    /// assert_eq!(deque.capacity(), 4);
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.store.capacity()
    }

    /// Total number of physical slots, `block_count() * block_size()`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    pub const fn block_size(&self) -> usize {
        B
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.store.block_count()
    }

    /// Number of blocks that currently own memory.
    /// Always equal to [`block_count`](BlockDeque::block_count) under the [`Eager`](crate::Eager) policy.
    #[inline]
    pub fn allocated_blocks(&self) -> usize {
        self.store.allocated_blocks()
    }

    /// Number of iterators currently registered with this deque.
    /// Mutation is only allowed while this is zero.
    #[inline]
    pub fn active_iterators(&self) -> usize {
        self.active_iterators.get()
    }

    // Physical slot of logical `index`. Both operands are below capacity, so one subtraction wraps.
    #[inline]
    fn physical(&self, index: usize) -> usize {
        let slot = self.first + index;
        let capacity = self.store.capacity();
        if slot >= capacity {
            slot - capacity
        } else {
            slot
        }
    }

    pub(crate) fn ensure_idle(&self) -> Result<()> {
        let iterators = self.active_iterators.get();
        if iterators > 0 {
            _debug!(iterators, "rejecting mutation of a deque with open iterators");
            return Err(Error::ActiveIteration { iterators });
        }
        Ok(())
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Element at logical `index`, without guard or bounds reporting.
    #[inline]
    pub(crate) fn item(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.store.get(self.physical(index))
    }

    /// Front to back walk that does not register with the guard.
    pub(crate) fn values(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |index| self.item(index))
    }

    // Doubles the block count and lays the content out again from slot 0.
    fn grow(&mut self) {
        let block_count = self.store.block_count() * 2;
        _trace!(
            from = self.store.block_count(),
            to = block_count,
            len = self.len,
            "growing block store"
        );
        let mut store = BlockStore::new(block_count, is_eager::<A>());
        for index in 0..self.len {
            let slot = self.physical(index);
            if let Some(item) = self.store.take(slot) {
                store.put(index, item);
            }
        }
        self.store = store;
        self.first = 0;
    }

    #[inline]
    fn reserve_one(&mut self) {
        if self.is_full() {
            self.grow();
        }
        if self.len == 0 {
            self.first = 0;
        }
    }

    pub(crate) fn push_back_unguarded(&mut self, item: T) {
        self.reserve_one();
        self.len += 1;
        let slot = self.physical(self.len - 1);
        self.store.put(slot, item);
    }

    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.store.take(self.first)?;
        self.len -= 1;
        self.first = self.physical(1);
        Some(item)
    }

    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.store.take(self.physical(self.len - 1))?;
        self.len -= 1;
        Some(item)
    }

    /// Appends an element to the back of the deque, growing the block store if it is full.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([42, 10]);
    /// deque.push_back(100).unwrap();
    /// assert_eq!(deque.pop_back(), Ok(100));
    /// ```
    #[inline]
    pub fn push_back(&mut self, item: T) -> Result<()> {
        self.ensure_idle()?;
        self.push_back_unguarded(item);
        Ok(())
    }

    /// Same as [`push_back`](BlockDeque::push_back).
    #[inline]
    pub fn add(&mut self, item: T) -> Result<()> {
        self.push_back(item)
    }

    /// Prepends an element to the front of the deque, growing the block store if it is full.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([42, 10]);
    /// deque.push_front(100).unwrap();
    /// assert_eq!(deque.pop_front(), Ok(100));
    /// ```
    #[inline]
    pub fn push_front(&mut self, item: T) -> Result<()> {
        self.ensure_idle()?;
        self.reserve_one();
        self.first = if self.first == 0 {
            self.store.capacity() - 1
        } else {
            self.first - 1
        };
        self.len += 1;
        self.store.put(self.first, item);
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    /// [`Error::EmptyContainer`] if the deque is empty, [`Error::ActiveIteration`] if iterators
    /// are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{BlockDeque, Error};
    /// let mut deque = BlockDeque::from([42, 10]);
    /// assert_eq!(deque.pop_back(), Ok(10));
    /// assert_eq!(deque.pop_back(), Ok(42));
    /// assert_eq!(deque.pop_back(), Err(Error::EmptyContainer));
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        self.ensure_idle()?;
        self.take_back().ok_or(Error::EmptyContainer)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    /// [`Error::EmptyContainer`] if the deque is empty, [`Error::ActiveIteration`] if iterators
    /// are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{BlockDeque, Error};
    /// let mut deque = BlockDeque::from([42, 10]);
    /// assert_eq!(deque.pop_front(), Ok(42));
    /// assert_eq!(deque.pop_front(), Ok(10));
    /// assert_eq!(deque.pop_front(), Err(Error::EmptyContainer));
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Result<T> {
        self.ensure_idle()?;
        self.take_front().ok_or(Error::EmptyContainer)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] unless `index < len()`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::{BlockDeque, Error};
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.get(1), Ok(&2));
    /// assert_eq!(deque.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        self.item(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open, [`Error::IndexOutOfRange`] unless
    /// `index < len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.ensure_idle()?;
        self.check_index(index)?;
        let len = self.len;
        let slot = self.physical(index);
        self.store
            .get_mut(slot)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    /// Same as [`get_mut`](BlockDeque::get_mut).
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.set(0, 9), Ok(1));
    /// assert_eq!(deque, [9, 2, 3][..]);
    /// ```
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.item(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|index| self.item(index))
    }

    /// Returns the index of the first element equal to `item`, scanning front to back.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque = BlockDeque::from([4, 7, 4]);
    /// assert_eq!(deque.index_of(&4), Some(0));
    /// assert_eq!(deque.index_of(&5), None);
    /// ```
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values().position(|candidate| candidate == item)
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Inserts an element at `index`, shifting every element after it one position to the back.
    /// `index == len()` appends.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open, [`Error::IndexOutOfRange`] if
    /// `index > len()`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([1, 2]);
    /// deque.insert(1, 3).unwrap();
    /// assert_eq!(deque, [1, 3, 2][..]);
    /// assert!(deque.insert(4, 0).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.ensure_idle()?;
        if index > self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.reserve_one();
        self.len += 1;
        // descending, so every slot is read before it is overwritten
        for to in (index + 1..self.len).rev() {
            let (from, to) = (self.physical(to - 1), self.physical(to));
            self.store.shift(from, to);
        }
        let slot = self.physical(index);
        self.store.put(slot, item);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every element after it one position
    /// to the front.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open, [`Error::IndexOutOfRange`] unless
    /// `index < len()`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.remove_at(1), Ok(2));
    /// assert_eq!(deque, [1, 3][..]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.ensure_idle()?;
        self.check_index(index)?;
        let item = self
            .store
            .take(self.physical(index))
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len,
            })?;
        for to in index..self.len - 1 {
            let (from, to) = (self.physical(to + 1), self.physical(to));
            self.store.shift(from, to);
        }
        self.len -= 1;
        Ok(item)
    }

    /// Removes the first element equal to `item`. Returns false, leaving the deque untouched, if
    /// there is none.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([1, 2, 1]);
    /// assert_eq!(deque.remove(&1), Ok(true));
    /// assert_eq!(deque.remove(&5), Ok(false));
    /// assert_eq!(deque, [2, 1][..]);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.ensure_idle()?;
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    /// Drops every element and releases the block store, replacing it with a single fresh block.
    /// Unlike [`VecDeque::clear`](std::collections::VecDeque::clear), grown capacity is not kept.
    ///
    /// # Errors
    /// [`Error::ActiveIteration`] if iterators are open.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque: BlockDeque<i32> = (0..100).collect();
    /// assert!(deque.capacity() >= 100);
    /// deque.clear().unwrap();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), deque.block_size());
    /// ```
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_idle()?;
        _trace!(
            len = self.len,
            blocks = self.store.block_count(),
            "clearing block store"
        );
        self.store = BlockStore::new(1, is_eager::<A>());
        self.first = 0;
        self.len = 0;
        Ok(())
    }

    /// Clones the whole sequence into `destination`, starting at `destination[offset]`.
    /// Slots outside of `offset..offset + len()` are left untouched.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if fewer than `len()` slots follow `offset`.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// let mut out = [0; 5];
    /// deque.copy_to(&mut out, 2).unwrap();
    /// assert_eq!(out, [0, 0, 1, 2, 3]);
    /// assert!(deque.copy_to(&mut out, 3).is_err());
    /// ```
    pub fn copy_to(&self, destination: &mut [T], offset: usize) -> Result<()>
    where
        T: Clone,
    {
        copy_into(self.values(), self.len, destination, offset)
    }

    /// Returns a front to back iterator. The deque refuses mutation until the iterator is
    /// exhausted, [closed](Iter::close) or dropped.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// let items: Vec<_> = deque.iter().copied().collect();
    /// assert_eq!(items, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, B, A> {
        Iter::new(self)
    }

    /// Returns a back to front iterator with the same guard behavior as [`iter`](BlockDeque::iter).
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// let items: Vec<_> = deque.iter_rev().copied().collect();
    /// assert_eq!(items, [3, 2, 1]);
    /// ```
    #[inline]
    pub fn iter_rev(&self) -> RevIter<'_, T, B, A> {
        RevIter::new(self)
    }

    /// Borrows the deque as a [`ReverseView`], which presents it back to front.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// deque.reversed().push_back(0).unwrap();
    /// assert_eq!(deque, [0, 1, 2, 3][..]);
    /// ```
    #[inline]
    pub fn reversed(&mut self) -> ReverseView<'_, T, B, A> {
        ReverseView::new(self)
    }
}

/// Shared body of `copy_to` for both reading directions.
pub(crate) fn copy_into<'a, T, I>(
    items: I,
    len: usize,
    destination: &mut [T],
    offset: usize,
) -> Result<()>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    let available = destination.len().saturating_sub(offset);
    if offset > destination.len() || available < len {
        return Err(Error::InvalidArgument {
            offset,
            required: len,
            available,
        });
    }
    for (slot, item) in destination[offset..].iter_mut().zip(items) {
        slot.clone_from(item);
    }
    Ok(())
}

impl<T, const B: usize, A> Default for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn default() -> Self {
        Self::new_sized(0)
    }
}

impl<T: Debug, const B: usize, A> Debug for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<T, const B: usize, A> Clone for BlockDeque<T, B, A>
where
    T: Clone,
    A: AllocationPolicy,
{
    /// The clone keeps the block count but starts with the content flattened at slot 0 and with
    /// no registered iterators.
    fn clone(&self) -> Self {
        let mut store = BlockStore::new(self.store.block_count(), is_eager::<A>());
        for (index, item) in self.values().enumerate() {
            store.put(index, item.clone());
        }
        BlockDeque {
            store,
            first: 0,
            len: self.len,
            active_iterators: Cell::new(0),
            policy: self.policy,
        }
    }
}

// partialeq, eq and hash implementations
impl<T, const B: usize, A, const B2: usize, A2> PartialEq<BlockDeque<T, B2, A2>>
    for BlockDeque<T, B, A>
where
    T: PartialEq,
    A: AllocationPolicy,
    A2: AllocationPolicy,
{
    #[inline]
    fn eq(&self, other: &BlockDeque<T, B2, A2>) -> bool {
        self.len == other.len && self.values().eq(other.values())
    }
}

impl<T, const B: usize, A> PartialEq<[T]> for BlockDeque<T, B, A>
where
    T: PartialEq,
    A: AllocationPolicy,
{
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.values().eq(other.iter())
    }
}

impl<T, const B: usize, A> PartialEq<Vec<T>> for BlockDeque<T, B, A>
where
    T: PartialEq,
    A: AllocationPolicy,
{
    #[inline]
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<T, const B: usize, A> Eq for BlockDeque<T, B, A>
where
    T: Eq,
    A: AllocationPolicy,
{
}

impl<T, const B: usize, A> std::hash::Hash for BlockDeque<T, B, A>
where
    T: std::hash::Hash,
    A: AllocationPolicy,
{
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.values().for_each(|item| item.hash(state));
    }
}

impl<T, const B: usize, A> std::ops::Index<usize> for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    type Output = T;

    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const B: usize, A> std::ops::IndexMut<usize> for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    /// # Panics
    /// Panics if `index >= len()` or if iterators are open.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const B: usize, A> Extend<T> for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    /// # Panics
    /// Panics if iterators are open.
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.ensure_idle() {
            panic!("{err}");
        }
        for item in iter {
            self.push_back_unguarded(item);
        }
    }
}

impl<T, const B: usize, A> FromIterator<T> for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::new_sized(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T> From<Vec<T>> for BlockDeque<T> {
    #[inline]
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for BlockDeque<T> {
    #[inline]
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T, const B: usize, A> IntoIterator for BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    type Item = T;
    type IntoIter = IntoIter<T, B, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, const B: usize, A> IntoIterator for &'a BlockDeque<T, B, A>
where
    A: AllocationPolicy,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[doc(hidden)]
pub(crate) mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T, const B: usize, A> Serialize for BlockDeque<T, B, A>
    where
        T: Serialize,
        A: AllocationPolicy,
    {
        #[inline]
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.values())
        }
    }

    impl<'src, T, const B: usize, A> Deserialize<'src> for BlockDeque<T, B, A>
    where
        T: Deserialize<'src>,
        A: AllocationPolicy,
    {
        #[inline]
        fn deserialize<D: Deserializer<'src>>(deserializer: D) -> core::result::Result<Self, D::Error> {
            let vec = <Vec<T> as Deserialize<'src>>::deserialize(deserializer)?;
            Ok(vec.into_iter().collect())
        }
    }

}

#[cfg(test)]
mod deque_tests {
    use super::*;
    use crate::Eager;

    fn small() -> BlockDeque<i32, 4> {
        BlockDeque::new_sized(0)
    }

    #[test]
    pub fn push_back_order() {
        for n in [0, 1, 3, 4, 5, 17, 64] {
            let mut deque = small();
            for i in 0..n {
                deque.push_back(i).unwrap();
            }
            assert_eq!(deque.len(), n as usize);
            for i in 0..n {
                assert_eq!(deque[i as usize], i);
            }
        }
    }

    #[test]
    pub fn push_front_order() {
        let mut deque = small();
        deque.push_front(1).unwrap();
        deque.push_front(2).unwrap();
        deque.push_front(3).unwrap();
        assert_eq!(deque, [3, 2, 1][..]);
        // wrapped around to the last physical slot
        assert_eq!(deque.first, 1);
    }

    #[test]
    pub fn pop_order() {
        let mut deque = small();
        for i in 0..6 {
            deque.push_back(i).unwrap();
        }
        assert_eq!(deque.pop_front(), Ok(0));
        assert_eq!(deque.pop_back(), Ok(5));
        assert_eq!(deque.pop_front(), Ok(1));
        assert_eq!(deque.pop_back(), Ok(4));
        assert_eq!(deque.pop_back(), Ok(3));
        assert_eq!(deque.pop_back(), Ok(2));
        assert_eq!(deque.pop_back(), Err(Error::EmptyContainer));
        assert_eq!(deque.pop_front(), Err(Error::EmptyContainer));
    }

    #[test]
    pub fn test_interleave_scenario() {
        let mut deque = small();
        deque.push_front(2).unwrap();
        deque.push_back(3).unwrap();
        deque.push_front(5).unwrap();
        deque.push_back(4).unwrap();
        assert_eq!(deque.pop_front(), Ok(5));
        deque.push_front(1).unwrap();
        deque.push_front(0).unwrap();
        deque.push_back(10).unwrap();
        assert_eq!(deque.pop_back(), Ok(10));
        deque.push_back(5).unwrap();
        assert_eq!(deque, [0, 1, 2, 3, 4, 5][..]);
    }

    #[test]
    fn growth_preserves_content() {
        let mut deque = small();
        for i in 0..4 {
            deque.push_front(i).unwrap();
        }
        assert!(deque.is_full());
        assert_eq!(deque.block_count(), 1);

        deque.push_back(99).unwrap();
        assert!(!deque.is_full());
        assert_eq!(deque.block_count(), 2);
        assert_eq!(deque.first, 0);
        assert_eq!(deque, [3, 2, 1, 0, 99][..]);
    }

    #[test]
    fn growth_doubles_block_count() {
        let mut deque = small();
        for i in 0..33 {
            deque.push_back(i).unwrap();
        }
        assert_eq!(deque.block_count(), 16);
        assert_eq!(deque.capacity(), 64);
    }

    #[test]
    fn capacity_rounds_up_to_blocks() {
        assert_eq!(BlockDeque::<u8, 4>::new_sized(0).capacity(), 4);
        assert_eq!(BlockDeque::<u8, 4>::new_sized(4).capacity(), 4);
        assert_eq!(BlockDeque::<u8, 4>::new_sized(5).capacity(), 8);
        assert_eq!(BlockDeque::<u8>::with_capacity(33).block_count(), 3);
    }

    #[test]
    fn lazy_policy_allocates_on_write() {
        let mut deque = BlockDeque::<i32, 4>::new_sized(16);
        assert_eq!(deque.allocated_blocks(), 0);
        deque.push_back(1).unwrap();
        assert_eq!(deque.allocated_blocks(), 1);
        // front wraps into the last block
        deque.push_front(0).unwrap();
        assert_eq!(deque.allocated_blocks(), 2);
    }

    #[test]
    fn eager_policy_allocates_everything() {
        let mut deque = BlockDeque::<i32, 4, Eager>::new_sized(8);
        assert_eq!(deque.allocated_blocks(), 2);
        for i in 0..9 {
            deque.push_back(i).unwrap();
        }
        assert_eq!(deque.block_count(), 4);
        assert_eq!(deque.allocated_blocks(), 4);
        deque.clear().unwrap();
        assert_eq!(deque.allocated_blocks(), 1);
    }

    #[test]
    fn get_and_set_check_bounds() {
        let mut deque = [1, 2, 3].into_iter().collect::<BlockDeque<_, 4>>();
        assert_eq!(deque.get(2), Ok(&3));
        assert_eq!(
            deque.get(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(deque.set(1, 20), Ok(2));
        assert_eq!(
            deque.set(5, 0),
            Err(Error::IndexOutOfRange { index: 5, len: 3 })
        );
        *deque.get_mut(0).unwrap() += 10;
        deque[2] = 30;
        assert_eq!(deque, [11, 20, 30][..]);
        assert_eq!(deque.front(), Some(&11));
        assert_eq!(deque.back(), Some(&30));
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for length 3")]
    fn index_panics_out_of_range() {
        let deque = [1, 2, 3].into_iter().collect::<BlockDeque<_, 4>>();
        let _value = deque[3];
    }

    #[test]
    fn index_of_finds_first_duplicate() {
        let deque = [5, 1, 5, 2, 1].into_iter().collect::<BlockDeque<_, 4>>();
        assert_eq!(deque.index_of(&5), Some(0));
        assert_eq!(deque.index_of(&1), Some(1));
        assert_eq!(deque.index_of(&2), Some(3));
        assert_eq!(deque.index_of(&9), None);
        assert!(deque.contains(&2));
        assert!(!deque.contains(&9));
        assert!(!small().contains(&0));
    }

    #[test]
    fn insert_shifts_right() {
        let mut deque = small();
        deque.insert(0, 1).unwrap();
        deque.insert(1, 3).unwrap();
        deque.insert(1, 2).unwrap();
        deque.insert(0, 0).unwrap();
        // triggers growth mid-insert
        deque.insert(4, 4).unwrap();
        assert_eq!(deque, [0, 1, 2, 3, 4][..]);
        assert_eq!(
            deque.insert(6, 9),
            Err(Error::IndexOutOfRange { index: 6, len: 5 })
        );
    }

    #[test]
    fn insert_across_wrapped_buffer() {
        let mut deque = small();
        deque.push_back(2).unwrap();
        deque.push_front(1).unwrap();
        deque.push_front(0).unwrap();
        deque.insert(2, 9).unwrap();
        assert!(deque.is_full());
        assert_eq!(deque, [0, 1, 9, 2][..]);
    }

    #[test]
    fn insert_then_remove_is_identity() {
        let mut deque = [1, 2, 3, 4].into_iter().collect::<BlockDeque<_, 4>>();
        let before = deque.clone();
        deque.insert(0, 42).unwrap();
        assert_eq!(deque.remove_at(0), Ok(42));
        assert_eq!(deque, before);
    }

    #[test]
    fn remove_at_shifts_left() {
        let mut deque = small();
        for i in 0..3 {
            deque.push_front(i).unwrap();
        }
        deque.push_back(3).unwrap();
        assert_eq!(deque, [2, 1, 0, 3][..]);
        assert_eq!(deque.remove_at(1), Ok(1));
        assert_eq!(deque, [2, 0, 3][..]);
        assert_eq!(deque.remove_at(2), Ok(3));
        assert_eq!(
            deque.remove_at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(deque, [2, 0][..]);
    }

    #[test]
    fn remove_by_value() {
        let mut deque = ["a", "b", "a"].into_iter().collect::<BlockDeque<_, 4>>();
        assert_eq!(deque.remove(&"a"), Ok(true));
        assert_eq!(deque, ["b", "a"][..]);
        assert_eq!(deque.remove(&"z"), Ok(false));
        assert_eq!(deque.len(), 2);
    }

    #[test]
    fn clear_releases_capacity() {
        let mut deque = small();
        for i in 0..40 {
            deque.push_back(i).unwrap();
        }
        deque.clear().unwrap();
        assert!(deque.is_empty());
        assert_eq!(deque.block_count(), 1);
        assert_eq!(deque.allocated_blocks(), 0);
        deque.push_front(7).unwrap();
        assert_eq!(deque, [7][..]);
    }

    #[test]
    fn copy_to_offset() {
        let deque: BlockDeque<i32, 4> = (0..10).collect();
        let mut array = [-1; 15];
        deque.copy_to(&mut array, 5).unwrap();
        assert_eq!(array[..5], [-1; 5]);
        assert_eq!(array[5..], [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn copy_to_rejects_short_destination() {
        let deque: BlockDeque<i32, 4> = (0..10).collect();
        let mut array = [-1; 14];
        assert_eq!(
            deque.copy_to(&mut array, 5),
            Err(Error::InvalidArgument {
                offset: 5,
                required: 10,
                available: 9
            })
        );
        assert_eq!(array, [-1; 14]);

        let empty = small();
        let mut short = [0; 2];
        assert!(empty.copy_to(&mut short, 2).is_ok());
        assert!(empty.copy_to(&mut short, 3).is_err());
    }

    #[test]
    fn mutation_rejected_while_iterating() {
        let mut deque = [1, 2, 3].into_iter().collect::<BlockDeque<_, 4>>();
        // a forgotten iterator never releases its registration
        std::mem::forget(deque.iter());
        assert_eq!(deque.active_iterators(), 1);

        let err = Error::ActiveIteration { iterators: 1 };
        assert_eq!(deque.push_back(4), Err(err));
        assert_eq!(deque.push_front(0), Err(err));
        assert_eq!(deque.pop_back(), Err(err));
        assert_eq!(deque.pop_front(), Err(err));
        assert_eq!(deque.insert(0, 0), Err(err));
        assert_eq!(deque.remove_at(0), Err(err));
        assert_eq!(deque.remove(&1), Err(err));
        assert_eq!(deque.set(0, 0), Err(err));
        assert_eq!(deque.clear(), Err(err));
        assert_eq!(deque.reversed().push_back(0), Err(err));

        // reads keep working
        assert_eq!(deque, [1, 2, 3][..]);
        assert_eq!(deque.get(1), Ok(&2));
        assert_eq!(deque.iter_rev().count(), 3);
    }

    #[test]
    fn mutation_allowed_after_release() {
        let mut deque = [1, 2, 3].into_iter().collect::<BlockDeque<_, 4>>();
        let sum: i32 = deque.iter().sum();
        assert_eq!(sum, 6);
        assert_eq!(deque.active_iterators(), 0);
        deque.push_back(4).unwrap();

        let mut iter = deque.iter();
        assert_eq!(iter.next(), Some(&1));
        iter.close();
        deque.push_back(5).unwrap();

        {
            let mut partial = deque.iter_rev();
            assert_eq!(partial.next(), Some(&5));
        }
        deque.push_front(0).unwrap();
        assert_eq!(deque, [0, 1, 2, 3, 4, 5][..]);
    }

    #[test]
    fn simultaneous_iterators() {
        let deque = [1, 2, 3].into_iter().collect::<BlockDeque<_, 4>>();
        let forward = deque.iter();
        let backward = deque.iter_rev();
        assert_eq!(deque.active_iterators(), 2);
        let pairs: Vec<_> = forward.zip(backward).map(|(a, b)| (*a, *b)).collect();
        assert_eq!(pairs, [(1, 3), (2, 2), (3, 1)]);
        assert_eq!(deque.active_iterators(), 0);
    }

    #[test]
    pub fn test_collect() {
        let deque: BlockDeque<i32> = (0..10).collect();
        assert_eq!(deque, (0..10).collect::<Vec<_>>());
        let doubled: Vec<i32> = (&deque).into_iter().map(|x| x * 2).collect();
        assert_eq!(doubled[9], 18);
    }

    #[test]
    fn equality_ignores_layout() {
        let mut wrapped = small();
        wrapped.push_back(2).unwrap();
        wrapped.push_front(1).unwrap();
        let flat = [1, 2].into_iter().collect::<BlockDeque<i32, 8, Eager>>();
        assert_eq!(wrapped, flat);
        assert_ne!(wrapped, [2, 1].into_iter().collect::<BlockDeque<i32, 8>>());
    }

    #[test]
    fn hash_matches_for_equal_content() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |deque: &BlockDeque<i32, 4>| {
            let mut hasher = DefaultHasher::new();
            deque.hash(&mut hasher);
            hasher.finish()
        };
        let mut wrapped = small();
        wrapped.push_back(2).unwrap();
        wrapped.push_front(1).unwrap();
        assert_eq!(hash(&wrapped), hash(&[1, 2].into_iter().collect()));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = [String::from("a"), String::from("b")].into_iter().collect::<BlockDeque<_, 4>>();
        let iter = original.iter();
        let copy = original.clone();
        drop(iter);
        assert_eq!(copy.active_iterators(), 0);
        original.push_back(String::from("c")).unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(format!("{copy:?}"), r#"["a", "b"]"#);
    }

    #[test]
    #[should_panic(expected = "iterator(s) are open")]
    fn extend_panics_while_iterating() {
        let mut deque = small();
        std::mem::forget(deque.iter());
        deque.extend([1, 2]);
    }
}
