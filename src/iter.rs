//! Iterators over a [`BlockDeque`].
//!
//! [`Iter`] and [`RevIter`] borrow the deque and hold a [`Registration`] against its guard counter
//! for as long as they can still produce items. [`IntoIter`] owns the deque and needs no guard.

use crate::settings::AllocationPolicy;
use crate::BlockDeque;
use std::cell::Cell;
use std::iter::FusedIterator;

/// One slot of a deque's open-iterator count. Released at most once, and always on drop.
struct Registration<'a> {
    counter: &'a Cell<usize>,
    held: bool,
}

impl<'a> Registration<'a> {
    fn new(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Registration {
            counter,
            held: true,
        }
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            self.counter.set(self.counter.get() - 1);
        }
    }

    fn renew(&mut self) {
        if !self.held {
            self.held = true;
            self.counter.set(self.counter.get() + 1);
        }
    }
}

impl Drop for Registration<'_> {
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}

/// A front to back iterator over a [`BlockDeque`].
/// This struct is created by the [`iter`](BlockDeque::iter) method on [`BlockDeque`].
///
/// The deque rejects mutation until this iterator is exhausted, [closed](Iter::close) or dropped.
pub struct Iter<'a, T, const B: usize, A>
where
    A: AllocationPolicy,
{
    deque: &'a BlockDeque<T, B, A>,
    next: usize,
    registration: Registration<'a>,
}

impl<'a, T, const B: usize, A> Iter<'a, T, B, A>
where
    A: AllocationPolicy,
{
    pub(crate) fn new(deque: &'a BlockDeque<T, B, A>) -> Self {
        Iter {
            deque,
            next: 0,
            registration: Registration::new(&deque.active_iterators),
        }
    }

    /// Starts over from the front. An exhausted iterator registers with the deque again.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let deque = BlockDeque::from([1, 2]);
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.by_ref().count(), 2);
    /// assert_eq!(deque.active_iterators(), 0);
    /// iter.reset();
    /// assert_eq!(deque.active_iterators(), 1);
    /// assert_eq!(iter.next(), Some(&1));
    /// ```
    pub fn reset(&mut self) {
        self.next = 0;
        self.registration.renew();
    }

    /// Releases the iterator's hold on the deque without draining it.
    #[inline]
    pub fn close(self) {}
}

impl<'a, T, const B: usize, A> Iterator for Iter<'a, T, B, A>
where
    A: AllocationPolicy,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let deque = self.deque;
        match deque.item(self.next) {
            Some(item) => {
                self.next += 1;
                Some(item)
            }
            None => {
                self.registration.release();
                None
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deque.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T, const B: usize, A> ExactSizeIterator for Iter<'_, T, B, A> where A: AllocationPolicy {}

impl<T, const B: usize, A> FusedIterator for Iter<'_, T, B, A> where A: AllocationPolicy {}

/// A back to front iterator over a [`BlockDeque`].
/// This struct is created by the [`iter_rev`](BlockDeque::iter_rev) method on [`BlockDeque`] and
/// by [`ReverseView::iter`](crate::ReverseView::iter).
///
/// Same guard behavior as [`Iter`].
pub struct RevIter<'a, T, const B: usize, A>
where
    A: AllocationPolicy,
{
    deque: &'a BlockDeque<T, B, A>,
    remaining: usize,
    registration: Registration<'a>,
}

impl<'a, T, const B: usize, A> RevIter<'a, T, B, A>
where
    A: AllocationPolicy,
{
    pub(crate) fn new(deque: &'a BlockDeque<T, B, A>) -> Self {
        RevIter {
            deque,
            remaining: deque.len(),
            registration: Registration::new(&deque.active_iterators),
        }
    }

    /// Starts over from the back. An exhausted iterator registers with the deque again.
    pub fn reset(&mut self) {
        self.remaining = self.deque.len();
        self.registration.renew();
    }

    /// Releases the iterator's hold on the deque without draining it.
    #[inline]
    pub fn close(self) {}
}

impl<'a, T, const B: usize, A> Iterator for RevIter<'a, T, B, A>
where
    A: AllocationPolicy,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let deque = self.deque;
        if self.remaining == 0 {
            self.registration.release();
            return None;
        }
        self.remaining -= 1;
        deque.item(self.remaining)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const B: usize, A> ExactSizeIterator for RevIter<'_, T, B, A> where A: AllocationPolicy {}

impl<T, const B: usize, A> FusedIterator for RevIter<'_, T, B, A> where A: AllocationPolicy {}

/// An iterator over the elements owned by a [`BlockDeque`]. It pops them from the appropriate side
/// as it goes, and it will drop all remaining elements of the deque when it is dropped.
pub struct IntoIter<T, const B: usize, A>
where
    A: AllocationPolicy,
{
    deque: BlockDeque<T, B, A>,
}

impl<T, const B: usize, A> IntoIter<T, B, A>
where
    A: AllocationPolicy,
{
    pub(crate) fn new(deque: BlockDeque<T, B, A>) -> Self {
        IntoIter { deque }
    }
}

impl<T, const B: usize, A> Iterator for IntoIter<T, B, A>
where
    A: AllocationPolicy,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.deque.take_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, const B: usize, A> DoubleEndedIterator for IntoIter<T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.take_back()
    }
}

impl<T, const B: usize, A> ExactSizeIterator for IntoIter<T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn len(&self) -> usize {
        self.deque.len()
    }
}

impl<T, const B: usize, A> FusedIterator for IntoIter<T, B, A> where A: AllocationPolicy {}
