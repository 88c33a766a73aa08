use crate::deque::copy_into;
use crate::iter::{Iter, RevIter};
use crate::settings::AllocationPolicy;
use crate::{BlockDeque, Error, Result};
use std::fmt::Debug;

/// A mutable view presenting a [`BlockDeque`] back to front.
/// This struct is created by the [`reversed`](BlockDeque::reversed) method on [`BlockDeque`].
///
/// View index `i` is the deque's index `len - 1 - i`. The two ends swap roles: pushing or popping
/// at the back of the view works on the front of the deque and the other way around. The view
/// keeps no state of its own; every call is translated and forwarded.
///
/// # Examples
/// ```
/// # use blockdeque::BlockDeque;
/// let mut deque = BlockDeque::from(['a', 'b', 'c']);
/// let mut view = deque.reversed();
/// assert_eq!(view.iter().collect::<String>(), "cba");
/// view.push_back('z').unwrap();
/// assert_eq!(view.get(0), Ok(&'c'));
/// assert_eq!(deque, ['z', 'a', 'b', 'c'][..]);
/// ```
pub struct ReverseView<'a, T, const B: usize, A>
where
    A: AllocationPolicy,
{
    subject: &'a mut BlockDeque<T, B, A>,
}

impl<'a, T, const B: usize, A> ReverseView<'a, T, B, A>
where
    A: AllocationPolicy,
{
    pub(crate) fn new(subject: &'a mut BlockDeque<T, B, A>) -> Self {
        ReverseView { subject }
    }

    #[inline]
    fn mirror(&self, index: usize) -> Result<usize> {
        let len = self.subject.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(len - 1 - index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subject.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.subject.is_full()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.subject.capacity()
    }

    /// Appends to the back of the view, which is the front of the deque.
    #[inline]
    pub fn push_back(&mut self, item: T) -> Result<()> {
        self.subject.push_front(item)
    }

    /// Prepends to the front of the view, which is the back of the deque.
    #[inline]
    pub fn push_front(&mut self, item: T) -> Result<()> {
        self.subject.push_back(item)
    }

    /// Same as [`push_back`](ReverseView::push_back): the item lands in front of the deque.
    #[inline]
    pub fn add(&mut self, item: T) -> Result<()> {
        self.subject.push_front(item)
    }

    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        self.subject.pop_front()
    }

    #[inline]
    pub fn pop_front(&mut self) -> Result<T> {
        self.subject.pop_back()
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.subject.back()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.subject.front()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        self.subject.get(self.mirror(index)?)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.subject.ensure_idle()?;
        let index = self.mirror(index)?;
        self.subject.get_mut(index)
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Index, in view order, of the first element equal to `item`. That is the last match in the
    /// deque's own order.
    ///
    /// # Examples
    /// ```
    /// # use blockdeque::BlockDeque;
    /// let mut deque = BlockDeque::from([7, 8, 7, 9]);
    /// assert_eq!(deque.index_of(&7), Some(0));
    /// assert_eq!(deque.reversed().index_of(&7), Some(1));
    /// ```
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.subject
            .values()
            .rev()
            .position(|candidate| candidate == item)
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.subject.contains(item)
    }

    /// Inserts so that `item` ends up at view index `index`. `index == len()` appends to the back
    /// of the view.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.subject.ensure_idle()?;
        let len = self.subject.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.subject.insert(len - index, item)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.subject.ensure_idle()?;
        let index = self.mirror(index)?;
        self.subject.remove_at(index)
    }

    /// Removes the first element equal to `item` in view order.
    pub fn remove(&mut self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.subject.ensure_idle()?;
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    #[inline]
    pub fn clear(&mut self) -> Result<()> {
        self.subject.clear()
    }

    /// Clones the sequence, in view order, into `destination` starting at `offset`.
    pub fn copy_to(&self, destination: &mut [T], offset: usize) -> Result<()>
    where
        T: Clone,
    {
        copy_into(
            self.subject.values().rev(),
            self.subject.len(),
            destination,
            offset,
        )
    }

    /// Iterates in view order, which is the deque's [`iter_rev`](BlockDeque::iter_rev).
    #[inline]
    pub fn iter(&self) -> RevIter<'_, T, B, A> {
        self.subject.iter_rev()
    }

    /// Iterates against view order, which is the deque's [`iter`](BlockDeque::iter).
    #[inline]
    pub fn iter_rev(&self) -> Iter<'_, T, B, A> {
        self.subject.iter()
    }
}

impl<T: Debug, const B: usize, A> Debug for ReverseView<'_, T, B, A>
where
    A: AllocationPolicy,
{
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.subject.values().rev()).finish()
    }
}

impl<T, const B: usize, A> std::ops::Index<usize> for ReverseView<'_, T, B, A>
where
    A: AllocationPolicy,
{
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'b, T, const B: usize, A> IntoIterator for &'b ReverseView<'_, T, B, A>
where
    A: AllocationPolicy,
{
    type Item = &'b T;
    type IntoIter = RevIter<'b, T, B, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
