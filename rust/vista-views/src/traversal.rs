//! Callback-driven traversal: folds, map, searches and iteration.
//!
//! Every callback receives `(value, index, view)`. Values are loaded at the
//! moment each step begins, so a callback that stores through the view is
//! observed by the steps after it.

use crate::{element::Element, view::View};

impl<K: Element> View<K> {
    /// Folds the elements left to right, starting from `initial`.
    pub fn reduce<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, K::Native, usize, &View<K>) -> A,
    {
        let mut acc = initial;
        for i in 0..self.len() {
            acc = f(acc, unsafe { self.load(i) }, i, self);
        }
        acc
    }

    /// Folds the elements right to left, from index `len() - 1` down to `0`,
    /// starting from `initial`.
    pub fn reduce_right<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, K::Native, usize, &View<K>) -> A,
    {
        let mut acc = initial;
        for i in (0..self.len()).rev() {
            acc = f(acc, unsafe { self.load(i) }, i, self);
        }
        acc
    }

    /// Returns a new view over a fresh buffer holding `f(value, index, self)`
    /// for every element. This view is left untouched.
    pub fn map<F>(&self, mut f: F) -> View<K>
    where
        F: FnMut(K::Native, usize, &View<K>) -> K::Input,
    {
        let length = self.len();
        log::trace!("{}::map: allocating {length} elements", K::NAME);
        let out = View::<K>::new(length);
        for i in 0..length {
            let value = f(unsafe { self.load(i) }, i, self);
            unsafe { out.store(i, K::encode(value)) };
        }
        out
    }

    /// Returns the smallest index whose element satisfies `predicate`.
    ///
    /// Stops at the first match.
    pub fn find_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(K::Native, usize, &View<K>) -> bool,
    {
        (0..self.len()).find(|&i| predicate(unsafe { self.load(i) }, i, self))
    }

    /// Returns `true` if any element satisfies `predicate`.
    ///
    /// Stops at the first match.
    pub fn some<P>(&self, predicate: P) -> bool
    where
        P: FnMut(K::Native, usize, &View<K>) -> bool,
    {
        self.find_index(predicate).is_some()
    }

    /// Returns `true` if every element satisfies `predicate`; `true` for an
    /// empty view.
    ///
    /// Stops at the first failure.
    pub fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(K::Native, usize, &View<K>) -> bool,
    {
        (0..self.len()).all(|i| predicate(unsafe { self.load(i) }, i, self))
    }

    /// Calls `f` once per element, in ascending index order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(K::Native, usize, &View<K>),
    {
        for i in 0..self.len() {
            f(unsafe { self.load(i) }, i, self);
        }
    }

    /// Returns an iterator over the elements in ascending order.
    ///
    /// Each element is loaded when the iterator reaches it.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            view: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Iterator over the elements of a [`View`], returned by [`View::iter`].
pub struct Iter<'a, K: Element> {
    view: &'a View<K>,
    front: usize,
    back: usize,
}

impl<K: Element> Iterator for Iter<'_, K> {
    type Item = K::Native;

    #[inline]
    fn next(&mut self) -> Option<K::Native> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { self.view.load(self.front) };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<K: Element> DoubleEndedIterator for Iter<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<K::Native> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.view.load(self.back) })
    }
}

impl<K: Element> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K: Element> IntoIterator for &'a View<K> {
    type Item = K::Native;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
