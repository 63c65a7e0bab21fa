use crate::list::{Node, RingList};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;
use std::vec;

/// An iterator over the values of a `RingList`, in index order.
///
/// Unlike [`RingList::next`], it is finite and leaves the cursor alone.
///
/// Though the `Iter` walks the index buffer, it actually *borrows*
/// (immutably) from the list, so the list cannot be written meanwhile.
///
/// # Examples
///
/// ```compile_fail
/// use psycle::RingList;
///
/// let mut list = RingList::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.attach(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    nodes: slice::Iter<'a, NonNull<Node<T>>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [NonNull<Node<T>>]) -> Self {
        Self {
            nodes: nodes.iter(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.nodes.len()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the nodes are alive as long as the list is borrowed.
        self.nodes
            .next()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: see `next`.
        self.nodes
            .next_back()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the values of a `RingList`, in index order.
///
/// Only the values can be changed, not the links of the ring.
pub struct IterMut<'a, T: 'a> {
    nodes: slice::Iter<'a, NonNull<Node<T>>>,
    _marker: PhantomData<&'a mut RingList<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    /// The caller must hold the list mutably for `'a`.
    pub(crate) fn new(nodes: &'a [NonNull<Node<T>>]) -> Self {
        Self {
            nodes: nodes.iter(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.nodes.len()).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is borrowed mutably, and every node is yielded at
        // most once, so the references never alias.
        self.nodes
            .next()
            .map(|node| unsafe { (*node.as_ptr()).get_value_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: see `next`.
        self.nodes
            .next_back()
            .map(|node| unsafe { (*node.as_ptr()).get_value_mut() })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the values of a `RingList`.
///
/// This `struct` is created by the [`into_iter`] method on [`RingList`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: RingList::into_iter
pub struct IntoIter<T> {
    nodes: vec::IntoIter<NonNull<Node<T>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    fn take(node: NonNull<Node<T>>) -> T {
        // SAFETY: the nodes were taken over from the list, which allocated
        // them as boxes, and each one is yielded once.
        unsafe { Box::from_raw(node.as_ptr()) }.element
    }
}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.nodes.len()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(Self::take)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(Self::take)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        self.by_ref().for_each(drop);
    }
}

impl<T> IntoIterator for RingList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            nodes: self.into_nodes().into_iter(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a RingList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for RingList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = RingList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for RingList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.attach(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for RingList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> From<Vec<T>> for RingList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for RingList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

unsafe impl<T: Send> Send for IntoIter<T> {}

unsafe impl<T: Sync> Sync for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::RingList;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_iter() {
        fn test_case(input: Vec<i32>, mid: usize) {
            let mut list = RingList::from(input.clone());
            let len = input.len();

            let mut iter = list.iter();
            for (i, item) in input.iter().enumerate() {
                assert_eq!(iter.next(), Some(item));
                assert_eq!(iter.len(), len - i - 1);
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = list.iter();
            for item in input.iter().take(mid) {
                assert_eq!(iter.next(), Some(item));
            }
            let mut iter = iter.rev();
            for item in input.iter().skip(mid).rev() {
                assert_eq!(iter.next(), Some(item));
            }
            assert_eq!(iter.next(), None);

            let mut iter = list.iter_mut();
            for mut item in input.iter().copied() {
                assert_eq!(iter.next(), Some(&mut item));
            }
            assert_eq!(iter.next(), None);

            let owned: Vec<_> = list.into_iter().rev().collect();
            assert_eq!(owned, input.into_iter().rev().collect::<Vec<_>>());
        }
        test_case((0..10).collect(), 10);
        test_case((0..10).collect(), 5);
        test_case((0..10).collect(), 0);
        test_case((0..2).collect(), 1);
        test_case((0..1).collect(), 1);
        test_case(Vec::new(), 0);
    }

    #[test]
    fn iteration_restarts() {
        let mut list = RingList::from([1, 2, 3]);
        list.next().unwrap();
        let first: Vec<_> = list.iter().collect();
        let second: Vec<_> = list.iter().collect();
        assert_eq!(first, second);
        assert_eq!(list.cursor_position(), Some(1));
    }

    #[test]
    fn round_trip() {
        let source = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut list = RingList::new();
        list.from_of(source.clone());
        assert_eq!(list.into_iter().collect::<Vec<_>>(), source);

        let empty: RingList<u8> = std::iter::empty().collect();
        assert!(empty.into_iter().next().is_none());
    }

    #[test]
    fn extend_by_reference() {
        let mut list = RingList::from([1]);
        list.extend(&[2, 3]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        let counter = Rc::new(RefCell::new(0));
        struct Counted(Rc<RefCell<i32>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                *self.0.borrow_mut() += 1;
            }
        }
        let list: RingList<_> = (0..4).map(|_| Counted(counter.clone())).collect();
        let mut iter = list.into_iter();
        drop(iter.next());
        assert_eq!(*counter.borrow(), 1);
        drop(iter);
        assert_eq!(*counter.borrow(), 4);
    }
}
