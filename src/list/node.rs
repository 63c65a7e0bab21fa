use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::Deref;
use std::ptr::NonNull;

/// A single element of a [`RingList`](crate::RingList).
///
/// A node owns its value and holds a non-owning link to its successor. The
/// successor is always another node of the same ring, or the node itself
/// when it is alone.
///
/// Nodes are only ever exposed behind shared references, so the links cannot
/// be rearranged from outside the crate.
pub struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) element: T,
}

impl<T> Node<T> {
    /// Allocate a node that is its own successor.
    pub(crate) fn new_looped(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            element,
        });
        let mut ptr = NonNull::from(Box::leak(node));
        // SAFETY: `ptr` was just leaked from a box and nothing else refers to it.
        unsafe { ptr.as_mut().set_next(ptr) };
        ptr
    }

    /// Returns a reference to the value of the node.
    #[inline]
    pub fn get_value(&self) -> &T {
        &self.element
    }

    pub(crate) fn get_value_mut(&mut self) -> &mut T {
        &mut self.element
    }

    /// Replace the value, returning the old one.
    ///
    /// The links are left untouched.
    pub fn set_value(&mut self, value: T) -> T {
        mem::replace(&mut self.element, value)
    }

    /// Returns the successor of the node.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let list = RingList::from([1, 2]);
    /// let head = list.head().unwrap();
    /// assert_eq!(head.get_next().get_value(), &2);
    /// assert_eq!(head.get_next().get_next().get_value(), &1);
    /// ```
    #[inline]
    pub fn get_next(&self) -> &Node<T> {
        // SAFETY: a node reachable through a shared reference either lives in
        // a borrowed ring, where every successor is a live node of the same
        // ring, or is held by a `Detached`, where the successor is itself.
        unsafe { self.next.as_ref() }
    }

    /// Relink the successor without checking the ring.
    pub(crate) fn set_next(&mut self, next: NonNull<Node<T>>) {
        self.next = next;
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.element)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.element, f)
    }
}

/// A node that has been detached from a [`RingList`](crate::RingList).
///
/// The node no longer belongs to any ring: its successor is reset to the node
/// itself. It dereferences to [`Node`], so the value stays readable through
/// [`Node::get_value`].
///
/// # Examples
///
/// ```
/// use psycle::RingList;
///
/// let mut list = RingList::from(["a", "b"]);
/// let detached = list.detach().unwrap();
/// assert_eq!(detached.get_value(), &"b");
/// assert_eq!(detached.get_next().get_value(), &"b");
/// assert_eq!(detached.into_value(), "b");
/// ```
pub struct Detached<T> {
    node: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> Detached<T> {
    /// Take ownership of a node that has been unlinked from its ring.
    ///
    /// It is unsafe because `node` must have been allocated by
    /// [`Node::new_looped`] and no ring may refer to it any more.
    pub(crate) unsafe fn new(mut node: NonNull<Node<T>>) -> Self {
        node.as_mut().set_next(node);
        Self {
            node,
            _marker: PhantomData,
        }
    }

    /// Returns a mutable reference to the value.
    pub fn get_value_mut(&mut self) -> &mut T {
        // SAFETY: `self` owns the node exclusively.
        unsafe { self.node.as_mut().get_value_mut() }
    }

    /// Replace the value, returning the old one.
    pub fn set_value(&mut self, value: T) -> T {
        // SAFETY: `self` owns the node exclusively.
        unsafe { self.node.as_mut().set_value(value) }
    }

    /// Consume the node and return its value.
    pub fn into_value(self) -> T {
        let this = ManuallyDrop::new(self);
        // SAFETY: the node was allocated as a box, and `this` is never dropped,
        // so the box is reclaimed exactly once.
        let node = unsafe { Box::from_raw(this.node.as_ptr()) };
        node.element
    }
}

impl<T> Deref for Detached<T> {
    type Target = Node<T>;

    fn deref(&self) -> &Node<T> {
        // SAFETY: `self` owns the node, which stays alive until dropped.
        unsafe { self.node.as_ref() }
    }
}

impl<T> Drop for Detached<T> {
    fn drop(&mut self) {
        // SAFETY: see `into_value`.
        drop(unsafe { Box::from_raw(self.node.as_ptr()) });
    }
}

impl<T: fmt::Debug> fmt::Debug for Detached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Detached").field(self.get_value()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Detached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get_value(), f)
    }
}

unsafe impl<T: Sync> Sync for Node<T> {}

unsafe impl<T: Send> Send for Detached<T> {}

unsafe impl<T: Sync> Sync for Detached<T> {}

#[cfg(test)]
mod tests {
    use crate::list::node::{Detached, Node};
    use std::ptr::NonNull;

    #[test]
    fn looped_node_is_its_own_successor() {
        let node = Node::new_looped(7);
        let detached = unsafe { Detached::new(node) };
        assert_eq!(NonNull::from(detached.get_next()), node);
        assert_eq!(detached.get_next().get_value(), &7);
    }

    #[test]
    fn detached_value_access() {
        let mut detached = unsafe { Detached::new(Node::new_looped(String::from("a"))) };
        detached.get_value_mut().push('b');
        assert_eq!(detached.set_value(String::from("c")), "ab");
        assert_eq!(format!("{}", detached), "c");
        assert_eq!(format!("{:?}", detached), "Detached(\"c\")");
        assert_eq!(detached.into_value(), "c");
    }

    #[test]
    fn node_set_value_keeps_link() {
        let mut ptr = Node::new_looped(1);
        let node = unsafe { ptr.as_mut() };
        assert_eq!(node.set_value(2), 1);
        assert_eq!(node.get_value(), &2);
        assert_eq!(NonNull::from(node.get_next()), ptr);
        drop(unsafe { Detached::new(ptr) });
    }
}
