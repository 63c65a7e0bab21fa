use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::RingError;
use crate::{Iter, IterMut};

pub use display::Quoted;
pub use node::{Detached, Node};

pub mod iterator;
pub mod node;

mod algorithms;
mod display;

/// The `RingList` is a circular singly-linked list with owned nodes.
///
/// It keeps two synchronized views of the same nodes:
/// - an index buffer `index`, in ring order, used for positional access;
/// - the successor links embedded in the nodes, followed by the persistent
///   `cursor` on every call to [`RingList::next`].
///
/// The following holds before and after every public operation:
/// - the list is empty iff `index` is empty iff `cursor` is `None`;
/// - `index[i]`'s successor is `index[(i + 1) % size]`, so a single node is its
///   own successor;
/// - `cursor` always points to a node of `index`.
///
/// # Indexing
///
/// Positions may be negative, counting from the back like Python slices. For
/// [`RingList::detach_at`] and [`RingList::get_at`], `-1` is the last node.
/// For [`RingList::attach_at`], `-1` is the position *after* the last node.
///
/// # Threads
///
/// Mutation requires `&mut self`. Sharing a list between threads needs an
/// external lock, as with any other collection.
pub struct RingList<T> {
    index: Vec<NonNull<Node<T>>>,
    cursor: Option<NonNull<Node<T>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> RingList<T> {
    /// Resolve a position for insertion, where `size` itself is valid.
    fn insertion_point(&self, requested: isize) -> Result<usize, RingError> {
        let size = self.index.len();
        let at = if requested < 0 {
            size as isize + requested + 1
        } else {
            requested
        };
        if (0..=size as isize).contains(&at) {
            Ok(at as usize)
        } else {
            Err(RingError::IndexOutOfRange {
                index: requested,
                size,
                inclusive: true,
            })
        }
    }

    /// Resolve a position of an existing node.
    fn position(&self, requested: isize) -> Result<usize, RingError> {
        let size = self.index.len();
        if size == 0 {
            return Err(RingError::EmptyRing);
        }
        let at = if requested < 0 {
            size as isize + requested
        } else {
            requested
        };
        if (0..size as isize).contains(&at) {
            Ok(at as usize)
        } else {
            Err(RingError::IndexOutOfRange {
                index: requested,
                size,
                inclusive: false,
            })
        }
    }

    /// The node preceding position `at` in the ring, wrapping to the last
    /// node for `at == 0`.
    fn predecessor(&self, at: usize) -> NonNull<Node<T>> {
        let size = self.index.len();
        self.index[(at + size - 1) % size]
    }

    /// Create a node for `elt` and link it in at position `at`.
    ///
    /// `at` must already be a valid insertion point.
    fn link_at(&mut self, at: usize, elt: T) {
        let node = Node::new_looped(elt);
        if self.index.is_empty() {
            self.index.push(node);
            self.cursor = Some(node);
            #[cfg(debug_assertions)]
            assert_adjacent(node, node);
        } else {
            let prev = self.predecessor(at);
            #[cfg(debug_assertions)]
            let next = unsafe { prev.as_ref().next };
            // SAFETY: `prev` belongs to the ring and `node` is a fresh node
            // owned by nobody else.
            unsafe { splice_after(prev, node) };
            self.index.insert(at, node);
            #[cfg(debug_assertions)]
            {
                assert_adjacent(prev, node);
                assert_adjacent(node, next);
            }
        }
    }

    /// Unlink the node at position `at` and hand it out.
    ///
    /// `at` must already be a valid position.
    fn unlink_at(&mut self, at: usize) -> Detached<T> {
        let node = self.index.remove(at);
        if self.index.is_empty() {
            self.cursor = None;
        } else {
            let mut prev = self.predecessor(at);
            // SAFETY: `node` was part of the ring until now, so its successor is
            // a live node, and `prev` is still in the ring.
            let next = unsafe { node.as_ref().next };
            unsafe { prev.as_mut().set_next(next) };
            if self.cursor == Some(node) {
                self.cursor = Some(next);
            }
            #[cfg(debug_assertions)]
            assert_adjacent(prev, next);
        }
        #[cfg(debug_assertions)]
        assert_eq!(self.index.is_empty(), self.cursor.is_none());
        // SAFETY: `node` is no longer referred to by `index`, `cursor` or
        // any successor link.
        unsafe { Detached::new(node) }
    }

    /// Assert the consistency of the index buffer, the ring and the cursor.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let size = self.index.len();
        assert_eq!(size == 0, self.cursor.is_none(), "cursor out of sync");
        for (i, node) in self.index.iter().enumerate() {
            // SAFETY: every node in `index` is alive.
            let next = unsafe { node.as_ref().next };
            assert_eq!(next, self.index[(i + 1) % size], "broken link at {}", i);
        }
        if let Some(cursor) = self.cursor {
            assert!(self.index.contains(&cursor), "cursor points to a stray node");
        }
    }
}

impl<T> RingList<T> {
    /// Create an empty `RingList`.
    ///
    /// # Examples
    /// ```
    /// use psycle::RingList;
    /// let list: RingList<u32> = RingList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            index: Vec::new(),
            cursor: None,
            _marker: PhantomData,
        }
    }

    /// Returns the number of nodes in the ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the ring has no nodes.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts `value` at position `index`.
    ///
    /// A negative `index` counts from the back, `-1` meaning "after the last
    /// node". On an empty ring the index is ignored and the value becomes the
    /// single, self-linked node, which the cursor then points to. Otherwise
    /// the cursor is left untouched.
    ///
    /// # Errors
    ///
    /// - [`RingError::InvalidIndex`] if `index` does not fit in an `isize`;
    /// - [`RingError::IndexOutOfRange`] if the normalized index is outside of
    ///   `0..=size`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from([1, 3]);
    /// list.attach_at(1, 2).unwrap();
    /// list.attach_at(-1, 4).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    ///
    /// assert!(list.attach_at(6, 5).unwrap_err().is_out_of_range());
    /// assert!(list.attach_at(u64::MAX, 5).unwrap_err().is_invalid_index());
    /// ```
    pub fn attach_at<I>(&mut self, index: I, value: T) -> Result<(), RingError>
    where
        I: TryInto<isize> + Display + Copy,
    {
        let requested = signed_index(index)?;
        let at = if self.is_empty() {
            0
        } else {
            self.insertion_point(requested).map_err(|err| {
                ring_debug!("attach_at rejected: {}", err);
                err
            })?
        };
        self.link_at(at, value);
        ring_trace!("attached at {}, size is now {}", at, self.size());
        Ok(())
    }

    /// Appends `value` after the last node.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::new();
    /// list.attach(1);
    /// list.attach(2);
    /// assert_eq!(list.get_at(-1), Ok(&2));
    /// ```
    pub fn attach(&mut self, value: T) {
        self.link_at(self.size(), value);
        ring_trace!("attached at the back, size is now {}", self.size());
    }

    /// Removes the node at position `index` and returns it.
    ///
    /// A negative `index` counts from the back, `-1` being the last node.
    /// The predecessor of the removed node is relinked to its successor. If the
    /// cursor pointed to the removed node, it moves on to that successor.
    ///
    /// # Errors
    ///
    /// - [`RingError::InvalidIndex`] if `index` does not fit in an `isize`;
    /// - [`RingError::EmptyRing`] if the ring has no nodes;
    /// - [`RingError::IndexOutOfRange`] if the normalized index is outside of
    ///   `0..size`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from([1, 2, 3]);
    /// assert_eq!(list.detach_at(1).unwrap().get_value(), &2);
    /// assert_eq!(list.detach_at(-1).unwrap().into_value(), 3);
    /// assert!(list.detach_at(1).unwrap_err().is_out_of_range());
    /// ```
    pub fn detach_at<I>(&mut self, index: I) -> Result<Detached<T>, RingError>
    where
        I: TryInto<isize> + Display + Copy,
    {
        let at = signed_index(index)
            .and_then(|requested| self.position(requested))
            .map_err(|err| {
                ring_debug!("detach_at rejected: {}", err);
                err
            })?;
        let detached = self.unlink_at(at);
        ring_trace!("detached at {}, size is now {}", at, self.size());
        Ok(detached)
    }

    /// Removes the last node and returns it.
    ///
    /// # Errors
    ///
    /// [`RingError::EmptyRing`] if the ring has no nodes.
    pub fn detach(&mut self) -> Result<Detached<T>, RingError> {
        self.detach_at(-1)
    }

    /// Returns the node under the cursor, then advances the cursor to its
    /// successor.
    ///
    /// The cursor wraps around forever; it is not affected by [`RingList::iter`].
    ///
    /// # Errors
    ///
    /// [`RingError::EmptyRing`] if the ring has no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from(['a', 'b']);
    /// assert_eq!(list.next().unwrap().get_value(), &'a');
    /// assert_eq!(list.next().unwrap().get_value(), &'b');
    /// assert_eq!(list.next().unwrap().get_value(), &'a');
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&Node<T>, RingError> {
        let current = self.cursor.ok_or(RingError::EmptyRing)?;
        // SAFETY: the cursor always points to a live node of the ring, which
        // stays alive as long as `self` is borrowed.
        let node = unsafe { &*current.as_ptr() };
        self.cursor = Some(node.next);
        Ok(node)
    }

    /// Returns the node under the cursor without advancing it, or `None` if
    /// the ring is empty.
    pub fn current(&self) -> Option<&Node<T>> {
        // SAFETY: the cursor always points to a live node of the ring.
        self.cursor.map(|cursor| unsafe { &*cursor.as_ptr() })
    }

    /// Returns the position of the cursor in the index order, or `None` if the
    /// ring is empty.
    pub fn cursor_position(&self) -> Option<usize> {
        let cursor = self.cursor?;
        self.index.iter().position(|&node| node == cursor)
    }

    /// Returns the first node, or `None` if the ring is empty.
    pub fn head(&self) -> Option<&Node<T>> {
        // SAFETY: every node in `index` is alive while `self` is borrowed.
        self.index.first().map(|node| unsafe { &*node.as_ptr() })
    }

    /// Returns a reference to the value at position `index`.
    ///
    /// A negative `index` counts from the back, `-1` being the last node.
    ///
    /// # Errors
    ///
    /// Like [`RingList::detach_at`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let list = RingList::from([10, 20, 30]);
    /// assert_eq!(list.get_at(0), Ok(&10));
    /// assert_eq!(list.get_at(-1), Ok(&30));
    /// assert!(list.get_at(3).is_err());
    /// ```
    pub fn get_at<I>(&self, index: I) -> Result<&T, RingError>
    where
        I: TryInto<isize> + Display + Copy,
    {
        let at = self.position(signed_index(index)?)?;
        // SAFETY: every node in `index` is alive while `self` is borrowed.
        Ok(unsafe { &(*self.index[at].as_ptr()).element })
    }

    /// Returns a mutable reference to the value at position `index`.
    ///
    /// # Errors
    ///
    /// Like [`RingList::detach_at`].
    pub fn get_at_mut<I>(&mut self, index: I) -> Result<&mut T, RingError>
    where
        I: TryInto<isize> + Display + Copy,
    {
        let at = self.position(signed_index(index)?)?;
        // SAFETY: every node in `index` is alive, and `self` is borrowed
        // mutably so nothing else reads the node.
        Ok(unsafe { (*self.index[at].as_ptr()).get_value_mut() })
    }

    /// Replaces the value at position `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Like [`RingList::detach_at`].
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from([1, 2]);
    /// assert_eq!(list.set_at(-1, 5), Ok(2));
    /// assert_eq!(list.get_at(1), Ok(&5));
    /// ```
    pub fn set_at<I>(&mut self, index: I, value: T) -> Result<T, RingError>
    where
        I: TryInto<isize> + Display + Copy,
    {
        let at = self.position(signed_index(index)?)?;
        // SAFETY: see `get_at_mut`.
        Ok(unsafe { (*self.index[at].as_ptr()).set_value(value) })
    }

    /// Appends every value of `source`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::new();
    /// list.from_of(vec!["x", "y"]);
    /// list.from_of(Some("z"));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    /// ```
    pub fn from_of<I: IntoIterator<Item = T>>(&mut self, source: I) {
        self.extend(source);
    }

    /// Removes every node. The cursor is reset.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        ring_trace!("clearing {} nodes", self.size());
        self.cursor = None;
        for node in self.index.drain(..) {
            // SAFETY: every node in `index` was allocated as a box and is
            // owned by the list.
            drop(unsafe { Box::from_raw(node.as_ptr()) });
        }
    }

    /// Provides a forward iterator over the values, in index order.
    ///
    /// The iterator is finite and does not move the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from([0, 1, 2]);
    /// list.next().unwrap();
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// assert_eq!(list.current().unwrap().get_value(), &1);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.index)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let mut list = RingList::from([0, 1, 2]);
    /// for value in list.iter_mut() {
    ///     *value += 10;
    /// }
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&self.index)
    }

    /// Calls `handler` on every node, in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let list = RingList::from([1, 2, 3]);
    /// let mut sum = 0;
    /// list.foreach(|node| sum += node.get_value());
    /// assert_eq!(sum, 6);
    /// ```
    pub fn foreach<F>(&self, mut handler: F)
    where
        F: FnMut(&Node<T>),
    {
        for node in &self.index {
            // SAFETY: every node in `index` is alive while `self` is borrowed.
            handler(unsafe { node.as_ref() });
        }
    }

    pub(crate) fn into_nodes(mut self) -> Vec<NonNull<Node<T>>> {
        self.cursor = None;
        std::mem::take(&mut self.index)
    }
}

impl<T: Debug> Debug for RingList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for RingList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RingList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for RingList<T> {}

unsafe impl<T: Sync> Sync for RingList<T> {}

/// Link `node` right after `prev`, taking over `prev`'s old successor.
///
/// It is unsafe because `prev` must be a live node of a well-formed ring and
/// `node` must not belong to any ring.
unsafe fn splice_after<T>(mut prev: NonNull<Node<T>>, mut node: NonNull<Node<T>>) {
    node.as_mut().set_next(prev.as_ref().next);
    prev.as_mut().set_next(node);
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
    }
}

fn signed_index<I>(index: I) -> Result<isize, RingError>
where
    I: TryInto<isize> + Display + Copy,
{
    index.try_into().map_err(|_| {
        let err = RingError::InvalidIndex(index.to_string());
        ring_debug!("{}", err);
        err
    })
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use crate::RingList;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn ring_list_state_machine_test(
            sequential
            1..200
            =>
            RingList<u32>
        );
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        Attach(u32),
        AttachAt(isize, u32),
        Detach,
        DetachAt(isize),
        Next,
    }

    /// Values in index order, plus the position of the cursor.
    #[derive(Clone, Debug, Default)]
    pub struct Model {
        values: Vec<u32>,
        cursor: usize,
    }

    impl Model {
        fn attach_at(&mut self, requested: isize, value: u32) {
            let len = self.values.len() as isize;
            if len == 0 {
                self.values.push(value);
                self.cursor = 0;
                return;
            }
            let at = if requested < 0 { len + requested + 1 } else { requested };
            if !(0..=len).contains(&at) {
                return;
            }
            let at = at as usize;
            self.values.insert(at, value);
            if self.cursor >= at {
                self.cursor += 1;
            }
        }

        fn detach_at(&mut self, requested: isize) {
            let len = self.values.len() as isize;
            let at = if requested < 0 { len + requested } else { requested };
            if !(0..len).contains(&at) {
                return;
            }
            let at = at as usize;
            self.values.remove(at);
            if self.values.is_empty() {
                self.cursor = 0;
            } else if at < self.cursor {
                self.cursor -= 1;
            } else if at == self.cursor {
                self.cursor = at % self.values.len();
            }
        }
    }

    pub struct RingListStateMachine;

    impl ReferenceStateMachine for RingListStateMachine {
        type State = Model;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Model::default()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            // Reach a little past both ends so that rejected indices are covered.
            let bound = state.values.len() as isize + 2;
            prop_oneof![
                2 => any::<u32>().prop_map(Transition::Attach),
                3 => (-bound..=bound, any::<u32>())
                    .prop_map(|(index, value)| Transition::AttachAt(index, value)),
                1 => Just(Transition::Detach),
                2 => (-bound..=bound).prop_map(Transition::DetachAt),
                2 => Just(Transition::Next),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match *transition {
                Transition::Attach(value) => {
                    let len = state.values.len() as isize;
                    state.attach_at(len, value);
                }
                Transition::AttachAt(index, value) => state.attach_at(index, value),
                Transition::Detach => state.detach_at(-1),
                Transition::DetachAt(index) => state.detach_at(index),
                Transition::Next => {
                    if !state.values.is_empty() {
                        state.cursor = (state.cursor + 1) % state.values.len();
                    }
                }
            }
            state
        }
    }

    impl StateMachineTest for RingList<u32> {
        type SystemUnderTest = Self;
        type Reference = RingListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            RingList::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            let size = state.size();
            match transition {
                Transition::Attach(value) => state.attach(value),
                Transition::AttachAt(index, value) => {
                    let result = state.attach_at(index, value);
                    assert_eq!(result.is_ok(), state.size() == size + 1);
                }
                Transition::Detach => {
                    let result = state.detach();
                    assert_eq!(result.is_err(), size == 0);
                }
                Transition::DetachAt(index) => {
                    let result = state.detach_at(index);
                    assert_eq!(result.is_ok(), state.size() + 1 == size);
                }
                Transition::Next => {
                    let expected = state.current().map(|node| *node.get_value());
                    let returned = state.next().ok().map(|node| *node.get_value());
                    assert_eq!(returned, expected);
                }
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            state.check_invariants();
            assert_eq!(state.iter().copied().collect::<Vec<_>>(), ref_state.values);
            let expected_cursor = if ref_state.values.is_empty() {
                None
            } else {
                Some(ref_state.cursor)
            };
            assert_eq!(state.cursor_position(), expected_cursor);
        }
    }
}
