use crate::list::RingList;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for RingList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for RingList<T> {}

impl<T: PartialOrd> PartialOrd for RingList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for RingList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// The clone holds the same values, with its cursor at the same position.
impl<T: Clone> Clone for RingList<T> {
    fn clone(&self) -> Self {
        let mut list: RingList<T> = self.iter().cloned().collect();
        if let Some(position) = self.cursor_position() {
            for _ in 0..position {
                let _ = list.next();
            }
        }
        list
    }
}

impl<T: Hash> Hash for RingList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> RingList<T> {
    /// Returns `true` if the ring contains a value equal to `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use psycle::RingList;
    ///
    /// let list = RingList::from([0, 1, 2]);
    /// assert!(list.contains(&0));
    /// assert!(!list.contains(&10));
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }
}

#[cfg(test)]
mod tests {
    use crate::RingList;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn clone_keeps_cursor() {
        let mut list = RingList::from([1, 2, 3]);
        list.next().unwrap();
        list.next().unwrap();
        let mut cloned = list.clone();
        assert_eq!(cloned, list);
        assert_eq!(cloned.cursor_position(), Some(2));
        cloned.check_invariants();
        assert_eq!(cloned.next().unwrap().get_value(), &3);
        assert_eq!(cloned.next().unwrap().get_value(), &1);
        // The source is independent of its clone.
        assert_eq!(list.cursor_position(), Some(2));
    }

    #[test]
    fn equality_ignores_cursor() {
        let mut a = RingList::from([1, 2]);
        let b = RingList::from([1, 2]);
        a.next().unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, RingList::from([2, 1]));
        assert!(RingList::from([1, 2]) < RingList::from([1, 3]));
    }
}
