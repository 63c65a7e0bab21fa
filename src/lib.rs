//! This crate provides a circular singly-linked list, the "psycle", with
//! positional insertion and removal, Python-style negative indexing and a
//! persistent cursor that wraps around forever.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use psycle::RingList;
//!
//! let mut list = RingList::new();
//! list.attach(1);
//! list.attach(2);
//! list.attach(3);
//! assert_eq!(list.size(), 3);
//!
//! // The cursor walks the ring and never runs out.
//! assert_eq!(list.next().unwrap().get_value(), &1);
//! assert_eq!(list.next().unwrap().get_value(), &2);
//! assert_eq!(list.next().unwrap().get_value(), &3);
//! assert_eq!(list.next().unwrap().get_value(), &1);
//!
//! // Removing a node hands it back to the caller.
//! let detached = list.detach_at(1).unwrap();
//! assert_eq!(detached.get_value(), &2);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```
//!
//! # Memory Layout
//!
//! ```text
//!   index  ┌────────┬────────┬────────┐
//!          │   0    │   1    │   2    │
//!          └───┬────┴───┬────┴───┬────┘
//!              ↓        ↓        ↓
//!          ╔═══════╗ ╔═══════╗ ╔═══════╗
//!       ┌→ ║ value ║ ║ value ║ ║ value ║
//!       │  ║ next  ║→║ next  ║→║ next  ║ ─┐
//!       │  ╚═══════╝ ╚═══════╝ ╚═══════╝  │
//!       └─────────────────────────────────┘
//!              ↑
//!           cursor
//! ```
//!
//! Each node is allocated on the heap and owned by the `index` buffer, which
//! keeps the ring order for *O*(1) positional reads. The `next` links are
//! followed by the cursor only. A ring with a single node links the node to
//! itself; an empty ring has neither nodes nor cursor.
//!
//! # Iteration
//!
//! [`RingList::iter`], [`RingList::iter_mut`] and `into_iter` go through the
//! values in index order, like a `Vec`. They are finite, restartable and do not
//! move the cursor. [`RingList::next`] is the never-ending traversal.
//!
//! # Errors
//!
//! Every positional operation returns a [`RingError`] instead of panicking,
//! and leaves the list untouched when it does.
//!
//! # Features
//!
//! - `logging` (default): emit `log` records on structural changes;
//! - `color` (default): color the separators of the `Display` output.
//!
//! [`RingList`]: crate::RingList
//! [`RingError`]: crate::RingError

#[macro_use]
mod macros;

#[doc(inline)]
pub use error::RingError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{Detached, Node, Quoted, RingList};

pub mod error;
pub mod list;
pub mod style;
