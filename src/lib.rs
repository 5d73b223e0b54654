//! A circular doubly linked list backed by a slot arena.
//!
//! ```
//! use circlist::CircularList;
//!
//! let mut list = CircularList::from_slice(&[2, 3]);
//! list.push_front(1);
//! assert_eq!(list.front(), Ok(&1));
//! assert_eq!(list.back(), Ok(&3));
//!
//! let mut it = list.crbegin();
//! assert_eq!(it.get(), Ok(&3));
//! it.move_next().unwrap();
//! assert_eq!(it.get(), Ok(&2));
//! ```

pub mod clist;
pub mod cursor;
pub mod error;
pub mod iter;
mod mem;

pub use clist::CircularList;
pub use cursor::{Bidirectional, Cursor, CursorMut, Position, RevCursor};
pub use error::{Corruption, ListError};
