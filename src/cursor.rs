use std::fmt;

use crate::{clist::CircularList, error::ListError, mem::Addr};

/// A detached position in a [`CircularList`]: either one of its nodes or the
/// end sentinel, one past the last element.
///
/// Positions are plain values. They stay valid while the node they denote is
/// alive and resolve to [`ListError::InvalidPosition`] once it is erased, even
/// if its slot has been reused since. Slot generations are 64-bit, so a
/// stale position could only alias a new element after 2^64 reuses of one
/// slot. Positions are only meaningful for the list that produced them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) Option<Addr>);

impl Position {
    pub const END: Position = Position(None);

    #[inline]
    pub fn is_end(self) -> bool {
        self.0.is_none()
    }
}

/// Stepping in both directions. Implemented by the forward cursors so that
/// [`RevCursor`] can run them backwards.
pub trait Bidirectional {
    fn position(&self) -> Position;

    fn move_next(&mut self) -> Result<(), ListError>;

    fn move_prev(&mut self) -> Result<(), ListError>;
}

/// Read-only forward cursor.
pub struct Cursor<'a, T> {
    list: &'a CircularList<T>,
    pos: Position,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a CircularList<T>, pos: Position) -> Self {
        Self { list, pos }
    }

    #[inline]
    pub fn get(&self) -> Result<&'a T, ListError> {
        self.list.get(self.pos)
    }
}

impl<T> Bidirectional for Cursor<'_, T> {
    #[inline]
    fn position(&self) -> Position {
        self.pos
    }

    fn move_next(&mut self) -> Result<(), ListError> {
        self.pos = self.list.next(self.pos)?;
        Ok(())
    }

    fn move_prev(&mut self) -> Result<(), ListError> {
        self.pos = self.list.prev(self.pos)?;
        Ok(())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.pos).finish()
    }
}

/// Forward cursor with mutable access to the elements it visits.
pub struct CursorMut<'a, T> {
    list: &'a mut CircularList<T>,
    pos: Position,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a mut CircularList<T>, pos: Position) -> Self {
        Self { list, pos }
    }

    #[inline]
    pub fn get(&self) -> Result<&T, ListError> {
        self.list.get(self.pos)
    }

    #[inline]
    pub fn get_mut(&mut self) -> Result<&mut T, ListError> {
        self.list.get_mut(self.pos)
    }

    /// A read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.pos)
    }
}

impl<T> Bidirectional for CursorMut<'_, T> {
    #[inline]
    fn position(&self) -> Position {
        self.pos
    }

    fn move_next(&mut self) -> Result<(), ListError> {
        self.pos = self.list.next(self.pos)?;
        Ok(())
    }

    fn move_prev(&mut self) -> Result<(), ListError> {
        self.pos = self.list.prev(self.pos)?;
        Ok(())
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.pos).finish()
    }
}

/// Runs a forward cursor backwards.
///
/// A reverse cursor at base position `p` denotes the element just before `p`,
/// so `rbegin` wraps `end` and `rend` wraps `begin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevCursor<C> {
    base: C,
}

impl<C: Bidirectional> RevCursor<C> {
    #[inline]
    pub fn new(base: C) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &C {
        &self.base
    }

    #[inline]
    pub fn into_base(self) -> C {
        self.base
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.base.position()
    }

    #[inline]
    pub fn move_next(&mut self) -> Result<(), ListError> {
        self.base.move_prev()
    }

    #[inline]
    pub fn move_prev(&mut self) -> Result<(), ListError> {
        self.base.move_next()
    }
}

impl<'a, T> RevCursor<Cursor<'a, T>> {
    pub fn get(&self) -> Result<&'a T, ListError> {
        let list = self.base.list;
        list.get(list.prev(self.base.pos)?)
    }
}

impl<T> RevCursor<CursorMut<'_, T>> {
    pub fn get(&self) -> Result<&T, ListError> {
        let pos = self.base.list.prev(self.base.pos)?;
        self.base.list.get(pos)
    }

    pub fn get_mut(&mut self) -> Result<&mut T, ListError> {
        let pos = self.base.list.prev(self.base.pos)?;
        self.base.list.get_mut(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bidirectional, Position};
    use crate::{clist::CircularList, error::ListError};

    fn abc() -> CircularList<char> {
        CircularList::from_slice(&['a', 'b', 'c'])
    }

    #[test]
    fn test_forward() {
        let list = abc();
        let mut it = list.cbegin();
        assert_eq!(it.get(), Ok(&'a'));
        it.move_next().unwrap();
        assert_eq!(it.get(), Ok(&'b'));
        it.move_next().unwrap();
        assert_eq!(it.get(), Ok(&'c'));
        it.move_next().unwrap();
        assert_eq!(it, list.cend());
        assert_eq!(it.get(), Err(ListError::EndPosition("get")));
        assert!(it.move_next().unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_backward_from_end() {
        let list = abc();
        let mut it = list.cend();
        it.move_prev().unwrap();
        assert_eq!(it.get(), Ok(&'c'));
        it.move_prev().unwrap();
        it.move_prev().unwrap();
        assert_eq!(it.get(), Ok(&'a'));
        assert_eq!(it, list.cbegin());

        // Stepping back from the head closes the cycle at the end sentinel.
        it.move_prev().unwrap();
        assert_eq!(it, list.cend());
        it.move_prev().unwrap();
        assert_eq!(it.get(), Ok(&'c'));
    }

    #[test]
    fn test_backward_without_list() {
        let list = CircularList::<u8>::default();
        let mut it = list.cend();
        assert_eq!(it.move_prev(), Err(ListError::Empty("prev")));
    }

    #[test]
    fn test_reverse() {
        let list = abc();
        let mut rit = list.crbegin();
        let mut seen = vec![];
        while rit != list.crend() {
            seen.push(*rit.get().unwrap());
            rit.move_next().unwrap();
        }
        assert_eq!(seen, vec!['c', 'b', 'a']);
        assert!(rit.get().unwrap_err().is_out_of_range());

        rit.move_prev().unwrap();
        assert_eq!(rit.get(), Ok(&'a'));
    }

    #[test]
    fn test_reverse_past_rbegin() {
        let list = abc();
        let mut rit = list.crbegin();
        assert_eq!(rit.move_prev(), Err(ListError::EndPosition("next")));
    }

    #[test]
    fn test_mutable_cursors() {
        let mut list = abc();
        {
            let mut it = list.begin();
            *it.get_mut().unwrap() = 'x';
            it.move_next().unwrap();
            assert_eq!(it.as_cursor().get(), Ok(&'b'));
        }
        {
            let mut rit = list.rbegin();
            *rit.get_mut().unwrap() = 'z';
            rit.move_next().unwrap();
            assert_eq!(rit.get(), Ok(&'b'));
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!['x', 'b', 'z']);
    }

    #[test]
    fn test_empty_begin_is_end() {
        let mut list = CircularList::<i32>::default();
        let begin = list.begin().position();
        let end = list.end().position();
        assert_eq!(begin, end);
        assert_eq!(list.cbegin(), list.cend());
        let rbegin = list.rbegin().position();
        let rend = list.rend().position();
        assert_eq!(rbegin, rend);
        assert_eq!(list.crbegin(), list.crend());
        assert_eq!(list.cbegin().position(), Position::END);
    }

    #[test]
    fn test_reverse_base() {
        let mut list = abc();
        let rbegin = list.rbegin().into_base().position();
        assert!(rbegin.is_end());

        let rit = list.crend();
        assert_eq!(rit.base(), &list.cbegin());
        assert_eq!(rit.base().get(), Ok(&'a'));
        assert!(!rit.position().is_end());

        let mut rit = list.crbegin();
        rit.move_next().unwrap();
        assert_eq!(rit.into_base().get(), Ok(&'c'));
    }

    #[test]
    fn test_equality_is_node_identity() {
        let list = CircularList::from_slice(&[7, 7]);
        let first = list.cbegin();
        let mut second = list.cbegin();
        second.move_next().unwrap();
        assert_eq!(first.get(), second.get());
        assert_ne!(first, second);
    }
}
