use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
};
use tracing::{debug, trace, warn};

use crate::{
    cursor::{Cursor, CursorMut, Position, RevCursor},
    error::{Corruption, ListError},
    iter::{IntoIter, Iter, IterMut},
    mem::Mem,
};

struct Node<T> {
    data: T,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn init(t: T) -> Self {
        Self {
            data: t,
            prev: 0,
            next: 0,
        }
    }
}

/// A circular doubly linked list.
///
/// Nodes live in a slot arena and link to each other by slot index. `head`
/// anchors traversal: the first element is `head` and the last one is
/// `head.prev`. There is no ghost node, so the end of the sequence is
/// represented by [`Position::END`] rather than by a node.
pub struct CircularList<T> {
    mem: Mem<Node<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self {
            mem: Mem::default(),
            head: None,
            len: 0,
        }
    }
}

impl<T> CircularList<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            mem: Mem::with_capacity(n),
            head: None,
            len: 0,
        }
    }

    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_capacity(slice.len());
        list.extend(slice.iter().cloned());
        list
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn position_of(&self, node_addr: usize) -> Position {
        Position(Some(self.mem.addr(node_addr)))
    }

    fn resolve(&self, pos: Position, op: &'static str) -> Result<Option<usize>, ListError> {
        match pos.0 {
            None => Ok(None),
            Some(addr) => self
                .mem
                .resolve(addr)
                .map(Some)
                .ok_or(ListError::InvalidPosition(op)),
        }
    }

    #[inline]
    pub fn first_position(&self) -> Position {
        match self.head {
            Some(head) => self.position_of(head),
            None => Position::END,
        }
    }

    #[inline]
    pub fn last_position(&self) -> Position {
        match self.head {
            Some(head) => self.position_of(self.mem.get(head).prev),
            None => Position::END,
        }
    }

    pub fn get(&self, pos: Position) -> Result<&T, ListError> {
        match self.resolve(pos, "get")? {
            Some(node_addr) => Ok(&self.mem.get(node_addr).data),
            None => Err(ListError::EndPosition("get")),
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, ListError> {
        match self.resolve(pos, "get_mut")? {
            Some(node_addr) => Ok(&mut self.mem.get_mut(node_addr).data),
            None => Err(ListError::EndPosition("get_mut")),
        }
    }

    /// The position after `pos`. The last element is followed by the end
    /// sentinel, which cannot be advanced.
    pub fn next(&self, pos: Position) -> Result<Position, ListError> {
        let node_addr = self
            .resolve(pos, "next")?
            .ok_or(ListError::EndPosition("next"))?;
        let next = self.mem.get(node_addr).next;
        if Some(next) == self.head {
            Ok(Position::END)
        } else {
            Ok(self.position_of(next))
        }
    }

    /// The position before `pos`. The end sentinel steps back to the last
    /// element and the head steps back to the end sentinel.
    pub fn prev(&self, pos: Position) -> Result<Position, ListError> {
        let node_addr = self.resolve(pos, "prev")?;
        let head = self.head.ok_or(ListError::Empty("prev"))?;
        match node_addr {
            None => Ok(self.position_of(self.mem.get(head).prev)),
            Some(node_addr) if node_addr == head => Ok(Position::END),
            Some(node_addr) => Ok(self.position_of(self.mem.get(node_addr).prev)),
        }
    }

    pub fn front(&self) -> Result<&T, ListError> {
        let head = self.head.ok_or(ListError::Empty("front"))?;
        Ok(&self.mem.get(head).data)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        let head = self.head.ok_or(ListError::Empty("front"))?;
        Ok(&mut self.mem.get_mut(head).data)
    }

    pub fn back(&self) -> Result<&T, ListError> {
        let head = self.head.ok_or(ListError::Empty("back"))?;
        let tail = self.mem.get(head).prev;
        Ok(&self.mem.get(tail).data)
    }

    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        let head = self.head.ok_or(ListError::Empty("back"))?;
        let tail = self.mem.get(head).prev;
        Ok(&mut self.mem.get_mut(tail).data)
    }

    /// Links the detached node `node_addr` right before `ref_node_addr`.
    fn splice_before(&mut self, node_addr: usize, ref_node_addr: usize) {
        let prev = self.mem.get(ref_node_addr).prev;
        self.mem.get_mut(prev).next = node_addr;
        self.mem.get_mut(ref_node_addr).prev = node_addr;
        let node = self.mem.get_mut(node_addr);
        node.prev = prev;
        node.next = ref_node_addr;
        trace!(node_addr, prev, next = ref_node_addr, "splice");
    }

    /// Unlinks `node_addr` from the ring, frees its slot and returns its data.
    /// If it was the head, its successor takes over.
    fn unlink(&mut self, node_addr: usize) -> T {
        let node = self.mem.get(node_addr);
        let (left, right) = (node.prev, node.next);
        if right == node_addr {
            self.head = None;
        } else {
            self.mem.get_mut(left).next = right;
            self.mem.get_mut(right).prev = left;
            if self.head == Some(node_addr) {
                self.head = Some(right);
            }
        }
        self.len -= 1;
        trace!(node_addr, prev = left, next = right, "unlink");
        self.mem.free(node_addr).data
    }

    pub fn push_back(&mut self, t: T) {
        let node_addr = self.mem.intern(Node::init(t));
        match self.head {
            Some(head) => self.splice_before(node_addr, head),
            None => {
                let node = self.mem.get_mut(node_addr);
                node.prev = node_addr;
                node.next = node_addr;
                self.head = Some(node_addr);
            }
        }
        self.len += 1;
    }

    pub fn push_front(&mut self, t: T) {
        self.push_back(t);
        self.head = self.head.map(|head| self.mem.get(head).prev);
    }

    pub fn pop_back(&mut self) -> Result<T, ListError> {
        let head = self.head.ok_or(ListError::Empty("pop_back"))?;
        let tail = self.mem.get(head).prev;
        Ok(self.unlink(tail))
    }

    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let head = self.head.ok_or(ListError::Empty("pop_front"))?;
        Ok(self.unlink(head))
    }

    /// Inserts `t` right before `pos` and returns the position of the new
    /// element. Inserting before the end sentinel appends, and inserting
    /// before the head makes the new element the head.
    ///
    /// On an empty list `pos` is not consulted.
    pub fn insert(&mut self, pos: Position, t: T) -> Result<Position, ListError> {
        let Some(head) = self.head else {
            self.push_back(t);
            return Ok(self.last_position());
        };
        match self.resolve(pos, "insert")? {
            Some(ref_node_addr) => {
                let node_addr = self.mem.intern(Node::init(t));
                self.splice_before(node_addr, ref_node_addr);
                if ref_node_addr == head {
                    self.head = Some(node_addr);
                }
                self.len += 1;
                Ok(self.position_of(node_addr))
            }
            None => {
                self.push_back(t);
                Ok(self.last_position())
            }
        }
    }

    /// Removes the element at `pos` and returns the position that followed
    /// it, which is the end sentinel if `pos` was the last element.
    pub fn erase(&mut self, pos: Position) -> Result<Position, ListError> {
        if self.is_empty() {
            return Err(ListError::Empty("erase"));
        }
        let node_addr = self
            .resolve(pos, "erase")?
            .ok_or(ListError::InvalidPosition("erase"))?;
        let following = self.next(pos)?;
        self.unlink(node_addr);
        Ok(following)
    }

    pub fn clear(&mut self) {
        debug!(len = self.len, "clear");
        while let Some(head) = self.head {
            self.unlink(head);
        }
        debug_assert_eq!(self.mem.live(), 0);
    }

    /// Replaces the contents with `n` copies of `t`.
    pub fn assign(&mut self, n: usize, t: T)
    where
        T: Clone,
    {
        self.clear();
        debug!(n, "assign");
        for _ in 0..n {
            self.push_back(t.clone());
        }
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Copies the list element by element, checking that the ring is
    /// consistent with `len` along the way.
    pub fn try_clone(&self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity(self.len);
        if self.is_empty() {
            return Ok(copy);
        }
        let head = self.head.ok_or_else(|| corrupted(Corruption::MissingHead))?;
        let mut node_addr = head;
        let mut copied = 0;
        loop {
            let node = self
                .mem
                .try_get(node_addr)
                .ok_or_else(|| corrupted(Corruption::BrokenLink { index: node_addr }))?;
            for link in [node.next, node.prev] {
                if self.mem.try_get(link).is_none() {
                    return Err(corrupted(Corruption::BrokenLink { index: link }));
                }
            }
            copy.push_back(node.data.clone());
            copied += 1;
            if copied > self.len {
                return Err(corrupted(Corruption::Overrun { expected: self.len }));
            }
            node_addr = node.next;
            if node_addr == head {
                break;
            }
        }
        if copied != self.len {
            return Err(corrupted(Corruption::CountMismatch {
                expected: self.len,
                found: copied,
            }));
        }
        Ok(copy)
    }

    /// Replaces the contents with a copy of `other`. If copying fails, `self`
    /// is left untouched.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), ListError>
    where
        T: Clone,
    {
        let mut copy = other.try_clone()?;
        debug!(len = copy.len, "assign_from");
        self.swap(&mut copy);
        Ok(())
    }

    pub fn begin(&mut self) -> CursorMut<'_, T> {
        let pos = self.first_position();
        CursorMut::new(self, pos)
    }

    pub fn end(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Position::END)
    }

    pub fn cbegin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.first_position())
    }

    pub fn cend(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::END)
    }

    pub fn rbegin(&mut self) -> RevCursor<CursorMut<'_, T>> {
        RevCursor::new(self.end())
    }

    pub fn rend(&mut self) -> RevCursor<CursorMut<'_, T>> {
        RevCursor::new(self.begin())
    }

    pub fn crbegin(&self) -> RevCursor<Cursor<'_, T>> {
        RevCursor::new(self.cend())
    }

    pub fn crend(&self) -> RevCursor<Cursor<'_, T>> {
        RevCursor::new(self.cbegin())
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Allocates in proportion to `len`, but scans every arena slot once, so
    /// a list that shrank from a much larger size pays for its peak.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let order = self.addrs();
        let refs = self
            .mem
            .select_mut(&order)
            .into_iter()
            .map(|node| &mut node.data)
            .collect();
        IterMut::new(refs)
    }

    /// Slot indices in forward order.
    fn addrs(&self) -> Vec<usize> {
        let mut buf = Vec::with_capacity(self.len);
        let mut node_addr = self.head;
        for _ in 0..self.len {
            let Some(addr) = node_addr else { break };
            buf.push(addr);
            node_addr = Some(self.mem.get(addr).next);
        }
        buf
    }

    #[inline]
    pub(crate) fn head_addr(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub(crate) fn next_addr(&self, node_addr: usize) -> usize {
        self.mem.get(node_addr).next
    }

    #[inline]
    pub(crate) fn prev_addr(&self, node_addr: usize) -> usize {
        self.mem.get(node_addr).prev
    }

    #[inline]
    pub(crate) fn data(&self, node_addr: usize) -> &T {
        &self.mem.get(node_addr).data
    }
}

fn corrupted(corruption: Corruption) -> ListError {
    warn!(%corruption, "corrupted circular list");
    ListError::Corrupted(corruption)
}

impl<T: Clone> Clone for CircularList<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .expect("Circular list structure corrupted.")
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source)
            .expect("Circular list structure corrupted.")
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for CircularList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for CircularList<T> {}

impl<T: PartialOrd> PartialOrd for CircularList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for CircularList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Hash> Hash for CircularList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for t in self {
            t.hash(state);
        }
    }
}

impl<T> Extend<T> for CircularList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|t| self.push_back(t));
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for CircularList<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut list = Self::with_capacity(vec.len());
        list.extend(vec);
        list
    }
}

impl<T> IntoIterator for CircularList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircularList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircularList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
