use std::iter::FusedIterator;

use crate::clist::CircularList;

/// Borrowing iterator over a [`CircularList`], front to back.
pub struct Iter<'a, T> {
    list: &'a CircularList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a CircularList<T>) -> Self {
        let front = list.head_addr();
        Self {
            list,
            front,
            back: front.map(|head| list.prev_addr(head)),
            remaining: list.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_addr = self.front?;
        self.remaining -= 1;
        self.front = Some(self.list.next_addr(node_addr));
        Some(self.list.data(node_addr))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_addr = self.back?;
        self.remaining -= 1;
        self.back = Some(self.list.prev_addr(node_addr));
        Some(self.list.data(node_addr))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over a [`CircularList`], front to back.
pub struct IterMut<'a, T> {
    refs: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(refs: Vec<&'a mut T>) -> Self {
        Self {
            refs: refs.into_iter(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.refs.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.refs.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.refs.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that drains a [`CircularList`].
pub struct IntoIter<T> {
    list: CircularList<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: CircularList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::clist::CircularList;

    #[test]
    fn test_iter_both_ends() {
        let clist = CircularList::from_slice(&[1, 2, 3, 4]);
        let mut iter = clist.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(clist.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_iter_empty() {
        let clist = CircularList::<u8>::new();
        assert_eq!(clist.iter().next(), None);
        assert_eq!(clist.iter().next_back(), None);
    }

    #[test]
    fn test_iter_mut_follows_list_order() {
        let mut clist = CircularList::new();
        clist.push_back(2);
        clist.push_back(3);
        clist.push_front(1);
        clist.pop_back().unwrap();
        clist.push_back(4);
        for (i, t) in clist.iter_mut().enumerate() {
            *t *= 10 + i as i32;
        }
        assert_eq!(clist.iter().copied().collect::<Vec<_>>(), vec![10, 22, 48]);
        assert_eq!((&mut clist).into_iter().next_back(), Some(&mut 48));
    }

    #[test]
    fn test_into_iter() {
        let clist: CircularList<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut into_iter = clist.into_iter();
        assert_eq!(into_iter.len(), 3);
        assert_eq!(into_iter.next_back().as_deref(), Some("c"));
        assert_eq!(into_iter.collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
