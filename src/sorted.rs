use std::cmp::Ordering;

#[derive(Debug)]
struct Node<T> {
  value: T,
  next: Option<Box<Node<T>>>,
}

/// A singly-linked list kept sorted by a caller-supplied comparator.
///
/// Insertion walks from the head to the first element the new value sorts
/// strictly before and splices there, so equal elements keep their
/// insertion order. Cost is O(n) per insert, which is fine for its one job
/// in this crate: it is rebuilt from scratch per eviction pass to rank
/// entries by access time, never maintained across operations.
pub struct SortedList<T, F> {
  head: Option<Box<Node<T>>>,
  len: usize,
  cmp: F,
}

impl<T, F> SortedList<T, F>
where
  F: Fn(&T, &T) -> Ordering,
{
  /// Creates an empty list ordered by `cmp`.
  pub fn new(cmp: F) -> Self {
    Self {
      head: None,
      len: 0,
      cmp,
    }
  }

  /// Inserts `value`, preserving ascending order.
  pub fn insert(&mut self, value: T) {
    self.len += 1;
    let cmp = &self.cmp;

    let mut cursor = &mut self.head;
    while cursor
      .as_ref()
      .map_or(false, |node| cmp(&value, &node.value) != Ordering::Less)
    {
      // The loop condition just saw Some, so this cannot fail.
      cursor = &mut cursor.as_mut().unwrap().next;
    }

    let next = cursor.take();
    *cursor = Some(Box::new(Node { value, next }));
  }

  /// The number of elements in the list.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Iterates the elements in ascending order.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      next: self.head.as_deref(),
    }
  }

  /// The `n` smallest elements, ascending. Fewer if the list is shorter.
  pub fn first_n(&self, n: usize) -> impl Iterator<Item = &T> {
    self.iter().take(n)
  }
}

/// An iterator over a `SortedList`, smallest element first.
pub struct Iter<'a, T> {
  next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.next?;
    self.next = node.next.as_deref();
    Some(&node.value)
  }
}
