//! Fibonacci heap with stable node handles.
//!
//! Nodes live in an arena and refer to each other by index, so the circular
//! sibling rings and parent back-links are plain integers. A [`NodeId`]
//! returned by [`FibHeap::insert`] names the same element until that element
//! is popped, which is what makes [`FibHeap::decrease_key`] usable from the
//! outside: the search keeps one handle per open cell.

use std::fmt;

/// Handle to an element stored in a [`FibHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Errors reported by [`FibHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap was created with a capacity of zero.
    ZeroCapacity,
    /// An insert would exceed the configured bound.
    CapacityExceeded { max: usize },
    /// The handle does not refer to a live element.
    StaleHandle(NodeId),
    /// `decrease_key` was given a key larger than the current one.
    KeyIncreased,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "fibheap: capacity must be positive"),
            Self::CapacityExceeded { max } => {
                write!(f, "fibheap: overflow, capacity of {max} elements exceeded")
            }
            Self::StaleHandle(id) => write!(f, "fibheap: handle {} is not live", id.0),
            Self::KeyIncreased => write!(f, "fibheap: decrease_key called with a larger key"),
        }
    }
}

impl std::error::Error for HeapError {}

struct Slot<K, T> {
    key: K,
    /// `None` once the element has been popped and the slot is free.
    payload: Option<T>,
    degree: usize,
    marked: bool,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
}

/// A min-ordered Fibonacci heap keyed by `K`.
///
/// | Operation | Amortized cost |
/// |---|---|
/// | [`insert`](Self::insert) | O(1) |
/// | [`pop`](Self::pop) | O(log n) |
/// | [`decrease_key`](Self::decrease_key) | O(1) |
///
/// Ties are not broken in insertion order.
pub struct FibHeap<K, T> {
    slots: Vec<Slot<K, T>>,
    free: Vec<usize>,
    min: Option<usize>,
    len: usize,
    max: usize,
    // consolidation scratch, indexed by degree
    degree_buf: Vec<Option<usize>>,
}

impl<K: Ord + Copy, T> FibHeap<K, T> {
    /// Create an empty heap holding at most `max` live elements.
    pub fn with_capacity(max: usize) -> Result<Self, HeapError> {
        if max == 0 {
            return Err(HeapError::ZeroCapacity);
        }
        // ceil(log2(max)) + 2 covers the common case; consolidation grows it
        // if a tree ever reaches a larger degree.
        let log2 = (usize::BITS - (max - 1).leading_zeros()) as usize;
        Ok(Self {
            slots: Vec::new(),
            free: Vec::new(),
            min: None,
            len: 0,
            max,
            degree_buf: vec![None; log2 + 2],
        })
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of live elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max
    }

    /// The minimum key and its payload, without removing them.
    pub fn peek(&self) -> Option<(&K, &T)> {
        let s = &self.slots[self.min?];
        Some((&s.key, s.payload.as_ref()?))
    }

    /// Current key of a live element.
    pub fn key(&self, id: NodeId) -> Option<K> {
        let s = self.slots.get(id.0)?;
        s.payload.as_ref().map(|_| s.key)
    }

    /// Payload of a live element.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0)?.payload.as_ref()
    }

    /// Mutable payload of a live element. Changing the payload never moves
    /// the element; use [`decrease_key`](Self::decrease_key) for that.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.payload.as_mut()
    }

    /// Add an element as a new singleton root.
    pub fn insert(&mut self, key: K, payload: T) -> Result<NodeId, HeapError> {
        if self.len >= self.max {
            return Err(HeapError::CapacityExceeded { max: self.max });
        }
        let slot = Slot {
            key,
            payload: Some(payload),
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: 0,
            right: 0,
        };
        let n = match self.free.pop() {
            Some(i) => {
                self.slots[i] = slot;
                i
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.slots[n].left = n;
        self.slots[n].right = n;

        match self.min {
            None => self.min = Some(n),
            Some(m) => {
                self.splice(m, n);
                if key < self.slots[m].key {
                    self.min = Some(n);
                }
            }
        }
        self.len += 1;
        Ok(NodeId(n))
    }

    /// Remove and return the element with the smallest key.
    pub fn pop(&mut self) -> Option<(K, T)> {
        let z = self.min?;

        // Promote every child of z to the root ring.
        let children = self.ring(self.slots[z].child);
        for c in children {
            let s = &mut self.slots[c];
            s.parent = None;
            s.left = c;
            s.right = c;
            self.splice(z, c);
        }
        self.slots[z].child = None;
        self.slots[z].degree = 0;

        if self.slots[z].right == z {
            self.min = None;
        } else {
            self.min = Some(self.slots[z].right);
            self.unlink(z);
            self.consolidate();
        }

        self.len -= 1;
        self.free.push(z);
        let key = self.slots[z].key;
        self.slots[z].payload.take().map(|payload| (key, payload))
    }

    /// Lower the key of a live element to `key`.
    ///
    /// The element is cut from its parent when heap order is violated, and
    /// marked ancestors are cut in cascade.
    pub fn decrease_key(&mut self, id: NodeId, key: K) -> Result<(), HeapError> {
        let x = id.0;
        match self.slots.get(x) {
            Some(s) if s.payload.is_some() => {
                if key > s.key {
                    return Err(HeapError::KeyIncreased);
                }
            }
            _ => return Err(HeapError::StaleHandle(id)),
        }
        self.slots[x].key = key;

        if let Some(y) = self.slots[x].parent {
            if key < self.slots[y].key {
                self.cut(x, y);
                self.cascading_cut(y);
            }
        }
        if let Some(m) = self.min {
            if key < self.slots[m].key {
                self.min = Some(x);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Ring plumbing
    // -----------------------------------------------------------------------

    /// Insert singleton `n` to the left of `anchor` in anchor's ring.
    fn splice(&mut self, anchor: usize, n: usize) {
        let left = self.slots[anchor].left;
        self.slots[n].left = left;
        self.slots[n].right = anchor;
        self.slots[left].right = n;
        self.slots[anchor].left = n;
    }

    /// Take `n` out of its ring, leaving it a singleton.
    fn unlink(&mut self, n: usize) {
        let (l, r) = (self.slots[n].left, self.slots[n].right);
        self.slots[l].right = r;
        self.slots[r].left = l;
        self.slots[n].left = n;
        self.slots[n].right = n;
    }

    /// Collect the members of the ring starting at `start`.
    fn ring(&self, start: Option<usize>) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(s) = start {
            let mut cur = s;
            loop {
                out.push(cur);
                cur = self.slots[cur].right;
                if cur == s {
                    break;
                }
            }
        }
        out
    }

    /// Make root `y` a child of root `x`.
    fn link(&mut self, y: usize, x: usize) {
        self.unlink(y);
        self.slots[y].parent = Some(x);
        match self.slots[x].child {
            None => self.slots[x].child = Some(y),
            Some(c) => self.splice(c, y),
        }
        self.slots[x].degree += 1;
        self.slots[y].marked = false;
    }

    fn consolidate(&mut self) {
        let roots = self.ring(self.min);
        for b in self.degree_buf.iter_mut() {
            *b = None;
        }

        for w in roots {
            let mut x = w;
            let mut d = self.slots[x].degree;
            loop {
                if d >= self.degree_buf.len() {
                    self.degree_buf.resize(d + 1, None);
                }
                let Some(y) = self.degree_buf[d].take() else {
                    break;
                };
                let (root, child) = if self.slots[y].key < self.slots[x].key {
                    (y, x)
                } else {
                    (x, y)
                };
                self.link(child, root);
                x = root;
                d += 1;
            }
            if d >= self.degree_buf.len() {
                self.degree_buf.resize(d + 1, None);
            }
            self.degree_buf[d] = Some(x);
        }

        self.min = None;
        for r in self.degree_buf.iter().flatten().copied() {
            match self.min {
                Some(m) if self.slots[m].key <= self.slots[r].key => {}
                _ => self.min = Some(r),
            }
        }
    }

    /// Move child `x` of `y` to the root ring.
    fn cut(&mut self, x: usize, y: usize) {
        if self.slots[y].child == Some(x) {
            let next = self.slots[x].right;
            self.slots[y].child = if next == x { None } else { Some(next) };
        }
        self.unlink(x);
        self.slots[y].degree -= 1;
        self.slots[x].parent = None;
        self.slots[x].marked = false;
        if let Some(m) = self.min {
            self.splice(m, x);
        }
    }

    fn cascading_cut(&mut self, mut y: usize) {
        while let Some(z) = self.slots[y].parent {
            if !self.slots[y].marked {
                self.slots[y].marked = true;
                return;
            }
            self.cut(y, z);
            y = z;
        }
    }
}

impl<K, T> fmt::Debug for FibHeap<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibHeap")
            .field("len", &self.len)
            .field("max", &self.max)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::HashMap;

    fn drain<K: Ord + Copy, T>(h: &mut FibHeap<K, T>) -> Vec<K> {
        let mut out = Vec::new();
        while let Some((k, _)) = h.pop() {
            out.push(k);
        }
        out
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            FibHeap::<i32, ()>::with_capacity(0).unwrap_err(),
            HeapError::ZeroCapacity
        );
    }

    #[test]
    fn empty_heap_pops_none() {
        let mut h: FibHeap<i32, &str> = FibHeap::with_capacity(4).unwrap();
        assert!(h.is_empty());
        assert!(h.peek().is_none());
        assert!(h.pop().is_none());
    }

    #[test]
    fn pops_in_key_order() {
        let mut h = FibHeap::with_capacity(16).unwrap();
        for k in [7, 3, 9, 1, 4, 4, 8, 2] {
            h.insert(k, k * 10).unwrap();
        }
        assert_eq!(h.len(), 8);
        assert_eq!(h.peek(), Some((&1, &10)));
        assert_eq!(drain(&mut h), vec![1, 2, 3, 4, 4, 7, 8, 9]);
        assert!(h.is_empty());
    }

    #[test]
    fn capacity_exceeded_is_reported() {
        let mut h = FibHeap::with_capacity(2).unwrap();
        h.insert(1, ()).unwrap();
        h.insert(2, ()).unwrap();
        assert_eq!(
            h.insert(3, ()).unwrap_err(),
            HeapError::CapacityExceeded { max: 2 }
        );
        // Popping frees room again.
        h.pop();
        assert!(h.insert(3, ()).is_ok());
    }

    #[test]
    fn single_element_round_trip() {
        let mut h = FibHeap::with_capacity(1).unwrap();
        h.insert(5, "only").unwrap();
        assert_eq!(h.pop(), Some((5, "only")));
        assert!(h.pop().is_none());
        h.insert(6, "again").unwrap();
        assert_eq!(h.pop(), Some((6, "again")));
    }

    #[test]
    fn decrease_key_moves_to_front() {
        let mut h = FibHeap::with_capacity(8).unwrap();
        let ids: Vec<_> = (0..6).map(|k| h.insert(10 + k, k).unwrap()).collect();
        // Pop once so the remaining roots get consolidated into trees.
        assert_eq!(h.pop(), Some((10, 0)));
        h.decrease_key(ids[5], 1).unwrap();
        assert_eq!(h.key(ids[5]), Some(1));
        assert_eq!(h.pop(), Some((1, 5)));
        assert_eq!(drain(&mut h), vec![11, 12, 13, 14]);
    }

    #[test]
    fn cascading_cuts_keep_order() {
        let mut h = FibHeap::with_capacity(64).unwrap();
        let ids: Vec<_> = (0..33).map(|k| h.insert(k * 2, k).unwrap()).collect();
        h.pop();
        // Cut a sequence of deep children so parents get marked and cut.
        for (n, &id) in ids.iter().skip(1).rev().step_by(3).enumerate() {
            h.decrease_key(id, -(n as i32) - 1).unwrap();
        }
        let keys = drain(&mut h);
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 32);
    }

    #[test]
    fn decrease_key_errors() {
        let mut h = FibHeap::with_capacity(4).unwrap();
        let a = h.insert(5, 'a').unwrap();
        assert_eq!(h.decrease_key(a, 6), Err(HeapError::KeyIncreased));
        assert_eq!(h.decrease_key(a, 5), Ok(()));
        h.pop();
        assert_eq!(h.decrease_key(a, 1), Err(HeapError::StaleHandle(a)));
        assert!(h.get(a).is_none());
    }

    #[test]
    fn payload_mutation_through_handle() {
        let mut h = FibHeap::with_capacity(4).unwrap();
        let a = h.insert(3, String::from("x")).unwrap();
        h.insert(1, String::from("y")).unwrap();
        h.get_mut(a).unwrap().push('!');
        assert_eq!(h.get(a).map(String::as_str), Some("x!"));
        h.pop();
        assert_eq!(h.pop(), Some((3, String::from("x!"))));
    }

    #[test]
    fn randomized_against_reference() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let mut h = FibHeap::with_capacity(256).unwrap();
            // tag -> (key, handle)
            let mut live: HashMap<u32, (i32, NodeId)> = HashMap::new();
            let mut next_tag = 0u32;

            for _ in 0..600 {
                match rng.random_range(0..10) {
                    0..=4 if h.len() < h.capacity() => {
                        let key = rng.random_range(-500..500);
                        let id = h.insert(key, next_tag).unwrap();
                        live.insert(next_tag, (key, id));
                        next_tag += 1;
                    }
                    5..=6 if !live.is_empty() => {
                        let tags: Vec<u32> = live.keys().copied().collect();
                        let tag = tags[rng.random_range(0..tags.len())];
                        let (key, id) = live[&tag];
                        let new_key = key - rng.random_range(0..50);
                        h.decrease_key(id, new_key).unwrap();
                        live.insert(tag, (new_key, id));
                    }
                    _ => {
                        let expected = live.values().map(|&(k, _)| k).min();
                        match h.pop() {
                            Some((key, tag)) => {
                                assert_eq!(Some(key), expected);
                                assert_eq!(live.remove(&tag).map(|(k, _)| k), Some(key));
                            }
                            None => assert!(expected.is_none()),
                        }
                    }
                }
                assert_eq!(h.len(), live.len());
            }

            let mut rest: Vec<i32> = live.values().map(|&(k, _)| k).collect();
            rest.sort();
            assert_eq!(drain(&mut h), rest);
        }
    }
}
