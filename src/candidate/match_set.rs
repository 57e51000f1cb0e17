//! Bounded, ascending-sorted top-K container for match candidates.
//!
//! The set fills by appending until it reaches capacity, then sorts once.
//! After that, each improving insert evicts the worst entry and places the
//! new one by binary search, costing O(log K) comparisons plus an O(K) shift.
//! K is expected to be small, so this beats a heap while keeping the exact
//! ascending order the output layout needs.

/// Score paired with the item it was measured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored<T> {
    /// Dissimilarity score; lower is better.
    pub score: u64,
    /// Payload (typically a patch reference).
    pub item: T,
}

/// Fixed-capacity set of the lowest-scoring items seen so far.
#[derive(Clone, Debug)]
pub struct MatchSet<T> {
    capacity: usize,
    items: Vec<Scored<T>>,
    sorted: bool,
}

impl<T> MatchSet<T> {
    /// Creates an empty set holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
            sorted: true,
        }
    }

    /// Returns the maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of retained items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` once the set holds `capacity` items.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Returns `true` if the contents are currently in ascending score order.
    ///
    /// A partially filled set is provisionally unsorted until it fills up or
    /// is finalized with [`MatchSet::into_sorted`].
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Returns the worst retained score once the set is full.
    pub fn worst_score(&self) -> Option<u64> {
        if self.is_full() {
            self.items.last().map(|entry| entry.score)
        } else {
            None
        }
    }

    /// Offers `(score, item)` to the set. Returns `true` if it was retained.
    pub fn insert(&mut self, score: u64, item: T) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if self.items.len() < self.capacity {
            self.items.push(Scored { score, item });
            self.sorted = self.items.len() == 1;
            if self.items.len() == self.capacity {
                self.items.sort_by_key(|entry| entry.score);
                self.sorted = true;
            }
            return true;
        }

        let worst = match self.items.last() {
            Some(entry) => entry.score,
            None => return false,
        };
        if score >= worst {
            return false;
        }

        self.items.pop();
        let idx = self.items.partition_point(|entry| entry.score < score);
        self.items.insert(idx, Scored { score, item });
        true
    }

    /// Returns the retained entries in their current order.
    pub fn as_slice(&self) -> &[Scored<T>] {
        &self.items
    }

    /// Consumes the set and returns its entries sorted by ascending score.
    pub fn into_sorted(mut self) -> Vec<Scored<T>> {
        if !self.sorted {
            self.items.sort_by_key(|entry| entry.score);
        }
        self.items
    }
}
