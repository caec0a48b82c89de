//! Fixed-capacity entity pools.
//!
//! Appends cycle through a bounded slot array: once the pool is full, each
//! new entity silently overwrites the oldest slot. Nothing is ever removed;
//! dead entities keep their slot (flagged deleted) until recycled.

/// Ring-style pool with stable slot order.
#[derive(Debug, Clone)]
pub struct EntityRing<T> {
    slots: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T> EntityRing<T> {
    /// `capacity` is the fixed slot count and must be nonzero.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Insert at the cursor, overwriting the oldest entry when full.
    pub fn push(&mut self, item: T) {
        if self.cursor < self.slots.len() {
            self.slots[self.cursor] = item;
        } else {
            self.slots.push(item);
        }
        self.cursor += 1;
        if self.cursor >= self.capacity {
            self.cursor = 0;
        }
    }

    /// Occupied slot count, at most `capacity`.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Iterate occupied slots in slot order, oldest-first until the first
    /// overwrite, plain slot order after.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }
}
