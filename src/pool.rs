//! Scratch buffer pools used while building machines.
//!
//! A builder rents one buffer for its state table and gives it back
//! exactly once, when it is built or dropped.

use std::cell::{Cell, RefCell};

/// Source of reusable buffers.
pub trait BufferPool<T> {
    /// An empty buffer with room for at least `len` elements.
    fn rent(&self, len: usize) -> Vec<T>;

    /// Take a buffer back. The pool may keep it for later rentals.
    fn give_back(&self, buffer: Vec<T>);
}

/// Pool that allocates on every rental and drops returned buffers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapPool;

impl<T> BufferPool<T> for HeapPool {
    fn rent(&self, len: usize) -> Vec<T> {
        Vec::with_capacity(len)
    }

    fn give_back(&self, _buffer: Vec<T>) {}
}

/// Pool that keeps returned buffers for reuse.
///
/// Buffers are cleared when they come back, so nothing they held outlives
/// the rental. Single-threaded, like the machines it serves.
#[derive(Debug)]
pub struct RecyclingPool<T> {
    free: RefCell<Vec<Vec<T>>>,
    rented: Cell<usize>,
    returned: Cell<usize>,
}

impl<T> RecyclingPool<T> {
    pub fn new() -> Self {
        Self {
            free: RefCell::new(Vec::new()),
            rented: Cell::new(0),
            returned: Cell::new(0),
        }
    }

    /// Total rentals so far.
    pub fn rented(&self) -> usize {
        self.rented.get()
    }

    /// Total returns so far.
    pub fn returned(&self) -> usize {
        self.returned.get()
    }

    /// Buffers currently held for reuse.
    pub fn idle(&self) -> usize {
        self.free.borrow().len()
    }
}

impl<T> Default for RecyclingPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BufferPool<T> for RecyclingPool<T> {
    fn rent(&self, len: usize) -> Vec<T> {
        self.rented.set(self.rented.get() + 1);
        let mut free = self.free.borrow_mut();
        match free.iter().position(|buffer| buffer.capacity() >= len) {
            Some(at) => free.swap_remove(at),
            None => Vec::with_capacity(len),
        }
    }

    fn give_back(&self, mut buffer: Vec<T>) {
        self.returned.set(self.returned.get() + 1);
        buffer.clear();
        self.free.borrow_mut().push(buffer);
    }
}
