use std::{
    cell::Cell,
    ops::{Add, Sub},
};

/// A `Cell` for counters.
#[derive(Default)]
pub struct NumCell<T: Copy> {
    n: Cell<T>,
}

impl<T: Copy> NumCell<T> {
    pub const fn new(n: T) -> Self {
        Self { n: Cell::new(n) }
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        self.n.get()
    }

    #[inline(always)]
    pub fn set(&self, n: T) {
        self.n.set(n);
    }

    /// Adds `n` and returns the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, n: T) -> T
    where
        T: Add<Output = T>,
    {
        let prev = self.n.get();
        self.n.set(prev + n);
        prev
    }

    /// Subtracts `n` and returns the previous value.
    #[inline(always)]
    pub fn fetch_sub(&self, n: T) -> T
    where
        T: Sub<Output = T>,
    {
        let prev = self.n.get();
        self.n.set(prev - n);
        prev
    }
}
