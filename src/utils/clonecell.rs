use std::{
    cell::UnsafeCell,
    mem,
    rc::{Rc, Weak},
};

/// A cell whose contents can be cloned out without a `RefCell` borrow.
pub struct CloneCell<T: UnsafeCellCloneSafe> {
    data: UnsafeCell<T>,
}

impl<T: UnsafeCellCloneSafe> CloneCell<T> {
    pub const fn new(t: T) -> Self {
        Self {
            data: UnsafeCell::new(t),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: `clone` cannot reach this cell, see `UnsafeCellCloneSafe`.
        unsafe { (*self.data.get()).clone() }
    }

    /// Replaces the contents and returns the previous value.
    #[inline(always)]
    pub fn set(&self, t: T) -> T {
        // SAFETY: no reference into the cell outlives any method call.
        unsafe { mem::replace(&mut *self.data.get(), t) }
    }

    #[inline(always)]
    pub fn take(&self) -> T
    where
        T: Default,
    {
        self.set(T::default())
    }
}

impl<T: Default + UnsafeCellCloneSafe> Default for CloneCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// # Safety
///
/// `clone` must not access the `CloneCell` the value is stored in.
pub unsafe trait UnsafeCellCloneSafe: Clone {}

unsafe impl<T: UnsafeCellCloneSafe> UnsafeCellCloneSafe for Option<T> {}

unsafe impl<T: ?Sized> UnsafeCellCloneSafe for Rc<T> {}

unsafe impl<T: ?Sized> UnsafeCellCloneSafe for Weak<T> {}
