use crate::error::{Error, Result};
use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

/// A growable contiguous array.
///
/// Capacity doubles (starting from 1) whenever a new element does not fit, so
/// appending is amortized O(1). Inserting or erasing in the middle shifts the
/// tail by one slot.
pub struct Vector<T> {
    /// Slots `[0, len)` are initialized, the rest are not
    buffer: Box<[MaybeUninit<T>]>,
    len: usize,
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Vector {
            buffer: Box::new([]),
            len: 0,
        }
    }

    /// Build a vector of `len` default values, with exactly that capacity
    pub fn with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        let mut vector = Vector::new();
        vector.reserve(len)?;
        for _ in 0..len {
            vector.push_back(T::default())?;
        }
        Ok(vector)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the number of allocated slots
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Return the maximum number of elements a vector could theoretically hold
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / mem::size_of::<T>().max(1)
    }

    /// Bounds-checked access
    pub fn at(&self, pos: usize) -> Result<&T> {
        self.check_bounds(pos)?;
        Ok(unsafe { self.get_unchecked_slot(pos) })
    }

    /// Bounds-checked mutable access
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        self.check_bounds(pos)?;
        Ok(unsafe { &mut *self.buffer.get_unchecked_mut(pos).as_mut_ptr() })
    }

    pub fn front(&self) -> Result<&T> {
        self.first().ok_or(Error::Empty)
    }

    pub fn back(&self) -> Result<&T> {
        self.last().ok_or(Error::Empty)
    }

    pub fn as_slice(&self) -> &[T] {
        // Safe since the first `len` slots are initialized
        unsafe { slice::from_raw_parts(self.buffer.as_ptr() as *const T, self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr() as *mut T, self.len) }
    }

    /// Append a value, doubling the capacity first if the vector is full
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.grow_for(self.len + 1)?;
        unsafe {
            ptr::write(self.buffer.as_mut_ptr().add(self.len), MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last value
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty);
        }
        self.len -= 1;
        // The slot is now outside the initialized zone, so it is read exactly once
        Ok(unsafe { ptr::read(self.buffer.get_unchecked(self.len).as_ptr()) })
    }

    /// Insert `value` at `pos`, shifting everything after it one slot to the right.
    /// `pos` may be equal to `len`, which appends
    pub fn insert(&mut self, pos: usize, value: T) -> Result<()> {
        if pos > self.len {
            return Err(Error::OutOfRange { pos, len: self.len });
        }
        self.grow_for(self.len + 1)?;

        unsafe {
            let p = self.buffer.as_mut_ptr().add(pos);
            // Shift everything over to make space.
            // (Duplicating the `pos`th element into two consecutive places.)
            ptr::copy(p, p.add(1), self.len - pos);
            // Write it in, overwriting the first copy of the `pos`th element.
            ptr::write(p, MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the value at `pos`, shifting the tail one slot to the left
    pub fn erase(&mut self, pos: usize) -> Result<T> {
        self.check_bounds(pos)?;
        unsafe {
            let p = self.buffer.as_mut_ptr().add(pos);
            let value = ptr::read(p).assume_init();
            ptr::copy(p.add(1), p, self.len - pos - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Make room for at least `capacity` elements. Never shrinks
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity > self.capacity() {
            self.reallocate(capacity)?;
        }
        Ok(())
    }

    /// Reallocate so that the capacity is exactly the length
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.capacity() != self.len {
            self.reallocate(self.len)?;
        }
        Ok(())
    }

    /// Drop every element, keeping the allocated capacity
    pub fn clear(&mut self) {
        let len = self.len;
        // Avoid problems if the element drops panic
        self.len = 0;
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(
                self.buffer.as_mut_ptr() as *mut T,
                len,
            ));
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn check_bounds(&self, pos: usize) -> Result<()> {
        if pos < self.len {
            Ok(())
        } else {
            Err(Error::OutOfRange { pos, len: self.len })
        }
    }

    /// Caller guarantees `pos < len`
    unsafe fn get_unchecked_slot(&self, pos: usize) -> &T {
        &*self.buffer.get_unchecked(pos).as_ptr()
    }

    /// Grow the buffer if `required` elements do not fit, doubling the current
    /// capacity (at least 1) until they do
    fn grow_for(&mut self, required: usize) -> Result<()> {
        if required <= self.capacity() {
            return Ok(());
        }
        let mut capacity = self.capacity().max(1);
        while capacity < required {
            capacity = capacity.checked_mul(2).unwrap_or(required);
        }
        self.reallocate(capacity)
    }

    /// Move the live elements into a new buffer of exactly `capacity` slots.
    /// On allocation failure nothing is changed
    fn reallocate(&mut self, capacity: usize) -> Result<()> {
        assert!(capacity >= self.len);
        let mut buffer = Self::allocate(capacity)?;
        log::debug!(
            "reallocating vector buffer from {} to {} slots",
            self.capacity(),
            capacity
        );
        // The old buffer won't drop the moved elements, since they are MaybeUninit
        unsafe {
            ptr::copy_nonoverlapping(self.buffer.as_ptr(), buffer.as_mut_ptr(), self.len);
        }
        mem::swap(&mut self.buffer, &mut buffer);
        Ok(())
    }

    fn allocate(capacity: usize) -> Result<Box<[MaybeUninit<T>]>> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity)?;
        buffer.resize_with(capacity, MaybeUninit::uninit);
        Ok(buffer.into_boxed_slice())
    }
}

/// Infallible interfaces (`Clone`, `FromIterator`) can only give up on
/// allocation failure
fn fatal(error: Error) -> ! {
    panic!("vector allocation failed: {}", error)
}

impl<T> Drop for Vector<T> {
    /// Since MaybeUninit won't drop the wrapped values by itself, the vector is
    /// responsible for dropping the initialized slots
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Vector::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// The copy has the same capacity as the original
    fn clone(&self) -> Self {
        let mut copy = Vector::new();
        if let Err(error) = copy.reserve(self.capacity()) {
            fatal(error);
        }
        for value in self.iter() {
            if let Err(error) = copy.push_back(value.clone()) {
                fatal(error);
            }
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> std::iter::FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Vector::new();
        vector.extend(iter);
        vector
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // The hint is only a guess: pushing still grows the buffer as needed
        if let Err(error) = self.reserve(self.len.saturating_add(lower)) {
            log::debug!("ignoring size hint of {} elements: {}", lower, error);
        }
        for value in iter {
            if let Err(error) = self.push_back(value) {
                fatal(error);
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}
