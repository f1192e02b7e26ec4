//! A growable contiguous sequence over a pluggable [`Allocator`].
use alloc::alloc::Layout;
use core::{
    fmt,
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    error::ValueError,
    memory::{Allocator, Heap},
};

/// An amortized-doubling dynamic array whose buffer comes from `A`.
///
/// Behaves like a slice through `Deref`. Zero-sized element types never touch
/// the allocator.
///
/// ```
/// use lexjson::Vector;
///
/// let mut v: Vector<i32> = Vector::new();
/// v.push(1);
/// v.emplace_back(2);
/// assert_eq!(v.len(), 2);
/// assert_eq!(v.at(1), Ok(&2));
/// assert!(v.at(2).is_err());
/// ```
pub struct Vector<T, A: Allocator = Heap> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `Vector` owns its elements like `Vec` does.
unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

fn array_layout<T>(cap: usize) -> Layout {
    Layout::array::<T>(cap).unwrap_or_else(|_| panic!("capacity overflow"))
}

impl<T> Vector<T, Heap> {
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Heap)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Heap)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// An empty vector in `alloc`. Nothing is allocated until the first
    /// push.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: if is_zst::<T>() { usize::MAX } else { 0 },
            alloc,
            _marker: PhantomData,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut v = Self::new_in(alloc);
        v.reserve(capacity);
        v
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Makes room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize` or the byte size overflows
    /// `isize`.
    pub fn reserve(&mut self, additional: usize) {
        let required = self
            .len
            .checked_add(additional)
            .unwrap_or_else(|| panic!("capacity overflow"));
        if required <= self.cap {
            return;
        }
        self.grow_to(required.max(self.cap.saturating_mul(2)));
    }

    fn grow_to(&mut self, new_cap: usize) {
        let new_layout = array_layout::<T>(new_cap);
        let new_ptr = self.alloc.allocate(new_layout).cast::<T>();
        if self.cap != 0 {
            // SAFETY: the old buffer holds `len` initialized elements and the
            // new one has room for at least that many; they never overlap.
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                self.alloc
                    .deallocate(self.ptr.cast(), array_layout::<T>(self.cap));
            }
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Appends an element, growing the buffer geometrically when full.
    #[doc(alias = "emplace_back")]
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.reserve(1);
        }
        // SAFETY: `len < cap` after the reserve above.
        unsafe { self.ptr.add(self.len).write(value) };
        self.len += 1;
    }

    /// Same as [`push`](Vector::push).
    pub fn emplace_back(&mut self, value: T) {
        self.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is initialized and is now
        // outside the live range, so it is read exactly once.
        Some(unsafe { self.ptr.add(self.len).read() })
    }

    /// Drops every element and keeps the buffer.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
        self.len = 0;
        // SAFETY: `live` covered the initialized elements; `len` was zeroed
        // first so a panicking destructor cannot cause a double drop.
        unsafe { ptr::drop_in_place(live) };
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// [`ValueError::IndexOutOfRange`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, ValueError> {
        let len = self.len;
        self.get(index)
            .ok_or(ValueError::IndexOutOfRange { index, len })
    }

    /// Mutable variant of [`at`](Vector::at).
    ///
    /// # Errors
    ///
    /// [`ValueError::IndexOutOfRange`] when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ValueError> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(ValueError::IndexOutOfRange { index, len })
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is non-null and aligned, `len` elements are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: Allocator> Vector<T, A> {
    /// Appends a whole slice with one reservation.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.reserve(items.len());
        // SAFETY: room for `items.len()` more was reserved; `items` cannot
        // alias our buffer because we hold `&mut self`.
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), self.ptr.as_ptr().add(self.len), items.len());
        }
        self.len += items.len();
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        if self.cap != 0 && !is_zst::<T>() {
            // SAFETY: the buffer came from `grow_to` with this layout.
            unsafe {
                self.alloc
                    .deallocate(self.ptr.cast(), array_layout::<T>(self.cap));
            }
        }
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: Allocator> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity_in(self.len, self.alloc.clone());
        for item in self.iter() {
            out.push(item.clone());
        }
        out
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T, Heap> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: PartialEq<U>, U, A: Allocator, B: Allocator> PartialEq<Vector<U, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let this = mem::ManuallyDrop::new(self);
        IntoIter {
            ptr: this.ptr,
            cap: this.cap,
            // SAFETY: `this` is never dropped, so the allocator is moved out
            // exactly once.
            alloc: unsafe { ptr::read(&this.alloc) },
            next: 0,
            end: this.len,
        }
    }
}

/// By-value iterator over a [`Vector`].
pub struct IntoIter<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    next: usize,
    end: usize,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next == self.end {
            return None;
        }
        // SAFETY: slots in `next..end` are initialized and not yet moved out.
        let item = unsafe { self.ptr.add(self.next).read() };
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: the remaining slots are initialized; after dropping them the
        // buffer is released with the layout it was allocated with.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr().add(self.next), self.end - self.next);
            self.next = self.end;
            ptr::drop_in_place(rest);
            if self.cap != 0 && !is_zst::<T>() {
                self.alloc
                    .deallocate(self.ptr.cast(), array_layout::<T>(self.cap));
            }
        }
    }
}
