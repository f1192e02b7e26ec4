//! Allocation strategies shared by [`Vector`](crate::Vector),
//! [`Text`](crate::Text) and [`Value`](crate::Value).
//!
//! Two strategies ship with the crate:
//!
//! - [`Heap`] forwards every request to the global allocator.
//! - [`Arena`] hands out memory from a list of growing chunks and frees
//!   nothing until it is dropped or [`reset`](Arena::reset). Parse trees made
//!   of many short-lived nodes share one bulk region this way.
//!
//! ```
//! use lexjson::{Arena, Vector};
//!
//! let arena = Arena::with_capacity(256);
//! let mut items = Vector::new_in(&arena);
//! items.push(1_u32);
//! items.push(2);
//! assert_eq!(&items[..], &[1, 2]);
//! assert!(arena.allocated_bytes() >= 8);
//! ```
use alloc::{
    alloc::{Layout, handle_alloc_error},
    vec,
    vec::Vec,
};
use core::{cell::RefCell, fmt, ptr::NonNull};

/// Size of the first chunk of [`Arena::new`].
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

const CHUNK_ALIGN: usize = 16;

/// A source of raw memory.
///
/// # Safety
///
/// Implementors must return memory that fits `layout` and stays valid until it
/// is passed back to [`deallocate`](Allocator::deallocate) on this allocator
/// (or a clone of it), or until the allocator and all its clones are gone.
/// `allocate` never returns a dangling pointer for a non-zero size: it either
/// succeeds or diverges through [`handle_alloc_error`].
pub unsafe trait Allocator: Clone {
    /// Allocates memory for `layout`. Zero-sized layouts get a well-aligned
    /// dangling pointer.
    fn allocate(&self, layout: Layout) -> NonNull<u8>;

    /// Releases memory obtained from [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

fn dangling(layout: Layout) -> NonNull<u8> {
    NonNull::new(core::ptr::without_provenance_mut(layout.align())).unwrap_or(NonNull::dangling())
}

/// The process-wide global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

unsafe impl Allocator for Heap {
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        if layout.size() == 0 {
            return dangling(layout);
        }
        // SAFETY: the layout has a non-zero size.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: guaranteed by the caller.
            unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}

struct Chunk {
    base: NonNull<u8>,
    cap: usize,
    used: usize,
}

fn chunk_layout(cap: usize) -> Layout {
    Layout::from_size_align(cap, CHUNK_ALIGN).unwrap_or_else(|_| panic!("arena chunk too large"))
}

impl Chunk {
    fn new(cap: usize) -> Self {
        let layout = chunk_layout(cap);
        // SAFETY: `cap` is at least CHUNK_ALIGN, never zero.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        let base = NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout));
        Self { base, cap, used: 0 }
    }

    fn bump(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.base.as_ptr().addr();
        let aligned = (base + self.used).checked_next_multiple_of(layout.align())?;
        let offset = aligned - base;
        let end = offset.checked_add(layout.size())?;
        if end > self.cap {
            return None;
        }
        self.used = end;
        // SAFETY: `offset + size <= cap`, so the pointer stays inside this chunk.
        Some(unsafe { self.base.add(offset) })
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        // SAFETY: `base` was allocated in `Chunk::new` with this exact layout.
        unsafe { alloc::alloc::dealloc(self.base.as_ptr(), chunk_layout(self.cap)) };
    }
}

/// A bump arena made of growing chunks.
///
/// Allocation moves a cursor forward in the newest chunk. When a request does
/// not fit, a new chunk of at least twice the previous size is added.
/// Deallocation is a no-op; every chunk is returned to the heap when the arena
/// is dropped.
///
/// The arena uses interior mutability and is therefore not `Sync`: share it
/// within one thread through `&Arena`, which implements [`Allocator`].
pub struct Arena {
    chunks: RefCell<Vec<Chunk>>,
}

// SAFETY: the chunks are uniquely owned by the arena, moving it to another
// thread moves the whole region with it.
unsafe impl Send for Arena {}

impl Arena {
    /// Creates an arena whose first chunk holds [`DEFAULT_CHUNK_SIZE`] bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHUNK_SIZE)
    }

    /// Creates an arena whose first chunk holds at least `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: RefCell::new(vec![Chunk::new(capacity.max(CHUNK_ALIGN))]),
        }
    }

    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.borrow().len()
    }

    /// Bytes handed out so far, alignment padding included.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.chunks.borrow().iter().map(|c| c.used).sum()
    }

    /// Total bytes reserved across all chunks.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chunks.borrow().iter().map(|c| c.cap).sum()
    }

    /// Frees every chunk except the largest and rewinds it, so the arena can
    /// back another parse without returning to the heap.
    pub fn reset(&mut self) {
        let chunks = self.chunks.get_mut();
        let largest = chunks
            .iter()
            .enumerate()
            .max_by_key(|(_, c)| c.cap)
            .map(|(i, _)| i);
        if let Some(largest) = largest {
            let mut keep = chunks.swap_remove(largest);
            chunks.clear();
            keep.used = 0;
            chunks.push(keep);
        }
    }

    fn bump(&self, layout: Layout) -> NonNull<u8> {
        let mut chunks = self.chunks.borrow_mut();
        if let Some(ptr) = chunks.last_mut().and_then(|c| c.bump(layout)) {
            return ptr;
        }
        let previous = chunks.last().map_or(0, |c| c.cap);
        let needed = layout
            .size()
            .checked_add(layout.align())
            .unwrap_or_else(|| panic!("arena allocation too large"));
        let cap = previous.saturating_mul(2).max(needed);
        log::debug!("arena: adding chunk #{} of {cap} bytes", chunks.len() + 1);
        let mut chunk = Chunk::new(cap);
        let ptr = chunk.bump(layout).unwrap_or_else(|| handle_alloc_error(layout));
        chunks.push(chunk);
        ptr
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("chunks", &self.chunk_count())
            .field("allocated", &self.allocated_bytes())
            .field("capacity", &self.capacity())
            .finish()
    }
}

unsafe impl Allocator for &Arena {
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        if layout.size() == 0 {
            return dangling(layout);
        }
        self.bump(layout)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_round_trip() {
        let layout = Layout::from_size_align(24, 8).unwrap();
        let ptr = Heap.allocate(layout);
        assert_eq!(ptr.as_ptr().addr() % 8, 0);
        unsafe { Heap.deallocate(ptr, layout) };
    }

    #[test]
    fn zero_sized_requests_are_aligned_and_free() {
        let arena = Arena::with_capacity(64);
        let layout = Layout::from_size_align(0, 32).unwrap();
        let ptr = (&arena).allocate(layout);
        assert_eq!(ptr.as_ptr().addr() % 32, 0);
        assert_eq!(arena.allocated_bytes(), 0);
    }

    #[test]
    fn arena_respects_alignment() {
        let arena = Arena::with_capacity(256);
        let a = (&arena).allocate(Layout::from_size_align(3, 1).unwrap());
        let b = (&arena).allocate(Layout::from_size_align(8, 8).unwrap());
        assert_eq!(b.as_ptr().addr() % 8, 0);
        assert!(b.as_ptr().addr() >= a.as_ptr().addr() + 3);
        assert_eq!(arena.chunk_count(), 1);
    }

    #[test]
    fn arena_grows_by_doubling() {
        let arena = Arena::with_capacity(64);
        for _ in 0..4 {
            (&arena).allocate(Layout::from_size_align(48, 8).unwrap());
        }
        assert!(arena.chunk_count() >= 3);
        assert!(arena.capacity() >= 64 + 128 + 256);
    }

    #[test]
    fn oversized_request_gets_its_own_chunk() {
        let arena = Arena::with_capacity(64);
        (&arena).allocate(Layout::from_size_align(4096, 16).unwrap());
        assert_eq!(arena.chunk_count(), 2);
        assert!(arena.capacity() >= 64 + 4096);
    }

    #[test]
    fn reset_keeps_the_largest_chunk() {
        let mut arena = Arena::with_capacity(64);
        (&arena).allocate(Layout::from_size_align(1000, 8).unwrap());
        (&arena).allocate(Layout::from_size_align(5000, 8).unwrap());
        let largest = {
            let chunks = arena.chunks.borrow();
            chunks.iter().map(|c| c.cap).max().unwrap()
        };
        arena.reset();
        assert_eq!(arena.chunk_count(), 1);
        assert_eq!(arena.capacity(), largest);
        assert_eq!(arena.allocated_bytes(), 0);
    }
}
