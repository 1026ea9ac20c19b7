// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, dealloc, handle_alloc_error};
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;

use crate::error::RawMemoryError;

/// Owner of `capacity` uninitialized slots of `T`.
///
/// The block tracks total slot count only. It has no notion of which slots
/// hold live values, so it never drops a `T`; the owner of element lifetimes
/// must have dropped every live value before the block goes away.
///
/// An empty block (`capacity() == 0`) owns no allocation and points at
/// `NonNull::dangling()`. Blocks for zero-sized `T` never allocate either, and
/// report whatever capacity was requested.
///
/// # Example
///
/// ```rust
/// use dynvec_raw::RawMemory;
///
/// let mut a = RawMemory::<u64>::with_capacity(2);
/// let mut b = RawMemory::<u64>::new();
///
/// a.swap(&mut b);
///
/// assert_eq!(a.capacity(), 0);
/// assert_eq!(b.capacity(), 2);
/// ```
pub struct RawMemory<T> {
    buffer: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// Safety: RawMemory uniquely owns its slots, same as Vec<T>.
unsafe impl<T: Send> Send for RawMemory<T> {}
unsafe impl<T: Sync> Sync for RawMemory<T> {}

impl<T> RawMemory<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates an empty block. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buffer: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a block of `capacity` uninitialized slots.
    ///
    /// A request for zero slots is legal and allocates nothing.
    ///
    /// # Errors
    ///
    /// - [`RawMemoryError::CapacityOverflow`] if the byte size of the region
    ///   does not fit in `isize::MAX`.
    /// - [`RawMemoryError::AllocFailed`] if the global allocator returns null.
    ///
    /// On error no memory is owned by anyone.
    pub fn allocate(capacity: usize) -> Result<Self, RawMemoryError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        if Self::IS_ZST {
            return Ok(Self {
                buffer: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        let layout = Self::layout_for(capacity)?;

        // SAFETY: layout has non-zero size (capacity > 0 and T is not a ZST).
        let ptr = unsafe { alloc(layout) };
        let buffer = NonNull::new(ptr.cast::<T>()).ok_or(RawMemoryError::AllocFailed { layout })?;

        Ok(Self {
            buffer,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Allocates a block of `capacity` slots, treating failure as fatal.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` when the layout overflows. Allocator
    /// refusal is routed to [`handle_alloc_error`].
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::allocate(capacity) {
            Ok(block) => block,
            Err(RawMemoryError::AllocFailed { layout }) => handle_alloc_error(layout),
            Err(RawMemoryError::CapacityOverflow) => panic!("capacity overflow"),
        }
    }

    /// Computes the layout of a region holding `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`RawMemoryError::CapacityOverflow`] if the size overflows.
    pub fn layout_for(capacity: usize) -> Result<Layout, RawMemoryError> {
        Layout::array::<T>(capacity).map_err(|_| RawMemoryError::CapacityOverflow)
    }

    /// Number of slots in the region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the block owns a heap region.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && !Self::IS_ZST
    }

    /// Base address of the region.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// Mutable base address of the region.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_ptr()
    }

    /// Address of slot `offset`.
    ///
    /// The one-past-the-last address (`offset == capacity`) is legal and marks
    /// an empty append point.
    ///
    /// # Safety
    ///
    /// `offset <= self.capacity()`. Checked only in debug builds.
    #[inline]
    pub unsafe fn offset(&self, offset: usize) -> *const T {
        debug_assert!(offset <= self.capacity, "offset {offset} past capacity {}", self.capacity);

        // SAFETY (PRECONDITIONS ARE MET): offset stays within the allocation or one past it.
        unsafe { self.buffer.as_ptr().add(offset) }
    }

    /// Mutable address of slot `offset`.
    ///
    /// # Safety
    ///
    /// `offset <= self.capacity()`. Checked only in debug builds.
    #[inline]
    pub unsafe fn offset_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.capacity, "offset {offset} past capacity {}", self.capacity);

        // SAFETY (PRECONDITIONS ARE MET): offset stays within the allocation or one past it.
        unsafe { self.buffer.as_ptr().add(offset) }
    }

    /// Slot `index` as possibly-uninitialized storage.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.capacity()`.
    #[inline]
    pub fn slot(&self, index: usize) -> &MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot index {index} out of range for capacity {}",
            self.capacity
        );

        // SAFETY: index < capacity, and MaybeUninit<T> has the layout of T.
        unsafe { &*self.buffer.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Slot `index` as mutable, possibly-uninitialized storage.
    ///
    /// Writing through the returned reference overwrites the slot without
    /// dropping whatever it held.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.capacity()`.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot index {index} out of range for capacity {}",
            self.capacity
        );

        // SAFETY: index < capacity, and MaybeUninit<T> has the layout of T.
        unsafe { &mut *self.buffer.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Exchanges regions and capacities with `other`. Never fails.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buffer, &mut other.buffer);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the region out, leaving `self` empty.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::new();
        taken.swap(self);
        taken
    }
}

impl<T> Drop for RawMemory<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }

        debug_assert!(Self::layout_for(self.capacity).is_ok());

        // SAFETY: `allocate` computed this same layout successfully before
        // handing out an allocated block, and the capacity never changes after.
        let layout = unsafe { Self::layout_for(self.capacity).unwrap_unchecked() };

        // SAFETY: buffer was returned by `alloc` with exactly this layout.
        unsafe { dealloc(self.buffer.as_ptr().cast::<u8>(), layout) };
    }
}

impl<T> Default for RawMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawMemory")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
