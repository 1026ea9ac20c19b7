// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::handle_alloc_error;
use core::convert::Infallible;
use core::{mem, ptr, slice};

use dynvec_raw::{RawMemory, RawMemoryError};

use crate::error::DynVecError;

/// Test behaviour for injecting failures in `DynVec` growth.
///
/// This is only available with the `test_utils` feature and lets users test
/// how their code handles allocation failure reported by the `try_*` methods.
///
/// The behaviour is sticky - once set, it remains active until changed. The
/// infallible growing methods (`reserve`, `push`, `insert`, ...) treat an
/// injected failure like a real one and call `handle_alloc_error`, which
/// aborts the process; only exercise injection through the `try_*` methods.
/// `shrink_to_fit` never sees an injected failure.
///
/// # Example
///
/// ```rust,ignore
/// // test_utils feature required in dev-dependencies
/// use dynvec::{DynVec, DynVecBehaviour};
///
/// #[cfg(test)]
/// mod tests {
///     use super::*;
///
///     #[test]
///     fn test_handles_growth_failure() {
///         let mut vec = DynVec::<u8>::new();
///         vec.change_behaviour(DynVecBehaviour::FailAtGrow);
///
///         assert!(vec.try_push(1).is_err());
///         assert!(vec.is_empty());
///     }
/// }
/// ```
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DynVecBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every attempt to allocate a new storage block fails with `AllocFailed`.
    FailAtGrow,
}

/// A contiguous, growable array layered on a [`RawMemory`] block.
///
/// `DynVec<T>` owns one storage block and counts how many of its slots hold
/// live values. Slots `[0, len)` are initialized, slots `[len, capacity)` are
/// reserved and uninitialized.
///
/// # Growth
///
/// [`reserve`](DynVec::reserve) grows to exactly the requested capacity.
/// Insertion into a full array doubles the capacity (`0 -> 1 -> 2 -> 4 ...`).
/// Migrating elements into a new block is a bitwise relocation that cannot
/// fail, so a growth either completes or leaves the array untouched.
///
/// # Failure guarantees
///
/// - `try_reserve`, `try_push` and `shrink_to_fit` either succeed or leave the
///   array exactly as it was.
/// - `emplace_with` / `try_emplace_with` construct the new element before any
///   existing element is moved. A panic or error from the constructor leaves
///   the array unchanged.
/// - `clone` drops everything it built if an element clone panics.
/// - `erase`, `truncate`, `clone_from` keep the length consistent if a
///   destructor or clone panics, but offer no rollback.
///
/// # Contract violations
///
/// Out-of-range indices, insertion past `len` and `pop_back` on an empty array
/// panic in every build.
///
/// # Example
///
/// ```rust
/// use dynvec::DynVec;
///
/// let mut vec = DynVec::new();
/// vec.push(1);
/// vec.push(2);
/// vec.push(4);
///
/// vec.insert(2, 3);
/// assert_eq!(vec, [1, 2, 3, 4]);
///
/// vec.erase(1);
/// assert_eq!(vec, [1, 3, 4]);
/// ```
pub struct DynVec<T> {
    data: RawMemory<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: DynVecBehaviour,
}

#[cold]
#[inline(never)]
fn growth_failed(error: DynVecError) -> ! {
    match error {
        DynVecError::Raw(RawMemoryError::AllocFailed { layout }) => handle_alloc_error(layout),
        DynVecError::Raw(RawMemoryError::CapacityOverflow) => panic!("capacity overflow"),
    }
}

impl<T> DynVec<T> {
    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            data: RawMemory::new(),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: DynVecBehaviour::None,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocation failure is fatal.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RawMemory::with_capacity(capacity),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: DynVecBehaviour::None,
        }
    }

    /// Creates an array holding `len` default-constructed elements.
    ///
    /// The capacity is exactly `len`.
    ///
    /// ```rust
    /// use dynvec::DynVec;
    ///
    /// let vec = DynVec::<u32>::with_len(3);
    /// assert_eq!(vec, [0, 0, 0]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(len);
        vec.resize_with(len, T::default);
        vec
    }

    /// Creates an array holding `len` clones of `elem`.
    ///
    /// Backs the `dynvec![elem; n]` form of the [`dynvec!`](crate::dynvec) macro.
    pub fn from_elem(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(len);

        if len == 0 {
            return vec;
        }

        for _ in 1..len {
            vec.push_within_capacity(elem.clone());
        }
        vec.push_within_capacity(elem);

        vec
    }

    /// Changes the failure-injection behaviour.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: DynVecBehaviour) {
        self.behaviour = behaviour;
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the owned storage block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are initialized and the base pointer is aligned and non-null.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [0, len) are initialized and uniquely borrowed through &mut self.
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }

    /// Address of the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Mutable address of the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Exchanges storage and length with `other`. Never fails.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.data.swap(&mut other.data);
        mem::swap(&mut self.len, &mut other.len);
    }

    // =========================================================================
    // Growth
    // =========================================================================

    fn allocate_block(&self, capacity: usize) -> Result<RawMemory<T>, DynVecError> {
        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, DynVecBehaviour::FailAtGrow) {
            let layout = RawMemory::<T>::layout_for(capacity)?;
            return Err(RawMemoryError::AllocFailed { layout }.into());
        }

        let block = RawMemory::allocate(capacity)?;
        Ok(block)
    }

    fn grown_capacity(&self) -> Result<usize, DynVecError> {
        match self.capacity() {
            0 => Ok(1),
            capacity => capacity
                .checked_mul(2)
                .ok_or(DynVecError::Raw(RawMemoryError::CapacityOverflow)),
        }
    }

    /// Moves every live element into `block` and installs it.
    ///
    /// The previous block is freed without dropping anything: its values now
    /// live in `block`.
    fn relocate_into(&mut self, mut block: RawMemory<T>) {
        debug_assert!(block.capacity() >= self.len);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            from = self.capacity(),
            to = block.capacity(),
            len = self.len,
            "relocating storage"
        );

        // SAFETY (PRECONDITIONS ARE MET): both blocks hold at least len slots and are
        // distinct regions; [0, len) of the source is initialized.
        unsafe {
            ptr::copy_nonoverlapping(self.data.as_ptr(), block.as_mut_ptr(), self.len);
        }

        self.data.swap(&mut block);
    }

    fn report(&self, error: DynVecError) -> DynVecError {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %error, capacity = self.capacity(), len = self.len, "growth failed");

        error
    }

    /// Grows the storage to exactly `capacity` slots.
    ///
    /// Does nothing if `capacity <= self.capacity()`: no reallocation, no
    /// element moved. Unlike `Vec::reserve`, the argument is the total
    /// capacity, not an additional amount.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocation failure is fatal.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(error) = self.try_reserve(capacity) {
            growth_failed(error);
        }
    }

    /// Fallible form of [`reserve`](DynVec::reserve).
    ///
    /// # Errors
    ///
    /// Returns [`DynVecError::Raw`] if the new block cannot be allocated. The
    /// array is left unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), DynVecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let block = self.allocate_block(capacity).map_err(|e| self.report(e))?;
        self.relocate_into(block);

        Ok(())
    }

    /// Grows to at least `needed` slots, never less than the doubled capacity.
    ///
    /// Keeps repeated small batches (`Extend`) on the amortized growth curve.
    pub(crate) fn reserve_amortized(&mut self, needed: usize) {
        if needed <= self.capacity() {
            return;
        }

        let capacity = self
            .grown_capacity()
            .map_or(needed, |grown| grown.max(needed));
        self.reserve(capacity);
    }

    /// Reallocates so that the capacity equals the length.
    ///
    /// Shrinking is not growth: an injected `FailAtGrow` does not apply here.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }

        match RawMemory::allocate(self.len) {
            Ok(block) => self.relocate_into(block),
            Err(error) => growth_failed(error.into()),
        }
    }

    /// Resizes the array to `new_len`, filling new slots with `T::default()`.
    ///
    /// Shrinking drops the trailing elements. Growing first reserves exactly
    /// `new_len` slots.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the array to `new_len`, filling new slots with values from `f`.
    ///
    /// If `f` panics, the elements constructed so far stay in the array.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len);

        while self.len < new_len {
            self.push_within_capacity(f());
        }
    }

    /// Drops the elements past `len`. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail_len = self.len - len;

        // SAFETY: [len, self.len) are initialized. The length is lowered first, so
        // a panicking destructor cannot expose dropped slots.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.data.offset_mut(len), tail_len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Writes `value` into the first free slot.
    pub(crate) fn push_within_capacity(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());

        self.data.slot_mut(self.len).write(value);
        self.len += 1;
    }

    /// Appends `value`, doubling the capacity if the array is full.
    pub fn push(&mut self, value: T) {
        self.emplace_back(value);
    }

    /// Appends `value` and returns a reference to it.
    pub fn emplace_back(&mut self, value: T) -> &mut T {
        let index = self.len;
        self.emplace(index, value)
    }

    /// Fallible form of [`emplace_back`](DynVec::emplace_back).
    ///
    /// # Errors
    ///
    /// Returns [`DynVecError::Raw`] if the array is full and cannot grow. The
    /// array is left unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<&mut T, DynVecError> {
        if self.len == self.capacity() {
            let capacity = self.grown_capacity().map_err(|e| self.report(e))?;
            self.try_reserve(capacity)?;
        }

        let index = self.len;
        self.push_within_capacity(value);

        // SAFETY: the slot was written just above.
        Ok(unsafe { self.data.slot_mut(index).assume_init_mut() })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot later.
    ///
    /// Alias of [`emplace`](DynVec::emplace).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, value)
    }

    /// Places `value` at `index`, shifting `[index, len)` one slot later, and
    /// returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace(&mut self, index: usize, value: T) -> &mut T {
        self.emplace_with(index, || value)
    }

    /// Constructs an element with `f` at `index`.
    ///
    /// If the array is full, the new block is allocated first and `f` writes
    /// straight into its target slot there. If `f` panics, the new block is
    /// freed and the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, and propagates panics from `f`.
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_with(index, || Ok::<T, Infallible>(f())) {
            Ok(slot) => slot,
            Err(never) => match never {},
        }
    }

    /// Constructs an element with a fallible `f` at `index`.
    ///
    /// ```rust
    /// use dynvec::DynVec;
    ///
    /// let mut vec = DynVec::from([1, 2]);
    ///
    /// let result = vec.try_emplace_with(1, || "x".parse::<i32>());
    ///
    /// assert!(result.is_err());
    /// assert_eq!(vec, [1, 2]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the error of `f` unchanged. The array is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`; allocation failure is fatal.
    pub fn try_emplace_with<E, F>(&mut self, index: usize, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let len = self.len;
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");

        if len == self.capacity() {
            let block = self
                .grown_capacity()
                .and_then(|capacity| self.allocate_block(capacity))
                .unwrap_or_else(|error| growth_failed(error));

            return self.emplace_reallocating(index, block, f);
        }

        // Built before anything moves, so a failure leaves the array untouched.
        let value = f()?;

        // SAFETY: len < capacity, so slot len is free; ptr::copy handles the overlap
        // of the one-slot shift.
        unsafe {
            let slot = self.data.offset_mut(index);
            if index < len {
                ptr::copy(slot, slot.add(1), len - index);
            }
            ptr::write(slot, value);
            self.len = len + 1;

            Ok(&mut *slot)
        }
    }

    fn emplace_reallocating<E, F>(
        &mut self,
        index: usize,
        mut block: RawMemory<T>,
        f: F,
    ) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        // New element first. If `f` fails, `block` is dropped: storage freed,
        // nothing else disturbed.
        block.slot_mut(index).write(f()?);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            from = self.capacity(),
            to = block.capacity(),
            len = self.len,
            index,
            "reallocating insert"
        );

        // SAFETY (PRECONDITIONS ARE MET): block holds capacity * 2 >= len + 1 slots,
        // prefix and suffix land on either side of `index`, regions are distinct.
        unsafe {
            let src = self.data.as_ptr();
            let dst = block.as_mut_ptr();
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), self.len - index);
        }

        self.data.swap(&mut block);
        self.len += 1;

        // SAFETY: slot `index` was written above and now belongs to self.data.
        Ok(unsafe { self.data.slot_mut(index).assume_init_mut() })
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: slot len was live and is now outside the live range.
        Some(unsafe { self.data.slot(self.len).assume_init_read() })
    }

    /// Drops the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) {
        assert!(self.len != 0, "pop_back on an empty DynVec");

        drop(self.pop());
    }

    /// Removes and returns the element at `index`, shifting `[index + 1, len)`
    /// one slot earlier.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");

        // SAFETY: index < len; the value is read out before its slot is overwritten.
        unsafe {
            let slot = self.data.offset_mut(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;

            value
        }
    }

    /// Drops the element at `index` and closes the gap.
    ///
    /// Returns `index`, which now holds the element that followed the erased
    /// one (or equals `len` if the last element was erased).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes and returns the element at `index`, moving the last element
    /// into its place. O(1), does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "swap_remove index (is {index}) should be < len (is {len})");

        // SAFETY: index < len and len - 1 < len; ptr::copy tolerates index == len - 1.
        unsafe {
            let base = self.data.as_mut_ptr();
            let value = ptr::read(base.add(index));
            ptr::copy(base.add(len - 1), base.add(index), 1);
            self.len = len - 1;

            value
        }
    }

    pub(crate) fn into_raw_parts(self) -> (RawMemory<T>, usize) {
        let mut this = mem::ManuallyDrop::new(self);
        (this.data.take(), this.len)
    }
}

impl<T> Drop for DynVec<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are initialized; the block frees the storage afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_mut_ptr(), self.len));
        }
    }
}

impl<T: Clone> Clone for DynVec<T> {
    /// Builds an independent copy with capacity exactly `self.len()`.
    ///
    /// If an element clone panics, the copies made so far are dropped and the
    /// partial block is freed.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);

        for item in self.as_slice() {
            copy.push_within_capacity(item.clone());
        }

        copy
    }

    /// Copy assignment that reuses the existing storage whenever it is large
    /// enough.
    ///
    /// If `source` does not fit, a full clone is built off to the side and
    /// swapped in, so `self` is untouched until the swap.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }

        let common = self.len.min(source.len);
        self.as_mut_slice()[..common].clone_from_slice(&source.as_slice()[..common]);

        if self.len > source.len {
            self.truncate(source.len);
        } else {
            for item in &source.as_slice()[common..] {
                self.push_within_capacity(item.clone());
            }
        }
    }
}
