// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::iter::FusedIterator;
use core::{fmt, ptr, slice};

use dynvec_raw::RawMemory;

use crate::dyn_vec::DynVec;

/// Owning iterator over the elements of a [`DynVec`].
///
/// Elements not yet yielded are dropped with the iterator, then the storage
/// block is freed.
pub struct IntoIter<T> {
    data: RawMemory<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) are initialized and not yet yielded.
        unsafe { slice::from_raw_parts(self.data.offset(self.start), self.end - self.start) }
    }

    /// Remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [start, end) are initialized and not yet yielded.
        unsafe { slice::from_raw_parts_mut(self.data.offset_mut(self.start), self.end - self.start) }
    }
}

impl<T> IntoIterator for DynVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (data, len) = self.into_raw_parts();

        IntoIter { data, start: 0, end: len }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;
        self.start += 1;

        // SAFETY: index was in [start, end), so it is live; it is now outside the range.
        Some(unsafe { self.data.slot(index).assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;

        // SAFETY: end - 1 was in [start, end), so it is live; it is now outside the range.
        Some(unsafe { self.data.slot(self.end).assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.as_mut_slice() as *mut [T];

        // SAFETY: the remaining slots are live and never read again.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
