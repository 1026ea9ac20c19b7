// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Creates a [`DynVec`](crate::DynVec) containing the arguments.
///
/// ```rust
/// use dynvec::dynvec;
///
/// let a = dynvec![1, 2, 3];
/// assert_eq!(a, [1, 2, 3]);
/// assert_eq!(a.capacity(), 3);
///
/// let b = dynvec![0u8; 4];
/// assert_eq!(b, [0, 0, 0, 0]);
///
/// let c: dynvec::DynVec<u8> = dynvec![];
/// assert!(c.is_empty());
/// ```
#[macro_export]
macro_rules! dynvec {
    () => {
        $crate::DynVec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynVec::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynVec::from([$($x),+])
    };
}
