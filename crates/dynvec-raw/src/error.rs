// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynvec-raw.

use core::alloc::Layout;

use thiserror::Error;

/// Errors that can occur while allocating a [`RawMemory`](crate::RawMemory).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum RawMemoryError {
    /// The requested slot count does not fit in a valid `Layout`.
    ///
    /// Raised when `capacity * size_of::<T>()` overflows `isize::MAX`.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator refused the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed {
        /// Layout that was requested from the allocator.
        layout: Layout,
    },
}
