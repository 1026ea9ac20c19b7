// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw, uninitialized element storage.
//!
//! `RawMemory<T>` owns a region of `capacity` slots, each sized and aligned for
//! one `T`. It never constructs or drops a `T`: which slots hold live values is
//! the business of the container built on top of it (see the `dynvec` crate).
//!
//! # Core Guarantees
//!
//! - **Exclusive ownership**: a block is never cloned. Ownership moves with the
//!   value, or explicitly through [`RawMemory::take`] and [`RawMemory::swap`].
//! - **Release without destruction**: dropping a block frees the region and
//!   nothing else.
//! - **Empty means unallocated**: `capacity() == 0` if and only if the block
//!   owns no allocation.
//!
//! # Example
//!
//! ```rust
//! use dynvec_raw::{RawMemory, RawMemoryError};
//!
//! fn example() -> Result<(), RawMemoryError> {
//!     let mut block = RawMemory::<u32>::allocate(4)?;
//!     assert_eq!(block.capacity(), 4);
//!
//!     block.slot_mut(0).write(7);
//!
//!     // SAFETY: slot 0 was written just above.
//!     let value = unsafe { block.slot(0).assume_init_read() };
//!     assert_eq!(value, 7);
//!
//!     // Ownership transfer leaves the source empty.
//!     let moved = block.take();
//!     assert_eq!(moved.capacity(), 4);
//!     assert_eq!(block.capacity(), 0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod raw_memory;

#[cfg(test)]
mod tests;

pub use error::RawMemoryError;
pub use raw_memory::RawMemory;
