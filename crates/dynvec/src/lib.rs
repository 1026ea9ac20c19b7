// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contiguous, growable array with strong failure guarantees.
//!
//! `DynVec<T>` is built from two layers:
//!
//! - a [`RawMemory<T>`](dynvec_raw::RawMemory) block that owns uninitialized
//!   storage for `capacity` elements and never constructs or drops them, and
//! - the array itself, which tracks how many of those slots hold live values
//!   and implements growth, insertion, erasure and copy policy on top.
//!
//! # Core Guarantees
//!
//! - **Amortized growth**: inserting into a full array doubles its capacity.
//! - **Build new, then swap**: reallocation constructs the new state off to the
//!   side and only discards the old block once the new one is complete.
//! - **Construct before move**: a new element is constructed before any
//!   existing element is touched, so a failing constructor (panic or `Err`)
//!   leaves the array exactly as it was.
//! - **Storage reuse on copy assignment**: `clone_from` reallocates only when
//!   the source does not fit in the current capacity.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use dynvec::DynVec;
//!
//! let mut vec = DynVec::new();
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//!
//! assert_eq!(vec.len(), 3);
//! assert_eq!(vec, [1, 2, 3]);
//!
//! // reserve() takes the total capacity and is a no-op when it already fits.
//! vec.reserve(2);
//! assert_eq!(vec.capacity(), 4);
//! ```
//!
//! # Example: Failing Construction
//!
//! ```rust
//! use dynvec::DynVec;
//!
//! let mut vec = DynVec::from([10u16, 20]);
//! assert_eq!(vec.capacity(), 2);
//!
//! // Full array: this insert would reallocate, but the value fails to build.
//! let result = vec.try_emplace_with(0, || u16::try_from(70_000u32));
//!
//! assert!(result.is_err());
//! assert_eq!(vec, [10, 20]);
//! assert_eq!(vec.capacity(), 2);
//! ```
//!
//! # Features
//!
//! - `tracing`: emits structured `tracing` events on every reallocation and on
//!   reported growth failures.
//! - `test_utils`: exposes [`DynVecBehaviour`] to inject growth failures.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod dyn_vec;
mod error;
mod impls;
mod into_iter;
mod macros;

#[cfg(test)]
mod tests;

pub use dyn_vec::DynVec;
pub use error::DynVecError;
pub use into_iter::IntoIter;

#[cfg(any(test, feature = "test_utils"))]
pub use dyn_vec::DynVecBehaviour;
