// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for dynvec crates.
//!
//! [`Ledger`] hands out [`Tracked`] values and counts every creation, clone and
//! drop, so tests can assert that a container neither leaks nor double-drops.
//! A ledger can also be armed to panic on the n-th clone or n-th creation, which
//! is how element-operation failures are injected.
//!
//! ## License
//!
//! GPL-3.0-only

mod ledger;
mod panic;


pub use ledger::{Ledger, Tracked};
pub use panic::panic_message;
