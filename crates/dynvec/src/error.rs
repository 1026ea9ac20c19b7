// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynvec.

use thiserror::Error;

use dynvec_raw::RawMemoryError;

/// Errors reported by the fallible `DynVec` operations.
///
/// Whenever one of these is returned the container is exactly as it was
/// before the call.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum DynVecError {
    /// Growing the storage block failed.
    #[error("storage error: {0}")]
    Raw(#[from] RawMemoryError),
}
