// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;

use dynvec_raw::RawMemoryError;

use crate::DynVecError;

#[test]
fn test_capacity_overflow_display() {
    let error = DynVecError::from(RawMemoryError::CapacityOverflow);

    insta::assert_snapshot!(error.to_string(), @"storage error: capacity overflow");
}

#[test]
fn test_alloc_failed_display() {
    let layout = Layout::array::<u32>(8).expect("Failed to Layout::array(..)");
    let error = DynVecError::from(RawMemoryError::AllocFailed { layout });

    insta::assert_snapshot!(error.to_string(), @"storage error: memory allocation of 32 bytes failed");
}

#[test]
fn test_source_is_raw_memory_error() {
    use core::error::Error;

    let error = DynVecError::Raw(RawMemoryError::CapacityOverflow);
    let source = error.source().expect("Failed to get source()");

    assert_eq!(source.to_string(), "capacity overflow");
}
