// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;

use crate::error::RawMemoryError;

#[test]
fn test_capacity_overflow_display() {
    insta::assert_snapshot!(RawMemoryError::CapacityOverflow.to_string(), @"capacity overflow");
}

#[test]
fn test_alloc_failed_display_reports_layout_size() {
    let layout = Layout::array::<u64>(16).expect("Failed to Layout::array(..)");
    let error = RawMemoryError::AllocFailed { layout };

    insta::assert_snapshot!(error.to_string(), @"memory allocation of 128 bytes failed");
}

#[test]
fn test_error_is_core_error() {
    fn takes_error(e: &dyn core::error::Error) -> String {
        e.to_string()
    }

    assert!(takes_error(&RawMemoryError::CapacityOverflow).contains("overflow"));
}
