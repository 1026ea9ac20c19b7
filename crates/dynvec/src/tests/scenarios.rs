// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

use dynvec_test_utils::{Ledger, Tracked, panic_message};

use crate::DynVec;

#[test]
fn test_push_three_into_empty() {
    let mut vec = DynVec::new();

    vec.push(1);
    vec.push(2);
    vec.push(3);

    assert_eq!(vec.len(), 3);
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_insert_in_the_middle() {
    let mut vec = DynVec::from([1, 2, 4]);

    vec.insert(2, 3);

    assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn test_erase_in_the_middle() {
    let mut vec = DynVec::from([1, 3, 4]);

    vec.erase(1);

    assert_eq!(vec, [1, 4]);
}

#[test]
fn test_copy_assign_larger_source_grows_destination() {
    let mut destination = DynVec::from([9, 9]);
    let source = DynVec::from([1, 2, 3, 4, 5]);

    destination.clone_from(&source);

    assert_eq!(destination, [1, 2, 3, 4, 5]);
    assert!(destination.capacity() >= 5);
}

#[test]
fn test_copy_assign_smaller_source_reuses_storage() {
    let mut destination = DynVec::from([1, 2, 3, 4, 5]);
    let source = DynVec::from([9, 9]);
    let capacity = destination.capacity();
    let ptr = destination.as_ptr();

    destination.clone_from(&source);

    assert_eq!(destination, [9, 9]);
    assert_eq!(destination.capacity(), capacity);
    assert!(destination.capacity() >= 5);
    assert_eq!(destination.as_ptr(), ptr);
}

#[test]
fn test_failing_copy_during_reallocating_insert_keeps_original() {
    const K: usize = 4;

    let ledger = Ledger::new();
    let prototype = ledger.create(100);

    let mut vec: DynVec<Tracked> = DynVec::with_capacity(K);
    for _ in 0..K {
        vec.push(prototype.clone());
    }
    for (i, item) in vec.iter_mut().enumerate() {
        item.set_value(i as i32);
    }
    assert_eq!(vec.len(), vec.capacity());

    // K copies made so far; the (K + 1)-th raises.
    ledger.fail_at_clone(K + 1);
    let ptr = vec.as_ptr();
    let live_before = ledger.live();

    let result = catch_unwind(AssertUnwindSafe(|| {
        vec.emplace_with(1, || prototype.clone());
    }));

    let payload = result.expect_err("insert should propagate the injected failure");
    assert_eq!(panic_message(&*payload), format!("injected failure at clone #{}", K + 1));

    assert_eq!(vec.len(), K);
    assert_eq!(vec.capacity(), K);
    assert_eq!(vec.as_ptr(), ptr);
    assert_eq!(vec, [0, 1, 2, 3]);
    assert_eq!(ledger.live(), live_before);

    drop(vec);
    drop(prototype);
    assert_eq!(ledger.live(), 0);
}
