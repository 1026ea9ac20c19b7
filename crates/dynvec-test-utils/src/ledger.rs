// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared bookkeeping for [`Tracked`] values.
#[derive(Debug, Default)]
pub struct Ledger {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
    fail_at_clone: Cell<Option<usize>>,
    fail_at_create: Cell<Option<usize>>,
}

impl Ledger {
    /// Creates an unarmed ledger with all counters at zero.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates a tracked value.
    ///
    /// # Panics
    ///
    /// Panics if the ledger was armed with [`Ledger::fail_at_create`] and this
    /// is the armed creation.
    pub fn create(self: &Rc<Self>, value: i32) -> Tracked {
        let n = self.created.get() + 1;

        if self.fail_at_create.get() == Some(n) {
            panic!("injected failure at creation #{n}");
        }

        self.created.set(n);

        Tracked {
            value,
            ledger: Rc::clone(self),
        }
    }

    /// Arms a panic on the `nth` clone (counted over the ledger's lifetime, 1-based).
    pub fn fail_at_clone(&self, nth: usize) {
        self.fail_at_clone.set(Some(nth));
    }

    /// Arms a panic on the `nth` creation (counted over the ledger's lifetime, 1-based).
    pub fn fail_at_create(&self, nth: usize) {
        self.fail_at_create.set(Some(nth));
    }

    /// Removes any armed failure.
    pub fn disarm(&self) {
        self.fail_at_clone.set(None);
        self.fail_at_create.set(None);
    }

    /// Values created through [`Ledger::create`].
    pub fn creations(&self) -> usize {
        self.created.get()
    }

    /// Successful clones.
    pub fn clones(&self) -> usize {
        self.cloned.get()
    }

    /// Values dropped.
    pub fn drops(&self) -> usize {
        self.dropped.get()
    }

    /// Values currently alive.
    pub fn live(&self) -> usize {
        self.created.get() + self.cloned.get() - self.dropped.get()
    }
}

/// A value whose lifetime is recorded in a [`Ledger`].
pub struct Tracked {
    value: i32,
    ledger: Rc<Ledger>,
}

impl Tracked {
    /// The payload.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrites the payload.
    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let n = self.ledger.cloned.get() + 1;

        if self.ledger.fail_at_clone.get() == Some(n) {
            panic!("injected failure at clone #{n}");
        }

        self.ledger.cloned.set(n);

        Self {
            value: self.value,
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.dropped.set(self.ledger.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
