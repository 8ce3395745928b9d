//! Row-height invalidation shared between the card list and its cells.
//!
//! The list owns a [`RowUpdates`] behind `Rc<RefCell<_>>` and hands each
//! visible cell a [`HostLink`], a non-owning handle. A cell whose link no
//! longer upgrades is detached from any live list.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Shared handle owned by the list.
pub type SharedRowUpdates = Rc<RefCell<RowUpdates>>;

/// Non-owning handle held by a cell.
pub type HostLink = Weak<RefCell<RowUpdates>>;

/// Batches row-height invalidations.
///
/// Rows invalidated between [`begin_updates`](Self::begin_updates) and the
/// matching [`end_updates`](Self::end_updates) are committed together, so a
/// row's growth and its content change land in the same layout pass.
/// Transactions nest; only the outermost `end_updates` commits.
#[derive(Debug, Default)]
pub struct RowUpdates {
    depth: usize,
    pending: BTreeSet<usize>,
    committed: BTreeSet<usize>,
    transactions: u64,
}

impl RowUpdates {
    /// Creates a shared instance for a list to own.
    #[must_use]
    pub fn shared() -> SharedRowUpdates {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Opens a transaction.
    pub fn begin_updates(&mut self) {
        self.depth += 1;
    }

    /// Closes a transaction, committing its rows when it is the outermost one.
    pub fn end_updates(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if !self.in_transaction() {
            self.committed.append(&mut self.pending);
            self.transactions += 1;
        }
    }

    /// Marks a row's height as stale.
    pub fn invalidate_row(&mut self, row: usize) {
        if self.in_transaction() {
            self.pending.insert(row);
        } else {
            self.committed.insert(row);
        }
    }

    /// Whether a transaction is open.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.depth > 0
    }

    /// Number of committed transactions so far.
    #[must_use]
    pub const fn transactions(&self) -> u64 {
        self.transactions
    }

    /// Takes the committed rows awaiting re-measurement.
    pub fn take_invalidated(&mut self) -> BTreeSet<usize> {
        std::mem::take(&mut self.committed)
    }
}
