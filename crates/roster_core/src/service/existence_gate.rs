//! Existence precondition for update/delete.
//!
//! # Responsibility
//! - Confirm a roster row exists by primary key before it is mutated.
//!
//! # Invariants
//! - Fails closed: a store failure is logged once and reported as "absent".
//! - Never retries.
//!
//! Callers cannot tell a missing row from a failed lookup; both read `false`.

use crate::model::roster::RecordKey;
use crate::repo::roster_repo::{RosterStore, RosterTable};
use log::error;

/// Primary-key existence check over a store session.
pub struct ExistenceGate<'s, S: RosterStore> {
    store: &'s S,
}

impl<'s, S: RosterStore> ExistenceGate<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Returns `true` only when a row of `R` with `key` was found.
    ///
    /// # Side effects
    /// - Emits one `existence_check` error event when the lookup fails.
    pub fn exists<R: RosterTable>(&self, key: &RecordKey) -> bool {
        match self.store.get_by_key::<R>(key) {
            Ok(found) => found.is_some(),
            Err(err) => {
                error!(
                    "event=existence_check module=service status=error table={} key={} error={}",
                    R::TABLE,
                    key,
                    err
                );
                false
            }
        }
    }
}
