//! Structural invariants of the registry state.

use shared_types::{keccak256, Address, U256};

use super::{GlobalConstraintSet, RuleBook};

/// A transfer batch pairs every recipient with exactly one amount.
#[must_use]
pub fn invariant_batch_lengths_match(tos: &[Address], amounts: &[U256]) -> bool {
    tos.len() == amounts.len()
}

/// Every index entry points at a record carrying the same key, and every
/// record is reachable from both indexes.
#[must_use]
pub fn invariant_rule_indexes_consistent(book: &RuleBook) -> bool {
    let names_ok = book.name_entries().all(|(hash, entry)| {
        entry.exists
            && book
                .get(entry.index)
                .is_some_and(|rule| keccak256(rule.name.as_bytes()) == *hash)
    });
    let addresses_ok = book.address_entries().all(|(address, entry)| {
        entry.exists
            && book
                .get(entry.index)
                .is_some_and(|rule| rule.address == *address)
    });
    let reachable = book
        .iter()
        .all(|rule| book.name_index(&rule.name).exists && book.is_rule(&rule.address));

    names_ok && addresses_ok && reachable
}

/// No constraint address appears twice.
#[must_use]
pub fn invariant_constraints_unique(set: &GlobalConstraintSet) -> bool {
    let slice = set.as_slice();
    slice
        .iter()
        .enumerate()
        .all(|(i, c)| !slice[i + 1..].contains(c))
}
