//! Cross-cycle deduplication and batch ordering.
//!
//! The upstream query has no resumable cursor, so consecutive poll windows
//! overlap and records near the window edge recur verbatim. The dedup set —
//! the identity keys of every record seen in the previous cycle — is threaded
//! through the orchestration loop as a value: passed in, replaced wholesale
//! on every completed cycle, never merged. Only adjacent-cycle duplicates are
//! suppressed by design.

use std::collections::HashSet;

use crate::core::event_record::AuditRecord;

/// Identity keys of every record seen in one cycle.
pub type DedupSet = HashSet<i64>;

/// Result of deduplicating one batch against the prior cycle's set.
#[derive(Debug)]
pub struct DedupOutcome {
    /// Records whose identity key was not in the prior set.
    pub fresh: Vec<AuditRecord>,
    /// Identity keys of *all* records in the batch — emitted and suppressed
    /// alike — so edge records recurring next cycle are recognized again.
    pub replacement: DedupSet,
}

/// Drop records already emitted last cycle and build the replacement set.
pub fn dedup_batch(batch: Vec<AuditRecord>, prior: &DedupSet) -> DedupOutcome {
    let mut replacement = DedupSet::with_capacity(batch.len());
    let mut fresh = Vec::with_capacity(batch.len());

    for record in batch {
        let key = record.identity_key();
        replacement.insert(key);
        if !prior.contains(&key) {
            fresh.push(record);
        }
    }

    DedupOutcome { fresh, replacement }
}

/// Stable sort ascending by identity key. Duplicate keys are not expected
/// within one batch; stability preserves discovery order if they occur.
pub fn order_batch(batch: &mut [AuditRecord]) {
    batch.sort_by_key(AuditRecord::identity_key);
}
