//! One full engine pass: raw console text in, ordered filtered records out.
//!
//! The pipeline is purely synchronous and owns no state: the prior cycle's
//! dedup set comes in by reference and a full replacement set goes out. A
//! chunk that cannot become a record — missing layout tokens, missing
//! identity key, or an integer field that will not parse — is skipped and
//! reported in [`CycleOutput::skipped`]; it never aborts the rest of the
//! batch.

use crate::core::dedup::{dedup_batch, order_batch, DedupOutcome, DedupSet};
use crate::core::event_record::{AuditRecord, EventLogEntry, WinEvent};
use crate::core::field_map::apply_fields;
use crate::core::filter::AllowList;
use crate::core::sections::{parse_key_values, parse_message_section};
use crate::core::splitter::{
    decompose_legacy, decompose_modern, split_records, strip_payload, LayoutVariant,
};
use crate::util::error::{AuditRelayError, Result};

/// A chunk the pipeline dropped, with its position in the split sequence and
/// the reason, so callers can identify exactly which raw chunk failed.
#[derive(Debug)]
pub struct SkippedChunk {
    /// Zero-based index of the chunk within the split payload.
    pub index: usize,
    /// Why the chunk did not become a record.
    pub reason: AuditRelayError,
}

/// Everything one cycle produces.
#[derive(Debug)]
pub struct CycleOutput {
    /// Deduplicated, ordered, allow-list-filtered records, ready to forward.
    pub records: Vec<AuditRecord>,
    /// Identity keys of all records parsed this cycle. Replaces the prior
    /// set wholesale; retain it only for a completed cycle.
    pub replacement: DedupSet,
    /// Chunks dropped during parsing, with reasons.
    pub skipped: Vec<SkippedChunk>,
}

/// Run one engine cycle over a raw console text block.
///
/// Flow: strip banner/tail → split into record chunks → parse each chunk
/// (message section, key/value section, schema mapping) → dedup against
/// `prior` → order ascending by identity key → apply the allow-list.
///
/// An empty block, or an empty payload after boundary stripping, yields an
/// empty batch with an empty replacement set — not an error.
pub fn run_cycle(
    raw: &str,
    variant: LayoutVariant,
    prior: &DedupSet,
    allow: &AllowList,
) -> CycleOutput {
    let mut skipped = Vec::new();
    let mut batch = Vec::new();

    if !raw.is_empty() {
        let payload = strip_payload(raw, variant.banner(), variant.tail());
        for (index, chunk) in split_records(payload, variant.anchor()).iter().enumerate() {
            match parse_chunk(chunk, variant) {
                Ok(record) => batch.push(record),
                Err(reason) => {
                    tracing::warn!(chunk = index, %reason, "dropping malformed record chunk");
                    skipped.push(SkippedChunk { index, reason });
                }
            }
        }
    }

    let DedupOutcome {
        mut fresh,
        replacement,
    } = dedup_batch(batch, prior);
    order_batch(&mut fresh);
    allow.apply(&mut fresh);

    CycleOutput {
        records: fresh,
        replacement,
        skipped,
    }
}

/// Parse one record chunk according to its layout.
pub fn parse_chunk(chunk: &str, variant: LayoutVariant) -> Result<AuditRecord> {
    match variant {
        LayoutVariant::Modern => {
            let sections = decompose_modern(chunk)?;
            let mut record = WinEvent {
                message: parse_message_section(&sections.message),
                ..WinEvent::default()
            };
            apply_fields(&mut record, &parse_key_values(&sections.key_values))?;
            Ok(AuditRecord::Modern(record))
        }
        LayoutVariant::Legacy => {
            let sections = decompose_legacy(chunk)?;
            let mut record = EventLogEntry {
                message: parse_message_section(&sections.message),
                ..EventLogEntry::default()
            };
            apply_fields(&mut record, &parse_key_values(&sections.key_values))?;
            Ok(AuditRecord::Legacy(record))
        }
    }
}
