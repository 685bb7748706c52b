//! Allow-list filtering by event-type identifier.
//!
//! The allow-list is the raw comma-joined text from configuration
//! (`win_evt_ids`). An empty list retains every record. Matching is a
//! substring check of the identifier's decimal rendering against the raw
//! list text — not exact set membership — so `12` matches a list containing
//! `123`. This mirrors the upstream filtering contract; see DESIGN.md.

use crate::core::event_record::AuditRecord;

/// An optional allow-list of decimal event-type identifiers.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    raw: String,
}

impl AllowList {
    /// Build an allow-list from the raw comma-joined config text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// True when no filtering is configured.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether a record with this type identifier passes the filter.
    pub fn permits(&self, type_id: i64) -> bool {
        self.raw.is_empty() || self.raw.contains(&type_id.to_string())
    }

    /// Drop records whose type identifier is not permitted.
    pub fn apply(&self, batch: &mut Vec<AuditRecord>) {
        if self.raw.is_empty() {
            return;
        }
        batch.retain(|record| self.permits(record.type_id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_record::WinEvent;

    fn record(id: i64) -> AuditRecord {
        AuditRecord::Modern(WinEvent {
            id,
            record_id: id,
            ..WinEvent::default()
        })
    }

    #[test]
    fn empty_list_permits_everything() {
        let allow = AllowList::new("");
        assert!(allow.permits(4624));
        assert!(allow.permits(9999));
    }

    #[test]
    fn listed_ids_are_retained_others_dropped() {
        let allow = AllowList::new("4624,4625");
        let mut batch = vec![record(4624), record(9999), record(4625)];
        allow.apply(&mut batch);
        let ids: Vec<i64> = batch.iter().map(AuditRecord::type_id).collect();
        assert_eq!(ids, vec![4624, 4625]);
    }

    #[test]
    fn matching_is_substring_not_set_membership() {
        // Documented imprecision: "12" occurs inside "123".
        let allow = AllowList::new("123");
        assert!(allow.permits(12));
        assert!(allow.permits(123));
        assert!(!allow.permits(4));
    }
}
