//! Schema-driven field mapping.
//!
//! Each record layout declares an ordered schema of `(property name, kind)`
//! pairs; [`apply_fields`] walks the schema and copies matching entries out
//! of the parsed property map, coercing text to `i64` where the schema says
//! so. No reflection — the schema table plus a pair of setters per layout
//! covers everything the property text can carry.

use std::collections::HashMap;

use crate::core::event_record::{EventLogEntry, WinEvent};
use crate::util::error::{AuditRelayError, Result};

/// The value kind a schema field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Assigned verbatim from the property text.
    Text,
    /// Parsed as a base-10 signed 64-bit integer.
    Integer,
    /// A nested sub-record (the message). Never touched by this pass; it is
    /// injected by the message parser before mapping runs.
    Nested,
}

/// A record type that can be populated from a property map.
pub trait FieldSchema {
    /// Ordered list of `(property name, kind)` for this layout. Property
    /// names match the PowerShell output verbatim.
    const SCHEMA: &'static [(&'static str, FieldKind)];

    /// The property name carrying this layout's identity key.
    const IDENTITY_FIELD: &'static str;

    /// Assign a text-kind field by property name.
    fn set_text(&mut self, name: &str, value: &str);

    /// Assign an integer-kind field by property name.
    fn set_integer(&mut self, name: &str, value: i64);
}

/// Populate `target`'s fields from the parsed property map.
///
/// Schema fields with no map entry, or an empty one, keep their zero value —
/// not every record populates every property. Nested-kind fields are skipped
/// entirely.
///
/// # Errors
/// - [`AuditRelayError::FieldCoercion`] when an integer-kind value fails to
///   parse; names the field and the offending text.
/// - [`AuditRelayError::RecordLayout`] when the identity-key property is
///   absent or empty — such a record is not constructible.
pub fn apply_fields<T: FieldSchema>(target: &mut T, map: &HashMap<String, String>) -> Result<()> {
    if !map.get(T::IDENTITY_FIELD).is_some_and(|v| !v.is_empty()) {
        return Err(AuditRelayError::RecordLayout(format!(
            "identity key '{}' missing from record",
            T::IDENTITY_FIELD
        )));
    }

    for (name, kind) in T::SCHEMA {
        let Some(raw) = map.get(*name) else { continue };
        if raw.is_empty() {
            continue;
        }
        match kind {
            FieldKind::Nested => continue,
            FieldKind::Text => target.set_text(name, raw),
            FieldKind::Integer => {
                let parsed: i64 = raw.parse().map_err(|_| AuditRelayError::FieldCoercion {
                    field: (*name).to_string(),
                    value: raw.clone(),
                })?;
                target.set_integer(name, parsed);
            }
        }
    }
    Ok(())
}

impl FieldSchema for WinEvent {
    const SCHEMA: &'static [(&'static str, FieldKind)] = &[
        ("Id", FieldKind::Integer),
        ("Version", FieldKind::Integer),
        ("Qualifiers", FieldKind::Text),
        ("Level", FieldKind::Integer),
        ("Task", FieldKind::Integer),
        ("Opcode", FieldKind::Integer),
        ("Keywords", FieldKind::Integer),
        ("RecordId", FieldKind::Integer),
        ("ProviderName", FieldKind::Text),
        ("ProviderId", FieldKind::Text),
        ("LogName", FieldKind::Text),
        ("ProcessId", FieldKind::Integer),
        ("ThreadId", FieldKind::Integer),
        ("MachineName", FieldKind::Text),
        ("UserId", FieldKind::Integer),
        ("TimeCreated", FieldKind::Text),
        ("ActivityId", FieldKind::Text),
        ("RelatedActivityId", FieldKind::Integer),
        ("ContainerLog", FieldKind::Text),
        ("MatchedQueryIds", FieldKind::Text),
        ("Bookmark", FieldKind::Text),
        ("LevelDisplayName", FieldKind::Text),
        ("OpcodeDisplayName", FieldKind::Text),
        ("TaskDisplayName", FieldKind::Text),
        ("KeywordsDisplayNames", FieldKind::Text),
        ("Properties", FieldKind::Text),
        ("Message", FieldKind::Nested),
    ];

    const IDENTITY_FIELD: &'static str = "RecordId";

    fn set_text(&mut self, name: &str, value: &str) {
        let value = value.to_string();
        match name {
            "Qualifiers" => self.qualifiers = value,
            "ProviderName" => self.provider_name = value,
            "ProviderId" => self.provider_id = value,
            "LogName" => self.log_name = value,
            "MachineName" => self.machine_name = value,
            "TimeCreated" => self.time_created = value,
            "ActivityId" => self.activity_id = value,
            "ContainerLog" => self.container_log = value,
            "MatchedQueryIds" => self.matched_query_ids = value,
            "Bookmark" => self.bookmark = value,
            "LevelDisplayName" => self.level_display_name = value,
            "OpcodeDisplayName" => self.opcode_display_name = value,
            "TaskDisplayName" => self.task_display_name = value,
            "KeywordsDisplayNames" => self.keywords_display_names = value,
            "Properties" => self.properties = value,
            _ => {}
        }
    }

    fn set_integer(&mut self, name: &str, value: i64) {
        match name {
            "Id" => self.id = value,
            "Version" => self.version = value,
            "Level" => self.level = value,
            "Task" => self.task = value,
            "Opcode" => self.opcode = value,
            "Keywords" => self.keywords = value,
            "RecordId" => self.record_id = value,
            "ProcessId" => self.process_id = value,
            "ThreadId" => self.thread_id = value,
            "UserId" => self.user_id = value,
            "RelatedActivityId" => self.related_activity_id = value,
            _ => {}
        }
    }
}

impl FieldSchema for EventLogEntry {
    const SCHEMA: &'static [(&'static str, FieldKind)] = &[
        ("EventID", FieldKind::Integer),
        ("MachineName", FieldKind::Text),
        ("Data", FieldKind::Text),
        ("Index", FieldKind::Integer),
        ("Category", FieldKind::Text),
        ("CategoryNumber", FieldKind::Integer),
        ("EntryType", FieldKind::Text),
        ("Source", FieldKind::Text),
        ("ReplacementStrings", FieldKind::Text),
        ("InstanceId", FieldKind::Integer),
        ("TimeGenerated", FieldKind::Text),
        ("TimeWritten", FieldKind::Text),
        ("UserName", FieldKind::Text),
        ("Site", FieldKind::Text),
        ("Container", FieldKind::Text),
        ("Message", FieldKind::Nested),
    ];

    const IDENTITY_FIELD: &'static str = "Index";

    fn set_text(&mut self, name: &str, value: &str) {
        let value = value.to_string();
        match name {
            "MachineName" => self.machine_name = value,
            "Data" => self.data = value,
            "Category" => self.category = value,
            "EntryType" => self.entry_type = value,
            "Source" => self.source = value,
            "ReplacementStrings" => self.replacement_strings = value,
            "TimeGenerated" => self.time_generated = value,
            "TimeWritten" => self.time_written = value,
            "UserName" => self.user_name = value,
            "Site" => self.site = value,
            "Container" => self.container = value,
            _ => {}
        }
    }

    fn set_integer(&mut self, name: &str, value: i64) {
        match name {
            "EventID" => self.event_id = value,
            "Index" => self.index = value,
            "CategoryNumber" => self.category_number = value,
            "InstanceId" => self.instance_id = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn populates_declared_fields() {
        let mut we = WinEvent::default();
        let map = map_of(&[
            ("Id", "4624"),
            ("RecordId", "12345"),
            ("ProviderName", "Microsoft-Windows-Security-Auditing"),
            ("Keywords", "-9214364837600034816"),
        ]);
        apply_fields(&mut we, &map).unwrap();
        assert_eq!(we.id, 4624);
        assert_eq!(we.record_id, 12345);
        assert_eq!(we.keywords, -9214364837600034816);
        assert_eq!(we.provider_name, "Microsoft-Windows-Security-Auditing");
        // Unmapped fields keep their zero values.
        assert_eq!(we.level, 0);
        assert!(we.log_name.is_empty());
    }

    #[test]
    fn coercion_failure_names_field_and_value() {
        let mut we = WinEvent::default();
        let map = map_of(&[("RecordId", "1"), ("ProcessId", "not-a-number")]);
        let err = apply_fields(&mut we, &map).unwrap_err();
        match err {
            AuditRelayError::FieldCoercion { field, value } => {
                assert_eq!(field, "ProcessId");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected FieldCoercion, got {other:?}"),
        }
    }

    #[test]
    fn missing_identity_key_rejects_record() {
        let mut we = WinEvent::default();
        let map = map_of(&[("Id", "4624")]);
        let err = apply_fields(&mut we, &map).unwrap_err();
        assert!(matches!(err, AuditRelayError::RecordLayout(_)));
    }

    #[test]
    fn empty_values_leave_zero_fields() {
        let mut we = WinEvent::default();
        let map = map_of(&[("RecordId", "5"), ("Qualifiers", ""), ("Version", "")]);
        apply_fields(&mut we, &map).unwrap();
        assert!(we.qualifiers.is_empty());
        assert_eq!(we.version, 0);
    }

    #[test]
    fn nested_message_is_untouched() {
        let mut we = WinEvent::default();
        we.message.description = "preset".into();
        let map = map_of(&[("RecordId", "5"), ("Message", "overwrite attempt")]);
        apply_fields(&mut we, &map).unwrap();
        assert_eq!(we.message.description, "preset");
    }

    #[test]
    fn legacy_schema_maps_index_identity() {
        let mut el = EventLogEntry::default();
        let map = map_of(&[
            ("EventID", "4625"),
            ("Index", "901"),
            ("EntryType", "FailureAudit"),
            ("InstanceId", "4625"),
        ]);
        apply_fields(&mut el, &map).unwrap();
        assert_eq!(el.index, 901);
        assert_eq!(el.event_id, 4625);
        assert_eq!(el.entry_type, "FailureAudit");
    }
}
