//! Canonical data structures for parsed Security-log records.
//!
//! Each record is parsed from the key/value text rendered by one of the two
//! PowerShell query pipelines into a typed struct. The two layouts are
//! structurally similar but not interchangeable, so they are modeled as a
//! tagged union ([`AuditRecord`]) with a shared [`EventMessage`] sub-record
//! and variant-specific field sets.
//!
//! Serialized field names match the PowerShell property names verbatim
//! (`Id`, `RecordId`, `EventID`, ...) so the forwarded JSON documents read
//! like the upstream console output they were parsed from.

/// The free-text message portion of a record, split off from the key/value
/// fields before general field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventMessage {
    /// First line of the message, with its `Message:` label stripped.
    /// Leading whitespace after the colon is preserved verbatim.
    pub description: String,

    /// Everything after the first line, verbatim.
    pub details: String,
}

impl EventMessage {
    /// True if neither part was populated.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.details.is_empty()
    }
}

/// A record from the modern `Get-WinEvent` layout (PowerShell >= 5.1).
///
/// `record_id` is the identity key: it increases monotonically per log entry
/// and is stable across query cycles, so it drives both cross-cycle
/// deduplication and within-batch ordering.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WinEvent {
    pub id: i64,
    pub version: i64,
    pub qualifiers: String,
    pub level: i64,
    pub task: i64,
    pub opcode: i64,
    pub keywords: i64,
    pub record_id: i64,
    pub provider_name: String,
    pub provider_id: String,
    pub log_name: String,
    pub process_id: i64,
    pub thread_id: i64,
    pub machine_name: String,
    pub user_id: i64,
    pub time_created: String,
    pub activity_id: String,
    pub related_activity_id: i64,
    pub container_log: String,
    pub matched_query_ids: String,
    pub bookmark: String,
    pub level_display_name: String,
    pub opcode_display_name: String,
    pub task_display_name: String,
    pub keywords_display_names: String,
    pub properties: String,
    pub message: EventMessage,
}

/// A record from the legacy `Get-EventLog` layout (PowerShell < 5.1).
///
/// `index` is the identity key for this layout.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventLogEntry {
    #[serde(rename = "EventID")]
    pub event_id: i64,
    pub machine_name: String,
    pub data: String,
    pub index: i64,
    pub category: String,
    pub category_number: i64,
    pub entry_type: String,
    pub source: String,
    pub replacement_strings: String,
    pub instance_id: i64,
    pub time_generated: String,
    pub time_written: String,
    pub user_name: String,
    pub site: String,
    pub container: String,
    pub message: EventMessage,
}

/// One parsed Security-log record, in whichever layout the query produced.
///
/// Untagged serialization keeps each record a single flat JSON object — one
/// document per record on the wire, never an envelope.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum AuditRecord {
    /// Modern `Get-WinEvent` record.
    Modern(WinEvent),
    /// Legacy `Get-EventLog` record.
    Legacy(EventLogEntry),
}

impl AuditRecord {
    /// The record's identity key: `RecordId` for the modern layout, `Index`
    /// for the legacy layout. Stable across cycles for the same log entry.
    pub fn identity_key(&self) -> i64 {
        match self {
            AuditRecord::Modern(we) => we.record_id,
            AuditRecord::Legacy(el) => el.index,
        }
    }

    /// The record's event-type identifier, matched against the allow-list.
    pub fn type_id(&self) -> i64 {
        match self {
            AuditRecord::Modern(we) => we.id,
            AuditRecord::Legacy(el) => el.event_id,
        }
    }

    /// The message sub-record.
    pub fn message(&self) -> &EventMessage {
        match self {
            AuditRecord::Modern(we) => &we.message,
            AuditRecord::Legacy(el) => &el.message,
        }
    }
}
