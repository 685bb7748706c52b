//! Record-boundary recovery for PowerShell console output.
//!
//! The console text has no reliable record delimiter: records are separated
//! only by the recurrence of the layout's first property name (the *anchor*)
//! at the start of a line. The splitter strips the fixed banner and tail
//! markers around the data payload, splits on `"\r\n" + anchor`, and
//! re-prepends the anchor consumed by the split, restoring one complete
//! chunk per record.
//!
//! Within a chunk, the message section and the key/value section are divided
//! at layout-specific property tokens; a chunk whose tokens are absent or
//! misordered is not a record and is reported as malformed.

use crate::util::constants::{EVENT_LOG_BANNER, PAYLOAD_TAIL, WIN_EVENT_BANNER};
use crate::util::error::{AuditRelayError, Result};

/// Which of the two upstream query layouts produced the text block.
/// Selected once per process from the detected PowerShell capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// `Get-WinEvent` output (PowerShell >= 5.1).
    Modern,
    /// `Get-EventLog` output (PowerShell < 5.1).
    Legacy,
}

impl LayoutVariant {
    /// The property name opening every record chunk in this layout.
    pub fn anchor(self) -> &'static str {
        match self {
            LayoutVariant::Modern => "Message",
            LayoutVariant::Legacy => "EventID",
        }
    }

    /// The fixed banner preceding the data payload.
    pub fn banner(self) -> &'static str {
        match self {
            LayoutVariant::Modern => WIN_EVENT_BANNER,
            LayoutVariant::Legacy => EVENT_LOG_BANNER,
        }
    }

    /// The fixed marker following the data payload.
    pub fn tail(self) -> &'static str {
        PAYLOAD_TAIL
    }
}

/// A record chunk divided into its message and key/value sections.
#[derive(Debug, PartialEq, Eq)]
pub struct ChunkSections {
    /// The free-text message section, fed to the message parser.
    pub message: String,
    /// The `key : value` property lines, fed to the key/value parser.
    pub key_values: String,
}

/// Strip the banner and tail markers around the data payload.
///
/// When both markers are present in order, returns the text between them.
/// A no-records block puts the tail at or inside the banner (the markers
/// share `"\r\n"` runs), leaving nothing between them: that is an empty
/// payload, not an error. A block without markers, or with the tail before
/// the banner, is treated as all payload and returned unchanged.
pub fn strip_payload<'a>(block: &'a str, banner: &str, tail: &str) -> &'a str {
    if let (Some(start), Some(end)) = (block.find(banner), block.find(tail)) {
        if end >= start + banner.len() {
            return &block[start + banner.len()..end];
        }
        if end >= start {
            return "";
        }
    }
    block
}

/// Split the payload into per-record chunks on `"\r\n" + anchor`.
///
/// The split consumes the anchor at the head of every record after the
/// first, so it is re-prepended to those chunks. The first chunk keeps its
/// own anchor when it has one; prepending unconditionally would double it
/// and corrupt the chunk's leading property line. An empty payload yields
/// no chunks.
pub fn split_records(payload: &str, anchor: &str) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }
    let delimiter = format!("\r\n{anchor}");
    payload
        .split(&delimiter)
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 && chunk.starts_with(anchor) {
                chunk.to_string()
            } else {
                format!("{anchor}{chunk}")
            }
        })
        .collect()
}

/// Divide a modern-layout chunk into its sections.
///
/// The first occurrence of the `Id` property token marks the end of the
/// message section and the start of the key/value lines.
///
/// # Errors
/// [`AuditRelayError::RecordLayout`] when the chunk has no `Id` token.
pub fn decompose_modern(chunk: &str) -> Result<ChunkSections> {
    let id_at = chunk.find("Id").ok_or_else(|| {
        AuditRelayError::RecordLayout("modern chunk has no 'Id' token".into())
    })?;
    Ok(ChunkSections {
        message: chunk[..id_at].to_string(),
        key_values: chunk[id_at..].to_string(),
    })
}

/// Divide a legacy-layout chunk into its sections.
///
/// The legacy layout prints the message between the `Message` and `Source`
/// properties, so the key/value section is the concatenation of the text
/// before `Message` and from `Source` onward.
///
/// # Errors
/// [`AuditRelayError::RecordLayout`] when either token is missing or
/// `Source` does not come strictly after `Message`.
pub fn decompose_legacy(chunk: &str) -> Result<ChunkSections> {
    let msg_at = chunk.find("Message");
    let src_at = chunk.find("Source");
    match (msg_at, src_at) {
        (Some(m), Some(s)) if s > m => Ok(ChunkSections {
            message: chunk[m..s].to_string(),
            key_values: format!("{}{}", &chunk[..m], &chunk[s..]),
        }),
        _ => Err(AuditRelayError::RecordLayout(
            "legacy chunk lacks ordered 'Message'/'Source' tokens".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_payload_cuts_between_markers() {
        let block = "echo\nBANNERpayload textTAILjunk";
        assert_eq!(strip_payload(block, "BANNER", "TAIL"), "payload text");
    }

    #[test]
    fn strip_payload_without_markers_returns_input() {
        assert_eq!(strip_payload("just text", "BANNER", "TAIL"), "just text");
    }

    #[test]
    fn strip_payload_with_misordered_markers_returns_input() {
        let block = "TAIL then BANNER later";
        assert_eq!(strip_payload(block, "BANNER", "TAIL"), block);
    }

    #[test]
    fn strip_payload_with_coincident_markers_is_empty() {
        // A no-records legacy block is nothing but separator newlines: the
        // banner and tail both match at offset 0.
        assert_eq!(
            strip_payload("\r\n\r\n\r\n", EVENT_LOG_BANNER, PAYLOAD_TAIL),
            ""
        );
    }

    #[test]
    fn strip_payload_with_tail_inside_banner_is_empty() {
        // A no-records modern block: the banner's own trailing newlines plus
        // one more form the tail before the banner ends.
        let block = format!("{WIN_EVENT_BANNER}\r\n");
        assert_eq!(strip_payload(&block, WIN_EVENT_BANNER, PAYLOAD_TAIL), "");
    }

    #[test]
    fn split_restores_anchor_on_every_chunk() {
        let payload = "Message : a\r\nId : 1\r\nMessage : b\r\nId : 2";
        let chunks = split_records(payload, "Message");
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].starts_with("Message : b"));
    }

    #[test]
    fn first_chunk_anchor_is_not_doubled() {
        let payload = "EventID : 1\r\nIndex : 10\r\nEventID : 2\r\nIndex : 20";
        let chunks = split_records(payload, "EventID");
        assert_eq!(chunks[0], "EventID : 1\r\nIndex : 10");
        assert_eq!(chunks[1], "EventID : 2\r\nIndex : 20");
    }

    #[test]
    fn empty_payload_yields_no_chunks() {
        assert!(split_records("", "Message").is_empty());
    }

    #[test]
    fn modern_chunk_splits_at_id_token() {
        let chunk = "Message : logged on\r\nmore\r\nId : 4624\r\nRecordId : 9";
        let sections = decompose_modern(chunk).unwrap();
        assert_eq!(sections.message, "Message : logged on\r\nmore\r\n");
        assert!(sections.key_values.starts_with("Id : 4624"));
    }

    #[test]
    fn modern_chunk_without_id_is_malformed() {
        let err = decompose_modern("Message : trailing fragment").unwrap_err();
        assert!(matches!(err, AuditRelayError::RecordLayout(_)));
    }

    #[test]
    fn legacy_chunk_joins_key_value_ranges() {
        let chunk = "EventID : 4624\r\nIndex : 7\r\nMessage : hello\r\nbody\r\nSource : Security\r\n";
        let sections = decompose_legacy(chunk).unwrap();
        assert_eq!(sections.message, "Message : hello\r\nbody\r\n");
        assert!(sections.key_values.starts_with("EventID : 4624"));
        assert!(sections.key_values.contains("Source : Security"));
    }

    #[test]
    fn legacy_chunk_with_source_before_message_is_malformed() {
        let chunk = "EventID : 1\r\nSource : S\r\nMessage : m\r\n";
        assert!(decompose_legacy(chunk).is_err());
    }

    #[test]
    fn legacy_chunk_missing_tokens_is_malformed() {
        assert!(decompose_legacy("EventID : 1\r\nIndex : 2\r\n").is_err());
    }
}
