//! Section parsers for one record chunk.
//!
//! A record chunk carries two kinds of text: the free-form message section
//! and the `key : value` property lines. [`parse_message_section`] handles
//! the former, [`parse_key_values`] the latter. Both are tolerant by
//! contract — empty or oddly-shaped input produces empty output, never an
//! error, because partial chunks at payload boundaries are routine.

use std::collections::HashMap;

use crate::core::event_record::EventMessage;

/// Parse the message section of a chunk into an [`EventMessage`].
///
/// The first line (up to the first `"\r\n"`) holds the `Message :` label;
/// its text after the first colon becomes `description`, verbatim — leading
/// whitespace included. Everything after the first `"\r\n"` becomes
/// `details`, verbatim. Input that is empty or has no line break yields an
/// empty message.
pub fn parse_message_section(section: &str) -> EventMessage {
    let mut message = EventMessage::default();

    if let Some((first_line, rest)) = section.split_once("\r\n") {
        if let Some((_, desc)) = first_line.split_once(':') {
            message.description = desc.to_string();
        }
        message.details = rest.to_string();
    }

    message
}

/// Parse the key/value section of a chunk into a property map.
///
/// Each non-empty `"\r\n"`-separated line containing a colon contributes one
/// entry: the trimmed text before the first colon maps to the trimmed text
/// after it. Colon-free lines (wrapped values, stray separators) are
/// ignored. A duplicate key overwrites the earlier entry — map semantics,
/// accepted as-is.
pub fn parse_key_values(section: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for line in section.split("\r\n") {
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    map
}
