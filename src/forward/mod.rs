//! Forwarding plumbing: serialization and transport of parsed records.

pub mod sink;
