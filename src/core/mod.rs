//! Core engine: record extraction, normalization, and deduplication.
//!
//! Contains the record data model, the text splitter that recovers record
//! boundaries from console output, the section and field parsers, the
//! cross-cycle deduplicator, and the allow-list filter. All of it is
//! synchronous and I/O-free; `pipeline::run_cycle` is the single entry point.

pub mod dedup;
pub mod event_record;
pub mod field_map;
pub mod filter;
pub mod pipeline;
pub mod sections;
pub mod splitter;
