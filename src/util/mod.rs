//! Shared utilities: configuration, constants, errors, time helpers.

pub mod config;
pub mod constants;
pub mod error;
pub mod time;
