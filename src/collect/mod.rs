//! Collection plumbing: PowerShell process execution, console decoding,
//! and capability (version) detection. The engine in `core` consumes only
//! the decoded text these produce.

pub mod powershell;
pub mod version;
