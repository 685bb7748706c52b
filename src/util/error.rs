//! Unified error types for auditrelay.
//!
//! All fallible operations throughout the codebase return
//! `Result<T, AuditRelayError>`. This ensures consistent error reporting and
//! clean propagation via the `?` operator.

/// Unified error type used throughout auditrelay.
///
/// Each variant captures enough context to produce an actionable message for
/// log output.
#[derive(Debug, thiserror::Error)]
pub enum AuditRelayError {
    /// A candidate record chunk did not have its layout tokens where the
    /// layout requires them, or its identity key was absent. Recoverable:
    /// the pipeline drops the chunk and continues with the rest of the batch.
    #[error("record layout error: {0}")]
    RecordLayout(String),

    /// A value mapped onto an integer field failed to parse as base-10 i64.
    /// Fatal to that one record; the rest of the batch is unaffected.
    #[error("field coercion failed: field '{field}' with value '{value}'")]
    FieldCoercion {
        /// Name of the schema field being populated.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// config.yml could not be read or did not deserialize.
    #[error("config error: {0}")]
    Config(String),

    /// Spawning or running the PowerShell query process failed.
    /// `context` names which command was being run.
    #[error("command failed: {context}: {source}")]
    Command {
        /// Human-readable description of the command that failed.
        context: String,
        /// The underlying I/O error from the spawn/wait.
        #[source]
        source: std::io::Error,
    },

    /// The PowerShell version table could not be parsed.
    #[error("version detection failed: {0}")]
    VersionDetect(String),

    /// Forwarding a record to the remote sink failed.
    #[error("sink error: {0}")]
    Sink(String),

    /// Catch-all for I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditRelayError>;
