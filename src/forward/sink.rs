//! Record forwarding to the remote log sink.
//!
//! Each surviving record is serialized as one compact JSON document — one
//! document per record, never an array — and handed to a [`LogSink`].
//! [`TcpSink`] writes newline-delimited JSON to the configured `send_url`;
//! [`ConsoleSink`] logs each document, which doubles as the transport when
//! no sink address is configured.

use std::io::Write;
use std::net::TcpStream;

use crate::core::event_record::AuditRecord;
use crate::util::error::{AuditRelayError, Result};

/// Destination for forwarded records.
pub trait LogSink {
    /// Forward one record. Errors are per-record; the caller decides whether
    /// to continue with the rest of the batch.
    fn emit(&mut self, record: &AuditRecord) -> Result<()>;
}

/// Serialize a record as its one-per-line JSON wire form.
pub fn render_record(record: &AuditRecord) -> Result<String> {
    serde_json::to_string(record).map_err(|e| AuditRelayError::Sink(format!("serialize: {e}")))
}

/// Logs each record's JSON document at info level.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&mut self, record: &AuditRecord) -> Result<()> {
        let doc = render_record(record)?;
        tracing::info!(target: "auditrelay::records", "{doc}");
        Ok(())
    }
}

/// Writes newline-delimited JSON documents to a TCP endpoint.
///
/// Connects lazily on first emit. A write failure drops the connection so
/// the next emit reconnects; the failed record is reported to the caller.
#[derive(Debug)]
pub struct TcpSink {
    addr: String,
    stream: Option<TcpStream>,
}

impl TcpSink {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: None,
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        match self.stream {
            Some(ref mut stream) => Ok(stream),
            None => {
                let stream = TcpStream::connect(&self.addr)
                    .map_err(|e| AuditRelayError::Sink(format!("connect {}: {e}", self.addr)))?;
                tracing::debug!(addr = %self.addr, "log sink connected");
                Ok(self.stream.insert(stream))
            }
        }
    }
}

impl LogSink for TcpSink {
    fn emit(&mut self, record: &AuditRecord) -> Result<()> {
        let mut doc = render_record(record)?;
        doc.push('\n');

        let addr = self.addr.clone();
        let stream = self.stream()?;
        if let Err(e) = stream.write_all(doc.as_bytes()) {
            self.stream = None;
            return Err(AuditRelayError::Sink(format!("write {addr}: {e}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_record::{EventMessage, WinEvent};

    #[test]
    fn rendered_record_is_one_flat_document() {
        let record = AuditRecord::Modern(WinEvent {
            id: 4624,
            record_id: 9,
            message: EventMessage {
                description: " ok".into(),
                details: String::new(),
            },
            ..WinEvent::default()
        });
        let doc = render_record(&record).unwrap();
        assert!(doc.starts_with('{'));
        assert!(!doc.contains('\n'));
        assert!(doc.contains("\"RecordId\":9"));
        assert!(doc.contains("\"Description\":\" ok\""));
    }

    #[test]
    fn tcp_sink_roundtrips_over_loopback() {
        use std::io::{BufRead, BufReader};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(stream).read_line(&mut line).unwrap();
            line
        });

        let mut sink = TcpSink::new(addr.to_string());
        let record = AuditRecord::Modern(WinEvent {
            record_id: 42,
            ..WinEvent::default()
        });
        sink.emit(&record).unwrap();
        drop(sink);

        let line = handle.join().unwrap();
        assert!(line.contains("\"RecordId\":42"));
        assert!(line.ends_with('\n'));
    }
}
