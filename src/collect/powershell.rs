//! PowerShell query execution and console-output decoding.
//!
//! The engine never talks to the OS itself; this module is the collaborator
//! that runs the query command for one poll window and hands back the raw
//! decoded text block. Console output on localized Windows installs arrives
//! in the OEM code page (GBK on Simplified-Chinese systems), so bytes are
//! decoded with `encoding_rs` rather than assumed to be UTF-8.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::core::splitter::LayoutVariant;
use crate::util::constants::{CMD_EVENT_LOG, CMD_EXIT, CMD_VARS, CMD_WIN_EVENT};
use crate::util::error::{AuditRelayError, Result};

/// Source of raw query output for one poll window.
///
/// Production code uses [`PowerShellQuery`]; tests substitute canned blocks.
pub trait QuerySource {
    /// Fetch the decoded console text for records in `[begin, end)`.
    /// Window bounds are `MM/DD/YYYY HH:MM:SS` local-time strings.
    fn fetch(&mut self, begin: &str, end: &str) -> Result<String>;
}

/// Runs the Security-log query through a `powershell` child process.
#[derive(Debug, Clone, Copy)]
pub struct PowerShellQuery {
    variant: LayoutVariant,
}

impl PowerShellQuery {
    pub fn new(variant: LayoutVariant) -> Self {
        Self { variant }
    }
}

impl QuerySource for PowerShellQuery {
    fn fetch(&mut self, begin: &str, end: &str) -> Result<String> {
        match self.variant {
            LayoutVariant::Modern => {
                let script = format!(
                    "{}{}{}",
                    CMD_VARS
                        .replace("{begin}", begin)
                        .replace("{end}", end),
                    CMD_WIN_EVENT,
                    CMD_EXIT,
                );
                run_powershell_stdin(&script, "Get-WinEvent")
            }
            LayoutVariant::Legacy => {
                let command = CMD_EVENT_LOG
                    .replace("{begin}", begin)
                    .replace("{end}", end);
                run_powershell_arg(&command, "Get-EventLog")
            }
        }
    }
}

/// Run `powershell` with the script fed through stdin (interactive-style
/// session, used by the modern query so the `$Begin`/`$End` variables can be
/// assigned first).
fn run_powershell_stdin(script: &str, context: &str) -> Result<String> {
    let mut child = Command::new("powershell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| command_err(context, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(script.as_bytes())
            .map_err(|e| command_err(context, e))?;
    }

    let output = child.wait_with_output().map_err(|e| command_err(context, e))?;
    Ok(decode_console_bytes(&output.stdout))
}

/// Run `powershell <command>` with the query passed as an argument
/// (the legacy query is self-contained).
fn run_powershell_arg(command: &str, context: &str) -> Result<String> {
    let output = Command::new("powershell")
        .arg(command)
        .output()
        .map_err(|e| command_err(context, e))?;
    Ok(decode_console_bytes(&output.stdout))
}

/// Run the given command and return decoded stdout and stderr.
/// Used by version detection, which needs to inspect stderr.
pub fn run_powershell_capture(command: &str, context: &str) -> Result<(String, String)> {
    let output = Command::new("powershell")
        .arg(command)
        .output()
        .map_err(|e| command_err(context, e))?;
    Ok((
        decode_console_bytes(&output.stdout),
        decode_console_bytes(&output.stderr),
    ))
}

/// Decode raw console bytes: GBK first (the OEM code page the agent targets),
/// lossy UTF-8 as the fallback when the decode reports malformed sequences.
pub fn decode_console_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if had_errors {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    text.into_owned()
}

fn command_err(context: &str, source: std::io::Error) -> AuditRelayError {
    AuditRelayError::Command {
        context: context.to_string(),
        source,
    }
}
