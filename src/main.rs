//! auditrelay — Windows security-audit log collector and forwarder.
//!
//! Entry point: initialises structured logging, loads configuration, detects
//! the PowerShell capability version, then polls the Security log on a fixed
//! interval, forwarding new records as one JSON document each.

mod collect;
mod core;
mod forward;
mod util;

use std::path::Path;
use std::time::Duration;

use crate::collect::powershell::{run_powershell_capture, PowerShellQuery, QuerySource};
use crate::collect::version::parse_ps_version;
use crate::core::dedup::DedupSet;
use crate::core::filter::AllowList;
use crate::core::pipeline::run_cycle;
use crate::core::splitter::LayoutVariant;
use crate::forward::sink::{ConsoleSink, LogSink, TcpSink};
use crate::util::config::Config;
use crate::util::constants::{self, CMD_VERSION};
use crate::util::error::{AuditRelayError, Result};

fn main() {
    init_logging();

    if let Err(e) = run() {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    if !cfg!(windows) {
        return Err(AuditRelayError::Config(
            "only supports the Windows operating system".into(),
        ));
    }

    let config = Config::load(Path::new(constants::CONFIG_FILE))?;
    tracing::info!(
        app = %config.app,
        duration = config.duration,
        "{} v{} starting",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let variant = detect_layout()?;
    let mut source = PowerShellQuery::new(variant);
    let mut sink: Box<dyn LogSink> = if config.send_url.is_empty() {
        Box::new(ConsoleSink)
    } else {
        Box::new(TcpSink::new(config.send_url.clone()))
    };
    let allow = AllowList::new(config.win_evt_ids.clone());

    poll_loop(&config, variant, &mut source, sink.as_mut(), &allow)
}

/// Detect the PowerShell version and pick the query layout.
fn detect_layout() -> Result<LayoutVariant> {
    let (stdout, stderr) = run_powershell_capture(CMD_VERSION, "PSVersion detection")?;
    if !stderr.trim().is_empty() {
        return Err(AuditRelayError::VersionDetect(format!(
            "version command wrote to stderr: {}",
            stderr.trim()
        )));
    }
    let version = parse_ps_version(&stdout)?;
    let variant = version.layout();
    tracing::info!(%version, ?variant, "PowerShell capability detected");
    Ok(variant)
}

/// The main poll loop: one query-parse-forward cycle per timer tick.
///
/// Cycles never overlap — the loop is single-threaded and each tick runs to
/// completion before the next is taken. On a fetch failure the prior dedup
/// set and window start are retained, so the failed window is retried on
/// the next tick.
fn poll_loop(
    config: &Config,
    variant: LayoutVariant,
    source: &mut dyn QuerySource,
    sink: &mut dyn LogSink,
    allow: &AllowList,
) -> Result<()> {
    let ticker = crossbeam_channel::tick(Duration::from_secs(config.duration));
    let mut dedup = DedupSet::new();
    let mut window_start = crate::util::time::now_window_bound();

    loop {
        ticker
            .recv()
            .map_err(|e| AuditRelayError::Config(format!("poll ticker closed: {e}")))?;

        let window_end = crate::util::time::now_window_bound();
        let raw = match source.fetch(&window_start, &window_end) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    begin = %window_start,
                    end = %window_end,
                    "query failed, retrying window next tick: {e}"
                );
                continue;
            }
        };

        let output = run_cycle(&raw, variant, &dedup, allow);
        let parsed = output.replacement.len();
        let emitted = output.records.len();

        for record in &output.records {
            if let Err(e) = sink.emit(record) {
                tracing::error!(key = record.identity_key(), "forwarding failed: {e}");
            }
        }

        tracing::info!(
            begin = %window_start,
            end = %window_end,
            parsed,
            emitted,
            skipped = output.skipped.len(),
            "cycle complete"
        );

        // The cycle completed: the replacement set supersedes the prior one
        // and the next window starts where this one ended.
        dedup = output.replacement;
        window_start = window_end;
    }
}

/// Initialise the tracing subscriber: stderr writer filtered by `RUST_LOG`
/// (default `info`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}
