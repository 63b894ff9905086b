//! Hook entry points and the runner they share.
//!
//! Every hook follows the same linear sequence: read configuration, resolve the
//! session id, build one event, try to deliver it, and exit with status 0. A
//! hook only decides what the event looks like and what it tells the user.

pub mod post_edit;
pub mod post_task;
pub mod session_start;

use crate::common::config::IngestConfig;
use crate::common::debug::{debug_log, init_debug};
use crate::common::types::Event;
use crate::ipc::client::IngestClient;
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// A lifecycle hook invoked by Claude Code
pub trait Hook: Parser {
    /// Hook name, reported in event metadata and diagnostics
    const NAME: &'static str;

    /// Ingestion settings for this invocation
    fn ingest(&self) -> &IngestConfig;

    /// Build the event to report
    fn build_event(&self, session_id: &str) -> Result<Event>;

    /// Called once the session id is known, before the event is built
    fn announce(&self, _session_id: &str) {}

    /// Called after the endpoint accepted the event
    fn delivered(&self, _session_id: &str) {}

    /// Called after a failed delivery, once the warning has been printed
    fn undelivered(&self, _err: &anyhow::Error) {}

    /// Called last, whatever happened before
    fn finish(&self, _session_id: &str) {}
}

/// Run a hook from the process arguments and environment.
///
/// Always returns success so the calling tool is never blocked.
pub fn run<H: Hook>() -> ExitCode {
    if let Some(hook) = load::<H, _, _>(std::env::args_os()) {
        execute(&hook);
    }
    ExitCode::SUCCESS
}

/// Parse hook settings, falling back to the environment alone when the
/// arguments are not understood
fn load<H, I, T>(args: I) -> Option<H>
where
    H: Hook,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match H::try_parse_from(args) {
        Ok(hook) => Some(hook),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // stdout belongs to the session export line, even for usage text
            eprint!("{}", err.render());
            None
        }
        Err(err) => {
            eprintln!(
                "⚠️  {}: ignoring command-line arguments ({})",
                H::NAME,
                first_line(&err.to_string())
            );
            match H::try_parse_from([H::NAME]) {
                Ok(hook) => Some(hook),
                Err(err) => {
                    eprintln!(
                        "❌ Error in {} hook: {}",
                        H::NAME,
                        first_line(&err.to_string())
                    );
                    None
                }
            }
        }
    }
}

fn execute<H: Hook>(hook: &H) {
    let config = hook.ingest();
    init_debug(config.debug, H::NAME);

    let session_id = config.resolve_session_id();
    debug_log(&format!("session {}", session_id));
    hook.announce(&session_id);

    match hook.build_event(&session_id) {
        Ok(event) => {
            // Delivery is advisory; the outcome has already been reported on stderr
            let _ = notify(hook, &event);
        }
        Err(err) => {
            eprintln!("❌ Error in {} hook: {:#}", H::NAME, err);
            debug_log(&format!("failed to build event: {:#}", err));
        }
    }

    hook.finish(&session_id);
}

/// Best-effort delivery of one event.
///
/// Failures are printed as warnings and reported as `false`; nothing is
/// propagated.
pub fn notify<H: Hook>(hook: &H, event: &Event) -> bool {
    match deliver(hook.ingest(), event) {
        Ok(()) => {
            debug_log("event delivered");
            hook.delivered(&event.session_id);
            true
        }
        Err(err) => {
            eprintln!("⚠️  Failed to send event: {:#}", err);
            debug_log(&format!("delivery failed: {:#}", err));
            hook.undelivered(&err);
            false
        }
    }
}

fn deliver(config: &IngestConfig, event: &Event) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let client = IngestClient::new(&config.base_url())?;
    runtime.block_on(client.send(event))?;
    Ok(())
}

/// Current working directory of the hook process, empty when it cannot be read
pub(crate) fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|err| {
        eprintln!("⚠️  Failed to read working directory: {}", err);
        debug_log(&format!("failed to read working directory: {}", err));
        PathBuf::new()
    })
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text).trim()
}
