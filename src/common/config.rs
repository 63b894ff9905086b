//! Environment-backed configuration shared by all hooks.

use crate::common::session;
use clap::builder::BoolishValueParser;
use clap::Args;
use std::ffi::{OsStr, OsString};

/// Base URL used when `CONVEX_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Ingestion settings common to every hook.
///
/// Claude Code passes everything through the environment. The long flags exist
/// for running a hook by hand. Free-text values are kept as `OsString` so a
/// value that is not valid UTF-8 never stops the event from being sent.
#[derive(Args, Debug, Clone)]
pub struct IngestConfig {
    /// Base URL of the ingestion deployment
    #[arg(long, env = "CONVEX_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: OsString,

    /// Session identifier shared by all hooks of one Claude Code session
    /// (generated when unset)
    #[arg(long, env = "SESSION_ID")]
    pub session_id: Option<OsString>,

    /// Append diagnostics to the debug log file
    #[arg(
        long,
        env = "HOOKS_DEBUG",
        value_parser = BoolishValueParser::new(),
        default_value_t = false
    )]
    pub debug: bool,
}

impl IngestConfig {
    /// Base URL as text
    pub fn base_url(&self) -> String {
        lossy(&self.base_url)
    }

    /// Session id to report, generating a fresh one when none was supplied.
    /// A supplied id is used verbatim; only a blank one counts as unset.
    pub fn resolve_session_id(&self) -> String {
        self.session_id
            .as_deref()
            .map(lossy)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(session::generate_session_id)
    }

    /// Dashboard page served next to the ingestion endpoint
    pub fn dashboard_url(&self) -> String {
        format!("{}/observability", self.base_url().trim_end_matches('/'))
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base_url: OsString::from(DEFAULT_BASE_URL),
            session_id: None,
            debug: false,
        }
    }
}

/// Environment value as text, replacing invalid UTF-8 with U+FFFD
pub fn lossy(value: &OsStr) -> String {
    value.to_string_lossy().into_owned()
}
