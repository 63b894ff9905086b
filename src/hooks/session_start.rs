//! SessionStart hook: announces a new Claude Code session.

use crate::common::config::{lossy, IngestConfig};
use crate::common::session::export_line;
use crate::common::types::{Event, EventType};
use crate::hooks::{working_dir, Hook};
use crate::ipc::client::NotifyError;
use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

/// Agent name reported for session events
const AGENT_NAME: &str = "claude-code-orchestrator";

/// Report the start of a Claude Code session to the observability dashboard.
///
/// Prints `export SESSION_ID=...` on stdout so the calling shell can pass the
/// same id to later hooks.
#[derive(Parser, Debug)]
#[command(name = "session-start")]
#[command(about = "Report the start of a Claude Code session to the observability dashboard")]
pub struct SessionStart {
    #[command(flatten)]
    pub ingest: IngestConfig,

    /// User running the session
    #[arg(long, env = "USER", default_value = "unknown")]
    pub user: OsString,
}

impl Hook for SessionStart {
    const NAME: &'static str = "session-start";

    fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    fn announce(&self, session_id: &str) {
        println!("{}", export_line(session_id));
    }

    fn build_event(&self, session_id: &str) -> Result<Event> {
        Ok(session_event(session_id, &lossy(&self.user), &working_dir()))
    }

    fn delivered(&self, session_id: &str) {
        eprintln!("✅ Session started: {}", session_id);
    }

    fn undelivered(&self, err: &anyhow::Error) {
        if err
            .downcast_ref::<NotifyError>()
            .is_some_and(NotifyError::is_unreachable)
        {
            eprintln!(
                "💡 Make sure the ingestion service is running at {}",
                self.ingest.base_url()
            );
        }
    }

    fn finish(&self, session_id: &str) {
        eprintln!();
        eprintln!("🧠 Claude Code observability active");
        eprintln!("📊 Dashboard: {}", self.ingest.dashboard_url());
        eprintln!("🔗 Session ID: {}", session_id);
        eprintln!();
    }
}

/// Build the session start event for a working directory
pub fn session_event(session_id: &str, user: &str, cwd: &Path) -> Event {
    let project = project_name(cwd);
    Event::new(
        session_id,
        EventType::SessionStart,
        format!("Started Claude Code session in {}", project),
        AGENT_NAME,
    )
    .with_metadata("hook", SessionStart::NAME)
    .with_metadata("user", user)
    .with_metadata("cwd", cwd.display().to_string())
    .with_metadata("projectName", project)
}

/// Project name is the last component of the working directory
fn project_name(cwd: &Path) -> String {
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_event_fields() {
        let event = session_event("session-0123456789ab", "ada", Path::new("/home/ada/hivemind"));
        assert_eq!(event.event_type, EventType::SessionStart);
        assert_eq!(event.action, "Started Claude Code session in hivemind");
        assert_eq!(event.status, "completed");
        assert_eq!(event.agent_name, "claude-code-orchestrator");
        assert_eq!(event.source_app, "claude-code");
        assert!(event.duration.is_none());
        assert!(event.payload.is_none());
    }

    #[test]
    fn test_session_event_metadata() {
        let event = session_event("s", "ada", Path::new("/home/ada/hivemind"));
        assert_eq!(event.metadata["hook"], "session-start");
        assert_eq!(event.metadata["user"], "ada");
        assert_eq!(event.metadata["cwd"], "/home/ada/hivemind");
        assert_eq!(event.metadata["projectName"], "hivemind");
    }

    #[test]
    fn test_unreadable_cwd_keeps_every_key() {
        let event = session_event("s", "ada", Path::new(""));
        assert_eq!(event.action, "Started Claude Code session in ");
        assert_eq!(event.metadata["cwd"], "");
        assert_eq!(event.metadata["projectName"], "");
        assert_eq!(event.metadata["user"], "ada");
    }

    #[test]
    fn test_project_name_of_root_is_empty() {
        assert_eq!(project_name(Path::new("/")), "");
    }

    #[test]
    fn test_user_flag() {
        let hook = SessionStart::try_parse_from(["session-start", "--user", "grace"]).unwrap();
        assert_eq!(hook.user, "grace");
    }
}
