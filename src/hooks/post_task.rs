//! TaskComplete hook: reports a finished unit of work.

use crate::common::config::{lossy, IngestConfig};
use crate::common::types::{Event, EventType};
use crate::hooks::{working_dir, Hook};
use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;

/// Agent name reported for task events
const AGENT_NAME: &str = "claude-code-agent";

/// Keyword rules checked in order against the lowercased description.
/// The first rule with a matching keyword decides the event type.
const TASK_RULES: &[(&[&str], EventType)] = &[
    (&["test"], EventType::ToolUse),
    (&["code", "implement"], EventType::AgentSpawn),
    (&["fix", "debug"], EventType::ToolUse),
];

/// Event type when no rule matches
const DEFAULT_TASK_TYPE: EventType = EventType::AgentSpawn;

/// Report a completed Claude Code task to the observability dashboard
#[derive(Parser, Debug)]
#[command(name = "post-task")]
#[command(about = "Report a completed Claude Code task to the observability dashboard")]
pub struct PostTask {
    #[command(flatten)]
    pub ingest: IngestConfig,

    /// What the task was about
    #[arg(long, env = "TASK_DESCRIPTION", default_value = "Unknown task")]
    pub description: OsString,

    /// Outcome, e.g. "completed" or "failed"
    #[arg(long, env = "TASK_STATUS", default_value = "completed")]
    pub status: OsString,

    /// Duration in milliseconds; anything but plain digits counts as 0
    #[arg(long, env = "TASK_DURATION", default_value = "0")]
    pub duration: OsString,
}

impl Hook for PostTask {
    const NAME: &'static str = "post-task";

    fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    fn build_event(&self, session_id: &str) -> Result<Event> {
        Ok(task_event(
            session_id,
            &lossy(&self.description),
            &lossy(&self.status),
            &lossy(&self.duration),
            &working_dir().display().to_string(),
        ))
    }

    fn delivered(&self, _session_id: &str) {
        eprintln!("✅ Event sent to observability dashboard");
    }
}

/// Build the task completion event
pub fn task_event(
    session_id: &str,
    description: &str,
    status: &str,
    duration: &str,
    cwd: &str,
) -> Event {
    let mut event = Event::new(session_id, classify_task(description), description, AGENT_NAME)
        .with_metadata("hook", PostTask::NAME)
        .with_metadata("cwd", cwd);
    event.status = status.to_string();
    event.duration = Some(parse_duration(duration));
    event
}

/// Classify a task by keywords in its description
pub fn classify_task(description: &str) -> EventType {
    let description = description.to_lowercase();
    TASK_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| description.contains(k)))
        .map(|(_, event_type)| *event_type)
        .unwrap_or(DEFAULT_TASK_TYPE)
}

/// Parse a millisecond duration, treating anything but plain digits as 0
pub fn parse_duration(raw: &str) -> u64 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification {
        use super::*;

        #[test]
        fn test_test_is_tool_use() {
            assert_eq!(classify_task("Run the test suite"), EventType::ToolUse);
        }

        #[test]
        fn test_case_insensitive() {
            assert_eq!(classify_task("Add TESTS for parser"), EventType::ToolUse);
        }

        #[test]
        fn test_implement_is_agent_spawn() {
            assert_eq!(classify_task("Implement login flow"), EventType::AgentSpawn);
        }

        #[test]
        fn test_code_is_agent_spawn() {
            assert_eq!(classify_task("Write code for export"), EventType::AgentSpawn);
        }

        #[test]
        fn test_fix_and_debug_are_tool_use() {
            assert_eq!(classify_task("Fix typo"), EventType::ToolUse);
            assert_eq!(classify_task("Debug crash on start"), EventType::ToolUse);
        }

        #[test]
        fn test_first_rule_wins() {
            assert_eq!(classify_task("fix the failing test"), EventType::ToolUse);
            assert_eq!(classify_task("implement fix for race"), EventType::AgentSpawn);
            assert_eq!(classify_task("debug code path"), EventType::AgentSpawn);
        }

        #[test]
        fn test_default_is_agent_spawn() {
            assert_eq!(classify_task("Unknown task"), EventType::AgentSpawn);
            assert_eq!(classify_task(""), EventType::AgentSpawn);
        }
    }

    mod duration {
        use super::*;

        #[test]
        fn test_digits() {
            assert_eq!(parse_duration("150"), 150);
            assert_eq!(parse_duration("0"), 0);
        }

        #[test]
        fn test_not_digits() {
            assert_eq!(parse_duration("abc"), 0);
            assert_eq!(parse_duration(""), 0);
            assert_eq!(parse_duration("-5"), 0);
            assert_eq!(parse_duration("+5"), 0);
            assert_eq!(parse_duration("1.5"), 0);
            assert_eq!(parse_duration(" 15"), 0);
        }

        #[test]
        fn test_overflow_is_zero() {
            assert_eq!(parse_duration("99999999999999999999999"), 0);
        }
    }

    #[test]
    fn test_task_event_fields() {
        let event = task_event("s", "Run tests", "failed", "150", "/work/app");
        assert_eq!(event.event_type, EventType::ToolUse);
        assert_eq!(event.action, "Run tests");
        assert_eq!(event.status, "failed");
        assert_eq!(event.duration, Some(150));
        assert_eq!(event.agent_name, "claude-code-agent");
        assert_eq!(event.metadata["hook"], "post-task");
        assert_eq!(event.metadata["cwd"], "/work/app");
    }

    #[test]
    fn test_defaults_from_flags() {
        let hook = PostTask::try_parse_from([
            "post-task",
            "--description",
            "Unknown task",
            "--status",
            "completed",
            "--duration",
            "abc",
        ])
        .unwrap();
        let event = task_event(
            "s",
            &lossy(&hook.description),
            &lossy(&hook.status),
            &lossy(&hook.duration),
            "/",
        );
        assert_eq!(event.duration, Some(0));
        assert_eq!(event.event_type, EventType::AgentSpawn);
    }
}
