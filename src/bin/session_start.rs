//! Claude Code session start hook.

use claude_observability_hooks::hooks::{self, session_start::SessionStart};
use std::process::ExitCode;

fn main() -> ExitCode {
    hooks::run::<SessionStart>()
}
