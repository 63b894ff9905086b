//! Claude Code task completion hook.

use claude_observability_hooks::hooks::{self, post_task::PostTask};
use std::process::ExitCode;

fn main() -> ExitCode {
    hooks::run::<PostTask>()
}
