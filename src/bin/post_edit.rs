//! Claude Code file edit hook.

use claude_observability_hooks::hooks::{self, post_edit::PostEdit};
use std::process::ExitCode;

fn main() -> ExitCode {
    hooks::run::<PostEdit>()
}
