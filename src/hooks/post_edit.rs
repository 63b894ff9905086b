//! FileEdit hook: reports a file mutation.

use crate::common::config::{lossy, IngestConfig};
use crate::common::types::{Event, EventType, Squadron};
use crate::hooks::Hook;
use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

/// Agent name reported for edit events
const AGENT_NAME: &str = "code-editor";

/// Coarse file category derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Typescript,
    Python,
    Documentation,
    Config,
    Code,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Typescript => "typescript",
            FileCategory::Python => "python",
            FileCategory::Documentation => "documentation",
            FileCategory::Config => "config",
            FileCategory::Code => "code",
        }
    }
}

/// Extension lookup table, extensions include the leading dot
const FILE_CATEGORIES: &[(&[&str], FileCategory)] = &[
    (&[".ts", ".tsx", ".js", ".jsx"], FileCategory::Typescript),
    (&[".py"], FileCategory::Python),
    (&[".md", ".mdx"], FileCategory::Documentation),
    (&[".json", ".yaml", ".yml"], FileCategory::Config),
];

/// Kind of edit, as far as the action text is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Create,
    Modify,
    Delete,
}

impl EditKind {
    /// Parse `EDIT_TYPE`; anything unrecognized is a modification
    pub fn parse(raw: &str) -> Self {
        match raw {
            "create" => EditKind::Create,
            "delete" => EditKind::Delete,
            _ => EditKind::Modify,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            EditKind::Create => "Created",
            EditKind::Modify => "Edited",
            EditKind::Delete => "Deleted",
        }
    }
}

/// Report a file edit to the observability dashboard
#[derive(Parser, Debug)]
#[command(name = "post-edit")]
#[command(about = "Report a file edit to the observability dashboard")]
pub struct PostEdit {
    #[command(flatten)]
    pub ingest: IngestConfig,

    /// Path of the edited file
    #[arg(long, env = "FILE_PATH", default_value = "unknown")]
    pub file_path: OsString,

    /// Edit kind: create, modify or delete
    #[arg(long, env = "EDIT_TYPE", default_value = "modify")]
    pub edit_type: OsString,
}

impl Hook for PostEdit {
    const NAME: &'static str = "post-edit";

    fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    fn build_event(&self, session_id: &str) -> Result<Event> {
        Ok(edit_event(
            session_id,
            &lossy(&self.file_path),
            &lossy(&self.edit_type),
        ))
    }
}

/// Build the file edit event
pub fn edit_event(session_id: &str, file_path: &str, edit_type: &str) -> Event {
    let name = base_name(file_path);
    let extension = extension(name);
    let action = format!("{} {}", EditKind::parse(edit_type).verb(), name);

    let mut event = Event::new(session_id, EventType::ToolUse, action, AGENT_NAME)
        .with_payload("filePath", file_path)
        .with_payload("fileType", categorize(&extension).as_str())
        .with_payload("editType", edit_type)
        .with_metadata("hook", PostEdit::NAME)
        .with_metadata("extension", extension);
    event.squadron = Some(Squadron::Data);
    event
}

/// Map an extension (with leading dot) to its category
pub fn categorize(extension: &str) -> FileCategory {
    FILE_CATEGORIES
        .iter()
        .find(|(extensions, _)| extensions.contains(&extension))
        .map(|(_, category)| *category)
        .unwrap_or(FileCategory::Code)
}

/// Text after the last '/', empty for a trailing slash
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Final ".suffix" of a file name; dot-files have none
fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
