//! Observability hooks for Claude Code sessions.
//!
//! Each binary in this package is invoked by Claude Code at a lifecycle point
//! and reports one event to the ingestion endpoint. Delivery is best-effort:
//! the hooks always exit successfully.

pub mod common;
pub mod hooks;
pub mod ipc;
