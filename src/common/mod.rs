//! Common types and utilities shared by all hooks.

pub mod config;
pub mod debug;
pub mod json;
pub mod session;
pub mod types;
