//! Communication with the observability ingestion service.

pub mod client;
