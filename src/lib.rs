#![deny(missing_docs)]

//! Core library for the BrowseMate demo catalog service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Catalog item records.
pub mod items;
/// Structured logging and tracing setup.
pub mod logging;
/// Example Model Context Protocol tool server.
pub mod mcp;
/// Generic in-memory resource storage.
pub mod store;
/// User account records.
pub mod users;
/// Input normalization and field validators.
pub mod validation;
