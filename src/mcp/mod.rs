//! Example Model Context Protocol (MCP) tool server.
//!
//! A small stdio server that shows how tools and resource templates are wired with `rmcp`.
//! The surface area consists of:
//!
//! - Tools: `add`, `divide`, and `echo`.
//! - Resource templates: `greeting://{name}`.
//!
//! Tool handlers, input schemas, and result formatting live in focused submodules.

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::{DemoToolServer, SERVER_NAME};
