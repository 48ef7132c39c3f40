//! CLI command implementations
//!
//! Handlers receive the [`ConnectClient`](kconnect_core::ConnectClient) and an
//! output writer explicitly; nothing is process-global.

pub mod connector;
pub mod env;
pub mod ls;
pub mod plugin;
pub mod post;
pub mod recreate;
