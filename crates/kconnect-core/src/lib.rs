//! kconnect Core Library
//!
//! This crate provides the pieces of kconnect that do not depend on a terminal:
//! - Environment store (named Kafka Connect endpoints persisted as JSON)
//! - Connect REST client returning raw status/body pairs
//! - Connector status and config types
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Environment │────▶│   Connect   │────▶│ ApiResponse │
//! │   (JSON)    │     │   Client    │     │ status/body │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use kconnect_core::{ConnectClient, EnvironmentStore};
//!
//! let config = EnvironmentStore::new(EnvironmentStore::default_path()?).load()?;
//! let (_, url) = config.resolve(None)?;
//! let client = ConnectClient::builder().base_url(url).build()?;
//! let response = client.list_connectors().await?;
//! println!("{} {}", response.status, response.body);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod connectors;
pub mod environment;
pub mod error;
pub mod status;

pub use client::{ApiResponse, ClientBuilder, ConnectClient};
pub use connectors::{ConnectorConfig, ConnectorState, ConnectorStatus, NewConnector, TaskStatus};
pub use environment::{EnvironmentConfig, EnvironmentStore};
pub use error::{Error, Result};
pub use status::StatusClass;
