//! Connector plugin commands

use anyhow::Result;
use kconnect_core::ConnectClient;
use std::io::Write;

use crate::output;

/// List installed connector plugins
pub async fn list<W: Write>(client: &ConnectClient, out: &mut W) -> Result<()> {
    let response = client.list_plugins().await?;
    output::echo(out, &response)?;
    Ok(())
}
