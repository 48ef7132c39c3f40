//! Single-connector commands: one REST call, one echo

use anyhow::Result;
use kconnect_core::ConnectClient;
use std::io::Write;

use crate::output;

/// Show connector info
pub async fn get<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    let response = client.get(name).await?;
    output::echo(out, &response)?;
    Ok(())
}

/// Show connector and task status
pub async fn status<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    let response = client.get_status(name).await?;
    output::echo(out, &response)?;
    Ok(())
}

/// Show connector config
pub async fn conf<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    let response = client.get_config(name).await?;
    output::echo(out, &response)?;
    Ok(())
}

/// Pause a connector and its tasks
pub async fn pause<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    tracing::info!("Pausing connector {}", name);
    let response = client.pause(name).await?;
    output::echo(out, &response)?;
    Ok(())
}

/// Resume a paused connector
pub async fn resume<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    tracing::info!("Resuming connector {}", name);
    let response = client.resume(name).await?;
    output::echo(out, &response)?;
    Ok(())
}

/// Restart the connector, or only one of its tasks
pub async fn restart<W: Write>(
    client: &ConnectClient,
    out: &mut W,
    name: &str,
    task_id: Option<u32>,
) -> Result<()> {
    let response = match task_id {
        Some(id) => {
            tracing::info!("Restarting task {} of connector {}", id, name);
            client.restart_task(name, id).await?
        }
        None => {
            tracing::info!("Restarting connector {}", name);
            client.restart(name).await?
        }
    };
    output::echo(out, &response)?;
    Ok(())
}

/// Delete a connector
pub async fn rm<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    tracing::info!("Deleting connector {}", name);
    let response = client.delete(name).await?;
    output::echo(out, &response)?;
    Ok(())
}
