//! List connectors with their connector and task states

use anyhow::{Context, Result};
use kconnect_core::{ConnectClient, ConnectorStatus};
use std::io::Write;

use crate::output::{self, Tone};

/// One line of `ls` output
#[derive(Debug)]
enum Entry {
    /// Status fetched and decoded
    Status(ConnectorStatus),
    /// Status request answered with something unusable
    Unavailable { name: String, status: u16 },
}

impl Entry {
    fn name(&self) -> &str {
        match self {
            Entry::Status(s) => &s.name,
            Entry::Unavailable { name, .. } => name,
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Entry::Status(s) if s.is_healthy() => Tone::Success,
            Entry::Status(s) if s.is_paused() => Tone::Warning,
            _ => Tone::Failure,
        }
    }

    fn render(&self, width: usize) -> String {
        match self {
            Entry::Status(s) => {
                let mut line = format!("{:<width$}  {}", s.name, s.connector.state);
                for task in &s.tasks {
                    line.push_str(&format!("  task[{}]: {}", task.id, task.state));
                }
                line
            }
            Entry::Unavailable { name, status } => {
                format!("{:<width$}  HTTP {}", name, status)
            }
        }
    }
}

/// Run the ls command
///
/// Issues one list request followed by one status request per connector.
pub async fn run<W: Write>(client: &ConnectClient, out: &mut W) -> Result<()> {
    let response = client.list_connectors().await?;
    if !response.is_success() {
        output::echo(out, &response)?;
        return Ok(());
    }

    let names: Vec<String> = response
        .json()
        .context("Unexpected response to connector listing")?;
    tracing::debug!("Fetching status for {} connectors", names.len());

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let status = client.get_status(&name).await?;
        let entry = match status.json::<ConnectorStatus>() {
            Ok(parsed) if status.is_success() => Entry::Status(parsed),
            _ => Entry::Unavailable {
                name,
                status: status.status,
            },
        };
        entries.push(entry);
    }

    let width = entries
        .iter()
        .map(|e| e.name().chars().count())
        .max()
        .unwrap_or(0);

    for entry in &entries {
        writeln!(out, "{}", entry.tone().style().apply_to(entry.render(width)))?;
    }
    Ok(())
}
