//! kconnect CLI
//!
//! Command-line client for administering Kafka Connect clusters.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kconnect_core::{ConnectClient, EnvironmentStore};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

/// kconnect - Kafka Connect administration
#[derive(Parser)]
#[command(name = "kconnect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Environment file path (defaults to ~/.kconnect/environments.json)
    #[arg(long, env = "KCONNECT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Target this environment for one invocation instead of the current one
    #[arg(short, long, env = "KCONNECT_ENV", global = true)]
    env: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or switch the current environment
    Env(commands::env::EnvArgs),

    #[command(flatten)]
    Cluster(ClusterCommands),
}

/// Commands that talk to the selected Kafka Connect cluster
#[derive(Subcommand)]
enum ClusterCommands {
    /// List connectors with connector and task states
    Ls,

    /// Show connector info
    Get {
        /// Connector name
        name: String,
    },

    /// Show connector and task status
    Status {
        /// Connector name
        name: String,
    },

    /// Show connector config
    Conf {
        /// Connector name
        name: String,
    },

    /// Create a connector from a JSON file
    Post {
        /// File holding `{"name": ..., "config": {...}}`
        config_file: PathBuf,
    },

    /// Pause a connector
    Pause {
        /// Connector name
        name: String,
    },

    /// Resume a paused connector
    Resume {
        /// Connector name
        name: String,
    },

    /// Restart a connector, or one of its tasks
    Restart {
        /// Connector name
        name: String,

        /// Restart only this task
        #[arg(short = 't', long = "task_id", visible_alias = "task-id")]
        task_id: Option<u32>,
    },

    /// Delete a connector
    Rm {
        /// Connector name
        name: String,
    },

    /// Delete a connector and create it again with the same config
    Recreate {
        /// Connector name
        name: String,
    },

    /// Manage connector plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommands,
    },
}

#[derive(Subcommand)]
enum PluginCommands {
    /// List installed connector plugins
    Ls,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = match cli.config {
        Some(path) => EnvironmentStore::new(path),
        None => EnvironmentStore::new(EnvironmentStore::default_path()?),
    };
    let mut out = std::io::stdout();

    let command = match cli.command {
        Commands::Env(args) => return commands::env::run(&store, &mut out, &args),
        Commands::Cluster(command) => command,
    };

    let config = store.load().context("Failed to load environments")?;
    let (env_name, base_url) = config.resolve(cli.env.as_deref())?;
    tracing::debug!("Using environment {} at {}", env_name, base_url);

    let client = ConnectClient::builder().base_url(base_url).build()?;
    let result = dispatch(&client, &mut out, command).await;
    drop(client);

    result.map_err(|e| {
        let unreachable = e.chain().any(|cause| {
            cause
                .downcast_ref::<kconnect_core::Error>()
                .is_some_and(|c| c.is_unreachable())
        });
        if unreachable {
            e.context(format!(
                "Kafka Connect environment '{}' at {} is unreachable",
                env_name, base_url
            ))
        } else {
            e
        }
    })
}

async fn dispatch<W: Write>(
    client: &ConnectClient,
    out: &mut W,
    command: ClusterCommands,
) -> Result<()> {
    match command {
        ClusterCommands::Ls => commands::ls::run(client, out).await,
        ClusterCommands::Get { name } => commands::connector::get(client, out, &name).await,
        ClusterCommands::Status { name } => commands::connector::status(client, out, &name).await,
        ClusterCommands::Conf { name } => commands::connector::conf(client, out, &name).await,
        ClusterCommands::Post { config_file } => commands::post::run(client, out, &config_file).await,
        ClusterCommands::Pause { name } => commands::connector::pause(client, out, &name).await,
        ClusterCommands::Resume { name } => commands::connector::resume(client, out, &name).await,
        ClusterCommands::Restart { name, task_id } => {
            commands::connector::restart(client, out, &name, task_id).await
        }
        ClusterCommands::Rm { name } => commands::connector::rm(client, out, &name).await,
        ClusterCommands::Recreate { name } => commands::recreate::run(client, out, &name).await,
        ClusterCommands::Plugin { command } => match command {
            PluginCommands::Ls => commands::plugin::list(client, out).await,
        },
    }
}
