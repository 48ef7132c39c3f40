//! Show or change the environment selection

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use kconnect_core::EnvironmentStore;
use std::io::Write;

/// Arguments for the env command.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("action").args(["set", "add", "remove"])))]
pub struct EnvArgs {
    /// Make NAME the current environment
    #[arg(short, long, value_name = "NAME")]
    pub set: Option<String>,

    /// Add or replace an environment
    #[arg(long, num_args = 2, value_names = ["NAME", "URL"])]
    pub add: Option<Vec<String>>,

    /// Remove an environment
    #[arg(long = "rm", value_name = "NAME")]
    pub remove: Option<String>,
}

/// Run the env command
pub fn run<W: Write>(store: &EnvironmentStore, out: &mut W, args: &EnvArgs) -> Result<()> {
    let config = if let Some(name) = &args.set {
        let config = store.set_current(name)?;
        tracing::info!("Switched to environment {}", name);
        config
    } else if let Some([name, url]) = args.add.as_deref() {
        let config = store.add(name, url)?;
        tracing::info!("Saved environment {} -> {}", name, url);
        config
    } else if let Some(name) = &args.remove {
        let config = store.remove(name)?;
        tracing::info!("Removed environment {}", name);
        config
    } else {
        store.load()?
    };

    let rendered = serde_json::to_string_pretty(&config)
        .context("Failed to render environment file")?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
