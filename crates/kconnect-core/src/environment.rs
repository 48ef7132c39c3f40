//! Named Kafka Connect environments
//!
//! The environment file maps names to REST endpoints and remembers which one
//! is current:
//!
//! ```json
//! {
//!   "current": "local",
//!   "available": {
//!     "local": "localhost:8083",
//!     "staging": "connect.staging.internal:8083"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory under the home directory holding kconnect state
const CONFIG_DIR: &str = ".kconnect";

/// File name of the environment file
const CONFIG_FILE: &str = "environments.json";

/// Contents of the environment file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Currently selected environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,

    /// Environment name to base URL (`host:port` or full URL), in file order
    #[serde(default)]
    pub available: IndexMap<String, String>,
}

impl EnvironmentConfig {
    /// Check that `current`, if set, names an available environment
    pub fn validate(&self) -> Result<()> {
        match &self.current {
            Some(name) if !self.available.contains_key(name) => Err(Error::ConfigInvalid {
                message: format!("current environment '{}' is not in available", name),
            }),
            _ => Ok(()),
        }
    }

    /// Resolve the environment to talk to.
    ///
    /// An explicit `name` wins over `current`. Returns `(name, base_url)`.
    pub fn resolve<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a str)> {
        let name = name
            .or(self.current.as_deref())
            .ok_or(Error::NoEnvironmentSelected)?;
        let url = self.lookup(name)?;
        Ok((name, url))
    }

    /// Clear `current` when it names an environment that no longer exists
    fn drop_dangling_current(&mut self) {
        if self
            .current
            .as_ref()
            .is_some_and(|name| !self.available.contains_key(name))
        {
            self.current = None;
        }
    }

    fn lookup(&self, name: &str) -> Result<&str> {
        self.available
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> Error {
        Error::UnknownEnvironment {
            name: name.to_string(),
            available: self.available.keys().cloned().collect(),
        }
    }
}

/// Reads and writes the environment file at a fixed path
#[derive(Debug, Clone)]
pub struct EnvironmentStore {
    path: PathBuf,
}

impl EnvironmentStore {
    /// Create a store bound to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.kconnect/environments.json`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| Error::ConfigInvalid {
            message: "cannot determine home directory".to_string(),
        })?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Path of the environment file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the environment file
    pub fn load(&self) -> Result<EnvironmentConfig> {
        let config = self.read()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the environment file without checking `current`.
    ///
    /// Used by the mutating operations so a file whose `current` was edited
    /// away can still be repaired.
    fn read(&self) -> Result<EnvironmentConfig> {
        if !self.path.exists() {
            return Err(Error::ConfigMissing {
                path: self.path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let config: EnvironmentConfig =
            serde_json::from_str(&contents).map_err(|source| Error::ConfigMalformed {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(config)
    }

    /// Overwrite the environment file with indented JSON
    pub fn save(&self, config: &EnvironmentConfig) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut contents = serde_json::to_string_pretty(config)?;
        contents.push('\n');
        std::fs::write(&self.path, contents)?;
        tracing::debug!("Wrote environment file {}", self.path.display());
        Ok(())
    }

    /// Make `name` the current environment and persist.
    ///
    /// The file is left untouched when `name` is unknown.
    pub fn set_current(&self, name: &str) -> Result<EnvironmentConfig> {
        let mut config = self.read()?;
        config.lookup(name)?;
        config.current = Some(name.to_string());
        self.save(&config)?;
        Ok(config)
    }

    /// Add or replace an environment and persist.
    ///
    /// Starts a fresh file when none exists yet. The added environment becomes
    /// current when nothing valid is selected.
    pub fn add(&self, name: &str, url: &str) -> Result<EnvironmentConfig> {
        let mut config = match self.read() {
            Ok(config) => config,
            Err(Error::ConfigMissing { .. }) => EnvironmentConfig::default(),
            Err(e) => return Err(e),
        };
        config.available.insert(name.to_string(), url.to_string());
        config.drop_dangling_current();
        if config.current.is_none() {
            config.current = Some(name.to_string());
        }
        self.save(&config)?;
        Ok(config)
    }

    /// Remove an environment and persist, clearing `current` if it no longer
    /// names an available environment
    pub fn remove(&self, name: &str) -> Result<EnvironmentConfig> {
        let mut config = self.read()?;
        config.lookup(name)?;
        config.available.shift_remove(name);
        config.drop_dangling_current();
        self.save(&config)?;
        Ok(config)
    }
}
