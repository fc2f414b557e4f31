//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Remote API endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://na1.replicon.com/orbitzllc/remoteAPI/remoteapi.ashx/8.29.28/";

/// A project code and task name to book time against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTarget {
    pub project: String,
    pub task: String,
}

impl FromStr for EntryTarget {
    type Err = String;

    /// Parses `PROJECT=TASK`. Task names may contain `=` and `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (project, task) = s
            .split_once('=')
            .ok_or_else(|| format!("expected PROJECT=TASK, got {s:?}"))?;
        let (project, task) = (project.trim(), task.trim());
        if project.is_empty() || task.is_empty() {
            return Err(format!("expected PROJECT=TASK, got {s:?}"));
        }
        Ok(Self {
            project: project.to_string(),
            task: task.to_string(),
        })
    }
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote API endpoint.
    pub endpoint: String,
    /// Login name, also used to resolve the user identity.
    pub username: Option<String>,
    pub password: Option<String>,
    /// Client (customer) name all time is booked under.
    pub client_name: Option<String>,
    /// Hours entered per task and day when `--hours` is not given.
    pub default_hours: f64,
    /// Entries used when `--entry` is not given.
    pub entries: Vec<EntryTarget>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("client_name", &self.client_name)
            .field("default_hours", &self.default_hours)
            .field("entries", &self.entries)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: None,
            password: None,
            client_name: None,
            default_hours: 4.0,
            entries: Vec::new(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RT_*)
        figment = figment.merge(Env::prefixed("RT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for rt.
///
/// On Linux: `~/.config/rt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rt"))
}
