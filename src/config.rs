use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SemvertagError};

/// File name looked up in the repository root and the user config directory
pub const CONFIG_FILE_NAME: &str = "semvertag.toml";

/// Represents the complete configuration for semvertag.
///
/// Every value is a default that command-line flags may override.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_primary_branch() -> String {
    "master".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

fn default_print_last() -> usize {
    5
}

/// How tags are named and versions computed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    /// Tag prefix; tags are named `<prefix>-v1.2.3`
    #[serde(default)]
    pub prefix: String,

    /// Branch whose tags carry no branch segment
    #[serde(default = "default_primary_branch")]
    pub primary_branch: String,

    /// Reset lower components on a major/minor bump
    #[serde(default)]
    pub reset_lower: bool,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            prefix: String::new(),
            primary_branch: default_primary_branch(),
            reset_lower: false,
        }
    }
}

/// Remote used for fetching tags and pushing the new one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,

    #[serde(default = "default_true")]
    pub fetch: bool,

    #[serde(default = "default_true")]
    pub push: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
            fetch: true,
            push: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Number of recent matching tags printed before tagging
    #[serde(default = "default_print_last")]
    pub print_last: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            print_last: default_print_last(),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| SemvertagError::config(e.to_string()))
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| {
        SemvertagError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), "loading configuration");
    parse_config(&text)
        .map_err(|e| SemvertagError::config(format!("Invalid {}: {}", path.display(), e)))
}

/// Path of the config file `load_config` would read, if any
///
/// `repo_dir` is the working directory of the repository being tagged, not the
/// process working directory, so `--repo` picks up that project's settings.
pub fn find_config_file(config_path: Option<&Path>, repo_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = repo_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semvertag.toml` in the repository working directory
/// 3. `semvertag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists (or was named explicitly) but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_dir: &Path) -> Result<Config> {
    match find_config_file(config_path, repo_dir) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}
