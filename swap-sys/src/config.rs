// SPDX-License-Identifier: GPL-3.0-only

//! Runtime configuration loaded from TOML.
//!
//! Every field has a default matching a stock Linux system, so an empty file
//! (or no file at all) is a valid configuration:
//!
//! ```toml
//! swaps_registry = "/proc/swaps"
//! mapper_dir = "/dev/mapper"
//! page_size = 4096
//!
//! [commands]
//! swapon = "/usr/sbin/swapon"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SysError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Kernel listing of active swap areas.
    pub swaps_registry: PathBuf,
    /// Directory holding canonical block device nodes.
    pub dev_dir: PathBuf,
    /// Directory of device-mapper symbolic names.
    pub mapper_dir: PathBuf,
    /// sysfs block directory, used for device-mapper name lookups.
    pub sys_block_dir: PathBuf,
    /// Overrides the page size reported by the system.
    pub page_size: Option<usize>,
    pub commands: CommandNames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandNames {
    pub mkswap: String,
    pub swapon: String,
    pub swapoff: String,
    pub dmsetup: String,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            swaps_registry: PathBuf::from("/proc/swaps"),
            dev_dir: PathBuf::from("/dev"),
            mapper_dir: PathBuf::from("/dev/mapper"),
            sys_block_dir: PathBuf::from("/sys/block"),
            page_size: None,
            commands: CommandNames::default(),
        }
    }
}

impl Default for CommandNames {
    fn default() -> Self {
        Self {
            mkswap: "mkswap".to_string(),
            swapon: "swapon".to_string(),
            swapoff: "swapoff".to_string(),
            dmsetup: "dmsetup".to_string(),
        }
    }
}

impl SwapConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);

        let raw = fs::read_to_string(path).map_err(|error| SysError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let config: SwapConfig = toml::from_str(&raw).map_err(|error| SysError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        config.validate().map_err(|reason| SysError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, path) in [
            ("swaps_registry", &self.swaps_registry),
            ("dev_dir", &self.dev_dir),
            ("mapper_dir", &self.mapper_dir),
            ("sys_block_dir", &self.sys_block_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(format!("{name} must not be empty"));
            }
        }

        if self.page_size == Some(0) {
            return Err("page_size must be greater than zero".to_string());
        }

        let commands = &self.commands;
        for (name, value) in [
            ("mkswap", &commands.mkswap),
            ("swapon", &commands.swapon),
            ("swapoff", &commands.swapoff),
            ("dmsetup", &commands.dmsetup),
        ] {
            if value.trim().is_empty() {
                return Err(format!("commands.{name} must not be empty"));
            }
        }

        Ok(())
    }
}
