// SPDX-License-Identifier: GPL-3.0-only

//! Activation status from the kernel's live-swap listing.
//!
//! Nothing here is cached: the set of active swap areas is kernel-global and
//! can change between any two calls, so every query re-reads the registry.

use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use swap_types::{LiveSwapEntry, parse_registry};
use tracing::debug;

use crate::config::SwapConfig;
use crate::error::Result;
use crate::resolve::DeviceResolver;

/// True when some line of `contents` starts with `device`.
///
/// Lines are compared as raw bytes, since the kernel lists paths in whatever
/// encoding they were created with. The header line takes part in the scan
/// but can never start with a device path. Matching is by prefix, so
/// `/dev/sda1` also matches a `/dev/sda12` row.
pub fn registry_lists(contents: &[u8], device: &[u8]) -> bool {
    !device.is_empty()
        && contents
            .split(|byte| *byte == b'\n')
            .any(|line| line.starts_with(device))
}

#[derive(Debug, Clone)]
pub struct SwapStatus {
    registry: PathBuf,
    resolver: DeviceResolver,
}

impl Default for SwapStatus {
    fn default() -> Self {
        Self::new("/proc/swaps", DeviceResolver::default())
    }
}

impl SwapStatus {
    pub fn new(registry: impl Into<PathBuf>, resolver: DeviceResolver) -> Self {
        Self {
            registry: registry.into(),
            resolver,
        }
    }

    pub fn from_config(config: &SwapConfig) -> Self {
        Self::new(&config.swaps_registry, DeviceResolver::from_config(config))
    }

    fn read_registry(&self) -> Result<Vec<u8>> {
        debug!("Reading swap registry {:?}", self.registry);
        Ok(fs::read(&self.registry)?)
    }

    /// Whether `device` is currently an active swap area.
    pub fn is_active(&self, device: &Path) -> Result<bool> {
        let resolved = self.resolver.resolve(device)?;
        let contents = self.read_registry()?;
        let active = registry_lists(&contents, resolved.as_os_str().as_bytes());
        debug!("{:?} (as {:?}) active: {}", device, resolved, active);
        Ok(active)
    }

    /// All currently active swap areas.
    pub fn active_entries(&self) -> Result<Vec<LiveSwapEntry>> {
        let contents = self.read_registry()?;
        Ok(parse_registry(&String::from_utf8_lossy(&contents)))
    }
}
