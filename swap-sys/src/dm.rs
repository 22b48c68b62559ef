// SPDX-License-Identifier: GPL-3.0-only

//! Device-mapper collaborator
//!
//! Swap on top of a linear mapping is a common layout for encrypted or
//! relocated swap. Only name-in/name-out operations are provided; table
//! semantics beyond a single linear target are left to `dmsetup`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SwapConfig;
use crate::error::{Result, SysError};
use crate::exec::CommandExecutor;
use crate::resolve::DeviceResolver;

pub trait DeviceMapper {
    /// Map `length_sectors` sectors of `device` linearly under `name`.
    fn create_linear(
        &self,
        name: &str,
        device: &Path,
        length_sectors: u64,
        uuid: Option<&str>,
    ) -> Result<()>;

    fn remove(&self, name: &str) -> Result<()>;

    /// Map name providing a node such as `dm-0`.
    fn name_from_node(&self, node: &str) -> Result<String>;

    /// Node name (`dm-N`) backing the map `name`.
    fn node_from_name(&self, name: &str) -> Result<String>;
}

fn require_name(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains('/') {
        return Err(SysError::InvalidArgument(format!("invalid {kind} '{value}'")));
    }
    Ok(())
}

/// `dmsetup` backed implementation.
pub struct DmSetup<E> {
    executor: E,
    program: String,
    sys_block_dir: PathBuf,
    mapper_dir: PathBuf,
    resolver: DeviceResolver,
}

impl<E: CommandExecutor> DmSetup<E> {
    pub fn new(executor: E) -> Self {
        Self::from_config(&SwapConfig::default(), executor)
    }

    pub fn from_config(config: &SwapConfig, executor: E) -> Self {
        Self {
            executor,
            program: config.commands.dmsetup.clone(),
            sys_block_dir: config.sys_block_dir.clone(),
            mapper_dir: config.mapper_dir.clone(),
            resolver: DeviceResolver::from_config(config),
        }
    }

    pub fn create_linear_args(
        &self,
        name: &str,
        device: &Path,
        length_sectors: u64,
        uuid: Option<&str>,
    ) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            self.program.as_str().into(),
            "create".into(),
            name.into(),
        ];
        if let Some(uuid) = uuid {
            argv.push("--uuid".into());
            argv.push(uuid.into());
        }

        let mut table = OsString::from(format!("0 {length_sectors} linear "));
        table.push(device.as_os_str());
        table.push(" 0");
        argv.push("--table".into());
        argv.push(table);
        argv
    }
}

impl<E: CommandExecutor> DeviceMapper for DmSetup<E> {
    fn create_linear(
        &self,
        name: &str,
        device: &Path,
        length_sectors: u64,
        uuid: Option<&str>,
    ) -> Result<()> {
        require_name("map name", name)?;
        if length_sectors == 0 {
            return Err(SysError::InvalidArgument(
                "mapping length must be non-zero".to_string(),
            ));
        }

        info!("Creating linear mapping {} over {:?}", name, device);
        self.executor
            .execute(&self.create_linear_args(name, device, length_sectors, uuid))
    }

    fn remove(&self, name: &str) -> Result<()> {
        require_name("map name", name)?;
        info!("Removing mapping {}", name);
        let argv: [OsString; 3] = [self.program.as_str().into(), "remove".into(), name.into()];
        self.executor.execute(&argv)
    }

    fn name_from_node(&self, node: &str) -> Result<String> {
        require_name("dm node", node)?;
        let path = self.sys_block_dir.join(node).join("dm").join("name");
        debug!("Reading map name from {:?}", path);

        let name = fs::read_to_string(&path)
            .map_err(|_| SysError::DeviceNotFound(node.to_string()))?;
        Ok(name.trim().to_string())
    }

    fn node_from_name(&self, name: &str) -> Result<String> {
        require_name("map name", name)?;
        let node = self.resolver.resolve(&self.mapper_dir.join(name))?;
        node.file_name()
            .map(|node| node.to_string_lossy().into_owned())
            .ok_or_else(|| SysError::DeviceNotFound(name.to_string()))
    }
}
