// SPDX-License-Identifier: GPL-3.0-only

//! Device-mapper path resolution
//!
//! `/dev/mapper/<name>` entries are symlinks such as `../dm-2`. The kernel
//! reports the canonical node (`/dev/dm-2`), so any comparison against
//! kernel state has to go through [`DeviceResolver::resolve`] first.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::SwapConfig;
use crate::error::{Result, SysError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResolver {
    dev_dir: PathBuf,
    mapper_dir: PathBuf,
}

impl Default for DeviceResolver {
    fn default() -> Self {
        Self::new("/dev", "/dev/mapper")
    }
}

impl DeviceResolver {
    pub fn new(dev_dir: impl Into<PathBuf>, mapper_dir: impl Into<PathBuf>) -> Self {
        Self {
            dev_dir: dev_dir.into(),
            mapper_dir: mapper_dir.into(),
        }
    }

    pub fn from_config(config: &SwapConfig) -> Self {
        Self::new(&config.dev_dir, &config.mapper_dir)
    }

    pub fn is_mapper_path(&self, path: &Path) -> bool {
        path.starts_with(&self.mapper_dir)
    }

    /// Canonical node for a mapper link target, without touching the filesystem.
    pub fn node_for_target(&self, target: &Path) -> PathBuf {
        let mut components = target.components();
        match components.next() {
            Some(Component::ParentDir) => self.dev_dir.join(components.as_path()),
            Some(Component::RootDir) => target.to_path_buf(),
            _ => self.mapper_dir.join(target),
        }
    }

    /// Resolve `path` to the node the kernel knows it by. Paths outside the
    /// mapper directory are returned unchanged.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if !self.is_mapper_path(path) {
            return Ok(path.to_path_buf());
        }

        let target = fs::read_link(path).map_err(|source| SysError::Resolution {
            path: path.to_path_buf(),
            source,
        })?;

        let node = self.node_for_target(&target);
        debug!("Resolved {:?} to {:?}", path, node);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::symlink;

    use super::*;

    #[test]
    fn parent_relative_target_maps_into_dev() {
        let resolver = DeviceResolver::default();
        assert_eq!(
            resolver.node_for_target(Path::new("../dm-2")),
            PathBuf::from("/dev/dm-2")
        );
    }

    #[test]
    fn absolute_and_sibling_targets() {
        let resolver = DeviceResolver::default();
        assert_eq!(
            resolver.node_for_target(Path::new("/dev/dm-7")),
            PathBuf::from("/dev/dm-7")
        );
        assert_eq!(
            resolver.node_for_target(Path::new("vg-other")),
            PathBuf::from("/dev/mapper/vg-other")
        );
    }

    #[test]
    fn plain_devices_resolve_to_themselves() {
        let resolver = DeviceResolver::default();
        for path in ["/dev/sda1", "/dev/dm-2", "/dev/mapperish", "swapfile"] {
            assert_eq!(resolver.resolve(Path::new(path)).unwrap(), PathBuf::from(path));
        }
    }

    #[test]
    fn follows_mapper_symlink() {
        let root = tempfile::tempdir().unwrap();
        let mapper = root.path().join("mapper");
        fs::create_dir(&mapper).unwrap();
        symlink("../dm-2", mapper.join("vg-lv")).unwrap();

        let resolver = DeviceResolver::new(root.path(), &mapper);
        assert_eq!(
            resolver.resolve(&mapper.join("vg-lv")).unwrap(),
            root.path().join("dm-2")
        );
    }

    #[test]
    fn unreadable_link_is_a_resolution_error() {
        let root = tempfile::tempdir().unwrap();
        let mapper = root.path().join("mapper");
        fs::create_dir(&mapper).unwrap();
        fs::write(mapper.join("control"), b"").unwrap();

        let resolver = DeviceResolver::new(root.path(), &mapper);
        for path in [mapper.join("control"), mapper.join("missing")] {
            let error = resolver.resolve(&path).unwrap_err();
            assert!(matches!(error, SysError::Resolution { .. }));
        }
    }
}
