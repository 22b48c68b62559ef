// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use swap_types::SwapFormat;
use thiserror::Error;

/// Error types for swap device operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to determine device's state: {source}")]
    Probe {
        device: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    UnsafeFormat(#[from] ActivationRefusal),

    #[error("Failed to resolve {path:?}: {source}")]
    Resolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Invalid configuration {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Why a probed swap area must not be handed to `swapon`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationRefusal {
    #[error("Old swap format, cannot activate.")]
    Obsolete,

    /// Activating would overwrite a hibernation image.
    #[error("Suspended system on the swap device, cannot activate.")]
    Suspended,

    #[error("Unknown swap space format, cannot activate.")]
    Unrecognized,
}

impl ActivationRefusal {
    /// `None` when `format` is safe to activate.
    pub fn for_format(format: SwapFormat) -> Option<Self> {
        match format {
            _ if format.is_activatable() => None,
            _ if format.is_suspended() => Some(Self::Suspended),
            SwapFormat::LegacySwapSpace => Some(Self::Obsolete),
            _ => Some(Self::Unrecognized),
        }
    }
}

impl SysError {
    /// Map an open failure on a device node to the closest error kind.
    pub(crate) fn from_open(device: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                SysError::PermissionDenied(format!("Cannot open {} for reading", device.display()))
            }
            std::io::ErrorKind::NotFound => {
                SysError::DeviceNotFound(device.display().to_string())
            }
            _ => SysError::Probe {
                device: device.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Result type alias for swap operations
pub type Result<T> = std::result::Result<T, SysError>;
