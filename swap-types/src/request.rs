// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Request to activate a swap device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    pub device: PathBuf,
    /// Negative values leave the kernel default in place.
    pub priority: Option<i32>,
}

impl ActivationRequest {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Priority to forward to `swapon`, if any.
    pub fn effective_priority(&self) -> Option<u32> {
        self.priority.and_then(|priority| u32::try_from(priority).ok())
    }
}

/// Outcome of a mutating swap operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OperationResult {
    pub success: bool,
    /// Set only when `success` is false.
    pub message: Option<String>,
}

impl OperationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| "operation failed".to_string()))
        }
    }
}

impl<E: std::fmt::Display> From<Result<(), E>> for OperationResult {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(error) => Self::failed(error.to_string()),
        }
    }
}
