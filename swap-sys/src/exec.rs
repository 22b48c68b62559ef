// SPDX-License-Identifier: GPL-3.0-only

//! External program execution.
//!
//! Every mutating operation funnels through [`CommandExecutor`], so the
//! controller only builds argument lists and tests can record them instead
//! of running anything. Arguments are `OsString`s: device paths reach the
//! program byte for byte, whatever their encoding.

use std::ffi::OsString;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Result, SysError};

pub trait CommandExecutor: Send + Sync {
    /// Run `argv[0]` with the remaining elements as arguments.
    fn execute(&self, argv: &[OsString]) -> Result<()>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, argv: &[OsString]) -> Result<()> {
        (**self).execute(argv)
    }
}

/// Runs programs found on `PATH`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, argv: &[OsString]) -> Result<()> {
        let Some((program, args)) = argv.split_first() else {
            return Err(SysError::CommandFailed {
                command: "<empty>".to_string(),
                stderr: "empty command line".to_string(),
            });
        };

        let binary = which::which(program)
            .map_err(|_| SysError::CommandNotFound(program.to_string_lossy().into_owned()))?;
        let rendered = render(argv);
        debug!("Running {}", rendered);

        let output = Command::new(&binary)
            .args(args)
            .output()
            .map_err(|error| SysError::CommandFailed {
                command: rendered.clone(),
                stderr: error.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            warn!("{} failed: {}", rendered, stderr);
            return Err(SysError::CommandFailed {
                command: rendered,
                stderr,
            });
        }

        Ok(())
    }
}

/// Join an argument vector for log and error messages.
pub fn render(argv: &[OsString]) -> String {
    argv.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
